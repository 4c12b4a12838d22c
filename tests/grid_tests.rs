use drape::{Cloth, ClothConfig, NoOpStepObserver};

fn scenario_config() -> ClothConfig<f64> {
    ClothConfig::new()
        .with_grid(4, 4)
        .with_spacing(1.0)
        .with_vertical_offset(0.0)
        .with_gravity(-9.8)
}

#[test]
fn initial_neighbors_sit_at_spacing() {
    for &(rows, cols, spacing) in &[(4usize, 4usize, 1.0f64), (7, 3, 0.25), (20, 20, 0.2)] {
        let cloth = Cloth::new(ClothConfig::new().with_grid(rows, cols).with_spacing(spacing)).unwrap();
        for row in 0..rows {
            for col in 0..cols {
                let here = cloth.position_at(row, col);
                if col + 1 < cols {
                    let d = here.distance(cloth.position_at(row, col + 1));
                    assert!((d - spacing).abs() < 1e-9, "right of ({}, {}) is {} away", row, col, d);
                }
                if row + 1 < rows {
                    let d = here.distance(cloth.position_at(row + 1, col));
                    assert!((d - spacing).abs() < 1e-9, "below ({}, {}) is {} away", row, col, d);
                }
            }
        }
    }
}

#[test]
fn constraint_count_matches_topology() {
    let cloth = Cloth::new(ClothConfig::<f32>::new().with_grid(5, 9)).unwrap();
    assert_eq!(cloth.constraint_count(), (9 - 1) * 5 + 9 * (5 - 1));
}

#[test]
fn pinned_top_row_drapes_under_gravity() {
    let mut cloth = Cloth::new(scenario_config()).unwrap();

    let top_initial: Vec<_> = (0..cloth.cols()).map(|col| cloth.position_at(0, col)).collect();
    let bottom_row = cloth.rows() - 1;
    let bottom_initial: Vec<f64> = (0..cloth.cols()).map(|col| cloth.position_at(bottom_row, col).y).collect();
    let mut history: Vec<Vec<f64>> = Vec::new();

    for _ in 0..60 {
        cloth.step(1.0 / 60.0, &mut NoOpStepObserver);
        history.push((0..cloth.cols()).map(|col| cloth.position_at(bottom_row, col).y).collect());

        // Top row is bit-for-bit where it started.
        for col in 0..cloth.cols() {
            assert_eq!(cloth.position_at(0, col), top_initial[col], "top row col {} moved", col);
        }
    }

    for col in 0..cloth.cols() {
        let ys: Vec<f64> = history.iter().map(|frame| frame[col]).collect();
        let lowest = ys
            .iter()
            .enumerate()
            .fold(0, |best, (i, &y)| if y < ys[best] { i } else { best });

        // Falls monotonically until the links catch it.
        assert!(ys[0] < bottom_initial[col]);
        for frame in 1..=lowest {
            assert!(ys[frame] <= ys[frame - 1], "col {} rose at frame {} while falling", col, frame);
        }

        // Then hangs below its start, held up by the links, and settles.
        for &y in &ys {
            assert!(y < bottom_initial[col]);
            assert!(y > bottom_initial[col] - 1.0, "col {} fell freely to {}", col, y);
        }
        for pair in ys[40..].windows(2) {
            assert!((pair[1] - pair[0]).abs() < 1e-6, "col {} still moving: {:?}", col, pair);
        }
    }

    let floor = cloth.config().floor_y;
    assert!(cloth.particles().iter().all(|p| p.pos.y >= floor));
    assert!(cloth.max_strain() < 0.5);
}

#[test]
fn floor_holds_every_frame() {
    // Cloth hangs to y = -1 but the floor is at -0.5.
    let mut cloth = Cloth::new(scenario_config().with_floor_y(-0.5)).unwrap();
    for frame in 0..120 {
        cloth.step(1.0 / 60.0, &mut NoOpStepObserver);
        for (i, p) in cloth.particles().iter().enumerate() {
            assert!(p.pos.y >= -0.5, "frame {}: particle {} at y {}", frame, i, p.pos.y);
        }
    }
}

#[test]
fn unpinned_corner_falls() {
    let mut cloth = Cloth::new(scenario_config()).unwrap();
    cloth.unpin(0, 0).unwrap();
    let start = cloth.position_at(0, 0);
    for _ in 0..30 {
        cloth.step(1.0 / 60.0, &mut NoOpStepObserver);
    }
    assert!(cloth.position_at(0, 0).y < start.y);
    assert_eq!(cloth.position_at(0, 3), drape::Vec3::new(1.0, 2.0, 0.0));
}
