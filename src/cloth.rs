//! The simulation instance: one cloth sheet, its links, and its drag state.

use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::config::ClothConfig;
use crate::constraint::{ConstraintSet, FloorConstraint};
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::integrator::Integrator;
use crate::mesh;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::picker::{CameraControls, DragState, Dragger, PointerEvent};
use crate::solver::ConstraintSolver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A rectangular cloth under gravity, with floor contact and pointer dragging.
///
/// Each [`step`](Self::step) runs, in order: drag target update, Verlet
/// integration, then `iterations` passes of constraint relaxation each
/// followed by a floor clamp. Reordering these changes the result.
///
/// ```
/// use drape::{Cloth, ClothConfig, NoOpStepObserver};
///
/// let mut cloth = Cloth::new(ClothConfig::<f32>::new().with_grid(8, 8)).unwrap();
/// for _ in 0..30 {
///     cloth.step(1.0 / 60.0, &mut NoOpStepObserver);
/// }
/// assert_eq!(cloth.positions().len(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    grid: ParticleGrid<F>,
    constraints: ConstraintSet<F>,
    floor: FloorConstraint<F>,
    integrator: Integrator<F>,
    solver: ConstraintSolver,
    dragger: Dragger<F>,
    clock: FrameClock<F>,
    config: ClothConfig<F>,
}

impl<F: Float> Cloth<F> {
    /// Build the grid and its links. Fails on a degenerate configuration.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = ParticleGrid::initialize(config.rows, config.cols, config.spacing, config.vertical_offset);
        let constraints = ConstraintSet::build(&grid);
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            constraints = constraints.len(),
            "cloth created"
        );
        Ok(Cloth {
            grid,
            constraints,
            floor: FloorConstraint::new(config.floor_y, config.floor_friction),
            integrator: Integrator::new(config.gravity, config.friction),
            solver: ConstraintSolver::new(config.iterations),
            dragger: Dragger::new(config.pick_threshold, config.drag_snap),
            clock: FrameClock::new(config.max_dt),
            config,
        })
    }

    /// Advance one frame by `raw_dt` seconds (clamped to `max_dt`).
    /// Returns false, doing nothing, while paused.
    pub fn step<O: StepObserver>(&mut self, raw_dt: F, observer: &mut O) -> bool {
        let Some(dt) = self.clock.tick(raw_dt) else {
            return false;
        };
        if let Some(index) = self.apply_drag() {
            observer.on_drag_applied(index);
        }
        self.integrate(dt);
        observer.on_integrate();
        self.relax(observer);
        observer.on_step_complete();
        true
    }

    /// Stage 1: put the dragged particle on the pointer target.
    pub fn apply_drag(&mut self) -> Option<usize> {
        self.dragger.apply(self.grid.particles_mut())
    }

    /// Stage 2: Verlet-step every free particle. `dt` is used as given.
    pub fn integrate(&mut self, dt: F) {
        let held = self.dragger.held();
        self.integrator.integrate(self.grid.particles_mut(), dt, &self.floor, held);
    }

    /// Stage 3: relaxation passes over links and floor.
    pub fn relax<O: StepObserver>(&mut self, observer: &mut O) {
        let held = self.dragger.held();
        self.solver.solve(self.grid.particles_mut(), &self.constraints, &self.floor, held, observer);
    }

    /// Feed one pointer event. Returns the grabbed particle on a pointer-down
    /// that hit the cloth.
    pub fn handle_pointer<C: CameraControls>(
        &mut self,
        event: PointerEvent<F>,
        camera: &Camera<F>,
        controls: &mut C,
    ) -> Option<usize> {
        self.dragger.handle(event, self.grid.particles(), camera, controls)
    }

    /// Call when the view changes mid-drag so the drag target is taken from
    /// the current camera rather than the one of the last pointer event.
    pub fn update_camera(&mut self, camera: &Camera<F>) {
        self.dragger.refresh(camera);
    }

    /// Pin a particle where it currently is. A particle pinned while dragged
    /// stays put until the drag ends.
    pub fn pin(&mut self, row: usize, col: usize) -> Result<(), ClothError> {
        let index = self.checked_index(row, col)?;
        self.grid.pin(index)
    }

    pub fn unpin(&mut self, row: usize, col: usize) -> Result<(), ClothError> {
        let index = self.checked_index(row, col)?;
        self.grid.unpin(index)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, ClothError> {
        if row < self.grid.rows() && col < self.grid.cols() {
            Ok(self.grid.index(row, col))
        } else {
            Err(ClothError::ParticleOutOfBounds {
                index: row.saturating_mul(self.grid.cols()).saturating_add(col),
                count: self.grid.len(),
            })
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragger.is_dragging()
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragger.held()
    }

    pub fn drag_state(&self) -> &DragState<F> {
        self.dragger.state()
    }

    /// Row-major particle positions for the vertex buffer.
    pub fn positions(&self) -> AllocVec<[F; 3]> {
        self.grid.positions()
    }

    /// Flat `[x, y, z, ...]` into a caller-owned buffer.
    pub fn write_positions(&self, out: &mut AllocVec<F>) {
        mesh::write_positions(self.grid.particles(), out);
    }

    pub fn triangle_indices(&self) -> AllocVec<u32> {
        mesh::triangle_indices(self.grid.rows(), self.grid.cols())
    }

    /// # Panics
    ///
    /// Panics if `row >= rows()` or `col >= cols()`.
    pub fn position_at(&self, row: usize, col: usize) -> Vec3<F> {
        self.grid.position_at(row, col)
    }

    /// Largest relative deviation of any link from its rest length.
    pub fn max_strain(&self) -> F {
        self.constraints.max_strain(self.grid.particles())
    }

    pub fn particles(&self) -> &[Particle<F>] { self.grid.particles() }
    pub fn grid(&self) -> &ParticleGrid<F> { &self.grid }
    pub fn constraints(&self) -> &ConstraintSet<F> { &self.constraints }
    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn clock(&self) -> &FrameClock<F> { &self.clock }
    pub fn rows(&self) -> usize { self.grid.rows() }
    pub fn cols(&self) -> usize { self.grid.cols() }
    pub fn particle_count(&self) -> usize { self.grid.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NoOpStepObserver, TracingStepObserver};

    fn small() -> Cloth<f64> {
        Cloth::new(ClothConfig::new().with_grid(4, 4).with_spacing(1.0).with_vertical_offset(0.0))
            .expect("valid config")
    }

    #[test]
    fn rejects_degenerate_grid() {
        let err = Cloth::new(ClothConfig::<f32>::new().with_grid(1, 5)).unwrap_err();
        assert_eq!(err, ClothError::InvalidGridDimensions { rows: 1, cols: 5 });
    }

    #[test]
    fn counts() {
        let cloth = small();
        assert_eq!(cloth.particle_count(), 16);
        assert_eq!(cloth.constraint_count(), 24);
        assert_eq!(cloth.triangle_indices().len(), 9 * 6);
    }

    #[test]
    fn paused_cloth_does_not_move() {
        let mut cloth = small();
        let before = cloth.positions();
        cloth.set_paused(true);
        assert!(!cloth.step(1.0 / 60.0, &mut NoOpStepObserver));
        assert_eq!(cloth.positions(), before);
    }

    #[test]
    fn tracing_observer_counts_frames() {
        let mut cloth = small();
        let mut observer = TracingStepObserver::new();
        for _ in 0..3 {
            cloth.step(1.0 / 60.0, &mut observer);
        }
        cloth.set_paused(true);
        cloth.step(1.0 / 60.0, &mut observer);
        assert_eq!(observer.frames(), 3);
        assert_eq!(cloth.clock().frames(), 3);
    }

    #[test]
    fn pin_bounds_checked() {
        let mut cloth = small();
        assert!(cloth.pin(3, 3).is_ok());
        assert!(cloth.particles()[15].pinned);
        assert_eq!(
            cloth.unpin(4, 0),
            Err(ClothError::ParticleOutOfBounds { index: 16, count: 16 })
        );
    }

    #[test]
    fn write_positions_matches_positions() {
        let mut cloth = small();
        cloth.step(1.0 / 60.0, &mut NoOpStepObserver);
        let mut flat = AllocVec::new();
        cloth.write_positions(&mut flat);
        let nested: AllocVec<f64> = cloth.positions().into_iter().flatten().collect();
        assert_eq!(flat, nested);
    }
}
