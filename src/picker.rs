//! Pointer picking and the drag state machine.
//!
//! `Idle --down within threshold--> Dragging --up--> Idle`. While dragging,
//! the grabbed particle follows the intersection of the latest pointer ray
//! with a camera-facing plane fixed at grab time.

use crate::camera::{Camera, Plane, Ray};
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Discrete pointer input in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent<F: Float> {
    Down { ndc: [F; 2] },
    Move { ndc: [F; 2] },
    Up,
}

/// Camera controls the presentation layer owns (e.g. orbit controls).
///
/// The dragger turns them off while a particle is held so the same pointer
/// motion doesn't also rotate the view.
pub trait CameraControls {
    fn set_enabled(&mut self, enabled: bool);
}

/// For hosts without camera controls.
pub struct NoCameraControls;

impl CameraControls for NoCameraControls {
    fn set_enabled(&mut self, _enabled: bool) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState<F: Float> {
    Idle,
    Dragging {
        index: usize,
        /// Fixed for the whole drag.
        plane: Plane<F>,
        /// Latest pointer position.
        ndc: [F; 2],
        /// Ray through `ndc` from the latest camera.
        ray: Ray<F>,
    },
}

/// Index of the unpinned particle nearest to `ray`, if within `threshold`.
/// Ties go to the lower index.
pub fn pick<F: Float>(particles: &[Particle<F>], ray: &Ray<F>, threshold: F) -> Option<usize> {
    let mut best: Option<(usize, F)> = None;
    for (i, p) in particles.iter().enumerate() {
        if p.pinned {
            continue;
        }
        let d = ray.distance_to_point(p.pos);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.filter(|&(_, d)| d < threshold).map(|(i, _)| i)
}

/// Owns the drag state for one simulation instance.
#[derive(Clone, Debug)]
pub struct Dragger<F: Float> {
    state: DragState<F>,
    pick_threshold: F,
    snap: F,
}

impl<F: Float> Dragger<F> {
    pub fn new(pick_threshold: F, snap: F) -> Self {
        Dragger { state: DragState::Idle, pick_threshold, snap }
    }

    pub fn state(&self) -> &DragState<F> {
        &self.state
    }

    /// Index of the particle being dragged.
    pub fn held(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { index, .. } => Some(index),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.held().is_some()
    }

    /// Drive the state machine. Returns the grabbed index on a successful
    /// pointer-down.
    pub fn handle<C: CameraControls>(
        &mut self,
        event: PointerEvent<F>,
        particles: &[Particle<F>],
        camera: &Camera<F>,
        controls: &mut C,
    ) -> Option<usize> {
        match event {
            PointerEvent::Down { ndc } => self.begin(particles, ndc, camera, controls),
            PointerEvent::Move { ndc } => {
                if let DragState::Dragging { ndc: last, ray, .. } = &mut self.state {
                    *last = ndc;
                    *ray = camera.ray(ndc[0], ndc[1]);
                }
                None
            }
            PointerEvent::Up => {
                self.end(controls);
                None
            }
        }
    }

    fn begin<C: CameraControls>(
        &mut self,
        particles: &[Particle<F>],
        ndc: [F; 2],
        camera: &Camera<F>,
        controls: &mut C,
    ) -> Option<usize> {
        // A second press while already dragging restarts the drag.
        self.end(controls);
        let ray = camera.ray(ndc[0], ndc[1]);
        let Some(index) = pick(particles, &ray, self.pick_threshold) else {
            tracing::trace!("pointer down missed the cloth");
            return None;
        };
        let plane = Plane::from_normal_and_point(-camera.forward(), particles[index].pos);
        self.state = DragState::Dragging { index, plane, ndc, ray };
        controls.set_enabled(false);
        tracing::debug!(index, "drag started");
        Some(index)
    }

    fn end<C: CameraControls>(&mut self, controls: &mut C) {
        if let DragState::Dragging { index, .. } = self.state {
            self.state = DragState::Idle;
            controls.set_enabled(true);
            tracing::debug!(index, "drag ended");
        }
    }

    /// Rebuild the pointer ray after the camera moved, so the target follows
    /// the view the user currently sees.
    pub fn refresh(&mut self, camera: &Camera<F>) {
        if let DragState::Dragging { ndc, ray, .. } = &mut self.state {
            *ray = camera.ray(ndc[0], ndc[1]);
        }
    }

    /// Where the dragged particle should be this frame.
    pub fn target(&self) -> Option<(usize, Vec3<F>)> {
        match &self.state {
            DragState::Dragging { index, plane, ray, .. } => {
                ray.intersect_plane(plane).map(|hit| (*index, hit))
            }
            DragState::Idle => None,
        }
    }

    /// Move the dragged particle onto the pointer target. Returns the index
    /// that was moved. A ray parallel to the plane leaves the particle where
    /// it was, and a particle pinned mid-drag is never moved.
    pub fn apply(&self, particles: &mut [Particle<F>]) -> Option<usize> {
        let index = self.held()?;
        if particles[index].pinned {
            tracing::trace!(index, "dragged particle is pinned");
            return None;
        }
        match self.target() {
            Some((_, hit)) => {
                particles[index].drag_to(hit, self.snap);
                Some(index)
            }
            None => {
                tracing::trace!(index, "pointer ray misses drag plane");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag(bool);

    impl CameraControls for Flag {
        fn set_enabled(&mut self, enabled: bool) {
            self.0 = enabled;
        }
    }

    fn camera() -> Camera<f32> {
        Camera::perspective(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 0.0),
            core::f32::consts::FRAC_PI_4,
            1.0,
            0.1,
            100.0,
        )
    }

    fn particles() -> [Particle<f32>; 3] {
        [
            Particle::pinned(Vec3::new(0.0, 0.0, 0.0)),
            Particle::new(Vec3::new(0.2, 0.0, 0.0)),
            Particle::new(Vec3::new(3.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn pick_skips_pinned_and_far_particles() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&particles(), &ray, 0.5), Some(1));
        assert_eq!(pick(&particles(), &ray, 0.1), None);
    }

    #[test]
    fn pick_ties_resolve_to_lower_index() {
        let ps = [
            Particle::new(Vec3::new(-0.1f32, 0.0, 0.0)),
            Particle::new(Vec3::new(0.1f32, 0.0, 0.0)),
        ];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&ps, &ray, 0.5), Some(0));
    }

    #[test]
    fn down_up_cycle_toggles_controls() {
        let ps = particles();
        let cam = camera();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        let mut controls = Flag(true);

        let picked = dragger.handle(PointerEvent::Down { ndc: [0.0, 0.0] }, &ps, &cam, &mut controls);
        assert_eq!(picked, Some(1));
        assert!(dragger.is_dragging());
        assert!(!controls.0);

        dragger.handle(PointerEvent::Up, &ps, &cam, &mut controls);
        assert!(!dragger.is_dragging());
        assert!(controls.0);
    }

    #[test]
    fn miss_stays_idle_and_keeps_controls() {
        let ps = particles();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        let mut controls = Flag(true);
        let picked = dragger.handle(PointerEvent::Down { ndc: [0.9, 0.9] }, &ps, &camera(), &mut controls);
        assert_eq!(picked, None);
        assert_eq!(dragger.state(), &DragState::Idle);
        assert!(controls.0);
    }

    #[test]
    fn drag_plane_faces_camera() {
        let ps = particles();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        dragger.handle(PointerEvent::Down { ndc: [0.0, 0.0] }, &ps, &camera(), &mut NoCameraControls);
        match dragger.state() {
            DragState::Dragging { plane, .. } => {
                assert!((plane.normal.z - 1.0).abs() < 1e-5);
                assert!(plane.distance_to_point(ps[1].pos).abs() < 1e-5);
            }
            DragState::Idle => panic!("expected a drag"),
        }
    }

    #[test]
    fn apply_moves_particle_to_ray_hit() {
        let mut ps = particles();
        let cam = camera();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        dragger.handle(PointerEvent::Down { ndc: [0.0, 0.0] }, &ps, &cam, &mut NoCameraControls);
        dragger.handle(PointerEvent::Move { ndc: [0.1, 0.2] }, &ps, &cam, &mut NoCameraControls);
        let (index, hit) = dragger.target().expect("ray should hit the drag plane");
        assert_eq!(dragger.apply(&mut ps), Some(index));
        assert_eq!(ps[index].pos, hit);
        assert!(hit.z.abs() < 1e-5);
        assert!(hit.x > 0.0 && hit.y > 0.0);
    }

    #[test]
    fn apply_leaves_particle_pinned_mid_drag() {
        let mut ps = particles();
        let cam = camera();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        dragger.handle(PointerEvent::Down { ndc: [0.0, 0.0] }, &ps, &cam, &mut NoCameraControls);
        ps[1].pin();
        dragger.handle(PointerEvent::Move { ndc: [0.1, 0.2] }, &ps, &cam, &mut NoCameraControls);
        assert_eq!(dragger.apply(&mut ps), None);
        assert_eq!(ps[1].pos, Vec3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn refresh_rebuilds_ray_from_last_pointer() {
        let ps = particles();
        let mut dragger = Dragger::new(0.5f32, 0.9);
        dragger.handle(PointerEvent::Down { ndc: [0.0, 0.0] }, &ps, &camera(), &mut NoCameraControls);
        dragger.handle(PointerEvent::Move { ndc: [0.1, 0.2] }, &ps, &camera(), &mut NoCameraControls);

        let moved = Camera::perspective(
            Vec3::new(1.0, 0.0, 10.0),
            Vec3::new(1.0, 0.0, 0.0),
            core::f32::consts::FRAC_PI_4,
            1.0,
            0.1,
            100.0,
        );
        dragger.refresh(&moved);
        match dragger.state() {
            DragState::Dragging { ndc, ray, .. } => {
                assert_eq!(*ndc, [0.1, 0.2]);
                assert_eq!(*ray, moved.ray(0.1, 0.2));
            }
            DragState::Idle => panic!("expected a drag"),
        }
    }

    #[test]
    fn apply_is_noop_when_idle() {
        let mut ps = particles();
        let dragger = Dragger::new(0.5f32, 0.9);
        assert_eq!(dragger.apply(&mut ps), None);
        assert_eq!(ps, particles());
    }
}
