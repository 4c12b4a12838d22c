//! Verlet particles: implicit velocity from position history.

use crate::float::Float;
use crate::vec::Vec3;

/// A cloth particle. Velocity is `pos - prev_pos`; nothing else is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// A particle at rest at `pos`.
    pub fn new(pos: Vec3<F>) -> Self {
        Particle { pos, prev_pos: pos, pinned: false }
    }

    pub fn pinned(pos: Vec3<F>) -> Self {
        Particle { pos, prev_pos: pos, pinned: true }
    }

    /// Displacement over the last step, scaled by `damping`.
    pub fn velocity(&self, damping: F) -> Vec3<F> {
        (self.pos - self.prev_pos).scale(damping)
    }

    pub fn velocity_raw(&self) -> Vec3<F> {
        self.pos - self.prev_pos
    }

    /// Pinning discards any motion the particle carried.
    pub fn pin(&mut self) {
        self.pinned = true;
        self.prev_pos = self.pos;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    /// Move to `target`, keeping `1 - snap` of the old history so a release
    /// carries only a fraction of the drag motion as velocity.
    pub fn drag_to(&mut self, target: Vec3<F>, snap: F) {
        self.pos = target;
        self.prev_pos = self.prev_pos.lerp(target, snap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_is_at_rest() {
        let p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0));
        assert_eq!(p.velocity_raw(), Vec3::zero());
        assert!(!p.pinned);
    }

    #[test]
    fn pin_clears_velocity() {
        let mut p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0));
        p.pos = Vec3::new(1.0, 0.0, 0.0);
        p.pin();
        assert!(p.pinned);
        assert_eq!(p.velocity_raw(), Vec3::zero());
    }

    #[test]
    fn drag_to_blends_history() {
        let mut p = Particle::new(Vec3::new(0.0f64, 0.0, 0.0));
        p.drag_to(Vec3::new(10.0, 0.0, 0.0), 0.9);
        assert_eq!(p.pos, Vec3::new(10.0, 0.0, 0.0));
        assert!((p.prev_pos.x - 9.0).abs() < 1e-12);
        assert!((p.velocity_raw().x - 1.0).abs() < 1e-12);
    }
}
