//! Verlet integration under gravity, with first-pass floor contact.

use crate::constraint::FloorConstraint;
use crate::float::Float;
use crate::particle::Particle;

/// Clamp a raw frame delta into `[0, max_dt]`. NaN becomes 0.
///
/// Velocity lives in position history, so every step must see the same
/// clamped value for runs to reproduce.
pub fn clamp_dt<F: Float>(raw_dt: F, max_dt: F) -> F {
    if raw_dt > F::zero() {
        raw_dt.min(max_dt)
    } else {
        F::zero()
    }
}

/// Advances free particles by one Verlet step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator<F: Float> {
    pub gravity: F,
    /// Velocity kept per step.
    pub friction: F,
}

impl<F: Float> Integrator<F> {
    pub fn new(gravity: F, friction: F) -> Self {
        Integrator { gravity, friction }
    }

    /// Step one particle. Pinned and held particles are untouched.
    pub fn integrate_particle(&self, p: &mut Particle<F>, dt: F, floor: &FloorConstraint<F>) {
        if p.pinned {
            return;
        }
        let velocity = p.velocity(self.friction);
        p.prev_pos = p.pos;
        p.pos += velocity;
        p.pos.y = p.pos.y + self.gravity * dt * dt;
        floor.collide(p);
    }

    /// Step every particle except `held`. `dt` must already be clamped.
    pub fn integrate(
        &self,
        particles: &mut [Particle<F>],
        dt: F,
        floor: &FloorConstraint<F>,
        held: Option<usize>,
    ) {
        for (i, p) in particles.iter_mut().enumerate() {
            if held == Some(i) {
                continue;
            }
            self.integrate_particle(p, dt, floor);
        }
    }
}
