//! Structural distance constraints and the floor plane.

use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// Which grid neighbor a structural link connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Same row, adjacent column.
    Horizontal,
    /// Same column, adjacent row.
    Vertical,
}

/// A fixed-rest-length link between two particle indices.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub kind: LinkKind,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>], kind: LinkKind) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length, kind }
    }

    /// Relative deviation from rest length, `|len - rest| / rest`.
    pub fn strain(&self, particles: &[Particle<F>]) -> F {
        let len = particles[self.a].pos.distance(particles[self.b].pos);
        (len - self.rest_length).abs() / self.rest_length
    }

    /// Move the endpoints back toward rest length.
    ///
    /// A particle is fixed when pinned or when it is `held` (the dragged
    /// particle). Free/free pairs split the correction, a free/fixed pair moves
    /// only the free end, and a fixed/fixed pair is left alone.
    pub fn solve(&self, particles: &mut [Particle<F>], held: Option<usize>) {
        let a_fixed = particles[self.a].pinned || held == Some(self.a);
        let b_fixed = particles[self.b].pinned || held == Some(self.b);
        if a_fixed && b_fixed {
            return;
        }

        let delta = particles[self.b].pos - particles[self.a].pos;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-10)) {
            return; // degenerate, retried next iteration
        }

        let diff = (dist - self.rest_length) / dist;
        let correction = delta.scale(diff);

        if a_fixed {
            particles[self.b].pos -= correction;
        } else if b_fixed {
            particles[self.a].pos += correction;
        } else {
            let half = correction.scale(F::half());
            particles[self.a].pos += half;
            particles[self.b].pos -= half;
        }
    }
}

/// Every structural link of a grid, in a fixed solve order.
///
/// Horizontal links come first (row-major), then vertical links (row-major).
/// The order is part of the simulation's observable behavior.
#[derive(Clone, Debug)]
pub struct ConstraintSet<F: Float> {
    constraints: AllocVec<DistanceConstraint<F>>,
}

impl<F: Float> ConstraintSet<F> {
    /// Rest lengths are measured from the grid's current positions.
    pub fn build(grid: &ParticleGrid<F>) -> Self {
        let rows = grid.rows();
        let cols = grid.cols();
        let particles = grid.particles();
        let mut constraints = AllocVec::with_capacity(
            cols.saturating_sub(1) * rows + cols * rows.saturating_sub(1),
        );

        for row in 0..rows {
            for col in 0..cols.saturating_sub(1) {
                let a = grid.index(row, col);
                let b = grid.index(row, col + 1);
                constraints.push(DistanceConstraint::from_particles(a, b, particles, LinkKind::Horizontal));
            }
        }

        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols {
                let a = grid.index(row, col);
                let b = grid.index(row + 1, col);
                constraints.push(DistanceConstraint::from_particles(a, b, particles, LinkKind::Vertical));
            }
        }

        ConstraintSet { constraints }
    }

    /// One relaxation pass over every link.
    pub fn solve(&self, particles: &mut [Particle<F>], held: Option<usize>) {
        for c in self.constraints.iter() {
            c.solve(particles, held);
        }
    }

    /// Largest `|len - rest| / rest` over all links.
    pub fn max_strain(&self, particles: &[Particle<F>]) -> F {
        self.constraints
            .iter()
            .map(|c| c.strain(particles))
            .fold(F::zero(), |acc, s| acc.max(s))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DistanceConstraint<F>> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize { self.constraints.len() }
    pub fn is_empty(&self) -> bool { self.constraints.is_empty() }
}

/// Horizontal collision plane at `y = height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorConstraint<F: Float> {
    pub height: F,
    /// Share of horizontal/depth velocity kept on contact.
    pub friction: F,
}

impl<F: Float> FloorConstraint<F> {
    pub fn new(height: F, friction: F) -> Self {
        FloorConstraint { height, friction }
    }

    /// Contact response used right after integration: clamp y, kill vertical
    /// velocity, damp sliding. Returns true on contact.
    pub fn collide(&self, p: &mut Particle<F>) -> bool {
        if p.pos.y >= self.height {
            return false;
        }
        p.pos.y = self.height;
        p.prev_pos.y = p.pos.y;
        let vel_x = p.pos.x - p.prev_pos.x;
        let vel_z = p.pos.z - p.prev_pos.z;
        p.prev_pos.x = p.pos.x - vel_x * self.friction;
        p.prev_pos.z = p.pos.z - vel_z * self.friction;
        true
    }

    /// Positional clamp used between relaxation passes. Pinned particles are
    /// never written.
    pub fn clamp(&self, particles: &mut [Particle<F>]) {
        for p in particles.iter_mut() {
            if p.pinned { continue; }
            p.pos.y = p.pos.y.max(self.height);
        }
    }
}
