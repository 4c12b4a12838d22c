//! Fixed-iteration Gauss-Seidel relaxation of structural links and the floor.

use crate::constraint::{ConstraintSet, FloorConstraint};
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;

/// Runs `iterations` relaxation passes per frame.
///
/// Each pass walks every constraint in creation order, then clamps all
/// particles back above the floor. The budget is always spent in full; there
/// is no convergence test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstraintSolver {
    pub iterations: usize,
}

impl ConstraintSolver {
    pub fn new(iterations: usize) -> Self {
        ConstraintSolver { iterations }
    }

    pub fn solve<F: Float, O: StepObserver>(
        &self,
        particles: &mut [Particle<F>],
        constraints: &ConstraintSet<F>,
        floor: &FloorConstraint<F>,
        held: Option<usize>,
        observer: &mut O,
    ) {
        for i in 0..self.iterations {
            constraints.solve(particles, held);
            observer.on_constraint_iteration(i);
            floor.clamp(particles);
            observer.on_floor_pass(i);
        }
    }
}
