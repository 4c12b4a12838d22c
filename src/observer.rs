//! Step observer trait for monitoring simulation progress.

/// Hooks called at fixed points of a simulation step.
///
/// Implement this to debug, visualize, or profile the solver. All methods
/// default to no-ops. The call order within one step is:
/// `on_drag_applied` (only while dragging), `on_integrate`, then for each
/// relaxation pass `on_constraint_iteration` followed by `on_floor_pass`,
/// and finally `on_step_complete`.
pub trait StepObserver {
    /// Called after the dragged particle was moved to the pointer target.
    fn on_drag_applied(&mut self, _index: usize) {}

    /// Called after all free particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each pass over the structural constraints.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after the floor clamp that closes each relaxation pass.
    fn on_floor_pass(&mut self, _iteration: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards step hooks to `tracing` at trace level.
#[derive(Debug, Default)]
pub struct TracingStepObserver {
    frames: u64,
}

impl TracingStepObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl StepObserver for TracingStepObserver {
    fn on_drag_applied(&mut self, index: usize) {
        tracing::trace!(frame = self.frames, index, "drag target applied");
    }

    fn on_integrate(&mut self) {
        tracing::trace!(frame = self.frames, "integrated");
    }

    fn on_constraint_iteration(&mut self, iteration: usize) {
        tracing::trace!(frame = self.frames, iteration, "constraints relaxed");
    }

    fn on_floor_pass(&mut self, iteration: usize) {
        tracing::trace!(frame = self.frames, iteration, "floor clamped");
    }

    fn on_step_complete(&mut self) {
        tracing::trace!(frame = self.frames, "step complete");
        self.frames += 1;
    }
}
