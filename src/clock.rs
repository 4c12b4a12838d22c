//! Frame clock: turns raw frame deltas into simulation timesteps.

use crate::float::Float;
use crate::integrator::clamp_dt;

/// Clamps frame deltas and tracks simulated time.
///
/// A stalled frame (tab suspended, debugger break) produces one `max_dt` step
/// instead of a huge one. While paused no timestep is produced at all.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock<F: Float> {
    max_dt: F,
    paused: bool,
    elapsed: F,
    frames: u64,
}

impl<F: Float> FrameClock<F> {
    pub fn new(max_dt: F) -> Self {
        FrameClock { max_dt, paused: false, elapsed: F::zero(), frames: 0 }
    }

    /// Timestep for this frame, or `None` while paused.
    pub fn tick(&mut self, raw_dt: F) -> Option<F> {
        if self.paused {
            return None;
        }
        let dt = clamp_dt(raw_dt, self.max_dt);
        if dt != raw_dt {
            tracing::debug!(raw_dt = %raw_dt, dt = %dt, "frame delta clamped");
        }
        self.elapsed = self.elapsed + dt;
        self.frames += 1;
        Some(dt)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool { self.paused }
    /// Simulated seconds, the sum of every clamped timestep.
    pub fn elapsed(&self) -> F { self.elapsed }
    pub fn frames(&self) -> u64 { self.frames }
    pub fn max_dt(&self) -> F { self.max_dt }
}
