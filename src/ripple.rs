//! Procedural idle ripple: sine-wave z displacement over a flat sheet.
//!
//! Used by hosts as an attract-mode animation before the user touches the
//! cloth. It only writes into a caller-owned vertex buffer and never touches
//! simulation state.

use crate::float::Float;
use alloc::vec::Vec as AllocVec;

/// One travelling wave: `amplitude * sin(x_freq * x + y_freq * y + speed * t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave<F: Float> {
    pub amplitude: F,
    pub x_freq: F,
    pub y_freq: F,
    pub speed: F,
}

impl<F: Float> Wave<F> {
    pub fn new(amplitude: F, x_freq: F, y_freq: F, speed: F) -> Self {
        Wave { amplitude, x_freq, y_freq, speed }
    }

    pub fn sample(&self, x: F, y: F, t: F) -> F {
        self.amplitude * (self.x_freq * x + self.y_freq * y + self.speed * t).sin()
    }
}

/// Sum of waves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RippleField<F: Float> {
    waves: AllocVec<Wave<F>>,
}

impl<F: Float> RippleField<F> {
    pub fn new(waves: AllocVec<Wave<F>>) -> Self {
        RippleField { waves }
    }

    pub fn waves(&self) -> &[Wave<F>] {
        &self.waves
    }

    pub fn sample(&self, x: F, y: F, t: F) -> F {
        self.waves.iter().fold(F::zero(), |acc, w| acc + w.sample(x, y, t))
    }

    /// Overwrite each vertex's z with the field sampled at its x/y.
    pub fn displace(&self, vertices: &mut [[F; 3]], t: F) {
        for v in vertices.iter_mut() {
            v[2] = self.sample(v[0], v[1], t);
        }
    }
}

impl<F: Float> Default for RippleField<F> {
    /// Broad swell along x, a faster ripple along y, and a slow diagonal
    /// detail wave.
    fn default() -> Self {
        let f = F::from_f32;
        RippleField::new(alloc::vec![
            Wave::new(f(0.5), f(2.0), F::zero(), f(1.5)),
            Wave::new(f(0.2), F::zero(), f(3.0), f(2.0)),
            Wave::new(f(0.1), f(4.0), f(4.0), F::one()),
        ])
    }
}
