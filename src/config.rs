//! Configuration for a cloth simulation.

use crate::error::ClothError;
use crate::float::Float;

/// Construction-time settings for [`Cloth`](crate::cloth::Cloth).
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_grid(16, 24)
///     .with_spacing(0.25)
///     .with_iterations(8)
///     .with_floor_y(-3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Particle rows. Row 0 is the top edge and starts pinned. Default: 20.
    pub rows: usize,
    /// Particle columns. Default: 20.
    pub cols: usize,
    /// Rest distance between adjacent particles. Default: 0.2.
    pub spacing: F,
    /// Height added to every initial y. Default: 2.0.
    pub vertical_offset: F,
    /// Relaxation passes per frame. Default: 5.
    pub iterations: usize,
    /// Vertical acceleration. Default: -9.8.
    pub gravity: F,
    /// Velocity kept per step [0, 1]. 1.0 = no damping. Default: 0.99.
    pub friction: F,
    /// Height of the collision plane. Default: -2.0.
    pub floor_y: F,
    /// Horizontal/depth velocity kept on floor contact [0, 1]. Default: 0.8.
    pub floor_friction: F,
    /// Max ray-to-particle distance for a grab. Default: 0.5.
    pub pick_threshold: F,
    /// How far `prev_pos` snaps to a drag target each frame [0, 1]. Default: 0.9.
    pub drag_snap: F,
    /// Upper bound on a frame's timestep in seconds. Default: 0.05.
    pub max_dt: F,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            rows: 20,
            cols: 20,
            spacing: F::from_f32(0.2),
            vertical_offset: F::two(),
            iterations: 5,
            gravity: F::from_f32(-9.8),
            friction: F::from_f32(0.99),
            floor_y: -F::two(),
            floor_friction: F::from_f32(0.8),
            pick_threshold: F::half(),
            drag_snap: F::from_f32(0.9),
            max_dt: F::from_f32(0.05),
        }
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_vertical_offset(mut self, offset: F) -> Self {
        self.vertical_offset = offset;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_floor_y(mut self, floor_y: F) -> Self {
        self.floor_y = floor_y;
        self
    }

    pub fn with_floor_friction(mut self, floor_friction: F) -> Self {
        self.floor_friction = floor_friction;
        self
    }

    pub fn with_pick_threshold(mut self, threshold: F) -> Self {
        self.pick_threshold = threshold;
        self
    }

    pub fn with_drag_snap(mut self, snap: F) -> Self {
        self.drag_snap = snap;
        self
    }

    pub fn with_max_dt(mut self, max_dt: F) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Reject settings that would produce a degenerate simulation.
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ClothError::InvalidGridDimensions { rows: self.rows, cols: self.cols });
        }
        match self.rows.checked_mul(self.cols) {
            Some(count) if count <= u32::MAX as usize => {}
            _ => return Err(ClothError::GridTooLarge { rows: self.rows, cols: self.cols }),
        }
        if !self.spacing.is_finite() || self.spacing <= F::zero() {
            return Err(ClothError::InvalidSpacing);
        }
        if self.iterations == 0 {
            return Err(ClothError::InvalidIterations);
        }
        for (name, value) in [
            ("friction", self.friction),
            ("floor_friction", self.floor_friction),
            ("drag_snap", self.drag_snap),
        ] {
            if !value.is_unit() {
                return Err(ClothError::InvalidFactor { name });
            }
        }
        if !self.pick_threshold.is_finite() || self.pick_threshold <= F::zero() {
            return Err(ClothError::InvalidPickThreshold);
        }
        if !self.max_dt.is_finite() || self.max_dt <= F::zero() {
            return Err(ClothError::InvalidTimestep);
        }
        Ok(())
    }

    /// Number of particles the grid will hold.
    pub fn particle_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Structural constraints: `(cols-1)*rows + cols*(rows-1)`.
    pub fn constraint_count(&self) -> usize {
        let horizontal = self.cols.saturating_sub(1).saturating_mul(self.rows);
        let vertical = self.cols.saturating_mul(self.rows.saturating_sub(1));
        horizontal.saturating_add(vertical)
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::ripple::RippleField;

    #[test]
    fn config_survives_json() {
        let config: ClothConfig<f64> = ClothConfig::new().with_grid(12, 9).with_floor_y(-3.5).with_drag_snap(0.75);
        let json = serde_json::to_string(&config).unwrap();
        let back: ClothConfig<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn ripple_field_survives_json() {
        let field = RippleField::<f32>::default();
        let json = serde_json::to_string(&field).unwrap();
        let back: RippleField<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
        assert_eq!(back.waves().len(), 3);
    }
}
