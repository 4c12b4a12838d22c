//! Error types for cloth construction and setup.
//!
//! Numeric trouble during a step (zero-length edges, stalled frames, missed
//! picks) is handled locally and never shows up here.

use core::fmt;

/// Errors from configuring or mutating a cloth outside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions { rows: usize, cols: usize },
    /// Particle count must fit in `usize` and in `u32` mesh indices.
    GridTooLarge { rows: usize, cols: usize },
    /// Spacing must be positive and finite.
    InvalidSpacing,
    /// At least one relaxation pass per frame is required.
    InvalidIterations,
    /// A damping/blend factor must be in [0, 1].
    InvalidFactor { name: &'static str },
    /// Pick threshold must be positive and finite.
    InvalidPickThreshold,
    /// The timestep clamp must be positive and finite.
    InvalidTimestep,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { rows, cols } => {
                write!(f, "grid must be at least 2x2 (got {}x{})", rows, cols)
            }
            ClothError::GridTooLarge { rows, cols } => {
                write!(f, "grid {}x{} has more particles than u32 indices can address", rows, cols)
            }
            ClothError::InvalidSpacing => write!(f, "spacing must be positive and finite"),
            ClothError::InvalidIterations => write!(f, "iterations must be at least 1"),
            ClothError::InvalidFactor { name } => write!(f, "{} must be in [0, 1]", name),
            ClothError::InvalidPickThreshold => {
                write!(f, "pick threshold must be positive and finite")
            }
            ClothError::InvalidTimestep => write!(f, "max timestep must be positive and finite"),
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}
