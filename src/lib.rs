//! Interactive Verlet cloth for real-time scenes.
//!
//! `drape` simulates a rectangular sheet of particles joined by structural
//! links, hanging from its pinned top row under gravity. Particles collide with
//! a floor plane and can be grabbed and dragged with a pointer ray. Every frame
//! produces a row-major array of vertex positions for a renderer to upload.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity from position history, clamped timestep
//! - **Gauss-Seidel relaxation**: fixed iteration budget, deterministic link order
//! - **Floor contact**: clamp plus sliding friction, re-enforced after every pass
//! - **Pointer dragging**: ray picking and a camera-facing drag plane
//! - **Observable**: hook into each stage via the `StepObserver` trait, or `tracing`
//! - **`no_std` compatible**: works in WASM and embedded environments
//!
//! # Cargo features
//!
//! - `std`: implements `std::error::Error` for [`ClothError`]
//! - `serde`: derives `Serialize`/`Deserialize` for configuration and vectors

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod particle;
pub mod grid;
pub mod constraint;
pub mod integrator;
pub mod solver;
pub mod camera;
pub mod picker;
pub mod cloth;
pub mod clock;
pub mod mesh;
pub mod ripple;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use grid::ParticleGrid;
pub use constraint::{ConstraintSet, DistanceConstraint, FloorConstraint, LinkKind};
pub use integrator::Integrator;
pub use solver::ConstraintSolver;
pub use camera::{Camera, Plane, Ray};
pub use picker::{CameraControls, DragState, Dragger, NoCameraControls, PointerEvent};
pub use cloth::Cloth;
pub use clock::FrameClock;
pub use ripple::{RippleField, Wave};
pub use config::ClothConfig;
pub use observer::{StepObserver, NoOpStepObserver, TracingStepObserver};
pub use error::ClothError;
