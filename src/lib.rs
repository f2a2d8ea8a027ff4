//! # Ember - Real-Time Effects Core
//!
//! Ember drives the visual effects and animated geometry of a 3D scene
//! without owning a GPU device. It consumes a camera matrix and a frame
//! delta and produces flat instance buffers for any rendering backend.
//!
//! ## Features
//!
//! - **Math**: Row-major vectors, matrices and quaternions with `glam` interop
//! - **Collision**: Axis-aligned boxes, point containment, box colliders
//! - **Animation**: Keyframe curves, node poses and a looping player
//! - **Particles**: Named particle groups with acceleration fields and
//!   per-instance WVP / World / color output
//!
//! ## Example
//!
//! ```ignore
//! use ember::prelude::*;
//!
//! let mut sim = ParticleSystem::new(SimulationConfig::default())?;
//! sim.set_camera(Camera::default());
//! sim.create_group("hit", TextureHandle(0), ParticleShape::Ring);
//! sim.emit("hit", Vector3::ZERO, 8, EmitStyle::HitEffect);
//!
//! sim.update(1.0 / 60.0);
//! let (records, count) = sim.instance_buffer("hit").unwrap();
//! ```

#![warn(missing_docs)]

pub mod animation;
pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod particles;
pub mod resources;

pub use error::{Error, Result};

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::collision::*;
    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::*;
    pub use crate::math::*;
    pub use crate::particles::*;
    pub use crate::resources::*;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "Ember";
