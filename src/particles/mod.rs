//! CPU particle simulation with acceleration fields.
//!
//! Groups of particles age, drift under optional box-bounded acceleration
//! fields, and write one instance record per live particle each tick.

mod emitter;
mod forces;
mod particle;
mod particle_group;
mod particle_system;

pub use emitter::{EmissionProfile, EmitStyle};
pub use forces::AccelerationField;
pub use particle::{Particle, ParticleForGpu};
pub use particle_group::{FrameContext, ParticleGroup};
pub use particle_system::ParticleSystem;
