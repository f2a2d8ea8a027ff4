//! Geometry module for particle meshes.

mod primitives;
mod vertex;

pub use primitives::*;
pub use vertex::VertexData;
