//! Vertex types and layouts.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Vector2, Vector3, Vector4};

/// Mesh vertex with homogeneous position, texture coordinate and normal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct VertexData {
    /// Position in local space (w = 1).
    pub position: Vector4,
    /// Texture coordinates.
    pub texcoord: Vector2,
    /// Normal vector.
    pub normal: Vector3,
}

impl VertexData {
    /// Create a new vertex.
    pub const fn new(position: Vector4, texcoord: Vector2, normal: Vector3) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// Vertex on the XY plane facing -Z.
    pub const fn on_plane(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self::new(
            Vector4::new(x, y, 0.0, 1.0),
            Vector2::new(u, v),
            Vector3::new(0.0, 0.0, -1.0),
        )
    }

    /// Position without the w component.
    #[inline]
    pub const fn point(&self) -> Vector3 {
        self.position.xyz()
    }

    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}
