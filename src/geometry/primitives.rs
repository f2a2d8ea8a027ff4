//! Primitive geometry builders for particle billboards.

use serde::{Deserialize, Serialize};

use super::vertex::VertexData;
use crate::math::consts::PI;

/// Number of segments around a ring.
pub const RING_DIVISIONS: u32 = 32;
/// Outer radius of a ring.
pub const RING_OUTER_RADIUS: f32 = 1.0;
/// Inner radius of a ring.
pub const RING_INNER_RADIUS: f32 = 0.2;

/// Geometry shared by every instance of a particle group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParticleShape {
    /// Unit quad spanning (0, 0) to (1, 1) on the XY plane.
    #[default]
    Plane,
    /// Flat ring in the XY plane.
    Ring,
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeMesh {
    /// Vertices.
    pub vertices: Vec<VertexData>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl ShapeMesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex bytes ready for a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl ParticleShape {
    /// Build the mesh for this shape.
    pub fn build(&self) -> ShapeMesh {
        match self {
            ParticleShape::Plane => create_plane(),
            ParticleShape::Ring => create_ring(RING_DIVISIONS, RING_OUTER_RADIUS, RING_INNER_RADIUS),
        }
    }
}

/// Quad with its first corner at the origin.
pub fn create_plane() -> ShapeMesh {
    ShapeMesh {
        vertices: vec![
            VertexData::on_plane(0.0, 0.0, 0.0, 0.0),
            VertexData::on_plane(1.0, 0.0, 1.0, 0.0),
            VertexData::on_plane(1.0, 1.0, 1.0, 1.0),
            VertexData::on_plane(0.0, 1.0, 0.0, 1.0),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Flat ring. U runs around the ring, V from outer (0) to inner (1) edge.
pub fn create_ring(divisions: u32, outer_radius: f32, inner_radius: f32) -> ShapeMesh {
    let divisions = divisions.max(3);
    let step = 2.0 * PI / divisions as f32;
    let mut vertices = Vec::with_capacity(divisions as usize * 4);
    let mut indices = Vec::with_capacity(divisions as usize * 6);

    for i in 0..divisions {
        let (sin, cos) = (i as f32 * step).sin_cos();
        let (sin_next, cos_next) = ((i + 1) as f32 * step).sin_cos();
        let u = i as f32 / divisions as f32;
        let u_next = (i + 1) as f32 / divisions as f32;

        let base = vertices.len() as u32;
        vertices.push(VertexData::on_plane(-sin * outer_radius, cos * outer_radius, u, 0.0));
        vertices.push(VertexData::on_plane(-sin_next * outer_radius, cos_next * outer_radius, u_next, 0.0));
        vertices.push(VertexData::on_plane(-sin * inner_radius, cos * inner_radius, u, 1.0));
        vertices.push(VertexData::on_plane(-sin_next * inner_radius, cos_next * inner_radius, u_next, 1.0));

        indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    ShapeMesh { vertices, indices }
}
