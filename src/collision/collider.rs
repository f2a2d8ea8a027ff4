//! Box collider for gameplay objects.

use super::Aabb;
use crate::geometry::VertexData;
use crate::math::{Matrix4, Vector3};

/// A mesh-derived AABB that follows its object's world matrix.
///
/// The local box is built once from the mesh vertices. Each update moves it
/// by the world translation only, so rotation and scale do not reshape it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Collider {
    local: Aabb,
    world: Aabb,
}

impl Collider {
    /// Build from mesh vertex positions using [`Aabb::from_points`].
    pub fn from_vertices<'a>(positions: impl IntoIterator<Item = &'a Vector3>) -> Self {
        let local = Aabb::from_points(positions);
        Self { local, world: local }
    }

    /// Build from mesh vertices, folding their positions like
    /// [`Collider::from_vertices`].
    pub fn from_mesh(vertices: &[VertexData]) -> Self {
        let mut local = Aabb::default();
        for v in vertices {
            local.expand_by_point(&v.point());
        }
        Self { local, world: local }
    }

    /// Wrap an explicit local box.
    pub fn from_local(local: Aabb) -> Self {
        Self { local, world: local }
    }

    /// Local-space box.
    #[inline]
    pub fn local(&self) -> &Aabb {
        &self.local
    }

    /// World-space box as of the last [`Collider::update`].
    #[inline]
    pub fn world(&self) -> &Aabb {
        &self.world
    }

    /// Re-place the world box at the translation of `world_matrix`.
    pub fn update(&mut self, world_matrix: &Matrix4) {
        self.world = self.local.translate(&world_matrix.translation_part());
    }

    /// Whether the two world boxes overlap or touch.
    #[inline]
    pub fn collides_with(&self, other: &Collider) -> bool {
        self.world.intersects(&other.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_vertices() -> Vec<Vector3> {
        vec![Vector3::splat(-0.5), Vector3::splat(0.5)]
    }

    #[test]
    fn test_world_box_follows_translation() {
        let mut c = Collider::from_vertices(&cube_vertices());
        c.update(&Matrix4::affine(
            &Vector3::splat(3.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(10.0, 0.0, 0.0),
        ));
        assert!(c.world().min.approx_eq(&Vector3::new(9.5, -0.5, -0.5), 1e-6));
        assert!(c.world().max.approx_eq(&Vector3::new(10.5, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_from_mesh_matches_positions() {
        let mesh = crate::geometry::create_ring(32, 1.0, 0.2);
        let points: Vec<Vector3> = mesh.vertices.iter().map(VertexData::point).collect();
        let from_mesh = Collider::from_mesh(&mesh.vertices);
        assert_eq!(from_mesh, Collider::from_vertices(&points));
        assert!(from_mesh.local().min.approx_eq(&Vector3::new(-1.0, -1.0, 0.0), 1e-5));
        assert!(from_mesh.local().max.approx_eq(&Vector3::new(1.0, 1.0, 0.0), 1e-5));

        // Origin-seeded fold: a quad at (0,0)-(1,1) keeps the origin corner.
        let quad = Collider::from_mesh(&crate::geometry::create_plane().vertices);
        assert_eq!(quad.local().min, Vector3::ZERO);
    }

    #[test]
    fn test_collides_with() {
        let mut a = Collider::from_vertices(&cube_vertices());
        let mut b = Collider::from_vertices(&cube_vertices());
        a.update(&Matrix4::IDENTITY);
        b.update(&Matrix4::translation(&Vector3::new(1.0, 0.0, 0.0)));
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));

        b.update(&Matrix4::translation(&Vector3::new(1.5, 0.0, 0.0)));
        assert!(!a.collides_with(&b));
    }
}
