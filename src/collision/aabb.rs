//! Axis-aligned bounding box implementation.

use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// `min <= max` per axis holds once the box has been built by folding over
/// points. The zeroed default is a degenerate box at the origin (a point),
/// not an empty box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vector3,
    /// Maximum corner.
    pub max: Vector3,
}

impl Aabb {
    /// Inverted box, ready to expand. Folding points into this yields the
    /// tight bounds of those points.
    pub const EMPTY: Self = Self {
        min: Vector3 { x: f32::INFINITY, y: f32::INFINITY, z: f32::INFINITY },
        max: Vector3 { x: f32::NEG_INFINITY, y: f32::NEG_INFINITY, z: f32::NEG_INFINITY },
    };

    /// Create a new box.
    #[inline]
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Create a box from center and size.
    pub fn from_center_size(center: Vector3, size: Vector3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounding box of `points`, folded from a zeroed accumulator.
    ///
    /// The fold starts at min = max = (0, 0, 0), so the result always
    /// contains the origin even when every point lies on one side of it.
    /// Geometry offset from the origin therefore gets a widened box. Start
    /// from [`Aabb::EMPTY`] and use [`Aabb::expand_by_point`] for tight bounds.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector3>) -> Self {
        let mut result = Self::default();
        for p in points {
            result.expand_by_point(p);
        }
        result
    }

    /// Check if the box is inverted on any axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    #[inline]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Expand to include a point.
    #[inline]
    pub fn expand_by_point(&mut self, point: &Vector3) -> &mut Self {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self
    }

    /// Check if a point is inside the box, boundaries included.
    #[inline]
    pub fn contains_point(&self, point: &Vector3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this box overlaps or touches another box.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
            && self.min.y <= other.max.y && self.max.y >= other.min.y
            && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Translate the box.
    #[inline]
    pub fn translate(&self, offset: &Vector3) -> Self {
        Self {
            min: self.min + *offset,
            max: self.max + *offset,
        }
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Aabb, epsilon: f32) -> bool {
        self.min.approx_eq(&other.min, epsilon) && self.max.approx_eq(&other.max, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Aabb {
        Aabb::new(Vector3::splat(-1.0), Vector3::splat(1.0))
    }

    #[test]
    fn test_contains() {
        let b = unit_cube();
        assert!(b.contains_point(&Vector3::ZERO));
        assert!(!b.contains_point(&Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_contains_is_closed_on_corners() {
        let b = unit_cube();
        assert!(b.contains_point(&b.min));
        assert!(b.contains_point(&b.max));
        assert!(!b.contains_point(&Vector3::new(1.0 + 1e-4, 0.0, 0.0)));
    }

    #[test]
    fn test_intersects_symmetric_and_touching() {
        let a = unit_cube();
        let touching = Aabb::new(Vector3::new(1.0, -1.0, -1.0), Vector3::new(3.0, 1.0, 1.0));
        let apart = Aabb::new(Vector3::new(1.5, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0));
        let overlap_on_two_axes = Aabb::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.5, 0.5, 3.0));

        for (x, y, expected) in [
            (a, touching, true),
            (a, apart, false),
            (a, overlap_on_two_axes, false),
            (a, a, true),
        ] {
            assert_eq!(x.intersects(&y), expected);
            assert_eq!(y.intersects(&x), expected);
        }
    }

    #[test]
    fn test_center_and_size() {
        let b = Aabb::from_center_size(Vector3::new(2.0, 0.0, -1.0), Vector3::new(4.0, 2.0, 6.0));
        assert!(b.min.approx_eq(&Vector3::new(0.0, -1.0, -4.0), 1e-6));
        assert!(b.max.approx_eq(&Vector3::new(4.0, 1.0, 2.0), 1e-6));
        assert!(b.center().approx_eq(&Vector3::new(2.0, 0.0, -1.0), 1e-6));
        assert!(b.size().approx_eq(&Vector3::new(4.0, 2.0, 6.0), 1e-6));
        let moved = b.translate(&Vector3::ONE);
        assert!(moved.center().approx_eq(&Vector3::new(3.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_default_is_degenerate_point() {
        let b = Aabb::default();
        assert!(!b.is_empty());
        assert!(b.contains_point(&Vector3::ZERO));
        assert!(Aabb::EMPTY.is_empty());
    }

    #[test]
    fn test_from_points_includes_origin() {
        let points = [Vector3::new(5.0, 5.0, 5.0), Vector3::new(6.0, 7.0, 8.0)];
        let b = Aabb::from_points(&points);
        assert!(b.approx_eq(&Aabb::new(Vector3::ZERO, Vector3::new(6.0, 7.0, 8.0)), 1e-6));
    }

    #[test]
    fn test_sentinel_fold_is_tight() {
        let points = [Vector3::new(5.0, 5.0, 5.0), Vector3::new(6.0, 7.0, 8.0)];
        let mut b = Aabb::EMPTY;
        for p in &points {
            b.expand_by_point(p);
        }
        assert!(b.approx_eq(&Aabb::new(points[0], points[1]), 1e-6));
    }
}
