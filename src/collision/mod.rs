//! Axis-aligned bounding-box collision.
//!
//! Shared by gameplay objects ([`Collider`]) and by particle acceleration
//! fields, which gate on [`contains`].

mod aabb;
mod collider;

pub use aabb::Aabb;
pub use collider::Collider;

use crate::math::Vector3;

/// True iff `point` lies inside `aabb` on every axis, boundaries included.
#[inline]
pub fn contains(aabb: &Aabb, point: &Vector3) -> bool {
    aabb.contains_point(point)
}

/// True iff `a` and `b` overlap or touch on every axis.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Origin-seeded bounding box of `points`. See [`Aabb::from_points`].
#[inline]
pub fn compute_aabb<'a>(points: impl IntoIterator<Item = &'a Vector3>) -> Aabb {
    Aabb::from_points(points)
}
