//! Interpolation of keyframe values.

use crate::math::{Quaternion, Vector3};

/// A value that can be stored in an animation curve.
pub trait Interpolate: Copy {
    /// Blend from `self` toward `other` by `t` in [0, 1].
    fn interpolate(&self, other: &Self, t: f32) -> Self;

    /// Value produced by a curve that has no keyframes.
    fn missing() -> Self;
}

impl Interpolate for Vector3 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    /// Sampling an empty translate or scale curve is a caller bug. Debug
    /// builds panic; release builds fall back to zero.
    fn missing() -> Self {
        debug_assert!(false, "sampled a Vector3 curve with no keyframes");
        Vector3::ZERO
    }
}

impl Interpolate for Quaternion {
    /// Component-wise lerp, not slerp.
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    /// Empty rotation curves are tolerated and yield the zero quaternion.
    fn missing() -> Self {
        Quaternion::ZERO
    }
}
