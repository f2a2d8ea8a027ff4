//! Quaternion implementation for rotations.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};

/// A quaternion representing a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component (scalar).
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// All-zero quaternion. Returned when sampling an empty rotation curve.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    /// Create a new quaternion.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// The axis is used as given; callers pass a unit vector.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Hamilton product `self * other`.
    pub fn multiply(&self, other: &Quaternion) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y + other.w * self.x + self.w * other.x,
            y: self.z * other.x - self.x * other.z + other.w * self.y + self.w * other.y,
            z: self.x * other.y - self.y * other.x + other.w * self.z + self.w * other.z,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Conjugate (negated vector part).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Component-wise linear interpolation.
    ///
    /// The result is not renormalized, so large angular steps between the
    /// two inputs shrink the rotation toward zero length.
    #[inline]
    pub fn lerp(&self, other: &Quaternion, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
            w: self.w + (other.w - self.w) * t,
        }
    }

    /// Rotate a vector: `q * (v, 0) * conj(q)`.
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let p = Quaternion::new(v.x, v.y, v.z, 0.0);
        let r = self.multiply(&p).multiply(&self.conjugate());
        Vector3::new(r.x, r.y, r.z)
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Quaternion, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(&rhs)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}
