//! 4D Vector implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 4D vector with x, y, z, and w components.
/// Used for homogeneous positions and RGBA colors (x=r, y=g, z=b, w=a).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector4 {
    /// X component (red).
    pub x: f32,
    /// Y component (green).
    pub y: f32,
    /// Z component (blue).
    pub z: f32,
    /// W component (alpha).
    pub w: f32,
}

impl Vector4 {
    /// Zero vector (0, 0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// One vector (1, 1, 1, 1), also opaque white.
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };

    /// Create a new Vector4.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Get xyz components as Vector3.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Copy with a replaced alpha (w) channel.
    #[inline]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { w: alpha, ..self }
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Vector4, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Add for Vector4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vector4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: v.w }
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}
