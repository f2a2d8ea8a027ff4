//! # Math Module
//!
//! Vector, quaternion and matrix algebra for the effects core.
//!
//! Matrices follow the row-vector convention (`v * M`, translation in row 3).
//! Every type converts to and from its `glam` counterpart.

mod matrix4;
mod quaternion;
mod transform;
mod vector2;
mod vector3;
mod vector4;

pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;

/// Common math constants.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Radians to degrees conversion factor.
    pub const RAD2DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians. No wrap-around is applied.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}

/// Convert radians to degrees. No wrap-around is applied.
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * consts::RAD2DEG
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
