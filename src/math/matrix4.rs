//! 4x4 Matrix implementation.
//!
//! Matrices are row-major and built for row vectors: a point is transformed
//! as `v * M`, so translation lives in row 3 and `A * B` applies `A` first.

use super::{Quaternion, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};

/// A 4x4 matrix stored as `m[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Rows of the matrix.
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let mut out = Self::ZERO;
        for (row, out_row) in out.m.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = self.m[row][0] * other.m[0][col]
                    + self.m[row][1] * other.m[1][col]
                    + self.m[row][2] * other.m[2][col]
                    + self.m[row][3] * other.m[3][col];
            }
        }
        out
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.m[col][row] = self.m[row][col];
            }
        }
        out
    }

    /// Non-uniform scale matrix.
    pub fn scale(scale: &Vector3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = scale.x;
        out.m[1][1] = scale.y;
        out.m[2][2] = scale.z;
        out
    }

    /// Translation matrix.
    pub fn translation(translate: &Vector3) -> Self {
        let mut out = Self::IDENTITY;
        out.set_translation(translate);
        out
    }

    /// Rotation around the X axis.
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[1][1] = c;
        out.m[1][2] = s;
        out.m[2][1] = -s;
        out.m[2][2] = c;
        out
    }

    /// Rotation around the Y axis.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0][0] = c;
        out.m[0][2] = -s;
        out.m[2][0] = s;
        out.m[2][2] = c;
        out
    }

    /// Rotation around the Z axis.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0][0] = c;
        out.m[0][1] = s;
        out.m[1][0] = -s;
        out.m[1][1] = c;
        out
    }

    /// Euler rotation composed as `Rx * (Ry * Rz)`: X is applied first.
    pub fn rotation_xyz(rotate: &Vector3) -> Self {
        Self::rotation_x(rotate.x)
            .multiply(&Self::rotation_y(rotate.y).multiply(&Self::rotation_z(rotate.z)))
    }

    /// Scale, then Euler rotate (X, Y, Z), then translate.
    pub fn affine(scale: &Vector3, rotate: &Vector3, translate: &Vector3) -> Self {
        Self::affine_with_rotation(scale, &Self::rotation_xyz(rotate), translate)
    }

    /// Scale the basis rows of `rotation` and write `translate` into row 3.
    ///
    /// Only the upper 3x3 of `rotation` is read; the last column of the
    /// result is always (0, 0, 0, 1).
    pub fn affine_with_rotation(scale: &Vector3, rotation: &Matrix4, translate: &Vector3) -> Self {
        let r = &rotation.m;
        Self {
            m: [
                [scale.x * r[0][0], scale.x * r[0][1], scale.x * r[0][2], 0.0],
                [scale.y * r[1][0], scale.y * r[1][1], scale.y * r[1][2], 0.0],
                [scale.z * r[2][0], scale.z * r[2][1], scale.z * r[2][2], 0.0],
                [translate.x, translate.y, translate.z, 1.0],
            ],
        }
    }

    /// Rotation of `angle` radians around `axis` (Rodrigues' formula).
    ///
    /// `axis` must already be unit length; it is not renormalized here.
    pub fn rotation_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let k = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        Self {
            m: [
                [x * x * k + c, x * y * k + z * s, x * z * k - y * s, 0.0],
                [x * y * k - z * s, y * y * k + c, y * z * k + x * s, 0.0],
                [x * z * k + y * s, y * z * k - x * s, z * z * k + c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation matrix equivalent to a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        Self {
            m: [
                [
                    w * w + x * x - y * y - z * z,
                    2.0 * (x * y + w * z),
                    2.0 * (x * z - w * y),
                    0.0,
                ],
                [
                    2.0 * (x * y - w * z),
                    w * w - x * x + y * y - z * z,
                    2.0 * (y * z + w * x),
                    0.0,
                ],
                [
                    2.0 * (x * z + w * y),
                    2.0 * (y * z - w * x),
                    w * w - x * x - y * y + z * z,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Perspective projection with a [0, 1] depth range.
    pub fn perspective_fov(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let cot = 1.0 / (fov_y / 2.0).tan();
        let mut out = Self::ZERO;
        out.m[0][0] = cot / aspect;
        out.m[1][1] = cot;
        out.m[2][2] = far / (far - near);
        out.m[2][3] = 1.0;
        out.m[3][2] = -near * far / (far - near);
        out
    }

    /// Orthographic projection with a [0, 1] depth range.
    pub fn orthographic(left: f32, top: f32, right: f32, bottom: f32, near: f32, far: f32) -> Self {
        let mut out = Self::ZERO;
        out.m[0][0] = 2.0 / (right - left);
        out.m[1][1] = 2.0 / (top - bottom);
        out.m[2][2] = 1.0 / (far - near);
        out.m[3][0] = (left + right) / (left - right);
        out.m[3][1] = (top + bottom) / (bottom - top);
        out.m[3][2] = near / (near - far);
        out.m[3][3] = 1.0;
        out
    }

    /// Viewport transform from NDC to screen space.
    pub fn viewport(left: f32, top: f32, width: f32, height: f32, min_depth: f32, max_depth: f32) -> Self {
        let mut out = Self::ZERO;
        out.m[0][0] = width / 2.0;
        out.m[1][1] = -height / 2.0;
        out.m[2][2] = max_depth - min_depth;
        out.m[3][0] = left + width / 2.0;
        out.m[3][1] = top + height / 2.0;
        out.m[3][2] = min_depth;
        out.m[3][3] = 1.0;
        out
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.m[0][col] * self.cofactor(0, col)).sum()
    }

    /// Full inverse via cofactor expansion.
    ///
    /// A singular matrix yields non-finite elements; callers guarantee
    /// invertibility.
    pub fn inverse(&self) -> Self {
        let inv_det = 1.0 / self.determinant();
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                // adjugate is the transposed cofactor matrix
                out.m[col][row] = self.cofactor(row, col) * inv_det;
            }
        }
        out
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let mut minor = [[0.0f32; 3]; 3];
        let mut mr = 0;
        for r in (0..4).filter(|&r| r != row) {
            let mut mc = 0;
            for c in (0..4).filter(|&c| c != col) {
                minor[mr][mc] = self.m[r][c];
                mc += 1;
            }
            mr += 1;
        }
        let det3 = minor[0][0] * (minor[1][1] * minor[2][2] - minor[1][2] * minor[2][1])
            - minor[0][1] * (minor[1][0] * minor[2][2] - minor[1][2] * minor[2][0])
            + minor[0][2] * (minor[1][0] * minor[2][1] - minor[1][1] * minor[2][0]);
        if (row + col) % 2 == 0 {
            det3
        } else {
            -det3
        }
    }

    /// Transform a point (w = 1) and divide by the resulting w.
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let m = &self.m;
        let x = v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + m[3][0];
        let y = v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + m[3][1];
        let z = v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + m[3][2];
        let w = v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + m[3][3];
        debug_assert!(w != 0.0, "transform_point produced w == 0");
        Vector3::new(x / w, y / w, z / w)
    }

    /// Transform a direction by the upper 3x3 only (no translation).
    pub fn transform_normal(&self, v: &Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
        )
    }

    /// Translation stored in row 3.
    #[inline]
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    /// Overwrite the translation in row 3.
    #[inline]
    pub fn set_translation(&mut self, v: &Vector3) -> &mut Self {
        self.m[3][0] = v.x;
        self.m[3][1] = v.y;
        self.m[3][2] = v.z;
        self
    }

    /// Check if approximately equal.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

/// Our row-vector matrix is the transpose of glam's column-vector matrix,
/// so each of our rows becomes a glam column.
impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            m: m.to_cols_array_2d(),
        }
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array_2d(&m.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_affine_last_column() {
        let m = Matrix4::affine(
            &Vector3::new(2.0, 3.0, 4.0),
            &Vector3::new(0.3, -1.2, 2.0),
            &Vector3::new(5.0, 6.0, 7.0),
        );
        for row in 0..3 {
            assert_eq!(m.m[row][3], 0.0);
        }
        assert_eq!(m.m[3][3], 1.0);
        assert!(m.translation_part().approx_eq(&Vector3::new(5.0, 6.0, 7.0), 1e-6));
    }

    #[test]
    fn test_affine_matches_glam() {
        let scale = Vector3::new(1.5, 0.5, 2.0);
        let rotate = Vector3::new(0.4, 0.9, -0.7);
        let translate = Vector3::new(1.0, -2.0, 3.0);
        let ours = Matrix4::affine(&scale, &rotate, &translate);

        let theirs = glam::Mat4::from_translation(translate.into())
            * glam::Mat4::from_rotation_z(rotate.z)
            * glam::Mat4::from_rotation_y(rotate.y)
            * glam::Mat4::from_rotation_x(rotate.x)
            * glam::Mat4::from_scale(scale.into());

        let p = Vector3::new(0.3, 1.0, -2.0);
        let a = ours.transform_point(&p);
        let b: Vector3 = theirs.transform_point3(p.into()).into();
        assert!(a.approx_eq(&b, 1e-4));
        assert!(glam::Mat4::from(ours).abs_diff_eq(theirs, 1e-5));
    }

    #[test]
    fn test_rotation_order_is_not_commutative() {
        let rotate = Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let xyz = Matrix4::rotation_xyz(&rotate);
        let yx = Matrix4::rotation_y(rotate.y) * Matrix4::rotation_x(rotate.x);
        assert!(!xyz.approx_eq(&yx, 1e-3));
    }

    #[test]
    fn test_inverse() {
        let m = Matrix4::affine(
            &Vector3::new(2.0, 1.0, 0.5),
            &Vector3::new(0.36, 0.2, 0.0),
            &Vector3::new(0.0, 5.0, -10.0),
        );
        assert!((m * m.inverse()).approx_eq(&Matrix4::IDENTITY, 1e-5));
        assert!((m.inverse() * m).approx_eq(&Matrix4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_inverse_of_singular_is_not_finite() {
        let m = Matrix4::scale(&Vector3::new(1.0, 0.0, 1.0));
        assert!(m.inverse().m.iter().flatten().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_axis_angle_matches_quaternion() {
        let axis = Vector3::new(1.0, 2.0, -1.0).normalized();
        let a = Matrix4::rotation_axis_angle(&axis, 0.8);
        let b = Matrix4::from_quaternion(&Quaternion::from_axis_angle(&axis, 0.8));
        assert!(a.approx_eq(&b, 1e-5));

        let p = Vector3::new(0.5, -1.0, 2.0);
        let rotated = Quaternion::from_axis_angle(&axis, 0.8).rotate_vector(&p);
        assert!(a.transform_point(&p).approx_eq(&rotated, 1e-5));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = Matrix4::perspective_fov(0.45, 16.0 / 9.0, 0.1, 100.0);
        let near = proj.transform_point(&Vector3::new(0.0, 0.0, 0.1));
        let far = proj.transform_point(&Vector3::new(0.0, 0.0, 100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_maps_corners() {
        let proj = Matrix4::orthographic(0.0, 0.0, 1280.0, 720.0, 0.0, 100.0);
        let top_left = proj.transform_point(&Vector3::new(0.0, 0.0, 0.0));
        let bottom_right = proj.transform_point(&Vector3::new(1280.0, 720.0, 100.0));
        assert!(top_left.approx_eq(&Vector3::new(-1.0, 1.0, 0.0), 1e-5));
        assert!(bottom_right.approx_eq(&Vector3::new(1.0, -1.0, 1.0), 1e-5));
    }

    #[test]
    fn test_viewport_maps_ndc_to_screen() {
        let vp = Matrix4::viewport(0.0, 0.0, 1280.0, 720.0, 0.0, 1.0);
        let top_left = vp.transform_point(&Vector3::new(-1.0, 1.0, 0.0));
        let bottom_right = vp.transform_point(&Vector3::new(1.0, -1.0, 1.0));
        assert!(top_left.approx_eq(&Vector3::new(0.0, 0.0, 0.0), 1e-4));
        assert!(bottom_right.approx_eq(&Vector3::new(1280.0, 720.0, 1.0), 1e-4));

        let offset = Matrix4::viewport(100.0, 50.0, 200.0, 100.0, 0.25, 0.75);
        let center = offset.transform_point(&Vector3::new(0.0, 0.0, 0.5));
        assert!(center.approx_eq(&Vector3::new(200.0, 100.0, 0.5), 1e-4));
    }

    #[test]
    fn test_transform_normal_ignores_translation() {
        let m = Matrix4::translation(&Vector3::new(10.0, 10.0, 10.0));
        let n = m.transform_normal(&Vector3::UNIT_Z);
        assert!(n.approx_eq(&Vector3::UNIT_Z, 1e-6));
    }
}
