//! Scale / rotate / translate triple.

use super::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Scale, Euler rotation (radians) and translation of an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Per-axis scale.
    pub scale: Vector3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotate: Vector3,
    /// Translation.
    pub translate: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::ONE,
            rotate: Vector3::ZERO,
            translate: Vector3::ZERO,
        }
    }
}

impl Transform {
    /// Create a transform from its parts.
    #[inline]
    pub const fn new(scale: Vector3, rotate: Vector3, translate: Vector3) -> Self {
        Self {
            scale,
            rotate,
            translate,
        }
    }

    /// Unit-scale, unrotated transform at `translate`.
    pub fn from_translation(translate: Vector3) -> Self {
        Self {
            translate,
            ..Self::default()
        }
    }

    /// Affine world matrix for this transform.
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::affine(&self.scale, &self.rotate, &self.translate)
    }
}
