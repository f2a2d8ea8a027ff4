//! Acceleration fields applied to particles inside a box.

use serde::{Deserialize, Serialize};

use crate::collision::{self, Aabb};
use crate::math::Vector3;

/// Constant acceleration inside an axis-aligned volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationField {
    /// Acceleration in units per second squared.
    pub acceleration: Vector3,
    /// Volume where the field acts.
    pub area: Aabb,
}

impl Default for AccelerationField {
    /// Sideways push inside a 2x2x2 box around the origin.
    fn default() -> Self {
        Self {
            acceleration: Vector3::new(15.0, 0.0, 0.0),
            area: Aabb::from_center_size(Vector3::ZERO, Vector3::splat(2.0)),
        }
    }
}

impl AccelerationField {
    /// Create a field.
    pub const fn new(acceleration: Vector3, area: Aabb) -> Self {
        Self { acceleration, area }
    }

    /// Downward field over `area`.
    pub fn gravity(strength: f32, area: Aabb) -> Self {
        Self::new(Vector3::new(0.0, -strength, 0.0), area)
    }

    /// Whether `point` is inside the field volume.
    #[inline]
    pub fn contains(&self, point: &Vector3) -> bool {
        collision::contains(&self.area, point)
    }

    /// Velocity change over `delta_time` for a particle at `point`.
    #[inline]
    pub fn impulse(&self, point: &Vector3, delta_time: f32) -> Option<Vector3> {
        self.contains(point).then(|| self.acceleration * delta_time)
    }
}
