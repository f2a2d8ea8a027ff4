//! Simulation and camera configuration.
//!
//! Both structs deserialize with serde, so they can be loaded from whatever
//! settings format the host application uses.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default per-group instance cap.
pub const DEFAULT_MAX_INSTANCES: u32 = 100;

/// Particle simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum instance records a group writes per frame.
    pub max_instances: u32,
    /// Face particles toward the camera.
    pub use_billboard: bool,
    /// Fixed random seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Whether new groups start with their acceleration field enabled.
    pub default_field_enabled: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_MAX_INSTANCES,
            use_billboard: true,
            seed: None,
            default_field_enabled: false,
        }
    }
}

impl SimulationConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_instances == 0 {
            return Err(Error::InvalidConfig(
                "max_instances must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Perspective camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 0.45,
            aspect: 1280.0 / 720.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(Error::InvalidConfig(format!(
                "fov_y must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        if self.aspect <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(Error::InvalidConfig(format!(
                "clip range must satisfy 0 < near < far, got {}..{}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_instances_rejected() {
        let config = SimulationConfig {
            max_instances: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "max_instances": 2, "seed": 7 }"#).unwrap();
        assert_eq!(config.max_instances, 2);
        assert_eq!(config.seed, Some(7));
        assert!(config.use_billboard);
    }

    #[test]
    fn test_bad_clip_range_rejected() {
        let config = CameraConfig {
            near: 10.0,
            far: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
