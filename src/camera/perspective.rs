//! Perspective camera driven by a scale / rotate / translate transform.

use crate::config::CameraConfig;
use crate::error::Result;
use crate::math::{Matrix4, Transform, Vector3};

use super::CameraProvider;

/// A perspective projection camera.
///
/// The world matrix comes from the transform and the view matrix is its
/// inverse. Scale must stay non-zero so the world matrix is invertible.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform.
    pub transform: Transform,
    /// Projection settings.
    config: CameraConfig,
    world_matrix: Matrix4,
    view_matrix: Matrix4,
    projection_matrix: Matrix4,
    view_projection_matrix: Matrix4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_valid_config(CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera at the origin after validating `config`.
    pub fn new(config: CameraConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CameraConfig) -> Self {
        let mut camera = Self {
            transform: Transform::default(),
            config,
            world_matrix: Matrix4::IDENTITY,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            view_projection_matrix: Matrix4::IDENTITY,
        };
        camera.update();
        camera
    }

    /// Projection settings.
    #[inline]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Set the camera position.
    pub fn set_translate(&mut self, translate: Vector3) {
        self.transform.translate = translate;
    }

    /// Set the Euler rotation in radians.
    pub fn set_rotate(&mut self, rotate: Vector3) {
        self.transform.rotate = rotate;
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.config.aspect = aspect;
    }

    /// Set the vertical field of view in radians.
    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.config.fov_y = fov_y;
    }

    /// Recompute every matrix from the transform and settings.
    pub fn update(&mut self) {
        self.world_matrix = self.transform.to_matrix();
        self.view_matrix = self.world_matrix.inverse();
        self.projection_matrix = Matrix4::perspective_fov(
            self.config.fov_y,
            self.config.aspect,
            self.config.near,
            self.config.far,
        );
        self.view_projection_matrix = self.view_matrix.multiply(&self.projection_matrix);
    }

    /// World matrix as of the last update.
    #[inline]
    pub fn world_matrix(&self) -> &Matrix4 {
        &self.world_matrix
    }

    /// View matrix as of the last update.
    #[inline]
    pub fn view_matrix(&self) -> &Matrix4 {
        &self.view_matrix
    }

    /// Projection matrix as of the last update.
    #[inline]
    pub fn projection_matrix(&self) -> &Matrix4 {
        &self.projection_matrix
    }

    /// View times projection as of the last update.
    #[inline]
    pub fn view_projection_matrix(&self) -> &Matrix4 {
        &self.view_projection_matrix
    }
}

impl CameraProvider for Camera {
    fn view_projection(&self) -> Matrix4 {
        self.view_projection_matrix
    }

    fn world_matrix(&self) -> Matrix4 {
        self.world_matrix
    }
}
