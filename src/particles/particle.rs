//! Particle state and the per-instance record handed to the renderer.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Matrix4, Transform, Vector3, Vector4};

/// A simulated particle.
///
/// `current_time` only grows; the particle is live while
/// `current_time < life_time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Scale, Euler rotation and position.
    pub transform: Transform,
    /// Velocity in units per second.
    pub velocity: Vector3,
    /// Base color. Alpha is replaced by the fade factor when drawn.
    pub color: Vector4,
    /// Lifetime in seconds.
    pub life_time: f32,
    /// Age in seconds.
    pub current_time: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            velocity: Vector3::ZERO,
            color: Vector4::ONE,
            life_time: 1.0,
            current_time: 0.0,
        }
    }
}

impl Particle {
    /// Unit-scale white particle at `position`.
    pub fn new(position: Vector3, velocity: Vector3, life_time: f32) -> Self {
        Self {
            transform: Transform::from_translation(position),
            velocity,
            life_time,
            ..Self::default()
        }
    }

    /// Whether the particle is still alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_time < self.life_time
    }

    /// Linear fade from 1 at spawn to 0 at expiry. Not clamped.
    #[inline]
    pub fn fade(&self) -> f32 {
        1.0 - self.current_time / self.life_time
    }

    /// Age by `delta_time` and move along the velocity.
    #[inline]
    pub fn integrate(&mut self, delta_time: f32) {
        self.current_time += delta_time;
        self.transform.translate += self.velocity * delta_time;
    }

    /// World matrix: scale, rotation, billboard, then translation.
    pub fn world_matrix(&self, billboard: &Matrix4) -> Matrix4 {
        Matrix4::scale(&self.transform.scale)
            .multiply(&Matrix4::rotation_xyz(&self.transform.rotate))
            .multiply(billboard)
            .multiply(&Matrix4::translation(&self.transform.translate))
    }
}

/// Per-instance record for GPU instancing.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ParticleForGpu {
    /// World times view-projection.
    pub wvp: Matrix4,
    /// World matrix.
    pub world: Matrix4,
    /// Color with faded alpha.
    pub color: Vector4,
}

impl ParticleForGpu {
    /// Size of one record in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        assert_eq!(ParticleForGpu::SIZE, (16 + 16 + 4) * 4);
    }

    #[test]
    fn test_integrate_and_fade() {
        let mut p = Particle::new(Vector3::ZERO, Vector3::new(0.0, 2.0, 0.0), 2.0);
        p.integrate(0.5);
        assert!(p.transform.translate.approx_eq(&Vector3::new(0.0, 1.0, 0.0), 1e-6));
        assert!((p.fade() - 0.75).abs() < 1e-6);
        assert!(p.is_alive());

        p.integrate(1.5);
        assert!(!p.is_alive());
        assert!(p.fade().abs() < 1e-6);
    }

    #[test]
    fn test_fade_goes_negative_past_expiry() {
        let mut p = Particle::new(Vector3::ZERO, Vector3::ZERO, 1.0);
        p.integrate(1.25);
        assert!(p.fade() < 0.0);
    }

    #[test]
    fn test_world_matrix_places_particle() {
        let mut p = Particle::new(Vector3::new(1.0, 2.0, 3.0), Vector3::ZERO, 1.0);
        p.transform.scale = Vector3::splat(2.0);
        let world = p.world_matrix(&Matrix4::IDENTITY);
        assert!(world.approx_eq(
            &Matrix4::affine(&Vector3::splat(2.0), &Vector3::ZERO, &Vector3::new(1.0, 2.0, 3.0)),
            1e-6
        ));
    }
}
