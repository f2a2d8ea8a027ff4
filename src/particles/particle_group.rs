//! A named set of particles sharing one texture and one mesh.

use log::trace;

use super::{AccelerationField, Particle, ParticleForGpu};
use crate::geometry::ParticleShape;
use crate::math::{Matrix4, Vector3};
use crate::resources::TextureHandle;

/// Per-frame inputs to the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Camera view times projection.
    pub view_projection: Matrix4,
    /// Camera world matrix.
    pub camera_world: Matrix4,
    /// Seconds since the previous tick.
    pub delta_time: f32,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            view_projection: Matrix4::IDENTITY,
            camera_world: Matrix4::IDENTITY,
            delta_time: 1.0 / 60.0,
        }
    }
}

impl FrameContext {
    /// Context with identity camera matrices.
    pub fn with_delta_time(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Self::default()
        }
    }

    /// Rotation that turns a camera-facing quad toward the camera.
    ///
    /// The quad is flipped half a turn around Y and then takes the camera's
    /// orientation. The camera position is dropped.
    pub fn billboard(&self) -> Matrix4 {
        let mut billboard = Matrix4::rotation_y(std::f32::consts::PI).multiply(&self.camera_world);
        billboard.set_translation(&Vector3::ZERO);
        billboard
    }
}

/// Particles of one effect plus their instance output.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    name: String,
    texture: TextureHandle,
    shape: ParticleShape,
    particles: Vec<Particle>,
    field: AccelerationField,
    field_enabled: bool,
    max_instances: u32,
    instances: Vec<ParticleForGpu>,
}

impl ParticleGroup {
    /// Create an empty group.
    pub fn new(
        name: impl Into<String>,
        texture: TextureHandle,
        shape: ParticleShape,
        max_instances: u32,
    ) -> Self {
        Self {
            name: name.into(),
            texture,
            shape,
            particles: Vec::new(),
            field: AccelerationField::default(),
            field_enabled: false,
            max_instances,
            instances: Vec::with_capacity(max_instances as usize),
        }
    }

    /// Group name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Texture the group is drawn with.
    #[inline]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Mesh every instance uses.
    #[inline]
    pub fn shape(&self) -> ParticleShape {
        self.shape
    }

    /// Particles in spawn order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Acceleration field.
    #[inline]
    pub fn field(&self) -> &AccelerationField {
        &self.field
    }

    /// Whether the field is applied.
    #[inline]
    pub fn field_enabled(&self) -> bool {
        self.field_enabled
    }

    /// Instance cap.
    #[inline]
    pub fn max_instances(&self) -> u32 {
        self.max_instances
    }

    /// Replace the field.
    pub fn set_field(&mut self, field: AccelerationField) {
        self.field = field;
    }

    /// Toggle the field.
    pub fn set_field_enabled(&mut self, enabled: bool) {
        self.field_enabled = enabled;
    }

    /// Append a particle.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every particle and instance.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.instances.clear();
    }

    /// Instance records written by the last update.
    #[inline]
    pub fn instances(&self) -> &[ParticleForGpu] {
        &self.instances
    }

    /// Number of instance records written by the last update.
    #[inline]
    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Advance one tick.
    ///
    /// Expired particles are removed before anything else, so they never
    /// reach the instance buffer. Live particles past the instance cap keep
    /// simulating but are left out of this frame's draw.
    pub fn update(&mut self, frame: &FrameContext, billboard: &Matrix4) {
        let dt = frame.delta_time;
        self.particles.retain(Particle::is_alive);
        self.instances.clear();

        let mut omitted = 0usize;
        for particle in self.particles.iter_mut() {
            if self.field_enabled {
                if let Some(dv) = self.field.impulse(&particle.transform.translate, dt) {
                    particle.velocity += dv;
                }
            }
            particle.integrate(dt);

            if self.instances.len() >= self.max_instances as usize {
                omitted += 1;
                continue;
            }
            let world = particle.world_matrix(billboard);
            self.instances.push(ParticleForGpu {
                wvp: world.multiply(&frame.view_projection),
                world,
                color: particle.color.with_alpha(particle.fade()),
            });
        }

        if omitted > 0 {
            trace!(
                "Particle group {} over instance cap {}: {} particles not drawn",
                self.name,
                self.max_instances,
                omitted
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Aabb;

    fn group(cap: u32) -> ParticleGroup {
        ParticleGroup::new("fx", TextureHandle(0), ParticleShape::Plane, cap)
    }

    #[test]
    fn test_removal_before_integration() {
        let mut g = group(10);
        g.push(Particle::new(Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0), 1.0));
        let frame = FrameContext::with_delta_time(0.5);

        g.update(&frame, &Matrix4::IDENTITY);
        assert_eq!(g.instance_count(), 1);
        g.update(&frame, &Matrix4::IDENTITY);
        assert_eq!(g.instance_count(), 1);
        assert!(g.instances()[0].color.w.abs() < 1e-6);
        g.update(&frame, &Matrix4::IDENTITY);
        assert_eq!(g.instance_count(), 0);
        assert!(g.particles().is_empty());
    }

    #[test]
    fn test_field_only_when_enabled() {
        let mut g = group(10);
        g.set_field(AccelerationField::new(
            Vector3::new(4.0, 0.0, 0.0),
            Aabb::new(Vector3::splat(-1.0), Vector3::splat(1.0)),
        ));
        g.push(Particle::new(Vector3::ZERO, Vector3::ZERO, 10.0));
        let frame = FrameContext::with_delta_time(0.25);

        g.update(&frame, &Matrix4::IDENTITY);
        assert_eq!(g.particles()[0].velocity, Vector3::ZERO);

        g.set_field_enabled(true);
        g.update(&frame, &Matrix4::IDENTITY);
        assert!(g.particles()[0].velocity.approx_eq(&Vector3::new(1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_wvp_is_world_times_view_projection() {
        let mut g = group(10);
        g.push(Particle::new(Vector3::new(1.0, 2.0, 3.0), Vector3::ZERO, 10.0));
        let frame = FrameContext {
            view_projection: Matrix4::perspective_fov(0.45, 1.5, 0.1, 100.0),
            camera_world: Matrix4::IDENTITY,
            delta_time: 0.0,
        };
        g.update(&frame, &Matrix4::IDENTITY);
        let record = g.instances()[0];
        assert!(record.wvp.approx_eq(&record.world.multiply(&frame.view_projection), 1e-6));
        assert_eq!(record.world.translation_part(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_billboard_drops_camera_position() {
        let frame = FrameContext {
            camera_world: Matrix4::affine(
                &Vector3::ONE,
                &Vector3::new(0.3, 0.0, 0.0),
                &Vector3::new(5.0, 6.0, 7.0),
            ),
            ..FrameContext::default()
        };
        let billboard = frame.billboard();
        assert_eq!(billboard.translation_part(), Vector3::ZERO);
        assert_eq!(billboard.m[3][3], 1.0);
    }
}
