//! Main ParticleSystem struct owning every particle group.

use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{AccelerationField, EmitStyle, FrameContext, Particle, ParticleForGpu, ParticleGroup};
use crate::camera::CameraProvider;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::geometry::ParticleShape;
use crate::math::{Matrix4, Vector3};
use crate::resources::{BufferAllocator, GpuBuffer, TextureHandle, TextureResolver};

/// CPU particle simulation producing per-instance records for the renderer.
///
/// Single-threaded and tick-driven: call [`ParticleSystem::update`] once per
/// frame, then read [`ParticleSystem::instance_buffer`] before the next tick.
/// Operations on an unknown group name do nothing.
pub struct ParticleSystem {
    /// Simulation settings.
    config: SimulationConfig,
    /// Groups keyed by name.
    groups: HashMap<String, ParticleGroup>,
    /// Shared random source for emission.
    rng: StdRng,
    /// Matrix source for each tick.
    camera: Option<Box<dyn CameraProvider>>,
    /// Inputs of the last tick.
    frame: FrameContext,
    /// Whether the missing-camera warning was logged.
    warned_no_camera: bool,
}

impl ParticleSystem {
    /// Create a system, seeding from `config.seed` or OS entropy.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::with_rng(config, rng))
    }

    /// Create a system with a fixed seed, overriding `config.seed`.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        Self {
            config,
            groups: HashMap::new(),
            rng,
            camera: None,
            frame: FrameContext::default(),
            warned_no_camera: false,
        }
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Toggle camera-facing particles.
    pub fn set_use_billboard(&mut self, enabled: bool) {
        self.config.use_billboard = enabled;
    }

    /// Set the camera read on every [`ParticleSystem::update`].
    pub fn set_camera(&mut self, camera: impl CameraProvider + 'static) {
        self.camera = Some(Box::new(camera));
        self.warned_no_camera = false;
    }

    /// Remove the camera.
    pub fn clear_camera(&mut self) {
        self.camera = None;
    }

    /// Inputs of the last tick.
    #[inline]
    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }

    /// Create a group. Returns `false` and leaves the existing group
    /// untouched if the name is taken.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        texture: TextureHandle,
        shape: ParticleShape,
    ) -> bool {
        let name = name.into();
        if self.groups.contains_key(&name) {
            debug!("Particle group {} already exists", name);
            return false;
        }
        let mut group = ParticleGroup::new(name.clone(), texture, shape, self.config.max_instances);
        group.set_field_enabled(self.config.default_field_enabled);
        debug!("Created particle group {} (texture {}, {:?})", name, texture, shape);
        self.groups.insert(name, group);
        true
    }

    /// Create a group, resolving its texture path only if the name is new.
    pub fn create_group_with_texture(
        &mut self,
        name: impl Into<String>,
        texture_path: &str,
        shape: ParticleShape,
        textures: &mut dyn TextureResolver,
    ) -> bool {
        let name = name.into();
        if self.groups.contains_key(&name) {
            debug!("Particle group {} already exists", name);
            return false;
        }
        let texture = textures.resolve(texture_path);
        self.create_group(name, texture, shape)
    }

    /// Get a group by name.
    #[inline]
    pub fn group(&self, name: &str) -> Option<&ParticleGroup> {
        self.groups.get(name)
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut ParticleGroup> {
        let group = self.groups.get_mut(name);
        if group.is_none() {
            debug!("Unknown particle group {}", name);
        }
        group
    }

    /// Group names, sorted.
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Spawn `count` particles at `position`.
    pub fn emit(&mut self, name: &str, position: Vector3, count: u32, style: EmitStyle) {
        let Some(group) = self.groups.get_mut(name) else {
            debug!("Emit into unknown particle group {}", name);
            return;
        };
        for _ in 0..count {
            group.push(style.sample(&mut self.rng).spawn(position));
        }
    }

    /// Insert a fully specified particle.
    pub fn add_particle(&mut self, name: &str, particle: Particle) {
        if let Some(group) = self.group_mut(name) {
            group.push(particle);
        }
    }

    /// Replace a group's acceleration field.
    pub fn set_field(&mut self, name: &str, field: AccelerationField) {
        if let Some(group) = self.group_mut(name) {
            group.set_field(field);
        }
    }

    /// Enable or disable a group's acceleration field.
    pub fn set_field_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(group) = self.group_mut(name) {
            group.set_field_enabled(enabled);
        }
    }

    /// Live particles in a group, 0 for an unknown name.
    pub fn particle_count(&self, name: &str) -> usize {
        self.groups.get(name).map_or(0, |g| g.particles().len())
    }

    /// Remove every particle of a group.
    pub fn clear(&mut self, name: &str) {
        if let Some(group) = self.group_mut(name) {
            group.clear();
        }
    }

    /// Advance every group using the injected camera.
    ///
    /// Without a camera the tick uses identity matrices.
    pub fn update(&mut self, delta_time: f32) {
        let frame = match &self.camera {
            Some(camera) => FrameContext {
                view_projection: camera.view_projection(),
                camera_world: camera.world_matrix(),
                delta_time,
            },
            None => {
                if !self.warned_no_camera {
                    warn!("ParticleSystem updated without a camera; using identity matrices");
                    self.warned_no_camera = true;
                }
                FrameContext::with_delta_time(delta_time)
            }
        };
        self.update_with(&frame);
    }

    /// Advance every group with explicit frame inputs.
    pub fn update_with(&mut self, frame: &FrameContext) {
        self.frame = *frame;
        let billboard = if self.config.use_billboard {
            frame.billboard()
        } else {
            Matrix4::IDENTITY
        };
        for group in self.groups.values_mut() {
            group.update(frame, &billboard);
        }
    }

    /// Instance records of the last tick and how many there are.
    pub fn instance_buffer(&self, name: &str) -> Option<(&[ParticleForGpu], u32)> {
        self.groups
            .get(name)
            .map(|g| (g.instances(), g.instance_count()))
    }

    /// Allocate a buffer large enough for one group's capped output.
    pub fn allocate_instance_buffer<A: BufferAllocator>(&self, allocator: &mut A) -> Result<A::Buffer> {
        allocator.allocate(self.config.max_instances as usize * ParticleForGpu::SIZE)
    }

    /// Copy a group's instance records into `buffer`. Returns how many
    /// whole records were written.
    pub fn upload(&self, name: &str, buffer: &mut impl GpuBuffer) -> usize {
        let Some(group) = self.groups.get(name) else {
            debug!("Upload from unknown particle group {}", name);
            return 0;
        };
        let fit = (buffer.size() / ParticleForGpu::SIZE).min(group.instances().len());
        let bytes: &[u8] = bytemuck::cast_slice(&group.instances()[..fit]);
        buffer.as_bytes_mut()[..bytes.len()].copy_from_slice(bytes);
        fit
    }
}
