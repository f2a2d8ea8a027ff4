//! Emission styles and the random profiles they produce.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Particle;
use crate::math::consts::PI;
use crate::math::{Transform, Vector3, Vector4};

/// How a burst of particles is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmitStyle {
    /// Scatter around the origin with random drift and color.
    #[default]
    Ring,
    /// Fast streak along the X axis.
    Slash,
    /// Stationary burst of thin stretched quads with random roll.
    HitEffect,
}

/// Initial state for one spawned particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionProfile {
    /// Offset from the emit position.
    pub offset: Vector3,
    /// Scale.
    pub scale: Vector3,
    /// Euler rotation in radians.
    pub rotate: Vector3,
    /// Initial velocity.
    pub velocity: Vector3,
    /// Base color.
    pub color: Vector4,
    /// Lifetime in seconds.
    pub life_time: f32,
}

impl EmitStyle {
    /// Lifetime bounds in seconds, inclusive.
    pub const fn lifetime_range(&self) -> (f32, f32) {
        match self {
            EmitStyle::Ring => (1.0, 3.0),
            EmitStyle::Slash => (0.3, 0.6),
            EmitStyle::HitEffect => (1.0, 1.0),
        }
    }

    /// Draw one profile from `rng`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> EmissionProfile {
        let (life_min, life_max) = self.lifetime_range();
        match self {
            EmitStyle::Ring => EmissionProfile {
                offset: random_unit_box(rng),
                scale: Vector3::ONE,
                rotate: Vector3::ZERO,
                velocity: random_unit_box(rng),
                color: Vector4::new(
                    rng.random_range(0.0..=1.0),
                    rng.random_range(0.0..=1.0),
                    rng.random_range(0.0..=1.0),
                    1.0,
                ),
                life_time: rng.random_range(life_min..=life_max),
            },
            EmitStyle::Slash => {
                let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                EmissionProfile {
                    offset: Vector3::new(0.0, rng.random_range(-0.1..=0.1), 0.0),
                    scale: Vector3::new(rng.random_range(0.5..=1.5), 0.1, 1.0),
                    rotate: Vector3::ZERO,
                    velocity: Vector3::new(
                        direction * rng.random_range(2.0..=4.0),
                        rng.random_range(-0.2..=0.2),
                        0.0,
                    ),
                    color: Vector4::new(1.0, 1.0, rng.random_range(0.8..=1.0), 1.0),
                    life_time: rng.random_range(life_min..=life_max),
                }
            }
            EmitStyle::HitEffect => EmissionProfile {
                offset: Vector3::ZERO,
                scale: Vector3::new(0.05, rng.random_range(1.0..=3.0), 1.0),
                rotate: Vector3::new(0.0, 0.0, rng.random_range(-PI..=PI)),
                velocity: Vector3::ZERO,
                color: Vector4::ONE,
                life_time: life_min,
            },
        }
    }
}

impl EmissionProfile {
    /// Particle spawned at `origin` with this profile.
    pub fn spawn(&self, origin: Vector3) -> Particle {
        Particle {
            transform: Transform::new(self.scale, self.rotate, origin + self.offset),
            velocity: self.velocity,
            color: self.color,
            life_time: self.life_time,
            current_time: 0.0,
        }
    }
}

fn random_unit_box<R: Rng>(rng: &mut R) -> Vector3 {
    Vector3::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profiles_respect_lifetime_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for style in [EmitStyle::Ring, EmitStyle::Slash, EmitStyle::HitEffect] {
            let (lo, hi) = style.lifetime_range();
            for _ in 0..64 {
                let profile = style.sample(&mut rng);
                assert!(profile.life_time >= lo && profile.life_time <= hi);
            }
        }
    }

    #[test]
    fn test_same_seed_same_profiles() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(EmitStyle::Ring.sample(&mut a), EmitStyle::Ring.sample(&mut b));
        }
    }

    #[test]
    fn test_hit_effect_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = EmitStyle::HitEffect.sample(&mut rng);
        assert_eq!(profile.velocity, Vector3::ZERO);
        assert_eq!(profile.scale.x, 0.05);
        assert!(profile.scale.y >= 1.0 && profile.scale.y <= 3.0);
        assert!(profile.rotate.z.abs() <= PI);
    }

    #[test]
    fn test_slash_moves_along_x() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let v = EmitStyle::Slash.sample(&mut rng).velocity;
            assert!(v.x.abs() >= 2.0);
            assert!(v.y.abs() <= 0.2);
        }
    }

    #[test]
    fn test_spawn_offsets_from_origin() {
        let mut rng = StdRng::seed_from_u64(5);
        let profile = EmitStyle::Ring.sample(&mut rng);
        let p = profile.spawn(Vector3::new(10.0, 0.0, 0.0));
        assert!(p.transform.translate.approx_eq(&(Vector3::new(10.0, 0.0, 0.0) + profile.offset), 1e-6));
        assert_eq!(p.current_time, 0.0);
    }
}
