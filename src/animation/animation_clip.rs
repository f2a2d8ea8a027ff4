//! Node animations and the clips that hold them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AnimationCurve;
use crate::math::{Matrix4, Quaternion, Vector3};

/// Translate, rotate and scale curves for one animated node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAnimation {
    /// Translation curve.
    pub translate: AnimationCurve<Vector3>,
    /// Rotation curve.
    pub rotate: AnimationCurve<Quaternion>,
    /// Scale curve.
    pub scale: AnimationCurve<Vector3>,
}

impl NodeAnimation {
    /// Sample all three curves at `time`.
    ///
    /// Empty translate or scale curves are a precondition violation.
    pub fn sample(&self, time: f32) -> Pose {
        Pose {
            translate: self.translate.sample(time),
            rotate: self.rotate.sample(time),
            scale: self.scale.sample(time),
        }
    }
}

/// Sampled local transform of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation.
    pub translate: Vector3,
    /// Rotation.
    pub rotate: Quaternion,
    /// Scale.
    pub scale: Vector3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translate: Vector3::ZERO,
            rotate: Quaternion::IDENTITY,
            scale: Vector3::ONE,
        }
    }
}

impl Pose {
    /// Local matrix: scale, then rotation, then translation.
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::affine_with_rotation(
            &self.scale,
            &Matrix4::from_quaternion(&self.rotate),
            &self.translate,
        )
    }
}

/// A clip of named node animations. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Length in seconds.
    pub duration: f32,
    /// Curves keyed by node name.
    pub node_animations: BTreeMap<String, NodeAnimation>,
}

impl Animation {
    /// Create an empty clip.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            node_animations: BTreeMap::new(),
        }
    }

    /// Add or replace the curves of one node.
    pub fn insert_node(&mut self, name: impl Into<String>, node: NodeAnimation) {
        self.node_animations.insert(name.into(), node);
    }

    /// Curves for a node.
    #[inline]
    pub fn node(&self, name: &str) -> Option<&NodeAnimation> {
        self.node_animations.get(name)
    }

    /// Pose of `node` at `time`, or `None` if the clip does not animate it.
    pub fn sample(&self, node: &str, time: f32) -> Option<Pose> {
        self.node(node).map(|n| n.sample(time))
    }

    /// Pose of every animated node at `time`.
    pub fn sample_all(&self, time: f32) -> BTreeMap<&str, Pose> {
        self.node_animations
            .iter()
            .map(|(name, n)| (name.as_str(), n.sample(time)))
            .collect()
    }
}

/// Free-function form of [`Animation::sample`].
#[inline]
pub fn sample_node(animation: &Animation, node: &str, time: f32) -> Option<Pose> {
    animation.sample(node, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Keyframe;

    fn walk_clip() -> Animation {
        let mut clip = Animation::new(2.0);
        clip.insert_node(
            "root",
            NodeAnimation {
                translate: AnimationCurve::from_arrays(
                    &[0.0, 2.0],
                    &[Vector3::ZERO, Vector3::new(0.0, 0.0, 4.0)],
                ),
                rotate: AnimationCurve::new(vec![Keyframe::new(0.0, Quaternion::IDENTITY)]),
                scale: AnimationCurve::new(vec![Keyframe::new(0.0, Vector3::ONE)]),
            },
        );
        clip
    }

    #[test]
    fn test_sample_known_node() {
        let pose = walk_clip().sample("root", 1.0).unwrap();
        assert!(pose.translate.approx_eq(&Vector3::new(0.0, 0.0, 2.0), 1e-6));
        assert_eq!(pose.rotate, Quaternion::IDENTITY);
        assert_eq!(pose.scale, Vector3::ONE);
    }

    #[test]
    fn test_sample_unknown_node_is_none() {
        assert!(walk_clip().sample("missing", 1.0).is_none());
        assert!(sample_node(&walk_clip(), "missing", 0.0).is_none());
    }

    #[test]
    fn test_sample_all() {
        let clip = walk_clip();
        let poses = clip.sample_all(2.0);
        assert_eq!(poses.len(), 1);
        assert!(poses["root"].translate.approx_eq(&Vector3::new(0.0, 0.0, 4.0), 1e-6));
    }

    #[test]
    fn test_pose_to_matrix() {
        let pose = Pose {
            translate: Vector3::new(1.0, 2.0, 3.0),
            rotate: Quaternion::from_axis_angle(&Vector3::UNIT_Z, std::f32::consts::FRAC_PI_2),
            scale: Vector3::splat(2.0),
        };
        let m = pose.to_matrix();
        let p = Vector3::UNIT_X.transform(&m);
        assert!(p.approx_eq(&Vector3::new(1.0, 4.0, 3.0), 1e-5));
        assert!(Pose::default().to_matrix().approx_eq(&Matrix4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_clip_deserializes() {
        let json = r#"{
            "duration": 1.0,
            "node_animations": {
                "arm": {
                    "translate": [{"time": 0.0, "value": {"x": 0.0, "y": 0.0, "z": 0.0}}],
                    "rotate": [],
                    "scale": [{"time": 0.0, "value": {"x": 1.0, "y": 1.0, "z": 1.0}}]
                }
            }
        }"#;
        let clip: Animation = serde_json::from_str(json).unwrap();
        let pose = clip.sample("arm", 0.3).unwrap();
        assert_eq!(pose.rotate, Quaternion::ZERO);
    }
}
