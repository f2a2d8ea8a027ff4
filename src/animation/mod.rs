//! Animation system for keyframe-based node animation.
//!
//! Translation and scale curves interpolate linearly; rotation curves use a
//! component-wise quaternion lerp. Sampling never loops on its own: wrap the
//! query time (or use [`AnimationPlayer`]) for cyclic clips.

mod animation_action;
mod animation_clip;
mod interpolant;
mod keyframe_track;

pub use animation_action::*;
pub use animation_clip::*;
pub use interpolant::Interpolate;
pub use keyframe_track::*;
