//! Animation player - a playback clock over a shared clip.

use std::sync::Arc;

use super::{Animation, Pose};

/// Loop mode for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play once and hold the last frame.
    Once,
    /// Wrap back to the start.
    #[default]
    Loop,
}

/// Plays an [`Animation`] shared between model instances.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    animation: Arc<Animation>,
    /// Current playback time in seconds.
    time: f32,
    /// Playback speed multiplier.
    pub time_scale: f32,
    /// Loop mode.
    pub loop_mode: LoopMode,
    paused: bool,
}

impl AnimationPlayer {
    /// Create a looping player at time zero.
    pub fn new(animation: Arc<Animation>) -> Self {
        Self {
            animation,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
        }
    }

    /// Set loop mode.
    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// The clip being played.
    #[inline]
    pub fn animation(&self) -> &Arc<Animation> {
        &self.animation
    }

    /// Current playback time.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Jump to a time, wrapped or clamped like [`AnimationPlayer::advance`].
    pub fn seek(&mut self, time: f32) {
        self.time = self.wrap(time);
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume playback.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether playback is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a non-looping player reached the end.
    pub fn is_finished(&self) -> bool {
        self.loop_mode == LoopMode::Once && self.time >= self.animation.duration
    }

    /// Advance the clock by `delta_time` seconds.
    pub fn advance(&mut self, delta_time: f32) {
        if self.paused {
            return;
        }
        self.time = self.wrap(self.time + delta_time * self.time_scale);
    }

    /// Sampled pose of `node` at the current time.
    pub fn pose(&self, node: &str) -> Option<Pose> {
        self.animation.sample(node, self.time)
    }

    fn wrap(&self, time: f32) -> f32 {
        let duration = self.animation.duration;
        if duration <= 0.0 {
            return 0.0;
        }
        match self.loop_mode {
            LoopMode::Loop => time.rem_euclid(duration),
            LoopMode::Once => time.clamp(0.0, duration),
        }
    }
}
