//! Keyframes and the curves that hold them.

use serde::{Deserialize, Serialize};

use super::interpolant::Interpolate;

/// A keyframe with time and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Time in seconds.
    pub time: f32,
    /// Value at this keyframe.
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe.
    pub const fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Keyframes ordered by ascending time.
///
/// Ordering is the caller's responsibility; nothing here sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationCurve<T> {
    /// The keyframes.
    pub keyframes: Vec<Keyframe<T>>,
}

impl<T> Default for AnimationCurve<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }
}

impl<T> AnimationCurve<T> {
    /// Create a curve from already-ordered keyframes.
    pub fn new(keyframes: Vec<Keyframe<T>>) -> Self {
        Self { keyframes }
    }

    /// Pair up parallel time and value lists.
    pub fn from_arrays(times: &[f32], values: &[T]) -> Self
    where
        T: Copy,
    {
        let keyframes = times
            .iter()
            .zip(values.iter())
            .map(|(&t, &v)| Keyframe::new(t, v))
            .collect();
        Self { keyframes }
    }

    /// Append a keyframe at the end.
    pub fn push(&mut self, time: f32, value: T) {
        self.keyframes.push(Keyframe::new(time, value));
    }

    /// Number of keyframes.
    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the curve has no keyframes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

impl<T: Interpolate> AnimationCurve<T> {
    /// Sample the curve at `time`. See [`calculate_value`].
    #[inline]
    pub fn sample(&self, time: f32) -> T {
        calculate_value(&self.keyframes, time)
    }
}

/// Evaluate ordered keyframes at `time`.
///
/// Before the first key (or with a single key) the first value is returned,
/// past the last key the last value. In between, the first bracketing pair
/// `k.time <= time <= next.time` is interpolated. There is no extrapolation
/// and no looping; wrap `time` before calling for a looping clip.
pub fn calculate_value<T: Interpolate>(keyframes: &[Keyframe<T>], time: f32) -> T {
    let Some(first) = keyframes.first() else {
        return T::missing();
    };
    if keyframes.len() == 1 || time <= first.time {
        return first.value;
    }

    for pair in keyframes.windows(2) {
        let (k0, k1) = (&pair[0], &pair[1]);
        if k0.time <= time && time <= k1.time {
            let t = (time - k0.time) / (k1.time - k0.time);
            return k0.value.interpolate(&k1.value, t);
        }
    }

    keyframes[keyframes.len() - 1].value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, Vector3};

    fn linear_x() -> AnimationCurve<Vector3> {
        AnimationCurve::new(vec![
            Keyframe::new(0.0, Vector3::ZERO),
            Keyframe::new(1.0, Vector3::new(10.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn test_midpoint() {
        let v = linear_x().sample(0.5);
        assert!(v.approx_eq(&Vector3::new(5.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_clamps_to_ends() {
        let curve = linear_x();
        assert_eq!(curve.sample(-3.0), Vector3::ZERO);
        assert_eq!(curve.sample(0.0), Vector3::ZERO);
        assert_eq!(curve.sample(1.0), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(curve.sample(42.0), Vector3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = AnimationCurve::new(vec![Keyframe::new(2.0, Vector3::ONE)]);
        assert_eq!(curve.sample(0.0), Vector3::ONE);
        assert_eq!(curve.sample(5.0), Vector3::ONE);
    }

    #[test]
    fn test_sampling_is_repeatable() {
        let curve = AnimationCurve::from_arrays(
            &[0.0, 0.3, 1.7],
            &[Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.0, 0.5, 9.0)],
        );
        for t in [0.1, 0.3, 0.9, 1.2] {
            assert_eq!(curve.sample(t), curve.sample(t));
        }
    }

    #[test]
    fn test_picks_correct_segment() {
        let curve = AnimationCurve::from_arrays(
            &[0.0, 1.0, 3.0],
            &[Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 4.0, 0.0)],
        );
        assert!(curve.sample(2.0).approx_eq(&Vector3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_empty_rotation_curve_is_zero_quaternion() {
        let curve: AnimationCurve<Quaternion> = AnimationCurve::default();
        assert_eq!(curve.sample(0.5), Quaternion::ZERO);
    }

    #[test]
    fn test_rotation_uses_lerp() {
        let end = Quaternion::from_axis_angle(&Vector3::UNIT_Y, std::f32::consts::PI);
        let curve = AnimationCurve::from_arrays(&[0.0, 1.0], &[Quaternion::IDENTITY, end]);
        let mid = curve.sample(0.5);
        assert!(mid.approx_eq(&Quaternion::IDENTITY.lerp(&end, 0.5), 1e-6));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_empty_vector_curve_is_zero_in_release() {
        let curve: AnimationCurve<Vector3> = AnimationCurve::default();
        assert_eq!(curve.sample(0.0), Vector3::ZERO);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no keyframes")]
    fn test_empty_vector_curve_panics_in_debug() {
        let curve: AnimationCurve<Vector3> = AnimationCurve::default();
        curve.sample(0.0);
    }
}
