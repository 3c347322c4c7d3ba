//! Timing curves for transition animations.
//!
//! A curve maps the linear fraction of elapsed animation time to the
//! fraction of distance travelled. Interactive transitions are scrubbed
//! through the same curve, so a linear curve keeps the views exactly under
//! the finger.

use serde::{Deserialize, Serialize};

/// Timing curve applied to a transition animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic: starts slow, accelerates.
    EaseIn,
    /// Quadratic: starts fast, decelerates.
    EaseOut,
    /// Quadratic: slow at both ends.
    EaseInOut,
    /// Cubic deceleration, closer to a native page settle.
    EaseOutCubic,
    /// Cubic: slow at both ends, steeper in the middle.
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve to a progress value.
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    ///
    /// ```
    /// use swipetab::animation::Easing;
    ///
    /// assert_eq!(Easing::Linear.apply(0.25), 0.25);
    /// assert!(Easing::EaseIn.apply(0.5) < 0.5);
    /// assert!(Easing::EaseOut.apply(0.5) > 0.5);
    /// ```
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Interpolate between `start` and `end` along this curve.
    #[inline]
    pub fn lerp(self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.apply(t)
    }
}
