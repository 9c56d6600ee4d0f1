// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use kurbo::Vec2;

/// Maps linear progress in `[0, 1]` onto eased progress.
///
/// All built-in curves satisfy `f(0) == 0` and `f(1) == 1`; some (such as
/// [`TimingFunction::EaseOutBack`]) overshoot in between.
#[derive(Clone, Copy, Debug, Default)]
pub enum TimingFunction {
    /// Constant speed.
    Linear,
    /// Cubic acceleration from rest.
    EaseInCubic,
    /// Cubic deceleration to rest.
    EaseOutCubic,
    /// Cubic acceleration, then deceleration. The default for every camera move.
    #[default]
    EaseInOutCubic,
    /// Sinusoidal acceleration, then deceleration.
    EaseInOutSine,
    /// Decelerates past the target and settles back onto it.
    EaseOutBack,
    /// A caller-supplied curve.
    Custom(fn(f64) -> f64),
}

impl TimingFunction {
    /// Evaluates the curve at `t`, clamping `t` into `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            // kurbo carries trig for both `std` and `libm` builds.
            Self::EaseInOutSine => -(Vec2::from_angle(PI * t).x - 1.0) / 2.0,
            Self::EaseOutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
            Self::Custom(f) => f(t),
        }
    }
}
