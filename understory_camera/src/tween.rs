// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::Vec2;

use crate::easing::TimingFunction;
use crate::error::CameraError;
use crate::flow::{Animation, Progress, Stage};
use crate::pose::Pose;
use crate::scene::SceneGraph;

/// Values a [`Tween`] can blend between.
pub trait Lerp: Copy {
    /// Blends from `self` (at `t = 0`) to `other` (at `t = 1`).
    #[must_use]
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, other: Self, t: f64) -> Self {
        Self::lerp(self, other, t)
    }
}

/// One animatable component of a [`Pose`].
#[derive(Clone, Copy)]
pub struct Channel<T> {
    name: &'static str,
    get: fn(&Pose) -> T,
    set: fn(&mut Pose, T),
}

impl<T> Channel<T> {
    /// Name of the channel, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Channel").field(&self.name).finish()
    }
}

impl Channel<Vec2> {
    /// [`Pose::translation`].
    pub const TRANSLATION: Self = Self {
        name: "translation",
        get: Pose::translation,
        set: Pose::set_translation,
    };
    /// [`Pose::scale`].
    pub const SCALE: Self = Self {
        name: "scale",
        get: Pose::scale,
        set: Pose::set_scale,
    };
}

impl Channel<f64> {
    /// [`Pose::rotation`].
    pub const ROTATION: Self = Self {
        name: "rotation",
        get: Pose::rotation,
        set: Pose::set_rotation,
    };
}

type Interpolator<'a, T> = Box<dyn FnMut(T, T, f64) -> T + 'a>;

/// Drives one pose channel from its current value to a target.
///
/// The start value is captured on the first advance, not at construction.
/// Progress is shaped by the [`TimingFunction`] and, by default, blended
/// linearly. A custom interpolator receives `(from, to, eased_t)` instead and
/// can follow any curve; it is evaluated at `t = 1` on the final frame. Without
/// one, the final frame sets the target exactly.
pub struct Tween<'a, T> {
    channel: Channel<T>,
    target: T,
    duration: f64,
    timing: TimingFunction,
    from: Option<T>,
    elapsed: f64,
    interpolate: Option<Interpolator<'a, T>>,
}

impl<'a, T: Lerp> Tween<'a, T> {
    /// Tweens `channel` to `target` over `duration` seconds.
    ///
    /// Negative durations are treated as zero, which applies the target on the
    /// first advance.
    pub fn new(channel: Channel<T>, target: T, duration: f64, timing: TimingFunction) -> Self {
        Self {
            channel,
            target,
            duration: duration.max(0.0),
            timing,
            from: None,
            elapsed: 0.0,
            interpolate: None,
        }
    }

    /// Replaces linear blending with `interpolate(from, to, eased_t)`.
    #[must_use]
    pub fn with_interpolator(mut self, interpolate: impl FnMut(T, T, f64) -> T + 'a) -> Self {
        self.interpolate = Some(Box::new(interpolate));
        self
    }

    fn value_at(&mut self, from: T, t: f64) -> T {
        match &mut self.interpolate {
            Some(interpolate) => interpolate(from, self.target, t),
            None => from.lerp(self.target, t),
        }
    }
}

impl<T: Lerp, S: SceneGraph> Animation<S> for Tween<'_, T> {
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        let get = self.channel.get;
        let pose = stage.camera.pose_mut();
        let from = *self.from.get_or_insert_with(|| get(pose));
        self.elapsed += dt;

        if self.elapsed >= self.duration {
            let value = if self.interpolate.is_some() {
                let t = self.timing.apply(1.0);
                self.value_at(from, t)
            } else {
                self.target
            };
            (self.channel.set)(stage.camera.pose_mut(), value);
            log::trace!("{} tween finished", self.channel.name);
            return Ok(Progress::Finished {
                leftover: (self.elapsed - self.duration).min(dt),
            });
        }

        let t = self.timing.apply(self.elapsed / self.duration);
        let value = self.value_at(from, t);
        (self.channel.set)(stage.camera.pose_mut(), value);
        Ok(Progress::Running)
    }
}

impl<T: fmt::Debug> fmt::Debug for Tween<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("channel", &self.channel)
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("timing", &self.timing)
            .field("elapsed", &self.elapsed)
            .field("custom", &self.interpolate.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{Channel, Tween};
    use crate::camera::{Camera, CameraConfig};
    use crate::easing::TimingFunction;
    use crate::flow::{Animation, Progress, Stage};
    use crate::scene::{LocalNode, SceneTree};

    fn fixture() -> (SceneTree, Camera<crate::NodeId>) {
        let mut tree = SceneTree::new();
        let node = tree.insert(None, LocalNode::default());
        let camera = Camera::new(CameraConfig::new(node, Size::new(100.0, 100.0))).unwrap();
        (tree, camera)
    }

    #[test]
    fn linear_tween_hits_midpoint_and_target() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut tween = Tween::new(Channel::ROTATION, 90.0, 1.0, TimingFunction::Linear);
        let progress = Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.5).unwrap();
        assert_eq!(progress, Progress::Running);
        assert!((stage.camera.pose().rotation() - 45.0).abs() < 1e-9);
        let progress = Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.75).unwrap();
        assert_eq!(progress, Progress::Finished { leftover: 0.25 });
        assert_eq!(stage.camera.pose().rotation(), 90.0);
    }

    #[test]
    fn start_value_is_read_on_first_advance() {
        let (tree, mut camera) = fixture();
        let mut tween = Tween::new(Channel::TRANSLATION, Vec2::new(10.0, 0.0), 1.0, TimingFunction::Linear);
        camera.pose_mut().set_translation(Vec2::new(-10.0, 0.0));
        let mut stage = Stage::new(&mut camera, &tree);
        Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.5).unwrap();
        assert!(stage.camera.pose().translation().hypot() < 1e-9);
    }

    #[test]
    fn zero_duration_applies_target_immediately() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut tween = Tween::new(Channel::SCALE, Vec2::new(3.0, 3.0), -1.0, TimingFunction::default());
        let progress = Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.1).unwrap();
        assert_eq!(progress, Progress::Finished { leftover: 0.1 });
        assert_eq!(stage.camera.pose().scale(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn custom_interpolator_replaces_blend() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut tween = Tween::new(Channel::ROTATION, 10.0, 1.0, TimingFunction::Linear)
            .with_interpolator(|_, _, t| 100.0 * t);
        Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.25).unwrap();
        assert!((stage.camera.pose().rotation() - 25.0).abs() < 1e-9);
        Animation::<SceneTree>::advance(&mut tween, &mut stage, 1.0).unwrap();
        assert!((stage.camera.pose().rotation() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn custom_interpolator_sees_eased_progress_on_the_last_frame() {
        fn half(t: f64) -> f64 {
            0.5 * t
        }
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut tween = Tween::new(Channel::ROTATION, 10.0, 1.0, TimingFunction::Custom(half))
            .with_interpolator(|_, _, t| 100.0 * t);
        Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.5).unwrap();
        assert!((stage.camera.pose().rotation() - 25.0).abs() < 1e-9);
        let progress = Animation::<SceneTree>::advance(&mut tween, &mut stage, 0.5).unwrap();
        assert_eq!(progress, Progress::Finished { leftover: 0.0 });
        assert!((stage.camera.pose().rotation() - 50.0).abs() < 1e-9);
    }
}
