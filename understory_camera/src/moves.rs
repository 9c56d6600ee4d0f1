// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera moves.
//!
//! Every function here returns a boxed [`Animation`](crate::flow::Animation)
//! that does nothing until its first advance. At that point it reads the
//! camera as it is *then* (current rotation, base zoom, where a node sits) and
//! tweens the pose toward the computed target. Moves can be composed freely
//! with [`all`] and [`chain`](crate::flow::chain).
//!
//! Moves that target a node which is not beneath the camera record a
//! [`Diagnostic`](crate::Diagnostic), log a warning, and finish immediately
//! without touching the pose.

use alloc::boxed::Box;

use kurbo::{Point, Vec2};

use crate::camera::Target;
use crate::easing::TimingFunction;
use crate::error::CameraError;
use crate::fit::{center_target, zoom_target};
use crate::flow::{BoxedAnimation, all, defer, noop};
use crate::path::PathGeometry;
use crate::scene::SceneGraph;
use crate::tween::{Channel, Lerp, Tween};

/// Duration, in seconds, used by moves when the caller has no preference.
pub const DEFAULT_DURATION: f64 = 1.0;

fn tween<'a, S, T>(
    channel: Channel<T>,
    target: T,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S>
where
    S: SceneGraph + 'a,
    T: Lerp + 'a,
{
    Box::new(Tween::new(channel, target, duration, timing))
}

/// Returns to the home pose: base zoom, no translation, no rotation.
///
/// All three channels finish together.
pub fn reset<'a, S: SceneGraph + 'a>(duration: f64, timing: TimingFunction) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        let home = stage.camera.base_zoom();
        Ok(all([
            tween(Channel::SCALE, home, duration, timing),
            tween(Channel::TRANSLATION, Vec2::ZERO, duration, timing),
            tween(Channel::ROTATION, 0.0, duration, timing),
        ]))
    })
}

/// Zooms to `factor` times the base zoom. `1` is the base level; larger
/// values magnify.
///
/// Fails with [`CameraError::InvalidZoom`] for negative or non-finite factors.
pub fn zoom<'a, S: SceneGraph + 'a>(
    factor: f64,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        if !factor.is_finite() || factor < 0.0 {
            return Err(CameraError::InvalidZoom(factor));
        }
        let target = stage.camera.base_zoom() * factor;
        Ok(tween(Channel::SCALE, target, duration, timing))
    })
}

/// Returns to the base zoom, leaving translation and rotation alone.
pub fn reset_zoom<'a, S: SceneGraph + 'a>(
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        let home = stage.camera.base_zoom();
        Ok(tween(Channel::SCALE, home, duration, timing))
    })
}

/// Rotates by `degrees` relative to the rotation at the time the move starts.
pub fn rotate<'a, S: SceneGraph + 'a>(
    degrees: f64,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        let target = stage.camera.pose().rotation() + degrees;
        Ok(tween(Channel::ROTATION, target, duration, timing))
    })
}

/// Returns to zero rotation.
pub fn reset_rotation<'a, S: SceneGraph + 'a>(
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    tween(Channel::ROTATION, 0.0, duration, timing)
}

/// Moves the view by `offset`, in camera-local units.
///
/// The offset describes where the view should go. The translation moves the
/// opposite way, so shifting right makes the scene appear to slide left.
pub fn shift<'a, S: SceneGraph + 'a>(
    offset: Vec2,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        let target = stage.camera.pose().translation() - offset;
        Ok(tween(Channel::TRANSLATION, target, duration, timing))
    })
}

/// Zooms until `target` (plus `buffer` on every side) fills the viewport,
/// and brings its anchor to the middle of the view.
///
/// Nodes are anchored at their origin, [`Target::Area`] at the rectangle's
/// origin and [`Target::Centered`] at the rectangle's center.
///
/// Scale and translation animate together. Fails with
/// [`CameraError::DegenerateArea`] if the target has no extent.
pub fn zoom_onto<'a, S: SceneGraph + 'a>(
    target: Target<S::Node>,
    duration: f64,
    buffer: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        let area = match stage.camera.resolve_area(stage.scene, &target) {
            Ok(area) => area,
            Err(err) => {
                stage.camera.report("zoom_onto", err);
                return Ok(noop());
            }
        };
        let scale = zoom_target(stage.camera.viewport(), area.size, buffer)?;
        Ok(all([
            tween(Channel::SCALE, scale, duration, timing),
            tween(Channel::TRANSLATION, center_target(area.center), duration, timing),
        ]))
    })
}

/// Brings the anchor of `target` to the middle of the view without changing
/// the zoom.
pub fn center_on<'a, S: SceneGraph + 'a>(
    target: Target<S::Node>,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S> {
    defer(move |stage| {
        match stage.camera.resolve_area(stage.scene, &target) {
            Ok(area) => Ok(tween(
                Channel::TRANSLATION,
                center_target(area.center),
                duration,
                timing,
            )),
            Err(err) => {
                stage.camera.report("center_on", err);
                Ok(noop())
            }
        }
    })
}

/// Pans along `path`, which is expressed in the local space of `path_node`.
///
/// The mapping from path space into camera space is taken when the move
/// starts. Every frame samples the path at the eased progress and maps that
/// point, so the camera traces the path's curve rather than cutting straight
/// to its end.
pub fn follow_path<'a, S, P>(
    path_node: S::Node,
    path: P,
    duration: f64,
    timing: TimingFunction,
) -> BoxedAnimation<'a, S>
where
    S: SceneGraph + 'a,
    P: PathGeometry + 'a,
{
    defer(move |stage| {
        let to_camera = match stage.camera.node_to_local(stage.scene, path_node) {
            Ok(transform) => transform,
            Err(err) => {
                stage.camera.report("follow_path", err);
                return Ok(noop());
            }
        };
        let project = move |point: Point| center_target(to_camera * point);
        let destination = project(path.last_point());
        let follow = Tween::new(Channel::TRANSLATION, destination, duration, timing)
            .with_interpolator(move |_, _, t| project(path.point_at_fraction(t)));
        Ok(Box::new(follow) as BoxedAnimation<'a, S>)
    })
}
