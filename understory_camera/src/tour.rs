// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touring a sequence of nodes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::camera::Target;
use crate::cycle::Cycle;
use crate::easing::TimingFunction;
use crate::error::CameraError;
use crate::flow::{Animation, BoxedAnimation, Progress, Stage, all, chain, wait};
use crate::moves;
use crate::scene::SceneGraph;

/// Hook that may wrap or replace the transition to each tour stop.
///
/// It receives the transition the tour is about to run and the node being
/// visited, and returns the animation to run in its place. The returned
/// animation must still run the transition it was given (for example with
/// [`all`] or [`chain`]); dropping it skips the camera move for that stop.
/// The tour waits for the returned animation to finish before pausing and
/// moving on.
pub type BeforeMoveHook<'a, S> = Box<
    dyn FnMut(BoxedAnimation<'a, S>, <S as SceneGraph>::Node) -> BoxedAnimation<'a, S> + 'a,
>;

/// Per-step settings for [`move_between`].
///
/// Each option is a [`Cycle`]: step `i` uses entry `i % len`, so a single
/// value applies to every step and `[a, b]` alternates.
pub struct TravelOptions<'a, S: SceneGraph> {
    /// Seconds spent moving to each stop.
    pub duration: Cycle<f64>,
    /// Whether a stop is zoomed onto (`true`) or centered at base zoom (`false`).
    pub zoom: Cycle<bool>,
    /// Extra space around a zoomed stop, in camera-local units.
    pub buffer: Cycle<f64>,
    /// Seconds to pause at each stop.
    pub wait: Cycle<f64>,
    /// Easing for each transition.
    pub timing: Cycle<TimingFunction>,
    on_before_move: Option<BeforeMoveHook<'a, S>>,
}

impl<S: SceneGraph> Default for TravelOptions<'_, S> {
    fn default() -> Self {
        Self {
            duration: Cycle::once(moves::DEFAULT_DURATION),
            zoom: Cycle::once(false),
            buffer: Cycle::once(0.0),
            wait: Cycle::once(0.25),
            timing: Cycle::once(TimingFunction::EaseInOutCubic),
            on_before_move: None,
        }
    }
}

impl<'a, S: SceneGraph> TravelOptions<'a, S> {
    /// Sets the transition durations.
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<Cycle<f64>>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Sets which stops are zoomed onto.
    #[must_use]
    pub fn with_zoom(mut self, zoom: impl Into<Cycle<bool>>) -> Self {
        self.zoom = zoom.into();
        self
    }

    /// Sets the buffers used by zoomed stops.
    #[must_use]
    pub fn with_buffer(mut self, buffer: impl Into<Cycle<f64>>) -> Self {
        self.buffer = buffer.into();
        self
    }

    /// Sets the pause after each transition.
    #[must_use]
    pub fn with_wait(mut self, wait: impl Into<Cycle<f64>>) -> Self {
        self.wait = wait.into();
        self
    }

    /// Sets the easing of each transition.
    #[must_use]
    pub fn with_timing(mut self, timing: impl Into<Cycle<TimingFunction>>) -> Self {
        self.timing = timing.into();
        self
    }

    /// Installs a [`BeforeMoveHook`].
    #[must_use]
    pub fn on_before_move(
        mut self,
        hook: impl FnMut(BoxedAnimation<'a, S>, S::Node) -> BoxedAnimation<'a, S> + 'a,
    ) -> Self {
        self.on_before_move = Some(Box::new(hook));
        self
    }
}

impl<S: SceneGraph> fmt::Debug for TravelOptions<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravelOptions")
            .field("duration", &self.duration)
            .field("zoom", &self.zoom)
            .field("buffer", &self.buffer)
            .field("wait", &self.wait)
            .field("timing", &self.timing)
            .field("on_before_move", &self.on_before_move.is_some())
            .finish()
    }
}

/// Visits `nodes` in order.
///
/// When the tour starts, nodes that are stale or not beneath the camera are
/// dropped, each with one [`Diagnostic`](crate::Diagnostic). Option indices
/// count over the remaining nodes. Each stop then runs, strictly one after
/// another:
///
/// 1. a transition: [`zoom_onto`](moves::zoom_onto) the node when its `zoom`
///    option is set, otherwise [`reset_zoom`](moves::reset_zoom) and
///    [`center_on`](moves::center_on) together;
/// 2. the transition passed through the [`BeforeMoveHook`], if any;
/// 3. a pause of the stop's `wait` seconds.
///
/// An empty option sequence fails the tour with
/// [`CameraError::EmptySequence`] when the first stop needs it.
pub fn move_between<'a, S: SceneGraph + 'a>(
    nodes: impl IntoIterator<Item = S::Node>,
    options: TravelOptions<'a, S>,
) -> BoxedAnimation<'a, S> {
    Box::new(Tour {
        nodes: nodes.into_iter().collect(),
        options,
        started: false,
        index: 0,
        current: None,
    })
}

struct Tour<'a, S: SceneGraph> {
    nodes: Vec<S::Node>,
    options: TravelOptions<'a, S>,
    started: bool,
    index: usize,
    current: Option<BoxedAnimation<'a, S>>,
}

impl<'a, S: SceneGraph + 'a> Tour<'a, S> {
    fn filter_unreachable(&mut self, stage: &mut Stage<'_, S>) {
        let before = self.nodes.len();
        self.nodes
            .retain(|&node| match stage.camera.descendant_transform(stage.scene, node) {
                Ok(_) => true,
                Err(err) => {
                    stage.camera.report("move_between", err);
                    false
                }
            });
        log::debug!(
            "camera tour: {} stops, {} skipped",
            self.nodes.len(),
            before - self.nodes.len()
        );
    }

    fn step(&mut self, index: usize, node: S::Node) -> Result<BoxedAnimation<'a, S>, CameraError> {
        let options = &mut self.options;
        let duration = options.duration.resolve(index, "duration")?;
        let zoom = options.zoom.resolve(index, "zoom")?;
        let buffer = options.buffer.resolve(index, "buffer")?;
        let pause = options.wait.resolve(index, "wait")?;
        let timing = options.timing.resolve(index, "timing")?;
        log::debug!("camera tour: stop {index} at {node:?} (zoom: {zoom}, {duration}s)");

        let target = Target::Node(node);
        let mut transition = if zoom {
            moves::zoom_onto(target, duration, buffer, timing)
        } else {
            all([
                moves::reset_zoom(duration, timing),
                moves::center_on(target, duration, timing),
            ])
        };
        if let Some(hook) = &mut options.on_before_move {
            transition = hook(transition, node);
        }
        Ok(chain([transition, wait(pause)]))
    }
}

impl<'a, S: SceneGraph + 'a> Animation<S> for Tour<'a, S> {
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        if !self.started {
            self.started = true;
            self.filter_unreachable(stage);
        }
        let mut dt = dt;
        loop {
            if self.current.is_none() {
                let Some(&node) = self.nodes.get(self.index) else {
                    return Ok(Progress::Finished { leftover: dt });
                };
                let step = self.step(self.index, node)?;
                self.current = Some(step);
                self.index += 1;
            }
            let Some(current) = self.current.as_mut() else {
                return Ok(Progress::Finished { leftover: dt });
            };
            match current.advance(stage, dt)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Finished { leftover } => {
                    self.current = None;
                    dt = leftover;
                }
            }
        }
    }
}

impl<S: SceneGraph> fmt::Debug for Tour<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("stops", &self.nodes.len())
            .field("next", &self.index)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
