// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative animations and the combinators that compose them.
//!
//! An [`Animation`] is a suspendable task: each call to
//! [`Animation::advance`] moves it forward by a slice of time and reports
//! whether it is still running. Composite animations are built with:
//!
//! - [`all`]: run children side by side; finish when every child has finished.
//! - [`chain`]: run children one after another.
//! - [`wait`]: do nothing for a duration.
//! - [`defer`]: build the real animation lazily, from the state at the moment
//!   it starts.
//!
//! When an animation finishes partway through a slice it reports the unused
//! remainder, so a [`chain`] can start its next child within the same tick
//! and timings stay exact regardless of tick size.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::camera::Camera;
use crate::error::CameraError;
use crate::scene::SceneGraph;

/// Everything an animation may touch while it advances.
pub struct Stage<'s, S: SceneGraph> {
    /// The camera being animated.
    pub camera: &'s mut Camera<S::Node>,
    /// The scene the camera looks at.
    pub scene: &'s S,
}

impl<'s, S: SceneGraph> Stage<'s, S> {
    /// Bundles a camera and its scene.
    pub fn new(camera: &'s mut Camera<S::Node>, scene: &'s S) -> Self {
        Self { camera, scene }
    }
}

impl<S: SceneGraph> fmt::Debug for Stage<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}

/// Result of advancing an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    /// More time is needed.
    Running,
    /// The animation completed; `leftover` is the unused part of the slice.
    Finished {
        /// Time left over from the slice after completion.
        leftover: f64,
    },
}

impl Progress {
    /// Returns `true` for [`Progress::Finished`].
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// A suspendable unit of camera motion.
pub trait Animation<S: SceneGraph> {
    /// Advances by `dt` seconds.
    ///
    /// Once this returns [`Progress::Finished`] it must not be called again.
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError>;
}

impl<T: Animation<S> + ?Sized, S: SceneGraph> Animation<S> for Box<T> {
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        (**self).advance(stage, dt)
    }
}

/// A type-erased animation.
pub type BoxedAnimation<'a, S> = Box<dyn Animation<S> + 'a>;

/// Runs every child concurrently; finishes once all of them have.
pub fn all<'a, S: SceneGraph + 'a>(
    children: impl IntoIterator<Item = BoxedAnimation<'a, S>>,
) -> BoxedAnimation<'a, S> {
    Box::new(All {
        children: children.into_iter().map(Some).collect(),
    })
}

/// Runs children strictly one after another.
pub fn chain<'a, S: SceneGraph + 'a>(
    children: impl IntoIterator<Item = BoxedAnimation<'a, S>>,
) -> BoxedAnimation<'a, S> {
    Box::new(Chain {
        children: children.into_iter().collect(),
        current: 0,
    })
}

/// Suspends for `duration` seconds.
pub fn wait<'a, S: SceneGraph + 'a>(duration: f64) -> BoxedAnimation<'a, S> {
    Box::new(Wait {
        remaining: duration.max(0.0),
    })
}

/// Completes immediately.
pub fn noop<'a, S: SceneGraph + 'a>() -> BoxedAnimation<'a, S> {
    Box::new(Noop)
}

/// Builds an animation on its first advance.
///
/// `build` sees the camera and scene as they are when the animation starts,
/// so targets such as "current rotation + 45°" are computed at the right time.
pub fn defer<'a, S, F>(build: F) -> BoxedAnimation<'a, S>
where
    S: SceneGraph + 'a,
    F: FnOnce(&mut Stage<'_, S>) -> Result<BoxedAnimation<'a, S>, CameraError> + 'a,
{
    Box::new(Defer {
        build: Some(build),
        running: None,
    })
}

struct All<'a, S: SceneGraph> {
    children: Vec<Option<BoxedAnimation<'a, S>>>,
}

impl<S: SceneGraph> Animation<S> for All<'_, S> {
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        let mut leftover = dt;
        let mut running = false;
        for slot in &mut self.children {
            let Some(child) = slot else {
                continue;
            };
            match child.advance(stage, dt)? {
                Progress::Running => running = true,
                Progress::Finished { leftover: spare } => {
                    leftover = leftover.min(spare);
                    *slot = None;
                }
            }
        }
        Ok(if running {
            Progress::Running
        } else {
            Progress::Finished { leftover }
        })
    }
}

impl<S: SceneGraph> fmt::Debug for All<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let running = self.children.iter().filter(|c| c.is_some()).count();
        f.debug_struct("All")
            .field("children", &self.children.len())
            .field("running", &running)
            .finish()
    }
}

struct Chain<'a, S: SceneGraph> {
    children: Vec<BoxedAnimation<'a, S>>,
    current: usize,
}

impl<S: SceneGraph> Animation<S> for Chain<'_, S> {
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        let mut dt = dt;
        while let Some(child) = self.children.get_mut(self.current) {
            match child.advance(stage, dt)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Finished { leftover } => {
                    self.current += 1;
                    dt = leftover;
                }
            }
        }
        Ok(Progress::Finished { leftover: dt })
    }
}

impl<S: SceneGraph> fmt::Debug for Chain<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("children", &self.children.len())
            .field("current", &self.current)
            .finish()
    }
}

#[derive(Debug)]
struct Wait {
    remaining: f64,
}

impl<S: SceneGraph> Animation<S> for Wait {
    fn advance(&mut self, _: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        if dt >= self.remaining {
            let leftover = dt - self.remaining;
            self.remaining = 0.0;
            Ok(Progress::Finished { leftover })
        } else {
            self.remaining -= dt;
            Ok(Progress::Running)
        }
    }
}

#[derive(Debug)]
struct Noop;

impl<S: SceneGraph> Animation<S> for Noop {
    fn advance(&mut self, _: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        Ok(Progress::Finished { leftover: dt })
    }
}

struct Defer<'a, S: SceneGraph, F> {
    build: Option<F>,
    running: Option<BoxedAnimation<'a, S>>,
}

impl<'a, S, F> Animation<S> for Defer<'a, S, F>
where
    S: SceneGraph,
    F: FnOnce(&mut Stage<'_, S>) -> Result<BoxedAnimation<'a, S>, CameraError>,
{
    fn advance(&mut self, stage: &mut Stage<'_, S>, dt: f64) -> Result<Progress, CameraError> {
        if let Some(build) = self.build.take() {
            self.running = Some(build(stage)?);
        }
        match &mut self.running {
            Some(animation) => animation.advance(stage, dt),
            None => Ok(Progress::Finished { leftover: dt }),
        }
    }
}

impl<S: SceneGraph, F> fmt::Debug for Defer<'_, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defer")
            .field("started", &self.build.is_none())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    use kurbo::Size;

    use super::{BoxedAnimation, Progress, Stage, all, chain, defer, noop, wait};
    use crate::camera::{Camera, CameraConfig};
    use crate::scene::{LocalNode, SceneTree};

    fn fixture() -> (SceneTree, Camera<crate::NodeId>) {
        let mut tree = SceneTree::new();
        let node = tree.insert(None, LocalNode::default());
        let camera = Camera::new(CameraConfig::new(node, Size::new(100.0, 100.0))).unwrap();
        (tree, camera)
    }

    #[test]
    fn chain_carries_leftover_into_next_child() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut seq: BoxedAnimation<'_, SceneTree> = chain([wait(0.25), wait(0.5)]);
        assert_eq!(seq.advance(&mut stage, 0.5).unwrap(), Progress::Running);
        assert_eq!(
            seq.advance(&mut stage, 0.5).unwrap(),
            Progress::Finished { leftover: 0.25 }
        );
    }

    #[test]
    fn all_waits_for_longest_child() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut join: BoxedAnimation<'_, SceneTree> = all([wait(0.25), wait(1.0), noop()]);
        assert_eq!(join.advance(&mut stage, 0.5).unwrap(), Progress::Running);
        assert_eq!(
            join.advance(&mut stage, 0.75).unwrap(),
            Progress::Finished { leftover: 0.25 }
        );
    }

    #[test]
    fn empty_combinators_finish_at_once() {
        let (tree, mut camera) = fixture();
        let mut stage = Stage::new(&mut camera, &tree);
        let mut join: BoxedAnimation<'_, SceneTree> = all(vec![]);
        let mut seq: BoxedAnimation<'_, SceneTree> = chain(vec![]);
        assert!(join.advance(&mut stage, 0.1).unwrap().is_finished());
        assert!(seq.advance(&mut stage, 0.1).unwrap().is_finished());
    }

    #[test]
    fn defer_builds_on_first_advance_only() {
        let (tree, mut camera) = fixture();
        let builds = Rc::new(Cell::new(0));
        let counter = builds.clone();
        let mut lazy: BoxedAnimation<'_, SceneTree> = defer(move |_: &mut Stage<'_, SceneTree>| {
            counter.set(counter.get() + 1);
            Ok(wait(1.0))
        });
        assert_eq!(builds.get(), 0, "nothing runs before the first advance");
        let mut stage = Stage::new(&mut camera, &tree);
        assert_eq!(lazy.advance(&mut stage, 0.5).unwrap(), Progress::Running);
        assert_eq!(lazy.advance(&mut stage, 0.25).unwrap(), Progress::Running);
        assert!(lazy.advance(&mut stage, 0.25).unwrap().is_finished());
        assert_eq!(builds.get(), 1);
    }
}
