// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use crate::camera::Camera;
use crate::error::CameraError;
use crate::flow::{BoxedAnimation, Progress, Stage};
use crate::scene::SceneGraph;

/// Default tick rate for [`Scheduler::new`].
pub const DEFAULT_TICKS_PER_SECOND: f64 = 60.0;

/// Single-threaded driver for camera animations.
///
/// Time advances in fixed logical ticks. Each tick advances every spawned
/// animation once, in spawn order, against the same camera and scene; finished
/// animations are dropped. Nothing runs between ticks, so an animation always
/// sees the state left by the one before it.
///
/// If an animation fails, it is dropped, the remaining animations are not
/// advanced for that tick, and the error is returned.
pub struct Scheduler<'a, S: SceneGraph> {
    tasks: Vec<BoxedAnimation<'a, S>>,
    tick: f64,
    time: f64,
    ticks: u64,
}

impl<'a, S: SceneGraph + 'a> Scheduler<'a, S> {
    /// Creates an idle scheduler that runs `ticks_per_second` ticks per
    /// logical second.
    pub fn new(ticks_per_second: f64) -> Result<Self, CameraError> {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(CameraError::InvalidTickRate(ticks_per_second));
        }
        Ok(Self {
            tasks: Vec::new(),
            tick: 1.0 / ticks_per_second,
            time: 0.0,
            ticks: 0,
        })
    }

    /// Queues `animation`. It first advances on the next tick.
    pub fn spawn(&mut self, animation: BoxedAnimation<'a, S>) {
        self.tasks.push(animation);
    }

    /// Returns `true` when nothing is left to run.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of animations still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Logical time elapsed, in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Length of one tick, in seconds.
    #[must_use]
    pub fn tick_duration(&self) -> f64 {
        self.tick
    }

    /// Runs one tick. Returns `true` while animations remain.
    pub fn tick(&mut self, camera: &mut Camera<S::Node>, scene: &S) -> Result<bool, CameraError> {
        let mut stage = Stage::new(camera, scene);
        let dt = self.tick;
        self.ticks += 1;
        self.time += dt;

        let mut i = 0;
        while i < self.tasks.len() {
            match self.tasks[i].advance(&mut stage, dt) {
                Ok(Progress::Running) => i += 1,
                Ok(Progress::Finished { .. }) => {
                    drop(self.tasks.remove(i));
                }
                Err(err) => {
                    drop(self.tasks.remove(i));
                    log::warn!("camera animation failed: {err}");
                    return Err(err);
                }
            }
        }
        Ok(!self.tasks.is_empty())
    }

    /// Ticks until every animation has finished.
    pub fn run(&mut self, camera: &mut Camera<S::Node>, scene: &S) -> Result<(), CameraError> {
        while !self.is_idle() {
            self.tick(camera, scene)?;
        }
        Ok(())
    }

    /// Ticks for `seconds` of logical time, whether or not anything is running.
    pub fn run_for(
        &mut self,
        camera: &mut Camera<S::Node>,
        scene: &S,
        seconds: f64,
    ) -> Result<(), CameraError> {
        let end = self.time + seconds;
        while self.time + self.tick * 0.5 < end {
            self.tick(camera, scene)?;
        }
        Ok(())
    }

    /// Drops every pending animation without running it further.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<S: SceneGraph> fmt::Debug for Scheduler<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.tasks.len())
            .field("tick", &self.tick)
            .field("time", &self.time)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Size;

    use super::Scheduler;
    use crate::camera::{Camera, CameraConfig};
    use crate::error::CameraError;
    use crate::flow::{Stage, chain, defer, wait};
    use crate::scene::{LocalNode, NodeId, SceneTree};

    fn fixture() -> (SceneTree, Camera<NodeId>) {
        let mut tree = SceneTree::new();
        let node = tree.insert(None, LocalNode::default());
        let camera = Camera::new(CameraConfig::new(node, Size::new(100.0, 100.0))).unwrap();
        (tree, camera)
    }

    #[test]
    fn rejects_bad_tick_rates() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Scheduler::<SceneTree>::new(rate),
                Err(CameraError::InvalidTickRate(_))
            ));
        }
    }

    #[test]
    fn run_stops_when_idle() {
        let (tree, mut camera) = fixture();
        let mut scheduler = Scheduler::new(4.0).unwrap();
        scheduler.run(&mut camera, &tree).unwrap();
        assert_eq!(scheduler.ticks(), 0);

        scheduler.spawn(wait(1.0));
        scheduler.spawn(chain([wait(0.5), wait(0.25)]));
        assert_eq!(scheduler.pending(), 2);
        assert!(scheduler.tick(&mut camera, &tree).unwrap());
        scheduler.run(&mut camera, &tree).unwrap();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.time(), 1.0);
    }

    #[test]
    fn tasks_advance_in_spawn_order() {
        let (tree, mut camera) = fixture();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new(4.0).unwrap();
        for name in ["first", "second", "third"] {
            let order = order.clone();
            scheduler.spawn(defer(move |_: &mut Stage<'_, SceneTree>| {
                order.borrow_mut().push(name);
                Ok(wait(0.0))
            }));
        }
        assert!(!scheduler.tick(&mut camera, &tree).unwrap());
        assert_eq!(*order.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn failing_task_is_dropped() {
        let (tree, mut camera) = fixture();
        let mut scheduler = Scheduler::new(4.0).unwrap();
        scheduler.spawn(wait(1.0));
        scheduler.spawn(defer(|_: &mut Stage<'_, SceneTree>| {
            Err(CameraError::InvalidZoom(f64::NAN))
        }));
        assert!(matches!(
            scheduler.tick(&mut camera, &tree),
            Err(CameraError::InvalidZoom(_))
        ));
        assert_eq!(scheduler.pending(), 1);
        scheduler.run(&mut camera, &tree).unwrap();
    }

    #[test]
    fn run_for_counts_whole_ticks() {
        let (tree, mut camera) = fixture();
        let mut scheduler = Scheduler::new(60.0).unwrap();
        scheduler.spawn(wait(10.0));
        scheduler.run_for(&mut camera, &tree, 0.5).unwrap();
        assert_eq!(scheduler.ticks(), 30);
        assert_eq!(scheduler.pending(), 1);
        scheduler.clear();
        assert!(scheduler.is_idle());
    }
}
