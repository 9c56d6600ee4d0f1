// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_camera --heading-base-level=0

//! Understory Camera: an animated virtual camera for 2D scene graphs.
//!
//! A [`Camera`] sits at a node of a scene and owns a [`Pose`] (translation,
//! scale and rotation) that is applied to everything beneath that node. It
//! focuses on:
//! - Basic moves: zoom relative to a base zoom, rotate, shift, and reset.
//! - Framing: zooming onto a node or rectangle so it fills the viewport while
//!   keeping the viewport's aspect ratio, with an optional buffer.
//! - Centering on nodes, rectangles and points.
//! - Following a path with arc-length sampling.
//! - Tours that visit a list of nodes with per-step options.
//!
//! It does **not** render or own the scene. Callers are expected to:
//! - Implement [`SceneGraph`] for their tree (or use the small [`SceneTree`]).
//! - Drive animations with a [`Scheduler`], one tick per frame or as fast as
//!   they like, and apply [`Camera::transform`] when drawing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_camera::{
//!     Camera, CameraConfig, LocalNode, Scheduler, SceneTree, Target, TimingFunction, moves,
//! };
//!
//! let mut scene = SceneTree::new();
//! let camera_node = scene.insert(None, LocalNode::default());
//! let card = scene.insert(
//!     Some(camera_node),
//!     LocalNode::centered(Point::new(400.0, 200.0), 160.0, 90.0),
//! );
//!
//! let mut camera = Camera::new(CameraConfig::new(camera_node, Size::new(1600.0, 900.0))).unwrap();
//! let mut scheduler = Scheduler::new(60.0).unwrap();
//! scheduler.spawn(moves::zoom_onto(
//!     Target::Node(card),
//!     1.0,
//!     0.0,
//!     TimingFunction::EaseInOutCubic,
//! ));
//! scheduler.run(&mut camera, &scene).unwrap();
//!
//! assert_eq!(camera.pose().scale(), Vec2::new(10.0, 10.0));
//! assert_eq!(camera.pose().translation(), Vec2::new(-400.0, -200.0));
//! ```
//!
//! ## Animations
//!
//! Every move is an [`Animation`](flow::Animation) that computes its target
//! when it starts, not when it is built. Moves compose with
//! [`flow::all`], [`flow::chain`] and [`flow::wait`], and
//! [`move_between`] builds a whole tour from [`TravelOptions`].
//! Time is logical: the scheduler advances fixed ticks, and an animation that
//! finishes partway through a tick hands the rest of the tick to whatever
//! comes next in its chain.
//!
//! ## Errors and diagnostics
//!
//! Targets that are stale or not beneath the camera are not errors. The move
//! logs a warning through the `log` crate, records a [`Diagnostic`] on the
//! camera, and does nothing. Misconfiguration such as an empty option
//! sequence, a zero-sized zoom target or a negative zoom factor is a
//! [`CameraError`] and stops the failing animation.
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature (and
//! disable default features) to build without `std`.

#![no_std]

extern crate alloc;

mod camera;
mod cycle;
mod easing;
mod error;
mod fit;
pub mod flow;
pub mod moves;
mod path;
mod pose;
mod scene;
mod scheduler;
mod tour;
mod tween;

pub use camera::{Area, Camera, CameraConfig, Target};
pub use cycle::{Cycle, cyclic_get};
pub use easing::TimingFunction;
pub use error::{CameraError, Diagnostic, ResolveError};
pub use fit::{center_target, fit_rect_around_area, zoom_target};
pub use path::{ArclenPath, PathGeometry, Polyline};
pub use pose::Pose;
pub use scene::{LocalNode, NodeId, SceneGraph, SceneTree};
pub use scheduler::{DEFAULT_TICKS_PER_SECOND, Scheduler};
pub use tour::{BeforeMoveHook, TravelOptions, move_between};
pub use tween::{Channel, Lerp, Tween};
