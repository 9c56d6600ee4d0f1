// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error and diagnostic types.

use core::fmt;

/// Fatal error raised while building or running a camera animation.
///
/// These describe programmer errors or misconfiguration. They propagate out of
/// [`Animation::advance`](crate::flow::Animation::advance) and
/// [`Scheduler::tick`](crate::Scheduler::tick) and abort the failing task.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraError {
    /// A travel option sequence was empty, so no value exists for a step.
    EmptySequence {
        /// Name of the option (`"duration"`, `"zoom"`, ...).
        option: &'static str,
    },
    /// A target area (or a buffered frame around it) has no usable extent.
    DegenerateArea {
        /// Width of the offending area.
        width: f64,
        /// Height of the offending area.
        height: f64,
    },
    /// The viewport has a zero, negative or non-finite dimension.
    InvalidViewport {
        /// Viewport width.
        width: f64,
        /// Viewport height.
        height: f64,
    },
    /// A zoom factor or base zoom was negative or not finite.
    InvalidZoom(f64),
    /// A scheduler tick rate was zero, negative or not finite.
    InvalidTickRate(f64),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence { option } => {
                write!(f, "travel option `{option}` has no values to cycle through")
            }
            Self::DegenerateArea { width, height } => {
                write!(f, "cannot frame an area of size {width}x{height}")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport size {width}x{height} must be positive and finite")
            }
            Self::InvalidZoom(zoom) => write!(f, "zoom factor {zoom} must be finite and >= 0"),
            Self::InvalidTickRate(rate) => {
                write!(f, "tick rate {rate} must be positive and finite")
            }
        }
    }
}

impl core::error::Error for CameraError {}

/// Reason a target could not be placed in the camera's local space.
///
/// Resolution errors are never fatal: the camera records them as a
/// [`Diagnostic`] and the affected move degrades to a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveError<N> {
    /// The node is no longer part of the scene.
    Stale(N),
    /// The node exists but is not beneath the camera.
    NotDescendant(N),
}

impl<N: Copy> ResolveError<N> {
    /// Returns the node that failed to resolve.
    #[must_use]
    pub fn node(&self) -> N {
        match *self {
            Self::Stale(node) | Self::NotDescendant(node) => node,
        }
    }
}

impl<N: fmt::Debug> fmt::Display for ResolveError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale(node) => write!(f, "node {node:?} is not in the scene"),
            Self::NotDescendant(node) => write!(f, "node {node:?} is not beneath the camera"),
        }
    }
}

impl<N: fmt::Debug> core::error::Error for ResolveError<N> {}

/// A recorded, non-fatal problem encountered while running a camera move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic<N> {
    /// The operation that hit the problem, for example `"zoom_onto"`.
    pub operation: &'static str,
    /// What went wrong.
    pub error: ResolveError<N>,
}
