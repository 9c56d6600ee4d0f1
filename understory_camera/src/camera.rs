// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::error::{CameraError, Diagnostic, ResolveError};
use crate::fit;
use crate::pose::Pose;
use crate::scene::SceneGraph;

/// Something the camera can frame or center on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target<N> {
    /// A live node beneath the camera.
    Node(N),
    /// An explicit rectangle in camera-local space, anchored at its origin.
    ///
    /// The rectangle's origin is brought to the middle of the view and its
    /// size is what zoom moves frame.
    Area(Rect),
    /// An explicit rectangle in camera-local space, anchored at its center.
    Centered(Rect),
    /// A point in camera-local space (a zero-sized area).
    Point(Point),
}

impl<N> From<Rect> for Target<N> {
    fn from(rect: Rect) -> Self {
        Self::Area(rect)
    }
}

impl<N> From<Point> for Target<N> {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

/// A resolved target in camera-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    /// The point brought to the middle of the view.
    pub center: Point,
    /// The extent framed by zoom moves.
    pub size: Size,
}

impl Area {
    /// The area anchored at the origin of `rect`, with its size.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            center: rect.origin(),
            size: rect.size(),
        }
    }

    /// The area anchored at the center of `rect`, with its size.
    #[must_use]
    pub fn centered(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            size: rect.size(),
        }
    }

    /// The area as a rectangle centered on [`Area::center`].
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }
}

/// Construction parameters for a [`Camera`].
#[derive(Clone, Copy, Debug)]
pub struct CameraConfig<N> {
    /// The scene node the camera sits at. Its children are what the camera shows.
    pub node: N,
    /// Size of the view the camera renders into.
    pub viewport: Size,
    /// Scale applied when the zoom factor is `1`.
    pub base_zoom: Vec2,
}

impl<N> CameraConfig<N> {
    /// Config for a camera at `node` with the given viewport and a base zoom of `1`.
    pub fn new(node: N, viewport: Size) -> Self {
        Self {
            node,
            viewport,
            base_zoom: Vec2::new(1.0, 1.0),
        }
    }

    /// Sets a uniform base zoom.
    #[must_use]
    pub fn with_base_zoom(self, zoom: f64) -> Self {
        self.with_base_zoom_xy(Vec2::new(zoom, zoom))
    }

    /// Sets a per-axis base zoom.
    #[must_use]
    pub fn with_base_zoom_xy(mut self, zoom: Vec2) -> Self {
        self.base_zoom = zoom;
        self
    }
}

/// An animated 2D camera.
///
/// The camera owns a [`Pose`] that is applied to everything beneath its scene
/// node. Moves are built with the functions in [`crate::moves`] and run by a
/// [`Scheduler`](crate::Scheduler), which hands the camera to each move
/// through a [`Stage`](crate::flow::Stage).
///
/// Targets that cannot be resolved are reported through `log` and kept as
/// [`Diagnostic`]s on the camera instead of failing the move.
pub struct Camera<N> {
    node: N,
    viewport: Size,
    base_zoom: Vec2,
    pose: Pose,
    diagnostics: Vec<Diagnostic<N>>,
}

impl<N: fmt::Debug> fmt::Debug for Camera<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("node", &self.node)
            .field("viewport", &self.viewport)
            .field("base_zoom", &self.base_zoom)
            .field("pose", &self.pose)
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl<N: Copy + Eq + fmt::Debug> Camera<N> {
    /// Creates a camera in its home pose.
    ///
    /// Fails if the viewport is empty or the base zoom is negative or not finite.
    pub fn new(config: CameraConfig<N>) -> Result<Self, CameraError> {
        validate_viewport(config.viewport)?;
        validate_zoom(config.base_zoom)?;
        Ok(Self {
            node: config.node,
            viewport: config.viewport,
            base_zoom: config.base_zoom,
            pose: Pose::home(config.base_zoom),
            diagnostics: Vec::new(),
        })
    }

    /// The scene node the camera sits at.
    #[must_use]
    pub fn node(&self) -> N {
        self.node
    }

    /// Size of the view the camera renders into.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Changes the viewport size. The pose is left untouched.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), CameraError> {
        validate_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Scale applied when the zoom factor is `1`.
    #[must_use]
    pub fn base_zoom(&self) -> Vec2 {
        self.base_zoom
    }

    /// Changes the base zoom used by later zoom and reset moves.
    pub fn set_base_zoom(&mut self, zoom: Vec2) -> Result<(), CameraError> {
        validate_zoom(zoom)?;
        self.base_zoom = zoom;
        Ok(())
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub(crate) fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    /// Camera-local → placement transform of the current pose.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.pose.to_affine()
    }

    /// Camera-local → world transform: the camera node's placement in the
    /// scene followed by the current pose.
    #[must_use]
    pub fn world_transform<S: SceneGraph<Node = N>>(&self, scene: &S) -> Affine {
        scene.local_to_world(self.node) * self.pose.to_affine()
    }

    /// Transform from the local space of `node` into camera-local space,
    /// provided `node` lives beneath the camera.
    ///
    /// This composes local transforms on the way up to the camera, which is
    /// the same as mapping through world space and back but does not depend on
    /// the current pose.
    pub fn descendant_transform<S: SceneGraph<Node = N>>(
        &self,
        scene: &S,
        node: N,
    ) -> Result<Affine, ResolveError<N>> {
        if !scene.contains(node) {
            return Err(ResolveError::Stale(node));
        }
        let mut transform = Affine::IDENTITY;
        let mut current = node;
        loop {
            if current == self.node {
                return Ok(transform);
            }
            transform = scene.local_transform(current) * transform;
            match scene.parent(current) {
                Some(parent) => current = parent,
                None => return Err(ResolveError::NotDescendant(node)),
            }
        }
    }

    /// Returns `true` if `node` is live and beneath the camera.
    #[must_use]
    pub fn is_reachable<S: SceneGraph<Node = N>>(&self, scene: &S, node: N) -> bool {
        self.descendant_transform(scene, node).is_ok()
    }

    /// Transform from the local space of any live `node` into camera-local
    /// space, going through world space with the current pose.
    pub fn node_to_local<S: SceneGraph<Node = N>>(
        &self,
        scene: &S,
        node: N,
    ) -> Result<Affine, ResolveError<N>> {
        if !scene.contains(node) {
            return Err(ResolveError::Stale(node));
        }
        let mut node_to_world = Affine::IDENTITY;
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.node {
                node_to_world = self.world_transform(scene) * node_to_world;
                break;
            }
            node_to_world = scene.local_transform(n) * node_to_world;
            current = scene.parent(n);
        }
        Ok(self.world_transform(scene).inverse() * node_to_world)
    }

    /// Resolves `target` into a camera-local [`Area`].
    ///
    /// A node resolves to its origin and the size of its bounding box.
    pub fn resolve_area<S: SceneGraph<Node = N>>(
        &self,
        scene: &S,
        target: &Target<N>,
    ) -> Result<Area, ResolveError<N>> {
        match *target {
            Target::Area(rect) => Ok(Area::from_rect(rect)),
            Target::Centered(rect) => Ok(Area::centered(rect)),
            Target::Point(center) => Ok(Area {
                center,
                size: Size::ZERO,
            }),
            Target::Node(node) => {
                let transform = self.descendant_transform(scene, node)?;
                Ok(Area {
                    center: transform * Point::ORIGIN,
                    size: scene.bounding_box(node).size(),
                })
            }
        }
    }

    /// Frame size around `area` for this camera's viewport.
    ///
    /// See [`fit::fit_rect_around_area`].
    pub fn fit_rect_around_area(&self, area: Size, buffer: f64) -> Result<Size, CameraError> {
        fit::fit_rect_around_area(self.viewport, area, buffer)
    }

    /// Problems recorded so far, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic<N>] {
        &self.diagnostics
    }

    /// Drains the recorded problems.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic<N>> {
        core::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn report(&mut self, operation: &'static str, error: ResolveError<N>) {
        log::warn!("camera {operation}: skipping target: {error}");
        self.diagnostics.push(Diagnostic { operation, error });
    }
}

fn validate_viewport(viewport: Size) -> Result<(), CameraError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(viewport.width) && valid(viewport.height) {
        Ok(())
    } else {
        Err(CameraError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

fn validate_zoom(zoom: Vec2) -> Result<(), CameraError> {
    for component in [zoom.x, zoom.y] {
        if !component.is_finite() || component < 0.0 {
            return Err(CameraError::InvalidZoom(component));
        }
    }
    Ok(())
}
