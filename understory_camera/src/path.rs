// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths the camera can follow.

use alloc::vec::Vec;

use kurbo::{BezPath, Line, ParamCurve, ParamCurveArclen, PathSeg, Point};

/// A curve that can be sampled by fraction of its length.
pub trait PathGeometry {
    /// Point at fraction `t` of the way along the path, `t` in `[0, 1]`.
    fn point_at_fraction(&self, t: f64) -> Point;

    /// The end of the path.
    fn last_point(&self) -> Point {
        self.point_at_fraction(1.0)
    }
}

impl<P: PathGeometry + ?Sized> PathGeometry for &P {
    fn point_at_fraction(&self, t: f64) -> Point {
        (**self).point_at_fraction(t)
    }

    fn last_point(&self) -> Point {
        (**self).last_point()
    }
}

impl PathGeometry for Line {
    fn point_at_fraction(&self, t: f64) -> Point {
        self.eval(t.clamp(0.0, 1.0))
    }

    fn last_point(&self) -> Point {
        self.p1
    }
}

/// Points joined by straight segments, sampled by arc length.
#[derive(Clone, Debug, Default)]
pub struct Polyline {
    points: Vec<Point>,
    // Cumulative length at each point; `lengths[0] == 0`.
    lengths: Vec<f64>,
}

impl Polyline {
    /// Builds a polyline through `points`.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let points: Vec<Point> = points.into_iter().collect();
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += (*p - points[i - 1]).hypot();
            }
            lengths.push(total);
        }
        Self { points, lengths }
    }

    /// The points the polyline passes through.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }
}

impl PathGeometry for Polyline {
    fn point_at_fraction(&self, t: f64) -> Point {
        let Some(&first) = self.points.first() else {
            return Point::ORIGIN;
        };
        let total = self.length();
        if total <= 0.0 {
            return first;
        }
        let distance = t.clamp(0.0, 1.0) * total;
        // First point at or past `distance`; the segment ends there.
        let end = self
            .lengths
            .partition_point(|&l| l < distance)
            .clamp(1, self.points.len() - 1);
        let start = end - 1;
        let span = self.lengths[end] - self.lengths[start];
        if span <= 0.0 {
            return self.points[end];
        }
        let local = (distance - self.lengths[start]) / span;
        self.points[start].lerp(self.points[end], local)
    }

    fn last_point(&self) -> Point {
        self.points.last().copied().unwrap_or(Point::ORIGIN)
    }
}

/// A [`BezPath`] sampled by arc length.
///
/// Segment lengths are measured once, up front.
#[derive(Clone, Debug)]
pub struct ArclenPath {
    segments: Vec<(PathSeg, f64)>,
    length: f64,
    accuracy: f64,
}

impl ArclenPath {
    /// Default accuracy used for arc-length measurement.
    pub const DEFAULT_ACCURACY: f64 = 1e-6;

    /// Measures `path` with [`ArclenPath::DEFAULT_ACCURACY`].
    #[must_use]
    pub fn new(path: &BezPath) -> Self {
        Self::with_accuracy(path, Self::DEFAULT_ACCURACY)
    }

    /// Measures `path` with the given arc-length accuracy.
    #[must_use]
    pub fn with_accuracy(path: &BezPath, accuracy: f64) -> Self {
        let segments: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(accuracy)))
            .collect();
        let length = segments.iter().map(|(_, len)| len).sum();
        Self {
            segments,
            length,
            accuracy,
        }
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }
}

impl From<&BezPath> for ArclenPath {
    fn from(path: &BezPath) -> Self {
        Self::new(path)
    }
}

impl PathGeometry for ArclenPath {
    fn point_at_fraction(&self, t: f64) -> Point {
        let Some((first, _)) = self.segments.first() else {
            return Point::ORIGIN;
        };
        if self.length <= 0.0 {
            return first.start();
        }
        let mut remaining = t.clamp(0.0, 1.0) * self.length;
        for (seg, len) in &self.segments {
            if remaining <= *len {
                let param = if *len > 0.0 {
                    seg.inv_arclen(remaining, self.accuracy)
                } else {
                    0.0
                };
                return seg.eval(param);
            }
            remaining -= len;
        }
        self.last_point()
    }

    fn last_point(&self) -> Point {
        self.segments
            .last()
            .map_or(Point::ORIGIN, |(seg, _)| seg.end())
    }
}
