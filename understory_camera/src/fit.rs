// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framing math: fitting an area into the viewport.

use kurbo::{Point, Size, Vec2};

use crate::error::CameraError;

/// Size of the smallest frame that encloses `area` (plus `buffer`) while
/// matching the viewport's aspect ratio.
///
/// The frame grows along one axis to match the viewport proportions, then the
/// buffer is applied uniformly: the per-axis inflation factors
/// `(dimension + buffer) / dimension` are computed and the larger one scales
/// the whole frame, so the buffer never distorts the aspect ratio.
///
/// Fails with [`CameraError::DegenerateArea`] if the area has no positive
/// extent or the buffer collapses the frame, and with
/// [`CameraError::InvalidViewport`] for an empty viewport.
pub fn fit_rect_around_area(viewport: Size, area: Size, buffer: f64) -> Result<Size, CameraError> {
    if !is_positive(viewport.width) || !is_positive(viewport.height) {
        return Err(CameraError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let degenerate = CameraError::DegenerateArea {
        width: area.width,
        height: area.height,
    };
    if !is_positive(area.width) || !is_positive(area.height) {
        return Err(degenerate);
    }

    let view_ratio = viewport.height / viewport.width;
    let area_ratio = area.height / area.width;

    let frame = if area_ratio == view_ratio {
        area
    } else if area_ratio > view_ratio {
        // Relatively taller than the viewport: keep the height.
        Size::new(area.height / view_ratio, area.height)
    } else {
        Size::new(area.width, area.width * view_ratio)
    };

    let x_factor = (frame.width + buffer) / frame.width;
    let y_factor = (frame.height + buffer) / frame.height;
    let factor = x_factor.max(y_factor);
    if !is_positive(factor) {
        return Err(degenerate);
    }
    Ok(frame * factor)
}

/// Scale that makes a frame around `area` fill the viewport.
///
/// This is `viewport / frame` per axis, which is uniform whenever the frame
/// matches the viewport aspect ratio.
pub fn zoom_target(viewport: Size, area: Size, buffer: f64) -> Result<Vec2, CameraError> {
    let frame = fit_rect_around_area(viewport, area, buffer)?;
    Ok(Vec2::new(
        viewport.width / frame.width,
        viewport.height / frame.height,
    ))
}

/// Translation that brings a camera-local `center` to the middle of the view.
#[must_use]
pub fn center_target(center: Point) -> Vec2 {
    -center.to_vec2()
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
