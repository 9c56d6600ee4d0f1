// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};

/// Translation, scale and rotation of a camera.
///
/// The pose is applied to everything beneath the camera node. A child at
/// camera-local point `p` ends up at `R · S · (p + translation)` relative to
/// the camera's placement, so a translation of `-p` brings `p` to the camera
/// center regardless of the current scale and rotation.
///
/// Scale components are never negative. Rotation is in degrees and is not
/// normalized; it is interpreted modulo 360°.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    translation: Vec2,
    scale: Vec2,
    rotation: f64,
}

impl Pose {
    /// Creates a pose, clamping negative scale components to zero.
    #[must_use]
    pub fn new(translation: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            translation,
            scale: clamp_scale(scale),
            rotation,
        }
    }

    /// The home pose for a given base zoom: no translation, no rotation.
    #[must_use]
    pub fn home(base_zoom: Vec2) -> Self {
        Self::new(Vec2::ZERO, base_zoom, 0.0)
    }

    /// Current translation in camera-local units.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Current rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub(crate) fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
    }

    pub(crate) fn set_scale(&mut self, scale: Vec2) {
        self.scale = clamp_scale(scale);
    }

    pub(crate) fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Rotation part of the pose as an affine transform.
    #[must_use]
    pub fn rotation_matrix(&self) -> Affine {
        Affine::rotate(self.rotation.to_radians())
    }

    /// Offset of the camera origin in its parent space: `R · S · translation`.
    #[must_use]
    pub fn actual_position(&self) -> Vec2 {
        let linear = self.rotation_matrix() * Affine::scale_non_uniform(self.scale.x, self.scale.y);
        (linear * self.translation.to_point()).to_vec2()
    }

    /// Camera-local → placement transform: `R · S · T(translation)`.
    ///
    /// This is recomputed from the current values on every call, so reading it
    /// mid-animation always yields a transform that is consistent with the
    /// interpolated rotation.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        self.rotation_matrix()
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(self.translation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::home(Vec2::new(1.0, 1.0))
    }
}

fn clamp_scale(scale: Vec2) -> Vec2 {
    Vec2::new(scale.x.max(0.0), scale.y.max(0.0))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::Pose;

    #[test]
    fn negated_translation_maps_to_origin() {
        let pose = Pose::new(Vec2::new(-40.0, 25.0), Vec2::new(3.0, 3.0), 30.0);
        let p = pose.to_affine() * Point::new(40.0, -25.0);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9, "got {p:?}");
    }

    #[test]
    fn actual_position_matches_transformed_origin() {
        let pose = Pose::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0), 90.0);
        let offset = pose.actual_position();
        let origin = pose.to_affine() * Point::ORIGIN;
        assert!((offset.x - origin.x).abs() < 1e-9);
        assert!((offset.y - origin.y).abs() < 1e-9);
        // 90° turns +x into +y in a y-down space.
        assert!(offset.x.abs() < 1e-9);
        assert!((offset.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn scale_is_never_negative() {
        let mut pose = Pose::new(Vec2::ZERO, Vec2::new(-1.0, 2.0), 0.0);
        assert_eq!(pose.scale(), Vec2::new(0.0, 2.0));
        pose.set_scale(Vec2::new(0.5, -3.0));
        assert_eq!(pose.scale(), Vec2::new(0.5, 0.0));
    }
}
