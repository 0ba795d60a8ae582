//! Transient translation + rotation applied on top of the committed model.

use glam::{DAffine2, DVec2};

/// In-progress adjustment of a move or rotate gesture.
///
/// The overlay is composed locally while the pointer is held and baked into
/// the model once on release. It is identity between gestures and never
/// persisted. The pivot is captured once when a rotation starts and stays put
/// for the rest of the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    /// Translation accumulated by a move gesture
    pub translation: DVec2,
    /// Rotation in radians about `pivot`
    pub rotation: f64,
    /// Centre of rotation in model space
    pub pivot: DVec2,
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl OverlayTransform {
    pub const IDENTITY: Self = Self {
        translation: DVec2::ZERO,
        rotation: 0.0,
        pivot: DVec2::ZERO,
    };

    pub fn is_identity(&self) -> bool {
        self.translation == DVec2::ZERO && self.rotation == 0.0
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Equivalent affine map: move the pivot to the origin, rotate, move it
    /// back, then translate.
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_translation(self.pivot + self.translation)
            * DAffine2::from_angle(self.rotation)
            * DAffine2::from_translation(-self.pivot)
    }

    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.to_affine().transform_point2(p)
    }

    pub fn apply_all(&self, points: &[DVec2; 4]) -> [DVec2; 4] {
        let m = self.to_affine();
        points.map(|p| m.transform_point2(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_leaves_points() {
        let o = OverlayTransform::IDENTITY;
        let p = DVec2::new(3.0, -7.5);
        assert!(o.is_identity());
        assert!(o.apply(p).abs_diff_eq(p, 1e-12));
    }

    #[test]
    fn test_translation_only() {
        let o = OverlayTransform {
            translation: DVec2::new(20.0, 5.0),
            ..Default::default()
        };
        assert!(!o.is_identity());
        assert!(o.apply(DVec2::new(10.0, 10.0)).abs_diff_eq(DVec2::new(30.0, 15.0), 1e-12));
    }

    #[test]
    fn test_rotation_about_pivot() {
        let o = OverlayTransform {
            rotation: FRAC_PI_2,
            pivot: DVec2::new(50.0, 50.0),
            ..Default::default()
        };
        // The pivot itself does not move
        assert!(o.apply(DVec2::new(50.0, 50.0)).abs_diff_eq(DVec2::new(50.0, 50.0), 1e-9));
        // (100, 50) is 50 to the right of the pivot; +90° (y down) puts it below
        assert!(o.apply(DVec2::new(100.0, 50.0)).abs_diff_eq(DVec2::new(50.0, 100.0), 1e-9));
    }

    #[test]
    fn test_rotation_then_translation() {
        let o = OverlayTransform {
            translation: DVec2::new(1.0, 2.0),
            rotation: FRAC_PI_2,
            pivot: DVec2::ZERO,
        };
        assert!(o.apply(DVec2::X).abs_diff_eq(DVec2::new(1.0, 3.0), 1e-12));
    }

    #[test]
    fn test_reset() {
        let mut o = OverlayTransform {
            translation: DVec2::ONE,
            rotation: 0.3,
            pivot: DVec2::ONE,
        };
        o.reset();
        assert_eq!(o, OverlayTransform::IDENTITY);
    }
}
