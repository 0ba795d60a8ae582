//! Planar geometry used by the region editor.
//!
//! # Coordinate Spaces
//!
//! Four spaces are involved, from the image outwards:
//! 1. **Model space**: pixels of the original image, unaffected by zoom/pan
//! 2. **Image-fit space**: the image rescaled to fit the viewport
//! 3. **World space**: image-fit space after the viewer's pan/zoom
//! 4. **Widget space**: final on-screen pixels of the editor widget
//!
//! All spaces use a y-down convention, so a positive shoelace area means the
//! polygon is traversed clockwise on screen.

mod polygon;
mod viewport;

pub use polygon::{centroid, contains_point, signed_area};
pub use viewport::{Bounds, Viewport};

use std::f64::consts::PI;

/// Direction of `v` in radians, in (-π, π].
#[inline]
pub fn direction(v: glam::DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Wrap an angle in radians into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Round an angle to the nearest multiple of `step` (both in radians).
///
/// A non-positive step leaves the angle unchanged.
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return angle;
    }
    (angle / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_direction_axes() {
        assert!((direction(DVec2::X) - 0.0).abs() < 1e-12);
        assert!((direction(DVec2::Y) - PI / 2.0).abs() < 1e-12);
        assert!((direction(DVec2::NEG_X) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI).abs() - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(PI / 3.0) - PI / 3.0).abs() < 1e-12);
        assert!((wrap_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_snap_angle_to_45() {
        let snapped = snap_angle(47f64.to_radians(), FRAC_PI_4);
        assert!((snapped - FRAC_PI_4).abs() < 1e-12);

        let snapped = snap_angle(-23f64.to_radians(), FRAC_PI_4);
        assert!((snapped + FRAC_PI_4).abs() < 1e-12);

        let snapped = snap_angle(22f64.to_radians(), FRAC_PI_4);
        assert!(snapped.abs() < 1e-12);
    }

    #[test]
    fn test_snap_angle_zero_step() {
        assert_eq!(snap_angle(0.3, 0.0), 0.3);
    }
}
