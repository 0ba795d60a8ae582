//! Cursor shapes requested from the host.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// On-screen axis of a resize or along-edge cursor, in the y-down widget space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeAxis {
    /// ↔
    Horizontal,
    /// ↕
    Vertical,
    /// ⤡ top-left to bottom-right
    DiagonalNwSe,
    /// ⤢ top-right to bottom-left
    DiagonalNeSw,
}

impl ResizeAxis {
    /// Bucket a direction into the nearest of the four axes (45° sectors).
    ///
    /// A zero vector maps to `Horizontal`.
    pub fn from_direction(v: DVec2) -> Self {
        let mut angle = v.y.atan2(v.x);
        if angle < 0.0 {
            angle += PI;
        }
        let sector = ((angle / (PI / 4.0)).round() as i32).rem_euclid(4);
        match sector {
            0 => ResizeAxis::Horizontal,
            1 => ResizeAxis::DiagonalNwSe,
            2 => ResizeAxis::Vertical,
            _ => ResizeAxis::DiagonalNeSw,
        }
    }
}

/// Cursor the editor wants the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "icon", content = "axis", rename_all = "kebab-case")]
pub enum CursorIcon {
    /// No region yet: click to start one
    #[default]
    Crosshair,
    /// Over the region interior: drag to move
    Move,
    /// Outside the region: drag to rotate
    Rotate,
    /// Alt held, button up: the host will pan
    OpenHand,
    /// Alt held while panning
    ClosedHand,
    /// Over a corner handle
    Resize(ResizeAxis),
    /// Over an edge-midpoint handle: drag to rotate, axis follows the edge
    RotateAlong(ResizeAxis),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_buckets() {
        assert_eq!(ResizeAxis::from_direction(DVec2::X), ResizeAxis::Horizontal);
        assert_eq!(ResizeAxis::from_direction(DVec2::NEG_X), ResizeAxis::Horizontal);
        assert_eq!(ResizeAxis::from_direction(DVec2::Y), ResizeAxis::Vertical);
        assert_eq!(ResizeAxis::from_direction(DVec2::NEG_Y), ResizeAxis::Vertical);
        assert_eq!(
            ResizeAxis::from_direction(DVec2::new(1.0, 1.0)),
            ResizeAxis::DiagonalNwSe
        );
        assert_eq!(
            ResizeAxis::from_direction(DVec2::new(-1.0, -1.0)),
            ResizeAxis::DiagonalNwSe
        );
        assert_eq!(
            ResizeAxis::from_direction(DVec2::new(1.0, -1.0)),
            ResizeAxis::DiagonalNeSw
        );
    }

    #[test]
    fn test_axis_sector_boundaries() {
        // 20° stays horizontal, 25° becomes diagonal
        assert_eq!(
            ResizeAxis::from_direction(DVec2::from_angle(20f64.to_radians())),
            ResizeAxis::Horizontal
        );
        assert_eq!(
            ResizeAxis::from_direction(DVec2::from_angle(25f64.to_radians())),
            ResizeAxis::DiagonalNwSe
        );
        // 170° wraps back to horizontal
        assert_eq!(
            ResizeAxis::from_direction(DVec2::from_angle(170f64.to_radians())),
            ResizeAxis::Horizontal
        );
    }

    #[test]
    fn test_zero_vector() {
        assert_eq!(ResizeAxis::from_direction(DVec2::ZERO), ResizeAxis::Horizontal);
    }
}
