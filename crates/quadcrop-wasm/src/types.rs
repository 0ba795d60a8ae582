//! Conversions between JavaScript values and core types.
//!
//! Everything here is plain Rust so it can be tested natively.

use glam::{DAffine2, DVec2};
use log::LevelFilter;
use quadcrop_core::{CursorIcon, Key, ResizeAxis};

/// Map a DOM `KeyboardEvent.key` value to an editor key.
pub(crate) fn parse_key(key: &str) -> Key {
    match key {
        "Escape" | "Esc" => Key::Escape,
        "Enter" | "Return" => Key::Enter,
        "Alt" | "AltGraph" => Key::Alt,
        _ => Key::Other,
    }
}

/// CSS `cursor` keyword for an icon.
///
/// CSS has no rotation cursor, so both rotate icons fall back to a
/// crosshair; hosts that ship their own cursor image can react to the
/// `cursor_changed` event instead.
pub(crate) fn cursor_css(icon: CursorIcon) -> &'static str {
    match icon {
        CursorIcon::Crosshair | CursorIcon::Rotate | CursorIcon::RotateAlong(_) => "crosshair",
        CursorIcon::Move => "move",
        CursorIcon::OpenHand => "grab",
        CursorIcon::ClosedHand => "grabbing",
        CursorIcon::Resize(axis) => match axis {
            ResizeAxis::Horizontal => "ew-resize",
            ResizeAxis::Vertical => "ns-resize",
            ResizeAxis::DiagonalNwSe => "nwse-resize",
            ResizeAxis::DiagonalNeSw => "nesw-resize",
        },
    }
}

/// Parse a log level name ("off", "error", ... "trace"), case-insensitive.
pub(crate) fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

/// Build an affine transform from canvas `setTransform(a, b, c, d, e, f)` arguments.
pub(crate) fn affine_from_canvas(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> DAffine2 {
    DAffine2::from_cols_array(&[a, b, c, d, e, f])
}

/// Flatten corners to `[x0, y0, x1, y1, x2, y2, x3, y3]`.
pub(crate) fn flatten_corners(corners: &[DVec2; 4]) -> Vec<f64> {
    corners.iter().flat_map(|p| [p.x, p.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Escape"), Key::Escape);
        assert_eq!(parse_key("Enter"), Key::Enter);
        assert_eq!(parse_key("Alt"), Key::Alt);
        assert_eq!(parse_key("a"), Key::Other);
        assert_eq!(parse_key("escape"), Key::Other);
    }

    #[test]
    fn test_cursor_css() {
        assert_eq!(cursor_css(CursorIcon::Move), "move");
        assert_eq!(cursor_css(CursorIcon::ClosedHand), "grabbing");
        assert_eq!(
            cursor_css(CursorIcon::Resize(ResizeAxis::DiagonalNeSw)),
            "nesw-resize"
        );
        assert_eq!(
            cursor_css(CursorIcon::RotateAlong(ResizeAxis::Vertical)),
            "crosshair"
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_affine_from_canvas() {
        // Zoom 2x, pan by (5, 7)
        let m = affine_from_canvas(2.0, 0.0, 0.0, 2.0, 5.0, 7.0);
        assert_eq!(m.transform_point2(DVec2::new(1.0, 1.0)), DVec2::new(7.0, 9.0));

        // Quarter turn: canvas (a, b) is the image of the x axis
        let r = affine_from_canvas(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
        assert_eq!(r.transform_point2(DVec2::X), DVec2::Y);
    }

    #[test]
    fn test_flatten_corners() {
        let corners = [
            DVec2::new(1.0, 2.0),
            DVec2::new(3.0, 4.0),
            DVec2::new(5.0, 6.0),
            DVec2::new(7.0, 8.0),
        ];
        assert_eq!(
            flatten_corners(&corners),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }
}
