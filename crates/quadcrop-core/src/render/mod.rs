//! Drawing capability used by the editor's paint pass.
//!
//! The editor does not know what it draws onto. Anything implementing
//! [`Surface`] works: [`DisplayList`] records commands for a host canvas,
//! [`RasterSurface`] rasterizes into an RGBA image.

mod raster;

pub use raster::RasterSurface;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 8-bit straight-alpha colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// How overlapping contours of a path are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    /// A point is inside when a ray from it crosses an odd number of edges
    #[default]
    EvenOdd,
    /// A point is inside when the signed crossing count is non-zero
    NonZero,
}

/// A drawing target in widget space.
pub trait Surface {
    /// Fill a path made of one or more closed contours.
    fn fill_path(&mut self, contours: &[Vec<DVec2>], rule: FillRule, color: Rgba);

    /// Stroke an open polyline (repeat the first point to close it).
    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, width: f64);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, min: DVec2, max: DVec2, color: Rgba);
}

/// Something that draws itself and owns a hit area in widget space.
pub trait Control {
    fn draw(&self, surface: &mut dyn Surface);

    fn hit_test(&self, p: DVec2) -> bool;
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    FillPath {
        contours: Vec<Vec<DVec2>>,
        rule: FillRule,
        color: Rgba,
    },
    StrokePolyline {
        points: Vec<DVec2>,
        color: Rgba,
        width: f64,
    },
    FillRect {
        min: DVec2,
        max: DVec2,
        color: Rgba,
    },
}

/// Surface that records commands in order for a host to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Replay every recorded command onto another surface.
    pub fn replay(&self, target: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::FillPath {
                    contours,
                    rule,
                    color,
                } => target.fill_path(contours, *rule, *color),
                DrawCommand::StrokePolyline {
                    points,
                    color,
                    width,
                } => target.stroke_polyline(points, *color, *width),
                DrawCommand::FillRect { min, max, color } => target.fill_rect(*min, *max, *color),
            }
        }
    }
}

impl Surface for DisplayList {
    fn fill_path(&mut self, contours: &[Vec<DVec2>], rule: FillRule, color: Rgba) {
        self.commands.push(DrawCommand::FillPath {
            contours: contours.to_vec(),
            rule,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, width: f64) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_rect(&mut self, min: DVec2, max: DVec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list_records_in_order() {
        let mut list = DisplayList::new();
        assert!(list.is_empty());

        list.fill_rect(DVec2::ZERO, DVec2::ONE, Rgba::BLACK);
        list.stroke_polyline(&[DVec2::ZERO, DVec2::X], Rgba::WHITE, 1.0);
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(
            list.commands[1],
            DrawCommand::StrokePolyline { width, .. } if width == 1.0
        ));
    }

    #[test]
    fn test_replay_copies_commands() {
        let mut list = DisplayList::new();
        list.fill_path(
            &[vec![DVec2::ZERO, DVec2::X, DVec2::ONE]],
            FillRule::NonZero,
            Rgba::new(1, 2, 3, 4),
        );
        list.fill_rect(DVec2::ZERO, DVec2::ONE, Rgba::BLACK);

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }
}
