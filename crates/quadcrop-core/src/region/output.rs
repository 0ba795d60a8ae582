//! The finalized quadrilateral handed to the host on commit.

use crate::geometry::{centroid, direction, signed_area};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A committed crop region in model (image pixel) space.
///
/// Corners run clockwise on screen starting from the region's own top-left,
/// so `angle()` is the rotation the host has to undo when cutting the
/// region out of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub corners: [DVec2; 4],
}

impl Region {
    pub fn new(corners: [DVec2; 4]) -> Self {
        Self { corners }
    }

    pub fn center(&self) -> DVec2 {
        centroid(&self.corners)
    }

    /// Orientation of the top edge (corner 0 to corner 1) in radians.
    pub fn angle(&self) -> f64 {
        direction(self.corners[1] - self.corners[0])
    }

    /// Width (top edge) and height (left edge) in model pixels.
    pub fn size(&self) -> DVec2 {
        DVec2::new(
            self.corners[0].distance(self.corners[1]),
            self.corners[0].distance(self.corners[3]),
        )
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.corners).abs()
    }

    /// Axis-aligned (min, max) box enclosing the region.
    pub fn bounding_box(&self) -> (DVec2, DVec2) {
        let min = self.corners.iter().copied().fold(DVec2::INFINITY, DVec2::min);
        let max = self
            .corners
            .iter()
            .copied()
            .fold(DVec2::NEG_INFINITY, DVec2::max);
        (min, max)
    }
}
