//! Geometric model of the editable quadrilateral.
//!
//! The model owns four corners in model space plus the orientation of the
//! rectangle's local frame. Corner edits happen in that local frame, so a
//! rotated rectangle stays a rectangle while it is resized.
//!
//! # Corner Layout
//!
//! ```text
//!   0 ──── 1        edge 0→1 runs along the frame's local x axis
//!   │      │        edge 1→2 runs along the frame's local y axis
//!   3 ──── 2
//! ```
//!
//! Handles 4..=7 sit on the midpoints of edges 0→1, 1→2, 2→3 and 3→0.

use super::overlay::OverlayTransform;
use super::output::Region;
use crate::geometry::{self, centroid, contains_point, signed_area};
use glam::{DMat2, DVec2};

/// Diagonal used as the aspect lock when no rectangle exists yet (a square).
pub const SQUARE_DIAGONAL: DVec2 = DVec2::ONE;

/// Edges and diagonals shorter than this are treated as collapsed.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionModel {
    corners: Option<[DVec2; 4]>,
    /// Orientation of the local frame in radians
    angle: f64,
}

impl RegionModel {
    /// Create an empty model (no rectangle yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// True only before the first corner has been placed.
    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn corners(&self) -> Option<&[DVec2; 4]> {
        self.corners.as_ref()
    }

    /// Orientation of the rectangle's local frame in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Collapse all four corners onto `p`, seeding a new axis-aligned rectangle.
    pub fn set_all_corners(&mut self, p: DVec2) {
        self.corners = Some([p; 4]);
        self.angle = 0.0;
    }

    /// Move corner `index` to `target`, keeping the opposite corner fixed.
    ///
    /// The two adjacent corners follow so the shape stays a rectangle in the
    /// model's local frame. With `lock` set to a previous diagonal, the new
    /// diagonal is projected onto that diagonal's width/height ratio instead
    /// of going exactly through `target`.
    ///
    /// # Panics
    ///
    /// If `index` is not a corner index (0..=3).
    pub fn update_corner(&mut self, index: usize, target: DVec2, lock: Option<DVec2>) {
        assert!(index < 4, "corner index out of range: {index}");

        let angle = self.angle;
        let Some(corners) = self.corners.as_mut() else {
            return;
        };

        let to_model = DMat2::from_angle(angle);
        let to_local = to_model.transpose();

        let opposite = corners[(index + 2) % 4];
        let mut diag = to_local * (target - opposite);
        if let Some(locked) = lock {
            diag = lock_aspect(diag, to_local * locked);
        }

        let along_x = to_model * DVec2::new(diag.x, 0.0);
        let along_y = to_model * DVec2::new(0.0, diag.y);

        corners[index] = opposite + to_model * diag;
        if index % 2 == 0 {
            corners[(index + 1) % 4] = opposite + along_y;
            corners[(index + 3) % 4] = opposite + along_x;
        } else {
            corners[(index + 1) % 4] = opposite + along_x;
            corners[(index + 3) % 4] = opposite + along_y;
        }
    }

    /// Vector from corner `index` to its diagonal opposite.
    ///
    /// Returns zero for an empty model.
    ///
    /// # Panics
    ///
    /// If `index` is not a corner index (0..=3).
    pub fn get_diagonal(&self, index: usize) -> DVec2 {
        assert!(index < 4, "corner index out of range: {index}");
        match &self.corners {
            Some(c) => c[(index + 2) % 4] - c[index],
            None => DVec2::ZERO,
        }
    }

    /// The four corners followed by a repeat of the first.
    pub fn get_closed_poly(&self) -> Vec<DVec2> {
        match &self.corners {
            Some(c) => vec![c[0], c[1], c[2], c[3], c[0]],
            None => Vec::new(),
        }
    }

    /// Even-odd containment test against the current corners.
    pub fn contains_point(&self, p: DVec2) -> bool {
        match &self.corners {
            Some(c) => contains_point(c, p),
            None => false,
        }
    }

    pub fn centroid(&self) -> Option<DVec2> {
        self.corners.as_ref().map(|c| centroid(c))
    }

    /// Edges as (start, end) pairs, 0→1, 1→2, 2→3, 3→0.
    pub fn edges(&self) -> Option<[(DVec2, DVec2); 4]> {
        self.corners
            .map(|c| [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])])
    }

    /// Diagonals 0→2 and 1→3.
    pub fn diagonals(&self) -> Option<[(DVec2, DVec2); 2]> {
        self.corners.map(|c| [(c[0], c[2]), (c[1], c[3])])
    }

    /// Unsigned area in model pixels²; zero for an empty model.
    pub fn area(&self) -> f64 {
        self.corners.map_or(0.0, |c| signed_area(&c).abs())
    }

    /// Snapshot the corners as a committed region.
    pub fn region(&self) -> Option<Region> {
        self.corners.map(Region::new)
    }

    /// Permanently apply an overlay transform to the corners.
    ///
    /// The frame rotates with the corners, then winding is normalized.
    pub fn bake(&mut self, overlay: &OverlayTransform) {
        let Some(corners) = self.corners.as_mut() else {
            return;
        };
        *corners = overlay.apply_all(corners);
        self.angle = geometry::wrap_angle(self.angle + overlay.rotation);
        self.normalize_winding();
    }

    /// Restore the clockwise, frame-top-left-first corner order.
    ///
    /// A drag through the opposite corner mirrors the rectangle in one axis,
    /// which reverses its winding. Swapping corners 1 and 3 reverses the
    /// traversal without changing the point set; afterwards the order is
    /// rotated so corner 0 is the top-left corner in the local frame again.
    pub fn normalize_winding(&mut self) {
        let angle = self.angle;
        let Some(corners) = self.corners.as_mut() else {
            return;
        };

        if signed_area(corners) < -EPSILON {
            corners.swap(1, 3);
        }

        let to_local = DMat2::from_angle(angle).transpose();
        let center = centroid(corners);
        let mut top_left = 0;
        let mut best = f64::INFINITY;
        for (i, c) in corners.iter().enumerate() {
            let local = to_local * (*c - center);
            let score = local.x + local.y;
            if score < best - EPSILON {
                best = score;
                top_left = i;
            }
        }
        corners.rotate_left(top_left);
    }

    /// True if the region exists but its area is at or below `min_area`.
    pub fn is_degenerate(&self, min_area: f64) -> bool {
        !self.is_empty() && self.area() <= min_area
    }
}

/// Project `diag` onto the width/height ratio of `locked` (both in the local
/// frame), keeping the signs of `diag` so the drag direction is preserved.
fn lock_aspect(diag: DVec2, locked: DVec2) -> DVec2 {
    let mut ratio = locked.abs();
    if ratio.x < EPSILON || ratio.y < EPSILON {
        ratio = SQUARE_DIAGONAL;
    }
    let scale = diag.abs().dot(ratio) / ratio.length_squared();
    DVec2::new(
        diag.x.signum() * ratio.x * scale,
        diag.y.signum() * ratio.y * scale,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = DVec2> {
        (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| DVec2::new(x, y))
    }

    /// Proper intersection of segments ab and cd (touching endpoints excluded).
    fn segments_cross(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
        let d1 = (b - a).perp_dot(c - a);
        let d2 = (b - a).perp_dot(d - a);
        let d3 = (d - c).perp_dot(a - c);
        let d4 = (d - c).perp_dot(b - c);
        d1 * d2 < -1e-6 && d3 * d4 < -1e-6
    }

    fn is_simple(c: &[DVec2; 4]) -> bool {
        // Only opposite edges can cross in a quadrilateral
        !segments_cross(c[0], c[1], c[2], c[3]) && !segments_cross(c[1], c[2], c[3], c[0])
    }

    proptest! {
        /// Property: free corner drags never produce a self-intersecting quad.
        #[test]
        fn prop_free_drags_stay_simple(
            anchor in point_strategy(),
            angle in -3.1f64..3.1,
            moves in prop::collection::vec((0usize..4, point_strategy()), 1..20),
        ) {
            let mut m = RegionModel::new();
            m.set_all_corners(anchor);
            m.update_corner(2, anchor + DVec2::new(50.0, 30.0), None);
            let pivot = m.centroid().unwrap();
            m.bake(&OverlayTransform { rotation: angle, pivot, ..Default::default() });

            for (index, target) in moves {
                m.update_corner(index, target, None);
                let c = m.corners().unwrap();
                prop_assert!(is_simple(c), "self-intersecting: {:?}", c);
            }
        }

        /// Property: an aspect-locked drag reproduces the locked diagonal ratio.
        #[test]
        fn prop_aspect_lock_ratio(
            w in 1.0f64..400.0,
            h in 1.0f64..400.0,
            index in 0usize..4,
            target in point_strategy(),
        ) {
            let mut m = RegionModel::new();
            m.set_all_corners(DVec2::ZERO);
            m.update_corner(2, DVec2::new(w, h), None);
            let locked = m.get_diagonal(index);
            let opposite = m.corners().unwrap()[(index + 2) % 4];
            prop_assume!(target.distance(opposite) > 1.0);

            m.update_corner(index, target, Some(locked));
            let d = m.get_diagonal(index);
            let expected = w / h;
            prop_assert!(d.y.abs() > 0.0);
            prop_assert!(
                ((d.x.abs() / d.y.abs()) - expected).abs() < 1e-4 * expected.max(1.0),
                "ratio {} vs {}", d.x.abs() / d.y.abs(), expected
            );
        }

        /// Property: baking an identity overlay leaves every corner in place.
        #[test]
        fn prop_identity_bake_round_trip(
            anchor in point_strategy(),
            corner in point_strategy(),
        ) {
            let mut m = RegionModel::new();
            m.set_all_corners(anchor);
            m.update_corner(2, corner, None);
            m.normalize_winding();
            let before = *m.corners().unwrap();

            m.bake(&OverlayTransform::IDENTITY);
            let after = m.corners().unwrap();
            for i in 0..4 {
                prop_assert!(after[i].abs_diff_eq(before[i], 1e-9));
            }
        }

        /// Property: rotating by θ and then by −θ restores the corners.
        #[test]
        fn prop_rotation_commit_idempotence(
            corner in point_strategy(),
            theta in -3.1f64..3.1,
        ) {
            let mut m = RegionModel::new();
            m.set_all_corners(DVec2::new(3.0, 4.0));
            m.update_corner(2, corner, None);
            m.normalize_winding();
            let before = *m.corners().unwrap();
            let pivot = m.centroid().unwrap();

            m.bake(&OverlayTransform { rotation: theta, pivot, ..Default::default() });
            m.bake(&OverlayTransform { rotation: -theta, pivot, ..Default::default() });

            let after = m.corners().unwrap();
            for i in 0..4 {
                prop_assert!(after[i].abs_diff_eq(before[i], 1e-6), "{:?} vs {:?}", after, before);
            }
        }

        /// Property: winding is clockwise after every bake.
        #[test]
        fn prop_bake_normalizes_winding(
            corner in point_strategy(),
            theta in -6.3f64..6.3,
            shift in point_strategy(),
        ) {
            let mut m = RegionModel::new();
            m.set_all_corners(DVec2::ZERO);
            m.update_corner(2, corner, None);
            prop_assume!(m.area() > 1.0);
            let pivot = m.centroid().unwrap();

            m.bake(&OverlayTransform { translation: shift, rotation: theta, pivot });
            prop_assert!(signed_area(m.corners().unwrap()) > 0.0);
        }
    }
}
