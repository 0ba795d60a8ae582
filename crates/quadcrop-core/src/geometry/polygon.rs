//! Polygon predicates over plain point slices.

use glam::DVec2;

/// Signed shoelace area of a polygon.
///
/// In the y-down spaces used by the editor, a positive value means the
/// vertices run clockwise on screen. A trailing repeat of the first vertex
/// contributes nothing, so open and closed polygons give the same result.
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.perp_dot(b);
    }
    twice * 0.5
}

/// Vertex average of a polygon.
///
/// For the parallelograms the editor works with this equals the area
/// centroid and stays well defined when the shape collapses to a point.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

/// Even-odd containment test.
///
/// Casts a ray towards +x and counts edge crossings. A point exactly on an
/// edge is resolved by the half-open crossing rule, so the answer for a given
/// point never changes between calls.
pub fn contains_point(points: &[DVec2], p: DVec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let vi = points[i];
        let vj = points[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_signed_area_clockwise_is_positive() {
        assert!((signed_area(&square()) - 10_000.0).abs() < 1e-9);

        let mut reversed = square();
        reversed.reverse();
        assert!((signed_area(&reversed) + 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_area_closed_poly() {
        let mut closed = square();
        closed.push(closed[0]);
        assert!((signed_area(&closed) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_area_degenerate() {
        assert_eq!(signed_area(&[DVec2::ZERO, DVec2::X]), 0.0);
        let collinear = [DVec2::ZERO, DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)];
        assert!(signed_area(&collinear).abs() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&square()), DVec2::new(50.0, 50.0));
        assert_eq!(centroid(&[]), DVec2::ZERO);
    }

    #[test]
    fn test_contains_inside_and_outside() {
        let sq = square();
        assert!(contains_point(&sq, DVec2::new(50.0, 50.0)));
        assert!(!contains_point(&sq, DVec2::new(150.0, 50.0)));
        assert!(!contains_point(&sq, DVec2::new(50.0, -1.0)));
    }

    #[test]
    fn test_contains_on_edge_is_stable() {
        let sq = square();
        let on_edge = DVec2::new(100.0, 50.0);
        let first = contains_point(&sq, on_edge);
        for _ in 0..10 {
            assert_eq!(contains_point(&sq, on_edge), first);
        }
        // The right edge is excluded, the left edge included.
        assert!(!first);
        assert!(contains_point(&sq, DVec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_contains_ignores_winding() {
        let mut reversed = square();
        reversed.reverse();
        assert!(contains_point(&reversed, DVec2::new(10.0, 90.0)));
    }

    #[test]
    fn test_contains_rotated_square() {
        // Diamond centred at (50, 50)
        let diamond = [
            DVec2::new(50.0, 0.0),
            DVec2::new(100.0, 50.0),
            DVec2::new(50.0, 100.0),
            DVec2::new(0.0, 50.0),
        ];
        assert!(contains_point(&diamond, DVec2::new(50.0, 50.0)));
        assert!(!contains_point(&diamond, DVec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_contains_needs_three_points() {
        assert!(!contains_point(&[DVec2::ZERO, DVec2::X], DVec2::ZERO));
    }
}
