//! Contact normal selection for colliding pairs.
//!
//! Axis-aligned pairs resolve along one of A's four sides; polygon pairs
//! resolve along the normal of A's edge nearest to B ("closest edge"
//! heuristic, not a minimum translation vector).

use glam::DVec2;

use crate::geometry::{centroid, edge_normal, edges};
use crate::types::*;

/// Absolute gaps between A's sides and B's opposite sides, in tie-break
/// order (Top, Bottom, Right, Left).
pub fn side_gaps(a: &Body, b: &Body) -> [(Side, f64); 4] {
    [
        (Side::Top, (a.top() - b.bottom()).abs()),
        (Side::Bottom, (a.bottom() - b.top()).abs()),
        (Side::Right, (a.right() - b.left()).abs()),
        (Side::Left, (a.left() - b.right()).abs()),
    ]
}

/// Side of A with the smallest gap; exact ties keep the earlier side.
pub fn which_side(a: &Body, b: &Body) -> (Side, f64) {
    let gaps = side_gaps(a, b);
    let mut best = gaps[0];
    for &(side, gap) in &gaps[1..] {
        if best.1 > gap {
            best = (side, gap);
        }
    }
    best
}

/// Whether B moves towards A (or holds still relative to it) along `normal`.
pub fn is_closing(a: &Body, b: &Body, normal: DVec2) -> bool {
    (b.velocity - a.velocity).dot(normal) <= 0.0
}

/// Contact axis for a polygon pair: normal of A's edge whose midpoint is
/// nearest to any vertex of B, flipped to face B's centroid.
pub fn polygon_axis(a: &Body, b: &Body) -> ContactAxis {
    let va = a.world_vertices();
    let vb = b.world_vertices();

    let mut best_mid = DVec2::ZERO;
    let mut best_normal = DVec2::ZERO;
    let mut best_dist = f64::INFINITY;
    for (start, end) in edges(&va) {
        let mid = (start + end) * 0.5;
        let dist = vb.iter().map(|v| mid.distance(*v)).fold(f64::INFINITY, f64::min);
        if dist < best_dist {
            best_dist = dist;
            best_mid = mid;
            best_normal = edge_normal(start, end);
        }
    }

    let target = centroid(&vb);
    let normal = if (best_mid + best_normal).distance(target) <= (best_mid - best_normal).distance(target) {
        best_normal
    } else {
        -best_normal
    };
    ContactAxis { normal, depth: best_dist, side: None }
}

/// Outcome of normal selection for a pair already known to collide.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Selection {
    Axis(ContactAxis),
    /// Box/circle pair that is already separating along the chosen side.
    FalsePositive(Side),
    /// Polygon against box/circle: no resolution path.
    Unsupported,
}

/// Pick the resolution axis for `a` against `b` by shape kind.
pub fn select(a: &Body, b: &Body) -> Selection {
    match (a.strategy(), b.strategy()) {
        (Strategy::Aabb, Strategy::Aabb) => {
            let (side, gap) = which_side(a, b);
            if is_closing(a, b, side.normal()) {
                Selection::Axis(ContactAxis { normal: side.normal(), depth: gap, side: Some(side) })
            } else {
                Selection::FalsePositive(side)
            }
        }
        (Strategy::Sat, Strategy::Sat) => Selection::Axis(polygon_axis(a, b)),
        _ => Selection::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_v(x: f64, y: f64, vel: DVec2) -> Body {
        Body::rectangle(DVec2::new(x, y), DVec2::ONE, vel, 1.0).unwrap()
    }

    fn square(x: f64, y: f64) -> Body {
        let verts = vec![DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0)];
        Body::polygon(DVec2::new(x, y), verts, DVec2::ZERO, 1.0).unwrap()
    }

    #[test]
    fn test_which_side_picks_smallest_gap() {
        let a = rect_v(0.0, 0.0, DVec2::ZERO);
        let b = rect_v(0.75, 0.125, DVec2::ZERO);
        let (side, gap) = which_side(&a, &b);
        assert_eq!(side, Side::Right);
        assert_eq!(gap, 0.25);

        let below = rect_v(0.125, 0.75, DVec2::ZERO);
        assert_eq!(which_side(&a, &below).0, Side::Bottom);
        let above = rect_v(0.125, -0.75, DVec2::ZERO);
        assert_eq!(which_side(&a, &above).0, Side::Top);
        let left = rect_v(-0.75, 0.125, DVec2::ZERO);
        assert_eq!(which_side(&a, &left).0, Side::Left);
    }

    #[test]
    fn test_which_side_tie_break_order() {
        // Diagonal overlap: right and bottom gaps equal -> Bottom wins over Right.
        let a = rect_v(0.0, 0.0, DVec2::ZERO);
        let b = rect_v(0.5, 0.5, DVec2::ZERO);
        assert_eq!(which_side(&a, &b).0, Side::Bottom);
        // Perfectly coincident: top and bottom both 1 -> Top.
        let c = rect_v(0.0, 0.0, DVec2::ZERO);
        assert_eq!(which_side(&a, &c).0, Side::Top);
    }

    #[test]
    fn test_false_positive_when_separating() {
        let a = rect_v(0.0, 0.0, DVec2::new(-1.0, 0.0));
        let b = rect_v(0.75, 0.125, DVec2::new(1.0, 0.0));
        assert_eq!(select(&a, &b), Selection::FalsePositive(Side::Right));

        let a = rect_v(0.0, 0.0, DVec2::new(1.0, 0.0));
        let b = rect_v(0.75, 0.125, DVec2::new(-1.0, 0.0));
        match select(&a, &b) {
            Selection::Axis(axis) => {
                assert_eq!(axis.side, Some(Side::Right));
                assert_eq!(axis.normal, DVec2::X);
            }
            other => panic!("expected axis, got {:?}", other),
        }
    }

    fn diamond(cx: f64, cy: f64) -> Body {
        let verts = vec![
            DVec2::new(-0.3, 0.0),
            DVec2::new(0.0, -0.3),
            DVec2::new(0.3, 0.0),
            DVec2::new(0.0, 0.3),
        ];
        Body::polygon(DVec2::new(cx, cy), verts, DVec2::ZERO, 1.0).unwrap()
    }

    #[test]
    fn test_polygon_axis_faces_other_centroid() {
        // Diamond poking into A's right edge.
        let a = square(0.0, 0.0);
        let b = diamond(1.2, 0.5);
        let axis = polygon_axis(&a, &b);
        assert!((axis.normal - DVec2::X).length() < 1e-12);
        let expected = DVec2::new(1.0, 0.5).distance(DVec2::new(1.2, 0.5) + DVec2::new(-0.3, 0.0));
        assert!((axis.depth - expected).abs() < 1e-12);
        assert_eq!(axis.side, None);

        // Mirror: diamond on the left, normal flips.
        let c = diamond(-0.2, 0.5);
        let axis = polygon_axis(&a, &c);
        assert!((axis.normal + DVec2::X).length() < 1e-12);
    }

    #[test]
    fn test_polygon_axis_tie_keeps_first_edge() {
        // Aligned squares: A's top and bottom midpoints are both 0.25 from a
        // vertex of B. The top edge comes first in winding order and wins.
        let a = square(0.0, 0.0);
        let b = square(0.75, 0.0);
        let axis = polygon_axis(&a, &b);
        assert!((axis.normal - DVec2::Y).length() < 1e-12);
        assert_eq!(axis.depth, 0.25);
    }

    #[test]
    fn test_top_contact_closing_direction() {
        // B above A. With +y pointing down, B moving +y approaches A.
        let a = rect_v(0.0, 0.0, DVec2::ZERO);
        let falling = rect_v(0.125, -0.75, DVec2::new(0.0, 1.0));
        match select(&a, &falling) {
            Selection::Axis(axis) => assert_eq!(axis.side, Some(Side::Top)),
            other => panic!("expected axis, got {:?}", other),
        }
        let rising = rect_v(0.125, -0.75, DVec2::new(0.0, -1.0));
        assert_eq!(select(&a, &rising), Selection::FalsePositive(Side::Top));
    }

    #[test]
    fn test_mixed_pair_unsupported() {
        let r = rect_v(0.0, 0.0, DVec2::ZERO);
        let p = square(0.0, 0.0);
        assert_eq!(select(&r, &p), Selection::Unsupported);
        assert_eq!(select(&p, &r), Selection::Unsupported);
    }
}
