use glam::DVec2;

use crate::api::NarrowphaseApi;
use crate::geometry::{edge_normal, edges, rect_corners};
use crate::types::*;

/// Narrowphase primitive tests.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn overlap_rect_rect(a: Bounds, b: Bounds) -> bool {
        // Strict: boxes sharing an edge are not colliding.
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }

    fn overlap_circle_circle(c0: DVec2, r0: f64, c1: DVec2, r1: f64) -> bool {
        c0.distance(c1) < r0 + r1
    }

    fn overlap_circle_rect(c: DVec2, r: f64, rect: Bounds) -> bool {
        // Centre inside, or a corner poking into the circle.
        if Self::overlap_point_rect(c, rect) {
            return true;
        }
        rect_corners(rect).iter().any(|&p| Self::overlap_point_circle(p, c, r))
    }

    fn overlap_point_rect(p: DVec2, rect: Bounds) -> bool {
        p.x > rect.min.x && p.x < rect.max.x && p.y > rect.min.y && p.y < rect.max.y
    }

    fn overlap_point_circle(p: DVec2, c: DVec2, r: f64) -> bool {
        (p - c).length_squared() < r * r
    }

    fn project(vertices: &[DVec2], axis: DVec2) -> AxisRange {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in vertices {
            let d = v.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        AxisRange { min, max }
    }

    fn overlap_polygon_polygon(a: &[DVec2], b: &[DVec2]) -> bool {
        // Any axis with a gap between the shadows separates the shapes.
        for (start, end) in edges(a).chain(edges(b)) {
            let normal = edge_normal(start, end);
            if !Self::project(a, normal).overlaps(Self::project(b, normal)) {
                return false;
            }
        }
        true
    }
}

/// Collision predicate dispatching on both shape kinds.
///
/// Polygon/box combinations have no collision path and always report `false`.
pub fn colliding(a: &Body, b: &Body) -> bool {
    match (a.shape(), b.shape()) {
        (ShapeKind::Rectangle { .. }, ShapeKind::Rectangle { .. }) => {
            Narrowphase::overlap_rect_rect(a.bounds(), b.bounds())
        }
        (ShapeKind::Circle { radius: r0 }, ShapeKind::Circle { radius: r1 }) => {
            Narrowphase::overlap_circle_circle(a.center(), *r0, b.center(), *r1)
        }
        (ShapeKind::Circle { radius }, ShapeKind::Rectangle { .. }) => {
            Narrowphase::overlap_circle_rect(a.center(), *radius, b.bounds())
        }
        (ShapeKind::Rectangle { .. }, ShapeKind::Circle { radius }) => {
            Narrowphase::overlap_circle_rect(b.center(), *radius, a.bounds())
        }
        (ShapeKind::Polygon { .. }, ShapeKind::Polygon { .. }) => {
            Narrowphase::overlap_polygon_polygon(&a.world_vertices(), &b.world_vertices())
        }
        (ShapeKind::Polygon { .. }, _) | (_, ShapeKind::Polygon { .. }) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Body {
        Body::rectangle(DVec2::new(x, y), DVec2::new(w, h), DVec2::ZERO, 1.0).unwrap()
    }

    fn circle(x: f64, y: f64, r: f64) -> Body {
        Body::circle(DVec2::new(x, y), r, DVec2::ZERO, 1.0).unwrap()
    }

    fn square(x: f64, y: f64, s: f64) -> Body {
        let verts = vec![DVec2::ZERO, DVec2::new(s, 0.0), DVec2::new(s, s), DVec2::new(0.0, s)];
        Body::polygon(DVec2::new(x, y), verts, DVec2::ZERO, 1.0).unwrap()
    }

    #[test]
    fn test_rect_rect_overlap_and_touching() {
        assert!(colliding(&rect(0.0, 0.0, 1.0, 1.0), &rect(0.5, 0.5, 1.0, 1.0)));
        // Shared edge is not a collision.
        assert!(!colliding(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 0.0, 1.0, 1.0)));
        assert!(!colliding(&rect(0.0, 0.0, 1.0, 1.0), &rect(0.0, 3.0, 1.0, 1.0)));
    }

    #[test]
    fn test_circle_circle_distance() {
        // Centres (1,1) and (2.5,1), radii sum 2.
        assert!(colliding(&circle(0.0, 0.0, 1.0), &circle(1.5, 0.0, 1.0)));
        // Exactly touching.
        assert!(!colliding(&circle(0.0, 0.0, 1.0), &circle(2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let c = circle(0.0, 0.0, 0.25);
        let r = rect(0.0, 0.0, 2.0, 2.0);
        assert!(colliding(&c, &r));
        assert!(colliding(&r, &c));
    }

    #[test]
    fn test_circle_rect_corner_inside() {
        // Circle centre (2.5, 2.5) r=1 outside the box, but box corner (2,2) is within reach.
        let c = circle(1.5, 1.5, 1.0);
        let r = rect(0.0, 0.0, 2.0, 2.0);
        assert!(colliding(&c, &r));
        let far = circle(3.0, 3.0, 1.0);
        assert!(!colliding(&far, &r));
    }

    #[test]
    fn test_polygon_polygon_sat() {
        assert!(colliding(&square(0.0, 0.0, 1.0), &square(0.5, 0.5, 1.0)));
        assert!(!colliding(&square(0.0, 0.0, 1.0), &square(1.5, 0.0, 1.0)));
        // Touching edges count as overlapping on every axis.
        assert!(colliding(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_polygon_triangle_separated_by_own_edge() {
        // Bounding boxes overlap but the hypotenuse separates them.
        let tri = Body::polygon(
            DVec2::ZERO,
            vec![DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)],
            DVec2::ZERO,
            1.0,
        )
        .unwrap();
        let sq = square(1.2, 1.2, 0.5);
        assert!(!colliding(&tri, &sq));
        let sq_hit = square(0.8, 0.8, 0.5);
        assert!(colliding(&tri, &sq_hit));
    }

    #[test]
    fn test_mixed_polygon_box_never_collides() {
        assert!(!colliding(&square(0.0, 0.0, 1.0), &rect(0.0, 0.0, 1.0, 1.0)));
        assert!(!colliding(&circle(0.0, 0.0, 1.0), &square(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_project_range() {
        let verts = [DVec2::new(1.0, 0.0), DVec2::new(3.0, 5.0), DVec2::new(-2.0, 1.0)];
        let r = Narrowphase::project(&verts, DVec2::X);
        assert_eq!(r, AxisRange { min: -2.0, max: 3.0 });
    }
}
