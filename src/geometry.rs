//! World-space extent queries for every shape kind.
//!
//! Circles report the full diameter for width/height so they compare
//! directly against rectangle extents.

use glam::DVec2;

use crate::types::*;

impl Body {
    pub fn top(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { .. } | ShapeKind::Circle { .. } => self.position.y,
            ShapeKind::Polygon { vertices } => self.position.y + fold_min(vertices.iter().map(|v| v.y)),
        }
    }

    pub fn right(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { width, .. } => self.position.x + width,
            ShapeKind::Circle { radius } => self.position.x + 2.0 * radius,
            ShapeKind::Polygon { vertices } => self.position.x + fold_max(vertices.iter().map(|v| v.x)),
        }
    }

    pub fn bottom(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { height, .. } => self.position.y + height,
            ShapeKind::Circle { radius } => self.position.y + 2.0 * radius,
            ShapeKind::Polygon { vertices } => self.position.y + fold_max(vertices.iter().map(|v| v.y)),
        }
    }

    pub fn left(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { .. } | ShapeKind::Circle { .. } => self.position.x,
            ShapeKind::Polygon { vertices } => self.position.x + fold_min(vertices.iter().map(|v| v.x)),
        }
    }

    pub fn width(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { width, .. } => *width,
            ShapeKind::Circle { radius } => 2.0 * radius,
            ShapeKind::Polygon { .. } => self.right() - self.left(),
        }
    }

    pub fn height(&self) -> f64 {
        match self.shape() {
            ShapeKind::Rectangle { height, .. } => *height,
            ShapeKind::Circle { radius } => 2.0 * radius,
            ShapeKind::Polygon { .. } => self.bottom() - self.top(),
        }
    }

    /// Box/circle centre, or the vertex average for polygons.
    pub fn center(&self) -> DVec2 {
        match self.shape() {
            ShapeKind::Rectangle { width, height } => self.position + DVec2::new(*width, *height) * 0.5,
            ShapeKind::Circle { radius } => self.position + DVec2::splat(*radius),
            ShapeKind::Polygon { vertices } => {
                let sum = vertices.iter().fold(DVec2::ZERO, |acc, v| acc + *v);
                self.position + sum / vertices.len() as f64
            }
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: DVec2::new(self.left(), self.top()),
            max: DVec2::new(self.right(), self.bottom()),
        }
    }

    /// Polygon vertices in world space; boxes yield their four corners
    /// (clockwise on screen), circles yield nothing.
    pub fn world_vertices(&self) -> Vec<DVec2> {
        match self.shape() {
            ShapeKind::Polygon { vertices } => vertices.iter().map(|v| self.position + *v).collect(),
            ShapeKind::Rectangle { .. } => rect_corners(self.bounds()).to_vec(),
            ShapeKind::Circle { .. } => Vec::new(),
        }
    }
}

/// Corners of an axis-aligned box: top-left, top-right, bottom-right, bottom-left.
pub fn rect_corners(b: Bounds) -> [DVec2; 4] {
    [
        b.min,
        DVec2::new(b.max.x, b.min.y),
        b.max,
        DVec2::new(b.min.x, b.max.y),
    ]
}

/// Edges `(start, end)` of a closed vertex loop.
pub fn edges(vertices: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Unit normal `(-e.y, e.x)` of an edge.
pub fn edge_normal(start: DVec2, end: DVec2) -> DVec2 {
    let e = end - start;
    DVec2::new(-e.y, e.x).normalize_or_zero()
}

pub fn centroid(vertices: &[DVec2]) -> DVec2 {
    let sum = vertices.iter().fold(DVec2::ZERO, |acc, v| acc + *v);
    sum / vertices.len() as f64
}

fn fold_min(it: impl Iterator<Item = f64>) -> f64 {
    it.fold(f64::INFINITY, f64::min)
}

fn fold_max(it: impl Iterator<Item = f64>) -> f64 {
    it.fold(f64::NEG_INFINITY, f64::max)
}
