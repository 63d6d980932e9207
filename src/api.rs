use glam::DVec2;

use crate::error::PhysicsError;
use crate::types::*;

/// Public API contract for the simulated arena.
pub trait PhysicsWorldApi {
    /// Construct an empty world; fails if the configuration is invalid.
    fn new(cfg: WorldConfig) -> Result<Self, PhysicsError>
    where
        Self: Sized;

    // --- Bodies ------------------------------------------------------------

    /// Append a body; its id is its storage index and never changes.
    fn add_body(&mut self, body: Body) -> BodyId;

    fn body(&self, id: BodyId) -> Result<&Body, PhysicsError>;

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, PhysicsError>;

    /// All bodies in storage (= resolution) order.
    fn bodies(&self) -> &[Body];

    // --- Stepping ----------------------------------------------------------

    /// Advance every body by `dt` seconds.
    fn simulate(&mut self, dt: f64);

    // --- Pairwise checks ---------------------------------------------------

    /// Collision predicate for two bodies; polygon/box pairs are never colliding.
    fn colliding(&self, a: BodyId, b: BodyId) -> Result<bool, PhysicsError>;

    /// Resolution axis for `a` against `b`, or `None` when they do not collide
    /// or the contact would be skipped as a false positive.
    fn contact_axis(&self, a: BodyId, b: BodyId) -> Result<Option<ContactAxis>, PhysicsError>;
}

/// Primitive overlap tests behind the collision predicate.
pub trait NarrowphaseApi {
    // Axis-aligned ----------------------------------------------------------

    fn overlap_rect_rect(a: Bounds, b: Bounds) -> bool;
    fn overlap_circle_circle(c0: DVec2, r0: f64, c1: DVec2, r1: f64) -> bool;
    fn overlap_circle_rect(c: DVec2, r: f64, rect: Bounds) -> bool;
    fn overlap_point_rect(p: DVec2, rect: Bounds) -> bool;
    fn overlap_point_circle(p: DVec2, c: DVec2, r: f64) -> bool;

    // Separating axis -------------------------------------------------------

    /// Project world-space vertices onto `axis`.
    fn project(vertices: &[DVec2], axis: DVec2) -> AxisRange;

    /// SAT over every edge normal of both convex polygons.
    fn overlap_polygon_polygon(a: &[DVec2], b: &[DVec2]) -> bool;
}
