use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Pixels per metre of the reference 1024×800 window (10 m tall).
pub const PIXELS_PER_METRE: f64 = 80.0;

/// Standard gravity used by the reference arena (m/s², +y points down).
pub const DEFAULT_GRAVITY: f64 = 9.82;

/// Handle of a body inside a [`crate::PhysicsWorld`] (storage index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Supported body shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned box anchored at its top-left corner.
    Rectangle { width: f64, height: f64 },
    /// Circle anchored at the top-left corner of its bounding square.
    Circle { radius: f64 },
    /// Convex polygon; vertices are relative to the body position and
    /// wound consistently.
    Polygon { vertices: Vec<DVec2> },
}

/// Which collision representation a shape takes part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Boxes and circles tested through their axis-aligned extents.
    Aabb,
    /// Convex polygons tested with the separating axis theorem.
    Sat,
}

impl ShapeKind {
    pub fn strategy(&self) -> Strategy {
        match self {
            ShapeKind::Rectangle { .. } | ShapeKind::Circle { .. } => Strategy::Aabb,
            ShapeKind::Polygon { .. } => Strategy::Sat,
        }
    }

    fn validate(&self) -> Result<(), PhysicsError> {
        match self {
            ShapeKind::Rectangle { width, height } => {
                if !width.is_finite() || !height.is_finite() {
                    return Err(PhysicsError::NonFiniteValue { context: "rectangle size" });
                }
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(PhysicsError::DegenerateShape {
                        reason: "rectangle width and height must be > 0",
                    });
                }
            }
            ShapeKind::Circle { radius } => {
                if !radius.is_finite() {
                    return Err(PhysicsError::NonFiniteValue { context: "circle radius" });
                }
                if *radius <= 0.0 {
                    return Err(PhysicsError::DegenerateShape { reason: "circle radius must be > 0" });
                }
            }
            ShapeKind::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(PhysicsError::TooFewVertices { count: vertices.len() });
                }
                if !vertices.iter().all(|v| v.is_finite()) {
                    return Err(PhysicsError::NonFiniteValue { context: "polygon vertex" });
                }
                // Zero-length edges would produce a zero normal in SAT.
                let n = vertices.len();
                for i in 0..n {
                    if vertices[(i + 1) % n] == vertices[i] {
                        return Err(PhysicsError::DegenerateShape {
                            reason: "polygon has a zero-length edge",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// The single simulated entity.
///
/// Shape and mass are fixed at construction (validated there); position and
/// velocity are mutated in place by the step loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    shape: ShapeKind,
    mass: f64,
    pub position: DVec2,
    pub velocity: DVec2,
}

impl Body {
    /// Validate and build a body of any shape.
    pub fn new(shape: ShapeKind, position: DVec2, velocity: DVec2, mass: f64) -> Result<Self, PhysicsError> {
        if !mass.is_finite() {
            return Err(PhysicsError::NonFiniteValue { context: "mass" });
        }
        if mass <= 0.0 {
            return Err(PhysicsError::NonPositiveMass { mass });
        }
        if !position.is_finite() {
            return Err(PhysicsError::NonFiniteValue { context: "position" });
        }
        if !velocity.is_finite() {
            return Err(PhysicsError::NonFiniteValue { context: "velocity" });
        }
        shape.validate()?;
        Ok(Self { shape, mass, position, velocity })
    }

    /// Convenience: rectangle anchored at its top-left corner.
    pub fn rectangle(position: DVec2, size: DVec2, velocity: DVec2, mass: f64) -> Result<Self, PhysicsError> {
        Self::new(ShapeKind::Rectangle { width: size.x, height: size.y }, position, velocity, mass)
    }

    /// Convenience: circle anchored at the top-left of its bounding square.
    pub fn circle(position: DVec2, radius: f64, velocity: DVec2, mass: f64) -> Result<Self, PhysicsError> {
        Self::new(ShapeKind::Circle { radius }, position, velocity, mass)
    }

    /// Convenience: convex polygon with vertices relative to `position`.
    pub fn polygon(
        position: DVec2,
        vertices: Vec<DVec2>,
        velocity: DVec2,
        mass: f64,
    ) -> Result<Self, PhysicsError> {
        Self::new(ShapeKind::Polygon { vertices }, position, velocity, mass)
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn strategy(&self) -> Strategy {
        self.shape.strategy()
    }
}

/// Axis-aligned world-space extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

/// 1-D projection interval of a shape onto an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Inclusive overlap: touching endpoints count as overlapping.
    pub fn overlaps(self, other: AxisRange) -> bool {
        !(self.max < other.min || other.max < self.min)
    }
}

/// Side of body A facing body B in an axis-aligned contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Outward normal of A's side (+y points down, towards the floor).
    pub fn normal(self) -> DVec2 {
        match self {
            Side::Top => DVec2::new(0.0, -1.0),
            Side::Right => DVec2::new(1.0, 0.0),
            Side::Bottom => DVec2::new(0.0, 1.0),
            Side::Left => DVec2::new(-1.0, 0.0),
        }
    }
}

/// Resolution axis chosen for a colliding pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactAxis {
    /// Unit normal pointing from A towards B.
    pub normal: DVec2,
    /// Distance B must move along `normal` to stop overlapping A.
    pub depth: f64,
    /// Cardinal side of A for axis-aligned pairs; `None` for polygons.
    pub side: Option<Side>,
}

/// Arena and gravity settings threaded into every step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Downward acceleration magnitude (≥ 0).
    pub gravity: f64,
    /// Arena width; walls at x = 0 and x = width.
    pub width: f64,
    /// Arena height; ceiling at y = 0, floor at y = height.
    pub height: f64,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            width: 1024.0 / PIXELS_PER_METRE,
            height: 800.0 / PIXELS_PER_METRE,
            enable_timing: false,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() || !self.width.is_finite() || !self.height.is_finite() {
            return Err(PhysicsError::NonFiniteValue { context: "world config" });
        }
        if self.gravity < 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "gravity is a magnitude and must be >= 0",
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "arena width and height must be > 0",
            });
        }
        Ok(())
    }
}

/// Counters for one `simulate` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub bodies: usize,
    /// Pairs that reached the collision predicate.
    pub pairs_tested: usize,
    pub collisions: usize,
    pub resolved: usize,
    /// Contacts dropped because the pair was already separating.
    pub false_positives: usize,
    /// Polygon/box pairs, which have no collision path.
    pub unsupported_pairs: usize,
    pub wall_bounces: usize,
    pub floor_impacts: usize,
}

/// Timing breakdown for the last completed step.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepTiming {
    pub total_ms: f64,
    pub gravity_ms: f64,
    /// Boundary, collision and integration pass.
    pub bodies_ms: f64,
}
