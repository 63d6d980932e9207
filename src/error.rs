//! Error type for body/config construction and scene parsing.
//!
//! The step loop never fails; everything that can go wrong is rejected
//! up front so no NaN/∞ ever reaches `simulate`.

use core::fmt;

/// Unified error type for the physics core.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// Mass must be strictly positive (it divides the impulse formulas).
    NonPositiveMass {
        /// The rejected mass
        mass: f64,
    },
    /// A polygon needs at least three vertices.
    TooFewVertices {
        /// Number of vertices supplied
        count: usize,
    },
    /// Zero-sized or otherwise unusable shape.
    DegenerateShape {
        /// What is wrong with it
        reason: &'static str,
    },
    /// NaN or infinity where a finite number is required.
    NonFiniteValue {
        /// Where it was found
        context: &'static str,
    },
    /// Invalid world configuration parameter.
    InvalidConfiguration {
        /// Description of the invalid configuration
        reason: &'static str,
    },
    /// Body id does not refer to a body of this world.
    InvalidBodyId {
        /// The id that was provided
        index: usize,
        /// Current number of bodies
        count: usize,
    },
    /// Scene JSON could not be parsed.
    SceneFormat(String),
    /// Reading or writing a scene file failed.
    Io(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { mass } => write!(f, "mass must be > 0 (got {mass})"),
            Self::TooFewVertices { count } => {
                write!(f, "polygon needs at least 3 vertices (got {count})")
            }
            Self::DegenerateShape { reason } => write!(f, "degenerate shape: {reason}"),
            Self::NonFiniteValue { context } => write!(f, "non-finite value in {context}"),
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::InvalidBodyId { index, count } => {
                write!(f, "body id {index} out of range (count={count})")
            }
            Self::SceneFormat(msg) => write!(f, "scene format error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

impl From<serde_json::Error> for PhysicsError {
    fn from(err: serde_json::Error) -> Self {
        Self::SceneFormat(err.to_string())
    }
}
