//! bonkfall: 2-D rigid-body collision and response benchmark core
//! (axis-aligned boxes/circles vs. SAT polygons, elastic impulses, gravity arena)

pub mod types;
pub mod error;
pub mod api;
pub mod geometry;
pub mod narrowphase;
pub mod contact;
pub mod response;
pub mod boundary;
pub mod world;
pub mod scene;

pub use crate::types::*;
pub use crate::error::PhysicsError;
pub use crate::api::*;
pub use crate::world::{PhysicsWorld, simulate};
pub use crate::scene::Scene;
