//! JSON scene descriptions: arena settings plus an ordered body list.
//!
//! ```json
//! {
//!   "config": { "gravity": 9.82, "width": 12.8, "height": 10.0 },
//!   "bodies": [
//!     { "shape": { "kind": "rectangle", "width": 1.0, "height": 1.0 },
//!       "position": [1.0, 2.0], "velocity": [2.0, 0.0], "mass": 10.0 }
//!   ]
//! }
//! ```

use glam::DVec2;
use log::info;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::api::PhysicsWorldApi;
use crate::error::PhysicsError;
use crate::types::*;
use crate::world::PhysicsWorld;

/// One body as written in a scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneBody {
    pub shape: ShapeKind,
    pub position: DVec2,
    #[serde(default)]
    pub velocity: DVec2,
    pub mass: f64,
    /// Display colour for renderers; ignored by the physics core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<[u8; 4]>,
}

impl SceneBody {
    pub fn to_body(&self) -> Result<Body, PhysicsError> {
        Body::new(self.shape.clone(), self.position, self.velocity, self.mass)
    }
}

impl From<&Body> for SceneBody {
    fn from(body: &Body) -> Self {
        Self {
            shape: body.shape().clone(),
            position: body.position,
            velocity: body.velocity,
            mass: body.mass(),
            tint: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: WorldConfig,
    pub bodies: Vec<SceneBody>,
}

impl Scene {
    /// Parse and validate a scene.
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, PhysicsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let file = File::open(path.as_ref()).map_err(|e| PhysicsError::Io(e.to_string()))?;
        let scene: Scene = serde_json::from_reader(BufReader::new(file))?;
        scene.validate()?;
        info!("loaded scene {} ({} bodies)", path.as_ref().display(), scene.bodies.len());
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PhysicsError> {
        let file = File::create(path.as_ref()).map_err(|e| PhysicsError::Io(e.to_string()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Check the config and every body without building a world.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        self.config.validate()?;
        for body in &self.bodies {
            body.to_body()?;
        }
        Ok(())
    }

    /// Snapshot a world's current state.
    pub fn from_world(world: &PhysicsWorld) -> Self {
        Self {
            config: world.cfg.clone(),
            bodies: world.bodies().iter().map(SceneBody::from).collect(),
        }
    }

    /// Build a world with the bodies in file order.
    pub fn into_world(self) -> Result<PhysicsWorld, PhysicsError> {
        let bodies = self.bodies.iter().map(SceneBody::to_body).collect::<Result<Vec<_>, _>>()?;
        PhysicsWorld::with_bodies(self.config, bodies)
    }
}
