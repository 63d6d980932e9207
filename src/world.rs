use glam::DVec2;
use log::{debug, info};

use std::time::Instant;

use crate::api::PhysicsWorldApi;
use crate::boundary;
use crate::contact::{self, Selection};
use crate::error::PhysicsError;
use crate::narrowphase::colliding;
use crate::response;
use crate::types::*;

/// Advance `bodies` by `dt` inside the arena described by `cfg`.
///
/// Bodies are processed in storage order and mutated in place; a body
/// changed by an earlier pair is seen in its changed state by later pairs
/// of the same step.
pub fn simulate(bodies: &mut [Body], cfg: &WorldConfig, dt: f64) {
    step_bodies(bodies, cfg, dt);
}

/// [`simulate`], returning what happened during the step.
pub fn step_bodies(bodies: &mut [Body], cfg: &WorldConfig, dt: f64) -> StepStats {
    apply_gravity(bodies, cfg.gravity, dt);
    body_pass(bodies, cfg, dt)
}

/// Pass 1: `velocity.y += gravity * dt` for every body.
pub fn apply_gravity(bodies: &mut [Body], gravity: f64, dt: f64) {
    for body in bodies.iter_mut() {
        body.velocity.y += gravity * dt;
    }
}

/// Pass 2: per body, boundary handling, pair resolution, then integration.
fn body_pass(bodies: &mut [Body], cfg: &WorldConfig, dt: f64) -> StepStats {
    let mut stats = StepStats { bodies: bodies.len(), ..Default::default() };

    for i in 0..bodies.len() {
        let report = boundary::handle(&mut bodies[i], cfg, dt);
        stats.wall_bounces += report.wall_bounces;
        if report.floor.is_some() {
            stats.floor_impacts += 1;
        }

        for j in 0..bodies.len() {
            if j == i {
                continue;
            }
            match (bodies[i].strategy(), bodies[j].strategy()) {
                // Boxes and circles: every ordered pair.
                (Strategy::Aabb, Strategy::Aabb) => collide_pair(bodies, i, j, cfg, &mut stats),
                // Polygons: each unordered pair once.
                (Strategy::Sat, Strategy::Sat) => {
                    if j > i {
                        collide_pair(bodies, i, j, cfg, &mut stats);
                    }
                }
                _ => {
                    if j > i {
                        stats.unsupported_pairs += 1;
                    }
                }
            }
        }

        integrate(&mut bodies[i], dt);
        boundary::contain(&mut bodies[i], cfg);
    }

    stats
}

/// Semi-implicit Euler position update (velocity already advanced).
pub fn integrate(body: &mut Body, dt: f64) {
    body.position += body.velocity * dt;
}

fn collide_pair(bodies: &mut [Body], i: usize, j: usize, cfg: &WorldConfig, stats: &mut StepStats) {
    stats.pairs_tested += 1;
    if !colliding(&bodies[i], &bodies[j]) {
        return;
    }
    stats.collisions += 1;

    match contact::select(&bodies[i], &bodies[j]) {
        Selection::Axis(axis) => {
            let (a, b) = pair_mut(bodies, i, j);
            response::resolve(a, b, &axis);
            boundary::contain(b, cfg);
            stats.resolved += 1;
        }
        Selection::FalsePositive(side) => {
            debug!("skipping separating pair ({i}, {j}) on {side:?}");
            stats.false_positives += 1;
        }
        // body_pass counts mixed pairs itself and never hands them over.
        Selection::Unsupported => unreachable!("mixed pair ({i}, {j}) reached collide_pair"),
    }
}

/// Two distinct mutable bodies out of one slice.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j, "pair_mut called with the same index {i}");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Arena owning its bodies and configuration.
pub struct PhysicsWorld {
    pub cfg: WorldConfig,
    pub step_counter: u64,

    bodies: Vec<Body>,
    last_stats: StepStats,

    // Timing for last step (optional)
    last_timing: Option<StepTiming>,
}

impl PhysicsWorldApi for PhysicsWorld {
    fn new(cfg: WorldConfig) -> Result<Self, PhysicsError> {
        cfg.validate()?;
        info!("arena {}x{} gravity {}", cfg.width, cfg.height, cfg.gravity);
        Ok(Self {
            cfg,
            step_counter: 0,
            bodies: Vec::new(),
            last_stats: StepStats::default(),
            last_timing: None,
        })
    }

    fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(body);
        id
    }

    fn body(&self, id: BodyId) -> Result<&Body, PhysicsError> {
        let count = self.bodies.len();
        self.bodies
            .get(id.0 as usize)
            .ok_or(PhysicsError::InvalidBodyId { index: id.0 as usize, count })
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body, PhysicsError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(id.0 as usize)
            .ok_or(PhysicsError::InvalidBodyId { index: id.0 as usize, count })
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn simulate(&mut self, dt: f64) {
        if self.cfg.enable_timing {
            let t_all = Instant::now();
            apply_gravity(&mut self.bodies, self.cfg.gravity, dt);
            let gravity_ms = t_all.elapsed().as_secs_f64() * 1000.0;
            let t_bodies = Instant::now();
            self.last_stats = body_pass(&mut self.bodies, &self.cfg, dt);
            self.last_timing = Some(StepTiming {
                total_ms: t_all.elapsed().as_secs_f64() * 1000.0,
                gravity_ms,
                bodies_ms: t_bodies.elapsed().as_secs_f64() * 1000.0,
            });
        } else {
            self.last_stats = step_bodies(&mut self.bodies, &self.cfg, dt);
        }
        self.step_counter = self.step_counter.wrapping_add(1);
    }

    fn colliding(&self, a: BodyId, b: BodyId) -> Result<bool, PhysicsError> {
        Ok(colliding(self.body(a)?, self.body(b)?))
    }

    fn contact_axis(&self, a: BodyId, b: BodyId) -> Result<Option<ContactAxis>, PhysicsError> {
        let (ba, bb) = (self.body(a)?, self.body(b)?);
        if !colliding(ba, bb) {
            return Ok(None);
        }
        match contact::select(ba, bb) {
            Selection::Axis(axis) => Ok(Some(axis)),
            Selection::FalsePositive(_) | Selection::Unsupported => Ok(None),
        }
    }
}

impl PhysicsWorld {
    /// Build a world and add `bodies` in order.
    pub fn with_bodies(cfg: WorldConfig, bodies: Vec<Body>) -> Result<Self, PhysicsError> {
        let mut world = <Self as PhysicsWorldApi>::new(cfg)?;
        world.bodies = bodies;
        Ok(world)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of bodies using each collision strategy: `(aabb, sat)`.
    pub fn strategy_counts(&self) -> (usize, usize) {
        let sat = self.bodies.iter().filter(|b| b.strategy() == Strategy::Sat).count();
        (self.bodies.len() - sat, sat)
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.iter().map(|b| b.velocity * b.mass()).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| 0.5 * b.mass() * b.velocity.length_squared()).sum()
    }

    /// Counters from the last `simulate` call.
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Return timing breakdown for the last `simulate` run.
    pub fn timing(&self) -> Option<StepTiming> {
        self.last_timing
    }
}
