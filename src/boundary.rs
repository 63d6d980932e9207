//! Arena walls and the analytic floor bounce.
//!
//! Walls reflect the velocity component pointing out of the arena when the
//! body would cross them this step, and clamp the position back inside.
//! The floor instead solves `s = v₀t + ½gt²` for the time of contact within
//! the step and reflects the exact contact speed, so repeated bounces keep
//! their height regardless of the step size.

use log::trace;

use crate::types::*;

/// Gravity magnitudes at or below this are treated as zero.
const GRAVITY_EPSILON: f64 = 1e-12;

/// Exact floor contact within one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorImpact {
    /// Seconds from the start of the step until contact.
    pub time: f64,
    /// Downward speed at contact (reflected upwards afterwards).
    pub speed: f64,
}

/// What the boundary pass did to one body.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundaryReport {
    pub wall_bounces: usize,
    pub floor: Option<FloorImpact>,
}

/// Time `t ≥ 0` at which a body starting at velocity `v0` under constant
/// acceleration `accel` has covered distance `s`.
pub fn impact_time(v0: f64, accel: f64, s: f64) -> f64 {
    if accel <= GRAVITY_EPSILON {
        return if v0 > 0.0 { (s / v0).max(0.0) } else { 0.0 };
    }
    let disc = (v0 * v0 + 2.0 * accel * s).max(0.0);
    -(v0 - disc.sqrt()) / accel
}

/// Reflect off the left, right and top walls.
pub fn walls(body: &mut Body, cfg: &WorldConfig, dt: f64) -> usize {
    let mut bounces = 0;

    let left = body.left();
    if left + body.velocity.x * dt < 0.0 && body.velocity.x < 0.0 {
        body.velocity.x = -body.velocity.x;
        bounces += 1;
    }
    if left < 0.0 {
        body.position.x -= left;
    }

    let right = body.right();
    if right + body.velocity.x * dt > cfg.width && body.velocity.x > 0.0 {
        body.velocity.x = -body.velocity.x;
        bounces += 1;
    }
    if right > cfg.width {
        body.position.x -= right - cfg.width;
    }

    let top = body.top();
    if top + body.velocity.y * dt < 0.0 && body.velocity.y < 0.0 {
        body.velocity.y = -body.velocity.y;
        bounces += 1;
    }
    if top < 0.0 {
        body.position.y -= top;
    }

    bounces
}

/// Analytic floor bounce. Expects this step's gravity to be already applied
/// to `velocity.y`.
pub fn floor(body: &mut Body, cfg: &WorldConfig, dt: f64) -> Option<FloorImpact> {
    let bottom = body.bottom();
    if bottom + body.velocity.y * dt <= cfg.height {
        return None;
    }

    // Velocity at the start of the step and distance left to the floor.
    let v0 = body.velocity.y - cfg.gravity * dt;
    let s = cfg.height - bottom;
    let time = impact_time(v0, cfg.gravity, s);
    let speed = if cfg.gravity <= GRAVITY_EPSILON { v0 } else { v0 + cfg.gravity * time };

    body.velocity.y = -speed;
    body.position.y += cfg.height - bottom;
    trace!("floor impact t={time:.6} v={speed:.6}");
    Some(FloorImpact { time, speed })
}

/// Full boundary pass: walls first, then the floor.
pub fn handle(body: &mut Body, cfg: &WorldConfig, dt: f64) -> BoundaryReport {
    let wall_bounces = walls(body, cfg, dt);
    let floor = floor(body, cfg, dt);
    BoundaryReport { wall_bounces, floor }
}

/// Translate a body fully back inside the arena without touching its velocity.
pub fn contain(body: &mut Body, cfg: &WorldConfig) {
    let right = body.right();
    if right > cfg.width {
        body.position.x -= right - cfg.width;
    }
    let left = body.left();
    if left < 0.0 {
        body.position.x -= left;
    }
    let bottom = body.bottom();
    if bottom > cfg.height {
        body.position.y -= bottom - cfg.height;
    }
    let top = body.top();
    if top < 0.0 {
        body.position.y -= top;
    }
}
