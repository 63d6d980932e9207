use bonkfall::*;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize)]
struct FramePoint {
    time: f64,
    fps: f64,
}

#[derive(Serialize)]
struct BenchRecord {
    strategy: &'static str,
    object_count: usize,
    points: Vec<FramePoint>,
}

fn random_rect(rng: &mut Pcg32, n: usize) -> Result<Body, PhysicsError> {
    let scale = 3.0 / (n as f64).sqrt();
    let min_side = 1.0 / PIXELS_PER_METRE;
    let size = DVec2::new(
        (scale * rng.random_range(0.5..1.0)).max(min_side),
        (scale * rng.random_range(0.5..1.0)).max(min_side),
    );
    let pos = DVec2::new(rng.random_range(1.0..5.0), rng.random_range(1.0..5.0));
    let vel = DVec2::new(rng.random_range(-1.0..2.0), rng.random_range(-1.0..2.0));
    Body::rectangle(pos, size, vel, rng.random_range(1.0..5.0))
}

// Convex: vertices on a circle at evenly spaced angles.
fn random_polygon(rng: &mut Pcg32, n: usize) -> Result<Body, PhysicsError> {
    let count = rng.random_range(3..=6);
    let radius = 0.5 * 10.0 * rng.random_range(0.5..1.0) / (n as f64).sqrt();
    let phase = rng.random_range(0.0..std::f64::consts::TAU);
    let vertices = (0..count)
        .map(|k| {
            let a = phase + std::f64::consts::TAU * k as f64 / count as f64;
            DVec2::new(radius * (1.0 + a.cos()), radius * (1.0 + a.sin()))
        })
        .collect();
    let pos = DVec2::new(rng.random_range(1.0..5.0), rng.random_range(1.0..5.0));
    let vel = DVec2::new(rng.random_range(-1.0..2.0), rng.random_range(-1.0..2.0));
    Body::polygon(pos, vertices, vel, rng.random_range(1.0..5.0))
}

fn build_world(strategy: Strategy, n: usize, seed: u64) -> Result<PhysicsWorld, PhysicsError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let bodies = (0..n)
        .map(|_| match strategy {
            Strategy::Aabb => random_rect(&mut rng, n),
            Strategy::Sat => random_polygon(&mut rng, n),
        })
        .collect::<Result<Vec<_>, _>>()?;
    PhysicsWorld::with_bodies(WorldConfig { enable_timing: true, ..WorldConfig::default() }, bodies)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let strategy = match args.first().map(String::as_str) {
        Some("sat") => Strategy::Sat,
        _ => Strategy::Aabb,
    };
    let n: usize = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(200);
    let frames: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(600);
    let dt = 1.0 / 60.0;

    let mut world = build_world(strategy, n, 0x5eed)?;
    let start = Instant::now();
    let mut points = Vec::with_capacity(frames);
    let mut resolved = 0usize;
    let mut false_positives = 0usize;
    for _ in 0..frames {
        let t0 = Instant::now();
        world.simulate(dt);
        let frame = t0.elapsed().as_secs_f64();
        let stats = world.last_stats();
        resolved += stats.resolved;
        false_positives += stats.false_positives;
        points.push(FramePoint {
            time: start.elapsed().as_secs_f64(),
            fps: if frame > 0.0 { 1.0 / frame } else { f64::INFINITY },
        });
    }
    let mean_step_ms = start.elapsed().as_secs_f64() * 1000.0 / frames.max(1) as f64;
    eprintln!(
        "strategy={:?} N={} frames={} mean_step={:.3}ms resolved={} false_positives={} energy={:.3}",
        strategy,
        n,
        frames,
        mean_step_ms,
        resolved,
        false_positives,
        world.kinetic_energy()
    );

    let record = BenchRecord {
        strategy: match strategy {
            Strategy::Aabb => "aabb",
            Strategy::Sat => "sat",
        },
        object_count: n,
        points,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
