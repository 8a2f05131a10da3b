use crate::flock::Flock;
use macroquad::prelude::*;

const BOID_SIZE: f32 = 5.0;
const MIN_ALPHA: f32 = 0.25;

/// How far into the domain a depth lies, 0 at the back and 1 at the front
pub(crate) fn depth_fraction(depth: f32, extent: f32) -> f32 {
    (depth / extent).clamp(0.0, 1.0)
}

/// White, fading out towards the back of the domain
pub(crate) fn boid_color(fraction: f32) -> Color {
    Color::new(1.0, 1.0, 1.0, MIN_ALPHA + (1.0 - MIN_ALPHA) * fraction)
}

pub(crate) fn boid_size(fraction: f32) -> f32 {
    BOID_SIZE * (0.6 + 0.8 * fraction)
}

/// Draws every boid as a square centred on its position. Only reads the flock.
pub(crate) fn draw_flock(flock: &Flock) {
    let extent = flock.config().depth;
    for (idx, position) in flock.positions().enumerate() {
        let position: Vec3 = position.into();
        let fraction = depth_fraction(flock.depth(idx), extent);
        let size = boid_size(fraction);
        draw_rectangle(
            position.x - size / 2.0,
            position.y - size / 2.0,
            size,
            size,
            boid_color(fraction),
        );
    }
}

pub(crate) fn draw_status(flock: &Flock, seed: u64, paused: bool) {
    let mut status = format!("tick {}  boids {}  seed {}", flock.tick_count(), flock.len(), seed);
    if paused {
        status.push_str("  [paused]");
    }
    draw_text(&status, 10.0, 20.0, 20.0, GRAY);
}
