use crate::config::FlockConfig;
use crate::vector::Vector3D;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Boid {
    pub(crate) position: Vector3D,
    pub(crate) velocity: Vector3D,
}

/// What one boid sees of the rest of the flock during a tick.
/// Rebuilt from zero every tick, never carried over.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Survey {
    pub(crate) closeness: Vector3D,    // sum of (self - other) over boids inside the protected range
    pub(crate) avg_position: Vector3D, // summed, divided by neighbor_count when used
    pub(crate) avg_velocity: Vector3D,
    pub(crate) neighbor_count: usize, // boids inside the visible range
}

impl Boid {
    pub(crate) fn new(position: Vector3D, velocity: Vector3D) -> Boid {
        return Boid { position, velocity };
    }

    /// Random position anywhere in the domain, with a horizontal speed between the speed bounds
    pub(crate) fn random(config: &FlockConfig, rng: &mut impl Rng) -> Boid {
        let position = Vector3D::new(
            rng.gen_range(0.0..config.width),
            rng.gen_range(0.0..config.height),
            rng.gen_range(0.0..config.depth),
        );

        let speed = rng.gen_range(config.min_speed..=config.max_speed);
        let heading = rng.gen_range(0.0..=FRAC_PI_2);
        let x_sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let y_sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let depth_speed =
            rng.gen_range(-config.max_spawn_depth_speed..=config.max_spawn_depth_speed);
        let velocity = Vector3D::new(
            x_sign * speed * heading.cos(),
            y_sign * speed * heading.sin(),
            depth_speed,
        );

        return Boid::new(position, velocity);
    }

    pub(crate) fn distance_to(&self, other: &Boid) -> f32 {
        (self.position - other.position).length()
    }
}

/// Scans the whole snapshot for boid `target`. The boid is skipped by index, not by value,
/// so two boids sitting on the same spot still see each other.
pub(crate) fn survey(target: usize, snapshot: &[Boid], config: &FlockConfig) -> Survey {
    let me = &snapshot[target];
    let mut result = Survey::default();

    for (idx, other) in snapshot.iter().enumerate() {
        if idx == target {
            continue;
        }
        let dist = me.distance_to(other);

        if dist < config.protected_range {
            result.closeness += me.position - other.position;
        }
        if dist < config.visible_range {
            result.avg_position += other.position;
            result.avg_velocity += other.velocity;
            result.neighbor_count += 1;
        }
        // else, the other boid is too far away to affect this one
    }

    return result;
}

pub(crate) fn avoid_others(velocity: Vector3D, survey: &Survey, config: &FlockConfig) -> Vector3D {
    velocity + survey.closeness * config.avoid_factor
}

/// Steer towards the average heading and position of visible neighbors.
/// An isolated boid keeps its velocity.
pub(crate) fn follow_neighbors(
    boid: &Boid,
    velocity: Vector3D,
    survey: &Survey,
    config: &FlockConfig,
) -> Vector3D {
    if survey.neighbor_count == 0 {
        return velocity;
    }
    let count = survey.neighbor_count as f32;
    let avg_velocity = survey.avg_velocity / count;
    let avg_position = survey.avg_position / count;

    let mut velocity = velocity;
    velocity += (avg_velocity - velocity) * config.matching_factor;
    velocity += (avg_position - boid.position) * config.centering_factor;
    return velocity;
}

pub(crate) fn avoid_edges(position: Vector3D, velocity: Vector3D, config: &FlockConfig) -> Vector3D {
    let mut velocity = velocity;
    let turn = config.turn_factor;

    if position.x < config.margin {
        velocity.x += turn;
    }
    if position.x > config.width - config.margin {
        velocity.x -= turn;
    }
    if position.y < config.margin {
        velocity.y += turn;
    }
    if position.y > config.height - config.margin {
        velocity.y -= turn;
    }
    if position.z < config.margin {
        velocity.z += turn;
    }
    if position.z > config.depth - config.front_margin {
        velocity.z -= turn;
    }
    return velocity;
}

/// Rescales the (x, y) pair into the speed bounds. Depth speed is left alone,
/// and so is a boid with no horizontal speed at all.
pub(crate) fn constrain_speed(velocity: Vector3D, config: &FlockConfig) -> Vector3D {
    let speed = velocity.horizontal_length();
    if speed == 0.0 {
        return velocity;
    }

    let target_speed = if speed > config.max_speed {
        config.max_speed
    } else if speed < config.min_speed {
        config.min_speed
    } else {
        return velocity;
    };

    let scale = target_speed / speed;
    Vector3D::new(velocity.x * scale, velocity.y * scale, velocity.z)
}

pub(crate) fn flutter_depth(velocity: Vector3D, flutter: f32) -> Vector3D {
    Vector3D::new(velocity.x, velocity.y, velocity.z + flutter)
}

/// Draws one signed depth perturbation. Nothing is drawn when flutter is disabled.
pub(crate) fn draw_flutter(config: &FlockConfig, rng: &mut impl Rng) -> f32 {
    if !config.flutter_enabled() {
        return 0.0;
    }
    let magnitude = rng.gen_range(config.min_flutter..=config.max_flutter);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Hard clamp into the closed domain box. Velocity is not touched here.
pub(crate) fn constrain_position(position: Vector3D, config: &FlockConfig) -> Vector3D {
    Vector3D::new(
        position.x.clamp(0.0, config.width),
        position.y.clamp(0.0, config.height),
        position.z.clamp(0.0, config.depth),
    )
}

/// One boid's state transition for a tick. Each step reads the velocity left by the step before.
pub(crate) fn update(boid: &Boid, survey: &Survey, config: &FlockConfig, flutter: f32) -> Boid {
    let velocity = avoid_others(boid.velocity, survey, config);
    let velocity = follow_neighbors(boid, velocity, survey, config);
    let velocity = avoid_edges(boid.position, velocity, config);
    let velocity = constrain_speed(velocity, config);
    let velocity = flutter_depth(velocity, flutter);

    let position = constrain_position(boid.position + velocity, config);
    return Boid::new(position, velocity);
}
