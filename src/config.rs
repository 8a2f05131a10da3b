use anyhow::{Context, Result};
use log::warn;
use std::env;

pub(crate) const SEED_VAR: &str = "BOIDS_SEED";
pub(crate) const FLOCK_SIZE_VAR: &str = "BOIDS_FLOCK_SIZE";

/// The named numeric parameters of a run. Fixed once the flock is spawned.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FlockConfig {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) depth: f32,
    pub(crate) flock_size: usize,
    pub(crate) min_speed: f32,
    pub(crate) max_speed: f32,
    pub(crate) margin: f32,       // how close to an edge a boid gets before turning back
    pub(crate) front_margin: f32, // the same, for the far depth boundary only
    pub(crate) turn_factor: f32,  // how hard a boid turns away from an edge
    pub(crate) protected_range: f32, // boids closer than this repel each other
    pub(crate) visible_range: f32,   // boids closer than this are followed
    pub(crate) avoid_factor: f32,
    pub(crate) matching_factor: f32,
    pub(crate) centering_factor: f32,
    pub(crate) min_flutter: f32,
    pub(crate) max_flutter: f32, // zero disables depth flutter
    pub(crate) max_spawn_depth_speed: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        FlockConfig {
            width: 1000.0,
            height: 800.0,
            // depth doubles as the alpha channel when drawn
            depth: 255.0,
            flock_size: 200,
            min_speed: 10.0,
            max_speed: 15.0,
            margin: 100.0,
            front_margin: 50.0,
            turn_factor: 2.0,
            protected_range: 10.0,
            visible_range: 50.0,
            avoid_factor: 0.1,
            matching_factor: 0.2,
            centering_factor: 0.005,
            min_flutter: 0.0,
            max_flutter: 0.5,
            max_spawn_depth_speed: 2.0,
        }
    }
}

impl FlockConfig {
    pub(crate) fn flutter_enabled(&self) -> bool {
        return self.max_flutter > 0.0;
    }
}

/// Runtime overrides read from the environment by the windowed binary.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) flock_size: Option<usize>,
}

impl Overrides {
    pub(crate) fn from_env() -> Result<Overrides> {
        Overrides::parse(env::var(SEED_VAR).ok(), env::var(FLOCK_SIZE_VAR).ok())
    }

    fn parse(seed: Option<String>, flock_size: Option<String>) -> Result<Overrides> {
        let seed = match seed {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_VAR, raw))?,
            ),
            None => None,
        };
        let flock_size = match flock_size {
            Some(raw) => Some(raw.trim().parse::<usize>().with_context(|| {
                format!("{} must be an unsigned integer, got {:?}", FLOCK_SIZE_VAR, raw)
            })?),
            None => None,
        };
        Ok(Overrides { seed, flock_size })
    }

    pub(crate) fn apply(&self, config: &mut FlockConfig) {
        if let Some(flock_size) = self.flock_size {
            if flock_size == 0 {
                warn!("{} is zero, the window will stay empty", FLOCK_SIZE_VAR);
            }
            config.flock_size = flock_size;
        }
    }
}
