mod boids;
mod config;
mod flock;
mod render;
mod validate;
mod vector;

use crate::config::{FlockConfig, Overrides};
use crate::flock::Flock;
use anyhow::Result;
use log::{error, info, warn};
use macroquad::prelude::{clear_background, is_key_pressed, next_frame, Conf, KeyCode, BLACK};
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

fn window_conf() -> Conf {
    let config = FlockConfig::default();
    Conf {
        window_title: "Boids".to_owned(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let overrides = Overrides::from_env()?;
    let mut config = FlockConfig::default();
    overrides.apply(&mut config);

    let seed = overrides.seed.unwrap_or_else(|| thread_rng().next_u64());
    info!("seed {} (set {} to replay this run)", seed, crate::config::SEED_VAR);

    let mut flock = Flock::spawn(config, StdRng::seed_from_u64(seed))?;
    if flock.is_empty() {
        warn!("flock is empty, nothing to draw");
    }

    let mut paused = false;
    loop {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }
        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::P) {
            paused = !paused;
            info!("paused: {}", paused);
        }
        if is_key_pressed(KeyCode::R) {
            flock.respawn();
        }

        if !paused {
            flock.tick();
        }

        clear_background(BLACK);
        render::draw_flock(&flock);
        render::draw_status(&flock, seed, paused);

        // vsync paces the loop
        next_frame().await;
    }

    info!("stopped after {} ticks", flock.tick_count());
    Ok(())
}
