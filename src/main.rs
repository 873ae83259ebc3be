//! Park Dash entry point
//!
//! Headless driver: runs the simulation at a fixed timestep with a simple
//! autopilot on the keyboard, logging what a renderer would be told.
//!
//! Usage: `park-dash [--seed N] [--seconds S] [--tuning path.json]`

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use park_dash::consts::{MAX_SUBSTEPS, SIM_DT};
use park_dash::input::Direction;
use park_dash::sim::{EntityKind, GameEvent, Registry, Scene, Session};
use park_dash::{InputState, Tuning};

/// Simulated display refresh (frames per second)
const FRAME_RATE: f32 = 30.0;

#[derive(Parser)]
#[command(name = "park-dash")]
#[command(about = "Run a headless Park Dash session on autopilot")]
struct Args {
    /// Seed for the deterministic RNG
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// JSON file overriding the default tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
}

/// Steer toward the nearest powerup, away from the nearest hazard if close
fn autopilot(registry: &Registry) -> Vec2 {
    let Some(player) = registry.player() else {
        return Vec2::ZERO;
    };
    let nearest = |kind| {
        registry
            .iter_live(Some(kind))
            .map(|e| e.pos - player.pos)
            .min_by(|a, b| {
                a.length()
                    .partial_cmp(&b.length())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    };

    let mut steer = nearest(EntityKind::Powerup).unwrap_or(Vec2::ZERO);
    if let Some(threat) = nearest(EntityKind::Hazard) {
        if threat.length() < 90.0 {
            steer = -threat;
        }
    }
    steer
}

/// Translate a steering vector into key presses so the input layer is exercised
fn press_keys(input: &mut InputState, steer: Vec2) {
    for dir in [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ] {
        input.key_up(dir);
    }
    if steer.x > 8.0 {
        input.key_down(Direction::Right);
    } else if steer.x < -8.0 {
        input.key_down(Direction::Left);
    }
    if steer.y > 8.0 {
        input.key_down(Direction::Down);
    } else if steer.y < -8.0 {
        input.key_down(Direction::Up);
    }
}

fn report(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::ItemCollected { item, delta, .. } => {
                log::info!("Collected {:?} ({:+})", item, delta)
            }
            GameEvent::LifeLost { lives_left } => log::info!("Ouch! {} lives left", lives_left),
            GameEvent::SceneChanged { to, .. } => log::info!("Switch scene to {}", to.name()),
            GameEvent::MusicStarted => log::info!("Music on"),
            GameEvent::MusicStopped => log::info!("Music off"),
            other => log::trace!("{:?}", other),
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Park Dash (headless) starting...");

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(args.seed, tuning);
    let mut input = InputState::new();
    let frame_dt = 1.0 / FRAME_RATE;
    let frames = (args.seconds * FRAME_RATE) as u32;
    let mut accumulator = 0.0;
    let mut games = 0u32;

    // Title screen: any key starts
    input.any_key();

    for _ in 0..frames {
        accumulator += frame_dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if session.scene() == Scene::Main {
                press_keys(&mut input, autopilot(session.registry()));
            }
            let tick_input = input.take_tick_input();
            let before = session.scene();
            session.tick(&tick_input, SIM_DT);
            if before != Scene::Main && session.scene() == Scene::Main {
                games += 1;
            }
            accumulator -= SIM_DT;
            substeps += 1;
            report(session.drain_events());

            if session.scene() == Scene::GameOver {
                // Tap to play again
                input.any_key();
            }
        }
    }

    let hud = session.hud();
    log::info!("Played {} game(s)", games);
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}
