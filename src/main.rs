//! Toro Snake headless driver
//!
//! Runs a level at the fixed frame rate with scripted input and logs what
//! happens. Useful for watching the simulation without a renderer attached:
//!
//! ```text
//! toro-snake [levels.json] [seed]
//! ```
//!
//! With no arguments a built-in demo level is used.

use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use toro_snake::consts::{END_GAME_TICKS, TICK_INTERVAL_MS, TURN_STEP};
use toro_snake::schema::{self, LevelSchema, ObstacleSpec, SnakeStart};
use toro_snake::{Level, LevelState};

/// Frames after which the driver gives up on an unfinished level
const MAX_FRAMES: u64 = 30_000;

fn demo_schema() -> LevelSchema {
    LevelSchema {
        name: "demo".into(),
        width: 400.0,
        height: 200.0,
        food_count: 5,
        snake_start: SnakeStart {
            x: 100.0,
            y: 100.0,
            angle: 0.0,
            speed: 2.0,
            length: 3,
        },
        obstacles: vec![ObstacleSpec {
            x: 380.0,
            y: 40.0,
            width: 40.0,
            height: 30.0,
        }],
    }
}

/// Scripted stand-in for key input: hold a turn for a stretch of frames,
/// alternating direction, so the snake wanders instead of circling.
fn scripted_turn(frame: u64) -> f64 {
    match frame % 80 {
        20..=28 => TURN_STEP,
        60..=64 => -TURN_STEP,
        _ => 0.0,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let schema = match args.first() {
        Some(path) => match schema::load_schemas(Path::new(path)) {
            Ok(mut schemas) if !schemas.is_empty() => schemas.remove(0),
            Ok(_) => {
                log::error!("{path} holds no levels");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => demo_schema(),
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_u64);

    log::info!(
        "playing '{}' ({}x{}, {} food), seed {seed}",
        schema.name,
        schema.width,
        schema.height,
        schema.food_count
    );

    let mut level = Level::new(schema, seed);
    let mut end_game_ticks = END_GAME_TICKS;
    let mut last_food_left = level.food_left();

    for frame in 0..MAX_FRAMES {
        if level.state().is_game_over() {
            // Cosmetic countdown before a real frontend would return to its
            // title screen
            end_game_ticks -= 1;
            if end_game_ticks == 0 {
                break;
            }
        } else {
            level.update(scripted_turn(frame));
            if level.food_left() != last_food_left {
                last_food_left = level.food_left();
                log::info!(
                    "frame {frame}: ate food, {} left, snake length {}",
                    last_food_left,
                    level.snake().len()
                );
            }
        }
        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }

    let head = level.snake().head().coordinates();
    log::info!(
        "finished: state {:?}, snake length {}, head at ({:.1}, {:.1}), 3d {}",
        level.state(),
        level.snake().len(),
        head.x(),
        head.y(),
        head.to_3d(0.0)
    );

    match level.state() {
        LevelState::Lost => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
