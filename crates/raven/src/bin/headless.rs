//! # RAVEN Headless
//!
//! Runs the game without a window: enters the world, walks a scripted route
//! and logs streaming and culling numbers from a counting backend.
//!
//! ```bash
//! raven_headless --frames 1200 --config raven.toml
//! RUST_LOG=raven=debug raven_headless
//! ```

use raven::{Action, FrameInput, GameConfig, GameContext, MoveIntent, RavenError, RavenResult};
use raven::rendering::DrawCounter;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulated frame time (60 FPS).
const FRAME_DT: f32 = 1.0 / 60.0;

/// Aspect ratio of the imaginary screen.
const ASPECT: f32 = 16.0 / 9.0;

/// Frames run when `--frames` is not given.
const DEFAULT_FRAMES: u32 = 600;

struct Args {
    config: Option<String>,
    frames: u32,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> RavenResult<Args> {
    let mut parsed = Args {
        config: None,
        frames: DEFAULT_FRAMES,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| RavenError::InvalidArgument("--config needs a path".to_string()))?;
                parsed.config = Some(path);
            }
            "--frames" => {
                let value = args
                    .next()
                    .ok_or_else(|| RavenError::InvalidArgument("--frames needs a number".to_string()))?;
                parsed.frames = value
                    .parse()
                    .map_err(|_| RavenError::InvalidArgument(format!("bad frame count: {value}")))?;
            }
            other => return Err(RavenError::InvalidArgument(format!("unknown argument: {other}"))),
        }
    }

    Ok(parsed)
}

/// Input for frame `i` of the scripted walk.
fn scripted_input(i: u32, frames: u32) -> FrameInput {
    let mut input = FrameInput::moving(MoveIntent {
        sprint: (i / 120) % 2 == 1,
        ..MoveIntent::walk_forward()
    });

    // Slow turn so the route curves through new chunks.
    input.look_delta = [2.0, 0.0];

    if i == frames / 2 {
        input.actions.push(Action::IncreaseRenderDistance);
    }
    if i + 1 == frames {
        input.actions.push(Action::TeleportToSpawn);
    }
    input
}

fn run() -> RavenResult<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut game = GameContext::new(config)?;
    let mut backend = DrawCounter::new();

    game.frame(&FrameInput::action(Action::EnterGame), FRAME_DT, &mut backend, ASPECT);

    let mut generated = 0;
    let mut evicted = 0;
    for i in 0..args.frames {
        backend.reset();
        let report = game.frame(&scripted_input(i, args.frames), FRAME_DT, &mut backend, ASPECT);
        generated += report.streaming.loaded.len();
        evicted += report.streaming.unloaded.len();

        if i % 120 == 0 {
            let hud = game.hud();
            info!(
                frame = report.frame,
                x = hud.position[0],
                y = hud.position[1],
                z = hud.position[2],
                chunks = hud.loaded_chunks,
                rendered = report.render.chunks_rendered,
                culled = report.render.chunks_culled,
                cull_rate = report.render.cull_rate(),
                draw_calls = backend.draw_calls(),
                "Walk progress"
            );
        }
    }

    let stats = game.world().stats();
    info!(
        frames = args.frames,
        generated,
        evicted,
        session_generated = stats.generated_this_session,
        resident = game.world().loaded_chunk_count(),
        "Walk finished"
    );

    game.shutdown(&mut backend);
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raven=info")))
        .init();

    if let Err(err) = run() {
        error!(%err, "raven_headless failed");
        std::process::exit(1);
    }
}
