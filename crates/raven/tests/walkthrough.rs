//! # Walkthrough Tests
//!
//! Drives `GameContext` frame by frame the way the windowed shell does and
//! checks what reaches the backend.

use raven::procedural::{ChunkCoord, ChunkState, CHUNK_STRIDE};
use raven::rendering::DrawCounter;
use raven::{Action, FrameInput, GameConfig, GameContext, GameState, MoveIntent};

const DT: f32 = 1.0 / 60.0;
const ASPECT: f32 = 16.0 / 9.0;

fn start(config: GameConfig) -> (GameContext, DrawCounter) {
    let mut game = GameContext::new(config).expect("valid config");
    let mut backend = DrawCounter::new();
    let report = game.frame(&FrameInput::action(Action::EnterGame), DT, &mut backend, ASPECT);
    assert_eq!(report.state, GameState::Game);
    (game, backend)
}

fn small_world() -> GameConfig {
    let mut config = GameConfig::default();
    config.world.seed = 7;
    config.world.render_distance = 2;
    config
}

/// Test: the player settles on the terrain after spawning in the air.
#[test]
fn test_spawn_settles_on_ground() {
    let (mut game, mut backend) = start(small_world());

    for _ in 0..180 {
        game.frame(&FrameInput::default(), DT, &mut backend, ASPECT);
    }

    let p = game.player().position();
    let ground = game.world().height_at(p[0], p[2]);
    assert!(game.player().is_grounded());
    assert!((p[1] - (ground + 1.7)).abs() < 1e-3);
}

/// Test: walking keeps the square around the player resident.
#[test]
fn test_walk_streams_chunks() {
    let (mut game, mut backend) = start(small_world());
    let rd = game.render_distance();
    let mut evicted = 0;

    // 0.1 s steps at sprint speed: 0.8 units per frame.
    let sprint = MoveIntent {
        sprint: true,
        ..MoveIntent::walk_forward()
    };
    for _ in 0..400 {
        let report = game.frame(&FrameInput::moving(sprint), 0.1, &mut backend, ASPECT);
        evicted += report.streaming.unloaded.len();

        let p = game.player().position();
        let center = ChunkCoord::from_world_pos(p[0], p[2]);
        for dx in -rd..=rd {
            for dz in -rd..=rd {
                assert_eq!(
                    game.world().chunk_state(center.offset(dx, dz)),
                    ChunkState::Loaded
                );
            }
        }
    }

    // 320 units walked, more than ten chunks.
    let travelled = game.player().position();
    assert!(travelled[0].hypot(travelled[2] + 30.0) > 10.0 * CHUNK_STRIDE as f32 * 0.9);
    assert!(evicted > 0);
    assert_eq!(backend.released as usize, evicted);
}

/// Test: each frame in the world draws the sky, the hut and the visible terrain.
#[test]
fn test_frame_draw_calls() {
    let (mut game, mut backend) = start(small_world());
    backend.reset();

    let report = game.frame(&FrameInput::default(), DT, &mut backend, ASPECT);

    // 16 rings × 32 slices × 2 triangles.
    assert_eq!(backend.sky_triangles, 1024);
    assert_eq!(backend.boxes, 1);
    assert_eq!(backend.water_planes, 0);
    assert!(!report.water_drawn);
    assert!(report.render.chunks_rendered > 0);
    assert_eq!(backend.chunks, report.render.chunks_rendered);
}

/// Test: optional layers reach the backend when enabled.
#[test]
fn test_vegetation_and_water_enabled() {
    let mut config = small_world();
    config.world.vegetation = true;
    config.water.enabled = true;
    let (mut game, mut backend) = start(config);

    let with_grass = game.world().chunks().filter(|c| !c.vegetation().is_empty()).count();
    assert!(with_grass > 0);

    backend.reset();
    let report = game.frame(&FrameInput::default(), DT, &mut backend, ASPECT);
    assert!(report.water_drawn);
    assert_eq!(backend.water_planes, 1);
    assert_eq!(backend.vegetation, report.render.vegetation_drawn);
}

/// Test: the same seed and inputs give the same world and position.
#[test]
fn test_deterministic_replay() {
    let script: Vec<FrameInput> = (0..120)
        .map(|i| FrameInput {
            actions: Vec::new(),
            movement: MoveIntent {
                right: i % 3 == 0,
                ..MoveIntent::walk_forward()
            },
            look_delta: [3.0, -1.0],
        })
        .collect();

    let run = || {
        let (mut game, mut backend) = start(small_world());
        for input in &script {
            game.frame(input, DT, &mut backend, ASPECT);
        }
        let mut coords: Vec<ChunkCoord> = game.world().chunks().map(|c| c.coord).collect();
        coords.sort_unstable();
        (game.player().position(), coords)
    };

    assert_eq!(run(), run());
}

/// Test: menu → settings → menu → game → menu round trip.
#[test]
fn test_screen_round_trip() {
    let mut game = GameContext::new(small_world()).expect("valid config");
    let mut backend = DrawCounter::new();

    let steps = [
        (Action::OpenSettings, GameState::Settings),
        (Action::EnterGame, GameState::Settings),
        (Action::Back, GameState::Menu),
        (Action::EnterGame, GameState::Game),
        (Action::Back, GameState::Menu),
    ];
    for (action, expected) in steps {
        let report = game.frame(&FrameInput::action(action), DT, &mut backend, ASPECT);
        assert_eq!(report.state, expected, "after {action:?}");
    }

    assert!(!game.state().cursor_captured());
    assert_eq!(backend.draw_calls(), 0);
}

/// Test: config loaded from TOML drives the context.
#[test]
fn test_context_from_toml() {
    let config = GameConfig::from_toml_str(
        r#"
        [world]
        seed = 99
        render_distance = 3

        [camera]
        fov = 60.0
        "#,
    )
    .expect("valid config");

    let game = GameContext::new(config).expect("valid config");
    assert_eq!(game.render_distance(), 3);
    assert_eq!(game.world().loaded_chunk_count(), 49);
    assert_eq!(game.config().camera.fov, 60.0);
}
