//! # Game Context
//!
//! The one world object owned by the top-level loop. Each frame:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. Clamp dt, feed the FPS counter                            │
//! │ 2. Menu / Settings: screen transitions only                  │
//! │ 3. Game:                                                     │
//! │    ├─ Back → Menu (rest of the frame skipped)                │
//! │    ├─ Noclip toggle, mouse look, player update               │
//! │    ├─ Boundary push, teleport, render distance ±1            │
//! │    ├─ Streaming tick → release evicted chunks                │
//! │    └─ Render: sky, terrain pass, spawn hut, water            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use raven_procedural::{
    clamp_render_distance, ScatterPlacer, StreamingReport, WorldManager, WorldManagerConfig,
    WorldSeed,
};
use raven_rendering::{RenderBackend, RenderStats, Sky, TerrainPass, WaterPlane};
use tracing::{info, warn};

use crate::boundary::WorldBoundary;
use crate::config::GameConfig;
use crate::error::RavenResult;
use crate::hud::{FpsCounter, HudSnapshot};
use crate::player::{MoveIntent, Player};
use crate::spawn::SpawnHut;
use crate::state::{Action, GameState};

/// Longest frame step simulated at once (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;

/// Input gathered by the shell for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Discrete key presses, in order.
    pub actions: Vec<Action>,
    /// Held movement keys.
    pub movement: MoveIntent,
    /// Mouse movement since the last frame.
    pub look_delta: [f32; 2],
}

impl FrameInput {
    /// A frame with a single key press and nothing held.
    #[must_use]
    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            ..Self::default()
        }
    }

    /// A frame with held movement keys only.
    #[must_use]
    pub fn moving(movement: MoveIntent) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// State after the frame.
    pub state: GameState,
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Simulated step after clamping.
    pub dt: f32,
    /// Chunks generated and evicted.
    pub streaming: StreamingReport,
    /// Terrain pass and star counts; zero outside the world.
    pub render: RenderStats,
    /// Water plane submitted.
    pub water_drawn: bool,
}

/// Everything the running game owns.
pub struct GameContext {
    config: GameConfig,
    state: GameState,
    player: Player,
    world: WorldManager,
    sky: Sky,
    water: WaterPlane,
    spawn: SpawnHut,
    boundary: WorldBoundary,
    terrain_pass: TerrainPass,
    fps: FpsCounter,
    render_distance: i32,
    frame: u64,
    elapsed: f32,
}

impl GameContext {
    /// Builds the world and loads the chunks around the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: GameConfig) -> RavenResult<Self> {
        config.validate()?;

        let seed = WorldSeed::new(config.world.seed);
        let render_distance = clamp_render_distance(config.world.render_distance);
        let world_config = WorldManagerConfig {
            render_distance,
            ..WorldManagerConfig::production()
        };

        let mut world = WorldManager::new(seed, world_config);
        if config.world.vegetation {
            let placer = ScatterPlacer::new(world.generator());
            world = world.with_vegetation(Box::new(placer));
        }
        world.load_initial();

        let spawn = SpawnHut::default();
        let player = Player::looking_at(config.player, spawn.spawn_point(), spawn.position);

        info!(
            seed = seed.value(),
            render_distance,
            chunks = world.loaded_chunk_count(),
            vegetation = config.world.vegetation,
            "Game initialized"
        );

        Ok(Self {
            sky: Sky::new(seed, config.sky.to_sky_config()),
            water: WaterPlane::new(config.water.to_water_config()),
            boundary: WorldBoundary::new(config.boundary),
            terrain_pass: TerrainPass::new(),
            fps: FpsCounter::new(),
            state: GameState::Menu,
            player,
            world,
            spawn,
            render_distance,
            frame: 0,
            elapsed: 0.0,
            config,
        })
    }

    /// Current screen.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The streamed world.
    #[must_use]
    pub fn world(&self) -> &WorldManager {
        &self.world
    }

    /// The sky.
    #[must_use]
    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    /// The spawn hut.
    #[must_use]
    pub fn spawn(&self) -> &SpawnHut {
        &self.spawn
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current render distance, in chunks.
    #[must_use]
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Overlay readouts for the current frame.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        let position = self.player.position();
        HudSnapshot {
            fps: self.fps.average(),
            position,
            distance_from_spawn: self.spawn.distance_from(position),
            warning: self.boundary.warning(position, self.elapsed),
            loaded_chunks: self.world.loaded_chunk_count(),
            render_distance: self.render_distance,
            noclip: self.player.is_noclip(),
        }
    }

    /// Runs one frame: update, then render through `backend`.
    pub fn frame<B: RenderBackend + ?Sized>(
        &mut self,
        input: &FrameInput,
        dt: f32,
        backend: &mut B,
        aspect: f32,
    ) -> FrameReport {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            warn!(dt, "Non-finite frame time, simulating zero");
            0.0
        };

        self.frame += 1;
        self.elapsed += dt;
        self.fps.record_frame(dt);

        let mut report = FrameReport {
            frame: self.frame,
            dt,
            ..FrameReport::default()
        };

        if self.state.is_in_world() {
            self.update_world(input, dt, backend, aspect, &mut report);
        } else {
            for &action in &input.actions {
                self.state.apply(action);
            }
        }

        report.state = self.state;
        report
    }

    fn update_world<B: RenderBackend + ?Sized>(
        &mut self,
        input: &FrameInput,
        dt: f32,
        backend: &mut B,
        aspect: f32,
        report: &mut FrameReport,
    ) {
        if input.actions.contains(&Action::Back) {
            self.state.apply(Action::Back);
            return;
        }

        if input.actions.contains(&Action::ToggleNoclip) {
            self.player.toggle_noclip();
        }

        self.player.look(input.look_delta[0], input.look_delta[1]);
        self.player.update(&input.movement, dt, &self.world);

        let [dx, dz] = self.boundary.push(self.player.position(), dt);
        self.player.nudge(dx, dz);

        for &action in &input.actions {
            match action {
                Action::TeleportToSpawn => {
                    self.player.teleport(self.spawn.spawn_point());
                    info!("Teleported to spawn");
                }
                Action::IncreaseRenderDistance => self.set_render_distance(self.render_distance + 1),
                Action::DecreaseRenderDistance => self.set_render_distance(self.render_distance - 1),
                Action::EnterGame | Action::OpenSettings | Action::Back | Action::ToggleNoclip => {}
            }
        }

        report.streaming = self.world.tick(self.player.position(), self.render_distance);
        for &coord in &report.streaming.unloaded {
            backend.release_chunk(coord);
        }

        let eye = self.player.position();
        let camera = self.player.camera(self.config.camera.fov);

        report.render = RenderStats {
            stars_drawn: self.sky.render(eye, backend),
            ..RenderStats::default()
        };
        report
            .render
            .merge(&self.terrain_pass.render(&self.world, &camera, aspect, backend));
        self.spawn.render(backend);
        report.water_drawn = self.water.render(eye, backend);
    }

    fn set_render_distance(&mut self, requested: i32) {
        let next = clamp_render_distance(requested);
        if next != self.render_distance {
            info!(from = self.render_distance, to = next, "Render distance changed");
            self.render_distance = next;
        }
    }

    /// Releases every resident chunk through `backend`.
    ///
    /// Returns how many chunks were dropped.
    pub fn shutdown<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        for chunk in self.world.chunks() {
            backend.release_chunk(chunk.coord);
        }
        let count = self.world.clear();
        info!(frames = self.frame, released = count, "Game shut down");
        count
    }
}
