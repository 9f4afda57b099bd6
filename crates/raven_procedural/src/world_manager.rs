//! # World Manager
//!
//! Streams chunks in and out around the player.
//!
//! ## Footprints
//!
//! - **Load**: a square of `(2 * rd + 1)^2` chunks centered on the player's chunk.
//! - **Unload**: a circle of radius `(rd + 2) * 31` around the player,
//!   measured to each chunk's center.
//!
//! The square's corners reach past the circle once `rd >= 4`. Chunks inside
//! the current load square are therefore never evicted; everything outside
//! it is evicted as soon as its center leaves the circle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut world = WorldManager::new(WorldSeed::default(), WorldManagerConfig::production());
//! world.ensure_loaded_around(0.0, 0.0, 3);
//!
//! // Every frame
//! let report = world.tick(player_pos, render_distance);
//! for coord in &report.unloaded {
//!     renderer.release_chunk(*coord);
//! }
//! let ground = world.height_at(player_pos[0], player_pos[2]);
//! ```

use tracing::{debug, info};

use crate::chunk::{Chunk, ChunkCoord, CHUNK_STRIDE, HEIGHT_SCALE};
use crate::height::{sample_chunk, HeightSource};
use crate::noise::WorldSeed;
use crate::store::{ChunkState, ChunkStore};
use crate::terrain::ChunkGenerator;
use crate::vegetation::{NoVegetation, VegetationPlacer};

/// Smallest allowed render distance (in chunks).
pub const MIN_RENDER_DISTANCE: i32 = 2;

/// Largest allowed render distance (in chunks).
pub const MAX_RENDER_DISTANCE: i32 = 10;

/// Clamps a render distance into the supported range.
#[inline]
#[must_use]
pub fn clamp_render_distance(render_distance: i32) -> i32 {
    render_distance.clamp(MIN_RENDER_DISTANCE, MAX_RENDER_DISTANCE)
}

/// Configuration for the world manager.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldManagerConfig {
    /// Render distance used for the initial load.
    pub render_distance: i32,
    /// Extra chunks beyond the render distance before a chunk is evicted.
    pub unload_margin: i32,
}

impl WorldManagerConfig {
    /// Configuration used by the game.
    #[must_use]
    pub fn production() -> Self {
        Self {
            render_distance: 3,
            unload_margin: 2,
        }
    }

    /// Small footprint for tests.
    #[must_use]
    pub fn test() -> Self {
        Self {
            render_distance: MIN_RENDER_DISTANCE,
            unload_margin: 2,
        }
    }

    /// Eviction radius in world units for a render distance.
    #[inline]
    #[must_use]
    pub fn unload_distance(&self, render_distance: i32) -> f32 {
        ((render_distance + self.unload_margin) * CHUNK_STRIDE) as f32
    }
}

impl Default for WorldManagerConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// Streaming statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks currently resident.
    pub loaded_chunks: usize,
    /// Chunks generated since the manager was created.
    pub generated_this_session: u64,
    /// Chunks evicted since the manager was created.
    pub unloaded_this_session: u64,
}

/// What a single streaming tick changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Coordinates generated this tick.
    pub loaded: Vec<ChunkCoord>,
    /// Coordinates evicted this tick (sorted).
    pub unloaded: Vec<ChunkCoord>,
}

impl StreamingReport {
    /// Returns true if nothing changed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Streaming controller: owns the chunk store, the generator and the
/// vegetation placer.
pub struct WorldManager {
    generator: ChunkGenerator,
    store: ChunkStore,
    config: WorldManagerConfig,
    stats: WorldStats,
    vegetation: Box<dyn VegetationPlacer>,
}

impl WorldManager {
    /// Creates a world manager with no vegetation.
    #[must_use]
    pub fn new(seed: WorldSeed, config: WorldManagerConfig) -> Self {
        let side = (2 * MAX_RENDER_DISTANCE + 1) as usize;
        Self {
            generator: ChunkGenerator::new(seed),
            store: ChunkStore::with_capacity(side * side),
            config,
            stats: WorldStats::default(),
            vegetation: Box::new(NoVegetation),
        }
    }

    /// Replaces the vegetation placer.
    ///
    /// Only affects chunks generated afterwards.
    #[must_use]
    pub fn with_vegetation(mut self, placer: Box<dyn VegetationPlacer>) -> Self {
        self.vegetation = placer;
        self
    }

    /// Returns the chunk generator.
    #[inline]
    #[must_use]
    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldManagerConfig {
        &self.config
    }

    /// Returns streaming statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.store.len(),
            ..self.stats
        }
    }

    /// Number of resident chunks.
    #[inline]
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.store.len()
    }

    /// Residency state of a coordinate.
    #[must_use]
    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        self.store.state(coord)
    }

    /// Looks up a resident chunk.
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.store.get(coord)
    }

    /// Iterates over resident chunks in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.store.iter()
    }

    /// Generates the chunk if it is not resident.
    ///
    /// Returns true if a chunk was generated. Idempotent.
    pub fn ensure_loaded(&mut self, coord: ChunkCoord) -> bool {
        if self.store.contains(coord) {
            return false;
        }

        let mut chunk = self.generator.generate(coord);
        let vegetation = self.vegetation.place(&chunk);
        chunk.set_vegetation(vegetation);

        self.store.insert(chunk);
        self.stats.generated_this_session += 1;
        true
    }

    /// Loads the full square of chunks around a world position.
    ///
    /// Returns the coordinates that were generated.
    pub fn ensure_loaded_around(&mut self, wx: f32, wz: f32, render_distance: i32) -> Vec<ChunkCoord> {
        let rd = clamp_render_distance(render_distance);
        let center = ChunkCoord::from_world_pos(wx, wz);
        let mut loaded = Vec::new();

        for dx in -rd..=rd {
            for dz in -rd..=rd {
                let coord = center.offset(dx, dz);
                if self.ensure_loaded(coord) {
                    loaded.push(coord);
                }
            }
        }

        if !loaded.is_empty() {
            debug!(
                count = loaded.len(),
                center_x = center.x,
                center_z = center.z,
                "Generated chunks"
            );
        }

        loaded
    }

    /// Loads the square around chunk (0, 0) at the configured render distance.
    pub fn load_initial(&mut self) -> Vec<ChunkCoord> {
        let rd = self.config.render_distance;
        let loaded = self.ensure_loaded_around(0.0, 0.0, rd);
        info!(count = loaded.len(), render_distance = rd, "Initial world loaded");
        loaded
    }

    /// Runs one streaming step for a player position.
    ///
    /// Loads every missing chunk of the square around the player, then
    /// evicts every chunk outside that square whose center is farther than
    /// the unload distance.
    pub fn tick(&mut self, player_pos: [f32; 3], render_distance: i32) -> StreamingReport {
        let rd = clamp_render_distance(render_distance);
        let loaded = self.ensure_loaded_around(player_pos[0], player_pos[2], rd);

        let player_chunk = ChunkCoord::from_world_pos(player_pos[0], player_pos[2]);
        let unload_distance = self.config.unload_distance(rd);

        let mut unloaded: Vec<ChunkCoord> = self
            .store
            .iter()
            .map(|chunk| chunk.coord)
            // Keeps the load square resident, so a diagonal chunk may outlive the eviction radius.
            .filter(|coord| coord.chebyshev_distance(player_chunk) > rd)
            .filter(|coord| distance(player_pos, coord.center()) > unload_distance)
            .collect();
        unloaded.sort_unstable();

        for coord in &unloaded {
            self.store.remove(*coord);
        }
        self.stats.unloaded_this_session += unloaded.len() as u64;

        if !unloaded.is_empty() {
            debug!(
                count = unloaded.len(),
                resident = self.store.len(),
                "Evicted chunks"
            );
        }

        StreamingReport { loaded, unloaded }
    }

    /// Drops every resident chunk. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.store.clear();
        info!(count, "Released all chunks");
        count
    }

    /// Ground height in render space at a world position.
    ///
    /// Interpolates the owning chunk when it is resident, otherwise falls
    /// back to the estimate recipe.
    #[must_use]
    pub fn height_at(&self, wx: f32, wz: f32) -> f32 {
        let coord = ChunkCoord::from_world_pos(wx, wz);
        match self.store.get(coord) {
            Some(chunk) => sample_chunk(chunk, wx, wz),
            None => self.generator.estimate_height(wx, wz) * HEIGHT_SCALE,
        }
    }
}

impl HeightSource for WorldManager {
    #[inline]
    fn height_at(&self, wx: f32, wz: f32) -> f32 {
        WorldManager::height_at(self, wx, wz)
    }
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
