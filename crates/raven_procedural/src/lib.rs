//! # RAVEN Procedural Terrain
//!
//! Deterministic terrain generation and chunk streaming for an endless,
//! reproducible world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same terrain
//! 2. **Chunked**: The world is generated in 32x32-sample tiles
//! 3. **Seamless**: Neighbouring chunks share their border samples exactly
//! 4. **Streamable**: Chunks are generated and discarded around the player
//!
//! ## Core Components
//!
//! - `NoiseField`: 2D Perlin noise
//! - `PathField`: Walkable path network
//! - `ChunkGenerator`: Produces chunks (grids + mesh) from noise
//! - `WorldManager`: Chunk store, streaming and height queries
//! - `VegetationPlacer`: Optional per-chunk vegetation
//!
//! ## Example
//!
//! ```rust,ignore
//! use raven_procedural::{WorldManager, WorldManagerConfig, WorldSeed};
//!
//! let mut world = WorldManager::new(WorldSeed::new(12345), WorldManagerConfig::production());
//!
//! // Player at position (100, 20, 200)
//! let report = world.tick([100.0, 20.0, 200.0], 3);
//! assert_eq!(report.loaded.len(), 49);
//!
//! let ground = world.height_at(100.0, 200.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod height;
pub mod mesh;
pub mod noise;
pub mod path;
pub mod store;
pub mod terrain;
pub mod vegetation;
pub mod world_manager;

pub use chunk::{Chunk, ChunkCoord, SampleGrid, CHUNK_SIZE, CHUNK_STRIDE, HEIGHT_SCALE};
pub use height::{FlatGround, HeightSource};
pub use mesh::{TerrainMesh, TerrainVertex};
pub use noise::{NoiseField, WorldSeed};
pub use path::PathField;
pub use store::{ChunkState, ChunkStore};
pub use terrain::{ChunkGenerator, HeightRecipe};
pub use vegetation::{NoVegetation, ScatterPlacer, VegetationInstance, VegetationKind, VegetationPlacer};
pub use world_manager::{
    clamp_render_distance, StreamingReport, WorldManager, WorldManagerConfig, WorldStats,
    MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE,
};
