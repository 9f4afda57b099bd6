//! Render passes and their statistics.

mod stats;
mod terrain_pass;

pub use stats::RenderStats;
pub use terrain_pass::{TerrainPass, GRASS_TINT, VEGETATION_DRAW_DISTANCE};
