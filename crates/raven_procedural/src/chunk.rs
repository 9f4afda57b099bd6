//! # Chunk System
//!
//! The terrain is organized into square chunks for:
//! - Memory efficiency (only chunks near the player are resident)
//! - Fast streaming (generate/discard on demand)
//! - Bounded draw calls (one mesh per chunk, culled as a unit)
//!
//! ## Chunk Layout
//!
//! A chunk holds a 32x32 grid of samples spanning 31x31 world units.
//! Neighbouring chunks are generated with a stride of 31, so the last
//! sample row of one chunk and the first row of the next sit on the same
//! world coordinates. The shared border is what makes the terrain seamless.

use crate::mesh::TerrainMesh;
use crate::vegetation::VegetationInstance;

/// Samples per chunk side.
pub const CHUNK_SIZE: usize = 32;

/// World units between a chunk's first and last sample (and between chunk origins).
pub const CHUNK_STRIDE: i32 = CHUNK_SIZE as i32 - 1;

/// Scale from stored sample height to render-space height.
pub const HEIGHT_SCALE: f32 = 5.0;

/// Height of the reference point used when measuring distance to a chunk.
pub const CHUNK_CENTER_HEIGHT: f32 = 15.0;

/// Square grid of per-sample values, indexed as `[z][x]`.
pub type SampleGrid = [[f32; CHUNK_SIZE]; CHUNK_SIZE];

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not world units).
    pub x: i32,
    /// Z coordinate (in chunks, not world units).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts a world position to the coordinate of the chunk that owns it.
    #[inline]
    #[must_use]
    pub fn from_world_pos(world_x: f32, world_z: f32) -> Self {
        let stride = CHUNK_STRIDE as f32;
        Self {
            x: (world_x / stride).floor() as i32,
            z: (world_z / stride).floor() as i32,
        }
    }

    /// Returns the world X coordinate of the chunk's origin (corner).
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x * CHUNK_STRIDE
    }

    /// Returns the world Z coordinate of the chunk's origin.
    #[inline]
    #[must_use]
    pub const fn world_z(self) -> i32 {
        self.z * CHUNK_STRIDE
    }

    /// Returns the world-space origin the chunk mesh is drawn at.
    #[inline]
    #[must_use]
    pub fn origin(self) -> [f32; 3] {
        [self.world_x() as f32, 0.0, self.world_z() as f32]
    }

    /// Returns the reference center used for unload distance checks.
    ///
    /// Uses the integer half-stride (15), at a fixed height of 15.0.
    #[inline]
    #[must_use]
    pub fn center(self) -> [f32; 3] {
        let half = CHUNK_STRIDE / 2;
        [
            (self.world_x() + half) as f32,
            CHUNK_CENTER_HEIGHT,
            (self.world_z() + half) as f32,
        ]
    }

    /// Returns this coordinate shifted by a chunk offset.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Chebyshev (chessboard) distance between two coordinates, in chunks.
    #[inline]
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// One square tile of generated terrain.
///
/// Owns its sample grids and its mesh buffers; dropping the chunk releases both.
pub struct Chunk {
    /// Chunk position in the world.
    pub coord: ChunkCoord,
    /// Smoothed height samples (unscaled).
    heights: Box<SampleGrid>,
    /// Moisture samples in [0, 1].
    moisture: Box<SampleGrid>,
    /// Path blend factor samples in [0, 1].
    path_influence: Box<SampleGrid>,
    /// Renderable mesh built from the grids.
    mesh: TerrainMesh,
    /// Vegetation placed on this chunk (empty unless a placer is enabled).
    vegetation: Vec<VegetationInstance>,
}

impl Chunk {
    /// Assembles a chunk from generated grids and its mesh.
    #[must_use]
    pub fn new(
        coord: ChunkCoord,
        heights: Box<SampleGrid>,
        moisture: Box<SampleGrid>,
        path_influence: Box<SampleGrid>,
        mesh: TerrainMesh,
    ) -> Self {
        Self {
            coord,
            heights,
            moisture,
            path_influence,
            mesh,
            vegetation: Vec::new(),
        }
    }

    /// Gets the stored height at a local sample.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not below `CHUNK_SIZE`.
    #[inline]
    #[must_use]
    pub fn height(&self, x: usize, z: usize) -> f32 {
        self.heights[z][x]
    }

    /// Gets the moisture at a local sample.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not below `CHUNK_SIZE`.
    #[inline]
    #[must_use]
    pub fn moisture(&self, x: usize, z: usize) -> f32 {
        self.moisture[z][x]
    }

    /// Gets the path influence at a local sample.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not below `CHUNK_SIZE`.
    #[inline]
    #[must_use]
    pub fn path_influence(&self, x: usize, z: usize) -> f32 {
        self.path_influence[z][x]
    }

    /// Returns the full height grid.
    #[inline]
    #[must_use]
    pub fn heights(&self) -> &SampleGrid {
        &self.heights
    }

    /// Returns the full moisture grid.
    #[inline]
    #[must_use]
    pub fn moisture_grid(&self) -> &SampleGrid {
        &self.moisture
    }

    /// Returns the chunk's terrain mesh.
    #[inline]
    #[must_use]
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Returns the vegetation placed on this chunk.
    #[inline]
    #[must_use]
    pub fn vegetation(&self) -> &[VegetationInstance] {
        &self.vegetation
    }

    pub(crate) fn set_vegetation(&mut self, vegetation: Vec<VegetationInstance>) {
        self.vegetation = vegetation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coord_from_world() {
        assert_eq!(ChunkCoord::from_world_pos(0.0, 0.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world_pos(30.9, 30.9), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world_pos(31.0, 31.0), ChunkCoord::new(1, 1));
        assert_eq!(ChunkCoord::from_world_pos(-0.1, -0.1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world_pos(-31.0, -31.0), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world_pos(-31.5, 62.0), ChunkCoord::new(-2, 2));
    }

    #[test]
    fn test_origin_uses_stride() {
        let coord = ChunkCoord::new(2, -3);
        assert_eq!(coord.origin(), [62.0, 0.0, -93.0]);
    }

    #[test]
    fn test_center_uses_integer_half_stride() {
        assert_eq!(ChunkCoord::new(0, 0).center(), [15.0, 15.0, 15.0]);
        assert_eq!(ChunkCoord::new(-1, 1).center(), [-16.0, 15.0, 46.0]);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = ChunkCoord::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(3, -1)), 3);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(-2, 2)), 2);
        assert_eq!(a.chebyshev_distance(a.offset(0, 0)), 0);
    }
}
