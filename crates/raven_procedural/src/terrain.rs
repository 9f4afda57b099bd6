//! # Terrain Synthesizer
//!
//! Turns a chunk coordinate into a fully populated [`Chunk`]: height,
//! moisture and path grids, smoothing, and the render mesh.
//!
//! ## Height Model
//!
//! Heights are a sum of noise octaves plus a valley term that only carves
//! downward, plus a constant baseline:
//!
//! ```text
//! h = Σ noise(w * freq + offset) * amp
//!   + min(0, valley(w) - threshold) * depth
//!   + 3.0
//! ```
//!
//! Generation is total: every coordinate produces a chunk.

use crate::chunk::{Chunk, ChunkCoord, SampleGrid, CHUNK_SIZE};
use crate::mesh::TerrainMesh;
use crate::noise::{NoiseField, WorldSeed};
use crate::path::PathField;

/// Constant added to every height sample.
pub const BASE_HEIGHT: f32 = 3.0;

/// Number of smoothing passes applied to the interior of a chunk.
pub const SMOOTHING_PASSES: usize = 4;

/// Heights below this get extra moisture (valley floors).
const WET_HEIGHT: f32 = 2.5;

/// One noise octave of a height recipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    /// Coordinate scale.
    pub frequency: f32,
    /// Output scale.
    pub amplitude: f32,
    /// Constant added to both coordinates to decorrelate the layer.
    pub offset: f32,
}

impl Octave {
    const fn new(frequency: f32, amplitude: f32, offset: f32) -> Self {
        Self {
            frequency,
            amplitude,
            offset,
        }
    }
}

/// Downward-only carving term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValleyTerm {
    /// Coordinate scale.
    pub frequency: f32,
    /// Coordinate offset.
    pub offset: f32,
    /// Noise value below which the valley carves.
    pub threshold: f32,
    /// Multiplier on the (negative) excess below the threshold.
    pub depth: f32,
}

/// A layered-noise height model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRecipe {
    /// Octaves, summed in order.
    pub octaves: [Octave; 4],
    /// Valley carving term.
    pub valley: ValleyTerm,
}

impl HeightRecipe {
    /// Recipe used to generate chunk height grids.
    pub const GENERATION: Self = Self {
        octaves: [
            Octave::new(0.0015, 8.0, 0.0),
            Octave::new(0.003, 4.0, 100.0),
            Octave::new(0.006, 1.5, 200.0),
            Octave::new(0.015, 0.4, 300.0),
        ],
        valley: ValleyTerm {
            frequency: 0.001,
            offset: 500.0,
            threshold: -0.25,
            depth: 3.0,
        },
    };

    /// Recipe used to estimate height where no chunk is loaded.
    ///
    /// Deliberately different from [`Self::GENERATION`]; the estimate only has
    /// to be plausible until the real chunk streams in.
    pub const ESTIMATE: Self = Self {
        octaves: [
            Octave::new(0.004, 6.0, 0.0),
            Octave::new(0.01, 2.5, 100.0),
            Octave::new(0.02, 0.8, 200.0),
            Octave::new(0.05, 0.3, 300.0),
        ],
        valley: ValleyTerm {
            frequency: 0.003,
            offset: 500.0,
            threshold: -0.2,
            depth: 2.5,
        },
    };

    /// Evaluates the recipe at a world position (unscaled, baseline included).
    #[must_use]
    pub fn height(&self, noise: &NoiseField, wx: f32, wz: f32) -> f32 {
        let mut height = 0.0;

        for octave in &self.octaves {
            height += noise.sample(
                wx * octave.frequency + octave.offset,
                wz * octave.frequency + octave.offset,
            ) * octave.amplitude;
        }

        let valley = &self.valley;
        let v = noise.sample(
            wx * valley.frequency + valley.offset,
            wz * valley.frequency + valley.offset,
        );
        if v < valley.threshold {
            height += (v - valley.threshold) * valley.depth;
        }

        height + BASE_HEIGHT
    }
}

/// Chunk generator.
///
/// Immutable after construction; safe to share across threads.
#[derive(Clone)]
pub struct ChunkGenerator {
    noise: NoiseField,
    paths: PathField,
}

impl ChunkGenerator {
    /// Creates a new chunk generator.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let noise = NoiseField::new(seed);
        let paths = PathField::new(noise.clone());
        Self { noise, paths }
    }

    /// Returns the shared noise field.
    #[inline]
    #[must_use]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Returns the path field.
    #[inline]
    #[must_use]
    pub fn paths(&self) -> &PathField {
        &self.paths
    }

    /// Unsmoothed height at a world position.
    #[inline]
    #[must_use]
    pub fn raw_height(&self, wx: f32, wz: f32) -> f32 {
        HeightRecipe::GENERATION.height(&self.noise, wx, wz)
    }

    /// Fallback height estimate at a world position (unscaled).
    #[inline]
    #[must_use]
    pub fn estimate_height(&self, wx: f32, wz: f32) -> f32 {
        HeightRecipe::ESTIMATE.height(&self.noise, wx, wz)
    }

    /// Moisture at a world position given the sample's raw height, in [0, 1].
    #[must_use]
    pub fn moisture(&self, wx: f32, wz: f32, height: f32) -> f32 {
        let mut moisture = 0.5 + self.noise.sample(wx * 0.008 + 2000.0, wz * 0.008 + 2000.0) * 0.3;
        if height < WET_HEIGHT {
            moisture += 0.3;
        }
        moisture.clamp(0.0, 1.0)
    }

    /// Raw (unsmoothed) height grid of a chunk.
    #[must_use]
    pub fn raw_heights(&self, coord: ChunkCoord) -> Box<SampleGrid> {
        let mut heights = Box::new([[0.0; CHUNK_SIZE]; CHUNK_SIZE]);
        let (ox, oz) = (coord.world_x(), coord.world_z());

        for (z, row) in heights.iter_mut().enumerate() {
            for (x, h) in row.iter_mut().enumerate() {
                *h = self.raw_height((ox + x as i32) as f32, (oz + z as i32) as f32);
            }
        }

        heights
    }

    /// Generates a complete chunk.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut heights = self.raw_heights(coord);
        let mut moisture = Box::new([[0.0; CHUNK_SIZE]; CHUNK_SIZE]);
        let mut path_influence = Box::new([[0.0; CHUNK_SIZE]; CHUNK_SIZE]);
        let (ox, oz) = (coord.world_x(), coord.world_z());

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let wx = (ox + x as i32) as f32;
                let wz = (oz + z as i32) as f32;
                moisture[z][x] = self.moisture(wx, wz, heights[z][x]);
                path_influence[z][x] = self.paths.path_influence(wx, wz);
            }
        }

        smooth_heights(&mut heights, SMOOTHING_PASSES);

        let mesh = TerrainMesh::build(&heights, &moisture, &path_influence);
        Chunk::new(coord, heights, moisture, path_influence, mesh)
    }
}

/// Smooths the interior of a height grid.
///
/// Each pass sets every non-border sample to `0.5 * center + 0.125 * (4
/// orthogonal neighbours)`, reading only the previous pass. Border samples
/// are never touched, which keeps chunk seams identical on both sides.
pub fn smooth_heights(heights: &mut SampleGrid, passes: usize) {
    let mut previous = *heights;

    for _ in 0..passes {
        for z in 1..CHUNK_SIZE - 1 {
            for x in 1..CHUNK_SIZE - 1 {
                heights[z][x] = previous[z][x] * 0.5
                    + (previous[z][x - 1]
                        + previous[z][x + 1]
                        + previous[z - 1][x]
                        + previous[z + 1][x])
                        * 0.125;
            }
        }
        previous = *heights;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::CHUNK_STRIDE;

    fn generator() -> ChunkGenerator {
        ChunkGenerator::new(WorldSeed::default())
    }

    #[test]
    fn test_chunk_generation_deterministic() {
        let gen1 = generator();
        let gen2 = generator();
        let coord = ChunkCoord::new(10, -20);

        let a = gen1.generate(coord);
        let b = gen2.generate(coord);

        assert_eq!(a.heights(), b.heights(), "Same seed should produce same heights");
        assert_eq!(a.moisture_grid(), b.moisture_grid(), "Same seed should produce same moisture");
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                assert_eq!(
                    a.path_influence(x, z).to_bits(),
                    b.path_influence(x, z).to_bits(),
                    "path influence differs at ({x}, {z})"
                );
            }
        }
        assert_eq!(a.mesh().vertices(), b.mesh().vertices());
        assert_eq!(a.mesh().indices(), b.mesh().indices());
    }

    #[test]
    fn test_raw_seams_match() {
        let gen = generator();
        let left = gen.raw_heights(ChunkCoord::new(0, 0));
        let right = gen.raw_heights(ChunkCoord::new(1, 0));
        let below = gen.raw_heights(ChunkCoord::new(0, 1));

        let last = CHUNK_SIZE - 1;
        for i in 0..CHUNK_SIZE {
            assert_eq!(left[i][last], right[i][0], "x seam mismatch at row {i}");
            assert_eq!(left[last][i], below[0][i], "z seam mismatch at column {i}");
        }
    }

    #[test]
    fn test_smoothed_seams_match() {
        let gen = generator();
        let a = gen.generate(ChunkCoord::new(-3, 2));
        let b = gen.generate(ChunkCoord::new(-2, 2));

        let last = CHUNK_SIZE - 1;
        for z in 0..CHUNK_SIZE {
            assert_eq!(a.height(last, z), b.height(0, z));
        }
    }

    #[test]
    fn test_border_stays_raw() {
        let gen = generator();
        let coord = ChunkCoord::new(4, 7);
        let raw = gen.raw_heights(coord);
        let chunk = gen.generate(coord);
        let last = CHUNK_SIZE - 1;

        for i in 0..CHUNK_SIZE {
            assert_eq!(chunk.height(0, i), raw[i][0]);
            assert_eq!(chunk.height(last, i), raw[i][last]);
            assert_eq!(chunk.height(i, 0), raw[0][i]);
            assert_eq!(chunk.height(i, last), raw[last][i]);
        }
    }

    #[test]
    fn test_smoothing_is_double_buffered() {
        let mut grid = [[0.0; CHUNK_SIZE]; CHUNK_SIZE];
        grid[5][5] = 8.0;
        smooth_heights(&mut grid, 1);

        assert_eq!(grid[5][5], 4.0);
        assert_eq!(grid[5][4], 1.0);
        assert_eq!(grid[5][6], 1.0);
        assert_eq!(grid[4][5], 1.0);
        assert_eq!(grid[6][5], 1.0);
        // Diagonals only see the spike after a second pass
        assert_eq!(grid[4][4], 0.0);
    }

    #[test]
    fn test_smoothing_preserves_flat_grid() {
        let mut grid = [[2.5; CHUNK_SIZE]; CHUNK_SIZE];
        smooth_heights(&mut grid, SMOOTHING_PASSES);
        assert!(grid.iter().flatten().all(|&h| h == 2.5));
    }

    #[test]
    fn test_moisture_range() {
        let gen = generator();
        let chunk = gen.generate(ChunkCoord::new(1, 1));

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert!((0.0..=1.0).contains(&chunk.moisture(x, z)));
                assert!((0.0..=1.0).contains(&chunk.path_influence(x, z)));
            }
        }
    }

    #[test]
    fn test_low_ground_is_wetter() {
        let gen = generator();
        let dry = gen.moisture(12.3, 45.6, 10.0);
        let wet = gen.moisture(12.3, 45.6, 1.0);
        assert!(wet >= dry);
        assert!(wet - dry <= 0.3 + f32::EPSILON);
    }

    #[test]
    fn test_mesh_matches_grid() {
        let gen = generator();
        let chunk = gen.generate(ChunkCoord::new(0, -1));
        let mesh = chunk.mesh();

        assert_eq!(mesh.vertex_count(), CHUNK_SIZE * CHUNK_SIZE);
        assert_eq!(mesh.indices().len(), 5766);

        let v = mesh.vertices()[3 * CHUNK_SIZE + 7];
        assert_eq!(v.position[0], 7.0);
        assert_eq!(v.position[2], 3.0);
        assert_eq!(v.position[1], chunk.height(7, 3) * 5.0);
        assert_eq!(v.uv, [7.0 / CHUNK_STRIDE as f32, 3.0 / CHUNK_STRIDE as f32]);
    }

    #[test]
    fn test_recipes_differ() {
        let gen = generator();
        let differing = (0..50)
            .map(|i| (i as f32 * 13.7 + 0.5, i as f32 * -7.1 + 0.25))
            .filter(|&(x, z)| gen.raw_height(x, z) != gen.estimate_height(x, z))
            .count();

        assert!(differing > 0);
    }

    #[test]
    fn test_height_includes_baseline() {
        let gen = generator();
        // Every layer samples a lattice point at the origin
        assert_eq!(gen.raw_height(0.0, 0.0), BASE_HEIGHT);
    }
}
