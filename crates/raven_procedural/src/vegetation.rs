//! # Vegetation
//!
//! Vegetation placement sits behind the [`VegetationPlacer`] trait and runs
//! after a chunk has been generated, never inside the synthesizer. The
//! default placer places nothing.

use crate::chunk::{Chunk, CHUNK_SIZE, HEIGHT_SCALE};
use crate::noise::NoiseField;
use crate::path::PathField;
use crate::terrain::ChunkGenerator;

/// Kind of vegetation model to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VegetationKind {
    /// Grass tuft.
    Grass,
}

/// One placed piece of vegetation, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VegetationInstance {
    /// World position (y in render space).
    pub position: [f32; 3],
    /// Rotation around the vertical axis, in degrees.
    pub rotation_degrees: f32,
    /// Uniform model scale.
    pub scale: f32,
    /// Model kind.
    pub kind: VegetationKind,
}

/// Decides what vegetation grows on a freshly generated chunk.
pub trait VegetationPlacer {
    /// Returns the instances for `chunk`. Must be deterministic.
    fn place(&self, chunk: &Chunk) -> Vec<VegetationInstance>;
}

/// Placer that never places anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVegetation;

impl VegetationPlacer for NoVegetation {
    fn place(&self, _chunk: &Chunk) -> Vec<VegetationInstance> {
        Vec::new()
    }
}

/// First sample coordinate considered for placement.
const SCATTER_START: usize = 2;
/// Spacing between considered samples.
const SCATTER_STEP: usize = 3;
/// Samples with a density value below this are left empty.
const DENSITY_CUTOFF: f32 = -2.0;
/// Maximum jitter applied to each axis.
const JITTER: f32 = 1.5;

/// Grass scattered on a sparse grid, kept off the path network.
#[derive(Clone)]
pub struct ScatterPlacer {
    noise: NoiseField,
    paths: PathField,
}

impl ScatterPlacer {
    /// Creates a placer sharing the generator's noise and path fields.
    #[must_use]
    pub fn new(generator: &ChunkGenerator) -> Self {
        Self {
            noise: generator.noise().clone(),
            paths: generator.paths().clone(),
        }
    }
}

impl VegetationPlacer for ScatterPlacer {
    fn place(&self, chunk: &Chunk) -> Vec<VegetationInstance> {
        let mut instances = Vec::new();
        let (ox, oz) = (chunk.coord.world_x(), chunk.coord.world_z());

        for z in (SCATTER_START..CHUNK_SIZE - 1).step_by(SCATTER_STEP) {
            for x in (SCATTER_START..CHUNK_SIZE - 1).step_by(SCATTER_STEP) {
                let wx = (ox + x as i32) as f32;
                let wz = (oz + z as i32) as f32;

                if self.paths.in_path_network(wx, wz) {
                    continue;
                }

                let density = self.noise.sample(wx * 0.3 + 3000.0, wz * 0.3 + 3000.0);
                if density < DENSITY_CUTOFF {
                    continue;
                }

                let jx = self.noise.sample(wx * 0.5 + 5000.0, wz * 0.5 + 5000.0) * JITTER;
                let jz = self.noise.sample(wx * 0.5 + 6000.0, wz * 0.5 + 6000.0) * JITTER;

                instances.push(VegetationInstance {
                    position: [wx + jx, chunk.height(x, z) * HEIGHT_SCALE, wz + jz],
                    rotation_degrees: density * 360.0,
                    scale: 0.3 + density * 0.2,
                    kind: VegetationKind::Grass,
                });
            }
        }

        instances
    }
}
