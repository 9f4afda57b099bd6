//! # Height Queries
//!
//! Ground height lookups in render space (stored height × 5.0).

use crate::chunk::{Chunk, CHUNK_STRIDE, HEIGHT_SCALE};

/// Anything that can answer "how high is the ground here?".
pub trait HeightSource {
    /// Ground height in render space at a world position.
    fn height_at(&self, wx: f32, wz: f32) -> f32;
}

/// Level ground at a fixed height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatGround(pub f32);

impl HeightSource for FlatGround {
    #[inline]
    fn height_at(&self, _wx: f32, _wz: f32) -> f32 {
        self.0
    }
}

/// Bilinear interpolation of a chunk's smoothed heights, in render space.
///
/// `wx`/`wz` are world coordinates; they are clamped into the chunk.
#[must_use]
pub fn sample_chunk(chunk: &Chunk, wx: f32, wz: f32) -> f32 {
    let stride = CHUNK_STRIDE as f32;
    let max = CHUNK_STRIDE as usize;

    let lx = (wx - chunk.coord.world_x() as f32).clamp(0.0, stride);
    let lz = (wz - chunk.coord.world_z() as f32).clamp(0.0, stride);

    let x0 = lx.floor() as usize;
    let z0 = lz.floor() as usize;
    let x1 = (x0 + 1).min(max);
    let z1 = (z0 + 1).min(max);

    let fx = lx - x0 as f32;
    let fz = lz - z0 as f32;

    let h00 = chunk.height(x0, z0);
    let h10 = chunk.height(x1, z0);
    let h01 = chunk.height(x0, z1);
    let h11 = chunk.height(x1, z1);

    let near = h00 * (1.0 - fx) + h10 * fx;
    let far = h01 * (1.0 - fx) + h11 * fx;

    (near * (1.0 - fz) + far * fz) * HEIGHT_SCALE
}
