//! Terrain render pass.
//!
//! Extracts the frustum once, then walks every resident chunk: culled
//! chunks are counted, visible ones are submitted together with their
//! nearby vegetation.

use raven_procedural::WorldManager;
use tracing::trace;

use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::culling::FrustumCuller;
use crate::pipeline::RenderStats;

/// Vegetation farther than this from the camera is skipped.
pub const VEGETATION_DRAW_DISTANCE: f32 = 150.0;

/// Tint applied to grass tufts.
pub const GRASS_TINT: [u8; 4] = [75, 70, 40, 200];

/// Draws the resident terrain of a world.
#[derive(Debug, Clone, Copy)]
pub struct TerrainPass {
    vegetation_distance: f32,
}

impl TerrainPass {
    /// Creates a pass with the default vegetation distance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vegetation_distance: VEGETATION_DRAW_DISTANCE,
        }
    }

    /// Renders every visible chunk.
    pub fn render<B: RenderBackend + ?Sized>(
        &self,
        world: &WorldManager,
        camera: &Camera,
        aspect: f32,
        backend: &mut B,
    ) -> RenderStats {
        let culler = FrustumCuller::new(camera, aspect);
        let mut stats = RenderStats::default();

        for chunk in world.chunks() {
            if !culler.test_chunk(chunk.coord) {
                stats.chunks_culled += 1;
                continue;
            }

            backend.draw_chunk(chunk.coord, chunk.coord.origin(), chunk.mesh());
            stats.chunks_rendered += 1;
            stats.draw_calls += 1;

            for instance in chunk.vegetation() {
                if distance(camera.position, instance.position) > self.vegetation_distance {
                    continue;
                }
                backend.draw_vegetation(instance, GRASS_TINT);
                stats.vegetation_drawn += 1;
                stats.draw_calls += 1;
            }
        }

        trace!(
            rendered = stats.chunks_rendered,
            culled = stats.chunks_culled,
            "Terrain pass"
        );

        stats
    }
}

impl Default for TerrainPass {
    fn default() -> Self {
        Self::new()
    }
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DrawCounter;
    use raven_procedural::{ScatterPlacer, WorldManagerConfig, WorldSeed};

    #[test]
    fn test_counts_add_up() {
        let mut world = WorldManager::new(WorldSeed::new(1), WorldManagerConfig::test());
        world.tick([0.0, 20.0, 0.0], 2);

        let camera = Camera::new([15.0, 30.0, 15.0], [200.0, 20.0, 15.0], 45.0);
        let mut backend = DrawCounter::new();
        let stats = TerrainPass::new().render(&world, &camera, 16.0 / 9.0, &mut backend);

        assert_eq!(stats.chunks_total(), 25);
        assert!(stats.chunks_rendered > 0);
        assert!(stats.chunks_culled > 0, "Chunks behind the camera must be culled");
        assert_eq!(backend.chunks, stats.chunks_rendered);
    }

    #[test]
    fn test_vegetation_distance_limit() {
        let seed = WorldSeed::new(3);
        let plain = WorldManager::new(seed, WorldManagerConfig::test());
        let placer = ScatterPlacer::new(plain.generator());
        let mut world = plain.with_vegetation(Box::new(placer));
        world.tick([0.0, 20.0, 0.0], 2);

        let camera = Camera::new([15.0, 60.0, 15.0], [15.0, 0.0, 16.0], 90.0);
        let mut backend = DrawCounter::new();
        let stats = TerrainPass::new().render(&world, &camera, 1.0, &mut backend);

        assert_eq!(backend.vegetation, stats.vegetation_drawn);
        let in_range: usize = world
            .chunks()
            .flat_map(|chunk| chunk.vegetation().iter())
            .filter(|v| distance(camera.position, v.position) <= VEGETATION_DRAW_DISTANCE)
            .count();
        assert!(stats.vegetation_drawn as usize <= in_range);
    }
}
