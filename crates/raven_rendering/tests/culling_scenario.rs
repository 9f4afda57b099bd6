//! # Culling Scenario Tests
//!
//! Culls a streamed world from a few camera poses and checks the pass
//! against the one-shot visibility test.

use raven_procedural::{ChunkCoord, WorldManager, WorldManagerConfig, WorldSeed};
use raven_rendering::{is_chunk_visible, Camera, DrawCounter, TerrainPass};

fn world_at_origin() -> WorldManager {
    let mut world = WorldManager::new(WorldSeed::new(42), WorldManagerConfig::production());
    world.tick([0.0, 0.0, 0.0], 3);
    world
}

/// Test: the pass renders exactly the chunks the visibility test accepts.
#[test]
fn test_pass_agrees_with_visibility_test() {
    let world = world_at_origin();
    let aspect = 16.0 / 9.0;

    let poses = [
        Camera::new([0.0, 25.0, 0.0], [100.0, 20.0, 0.0], 45.0),
        Camera::new([0.0, 25.0, 0.0], [-10.0, 20.0, -80.0], 45.0),
        Camera::new([15.0, 80.0, 15.0], [15.0, 0.0, 16.0], 70.0),
    ];

    for camera in poses {
        let mut backend = DrawCounter::new();
        let stats = TerrainPass::new().render(&world, &camera, aspect, &mut backend);

        let expected = world
            .chunks()
            .filter(|chunk| is_chunk_visible(chunk.coord, &camera, aspect))
            .count() as u32;

        assert_eq!(stats.chunks_rendered, expected);
        assert_eq!(stats.chunks_total(), 49);
        assert_eq!(backend.chunks, expected);
    }
}

/// Test: the chunk under the camera is never culled, whatever the heading.
#[test]
fn test_own_chunk_always_visible() {
    let eye = [15.5, 20.0, 15.5];

    for step in 0..16 {
        let angle = step as f32 * std::f32::consts::TAU / 16.0;
        let target = [eye[0] + angle.sin() * 50.0, 18.0, eye[2] + angle.cos() * 50.0];
        let camera = Camera::new(eye, target, 45.0);

        assert!(
            is_chunk_visible(ChunkCoord::new(0, 0), &camera, 16.0 / 9.0),
            "Own chunk culled at heading step {step}"
        );
    }
}

/// Test: looking east culls the western half of the ring.
#[test]
fn test_west_culled_when_facing_east() {
    let camera = Camera::new([15.0, 20.0, 15.0], [500.0, 20.0, 15.0], 45.0);

    for z in -3..=3 {
        assert!(!is_chunk_visible(ChunkCoord::new(-2, z), &camera, 16.0 / 9.0));
        assert!(!is_chunk_visible(ChunkCoord::new(-3, z), &camera, 16.0 / 9.0));
    }
    assert!(is_chunk_visible(ChunkCoord::new(2, 0), &camera, 16.0 / 9.0));
}
