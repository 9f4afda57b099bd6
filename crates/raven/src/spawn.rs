//! Spawn hut and spawn camera.

use raven_rendering::RenderBackend;

/// Approximate terrain height under the hut.
pub const SPAWN_TERRAIN_HEIGHT: f32 = 15.0;

/// Spawn camera offset from the hut center.
pub const SPAWN_CAMERA_OFFSET: [f32; 3] = [-15.0, 10.0, -15.0];

/// The landmark box near the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnHut {
    /// Box center.
    pub position: [f32; 3],
    /// Box extents.
    pub size: [f32; 3],
    /// RGBA color.
    pub color: [u8; 4],
}

impl Default for SpawnHut {
    fn default() -> Self {
        let size = [8.0, 6.0, 8.0];
        Self {
            position: [12.0, SPAWN_TERRAIN_HEIGHT + size[1] / 2.0, -15.0],
            size,
            color: [80, 45, 40, 255],
        }
    }
}

impl SpawnHut {
    /// Where the player appears (and returns on teleport).
    #[must_use]
    pub fn spawn_point(&self) -> [f32; 3] {
        [
            self.position[0] + SPAWN_CAMERA_OFFSET[0],
            self.position[1] + SPAWN_CAMERA_OFFSET[1],
            self.position[2] + SPAWN_CAMERA_OFFSET[2],
        ]
    }

    /// Distance from `position` to the hut center.
    #[must_use]
    pub fn distance_from(&self, position: [f32; 3]) -> f32 {
        let d = [
            position[0] - self.position[0],
            position[1] - self.position[1],
            position[2] - self.position[2],
        ];
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }

    /// Draws the hut.
    pub fn render<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.draw_box(self.position, self.size, self.color);
    }
}
