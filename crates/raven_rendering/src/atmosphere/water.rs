//! Water plane.
//!
//! A single translucent square at a fixed level that slides with the camera
//! on X/Z, so it always reaches the horizon.

use crate::backend::RenderBackend;

/// Water parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterConfig {
    /// Whether the plane is drawn at all.
    pub enabled: bool,
    /// Height of the surface.
    pub level: f32,
    /// Side length of the plane.
    pub size: f32,
    /// RGBA color; alpha below 255 for transparency.
    pub color: [u8; 4],
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: 10.0,
            size: 2000.0,
            color: [20, 30, 100, 180],
        }
    }
}

/// Camera-following water plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterPlane {
    config: WaterConfig,
}

impl WaterPlane {
    /// Creates the plane.
    #[must_use]
    pub const fn new(config: WaterConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WaterConfig {
        &self.config
    }

    /// Center of the plane for a camera position.
    #[must_use]
    pub fn center(&self, eye: [f32; 3]) -> [f32; 3] {
        [eye[0], self.config.level, eye[2]]
    }

    /// Draws the plane if enabled. Returns true if it was drawn.
    pub fn render<B: RenderBackend + ?Sized>(&self, eye: [f32; 3], backend: &mut B) -> bool {
        if !self.config.enabled {
            return false;
        }
        backend.draw_water(self.center(eye), self.config.size, self.config.color);
        true
    }
}
