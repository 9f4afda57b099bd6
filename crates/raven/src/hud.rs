//! HUD readouts.
//!
//! Produces the numbers the overlay shows. Fonts and layout belong to the
//! shell.

use crate::boundary::BoundaryWarning;

/// Samples averaged by [`FpsCounter`].
pub const FPS_WINDOW: usize = 60;

/// Frame rate smoothed over the last [`FPS_WINDOW`] frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    history: [f32; FPS_WINDOW],
    next: usize,
    primed: bool,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Creates an empty counter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: [0.0; FPS_WINDOW],
            next: 0,
            primed: false,
        }
    }

    /// Records one frame of `dt` seconds. Non-positive frames are ignored.
    pub fn record_frame(&mut self, dt: f32) {
        if dt > 0.0 && dt.is_finite() {
            self.record_fps(1.0 / dt);
        }
    }

    /// Records an instantaneous FPS sample.
    pub fn record_fps(&mut self, fps: f32) {
        // The first sample fills the window so the readout starts steady.
        if !self.primed {
            self.history = [fps; FPS_WINDOW];
            self.primed = true;
        }
        self.history[self.next] = fps;
        self.next = (self.next + 1) % FPS_WINDOW;
    }

    /// Average over the window; 0 before any sample.
    #[must_use]
    pub fn average(&self) -> f32 {
        self.history.iter().sum::<f32>() / FPS_WINDOW as f32
    }
}

/// Everything the overlay shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    /// Smoothed frames per second.
    pub fps: f32,
    /// Eye position.
    pub position: [f32; 3],
    /// Distance to the spawn hut.
    pub distance_from_spawn: f32,
    /// Boundary warning, if any.
    pub warning: Option<BoundaryWarning>,
    /// Resident chunks.
    pub loaded_chunks: usize,
    /// Current render distance.
    pub render_distance: i32,
    /// Free flight enabled.
    pub noclip: bool,
}

impl HudSnapshot {
    /// Overlay text, one line per readout.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let [x, y, z] = self.position;
        let mut lines = vec![
            format!("FPS: {:.0}", self.fps),
            format!("XYZ: ({x:.1}, {y:.1}, {z:.1})"),
            format!("Distance from spawn: {:.1}", self.distance_from_spawn),
            format!("Chunks: {} (render distance {})", self.loaded_chunks, self.render_distance),
        ];
        if self.noclip {
            lines.push("Noclip: ON".to_string());
        }
        if let Some(warning) = self.warning {
            lines.push(warning.message().to_string());
            lines.push(format!("Distance beyond boundary: {:.1} units", warning.beyond()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counter_reads_zero() {
        assert_eq!(FpsCounter::new().average(), 0.0);
    }

    #[test]
    fn test_first_sample_fills_window() {
        let mut fps = FpsCounter::new();
        fps.record_frame(1.0 / 50.0);
        assert!((fps.average() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_window_smooths_and_rolls() {
        let mut fps = FpsCounter::new();
        fps.record_fps(60.0);
        for _ in 0..30 {
            fps.record_fps(30.0);
        }
        // 30 old samples of 60, 30 new of 30.
        assert!((fps.average() - 45.0).abs() < 1e-3);

        for _ in 0..FPS_WINDOW {
            fps.record_fps(30.0);
        }
        assert!((fps.average() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_ignores_zero_dt() {
        let mut fps = FpsCounter::new();
        fps.record_frame(0.0);
        fps.record_frame(f32::NAN);
        assert_eq!(fps.average(), 0.0);
    }

    #[test]
    fn test_lines() {
        let hud = HudSnapshot {
            fps: 59.6,
            position: [1.0, 2.5, -3.0],
            distance_from_spawn: 12.34,
            warning: Some(BoundaryWarning::Approaching {
                intensity: 0.5,
                beyond: 300.0,
            }),
            loaded_chunks: 49,
            render_distance: 3,
            noclip: false,
        };

        let lines = hud.lines();
        assert_eq!(lines[0], "FPS: 60");
        assert_eq!(lines[1], "XYZ: (1.0, 2.5, -3.0)");
        assert_eq!(lines[2], "Distance from spawn: 12.3");
        assert_eq!(lines[3], "Chunks: 49 (render distance 3)");
        assert_eq!(lines[5], "Distance beyond boundary: 300.0 units");
    }
}
