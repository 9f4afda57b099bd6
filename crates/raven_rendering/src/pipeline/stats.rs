//! Rendering statistics.

/// Statistics from a render frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of draw calls.
    pub draw_calls: u32,
    /// Number of chunks rendered.
    pub chunks_rendered: u32,
    /// Number of chunks culled by frustum.
    pub chunks_culled: u32,
    /// Vegetation instances drawn.
    pub vegetation_drawn: u32,
    /// Stars that survived the fog test.
    pub stars_drawn: u32,
}

impl RenderStats {
    /// Chunks considered this frame.
    #[must_use]
    pub fn chunks_total(&self) -> u32 {
        self.chunks_rendered + self.chunks_culled
    }

    /// Fraction of chunks culled, in [0, 1].
    #[must_use]
    pub fn cull_rate(&self) -> f32 {
        let total = self.chunks_total();
        if total > 0 {
            self.chunks_culled as f32 / total as f32
        } else {
            0.0
        }
    }

    /// Adds another pass's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        self.draw_calls += other.draw_calls;
        self.chunks_rendered += other.chunks_rendered;
        self.chunks_culled += other.chunks_culled;
        self.vegetation_drawn += other.vegetation_drawn;
        self.stars_drawn += other.stars_drawn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cull_rate() {
        let stats = RenderStats {
            chunks_rendered: 30,
            chunks_culled: 19,
            ..RenderStats::default()
        };
        assert_eq!(stats.chunks_total(), 49);
        assert!((stats.cull_rate() - 19.0 / 49.0).abs() < 1e-6);
        assert_eq!(RenderStats::default().cull_rate(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut a = RenderStats {
            draw_calls: 3,
            chunks_rendered: 2,
            ..RenderStats::default()
        };
        a.merge(&RenderStats {
            draw_calls: 5,
            stars_drawn: 4,
            ..RenderStats::default()
        });
        assert_eq!(a.draw_calls, 8);
        assert_eq!(a.stars_drawn, 4);
        assert_eq!(a.chunks_rendered, 2);
    }
}
