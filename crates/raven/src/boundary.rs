//! World edge handling.
//!
//! The world is unbounded in generation but the player is pushed back toward
//! the center once they wander too far. Distances are horizontal only.

use crate::config::BoundaryConfig;

/// What the HUD should warn about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryWarning {
    /// Between the world radius and the hard boundary.
    Approaching {
        /// 0 at the world radius, 1 at the hard boundary.
        intensity: f32,
        /// Distance past the world radius.
        beyond: f32,
    },
    /// Past the hard boundary.
    TurnBack {
        /// Pulses between 0.5 and 1.
        intensity: f32,
        /// Distance past the world radius.
        beyond: f32,
    },
}

impl BoundaryWarning {
    /// Warning opacity in [0, 1].
    #[must_use]
    pub fn intensity(&self) -> f32 {
        match *self {
            Self::Approaching { intensity, .. } | Self::TurnBack { intensity, .. } => intensity,
        }
    }

    /// Distance past the world radius.
    #[must_use]
    pub fn beyond(&self) -> f32 {
        match *self {
            Self::Approaching { beyond, .. } | Self::TurnBack { beyond, .. } => beyond,
        }
    }

    /// Message shown to the player.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Approaching { .. } => "You are approaching the edge of the world...",
            Self::TurnBack { .. } => "!!! TURN BACK - WORLD BOUNDARY !!!",
        }
    }
}

/// Circular world boundary around the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBoundary {
    config: BoundaryConfig,
}

impl WorldBoundary {
    /// Creates the boundary.
    #[must_use]
    pub const fn new(config: BoundaryConfig) -> Self {
        Self { config }
    }

    /// Parameters.
    #[must_use]
    pub const fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Horizontal distance from the world center.
    #[must_use]
    pub fn distance(position: [f32; 3]) -> f32 {
        position[0].hypot(position[2])
    }

    /// Push speed toward the center at distance `d` (units/s).
    #[must_use]
    pub fn push_speed(&self, d: f32) -> f32 {
        let c = &self.config;
        if d <= c.soft_start {
            0.0
        } else if d <= c.hard_start {
            let ratio = (d - c.soft_start) / (c.hard_start - c.soft_start);
            ratio * c.soft_push
        } else {
            c.hard_push + (d - c.hard_start) * c.hard_push_per_unit
        }
    }

    /// Horizontal displacement for this frame, pointing at the center.
    #[must_use]
    pub fn push(&self, position: [f32; 3], dt: f32) -> [f32; 2] {
        let d = Self::distance(position);
        let speed = self.push_speed(d);
        if speed <= 0.0 {
            return [0.0, 0.0];
        }
        let step = speed * dt / d;
        [-position[0] * step, -position[2] * step]
    }

    /// Warning for `position` at time `t` seconds, if past the world radius.
    #[must_use]
    pub fn warning(&self, position: [f32; 3], t: f32) -> Option<BoundaryWarning> {
        let c = &self.config;
        let d = Self::distance(position);
        if d <= c.world_radius {
            return None;
        }

        let beyond = d - c.world_radius;
        if d <= c.hard_start {
            let intensity = (beyond / (c.hard_start - c.world_radius)).clamp(0.0, 1.0);
            Some(BoundaryWarning::Approaching { intensity, beyond })
        } else {
            let pulse = ((t * c.pulse_speed).sin() + 1.0) * 0.5;
            Some(BoundaryWarning::TurnBack {
                intensity: 0.5 + pulse * 0.5,
                beyond,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> WorldBoundary {
        WorldBoundary::new(BoundaryConfig::default())
    }

    #[test]
    fn test_no_push_inside_soft_start() {
        let b = boundary();
        assert_eq!(b.push([0.0, 10.0, 0.0], 0.1), [0.0, 0.0]);
        assert_eq!(b.push([2000.0, 10.0, 0.0], 0.1), [0.0, 0.0]);
    }

    #[test]
    fn test_soft_push_ramps() {
        let b = boundary();
        assert!((b.push_speed(2200.0) - 2.5).abs() < 1e-4);
        assert!((b.push_speed(2400.0) - 5.0).abs() < 1e-4);

        let [dx, dz] = b.push([2200.0, 0.0, 0.0], 1.0);
        assert!((dx + 2.5).abs() < 1e-4);
        assert!(dz.abs() < 1e-6);
    }

    #[test]
    fn test_hard_push_grows() {
        let b = boundary();
        assert!((b.push_speed(2410.0) - 40.0).abs() < 1e-3);

        // Diagonal: push points back at the origin.
        let [dx, dz] = b.push([-2000.0, 0.0, -2000.0], 0.1);
        assert!(dx > 0.0 && dz > 0.0);
        assert!((dx - dz).abs() < 1e-4);
    }

    #[test]
    fn test_warning_bands() {
        let b = boundary();
        assert_eq!(b.warning([1800.0, 0.0, 0.0], 0.0), None);

        let w = b.warning([0.0, 0.0, 2100.0], 0.0).expect("warning past radius");
        assert!(matches!(w, BoundaryWarning::Approaching { .. }));
        assert!((w.intensity() - 0.5).abs() < 1e-4);
        assert!((w.beyond() - 300.0).abs() < 1e-3);

        let w = b.warning([0.0, 0.0, 2500.0], 0.0).expect("warning past hard");
        assert!(matches!(w, BoundaryWarning::TurnBack { .. }));
        assert!((w.intensity() - 0.75).abs() < 1e-5);
        assert!((w.beyond() - 700.0).abs() < 1e-3);
    }

    #[test]
    fn test_turn_back_pulse_range() {
        let b = boundary();
        for step in 0..50 {
            let t = step as f32 * 0.137;
            let w = b.warning([3000.0, 0.0, 0.0], t).expect("warning");
            assert!((0.5..=1.0).contains(&w.intensity()));
        }
    }

    #[test]
    fn test_vertical_ignored() {
        let b = boundary();
        assert_eq!(b.warning([0.0, 5000.0, 0.0], 0.0), None);
    }
}
