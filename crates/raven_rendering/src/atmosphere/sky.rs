//! Sky dome and star field.
//!
//! Both follow the camera: the dome is a hemisphere centered on the eye and
//! stars are fixed offsets from it, so neither ever gets closer.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use raven_procedural::WorldSeed;

use crate::backend::RenderBackend;

/// Sub-seed purpose for star placement.
const STAR_STREAM: u64 = 0x5354_4152;

/// Sky parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyConfig {
    /// Number of stars.
    pub star_count: usize,
    /// Distance of stars from the camera.
    pub star_radius: f32,
    /// Distance at which star fog starts.
    pub fog_start: f32,
    /// Exponential fog density.
    pub fog_density: f32,
    /// Stars at or below this alpha are skipped.
    pub alpha_threshold: f32,
    /// Dome radius.
    pub dome_radius: f32,
    /// Rings from zenith to horizon.
    pub dome_rings: u32,
    /// Slices around the vertical axis.
    pub dome_slices: u32,
    /// Zenith color.
    pub top_color: [u8; 3],
    /// Horizon color (matches the terrain fog).
    pub horizon_color: [u8; 3],
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: 400,
            star_radius: 500.0,
            fog_start: 15.0,
            fog_density: 0.04,
            alpha_threshold: 0.1,
            dome_radius: 400.0,
            dome_rings: 16,
            dome_slices: 32,
            top_color: [20, 15, 18],
            horizon_color: [115, 102, 97],
        }
    }
}

/// A star, relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Offset from the camera.
    pub offset: [f32; 3],
    /// Brightness in [0.3, 1.0).
    pub brightness: f32,
    /// Sprite size in [1.0, 3.0).
    pub size: f32,
}

/// Fog factor for something at `distance` from the camera, in [0, 1].
#[must_use]
pub fn fog_factor(distance: f32, fog_start: f32, density: f32) -> f32 {
    (1.0 - (-density * (distance - fog_start).max(0.0)).exp()).clamp(0.0, 1.0)
}

/// Sky dome plus star field.
#[derive(Debug, Clone)]
pub struct Sky {
    config: SkyConfig,
    stars: Vec<Star>,
}

impl Sky {
    /// Generates the star field for a world.
    #[must_use]
    pub fn new(seed: WorldSeed, config: SkyConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(STAR_STREAM).value());
        let radius = config.star_radius;

        let stars = (0..config.star_count)
            .map(|_| {
                let theta = rng.gen::<f32>() * TAU;
                let phi = rng.gen::<f32>() * PI;
                Star {
                    offset: [
                        radius * phi.sin() * theta.cos(),
                        radius * phi.cos(),
                        radius * phi.sin() * theta.sin(),
                    ],
                    brightness: 0.3 + rng.gen::<f32>() * 0.7,
                    size: 1.0 + rng.gen::<f32>() * 2.0,
                }
            })
            .collect();

        Self { config, stars }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    /// Returns the generated stars.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Draws the dome and every star bright enough to show through the fog.
    ///
    /// Returns the number of stars drawn.
    pub fn render<B: RenderBackend + ?Sized>(&self, eye: [f32; 3], backend: &mut B) -> u32 {
        self.render_dome(eye, backend);
        self.render_stars(eye, backend)
    }

    /// Color of a dome ring at `t` (0 at the zenith, 1 at the horizon).
    #[must_use]
    pub fn ring_color(&self, t: f32) -> [u8; 4] {
        let top = self.config.top_color;
        let horizon = self.config.horizon_color;
        let mix = |i: usize| (f32::from(top[i]) * (1.0 - t) + f32::from(horizon[i]) * t) as u8;
        [mix(0), mix(1), mix(2), 255]
    }

    fn render_dome<B: RenderBackend + ?Sized>(&self, eye: [f32; 3], backend: &mut B) {
        let rings = self.config.dome_rings;
        let slices = self.config.dome_slices;
        let radius = self.config.dome_radius;

        for i in 0..rings {
            let t1 = i as f32 / rings as f32;
            let t2 = (i + 1) as f32 / rings as f32;
            let (a1, a2) = (t1 * FRAC_PI_2, t2 * FRAC_PI_2);
            let (y1, y2) = (radius * a1.cos(), radius * a2.cos());
            let (r1, r2) = (radius * a1.sin(), radius * a2.sin());
            let (c1, c2) = (self.ring_color(t1), self.ring_color(t2));

            for j in 0..slices {
                let th1 = j as f32 / slices as f32 * TAU;
                let th2 = (j + 1) as f32 / slices as f32 * TAU;
                let point = |r: f32, y: f32, th: f32| {
                    [eye[0] + r * th.cos(), eye[1] + y, eye[2] + r * th.sin()]
                };

                let p1 = point(r1, y1, th1);
                let p2 = point(r1, y1, th2);
                let p3 = point(r2, y2, th2);
                let p4 = point(r2, y2, th1);

                backend.draw_sky_triangle([p1, p2, p3], c1);
                backend.draw_sky_triangle([p1, p3, p4], c2);
            }
        }
    }

    fn render_stars<B: RenderBackend + ?Sized>(&self, eye: [f32; 3], backend: &mut B) -> u32 {
        let mut drawn = 0;

        for star in &self.stars {
            let o = star.offset;
            let distance = (o[0] * o[0] + o[1] * o[1] + o[2] * o[2]).sqrt();
            let fog = fog_factor(distance, self.config.fog_start, self.config.fog_density);
            let alpha = star.brightness * (1.0 - fog);

            if alpha <= self.config.alpha_threshold {
                continue;
            }

            let color = [
                (255.0 * alpha) as u8,
                (240.0 * alpha) as u8,
                (220.0 * alpha) as u8,
                (255.0 * alpha) as u8,
            ];
            backend.draw_star([eye[0] + o[0], eye[1] + o[1], eye[2] + o[2]], star.size, color);
            drawn += 1;
        }

        drawn
    }
}
