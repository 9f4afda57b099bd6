//! # Game Configuration
//!
//! Loaded once at startup from TOML. Every field is optional; missing
//! fields take the defaults below.
//!
//! ```toml
//! [world]
//! seed = 42
//! render_distance = 4
//! vegetation = true
//!
//! [player]
//! walk_speed = 5.0
//!
//! [water]
//! enabled = true
//! ```

use std::path::Path;

use raven_procedural::{MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE};
use raven_rendering::{SkyConfig, WaterConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Upper bound on the star count.
pub const MAX_STARS: usize = 10_000;

/// Seed used when the config names none ("RAVEN" in ASCII).
pub const DEFAULT_SEED: u64 = 0x52_4156_454E;

/// Complete game configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World generation and streaming.
    pub world: WorldSection,
    /// Player movement.
    pub player: PlayerConfig,
    /// Camera.
    pub camera: CameraSection,
    /// World edge push-back.
    pub boundary: BoundaryConfig,
    /// Sky and stars.
    pub sky: SkySection,
    /// Water plane.
    pub water: WaterSection,
}

/// `[world]` section.
///
/// TOML integers are signed, so seeds above `i64::MAX` cannot be written
/// to or read from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    /// World seed.
    pub seed: u64,
    /// Initial render distance, in chunks.
    pub render_distance: i32,
    /// Scatter grass on generated chunks.
    pub vegetation: bool,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            render_distance: 3,
            vegetation: false,
        }
    }
}

/// `[player]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed (units/s).
    pub walk_speed: f32,
    /// Sprinting speed (units/s).
    pub sprint_speed: f32,
    /// Crouching speed (units/s).
    pub crouch_speed: f32,
    /// Gravity (units/s²).
    pub gravity: f32,
    /// Initial upward velocity of a jump (units/s).
    pub jump_velocity: f32,
    /// Eye height above the ground.
    pub eye_height: f32,
    /// Radians of rotation per unit of mouse movement.
    pub mouse_sensitivity: f32,
    /// Head bob cycles per second (radians of phase per second).
    pub bob_frequency: f32,
    /// Head bob amplitude while walking.
    pub bob_amplitude: f32,
    /// Head bob amplitude while sprinting.
    pub bob_amplitude_sprint: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 8.0,
            crouch_speed: 2.0,
            gravity: 20.0,
            jump_velocity: 8.0,
            eye_height: 1.7,
            mouse_sensitivity: 0.003,
            bob_frequency: 10.0,
            bob_amplitude: 0.08,
            bob_amplitude_sprint: 0.12,
        }
    }
}

/// `[camera]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    /// Vertical field of view, in degrees.
    pub fov: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self { fov: 45.0 }
    }
}

/// `[boundary]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Distance from the center where the gentle push begins.
    pub soft_start: f32,
    /// Distance from the center where the strong push begins.
    pub hard_start: f32,
    /// Nominal world radius; warnings start beyond it.
    pub world_radius: f32,
    /// Push speed reached at the hard boundary (units/s).
    pub soft_push: f32,
    /// Push speed just past the hard boundary (units/s).
    pub hard_push: f32,
    /// Extra push speed per unit beyond the hard boundary.
    pub hard_push_per_unit: f32,
    /// Angular speed of the warning pulse.
    pub pulse_speed: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            soft_start: 2000.0,
            hard_start: 2400.0,
            world_radius: 1800.0,
            soft_push: 5.0,
            hard_push: 20.0,
            hard_push_per_unit: 2.0,
            pulse_speed: 3.0,
        }
    }
}

/// `[sky]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySection {
    /// Number of stars.
    pub star_count: usize,
    /// Distance of the stars from the camera.
    pub star_radius: f32,
    /// Distance where star fog starts.
    pub fog_start: f32,
    /// Star fog density.
    pub fog_density: f32,
    /// Sky dome radius.
    pub dome_radius: f32,
}

impl Default for SkySection {
    fn default() -> Self {
        let sky = SkyConfig::default();
        Self {
            star_count: sky.star_count,
            star_radius: sky.star_radius,
            fog_start: sky.fog_start,
            fog_density: sky.fog_density,
            dome_radius: sky.dome_radius,
        }
    }
}

impl SkySection {
    /// Converts to the renderer's sky parameters.
    #[must_use]
    pub fn to_sky_config(&self) -> SkyConfig {
        SkyConfig {
            star_count: self.star_count,
            star_radius: self.star_radius,
            fog_start: self.fog_start,
            fog_density: self.fog_density,
            dome_radius: self.dome_radius,
            ..SkyConfig::default()
        }
    }
}

/// `[water]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSection {
    /// Draw the water plane.
    pub enabled: bool,
    /// Surface height.
    pub level: f32,
    /// Side length.
    pub size: f32,
    /// RGBA color.
    pub color: [u8; 4],
}

impl Default for WaterSection {
    fn default() -> Self {
        let water = WaterConfig::default();
        Self {
            enabled: water.enabled,
            level: water.level,
            size: water.size,
            color: water.color,
        }
    }
}

impl WaterSection {
    /// Converts to the renderer's water parameters.
    #[must_use]
    pub fn to_water_config(&self) -> WaterConfig {
        WaterConfig {
            enabled: self.enabled,
            level: self.level,
            size: self.size,
            color: self.color,
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        info!(path = %path.display(), seed = config.world.seed, "Loaded config");
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rd = self.world.render_distance;
        if !(MIN_RENDER_DISTANCE..=MAX_RENDER_DISTANCE).contains(&rd) {
            return Err(invalid(
                "world.render_distance",
                format!("must be between {MIN_RENDER_DISTANCE} and {MAX_RENDER_DISTANCE}, got {rd}"),
            ));
        }

        let p = &self.player;
        for (field, value) in [
            ("player.walk_speed", p.walk_speed),
            ("player.sprint_speed", p.sprint_speed),
            ("player.crouch_speed", p.crouch_speed),
            ("player.gravity", p.gravity),
            ("player.eye_height", p.eye_height),
            ("player.mouse_sensitivity", p.mouse_sensitivity),
        ] {
            positive(field, value)?;
        }
        non_negative("player.jump_velocity", p.jump_velocity)?;
        non_negative("player.bob_amplitude", p.bob_amplitude)?;
        non_negative("player.bob_amplitude_sprint", p.bob_amplitude_sprint)?;

        let fov = self.camera.fov;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(invalid("camera.fov", format!("must be in (0, 180), got {fov}")));
        }

        let b = &self.boundary;
        positive("boundary.soft_start", b.soft_start)?;
        if b.soft_start > b.hard_start {
            return Err(invalid(
                "boundary.soft_start",
                format!("must not exceed hard_start ({} > {})", b.soft_start, b.hard_start),
            ));
        }
        if b.world_radius > b.hard_start {
            return Err(invalid(
                "boundary.world_radius",
                format!("must not exceed hard_start ({} > {})", b.world_radius, b.hard_start),
            ));
        }

        if self.sky.star_count > MAX_STARS {
            return Err(invalid(
                "sky.star_count",
                format!("must be at most {MAX_STARS}, got {}", self.sky.star_count),
            ));
        }
        positive("sky.star_radius", self.sky.star_radius)?;
        finite("sky.fog_start", self.sky.fog_start)?;
        non_negative("sky.fog_density", self.sky.fog_density)?;
        positive("sky.dome_radius", self.sky.dome_radius)?;
        finite("water.level", self.water.level)?;
        positive("water.size", self.water.size)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must not be negative, got {value}")))
    }
}
