//! Atmosphere: sky dome, stars and water.

mod sky;
mod water;

pub use sky::{fog_factor, Sky, SkyConfig, Star};
pub use water::{WaterConfig, WaterPlane};
