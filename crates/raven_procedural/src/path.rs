//! # Path Field
//!
//! A network of walking paths derived from the noise field.
//!
//! Two overlapping networks exist:
//! - **Primary paths** follow the valleys of two combined noise layers and
//!   avoid steep ground (a finite-difference slope probe rejects them).
//! - **Secondary paths** trace the zero crossings of a third layer and
//!   ignore slope entirely.
//!
//! Path influence softens the edges: cells whose neighbours are off-path
//! are attenuated, so isolated cells and borders blend into the terrain.

use crate::noise::NoiseField;

/// Combined primary-path value below which a cell is a path candidate.
const PRIMARY_THRESHOLD: f32 = 0.15;

/// Slope (height units over the probe distance) above which primary paths are rejected.
const MAX_PATH_SLOPE: f32 = 0.8;

/// Distance between the two slope probe points.
const SLOPE_PROBE_OFFSET: f32 = 2.0;

/// Absolute secondary noise value below which a cell is on a secondary path.
const SECONDARY_THRESHOLD: f32 = 0.08;

/// Influence of a cell whose whole neighbourhood is on the path.
const BASE_INFLUENCE: f32 = 0.7;

/// Multiplier applied for each neighbour probe that is off the path.
const EDGE_PENALTY: f32 = 0.55;

/// Offset of the neighbour probes around a cell.
const NEIGHBOUR_OFFSET: f32 = 1.5;

/// Path field over continuous world coordinates.
///
/// Pure function of its inputs: the same seed and the same `(wx, wz)` always
/// give the same answer.
#[derive(Clone)]
pub struct PathField {
    noise: NoiseField,
}

impl PathField {
    /// Creates a path field sampling the given noise field.
    #[must_use]
    pub fn new(noise: NoiseField) -> Self {
        Self { noise }
    }

    /// Combined primary network value `|n1| + 0.5 * |n2|`.
    #[inline]
    fn primary_value(&self, wx: f32, wz: f32) -> f32 {
        let n1 = self.noise.sample(wx * 0.015 + 1000.0, wz * 0.015 + 1000.0);
        let n2 = self.noise.sample(wx * 0.02 + 2000.0, wz * 0.02 + 2000.0);
        n1.abs() + n2.abs() * 0.5
    }

    #[inline]
    fn secondary_value(&self, wx: f32, wz: f32) -> f32 {
        self.noise.sample(wx * 0.01 + 5000.0, wz * 0.01 + 5000.0)
    }

    /// Estimates local slope by probing a coarse height layer at two points.
    #[inline]
    fn slope(&self, wx: f32, wz: f32) -> f32 {
        let h1 = self.noise.sample(wx * 0.008, wz * 0.008) * 4.0;
        let h2 = self.noise.sample((wx + SLOPE_PROBE_OFFSET) * 0.008, wz * 0.008) * 4.0;
        (h2 - h1).abs()
    }

    /// Returns true if the world position lies on a path.
    #[must_use]
    pub fn is_on_path(&self, wx: f32, wz: f32) -> bool {
        if self.primary_value(wx, wz) < PRIMARY_THRESHOLD {
            return self.slope(wx, wz) < MAX_PATH_SLOPE;
        }

        self.secondary_value(wx, wz).abs() < SECONDARY_THRESHOLD
    }

    /// Returns true if the position is inside either path network, ignoring slope.
    ///
    /// Used to keep vegetation off the paths, including steep primary cells
    /// that `is_on_path` rejects.
    #[must_use]
    pub fn in_path_network(&self, wx: f32, wz: f32) -> bool {
        self.primary_value(wx, wz) < PRIMARY_THRESHOLD
            || self.secondary_value(wx, wz).abs() < SECONDARY_THRESHOLD
    }

    /// Returns the path blend factor at a world position, in [0, 1].
    ///
    /// Zero off the path. On the path, starts at 0.7 and is multiplied by
    /// 0.55 for each of the 8 surrounding probes that is not on a path.
    #[must_use]
    pub fn path_influence(&self, wx: f32, wz: f32) -> f32 {
        if !self.is_on_path(wx, wz) {
            return 0.0;
        }

        let offsets = [-NEIGHBOUR_OFFSET, 0.0, NEIGHBOUR_OFFSET];
        let mut influence = BASE_INFLUENCE;

        for dx in offsets {
            for dz in offsets {
                if dx == 0.0 && dz == 0.0 {
                    continue;
                }
                if !self.is_on_path(wx + dx, wz + dz) {
                    influence *= EDGE_PENALTY;
                }
            }
        }

        influence
    }
}
