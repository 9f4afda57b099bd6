//! # Perlin Noise Field
//!
//! Deterministic 2D gradient noise, the foundation of every procedural
//! decision in the world (terrain height, moisture, paths, vegetation).
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed`, this implementation produces **exactly** the
//! same values on any platform, any time. The field holds no mutable state,
//! so it can be sampled from any number of threads in any order.
//!
//! ## Layers
//!
//! The field has a single fixed frequency. Callers build octaves by scaling
//! the coordinates and decorrelate layers by adding large constant offsets:
//!
//! ```rust,ignore
//! let noise = NoiseField::new(WorldSeed::default());
//! let base = noise.sample(wx * 0.0015, wz * 0.0015) * 8.0;
//! let hills = noise.sample(wx * 0.003 + 100.0, wz * 0.003 + 100.0) * 4.0;
//! ```

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., star placement).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}

/// Pre-computed permutation table for noise.
///
/// Computed once from the seed and shared by every sample.
#[derive(Clone)]
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
    /// Gradient table (8 directions for 2D Perlin).
    grad: [[i8; 2]; 8],
}

impl PermutationTable {
    /// Creates a new permutation table from a seed.
    fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 512];

        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates shuffle driven by xorshift64
        let mut rng_state = seed.value();
        for i in (1..256).rev() {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;

            let j = (rng_state as usize) % (i + 1);
            perm.swap(i, j);
        }

        for i in 0..256 {
            perm[256 + i] = perm[i];
        }

        let grad = [
            [1, 1], [-1, 1], [1, -1], [-1, -1],
            [1, 0], [-1, 0], [0, 1], [0, -1],
        ];

        Self { perm, grad }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(&self, hash: u8) -> [i8; 2] {
        self.grad[(hash & 7) as usize]
    }
}

/// 2D Perlin noise field.
///
/// Produces smooth, continuous values in the range [-1, 1]. The value at
/// every integer lattice point is exactly zero.
///
/// # Performance
///
/// - O(1) per sample
/// - No allocations
#[derive(Clone)]
pub struct NoiseField {
    perm_table: PermutationTable,
}

impl NoiseField {
    /// Creates a new noise field from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples the field at world-space coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let x_floor = x.floor();
        let z_floor = z.floor();

        // Wrap lattice coordinates into the table (works for negatives too)
        let xi = ((x_floor as i32) & 255) as usize;
        let zi = ((z_floor as i32) & 255) as usize;

        let xf = x - x_floor;
        let zf = z - z_floor;

        let u = fade(xf);
        let v = fade(zf);

        let table = &self.perm_table;
        let a = table.get(xi) as usize;
        let b = table.get(xi + 1) as usize;

        let aa = table.get(a + zi);
        let ab = table.get(a + zi + 1);
        let ba = table.get(b + zi);
        let bb = table.get(b + zi + 1);

        let bottom = lerp(
            self.corner(aa, xf, zf),
            self.corner(ba, xf - 1.0, zf),
            u,
        );
        let top = lerp(
            self.corner(ab, xf, zf - 1.0),
            self.corner(bb, xf - 1.0, zf - 1.0),
            u,
        );

        lerp(bottom, top, v).clamp(-1.0, 1.0)
    }

    /// Dot product of a corner gradient with the offset to the sample point.
    #[inline]
    fn corner(&self, hash: u8, dx: f32, dz: f32) -> f32 {
        let g = self.perm_table.gradient(hash);
        f32::from(g[0]) * dx + f32::from(g[1]) * dz
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = WorldSeed::new(12345);
        let noise1 = NoiseField::new(seed);
        let noise2 = NoiseField::new(seed);

        for i in 0..100 {
            let x = i as f32 * 0.13;
            let z = i as f32 * 0.17;
            assert_eq!(
                noise1.sample(x, z).to_bits(),
                noise2.sample(x, z).to_bits(),
                "Noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_different_seeds_different_fields() {
        let noise1 = NoiseField::new(WorldSeed::new(1));
        let noise2 = NoiseField::new(WorldSeed::new(2));

        let differing = (0..64)
            .map(|i| i as f32 * 0.37 + 0.21)
            .filter(|&x| noise1.sample(x, x * 0.5) != noise2.sample(x, x * 0.5))
            .count();

        assert!(differing > 0, "Different seeds should produce different fields");
    }

    #[test]
    fn test_range() {
        let noise = NoiseField::new(WorldSeed::new(42));

        for i in 0..10_000 {
            let x = (i as f32 * 0.1) - 500.0;
            let z = (i as f32 * 0.13) - 650.0;
            let value = noise.sample(x, z);

            assert!(
                (-1.0..=1.0).contains(&value),
                "Value {value} out of range at ({x}, {z})"
            );
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let noise = NoiseField::new(WorldSeed::default());

        for x in -5..5 {
            for z in -5..5 {
                assert_eq!(noise.sample(x as f32, z as f32), 0.0);
            }
        }
    }

    #[test]
    fn test_continuity() {
        let noise = NoiseField::new(WorldSeed::new(42));

        let x = 100.3;
        let z = 99.7;
        let delta = 0.001;

        let v1 = noise.sample(x, z);
        let v2 = noise.sample(x + delta, z);
        let v3 = noise.sample(x, z + delta);

        assert!((v1 - v2).abs() < 0.01, "Noise should be continuous in x");
        assert!((v1 - v3).abs() < 0.01, "Noise should be continuous in z");
    }

    #[test]
    fn test_continuity_across_cell_edges() {
        let noise = NoiseField::new(WorldSeed::new(7));

        let below = noise.sample(2.0 - 1e-4, 0.5);
        let above = noise.sample(2.0 + 1e-4, 0.5);

        assert!((below - above).abs() < 0.01);
    }

    #[test]
    fn test_field_is_not_flat() {
        let noise = NoiseField::new(WorldSeed::default());

        let max = (0..1000)
            .map(|i| noise.sample(i as f32 * 0.173 + 0.5, i as f32 * 0.091 + 0.25).abs())
            .fold(0.0f32, f32::max);

        assert!(max > 0.2, "Noise field should vary, max |value| = {max}");
    }

    #[test]
    fn test_seed_derivation() {
        let base = WorldSeed::new(42);
        let derived1 = base.derive(1);
        let derived2 = base.derive(2);
        let derived1_again = base.derive(1);

        assert_ne!(derived1, derived2, "Different purposes should give different seeds");
        assert_eq!(derived1, derived1_again, "Same purpose should give same seed");
        assert_ne!(derived1, base, "Derived seed should differ from base");
    }
}
