//! Frustum culling for terrain chunks.
//!
//! Extracts frustum planes from the view-projection matrix and tests
//! chunk bounding boxes against them.

use bytemuck::{Pod, Zeroable};
use raven_procedural::{ChunkCoord, CHUNK_STRIDE};

use crate::camera::{Camera, Mat4};

/// Lower bound of the vertical band used for chunk bounding boxes.
pub const CHUNK_MIN_Y: f32 = 0.0;

/// Upper bound of the vertical band used for chunk bounding boxes.
///
/// Fixed for every chunk regardless of its sampled heights.
pub const CHUNK_MAX_Y: f32 = 40.0;

/// A plane in 3D space (Ax + By + Cz + D = 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Plane {
    /// Normal X component.
    pub a: f32,
    /// Normal Y component.
    pub b: f32,
    /// Normal Z component.
    pub c: f32,
    /// Distance from origin.
    pub d: f32,
}

impl Plane {
    /// Creates a new plane.
    #[must_use]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Builds the plane `row3 + sign * row(index)` of a column-major matrix.
    fn from_rows(m: &Mat4, index: usize, sign: f32) -> Self {
        Self::new(
            m[0][3] + sign * m[0][index],
            m[1][3] + sign * m[1][index],
            m[2][3] + sign * m[2][index],
            m[3][3] + sign * m[3][index],
        )
    }

    /// Normalizes the plane by the length of its normal.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = (self.a * self.a + self.b * self.b + self.c * self.c).sqrt();
        if len > 0.0 {
            Self {
                a: self.a / len,
                b: self.b / len,
                c: self.c / len,
                d: self.d / len,
            }
        } else {
            self
        }
    }

    /// Returns the signed distance from a point to the plane.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, p: [f32; 3]) -> f32 {
        self.a * p[0] + self.b * p[1] + self.c * p[2] + self.d
    }
}

/// View frustum for culling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Plane indices.
    pub const LEFT: usize = 0;
    /// Right plane index.
    pub const RIGHT: usize = 1;
    /// Bottom plane index.
    pub const BOTTOM: usize = 2;
    /// Top plane index.
    pub const TOP: usize = 3;
    /// Near plane index.
    pub const NEAR: usize = 4;
    /// Far plane index.
    pub const FAR: usize = 5;

    /// Extracts normalized frustum planes from a column-major view-projection matrix.
    #[must_use]
    pub fn from_view_projection(m: &Mat4) -> Self {
        let mut planes = [Plane::default(); 6];

        planes[Self::LEFT] = Plane::from_rows(m, 0, 1.0).normalized();
        planes[Self::RIGHT] = Plane::from_rows(m, 0, -1.0).normalized();
        planes[Self::BOTTOM] = Plane::from_rows(m, 1, 1.0).normalized();
        planes[Self::TOP] = Plane::from_rows(m, 1, -1.0).normalized();
        planes[Self::NEAR] = Plane::from_rows(m, 2, 1.0).normalized();
        planes[Self::FAR] = Plane::from_rows(m, 2, -1.0).normalized();

        Self { planes }
    }

    /// Returns false only if some plane has every corner of the box behind it.
    ///
    /// Conservative: boxes near frustum corners may pass while outside.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let corners = aabb.corners();
        self.planes.iter().all(|plane| {
            corners
                .iter()
                .any(|&corner| plane.distance_to_point(corner) >= 0.0)
        })
    }

    /// Returns true if the point is inside or on every plane.
    #[must_use]
    pub fn contains_point(&self, p: [f32; 3]) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(p) >= 0.0)
    }
}

/// Axis-aligned bounding box for culling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: [f32; 3],
    /// Maximum corner.
    pub max: [f32; 3],
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Bounding box of a terrain chunk: its footprint over the fixed [0, 40] band.
    #[must_use]
    pub fn for_chunk(coord: ChunkCoord) -> Self {
        let min_x = coord.world_x() as f32;
        let min_z = coord.world_z() as f32;
        let stride = CHUNK_STRIDE as f32;

        Self {
            min: [min_x, CHUNK_MIN_Y, min_z],
            max: [min_x + stride, CHUNK_MAX_Y, min_z + stride],
        }
    }

    /// The eight corners.
    #[must_use]
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [lo[0], hi[1], hi[2]],
            [hi[0], hi[1], hi[2]],
        ]
    }

    /// Returns the center of the AABB.
    #[must_use]
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}

/// Builds the frustum for a camera at an aspect ratio.
#[must_use]
pub fn extract_frustum(camera: &Camera, aspect: f32) -> Frustum {
    Frustum::from_view_projection(&camera.view_projection(aspect))
}

/// One-shot visibility test for a chunk.
///
/// Extracts a fresh frustum each call; passes that test many chunks should
/// use a [`FrustumCuller`] instead.
#[must_use]
pub fn is_chunk_visible(coord: ChunkCoord, camera: &Camera, aspect: f32) -> bool {
    extract_frustum(camera, aspect).intersects_aabb(&Aabb::for_chunk(coord))
}

/// Frustum culler holding the planes for the current pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrustumCuller {
    frustum: Frustum,
}

impl FrustumCuller {
    /// Creates a culler for a camera.
    #[must_use]
    pub fn new(camera: &Camera, aspect: f32) -> Self {
        Self {
            frustum: extract_frustum(camera, aspect),
        }
    }

    /// Tests if a chunk is visible.
    #[must_use]
    pub fn test_chunk(&self, coord: ChunkCoord) -> bool {
        self.frustum.intersects_aabb(&Aabb::for_chunk(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_east() -> Camera {
        Camera::new([0.0, 10.0, 0.0], [100.0, 10.0, 0.0], 45.0)
    }

    #[test]
    fn test_plane_normalization() {
        let plane = Plane::new(3.0, 4.0, 0.0, 10.0);
        let normalized = plane.normalized();

        // 3-4-5 triangle, so length is 5
        assert!((normalized.a - 0.6).abs() < 0.001);
        assert!((normalized.b - 0.8).abs() < 0.001);
        assert!((normalized.d - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_planes_are_unit_length() {
        let frustum = extract_frustum(&looking_east(), 16.0 / 9.0);
        for plane in &frustum.planes {
            let len = (plane.a * plane.a + plane.b * plane.b + plane.c * plane.c).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_point_ahead_inside_point_behind_outside() {
        let frustum = extract_frustum(&looking_east(), 1.0);
        assert!(frustum.contains_point([50.0, 10.0, 0.0]));
        assert!(!frustum.contains_point([-50.0, 10.0, 0.0]));
        assert!(!frustum.contains_point([2000.0, 10.0, 0.0]));
    }

    #[test]
    fn test_chunk_behind_camera_invisible() {
        let camera = looking_east();
        assert!(!is_chunk_visible(ChunkCoord::new(-5, 0), &camera, 16.0 / 9.0));
        assert!(!is_chunk_visible(ChunkCoord::new(-3, -1), &camera, 16.0 / 9.0));
    }

    #[test]
    fn test_chunk_ahead_visible() {
        let camera = looking_east();
        assert!(is_chunk_visible(ChunkCoord::new(3, 0), &camera, 16.0 / 9.0));
        assert!(is_chunk_visible(ChunkCoord::new(3, -1), &camera, 16.0 / 9.0));
    }

    #[test]
    fn test_chunk_containing_camera_visible() {
        // Camera inside chunk (2, 2), looking in several directions
        let eye = [77.0, 20.0, 77.0];
        for target in [[200.0, 20.0, 77.0], [77.0, 20.0, -50.0], [0.0, 0.0, 0.0], [77.0, -100.0, 78.0]] {
            let camera = Camera::new(eye, target, 45.0);
            assert!(is_chunk_visible(ChunkCoord::new(2, 2), &camera, 4.0 / 3.0));
        }
    }

    #[test]
    fn test_chunk_beyond_far_plane_invisible() {
        let camera = looking_east();
        assert!(!is_chunk_visible(ChunkCoord::new(40, 0), &camera, 1.0));
    }

    #[test]
    fn test_culler_matches_one_shot() {
        let camera = Camera::new([15.0, 30.0, 15.0], [60.0, 10.0, 90.0], 60.0);
        let culler = FrustumCuller::new(&camera, 1.5);

        for x in -4..=4 {
            for z in -4..=4 {
                let coord = ChunkCoord::new(x, z);
                assert_eq!(culler.test_chunk(coord), is_chunk_visible(coord, &camera, 1.5));
            }
        }
    }

    #[test]
    fn test_chunk_aabb() {
        let aabb = Aabb::for_chunk(ChunkCoord::new(1, -1));
        assert_eq!(aabb.min, [31.0, 0.0, -31.0]);
        assert_eq!(aabb.max, [62.0, 40.0, 0.0]);
        assert_eq!(aabb.center(), [46.5, 20.0, -15.5]);
    }
}
