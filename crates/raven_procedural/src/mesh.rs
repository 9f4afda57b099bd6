//! # Terrain Mesh
//!
//! Converts a chunk's sample grids into an indexed triangle list.
//!
//! The vertex layout is `#[repr(C)]` and `Pod`, so the buffers can be handed
//! to any GPU backend as raw bytes without copying.

use bytemuck::{Pod, Zeroable};

use crate::chunk::{SampleGrid, CHUNK_SIZE, CHUNK_STRIDE, HEIGHT_SCALE};

/// Color blended in where a path crosses the terrain.
pub const PATH_COLOR: [u8; 3] = [80, 75, 60];

/// Number of vertices in a chunk mesh.
pub const VERTICES_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Number of indices in a chunk mesh (two triangles per quad).
pub const INDICES_PER_CHUNK: usize = (CHUNK_SIZE - 1) * (CHUNK_SIZE - 1) * 6;

/// Terrain vertex (36 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Chunk-local position; y is already scaled to render space.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinate in [0, 1] across the chunk.
    pub uv: [f32; 2],
    /// RGBA8 color.
    pub color: [u8; 4],
}

/// Owned vertex and index buffers of one chunk.
///
/// Released when the owning chunk is dropped.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u16>,
}

impl TerrainMesh {
    /// Builds the mesh for a chunk from its (smoothed) grids.
    #[must_use]
    pub fn build(heights: &SampleGrid, moisture: &SampleGrid, path_influence: &SampleGrid) -> Self {
        let mut vertices = Vec::with_capacity(VERTICES_PER_CHUNK);
        let stride = CHUNK_STRIDE as f32;

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let h = heights[z][x];
                vertices.push(TerrainVertex {
                    position: [x as f32, h * HEIGHT_SCALE, z as f32],
                    normal: vertex_normal(heights, x, z),
                    uv: [x as f32 / stride, z as f32 / stride],
                    color: terrain_color(h, moisture[z][x], path_influence[z][x]),
                });
            }
        }

        Self {
            vertices,
            indices: grid_indices(),
        }
    }

    /// Returns the vertices.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Returns the triangle-list indices.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as upload-ready bytes.
    #[inline]
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as upload-ready bytes.
    #[inline]
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Picks the terrain color for a sample.
///
/// Four height bands (low/moist ground, grass, rock, high rock), then a
/// linear blend toward [`PATH_COLOR`] by the path influence.
#[must_use]
pub fn terrain_color(height: f32, moisture: f32, path_influence: f32) -> [u8; 4] {
    let m = moisture;
    let base: [i32; 3] = if height < 1.5 {
        [
            45 + (m * 15.0) as i32,
            50 + (m * 20.0) as i32,
            35 + (m * 10.0) as i32,
        ]
    } else if height < 3.5 {
        [60 + (m * 15.0) as i32, 65 + (m * 20.0) as i32, 45]
    } else if height < 5.0 {
        [70, 68, 55]
    } else {
        [75, 70, 65]
    };

    let mut rgb = base.map(|c| c.clamp(0, 255) as u8);

    if path_influence > 0.0 {
        let p = path_influence;
        for (channel, path) in rgb.iter_mut().zip(PATH_COLOR) {
            *channel = (f32::from(*channel) * (1.0 - p) + f32::from(path) * p) as u8;
        }
    }

    [rgb[0], rgb[1], rgb[2], 255]
}

/// Central-difference normal on the scaled heights.
///
/// At the grid border the missing neighbour is replaced by the sample itself.
fn vertex_normal(heights: &SampleGrid, x: usize, z: usize) -> [f32; 3] {
    let y = |x: usize, z: usize| heights[z][x] * HEIGHT_SCALE;
    let here = y(x, z);
    let last = CHUNK_SIZE - 1;

    let left = if x > 0 { y(x - 1, z) } else { here };
    let right = if x < last { y(x + 1, z) } else { here };
    let back = if z > 0 { y(x, z - 1) } else { here };
    let front = if z < last { y(x, z + 1) } else { here };

    let dx = (right - left) / 2.0;
    let dz = (front - back) / 2.0;

    let n = [-dx, 2.0, -dz];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    [n[0] / len, n[1] / len, n[2] / len]
}

/// Triangle-list indices for the 31x31 quads of a chunk grid.
fn grid_indices() -> Vec<u16> {
    let mut indices = Vec::with_capacity(INDICES_PER_CHUNK);
    let size = CHUNK_SIZE as u16;

    for z in 0..size - 1 {
        for x in 0..size - 1 {
            let top_left = z * size + x;
            let top_right = top_left + 1;
            let bottom_left = (z + 1) * size + x;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f32) -> Box<SampleGrid> {
        Box::new([[value; CHUNK_SIZE]; CHUNK_SIZE])
    }

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 36);
    }

    #[test]
    fn test_mesh_sizes() {
        let mesh = TerrainMesh::build(&flat(2.0), &flat(0.5), &flat(0.0));

        assert_eq!(mesh.vertex_count(), VERTICES_PER_CHUNK);
        assert_eq!(mesh.indices().len(), 5766);
        assert_eq!(mesh.triangle_count(), 1922);
        assert_eq!(mesh.vertex_bytes().len(), 1024 * 36);
        assert_eq!(mesh.index_bytes().len(), 5766 * 2);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = TerrainMesh::build(&flat(1.0), &flat(0.5), &flat(0.0));
        assert!(mesh.indices().iter().all(|&i| (i as usize) < VERTICES_PER_CHUNK));
    }

    #[test]
    fn test_first_quad_winding() {
        let mesh = TerrainMesh::build(&flat(1.0), &flat(0.5), &flat(0.0));
        assert_eq!(&mesh.indices()[..6], &[0, 32, 1, 1, 32, 33]);
    }

    #[test]
    fn test_flat_normals_point_up() {
        let mesh = TerrainMesh::build(&flat(3.0), &flat(0.5), &flat(0.0));
        for vertex in mesh.vertices() {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_positions_and_uvs() {
        let mesh = TerrainMesh::build(&flat(2.0), &flat(0.5), &flat(0.0));
        let last = mesh.vertices()[VERTICES_PER_CHUNK - 1];

        assert_eq!(last.position, [31.0, 10.0, 31.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
        assert_eq!(mesh.vertices()[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_sloped_normal_tilts_downhill() {
        let mut heights = flat(0.0);
        for row in heights.iter_mut() {
            for (x, h) in row.iter_mut().enumerate() {
                *h = x as f32 * 0.1;
            }
        }
        let mesh = TerrainMesh::build(&heights, &flat(0.5), &flat(0.0));
        let n = mesh.vertices()[5 * CHUNK_SIZE + 5].normal;

        assert!(n[0] < 0.0, "Normal should lean away from rising x");
        assert!(n[1] > 0.0);
        assert!(n[2].abs() < 1e-6);
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(terrain_color(1.0, 1.0, 0.0), [60, 70, 45, 255]);
        assert_eq!(terrain_color(1.0, 0.0, 0.0), [45, 50, 35, 255]);
        assert_eq!(terrain_color(2.0, 0.5, 0.0), [67, 75, 45, 255]);
        assert_eq!(terrain_color(4.0, 0.3, 0.0), [70, 68, 55, 255]);
        assert_eq!(terrain_color(6.0, 0.3, 0.0), [75, 70, 65, 255]);
    }

    #[test]
    fn test_path_blend() {
        assert_eq!(terrain_color(6.0, 0.0, 0.5), [77, 72, 62, 255]);
        assert_eq!(terrain_color(4.0, 0.0, 1.0), [80, 75, 60, 255]);
    }
}
