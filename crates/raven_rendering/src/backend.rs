//! The seam between draw preparation and the actual GPU.
//!
//! The windowing shell implements [`RenderBackend`]; everything in this
//! workspace only ever issues draw requests through it.

use raven_procedural::{ChunkCoord, TerrainMesh, VegetationInstance};

/// Draw sink implemented by the rendering shell.
pub trait RenderBackend {
    /// Draws one flat-colored sky dome triangle.
    fn draw_sky_triangle(&mut self, vertices: [[f32; 3]; 3], color: [u8; 4]);

    /// Draws a star sprite.
    fn draw_star(&mut self, position: [f32; 3], size: f32, color: [u8; 4]);

    /// Draws a terrain chunk mesh translated to `origin`.
    fn draw_chunk(&mut self, coord: ChunkCoord, origin: [f32; 3], mesh: &TerrainMesh);

    /// Draws one vegetation instance with a tint.
    fn draw_vegetation(&mut self, instance: &VegetationInstance, tint: [u8; 4]);

    /// Draws a solid box centered at `center`.
    fn draw_box(&mut self, center: [f32; 3], size: [f32; 3], color: [u8; 4]);

    /// Draws a horizontal square water plane centered at `center`.
    fn draw_water(&mut self, center: [f32; 3], size: f32, color: [u8; 4]);

    /// Releases any GPU copy of an evicted chunk.
    fn release_chunk(&mut self, coord: ChunkCoord);
}

/// Backend that only counts calls. Used headless and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawCounter {
    /// Sky triangles drawn.
    pub sky_triangles: u32,
    /// Stars drawn.
    pub stars: u32,
    /// Chunks drawn.
    pub chunks: u32,
    /// Vegetation instances drawn.
    pub vegetation: u32,
    /// Boxes drawn.
    pub boxes: u32,
    /// Water planes drawn.
    pub water_planes: u32,
    /// Chunk releases.
    pub released: u32,
    /// Total triangles submitted across every call.
    pub triangles: u64,
}

impl DrawCounter {
    /// Creates a zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every count to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total draw calls (releases excluded).
    #[must_use]
    pub fn draw_calls(&self) -> u32 {
        self.sky_triangles + self.stars + self.chunks + self.vegetation + self.boxes + self.water_planes
    }
}

impl RenderBackend for DrawCounter {
    fn draw_sky_triangle(&mut self, _vertices: [[f32; 3]; 3], _color: [u8; 4]) {
        self.sky_triangles += 1;
        self.triangles += 1;
    }

    fn draw_star(&mut self, _position: [f32; 3], _size: f32, _color: [u8; 4]) {
        self.stars += 1;
    }

    fn draw_chunk(&mut self, _coord: ChunkCoord, _origin: [f32; 3], mesh: &TerrainMesh) {
        self.chunks += 1;
        self.triangles += mesh.triangle_count() as u64;
    }

    fn draw_vegetation(&mut self, _instance: &VegetationInstance, _tint: [u8; 4]) {
        self.vegetation += 1;
    }

    fn draw_box(&mut self, _center: [f32; 3], _size: [f32; 3], _color: [u8; 4]) {
        self.boxes += 1;
        self.triangles += 12;
    }

    fn draw_water(&mut self, _center: [f32; 3], _size: f32, _color: [u8; 4]) {
        self.water_planes += 1;
        self.triangles += 2;
    }

    fn release_chunk(&mut self, _coord: ChunkCoord) {
        self.released += 1;
    }
}
