//! # RAVEN Rendering
//!
//! Draw preparation for the terrain world:
//! - Camera math and frustum culling of chunks
//! - The terrain pass (chunks + nearby vegetation)
//! - Sky dome, star field and water plane
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Camera → view-projection → Frustum (6 planes)       │
//! │     ↓                                                │
//! │  TerrainPass: cull each resident chunk → draw_chunk  │
//! │  Sky / Water: camera-relative geometry               │
//! │     ↓                                                │
//! │  RenderBackend (implemented by the windowing shell)  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here talks to a GPU. Mesh bytes come from
//! [`raven_procedural::TerrainMesh`] and are uploaded by the backend.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atmosphere;
pub mod backend;
pub mod camera;
pub mod culling;
pub mod pipeline;

pub use atmosphere::{Sky, SkyConfig, WaterConfig, WaterPlane};
pub use backend::{DrawCounter, RenderBackend};
pub use camera::{Camera, Mat4};
pub use culling::{extract_frustum, is_chunk_visible, Aabb, Frustum, FrustumCuller};
pub use pipeline::{RenderStats, TerrainPass};
