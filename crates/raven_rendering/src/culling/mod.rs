//! Culling systems for terrain rendering.
//!
//! Chunks are tested against the camera frustum as axis-aligned boxes.

mod frustum;

pub use frustum::{
    extract_frustum, is_chunk_visible, Aabb, Frustum, FrustumCuller, Plane, CHUNK_MAX_Y,
    CHUNK_MIN_Y,
};
