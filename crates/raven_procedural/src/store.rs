//! # Chunk Store
//!
//! Keyed registry of resident chunks. The store is the single owner of
//! every chunk and its mesh buffers; everyone else borrows by lookup.

use std::collections::HashMap;

use crate::chunk::{Chunk, ChunkCoord};

/// Residency of a chunk coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// No entry for this coordinate.
    Absent,
    /// Generated and resident.
    Loaded,
}

/// Registry of loaded chunks keyed by coordinate.
#[derive(Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` chunks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the residency state of a coordinate.
    #[must_use]
    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        if self.chunks.contains_key(&coord) {
            ChunkState::Loaded
        } else {
            ChunkState::Absent
        }
    }

    /// Returns true if the coordinate is loaded.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Looks up a chunk.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Inserts a chunk under its own coordinate, replacing any previous entry.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.coord, chunk)
    }

    /// Removes and returns a chunk.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }

    /// Number of loaded chunks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if nothing is loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over loaded chunks in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Drops every chunk and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.chunks.len();
        self.chunks.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::WorldSeed;
    use crate::terrain::ChunkGenerator;

    #[test]
    fn test_insert_remove_state() {
        let gen = ChunkGenerator::new(WorldSeed::new(3));
        let mut store = ChunkStore::new();
        let coord = ChunkCoord::new(1, 2);

        assert_eq!(store.state(coord), ChunkState::Absent);
        assert!(store.insert(gen.generate(coord)).is_none());
        assert_eq!(store.state(coord), ChunkState::Loaded);
        assert_eq!(store.len(), 1);

        assert!(store.remove(coord).is_some());
        assert_eq!(store.state(coord), ChunkState::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_counts() {
        let gen = ChunkGenerator::new(WorldSeed::new(3));
        let mut store = ChunkStore::with_capacity(4);
        store.insert(gen.generate(ChunkCoord::new(0, 0)));
        store.insert(gen.generate(ChunkCoord::new(0, 1)));

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
    }
}
