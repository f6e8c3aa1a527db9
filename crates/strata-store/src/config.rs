//! Chunked storage configuration.

use crate::error::StorageError;

/// Configuration for [`ChunkedStorage`](crate::ChunkedStorage).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Edge length of every tile, in elements per axis.
    ///
    /// Default: 10. Must be at least 1. The last tile along an axis is
    /// shorter when the axis size is not a multiple of the edge.
    pub tile_edge: usize,
}

impl ChunkConfig {
    /// Default tile edge length.
    pub const DEFAULT_TILE_EDGE: usize = 10;

    /// Create a config with the given tile edge.
    pub fn new(tile_edge: usize) -> Self {
        Self { tile_edge }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.tile_edge == 0 {
            return Err(StorageError::InvalidTileEdge {
                tile_edge: self.tile_edge,
            });
        }
        Ok(())
    }

    /// Number of elements in a full (interior) tile of `ndim` axes.
    ///
    /// Saturates instead of overflowing for very high dimensionality.
    pub fn tile_len(&self, ndim: usize) -> usize {
        (0..ndim).fold(1usize, |acc, _| acc.saturating_mul(self.tile_edge))
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_EDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_edge_is_ten() {
        assert_eq!(ChunkConfig::default().tile_edge, 10);
        assert_eq!(ChunkConfig::default().tile_len(3), 1000);
    }

    #[test]
    fn zero_edge_is_rejected() {
        assert_eq!(
            ChunkConfig::new(0).validate(),
            Err(StorageError::InvalidTileEdge { tile_edge: 0 })
        );
        assert!(ChunkConfig::new(1).validate().is_ok());
    }
}
