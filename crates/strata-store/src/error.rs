//! Storage-specific error types.

use std::error::Error;
use std::fmt;

use strata_core::SpaceError;

/// Errors that can occur while constructing a storage backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The requested extent is not a valid index space.
    Space(SpaceError),
    /// A caller-supplied buffer does not match the extent's element count.
    BufferLength {
        /// Element count of the extent.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// The chunk tile edge must be at least 1.
    InvalidTileEdge {
        /// The rejected edge length.
        tile_edge: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::BufferLength { expected, actual } => {
                write!(
                    f,
                    "buffer length mismatch: extent holds {expected} elements, buffer has {actual}"
                )
            }
            Self::InvalidTileEdge { tile_edge } => {
                write!(f, "tile edge must be at least 1, got {tile_edge}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for StorageError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
