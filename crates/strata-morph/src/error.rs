//! Morphology error types.

use std::error::Error;
use std::fmt;

use strata_core::AccessError;
use strata_store::StorageError;

/// Errors from building or enumerating a [`Shape`](crate::Shape).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// The shape was asked for offsets in a different number of axes than
    /// it was defined for.
    DimensionMismatch {
        /// Number of axes the shape is defined for.
        expected: usize,
        /// Number of axes requested.
        actual: usize,
    },
    /// An explicit offset list mixes offsets of different lengths.
    RaggedOffsets {
        /// Position of the first offending offset.
        index: usize,
        /// Length of the other offsets.
        expected: usize,
        /// Length of the offending offset.
        actual: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "shape defined for {expected} axes, asked for {actual}")
            }
            Self::RaggedOffsets {
                index,
                expected,
                actual,
            } => write!(
                f,
                "offset {index} has {actual} components, expected {expected}"
            ),
        }
    }
}

impl Error for ShapeError {}

/// Errors from a morphology operation.
///
/// A failing worker aborts the whole operation; no partial output is
/// returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MorphError {
    /// Reading the input or writing the output failed.
    Access(AccessError),
    /// The structuring element does not fit the input.
    Shape(ShapeError),
    /// The output container could not be allocated.
    Storage(StorageError),
    /// At least one worker thread is required.
    InvalidThreads {
        /// The rejected thread count.
        threads: usize,
    },
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access(e) => write!(f, "access: {e}"),
            Self::Shape(e) => write!(f, "shape: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::InvalidThreads { threads } => {
                write!(f, "thread count must be at least 1, got {threads}")
            }
        }
    }
}

impl Error for MorphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(e) => Some(e),
            Self::Shape(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::InvalidThreads { .. } => None,
        }
    }
}

impl From<AccessError> for MorphError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<ShapeError> for MorphError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<StorageError> for MorphError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_cause() {
        let e = MorphError::from(ShapeError::DimensionMismatch {
            expected: 3,
            actual: 2,
        });
        assert_eq!(e.to_string(), "shape: shape defined for 3 axes, asked for 2");
        assert!(e.source().is_some());
        assert!(MorphError::InvalidThreads { threads: 0 }.source().is_none());
    }
}
