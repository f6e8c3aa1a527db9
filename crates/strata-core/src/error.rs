//! Error types shared by every strata crate.
//!
//! [`AccessError`] covers cursor, accessor and container-level failures.
//! [`SpaceError`] covers index space construction.

use std::error::Error;
use std::fmt;

use crate::coord::Coord;

/// Errors arising from reading, writing or positioning within a container.
///
/// All variants are local and synchronous: the core never swallows or
/// retries them. Whether an [`OutOfRange`](Self::OutOfRange) is a bug or an
/// expected condition is the caller's decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// A coordinate or size vector has the wrong number of axes.
    DimensionMismatch {
        /// Number of axes the target expects.
        expected: usize,
        /// Number of axes supplied.
        actual: usize,
    },
    /// A coordinate lies outside the index space and no extension
    /// strategy can resolve it.
    OutOfRange {
        /// The offending coordinate.
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A sequential cursor was advanced or read past its last element.
    IterationExhausted,
    /// A sequential cursor was read before its first `advance()`.
    NotPositioned,
    /// An operation that needs matching or nested index spaces was given
    /// incompatible ones.
    IncompatibleLayout {
        /// What did not match.
        reason: String,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected} axes, got {actual}")
            }
            Self::OutOfRange { coord, bounds } => {
                write!(f, "coordinate {coord:?} out of range: {bounds}")
            }
            Self::IterationExhausted => write!(f, "cursor advanced past its last element"),
            Self::NotPositioned => write!(f, "cursor read before its first advance"),
            Self::IncompatibleLayout { reason } => {
                write!(f, "incompatible layout: {reason}")
            }
        }
    }
}

impl Error for AccessError {}

/// Errors from [`IndexSpace`](crate::IndexSpace) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// The size vector was empty; at least one axis is required.
    NoDimensions,
    /// Two per-axis vectors that must agree in length do not.
    DimensionMismatch {
        /// Number of axes of the space.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// The product of the sizes (or an axis end) does not fit the
    /// integer types used for addressing.
    SizeOverflow {
        /// The sizes that overflowed.
        sizes: Vec<usize>,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDimensions => write!(f, "index space needs at least one axis"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "expected {expected} per-axis entries, got {actual}")
            }
            Self::SizeOverflow { sizes } => {
                write!(f, "index space {sizes:?} overflows the addressable range")
            }
        }
    }
}

impl Error for SpaceError {}

impl From<SpaceError> for AccessError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual }
            }
            other => Self::IncompatibleLayout {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn display_mentions_coordinate_and_bounds() {
        let e = AccessError::OutOfRange {
            coord: smallvec![3, -1],
            bounds: "[0, 3) x [0, 2)".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("[3, -1]"));
        assert!(msg.contains("[0, 3) x [0, 2)"));
    }

    #[test]
    fn space_dimension_mismatch_converts_to_access_dimension_mismatch() {
        let e: AccessError = SpaceError::DimensionMismatch {
            expected: 2,
            actual: 3,
        }
        .into();
        assert_eq!(
            e,
            AccessError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
