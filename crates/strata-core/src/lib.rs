//! Core types for strata containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! abstractions every other strata crate is written against:
//!
//! - [`Sample`]: the value type stored in every container slot.
//! - [`IndexSpace`]: an immutable N-dimensional rectangular extent.
//! - [`Coord`]: an absolute integer coordinate.
//! - [`AccessError`] / [`SpaceError`]: the error kinds shared by cursors,
//!   extension strategies and algorithms.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod sample;
pub mod space;

pub use coord::{Coord, Extent};
pub use error::{AccessError, SpaceError};
pub use sample::{Extremum, Sample};
pub use space::IndexSpace;
