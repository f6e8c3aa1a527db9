//! Storage backends for strata containers.
//!
//! A backend maps a zero-based local position inside an extent to the slot
//! holding one [`Sample`](strata_core::Sample). Three layouts are provided,
//! all with a single contiguous physical buffer:
//!
//! ```text
//! FlatStorage     Vec<T>, canonical row-major (first axis fastest)
//! ChunkedStorage  Vec<T> arena of tiles + ChunkTable (chunk id -> offset, len, dims)
//! NativeStorage   caller-owned buffer B: AsRef<[T]> + AsMut<[T]>, flat addressing
//! ```
//!
//! The index arithmetic lives in [`Addressing`], separate from the data, so
//! a backend can lend out its buffer mutably while its addressing stays
//! readable. That split is what lets the parallel slab writers in
//! `strata-access` hand disjoint `&mut [T]` regions to worker threads
//! without locks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod addressing;
pub mod chunked;
pub mod config;
pub mod error;
pub mod flat;
pub mod native;
pub mod storage;

pub use addressing::{Addressing, ChunkHandle, ChunkTable, FlatIndexer};
pub use chunked::ChunkedStorage;
pub use config::ChunkConfig;
pub use error::StorageError;
pub use flat::FlatStorage;
pub use native::NativeStorage;
pub use storage::{Storage, StorageKind};
