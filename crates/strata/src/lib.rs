//! Strata: N-dimensional containers with pluggable storage, cursors,
//! boundary extension and multithreaded morphology.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // A 10x9 byte image, white except for one black pixel.
//! let mut img = Container::create(Layout::Chunked(ChunkConfig::new(4)), &[10, 9], &0u8).unwrap();
//! img.fill(&255);
//! img.set(&[1, 4], 0).unwrap();
//!
//! // Erode with a 7x5 rectangle on four threads.
//! let shape = CenteredRectangleShape::new(&[3, 2], false);
//! let eroded = erode(&img, &shape, 4).unwrap();
//! assert_eq!(eroded.iter().filter(|&&v| v == 0).count(), 25);
//!
//! // Walk it with a localizing cursor.
//! let mut cursor = eroded.localizing_cursor();
//! let mut first_black = None;
//! while cursor.has_next() {
//!     cursor.advance().unwrap();
//!     if *cursor.get().unwrap() == 0 && first_black.is_none() {
//!         first_black = Some(cursor.coordinate().to_vec());
//!     }
//! }
//! assert_eq!(first_black, Some(vec![0, 2]));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | `Sample`, `IndexSpace`, coordinates, error kinds |
//! | [`store`] | `strata-store` | Flat, chunked and native storage backends |
//! | [`access`] | `strata-access` | `Container`, cursors, extension strategies, slabs, container ops |
//! | [`morph`] | `strata-morph` | Shapes and erosion/dilation/opening/closing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Sample values, index spaces and error kinds (`strata-core`).
pub use strata_core as types;

/// Storage backends (`strata-store`).
///
/// Most users pick a backend through [`access::Layout`] and never touch
/// this module directly.
pub use strata_store as store;

/// Containers, cursors and boundary extension (`strata-access`).
pub use strata_access as access;

/// Structuring elements and morphology (`strata-morph`).
pub use strata_morph as morph;

/// Common imports for typical strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Values and spaces
    pub use strata_core::{AccessError, Coord, Extremum, IndexSpace, Sample};

    // Storage
    pub use strata_store::{ChunkConfig, StorageError};

    // Containers and cursors
    pub use strata_access::{
        Advance, BoundState, Container, Cursor, CursorState, Layout, Localize, LocalizingCursor,
        Position, RandomAccess, Read, Write,
    };

    // Extension strategies
    pub use strata_access::{Clamp, Constant, Mirror, Periodic, Strict};

    // Morphology
    pub use strata_morph::{
        close, dilate, dilate_full, erode, erode_full, open, CenteredRectangleShape,
        HyperSphereShape, MorphConfig, MorphError, RectangleShape, Shape,
    };
}
