//! Containers, cursors and extension strategies for strata.
//!
//! A [`Container`] couples an [`IndexSpace`](strata_core::IndexSpace) with
//! one [`Storage`](strata_store::Storage) backend. Everything that reads or
//! writes samples goes through the small capability traits in [`cursor`]:
//!
//! ```text
//! Advance    reset / has_next / advance / state      sequential traversal
//! Localize   localize / coordinate / position        coordinate awareness
//! Position   set_position / move_by / move_to_cursor repositioning
//! Read       get                                     &T of the current slot
//! Write      get_mut / set                           &mut T of the current slot
//! ```
//!
//! [`Cursor`], [`LocalizingCursor`] and [`RandomAccess`] combine those
//! capabilities. Cursors are generic over a [`Source`] (anything that can
//! hand out samples by position), so the same cursor type walks a whole
//! container, a borrowed container, or one [`Slab`] of a container being
//! filled in parallel.
//!
//! Positions outside the index space are resolved by an
//! [`ExtensionStrategy`] before storage is touched.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compliance;
pub mod container;
pub mod cursor;
pub mod extension;
pub mod ops;
pub mod parallel;
pub mod slab;
pub mod source;

pub use container::{Container, Layout};
pub use cursor::{
    Advance, BoundState, Cursor, CursorState, Localize, LocalizingCursor, Position, RandomAccess,
    Read, Write,
};
pub use extension::{Clamp, Constant, ExtensionStrategy, Mirror, Periodic, Resolved, Strict};
pub use ops::{copy_into, crop, rearrange_quadrants};
pub use parallel::for_each_slab;
pub use slab::Slab;
pub use source::{Sink, Source};
