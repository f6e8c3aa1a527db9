//! Structuring elements and multithreaded grayscale morphology over
//! strata containers.
//!
//! Samples only need `PartialOrd` plus an identity element: the plain
//! entry points take it from [`Extremum`](strata_core::Extremum), the
//! `_with` variants from the caller, so strings and other non-numeric
//! samples work as well as integers and floats.
//!
//! | Operation | Output space | Outside neighbours |
//! |-----------|--------------|--------------------|
//! | [`erode`], [`dilate`] (+ `_with`) | input's | identity |
//! | [`erode_full`], [`dilate_full`] (+ `_with`) | input grown by the shape radius | identity |
//! | [`erode_with_extension`], [`dilate_with_extension`] | input's | caller strategy |
//! | [`open`], [`close`] (+ `_with`) | input's | identity |
//!
//! Each operation takes a thread count; the output is cut into that many
//! slabs along its slowest axis and filled in parallel. Results are
//! identical for every thread count and storage layout.
//!
//! # Examples
//!
//! ```
//! use strata_access::{crop, Container, Layout};
//! use strata_morph::{erode, erode_full, CenteredRectangleShape};
//!
//! let mut img = Container::create(Layout::Flat, &[10, 9], &0u8).unwrap();
//! img.fill(&255);
//! img.set(&[1, 4], 0).unwrap();
//!
//! let shape = CenteredRectangleShape::new(&[3, 2], false);
//! let eroded = erode(&img, &shape, 4).unwrap();
//! let full = erode_full(&img, &shape, 4).unwrap();
//! assert_eq!(full.space().min_corner(), &[-3, -2]);
//!
//! let cropped = crop(&full, img.space(), Layout::Flat).unwrap();
//! assert_eq!(cropped.to_vec(), eroded.to_vec());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod morphology;
pub mod shape;

pub use config::MorphConfig;
pub use error::{MorphError, ShapeError};
pub use morphology::{
    close, close_with, dilate, dilate_full, dilate_full_with, dilate_with, dilate_with_extension,
    erode, erode_full, erode_full_with, erode_with, erode_with_extension, open, open_with,
};
pub use shape::{
    CenteredRectangleShape, DiamondShape, ExplicitShape, HyperSphereShape, RectangleShape, Shape,
    ShapeOffsets,
};
