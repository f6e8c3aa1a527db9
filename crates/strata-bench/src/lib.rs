//! Benchmark profiles for the strata container library.
//!
//! Provides pre-built inputs shared by the criterion benches:
//!
//! - [`bench_layouts`]: the storage layouts every bench is run against
//! - [`noise_image`]: a seeded random byte container of any extent

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_access::{Container, Layout};
use strata_core::IndexSpace;
use strata_store::ChunkConfig;
use strata_test_utils::{random_bytes, rng};

/// Layouts compared by the benches, with a short label for each.
pub fn bench_layouts() -> Vec<(&'static str, Layout)> {
    vec![
        ("flat", Layout::Flat),
        ("chunked5", Layout::Chunked(ChunkConfig::new(5))),
        ("chunked10", Layout::Chunked(ChunkConfig::default())),
        ("native", Layout::Native),
    ]
}

/// A container of the given extent filled with seeded random bytes.
///
/// # Panics
///
/// Panics if `sizes` is not a valid extent.
pub fn noise_image(layout: Layout, sizes: &[usize], seed: u64) -> Container<u8> {
    let space = IndexSpace::new(sizes).expect("bench extent must be valid");
    let values = random_bytes(&mut rng(seed), space.len());
    Container::from_canonical(layout, space, values).expect("buffer matches extent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_image_is_deterministic() {
        let a = noise_image(Layout::Flat, &[16, 16], 7);
        let b = noise_image(Layout::Chunked(ChunkConfig::new(5)), &[16, 16], 7);
        assert_eq!(a.to_vec(), b.to_vec());
    }
}
