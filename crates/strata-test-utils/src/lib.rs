//! Test utilities for strata development.
//!
//! Every generator takes an explicit seed or RNG so a failing scenario can
//! be replayed exactly. Nothing here depends on the container crates; the
//! generators produce plain `Vec`s in canonical order that tests hand to
//! `Container::from_canonical` or write through a cursor.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Deterministic RNG for test scenarios.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// `n` floats uniform in `[0, 1)`.
pub fn random_f32s(rng: &mut ChaCha8Rng, n: usize) -> Vec<f32> {
    (0..n).map(|_| rng.random::<f32>()).collect()
}

/// `n` uniformly distributed bytes.
pub fn random_bytes(rng: &mut ChaCha8Rng, n: usize) -> Vec<u8> {
    (0..n).map(|_| rng.random::<u8>()).collect()
}

/// A sparse binary image: each of `n` pixels is 255 with probability
/// `density`, 0 otherwise.
pub fn speckle(rng: &mut ChaCha8Rng, n: usize, density: f64) -> Vec<u8> {
    (0..n)
        .map(|_| if rng.random_bool(density) { 255 } else { 0 })
        .collect()
}

/// Install a `tracing` subscriber that honours `RUST_LOG` and writes
/// through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let a = random_f32s(&mut rng(1241234), 64);
        let b = random_f32s(&mut rng(1241234), 64);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn speckle_extremes() {
        let mut r = rng(3);
        assert!(speckle(&mut r, 100, 0.0).iter().all(|&v| v == 0));
        assert!(speckle(&mut r, 100, 1.0).iter().all(|&v| v == 255));
    }
}
