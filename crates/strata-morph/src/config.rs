//! Morphology configuration.

use crate::error::MorphError;

/// Threading configuration for morphology operations.
///
/// ```
/// use strata_morph::MorphConfig;
///
/// let auto = MorphConfig::default();
/// assert!(auto.resolved_threads() >= 1);
/// assert_eq!(MorphConfig::with_threads(4).resolved_threads(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MorphConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub threads: Option<usize>,
}

impl MorphConfig {
    /// Upper bound applied to every resolved thread count.
    pub const MAX_THREADS: usize = 64;

    /// A config with an explicit thread count.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }

    /// Reject an explicit thread count of zero.
    pub fn validate(&self) -> Result<(), MorphError> {
        match self.threads {
            Some(0) => Err(MorphError::InvalidThreads { threads: 0 }),
            _ => Ok(()),
        }
    }

    /// Resolve the actual thread count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, MAX_THREADS]`.
    pub fn resolved_threads(&self) -> usize {
        match self.threads {
            Some(n) => n.clamp(1, Self::MAX_THREADS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, Self::MAX_THREADS),
        }
    }
}
