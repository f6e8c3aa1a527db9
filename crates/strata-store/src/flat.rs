//! Contiguous flat storage.

use strata_core::{IndexSpace, Sample};

use crate::addressing::{Addressing, FlatIndexer};
use crate::error::StorageError;
use crate::storage::{Storage, StorageKind};

/// A single contiguous `Vec<T>` in canonical order.
///
/// Physical index equals the canonical linear index, so sequential
/// traversal is a plain walk over the buffer.
#[derive(Clone, Debug)]
pub struct FlatStorage<T> {
    addressing: Addressing,
    data: Vec<T>,
}

impl<T: Sample> FlatStorage<T> {
    /// Allocate storage for `space`, every slot a copy of `prototype.zeroed()`.
    pub fn new(space: &IndexSpace, prototype: &T) -> Self {
        tracing::trace!(sizes = ?space.sizes(), len = space.len(), "allocating flat storage");
        Self {
            addressing: Addressing::Flat(FlatIndexer::new(space.sizes())),
            data: vec![prototype.zeroed(); space.len()],
        }
    }
}

impl<T> FlatStorage<T> {
    /// Adopt `values`, already in canonical order, as the buffer for `space`.
    ///
    /// Returns `Err(StorageError::BufferLength)` on a length mismatch.
    pub fn from_vec(space: &IndexSpace, values: Vec<T>) -> Result<Self, StorageError> {
        if values.len() != space.len() {
            return Err(StorageError::BufferLength {
                expected: space.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            addressing: Addressing::Flat(FlatIndexer::new(space.sizes())),
            data: values,
        })
    }

    /// Consume the storage and return its buffer in canonical order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Send + Sync> Storage<T> for FlatStorage<T> {
    fn kind(&self) -> StorageKind {
        StorageKind::Flat
    }

    fn addressing(&self) -> &Addressing {
        &self.addressing
    }

    fn data(&self) -> &[T] {
        &self.data
    }

    fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn split_mut(&mut self) -> (&Addressing, &mut [T]) {
        (&self.addressing, &mut self.data)
    }

    #[inline]
    fn get_linear(&self, linear: usize) -> &T {
        &self.data[linear]
    }

    #[inline]
    fn get_linear_mut(&mut self, linear: usize) -> &mut T {
        &mut self.data[linear]
    }
}
