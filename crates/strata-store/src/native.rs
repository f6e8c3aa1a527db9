//! Storage over a caller-owned buffer.

use std::marker::PhantomData;

use strata_core::IndexSpace;

use crate::addressing::{Addressing, FlatIndexer};
use crate::error::StorageError;
use crate::storage::{Storage, StorageKind};

/// Flat addressing over a buffer the caller already owns.
///
/// `B` can be anything that derefs to a slice of samples: `&mut [T]`,
/// `Vec<T>`, `Box<[T]>`, or a wrapper around a platform image object.
/// No copy is made; the buffer is handed back by
/// [`into_inner`](Self::into_inner).
///
/// # Examples
///
/// ```
/// use strata_core::IndexSpace;
/// use strata_store::{NativeStorage, Storage};
///
/// let mut pixels = vec![0u8; 6];
/// let space = IndexSpace::new(&[3, 2]).unwrap();
/// {
///     let mut s = NativeStorage::<u8, _>::new(&space, &mut pixels[..]).unwrap();
///     *s.get_mut(&[2, 1]) = 7;
/// }
/// assert_eq!(pixels[5], 7);
/// ```
#[derive(Debug)]
pub struct NativeStorage<T, B> {
    addressing: Addressing,
    buffer: B,
    _sample: PhantomData<fn() -> T>,
}

impl<T, B> NativeStorage<T, B>
where
    B: AsRef<[T]> + AsMut<[T]>,
{
    /// Wrap `buffer` as the backing store for `space`.
    ///
    /// Returns `Err(StorageError::BufferLength)` unless the buffer holds
    /// exactly `space.len()` samples.
    pub fn new(space: &IndexSpace, buffer: B) -> Result<Self, StorageError> {
        let actual = buffer.as_ref().len();
        if actual != space.len() {
            return Err(StorageError::BufferLength {
                expected: space.len(),
                actual,
            });
        }
        Ok(Self {
            addressing: Addressing::Flat(FlatIndexer::new(space.sizes())),
            buffer,
            _sample: PhantomData,
        })
    }

    /// The wrapped buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Release the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<T, B> Storage<T> for NativeStorage<T, B>
where
    T: Send + Sync,
    B: AsRef<[T]> + AsMut<[T]> + Send + Sync,
{
    fn kind(&self) -> StorageKind {
        StorageKind::Native
    }

    fn addressing(&self) -> &Addressing {
        &self.addressing
    }

    fn data(&self) -> &[T] {
        self.buffer.as_ref()
    }

    fn data_mut(&mut self) -> &mut [T] {
        self.buffer.as_mut()
    }

    fn split_mut(&mut self) -> (&Addressing, &mut [T]) {
        (&self.addressing, self.buffer.as_mut())
    }

    #[inline]
    fn get_linear(&self, linear: usize) -> &T {
        &self.buffer.as_ref()[linear]
    }

    #[inline]
    fn get_linear_mut(&mut self, linear: usize) -> &mut T {
        &mut self.buffer.as_mut()[linear]
    }
}
