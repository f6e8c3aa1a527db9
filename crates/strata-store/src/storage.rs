//! The [`Storage`] trait implemented by every backend.

use strata_core::{AccessError, Coord};

use crate::addressing::Addressing;

/// Which physical layout a backend uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// One contiguous buffer in canonical order.
    Flat,
    /// Fixed-size tiles in one arena buffer.
    Chunked {
        /// Tile edge length.
        tile_edge: usize,
    },
    /// A caller-owned flat buffer.
    Native,
}

/// A mapping from local positions to sample slots.
///
/// Every backend keeps its samples in one contiguous buffer and exposes
/// the index arithmetic separately through [`addressing`](Self::addressing).
/// Positions are zero-based and local to the extent; translating absolute
/// coordinates (with offsets) is the container's job.
///
/// # Thread Safety
///
/// `Send + Sync` is required so a container can be shared by reference
/// between the worker threads of a parallel operation. Mutation always
/// goes through `&mut self`, so the trait itself needs no locking.
pub trait Storage<T>: Send + Sync {
    /// The backend's layout.
    fn kind(&self) -> StorageKind;

    /// Index arithmetic for this backend.
    fn addressing(&self) -> &Addressing;

    /// The whole physical buffer.
    fn data(&self) -> &[T];

    /// The whole physical buffer, mutably.
    fn data_mut(&mut self) -> &mut [T];

    /// Borrow the addressing and the buffer at the same time.
    ///
    /// Lets callers keep computing physical indices while they hold the
    /// buffer mutably, e.g. to carve it into disjoint slabs.
    fn split_mut(&mut self) -> (&Addressing, &mut [T]);

    /// Number of slots.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether the backend holds no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot at the zero-based position `local`.
    ///
    /// # Panics
    ///
    /// May panic if `local` lies outside the extent (programmer misuse;
    /// cursors validate positions before calling this). Use
    /// [`try_get`](Self::try_get) for a checked lookup.
    #[inline]
    fn get(&self, local: &[usize]) -> &T {
        &self.data()[self.addressing().physical(local)]
    }

    /// Mutable slot at the zero-based position `local`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`get`](Self::get).
    #[inline]
    fn get_mut(&mut self, local: &[usize]) -> &mut T {
        let (addressing, data) = self.split_mut();
        let index = addressing.physical(local);
        &mut data[index]
    }

    /// Slot holding the element at canonical linear index `linear`.
    #[inline]
    fn get_linear(&self, linear: usize) -> &T {
        &self.data()[self.addressing().physical_of_linear(linear)]
    }

    /// Mutable slot holding the element at canonical linear index `linear`.
    #[inline]
    fn get_linear_mut(&mut self, linear: usize) -> &mut T {
        let (addressing, data) = self.split_mut();
        let index = addressing.physical_of_linear(linear);
        &mut data[index]
    }

    /// Checked variant of [`get`](Self::get).
    ///
    /// Returns `DimensionMismatch` for the wrong arity and `OutOfRange` for
    /// a position outside the extent.
    fn try_get(&self, local: &[usize]) -> Result<&T, AccessError> {
        check_local(self.addressing().sizes(), local)?;
        Ok(self.get(local))
    }

    /// Checked variant of [`get_mut`](Self::get_mut).
    fn try_get_mut(&mut self, local: &[usize]) -> Result<&mut T, AccessError> {
        check_local(self.addressing().sizes(), local)?;
        Ok(self.get_mut(local))
    }
}

impl<T, S: Storage<T> + ?Sized> Storage<T> for Box<S> {
    fn kind(&self) -> StorageKind {
        (**self).kind()
    }

    fn addressing(&self) -> &Addressing {
        (**self).addressing()
    }

    fn data(&self) -> &[T] {
        (**self).data()
    }

    fn data_mut(&mut self) -> &mut [T] {
        (**self).data_mut()
    }

    fn split_mut(&mut self) -> (&Addressing, &mut [T]) {
        (**self).split_mut()
    }
}

fn check_local(sizes: &[usize], local: &[usize]) -> Result<(), AccessError> {
    if local.len() != sizes.len() {
        return Err(AccessError::DimensionMismatch {
            expected: sizes.len(),
            actual: local.len(),
        });
    }
    if local.iter().zip(sizes).any(|(&p, &s)| p >= s) {
        let coord: Coord = local.iter().map(|&p| p as i64).collect();
        let bounds = sizes
            .iter()
            .map(|s| format!("[0, {s})"))
            .collect::<Vec<_>>()
            .join(" x ");
        return Err(AccessError::OutOfRange { coord, bounds });
    }
    Ok(())
}
