//! The [`Container`] type and its [`Layout`] choice.

use std::fmt;
use std::marker::PhantomData;

use strata_core::{AccessError, Extent, IndexSpace, Sample};
use strata_store::{
    ChunkConfig, ChunkedStorage, FlatStorage, NativeStorage, Storage, StorageError, StorageKind,
};

use crate::cursor::{Cursor, LocalizingCursor, RandomAccess};
use crate::extension::{ExtensionStrategy, Strict};
use crate::slab::{self, Slab};
use crate::source::{Sink, Source};

// ── Layout ─────────────────────────────────────────────────────────

/// Which storage backend a container is created with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// One contiguous buffer in canonical order.
    #[default]
    Flat,
    /// Fixed-size tiles in a single arena.
    Chunked(ChunkConfig),
    /// Flat addressing over a buffer handed to the native backend.
    Native,
}

impl Layout {
    fn allocate<T: Sample>(
        &self,
        space: &IndexSpace,
        prototype: &T,
    ) -> Result<Box<dyn Storage<T>>, StorageError> {
        Ok(match self {
            Self::Flat => Box::new(FlatStorage::new(space, prototype)),
            Self::Chunked(config) => Box::new(ChunkedStorage::new(space, config, prototype)?),
            Self::Native => Box::new(NativeStorage::<T, _>::new(
                space,
                vec![prototype.zeroed(); space.len()],
            )?),
        })
    }

    fn adopt<T: Sample>(
        &self,
        space: &IndexSpace,
        values: Vec<T>,
    ) -> Result<Box<dyn Storage<T>>, StorageError> {
        Ok(match self {
            Self::Flat => Box::new(FlatStorage::from_vec(space, values)?),
            Self::Chunked(config) => {
                Box::new(ChunkedStorage::from_canonical(space, config, &values)?)
            }
            Self::Native => Box::new(NativeStorage::<T, _>::new(space, values)?),
        })
    }
}

impl From<StorageKind> for Layout {
    fn from(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Flat => Self::Flat,
            StorageKind::Chunked { tile_edge } => Self::Chunked(ChunkConfig::new(tile_edge)),
            StorageKind::Native => Self::Native,
        }
    }
}

// ── Container ──────────────────────────────────────────────────────

/// An index space paired with the storage holding one sample per position.
///
/// The container is the sole owner of its storage. Cursors borrow it:
/// shared borrows give read-only cursors, exclusive borrows give cursors
/// that can also write. A write is visible to every later access of the
/// same coordinate.
///
/// `S` defaults to a boxed backend chosen at runtime through [`Layout`];
/// the typed constructors ([`flat`](Container::flat),
/// [`chunked`](Container::chunked), [`from_native`](Container::from_native))
/// keep the concrete backend type instead.
///
/// # Examples
///
/// ```
/// use strata_access::{Advance, Container, Layout, Read};
///
/// let mut img = Container::create(Layout::Flat, &[10, 9], &0u8).unwrap();
/// img.set(&[1, 4], 255).unwrap();
///
/// let mut cursor = img.cursor();
/// let mut total = 0u32;
/// while cursor.has_next() {
///     cursor.advance().unwrap();
///     total += u32::from(*cursor.get().unwrap());
/// }
/// assert_eq!(total, 255);
/// ```
pub struct Container<T, S = Box<dyn Storage<T>>> {
    space: IndexSpace,
    storage: S,
    _sample: PhantomData<fn() -> T>,
}

impl<T: Sample> Container<T> {
    /// Create a zero-based container of the given sizes.
    ///
    /// Every slot starts as `prototype.zeroed()`.
    pub fn create(layout: Layout, sizes: &[usize], prototype: &T) -> Result<Self, StorageError> {
        Self::with_space(layout, IndexSpace::new(sizes)?, prototype)
    }

    /// Create a container over an arbitrary (possibly offset) space.
    pub fn with_space(
        layout: Layout,
        space: IndexSpace,
        prototype: &T,
    ) -> Result<Self, StorageError> {
        let storage = layout.allocate(&space, prototype)?;
        tracing::debug!(?layout, %space, "created container");
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }

    /// Create a container holding `values`, given in canonical order.
    ///
    /// Returns `Err(StorageError::BufferLength)` unless `values` has exactly
    /// one sample per position.
    pub fn from_canonical(
        layout: Layout,
        space: IndexSpace,
        values: Vec<T>,
    ) -> Result<Self, StorageError> {
        let storage = layout.adopt(&space, values)?;
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }
}

impl<T: Sample> Container<T, FlatStorage<T>> {
    /// Create a zero-based container with flat storage.
    pub fn flat(sizes: &[usize], prototype: &T) -> Result<Self, StorageError> {
        let space = IndexSpace::new(sizes)?;
        let storage = FlatStorage::new(&space, prototype);
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }
}

impl<T: Sample> Container<T, ChunkedStorage<T>> {
    /// Create a zero-based container with chunked storage.
    pub fn chunked(
        sizes: &[usize],
        config: &ChunkConfig,
        prototype: &T,
    ) -> Result<Self, StorageError> {
        let space = IndexSpace::new(sizes)?;
        let storage = ChunkedStorage::new(&space, config, prototype)?;
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }
}

impl<T, B> Container<T, NativeStorage<T, B>>
where
    T: Send + Sync,
    B: AsRef<[T]> + AsMut<[T]> + Send + Sync,
{
    /// Wrap a caller-owned buffer without copying it.
    ///
    /// The buffer is interpreted in canonical order and must hold exactly
    /// one sample per position.
    pub fn from_native(sizes: &[usize], buffer: B) -> Result<Self, StorageError> {
        let space = IndexSpace::new(sizes)?;
        let storage = NativeStorage::new(&space, buffer)?;
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }

    /// Release the wrapped buffer.
    pub fn into_buffer(self) -> B {
        self.storage.into_inner()
    }
}

impl<T, S: Storage<T>> Container<T, S> {
    /// Pair an existing backend with a space of matching sizes.
    ///
    /// Returns `Err(AccessError::IncompatibleLayout)` if the backend was
    /// built for different sizes.
    pub fn from_parts(space: IndexSpace, storage: S) -> Result<Self, AccessError> {
        if storage.addressing().sizes() != space.sizes() {
            return Err(AccessError::IncompatibleLayout {
                reason: format!(
                    "storage sizes {:?} do not match space {space}",
                    storage.addressing().sizes()
                ),
            });
        }
        Ok(Self {
            space,
            storage,
            _sample: PhantomData,
        })
    }

    /// Erase the backend type.
    pub fn into_dyn(self) -> Container<T>
    where
        S: 'static,
    {
        Container {
            space: self.space,
            storage: Box::new(self.storage),
            _sample: PhantomData,
        }
    }

    /// The index space.
    pub fn space(&self) -> &IndexSpace {
        &self.space
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.space.ndim()
    }

    /// Size along axis `d`.
    pub fn size(&self, d: usize) -> usize {
        self.space.size(d)
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.space.len()
    }

    /// Whether the container holds no samples.
    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    /// The layout this container was created with.
    pub fn layout(&self) -> Layout {
        self.storage.kind().into()
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sample at the absolute coordinate `coord`.
    pub fn get(&self, coord: &[i64]) -> Result<&T, AccessError> {
        let local = self.local(coord)?;
        Ok(self.storage.get(&local))
    }

    /// Mutable sample at the absolute coordinate `coord`.
    pub fn get_mut(&mut self, coord: &[i64]) -> Result<&mut T, AccessError> {
        let local = self.local(coord)?;
        Ok(self.storage.get_mut(&local))
    }

    /// Overwrite the sample at `coord`.
    pub fn set(&mut self, coord: &[i64], value: T) -> Result<(), AccessError> {
        *self.get_mut(coord)? = value;
        Ok(())
    }

    /// Overwrite every sample with a copy of `value`.
    pub fn fill(&mut self, value: &T)
    where
        T: Clone,
    {
        for slot in self.storage.data_mut() {
            slot.clone_from(value);
        }
    }

    /// Samples in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len()).map(move |linear| self.storage.get_linear(linear))
    }

    /// Copy the samples out in canonical order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Split the container into at most `parts` disjoint slabs along the
    /// slowest (last) axis.
    ///
    /// Slab boundaries respect the backend's slab alignment, so fewer slabs
    /// than requested come back when the axis is short. An empty container
    /// yields no slabs. `parts == 0` is treated as 1.
    pub fn slabs_mut(&mut self, parts: usize) -> Result<Vec<Slab<'_, T>>, AccessError> {
        let (addressing, data) = self.storage.split_mut();
        slab::partition(&self.space, addressing, data, parts)
    }

    /// A new container over `space` with the same layout as this one.
    pub fn create_like(
        &self,
        space: IndexSpace,
        prototype: &T,
    ) -> Result<Container<T>, StorageError>
    where
        T: Sample,
    {
        Container::with_space(self.layout(), space, prototype)
    }

    /// Sequential read cursor.
    pub fn cursor(&self) -> Cursor<&Self> {
        Cursor::new(self)
    }

    /// Sequential read/write cursor.
    pub fn cursor_mut(&mut self) -> Cursor<&mut Self> {
        Cursor::new(self)
    }

    /// Sequential read cursor that tracks its coordinate.
    pub fn localizing_cursor(&self) -> LocalizingCursor<&Self> {
        LocalizingCursor::new(self)
    }

    /// Sequential read/write cursor that tracks its coordinate.
    pub fn localizing_cursor_mut(&mut self) -> LocalizingCursor<&mut Self> {
        LocalizingCursor::new(self)
    }

    /// Random access without an extension strategy.
    ///
    /// Moves always succeed; reading outside the space fails with
    /// `OutOfRange`.
    pub fn random_access(&self) -> RandomAccess<&Self, Strict> {
        RandomAccess::new(self, Strict)
    }

    /// Mutable random access without an extension strategy.
    pub fn random_access_mut(&mut self) -> RandomAccess<&mut Self, Strict> {
        RandomAccess::new(self, Strict)
    }

    /// Random access resolving outside positions through `strategy`.
    pub fn extended_access<E>(&self, strategy: E) -> RandomAccess<&Self, E>
    where
        E: ExtensionStrategy<T>,
    {
        RandomAccess::new(self, strategy)
    }

    /// Mutable random access resolving outside positions through `strategy`.
    pub fn extended_access_mut<E>(&mut self, strategy: E) -> RandomAccess<&mut Self, E>
    where
        E: ExtensionStrategy<T>,
    {
        RandomAccess::new(self, strategy)
    }

    fn local(&self, coord: &[i64]) -> Result<Extent, AccessError> {
        self.space.check_arity(coord.len())?;
        self.space
            .to_local(coord)
            .ok_or_else(|| self.space.out_of_range(coord))
    }
}

impl<T, S: Storage<T>> Source for Container<T, S> {
    type Sample = T;

    fn space(&self) -> &IndexSpace {
        &self.space
    }

    #[inline]
    fn read_local(&self, local: &[usize]) -> &T {
        self.storage.get(local)
    }

    #[inline]
    fn read_linear(&self, linear: usize) -> &T {
        self.storage.get_linear(linear)
    }
}

impl<T, S: Storage<T>> Sink for Container<T, S> {
    #[inline]
    fn write_local(&mut self, local: &[usize]) -> &mut T {
        self.storage.get_mut(local)
    }

    #[inline]
    fn write_linear(&mut self, linear: usize) -> &mut T {
        self.storage.get_linear_mut(linear)
    }
}

impl<T, S: Storage<T>> fmt::Debug for Container<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("space", &self.space)
            .field("layout", &self.storage.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::SpaceError;

    #[test]
    fn create_rejects_empty_sizes() {
        let err = Container::create(Layout::Flat, &[], &0u8).unwrap_err();
        assert_eq!(err, StorageError::Space(SpaceError::NoDimensions));
    }

    #[test]
    fn every_slot_starts_zeroed() {
        for layout in [Layout::Flat, Layout::Chunked(ChunkConfig::new(3)), Layout::Native] {
            let c = Container::create(layout, &[4, 5], &7i32).unwrap();
            assert_eq!(c.len(), 20);
            assert!(c.iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn layout_survives_type_erasure() {
        let c = Container::chunked(&[6, 6], &ChunkConfig::new(4), &0u8).unwrap();
        let erased = c.into_dyn();
        assert_eq!(erased.layout(), Layout::Chunked(ChunkConfig::new(4)));
        let like = erased
            .create_like(IndexSpace::new(&[2, 2]).unwrap(), &0)
            .unwrap();
        assert_eq!(like.layout(), erased.layout());
    }

    #[test]
    fn checked_access_honours_offsets() {
        let space = IndexSpace::with_offset(&[3, 3], &[-1, -1]).unwrap();
        let mut c = Container::with_space(Layout::Flat, space, &0u8).unwrap();
        c.set(&[-1, 1], 9).unwrap();
        assert_eq!(c.get(&[-1, 1]), Ok(&9));
        assert_eq!(c.to_vec()[6], 9);
        assert!(matches!(
            c.get(&[2, 0]),
            Err(AccessError::OutOfRange { .. })
        ));
        assert_eq!(
            c.get(&[0]),
            Err(AccessError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn native_buffer_is_written_in_place() {
        let mut buffer = vec![0.0f32; 6];
        {
            let mut c = Container::<f32, _>::from_native(&[3, 2], &mut buffer[..]).unwrap();
            c.set(&[0, 1], 1.5).unwrap();
            c.fill(&0.25);
            c.set(&[2, 1], 4.0).unwrap();
        }
        assert_eq!(buffer, vec![0.25, 0.25, 0.25, 0.25, 0.25, 4.0]);
    }

    #[test]
    fn from_canonical_preserves_order_for_every_layout() {
        let values: Vec<u16> = (0..60).collect();
        for layout in [Layout::Flat, Layout::Chunked(ChunkConfig::new(4)), Layout::Native] {
            let space = IndexSpace::new(&[5, 4, 3]).unwrap();
            let c = Container::from_canonical(layout, space, values.clone()).unwrap();
            assert_eq!(c.to_vec(), values);
            assert_eq!(c.get(&[4, 3, 2]), Ok(&59));
        }
    }

    #[test]
    fn from_parts_rejects_mismatched_storage() {
        let space = IndexSpace::new(&[2, 2]).unwrap();
        let other = IndexSpace::new(&[2, 3]).unwrap();
        let storage = FlatStorage::new(&other, &0u8);
        assert!(matches!(
            Container::<u8, _>::from_parts(space, storage),
            Err(AccessError::IncompatibleLayout { .. })
        ));
    }
}
