//! Tiled storage backed by a single arena.

use smallvec::SmallVec;
use strata_core::coord::odometer_step;
use strata_core::{Extent, IndexSpace, Sample};

use crate::addressing::{Addressing, ChunkTable};
use crate::config::ChunkConfig;
use crate::error::StorageError;
use crate::storage::{Storage, StorageKind};

/// Fixed-size hyper-cubic tiles stored back to back in one `Vec<T>`.
///
/// A tile covers up to `tile_edge` cells along every axis; tiles on the
/// upper edge of an axis are clipped to the extent. Tile `id` (row-major
/// over the chunk grid, first axis fastest) starts at
/// `table.chunks()[id].offset()`. Elements inside a tile are again
/// row-major with the first axis fastest.
///
/// # Examples
///
/// ```
/// use strata_core::IndexSpace;
/// use strata_store::{ChunkConfig, ChunkedStorage, Storage};
///
/// let space = IndexSpace::new(&[25, 7]).unwrap();
/// let mut s = ChunkedStorage::new(&space, &ChunkConfig::new(10), &0u32).unwrap();
/// *s.get_mut(&[24, 6]) = 3;
/// assert_eq!(*s.get(&[24, 6]), 3);
/// assert_eq!(s.table().grid(), &[3, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct ChunkedStorage<T> {
    addressing: Addressing,
    arena: Vec<T>,
    tile_edge: usize,
}

impl<T: Sample> ChunkedStorage<T> {
    /// Allocate tiled storage for `space`.
    ///
    /// Returns `Err(StorageError::InvalidTileEdge)` if `config` fails
    /// validation.
    pub fn new(
        space: &IndexSpace,
        config: &ChunkConfig,
        prototype: &T,
    ) -> Result<Self, StorageError> {
        config.validate()?;
        let table = ChunkTable::new(space.sizes(), config.tile_edge);
        tracing::debug!(
            sizes = ?space.sizes(),
            tile_edge = config.tile_edge,
            chunks = table.chunks().len(),
            "allocating chunked storage"
        );
        let arena = vec![prototype.zeroed(); space.len()];
        Ok(Self {
            addressing: Addressing::Chunked(table),
            arena,
            tile_edge: config.tile_edge,
        })
    }
}

impl<T: Clone> ChunkedStorage<T> {
    /// Build tiled storage from `values` given in canonical order.
    ///
    /// Returns `Err(StorageError::BufferLength)` if `values` does not hold
    /// exactly `space.len()` samples.
    pub fn from_canonical(
        space: &IndexSpace,
        config: &ChunkConfig,
        values: &[T],
    ) -> Result<Self, StorageError> {
        config.validate()?;
        if values.len() != space.len() {
            return Err(StorageError::BufferLength {
                expected: space.len(),
                actual: values.len(),
            });
        }
        let table = ChunkTable::new(space.sizes(), config.tile_edge);
        let mut arena = Vec::with_capacity(values.len());
        let mut local: Extent = SmallVec::from_elem(0, space.ndim());
        let mut within: Extent = SmallVec::from_elem(0, space.ndim());
        let mut chunk_pos: Extent = SmallVec::from_elem(0, space.ndim());
        for handle in table.chunks() {
            within.iter_mut().for_each(|w| *w = 0);
            for _ in 0..handle.len() {
                for d in 0..space.ndim() {
                    local[d] = chunk_pos[d] * config.tile_edge + within[d];
                }
                arena.push(values[space.linear_index(&local)].clone());
                odometer_step(&mut within, handle.dims());
            }
            odometer_step(&mut chunk_pos, table.grid());
        }
        Ok(Self {
            addressing: Addressing::Chunked(table),
            arena,
            tile_edge: config.tile_edge,
        })
    }
}

impl<T> ChunkedStorage<T> {
    /// The chunk table.
    pub fn table(&self) -> &ChunkTable {
        match &self.addressing {
            Addressing::Chunked(table) => table,
            Addressing::Flat(_) => unreachable!("chunked storage always carries a chunk table"),
        }
    }

    /// Elements of tile `id` in in-tile order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid chunk id.
    pub fn chunk(&self, id: usize) -> &[T] {
        let handle = &self.table().chunks()[id];
        &self.arena[handle.offset()..handle.offset() + handle.len()]
    }
}

impl<T: Send + Sync> Storage<T> for ChunkedStorage<T> {
    fn kind(&self) -> StorageKind {
        StorageKind::Chunked {
            tile_edge: self.tile_edge,
        }
    }

    fn addressing(&self) -> &Addressing {
        &self.addressing
    }

    fn data(&self) -> &[T] {
        &self.arena
    }

    fn data_mut(&mut self) -> &mut [T] {
        &mut self.arena
    }

    fn split_mut(&mut self) -> (&Addressing, &mut [T]) {
        (&self.addressing, &mut self.arena)
    }
}
