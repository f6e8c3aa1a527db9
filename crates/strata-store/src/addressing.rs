//! Index arithmetic for the storage layouts.
//!
//! [`Addressing`] maps a zero-based local position (or a canonical linear
//! index) to the physical index inside a backend's single buffer. It also
//! answers the slab question used by parallel writers: which contiguous
//! physical range holds all cells whose slowest-axis position lies in
//! `[lo, hi)`.

use smallvec::SmallVec;
use strata_core::coord::odometer_step;
use strata_core::Extent;

/// Row-major addressing with the first axis varying fastest.
///
/// Physical index equals the canonical linear index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatIndexer {
    sizes: Extent,
    strides: Extent,
    len: usize,
}

impl FlatIndexer {
    /// Build the indexer for the given per-axis sizes.
    ///
    /// The caller guarantees the element count does not overflow (an
    /// `IndexSpace` has already checked this).
    pub fn new(sizes: &[usize]) -> Self {
        let mut strides: Extent = SmallVec::with_capacity(sizes.len());
        let mut len = 1usize;
        for &s in sizes {
            strides.push(len);
            len *= s;
        }
        Self {
            sizes: SmallVec::from_slice(sizes),
            strides,
            len,
        }
    }

    /// Physical index of `local`.
    #[inline]
    pub fn physical(&self, local: &[usize]) -> usize {
        debug_assert!(in_extent(&self.sizes, local), "{local:?} outside {:?}", self.sizes);
        local
            .iter()
            .zip(&self.strides)
            .map(|(&p, &stride)| p * stride)
            .sum()
    }

    /// Stride of axis `d` in elements.
    pub fn stride(&self, d: usize) -> usize {
        self.strides[d]
    }
}

/// Location of one tile inside the chunk arena.
///
/// Handles are plain offsets into the arena buffer: resolving one is O(1)
/// and involves no pointer chasing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct ChunkHandle {
    /// First arena index of the tile.
    pub(crate) offset: usize,
    /// Number of elements in the tile.
    pub(crate) len: usize,
    /// Per-axis tile size (edge tiles may be smaller than the tile edge).
    pub(crate) dims: Extent,
}

impl ChunkHandle {
    /// First arena index of the tile.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements in the tile.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tile holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-axis tile size.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
}

/// Two-level addressing: (chunk id, offset within chunk).
///
/// Chunks form a grid with `ceil(size[d] / tile_edge)` tiles along axis
/// `d`. Chunk ids and in-chunk offsets are both row-major with the first
/// axis fastest, and tiles are laid out in the arena in chunk-id order.
/// Consequently all tiles sharing one slowest-axis chunk coordinate are
/// adjacent in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkTable {
    sizes: Extent,
    tile_edge: usize,
    grid: Extent,
    chunks: Vec<ChunkHandle>,
    len: usize,
}

impl ChunkTable {
    /// Lay out tiles of edge `tile_edge` over `sizes`.
    ///
    /// # Panics
    ///
    /// Panics if `tile_edge == 0`; `ChunkConfig::validate` rejects that
    /// before any table is built.
    pub fn new(sizes: &[usize], tile_edge: usize) -> Self {
        assert!(tile_edge > 0, "tile edge must be at least 1");
        let grid: Extent = sizes.iter().map(|&s| s.div_ceil(tile_edge)).collect();
        let n_chunks: usize = grid.iter().product();

        let mut chunks = Vec::with_capacity(n_chunks);
        let mut chunk_pos: Extent = SmallVec::from_elem(0, sizes.len());
        let mut offset = 0usize;
        for _ in 0..n_chunks {
            let dims: Extent = chunk_pos
                .iter()
                .zip(sizes)
                .map(|(&c, &s)| (s - c * tile_edge).min(tile_edge))
                .collect();
            let len = dims.iter().product();
            chunks.push(ChunkHandle { offset, len, dims });
            offset += len;
            odometer_step(&mut chunk_pos, &grid);
        }

        Self {
            sizes: SmallVec::from_slice(sizes),
            tile_edge,
            grid,
            chunks,
            len: offset,
        }
    }

    /// Tile edge length.
    pub fn tile_edge(&self) -> usize {
        self.tile_edge
    }

    /// Number of tiles along each axis.
    pub fn grid(&self) -> &[usize] {
        &self.grid
    }

    /// All tiles in arena order.
    pub fn chunks(&self) -> &[ChunkHandle] {
        &self.chunks
    }

    /// Chunk id and offset within that chunk for `local`.
    #[inline]
    pub fn locate(&self, local: &[usize]) -> (usize, usize) {
        debug_assert!(in_extent(&self.sizes, local), "{local:?} outside {:?}", self.sizes);
        let mut id = 0usize;
        let mut id_stride = 1usize;
        for (d, &p) in local.iter().enumerate() {
            id += (p / self.tile_edge) * id_stride;
            id_stride *= self.grid[d];
        }
        let dims = &self.chunks[id].dims;
        let mut within = 0usize;
        let mut stride = 1usize;
        for (d, &p) in local.iter().enumerate() {
            within += (p % self.tile_edge) * stride;
            stride *= dims[d];
        }
        (id, within)
    }

    /// Physical arena index of `local`.
    #[inline]
    pub fn physical(&self, local: &[usize]) -> usize {
        let (id, within) = self.locate(local);
        self.chunks[id].offset + within
    }
}

/// Index arithmetic for one of the storage layouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Addressing {
    /// Canonical row-major order (flat and native backends).
    Flat(FlatIndexer),
    /// Tiled arena (chunked backend).
    Chunked(ChunkTable),
}

impl Addressing {
    /// Per-axis sizes of the addressed extent.
    pub fn sizes(&self) -> &[usize] {
        match self {
            Self::Flat(f) => &f.sizes,
            Self::Chunked(c) => &c.sizes,
        }
    }

    /// Total number of addressed elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(f) => f.len,
            Self::Chunked(c) => c.len,
        }
    }

    /// Whether the extent is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical index of the zero-based local position `local`.
    ///
    /// `local` must lie inside the extent; this is checked only in debug
    /// builds. Out-of-extent positions either panic on buffer indexing or
    /// alias another slot.
    #[inline]
    pub fn physical(&self, local: &[usize]) -> usize {
        match self {
            Self::Flat(f) => f.physical(local),
            Self::Chunked(c) => c.physical(local),
        }
    }

    /// Physical index of the element at canonical linear index `linear`.
    #[inline]
    pub fn physical_of_linear(&self, linear: usize) -> usize {
        match self {
            Self::Flat(_) => linear,
            Self::Chunked(c) => {
                let mut local: Extent = SmallVec::from_elem(0, c.sizes.len());
                let mut rest = linear;
                for (d, slot) in local.iter_mut().enumerate() {
                    let size = c.sizes[d];
                    *slot = rest % size;
                    rest /= size;
                }
                c.physical(&local)
            }
        }
    }

    /// Granularity of contiguous slabs along the slowest (last) axis.
    ///
    /// Slab boundaries that are multiples of this value (or equal to the
    /// axis size) always start a contiguous physical range.
    pub fn slab_alignment(&self) -> usize {
        match self {
            Self::Flat(_) => 1,
            Self::Chunked(c) => c.tile_edge,
        }
    }

    /// Physical index where the slab starting at slowest-axis position
    /// `lo` begins.
    ///
    /// # Panics
    ///
    /// Panics if `lo` is not a multiple of [`slab_alignment`](Self::slab_alignment)
    /// and is below the axis size.
    pub fn slab_start(&self, lo: usize) -> usize {
        let sizes = self.sizes();
        let last = sizes.len() - 1;
        if lo >= sizes[last] || self.is_empty() {
            return self.len();
        }
        match self {
            Self::Flat(f) => lo * f.strides[last],
            Self::Chunked(c) => {
                assert!(
                    lo % c.tile_edge == 0,
                    "slab start {lo} not aligned to tile edge {}",
                    c.tile_edge
                );
                let leading: usize = c.grid[..last].iter().product();
                c.chunks[(lo / c.tile_edge) * leading].offset
            }
        }
    }
}

fn in_extent(sizes: &[usize], local: &[usize]) -> bool {
    local.len() == sizes.len() && local.iter().zip(sizes).all(|(&p, &s)| p < s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    #[test]
    fn flat_physical_is_row_major() {
        let a = Addressing::Flat(FlatIndexer::new(&[4, 3]));
        assert_eq!(a.physical(&[0, 0]), 0);
        assert_eq!(a.physical(&[3, 0]), 3);
        assert_eq!(a.physical(&[0, 1]), 4);
        assert_eq!(a.physical_of_linear(7), 7);
    }

    #[test]
    fn chunk_grid_has_short_edge_tiles() {
        let t = ChunkTable::new(&[7, 5], 3);
        assert_eq!(t.grid(), &[3, 2]);
        assert_eq!(t.chunks().len(), 6);
        // Last tile on axis 0 is 1 wide, last tile on axis 1 is 2 tall.
        assert_eq!(t.chunks()[2].dims(), &[1, 3]);
        assert_eq!(t.chunks()[5].dims(), &[1, 2]);
        assert_eq!(t.chunks().iter().map(ChunkHandle::len).sum::<usize>(), 35);
    }

    #[test]
    fn chunked_physical_is_a_bijection() {
        let sizes = [7usize, 5, 4];
        let a = Addressing::Chunked(ChunkTable::new(&sizes, 3));
        let mut seen = IndexSet::new();
        for linear in 0..a.len() {
            let p = a.physical_of_linear(linear);
            assert!(p < a.len());
            assert!(seen.insert(p), "physical index {p} produced twice");
        }
        assert_eq!(seen.len(), 140);
    }

    #[test]
    fn chunked_locate_splits_tile_and_offset() {
        let t = ChunkTable::new(&[7, 5], 3);
        // (4, 1): tile (1, 0) = id 1, in-tile (1, 1) of a 3x3 tile = 4.
        assert_eq!(t.locate(&[4, 1]), (1, 4));
        // (6, 4): tile (2, 1) = id 5, dims [1, 2], in-tile (0, 1) = 1.
        assert_eq!(t.locate(&[6, 4]), (5, 1));
    }

    #[test]
    fn slab_ranges_are_contiguous() {
        let sizes = [5usize, 4, 7];
        for a in [
            Addressing::Flat(FlatIndexer::new(&sizes)),
            Addressing::Chunked(ChunkTable::new(&sizes, 3)),
        ] {
            let align = a.slab_alignment();
            let cuts: Vec<usize> = (0..=7).step_by(align).chain([7]).collect();
            for w in cuts.windows(2) {
                let (lo, hi) = (w[0], w[1]);
                if lo == hi {
                    continue;
                }
                let (start, end) = (a.slab_start(lo), a.slab_start(hi));
                for z in lo..hi {
                    for y in 0..4 {
                        for x in 0..5 {
                            let p = a.physical(&[x, y, z]);
                            assert!(
                                p >= start && p < end,
                                "{:?} escaped slab {lo}..{hi}",
                                [x, y, z]
                            );
                        }
                    }
                }
                assert_eq!(end - start, (hi - lo) * 20);
            }
        }
    }

    proptest! {
        #[test]
        fn chunk_table_is_a_bijection_for_any_extent(
            sizes in prop::collection::vec(1usize..9, 1..4),
            tile_edge in 1usize..6,
        ) {
            let table = ChunkTable::new(&sizes, tile_edge);
            let flat = FlatIndexer::new(&sizes);
            let mut local: Extent = SmallVec::from_elem(0, sizes.len());
            let mut seen = vec![false; table.len];
            for linear in 0..table.len {
                prop_assert_eq!(flat.physical(&local), linear);
                let (id, within) = table.locate(&local);
                let chunk = &table.chunks()[id];
                prop_assert!(within < chunk.len());
                let p = table.physical(&local);
                prop_assert_eq!(p, chunk.offset() + within);
                prop_assert!(!seen[p], "physical index {} produced twice", p);
                seen[p] = true;
                odometer_step(&mut local, &sizes);
            }
            prop_assert!(seen.iter().all(|&s| s));
        }
    }
}
