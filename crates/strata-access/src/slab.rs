//! Disjoint slabs along the slowest axis.
//!
//! A slab is the cells whose last-axis coordinate lies in `[lo, hi)`. Every
//! backend stores such a range contiguously when `lo` and `hi` respect its
//! slab alignment, so a container's buffer can be carved into independent
//! `&mut [T]` regions with `split_at_mut` and handed to worker threads.

use smallvec::SmallVec;
use strata_core::{AccessError, Coord, Extent, IndexSpace};
use strata_store::Addressing;

use crate::source::{Sink, Source};

/// An exclusive view of one slab of a container.
///
/// Coordinates are absolute and identical to the parent's; the slab's
/// [`space`](Source::space) is the parent space restricted along the last
/// axis.
pub struct Slab<'a, T> {
    space: IndexSpace,
    addressing: &'a Addressing,
    data: &'a mut [T],
    /// Physical index of `data[0]` in the parent buffer.
    base: usize,
    /// First local last-axis position covered.
    lo: usize,
    /// Canonical linear index of the slab's first cell in the parent.
    linear_base: usize,
}

impl<T> Slab<'_, T> {
    /// Index space covered by the slab.
    pub fn space(&self) -> &IndexSpace {
        &self.space
    }

    /// Number of cells in the slab.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the slab covers no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn physical(&self, local: &[usize]) -> usize {
        let last = local.len() - 1;
        let mut parent: Extent = SmallVec::from_slice(local);
        parent[last] += self.lo;
        self.addressing.physical(&parent) - self.base
    }

    #[inline]
    fn physical_of_linear(&self, linear: usize) -> usize {
        self.addressing.physical_of_linear(self.linear_base + linear) - self.base
    }
}

impl<T> Source for Slab<'_, T> {
    type Sample = T;

    fn space(&self) -> &IndexSpace {
        &self.space
    }

    #[inline]
    fn read_local(&self, local: &[usize]) -> &T {
        &self.data[self.physical(local)]
    }

    #[inline]
    fn read_linear(&self, linear: usize) -> &T {
        &self.data[self.physical_of_linear(linear)]
    }
}

impl<T> Sink for Slab<'_, T> {
    #[inline]
    fn write_local(&mut self, local: &[usize]) -> &mut T {
        let index = self.physical(local);
        &mut self.data[index]
    }

    #[inline]
    fn write_linear(&mut self, linear: usize) -> &mut T {
        let index = self.physical_of_linear(linear);
        &mut self.data[index]
    }
}

/// Cut `data` into at most `parts` aligned slabs of `space`.
pub(crate) fn partition<'a, T>(
    space: &IndexSpace,
    addressing: &'a Addressing,
    mut data: &'a mut [T],
    parts: usize,
) -> Result<Vec<Slab<'a, T>>, AccessError> {
    if space.is_empty() {
        return Ok(Vec::new());
    }
    let last = space.ndim() - 1;
    let n = space.size(last);
    let align = addressing.slab_alignment();
    let units = n.div_ceil(align);
    let parts = parts.clamp(1, units);
    let plane: usize = space.sizes()[..last].iter().product();

    tracing::debug!(%space, parts, align, "partitioning into slabs");

    let mut slabs = Vec::with_capacity(parts);
    for i in 0..parts {
        let lo = (i * units / parts * align).min(n);
        let hi = ((i + 1) * units / parts * align).min(n);
        let start = addressing.slab_start(lo);
        let end = addressing.slab_start(hi);

        let (head, tail) = std::mem::take(&mut data).split_at_mut(end - start);
        data = tail;

        let mut min: Coord = SmallVec::from_slice(space.min_corner());
        min[last] += lo as i64;
        let mut sizes: Extent = SmallVec::from_slice(space.sizes());
        sizes[last] = hi - lo;
        slabs.push(Slab {
            space: IndexSpace::with_offset(&sizes, &min)?,
            addressing,
            data: head,
            base: start,
            lo,
            linear_base: lo * plane,
        });
    }
    Ok(slabs)
}
