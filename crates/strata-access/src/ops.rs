//! Whole-container operations built on cursors.

use smallvec::SmallVec;
use strata_core::{AccessError, Coord, IndexSpace, Sample};
use strata_store::Storage;

use crate::container::{Container, Layout};
use crate::cursor::{Advance, Cursor, Localize, LocalizingCursor, Position, Read, Write};
use crate::extension::Periodic;
use crate::parallel::for_each_slab;
use crate::source::{Sink, Source};

/// Copy every sample of `src` into `dst` in canonical order.
///
/// Both sides must have the same sizes; offsets may differ. Returns
/// `Err(AccessError::IncompatibleLayout)` otherwise.
pub fn copy_into<A, B>(src: &A, dst: &mut B) -> Result<(), AccessError>
where
    A: Source + ?Sized,
    B: Sink<Sample = A::Sample> + ?Sized,
    A::Sample: Sample,
{
    if !src.space().same_extent(dst.space()) {
        return Err(AccessError::IncompatibleLayout {
            reason: format!("cannot copy {} into {}", src.space(), dst.space()),
        });
    }
    let mut from = Cursor::new(src);
    let mut to = Cursor::new(dst);
    while from.has_next() {
        from.advance()?;
        to.advance()?;
        to.get_mut()?.assign(from.get()?);
    }
    Ok(())
}

/// A new container holding the samples of `src` that lie in `space`.
///
/// Coordinates keep their meaning: the result's space is `space` itself.
/// Returns `Err(AccessError::IncompatibleLayout)` if `space` is not
/// contained in `src`'s space.
pub fn crop<T, S>(
    src: &Container<T, S>,
    space: &IndexSpace,
    layout: Layout,
) -> Result<Container<T>, AccessError>
where
    T: Sample,
    S: Storage<T>,
{
    if !src.space().contains_space(space) {
        return Err(AccessError::IncompatibleLayout {
            reason: format!("crop region {space} not inside {}", src.space()),
        });
    }
    let mut values = Vec::with_capacity(space.len());
    let mut ra = src.random_access();
    let mut region = LocalizingCursor::new(SpaceOnly(space));
    while region.has_next() {
        region.advance()?;
        ra.move_to_cursor(&region)?;
        values.push(ra.get()?.clone());
    }
    Container::from_canonical(layout, space.clone(), values).map_err(|e| {
        AccessError::IncompatibleLayout {
            reason: e.to_string(),
        }
    })
}

/// Swap the half-spaces of every axis, as done around an FFT.
///
/// The forward pass moves the sample at `x` to `(x + n/2) mod n` on every
/// axis of size `n`; `inverse == true` undoes it, so a forward pass
/// followed by an inverse pass restores the input for odd and even sizes
/// alike. The result has the same space and layout as `container` and is
/// filled by up to `threads` workers, one slab each.
pub fn rearrange_quadrants<T, S>(
    container: &Container<T, S>,
    inverse: bool,
    threads: usize,
) -> Result<Container<T>, AccessError>
where
    T: Sample,
    S: Storage<T>,
{
    let space = container.space();
    let Some(prototype) = container.iter().next() else {
        return Container::from_canonical(container.layout(), space.clone(), Vec::new())
            .map_err(|e| AccessError::IncompatibleLayout {
                reason: e.to_string(),
            });
    };
    // Output position y reads input position y + shift.
    let shift: Coord = space
        .sizes()
        .iter()
        .map(|&n| {
            let half = n / 2;
            (if inverse { half } else { n - half }) as i64
        })
        .collect();

    let mut out = container
        .create_like(space.clone(), prototype)
        .map_err(|e| AccessError::IncompatibleLayout {
            reason: e.to_string(),
        })?;
    tracing::debug!(%space, inverse, threads, "rearranging quadrants");

    let slabs = out.slabs_mut(threads)?;
    for_each_slab(slabs, |slab| {
        let mut src = container.extended_access(Periodic);
        let mut dst = LocalizingCursor::new(slab);
        let mut pos: Coord = SmallVec::from_elem(0, shift.len());
        while dst.has_next() {
            dst.advance()?;
            dst.localize(&mut pos);
            for (p, s) in pos.iter_mut().zip(&shift) {
                *p += s;
            }
            src.set_position(&pos)?;
            dst.get_mut()?.assign(src.get()?);
        }
        Ok::<(), AccessError>(())
    })?;
    Ok(out)
}

/// A [`Source`] with coordinates but no samples, for walking a space.
struct SpaceOnly<'a>(&'a IndexSpace);

impl Source for SpaceOnly<'_> {
    type Sample = ();

    fn space(&self) -> &IndexSpace {
        self.0
    }

    fn read_local(&self, _local: &[usize]) -> &() {
        &()
    }

    fn read_linear(&self, _linear: usize) -> &() {
        &()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::ChunkConfig;

    fn numbered(layout: Layout, sizes: &[usize]) -> Container<u32> {
        let space = IndexSpace::new(sizes).unwrap();
        let values = (0..space.len() as u32).collect();
        Container::from_canonical(layout, space, values).unwrap()
    }

    #[test]
    fn copy_between_layouts_preserves_order() {
        let src = numbered(Layout::Chunked(ChunkConfig::new(3)), &[7, 4, 2]);
        let mut dst = Container::create(Layout::Native, &[7, 4, 2], &0u32).unwrap();
        copy_into(&src, &mut dst).unwrap();
        assert_eq!(dst.to_vec(), src.to_vec());
    }

    #[test]
    fn copy_rejects_different_extents() {
        let src = numbered(Layout::Flat, &[3, 3]);
        let mut dst = Container::create(Layout::Flat, &[3, 4], &0u32).unwrap();
        assert!(matches!(
            copy_into(&src, &mut dst),
            Err(AccessError::IncompatibleLayout { .. })
        ));
    }

    #[test]
    fn crop_keeps_coordinates() {
        let src = numbered(Layout::Flat, &[4, 3]);
        let region = IndexSpace::with_offset(&[2, 2], &[1, 1]).unwrap();
        let cropped = crop(&src, &region, Layout::Chunked(ChunkConfig::new(1))).unwrap();
        assert_eq!(cropped.space(), &region);
        assert_eq!(cropped.to_vec(), vec![5, 6, 9, 10]);
        assert_eq!(cropped.get(&[2, 2]), Ok(&10));
    }

    #[test]
    fn crop_outside_is_rejected() {
        let src = numbered(Layout::Flat, &[4, 3]);
        let region = IndexSpace::with_offset(&[2, 2], &[3, 0]).unwrap();
        assert!(matches!(
            crop(&src, &region, Layout::Flat),
            Err(AccessError::IncompatibleLayout { .. })
        ));
    }

    #[test]
    fn quadrant_shift_moves_the_origin_to_the_centre() {
        let src = numbered(Layout::Flat, &[5]);
        let shifted = rearrange_quadrants(&src, false, 1).unwrap();
        // Sample 0 moves to 5 / 2 = 2.
        assert_eq!(shifted.to_vec(), vec![3, 4, 0, 1, 2]);
        let back = rearrange_quadrants(&shifted, true, 1).unwrap();
        assert_eq!(back.to_vec(), src.to_vec());
    }

    #[test]
    fn quadrant_round_trip_is_layout_and_thread_independent() {
        for layout in [Layout::Flat, Layout::Chunked(ChunkConfig::new(4)), Layout::Native] {
            let src = numbered(layout.clone(), &[7, 6, 9]);
            let forward = rearrange_quadrants(&src, false, 8).unwrap();
            assert_eq!(forward.layout(), layout);
            assert_eq!(forward.to_vec(), rearrange_quadrants(&src, false, 1).unwrap().to_vec());
            let back = rearrange_quadrants(&forward, true, 8).unwrap();
            assert_eq!(back.to_vec(), src.to_vec());
        }
    }
}
