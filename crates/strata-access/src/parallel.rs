//! Run a closure over slabs on scoped worker threads.
//!
//! One worker per slab, all joined before return. Workers report failures
//! over a crossbeam channel; a panicking worker propagates its panic out of
//! the scope. No partial result is ever reported as success.

use crate::slab::Slab;

/// Process every slab with `work`, one scoped thread per slab.
///
/// A single slab runs on the calling thread. If any worker fails, the
/// error from the lowest-numbered failing slab is returned once all
/// workers have finished. A worker panic is re-raised on the calling
/// thread with its original payload.
///
/// # Examples
///
/// ```
/// use strata_access::{for_each_slab, Advance, Container, Cursor, Layout, Write};
/// use strata_core::AccessError;
///
/// let mut c = Container::create(Layout::Flat, &[4, 8], &0u8).unwrap();
/// let slabs = c.slabs_mut(4).unwrap();
/// for_each_slab(slabs, |slab| {
///     let mut cursor = Cursor::new(slab);
///     while cursor.has_next() {
///         cursor.advance()?;
///         cursor.set(1)?;
///     }
///     Ok::<(), AccessError>(())
/// })
/// .unwrap();
/// assert!(c.iter().all(|&v| v == 1));
/// ```
pub fn for_each_slab<'a, T, E, F>(slabs: Vec<Slab<'a, T>>, work: F) -> Result<(), E>
where
    T: Send,
    E: Send,
    F: Fn(Slab<'a, T>) -> Result<(), E> + Sync,
{
    if slabs.len() <= 1 {
        return slabs.into_iter().try_for_each(&work);
    }

    let (err_tx, err_rx) = crossbeam_channel::unbounded();
    std::thread::scope(|scope| {
        let handles: Vec<_> = slabs
            .into_iter()
            .enumerate()
            .map(|(index, slab)| {
                let err_tx = err_tx.clone();
                let work = &work;
                scope.spawn(move || {
                    tracing::trace!(index, cells = slab.len(), "slab worker started");
                    if let Err(e) = work(slab) {
                        // The receiver outlives the scope, so this cannot fail.
                        let _ = err_tx.send((index, e));
                    }
                })
            })
            .collect();
        for handle in handles {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }
    });
    drop(err_tx);

    match err_rx.try_iter().min_by_key(|(index, _)| *index) {
        Some((index, e)) => {
            tracing::debug!(index, "slab worker failed");
            Err(e)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Advance, Container, Layout, Localize, LocalizingCursor, Write};
    use strata_core::AccessError;
    use strata_store::ChunkConfig;

    #[test]
    fn every_slab_is_processed_once() {
        for layout in [Layout::Flat, Layout::Chunked(ChunkConfig::new(3)), Layout::Native] {
            let mut c = Container::create(layout, &[5, 4, 9], &0u32).unwrap();
            let slabs = c.slabs_mut(8).unwrap();
            for_each_slab(slabs, |slab| {
                let mut cursor = LocalizingCursor::new(slab);
                while cursor.has_next() {
                    cursor.advance()?;
                    let z = cursor.position(2) as u32;
                    *cursor.get_mut()? += z + 1;
                }
                Ok::<(), AccessError>(())
            })
            .unwrap();
            let expected: Vec<u32> = (0..9u32)
                .flat_map(|z| std::iter::repeat_n(z + 1, 20))
                .collect();
            assert_eq!(c.to_vec(), expected);
        }
    }

    #[test]
    fn lowest_failing_slab_wins() {
        let mut c = Container::create(Layout::Flat, &[2, 8], &0u8).unwrap();
        let slabs = c.slabs_mut(4).unwrap();
        let result = for_each_slab(slabs, |slab| {
            let lo = slab.space().min(1);
            if lo >= 2 {
                Err(lo)
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(2));
    }

    #[test]
    #[should_panic(expected = "worker exploded")]
    fn worker_panics_propagate() {
        let mut c = Container::create(Layout::Flat, &[2, 8], &0u8).unwrap();
        let slabs = c.slabs_mut(4).unwrap();
        let _ = for_each_slab(slabs, |slab| -> Result<(), ()> {
            if slab.space().min(1) == 6 {
                panic!("worker exploded");
            }
            Ok(())
        });
    }
}
