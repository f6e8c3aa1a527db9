//! Layout compliance helpers.
//!
//! These functions check that a container honours the iteration contract
//! whatever its storage backend. They panic with a descriptive message on
//! the first violation and are shared by the unit and integration tests of
//! every layout.

use indexmap::IndexSet;
use strata_core::{Coord, Sample};
use strata_store::Storage;

use crate::container::Container;
use crate::cursor::{Advance, Localize, Position, Read, Write};
use crate::extension::Periodic;

/// Assert a localizing cursor visits every coordinate exactly once, in
/// canonical order (first axis fastest).
pub fn assert_canonical_order_complete<T, S: Storage<T>>(c: &Container<T, S>) {
    let space = c.space();
    let mut cursor = c.localizing_cursor();
    let mut seen: IndexSet<Coord> = IndexSet::with_capacity(c.len());
    let mut local = vec![0usize; space.ndim()];
    let mut expected = vec![0i64; space.ndim()];
    while cursor.has_next() {
        cursor.advance().expect("advance while has_next");
        space.local_of_linear(seen.len(), &mut local);
        space.to_absolute(&local, &mut expected);
        let coord = cursor.coordinate();
        assert_eq!(
            coord.as_slice(),
            expected.as_slice(),
            "step {} visited {coord:?}, canonical order expects {expected:?}",
            seen.len()
        );
        assert!(seen.insert(coord.clone()), "{coord:?} visited twice");
    }
    assert_eq!(seen.len(), c.len(), "cursor visited {} of {} cells", seen.len(), c.len());
}

/// Assert sequential, localizing and random-access traversal read the same
/// sample at every step.
pub fn assert_cursor_kinds_agree<T: Sample, S: Storage<T>>(c: &Container<T, S>) {
    let mut sequential = c.cursor();
    let mut localizing = c.localizing_cursor();
    let mut random = c.random_access();
    let mut step = 0usize;
    while sequential.has_next() {
        assert!(localizing.has_next(), "localizing cursor ended early at step {step}");
        sequential.advance().expect("advance while has_next");
        localizing.advance().expect("advance while has_next");
        random
            .set_position(&localizing.coordinate())
            .expect("coordinate arity matches");
        let a = sequential.get().expect("positioned");
        let b = localizing.get().expect("positioned");
        let r = random.get().expect("inside the space");
        assert_eq!(a, b, "sequential and localizing disagree at step {step}");
        assert_eq!(a, r, "sequential and random access disagree at step {step}");
        step += 1;
    }
    assert!(!localizing.has_next(), "localizing cursor outlived sequential one");
}

/// Run the full copy cycle between two containers of equal extent and
/// assert `a` ends up holding `values` again.
///
/// 1. Fill `a` from `values` through a sequential cursor.
/// 2. Copy `a` into `b`, then `b` back into `a`, with sequential cursors.
/// 3. Copy `a` into `b` with a localizing cursor driving a random
///    accessor, alternating `move_to_cursor` and `set_position`.
/// 4. Copy `b` back into `a` reading through a periodic extension at
///    positions several periods away from the space.
pub fn assert_copy_cycle<T, SA, SB>(
    a: &mut Container<T, SA>,
    b: &mut Container<T, SB>,
    values: &[T],
) where
    T: Sample,
    SA: Storage<T>,
    SB: Storage<T>,
{
    assert_eq!(a.space().sizes(), b.space().sizes(), "copy cycle needs equal extents");
    assert_eq!(values.len(), a.len(), "one value per cell");

    {
        let mut cursor = a.cursor_mut();
        for v in values {
            cursor.advance().expect("one value per cell");
            cursor.set(v.clone()).expect("positioned");
        }
    }

    {
        let mut from = a.cursor();
        let mut to = b.cursor_mut();
        while from.has_next() {
            from.advance().expect("advance");
            to.advance().expect("equal extents");
            to.get_mut().expect("positioned").assign(from.get().expect("positioned"));
        }
    }
    {
        let mut from = b.cursor();
        let mut to = a.cursor_mut();
        while from.has_next() {
            from.advance().expect("advance");
            to.advance().expect("equal extents");
            to.get_mut().expect("positioned").assign(from.get().expect("positioned"));
        }
    }

    {
        let mut from = a.localizing_cursor();
        let mut to = b.random_access_mut();
        let mut i = 0usize;
        while from.has_next() {
            from.advance().expect("advance");
            i += 1;
            if i % 2 == 0 {
                to.move_to_cursor(&from).expect("arity");
            } else {
                to.set_position(&from.coordinate()).expect("arity");
            }
            to.get_mut().expect("inside").assign(from.get().expect("positioned"));
        }
    }

    {
        let ndim = a.ndim();
        let sizes = a.space().sizes().to_vec();
        let mut to = a.localizing_cursor_mut();
        let mut from = b.extended_access(Periodic);
        let mut pos = vec![0i64; ndim];
        let mut i = 0usize;
        let mut direction = 1i64;
        while to.has_next() {
            to.advance().expect("advance");
            to.localize(&mut pos);
            i += 1;
            let distance = (i % 5) as i64;
            direction = -direction;
            let d = i % ndim;
            pos[d] += sizes[d] as i64 * distance * direction;
            if i % 7 == 0 {
                from.set_position(&pos).expect("arity");
            } else {
                let delta: Vec<i64> = pos
                    .iter()
                    .zip(from.coordinate().iter())
                    .map(|(target, current)| target - current)
                    .collect();
                from.move_by(&delta).expect("arity");
            }
            to.get_mut().expect("positioned").assign(from.get().expect("periodic resolves"));
        }
    }

    let round_trip = a.to_vec();
    for (i, (got, want)) in round_trip.iter().zip(values).enumerate() {
        assert_eq!(got, want, "copy cycle changed linear index {i}");
    }
}
