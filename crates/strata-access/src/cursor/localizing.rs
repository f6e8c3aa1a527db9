//! The [`LocalizingCursor`].

use smallvec::SmallVec;
use strata_core::coord::odometer_step;
use strata_core::{AccessError, Extent};

use crate::source::{Sink, Source};

use super::{Advance, Cursor, CursorState, Localize, Read, Write};

/// A sequential cursor that also knows its coordinate.
///
/// Visits the same elements in the same order as [`Cursor`]; the tracked
/// coordinate always matches the current linear position. Before the first
/// `advance()` the coordinate reads as the minimum corner, after exhaustion
/// it stays at the last element.
///
/// # Examples
///
/// ```
/// use strata_access::{Advance, Container, Layout, Localize};
///
/// let c = Container::create(Layout::Flat, &[2, 2], &0u8).unwrap();
/// let mut cursor = c.localizing_cursor();
/// let mut visited = Vec::new();
/// while cursor.has_next() {
///     cursor.advance().unwrap();
///     visited.push(cursor.coordinate().to_vec());
/// }
/// assert_eq!(visited, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
/// ```
#[derive(Debug)]
pub struct LocalizingCursor<A> {
    cursor: Cursor<A>,
    local: Extent,
}

impl<A: Source> LocalizingCursor<A> {
    /// A cursor in [`CursorState::NotStarted`] over `source`.
    pub fn new(source: A) -> Self {
        let ndim = source.space().ndim();
        Self {
            cursor: Cursor::new(source),
            local: SmallVec::from_elem(0, ndim),
        }
    }

    /// Canonical linear index of the addressed element, if positioned.
    pub fn index(&self) -> Option<usize> {
        self.cursor.index()
    }

    /// The underlying source.
    pub fn source(&self) -> &A {
        self.cursor.source()
    }
}

impl<A: Source> Advance for LocalizingCursor<A> {
    fn reset(&mut self) {
        self.cursor.reset();
        self.local.iter_mut().for_each(|p| *p = 0);
    }

    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn advance(&mut self) -> Result<(), AccessError> {
        let first = self.cursor.state() == CursorState::NotStarted;
        self.cursor.advance()?;
        if !first {
            odometer_step(&mut self.local, self.cursor.source().space().sizes());
        }
        Ok(())
    }

    fn state(&self) -> CursorState {
        self.cursor.state()
    }
}

impl<A: Source> Localize for LocalizingCursor<A> {
    fn ndim(&self) -> usize {
        self.local.len()
    }

    fn localize(&self, out: &mut [i64]) {
        assert_eq!(out.len(), self.local.len(), "localize: arity mismatch");
        self.cursor.source().space().to_absolute(&self.local, out);
    }

    fn position(&self, d: usize) -> i64 {
        self.cursor.source().space().min(d) + self.local[d] as i64
    }
}

impl<A: Source> Read for LocalizingCursor<A> {
    type Sample = A::Sample;

    #[inline]
    fn get(&self) -> Result<&A::Sample, AccessError> {
        self.cursor.linear()?;
        Ok(self.cursor.source().read_local(&self.local))
    }
}

impl<A: Sink> Write for LocalizingCursor<A> {
    #[inline]
    fn get_mut(&mut self) -> Result<&mut A::Sample, AccessError> {
        self.cursor.linear()?;
        Ok(self.cursor.source_mut().write_local(&self.local))
    }
}
