//! The sequential [`Cursor`].

use strata_core::AccessError;

use crate::source::{Sink, Source};

use super::{Advance, CursorState, Read, Write};

/// Visits every sample of a [`Source`] once, in canonical order.
///
/// Built over `&Container` it reads, over `&mut Container` or a
/// [`Slab`](crate::Slab) it can also write.
#[derive(Debug)]
pub struct Cursor<A> {
    source: A,
    index: usize,
    len: usize,
    state: CursorState,
}

impl<A: Source> Cursor<A> {
    /// A cursor in [`CursorState::NotStarted`] over `source`.
    pub fn new(source: A) -> Self {
        let len = source.space().len();
        Self {
            source,
            index: 0,
            len,
            state: CursorState::NotStarted,
        }
    }

    /// Canonical linear index of the addressed element, if positioned.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::Positioned => Some(self.index),
            _ => None,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &A {
        &self.source
    }

    /// Consume the cursor and return its source.
    pub fn into_source(self) -> A {
        self.source
    }

    pub(super) fn linear(&self) -> Result<usize, AccessError> {
        match self.state {
            CursorState::Positioned => Ok(self.index),
            CursorState::NotStarted => Err(AccessError::NotPositioned),
            CursorState::Exhausted => Err(AccessError::IterationExhausted),
        }
    }

    pub(super) fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }
}

impl<A: Source> Advance for Cursor<A> {
    fn reset(&mut self) {
        self.index = 0;
        self.state = CursorState::NotStarted;
    }

    fn has_next(&self) -> bool {
        match self.state {
            CursorState::NotStarted => self.len > 0,
            CursorState::Positioned => self.index + 1 < self.len,
            CursorState::Exhausted => false,
        }
    }

    fn advance(&mut self) -> Result<(), AccessError> {
        if !self.has_next() {
            self.state = CursorState::Exhausted;
            return Err(AccessError::IterationExhausted);
        }
        match self.state {
            CursorState::NotStarted => self.index = 0,
            _ => self.index += 1,
        }
        self.state = CursorState::Positioned;
        Ok(())
    }

    fn state(&self) -> CursorState {
        self.state
    }
}

impl<A: Source> Read for Cursor<A> {
    type Sample = A::Sample;

    #[inline]
    fn get(&self) -> Result<&A::Sample, AccessError> {
        let linear = self.linear()?;
        Ok(self.source.read_linear(linear))
    }
}

impl<A: Sink> Write for Cursor<A> {
    #[inline]
    fn get_mut(&mut self) -> Result<&mut A::Sample, AccessError> {
        let linear = self.linear()?;
        Ok(self.source.write_linear(linear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Layout};

    #[test]
    fn state_machine_runs_to_exhaustion() {
        let c = Container::create(Layout::Flat, &[2, 2], &0u8).unwrap();
        let mut cursor = c.cursor();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert_eq!(cursor.get(), Err(AccessError::NotPositioned));
        for expected in 0..4 {
            assert!(cursor.has_next());
            cursor.advance().unwrap();
            assert_eq!(cursor.index(), Some(expected));
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.state(), CursorState::Positioned);
        assert_eq!(cursor.advance(), Err(AccessError::IterationExhausted));
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.get(), Err(AccessError::IterationExhausted));
        assert_eq!(cursor.advance(), Err(AccessError::IterationExhausted));

        cursor.reset();
        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert!(cursor.has_next());
    }

    #[test]
    fn empty_source_is_exhausted_on_first_advance() {
        let c = Container::create(Layout::Flat, &[0], &0u8).unwrap();
        let mut cursor = c.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Err(AccessError::IterationExhausted));
    }

    #[test]
    fn writes_are_visible_to_later_cursors() {
        let mut c = Container::create(Layout::Flat, &[3], &0i32).unwrap();
        {
            let mut cursor = c.cursor_mut();
            let mut value = 1;
            while cursor.has_next() {
                cursor.advance().unwrap();
                cursor.set(value).unwrap();
                *cursor.get_mut().unwrap() *= 10;
                value += 1;
            }
        }
        let mut reader = c.cursor();
        let mut seen = Vec::new();
        while reader.has_next() {
            reader.advance().unwrap();
            seen.push(*reader.get().unwrap());
        }
        assert_eq!(seen, vec![10, 20, 30]);
    }
}
