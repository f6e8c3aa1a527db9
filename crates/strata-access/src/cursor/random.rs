//! The [`RandomAccess`] accessor.

use smallvec::SmallVec;
use strata_core::{AccessError, Coord, Extent};

use crate::extension::{ExtensionStrategy, Resolved, Strict};
use crate::source::{Sink, Source};

use super::{BoundState, Localize, Position, Read, Write};

/// An accessor that can jump to any coordinate.
///
/// Moves never fail on range. Reading inside the index space goes straight
/// to storage; reading outside goes through the extension strategy `E`.
/// With the default [`Strict`] strategy an outside read fails with
/// `OutOfRange`.
///
/// Writing outside writes the in-range slot the strategy resolves to, or
/// fails with `OutOfRange` when the strategy substitutes a value instead
/// (e.g. [`Constant`](crate::Constant)).
///
/// # Examples
///
/// ```
/// use strata_access::{Container, Layout, Periodic, Position, Read};
///
/// let mut c = Container::create(Layout::Flat, &[4], &0u8).unwrap();
/// c.set(&[1], 7).unwrap();
///
/// let mut ra = c.extended_access(Periodic);
/// ra.set_position(&[9]).unwrap();
/// assert_eq!(ra.get(), Ok(&7));
/// ```
#[derive(Debug)]
pub struct RandomAccess<A, E = Strict> {
    source: A,
    strategy: E,
    pos: Coord,
    local: Extent,
    inside: bool,
}

impl<A: Source, E> RandomAccess<A, E> {
    /// An accessor over `source` positioned at the minimum corner.
    pub fn new(source: A, strategy: E) -> Self {
        let space = source.space();
        let pos: Coord = SmallVec::from_slice(space.min_corner());
        let local: Extent = SmallVec::from_elem(0, space.ndim());
        let inside = !space.is_empty();
        Self {
            source,
            strategy,
            pos,
            local,
            inside,
        }
    }

    /// The extension strategy.
    pub fn strategy(&self) -> &E {
        &self.strategy
    }

    /// The underlying source.
    pub fn source(&self) -> &A {
        &self.source
    }

    fn update(&mut self) {
        let space = self.source.space();
        self.inside = space.contains(&self.pos);
        if self.inside {
            for d in 0..self.pos.len() {
                self.local[d] = (self.pos[d] - space.min(d)) as usize;
            }
        }
    }

    fn check_arity(&self, n: usize) -> Result<(), AccessError> {
        self.source.space().check_arity(n)
    }
}

impl<A: Source, E> Localize for RandomAccess<A, E> {
    fn ndim(&self) -> usize {
        self.pos.len()
    }

    fn localize(&self, out: &mut [i64]) {
        out.copy_from_slice(&self.pos);
    }

    fn position(&self, d: usize) -> i64 {
        self.pos[d]
    }

    fn coordinate(&self) -> Coord {
        self.pos.clone()
    }
}

impl<A: Source, E> Position for RandomAccess<A, E> {
    fn set_position(&mut self, coord: &[i64]) -> Result<(), AccessError> {
        self.check_arity(coord.len())?;
        self.pos.copy_from_slice(coord);
        self.update();
        Ok(())
    }

    fn set_axis(&mut self, d: usize, value: i64) {
        self.pos[d] = value;
        self.update();
    }

    fn move_by(&mut self, delta: &[i64]) -> Result<(), AccessError> {
        self.check_arity(delta.len())?;
        for (p, &step) in self.pos.iter_mut().zip(delta) {
            *p = p.saturating_add(step);
        }
        self.update();
        Ok(())
    }

    fn bound_state(&self) -> BoundState {
        if self.inside {
            BoundState::Inside
        } else {
            BoundState::Outside
        }
    }
}

impl<A, E> Read for RandomAccess<A, E>
where
    A: Source,
    E: ExtensionStrategy<A::Sample>,
{
    type Sample = A::Sample;

    #[inline]
    fn get(&self) -> Result<&A::Sample, AccessError> {
        if self.inside {
            return Ok(self.source.read_local(&self.local));
        }
        let space = self.source.space();
        match self.strategy.resolve(&self.pos, space)? {
            Resolved::Inside(coord) => {
                let local = space
                    .to_local(&coord)
                    .ok_or_else(|| space.out_of_range(&coord))?;
                Ok(self.source.read_local(&local))
            }
            Resolved::Value(value) => Ok(value),
        }
    }
}

impl<A, E> Write for RandomAccess<A, E>
where
    A: Sink,
    E: ExtensionStrategy<A::Sample>,
{
    fn get_mut(&mut self) -> Result<&mut A::Sample, AccessError> {
        if self.inside {
            return Ok(self.source.write_local(&self.local));
        }
        let local = {
            let space = self.source.space();
            match self.strategy.resolve(&self.pos, space)? {
                Resolved::Inside(coord) => space
                    .to_local(&coord)
                    .ok_or_else(|| space.out_of_range(&coord))?,
                Resolved::Value(_) => return Err(space.out_of_range(&self.pos)),
            }
        };
        Ok(self.source.write_local(&local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Advance, Constant, Container, Layout, Mirror};

    fn ramp(n: usize) -> Container<i32> {
        let values = (0..n as i32).collect();
        let space = strata_core::IndexSpace::new(&[n]).unwrap();
        Container::from_canonical(Layout::Flat, space, values).unwrap()
    }

    #[test]
    fn strict_access_fails_only_when_reading_outside() {
        let c = ramp(4);
        let mut ra = c.random_access();
        ra.set_position(&[7]).unwrap();
        assert_eq!(ra.bound_state(), BoundState::Outside);
        assert!(matches!(ra.get(), Err(AccessError::OutOfRange { .. })));
        ra.move_by(&[-5]).unwrap();
        assert_eq!(ra.bound_state(), BoundState::Inside);
        assert_eq!(ra.get(), Ok(&2));
    }

    #[test]
    fn arity_is_checked_on_every_move() {
        let c = ramp(4);
        let mut ra = c.random_access();
        assert_eq!(
            ra.set_position(&[0, 0]),
            Err(AccessError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert!(ra.move_by(&[]).is_err());
    }

    #[test]
    fn move_to_cursor_follows_a_localizing_cursor() {
        let c = Container::create(Layout::Flat, &[3, 2], &0u8).unwrap();
        let mut cursor = c.localizing_cursor();
        let mut ra = c.random_access();
        while cursor.has_next() {
            cursor.advance().unwrap();
            ra.move_to_cursor(&cursor).unwrap();
            assert_eq!(ra.coordinate(), cursor.coordinate());
        }
    }

    #[test]
    fn writes_outside_go_to_the_resolved_slot() {
        let mut c = ramp(4);
        {
            let mut ra = c.extended_access_mut(Mirror::default());
            ra.set_position(&[-1]).unwrap();
            ra.set(100).unwrap();
        }
        assert_eq!(c.get(&[0]), Ok(&100));
    }

    #[test]
    fn constant_substitutes_reads_and_rejects_writes() {
        let mut c = ramp(4);
        let mut ra = c.extended_access_mut(Constant(-1));
        ra.set_position(&[10]).unwrap();
        assert_eq!(ra.get(), Ok(&-1));
        assert!(matches!(ra.set(5), Err(AccessError::OutOfRange { .. })));
        ra.set_axis(0, 3);
        assert_eq!(ra.get(), Ok(&3));
    }
}
