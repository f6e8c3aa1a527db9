//! Cursor capability traits and the cursor types that combine them.
//!
//! Capabilities are split so algorithms can ask for exactly what they
//! need:
//!
//! | Trait        | Provided by                                      |
//! |--------------|--------------------------------------------------|
//! | [`Advance`]  | [`Cursor`], [`LocalizingCursor`]                 |
//! | [`Localize`] | [`LocalizingCursor`], [`RandomAccess`]           |
//! | [`Position`] | [`RandomAccess`]                                 |
//! | [`Read`]     | all three                                        |
//! | [`Write`]    | all three, when built over a [`Sink`](crate::Sink) |
//!
//! A cursor is cheap to build and never shared between threads; every
//! worker of a parallel operation creates its own.

mod localizing;
mod random;
mod sequential;

pub use localizing::LocalizingCursor;
pub use random::RandomAccess;
pub use sequential::Cursor;

use smallvec::SmallVec;
use strata_core::{AccessError, Coord};

/// Traversal state of a sequential cursor.
///
/// ```text
/// NotStarted --advance--> Positioned --advance--> Positioned ...
///      ^                       |
///      |                       +--advance past last--> Exhausted
///      +--------------- reset() -------------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Created or reset; no element addressed yet.
    NotStarted,
    /// Addressing a valid element.
    Positioned,
    /// Advanced past the last element.
    Exhausted,
}

/// Whether a random accessor currently addresses a coordinate inside the
/// index space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundState {
    /// Inside the index space.
    Inside,
    /// Outside; reads go through the extension strategy.
    Outside,
}

/// Sequential traversal in canonical order (first axis fastest).
pub trait Advance {
    /// Return to [`CursorState::NotStarted`].
    fn reset(&mut self);

    /// Whether another `advance()` would address an element.
    fn has_next(&self) -> bool;

    /// Move to the next element.
    ///
    /// Advancing when [`has_next`](Self::has_next) is `false` moves the
    /// cursor to [`CursorState::Exhausted`] and returns
    /// `Err(AccessError::IterationExhausted)`. Further calls keep failing
    /// until [`reset`](Self::reset).
    fn advance(&mut self) -> Result<(), AccessError>;

    /// Current traversal state.
    fn state(&self) -> CursorState;
}

/// Knowledge of the current absolute coordinate.
pub trait Localize {
    /// Number of axes.
    fn ndim(&self) -> usize;

    /// Write the current coordinate into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.ndim()`.
    fn localize(&self, out: &mut [i64]);

    /// Current coordinate along axis `d`.
    fn position(&self, d: usize) -> i64;

    /// The current coordinate as an owned value.
    fn coordinate(&self) -> Coord {
        let mut coord: Coord = SmallVec::from_elem(0, self.ndim());
        self.localize(&mut coord);
        coord
    }
}

/// Arbitrary repositioning, including to coordinates outside the space.
///
/// Moving never fails on range; only reads and writes do, and only when no
/// extension strategy can resolve the position.
pub trait Position: Localize {
    /// Jump to the absolute coordinate `coord`.
    fn set_position(&mut self, coord: &[i64]) -> Result<(), AccessError>;

    /// Set a single axis of the current position.
    ///
    /// # Panics
    ///
    /// Panics if `d >= self.ndim()`.
    fn set_axis(&mut self, d: usize, value: i64);

    /// Move relative to the current position.
    ///
    /// Coordinates saturate at the `i64` range.
    fn move_by(&mut self, delta: &[i64]) -> Result<(), AccessError>;

    /// Jump to another cursor's current coordinate.
    ///
    /// Equivalent to `set_position(&other.coordinate())`.
    fn move_to_cursor<L: Localize + ?Sized>(&mut self, other: &L) -> Result<(), AccessError>
    where
        Self: Sized,
    {
        if other.ndim() != self.ndim() {
            return Err(AccessError::DimensionMismatch {
                expected: self.ndim(),
                actual: other.ndim(),
            });
        }
        self.set_position(&other.coordinate())
    }

    /// Whether the current position lies inside the index space.
    fn bound_state(&self) -> BoundState;
}

/// Read access to the addressed sample.
pub trait Read {
    /// The sample type.
    type Sample;

    /// The addressed sample.
    fn get(&self) -> Result<&Self::Sample, AccessError>;
}

/// Write access to the addressed sample.
///
/// Writes go straight to storage and are visible to any later access of
/// the same coordinate.
pub trait Write: Read {
    /// The addressed sample, mutably.
    fn get_mut(&mut self) -> Result<&mut Self::Sample, AccessError>;

    /// Overwrite the addressed sample.
    fn set(&mut self, value: Self::Sample) -> Result<(), AccessError> {
        *self.get_mut()? = value;
        Ok(())
    }
}
