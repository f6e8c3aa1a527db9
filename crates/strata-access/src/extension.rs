//! Extension strategies: what a read outside the index space returns.
//!
//! | Strategy                   | Coordinate `x` on an axis of size `n` (local) |
//! |----------------------------|-----------------------------------------------|
//! | [`Periodic`]               | `x mod n` (true modulo)                       |
//! | [`Mirror::edge_duplicating`] (default) | reflect, edge duplicated: `-1 -> 0`, `n -> n-1` |
//! | [`Mirror::edge_excluding`] | reflect, edge not repeated: `-1 -> 1`, `n -> n-2` |
//! | [`Clamp`]                  | nearest valid coordinate                      |
//! | [`Constant`]               | a fixed substitute value, storage untouched   |
//! | [`Strict`]                 | `OutOfRange` error                            |
//!
//! Strategies are stateless, deterministic and `Send + Sync`; one instance
//! can be shared by reference between the workers of a parallel operation.

use smallvec::SmallVec;
use strata_core::{AccessError, Coord, IndexSpace};

/// Outcome of resolving a coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved<'a, T> {
    /// Read or write the sample at this in-range coordinate.
    Inside(Coord),
    /// Use this substitute value; storage is not consulted.
    Value(&'a T),
}

/// A policy for coordinates outside an index space.
pub trait ExtensionStrategy<T>: Send + Sync {
    /// Resolve `coord` against `space`.
    ///
    /// Coordinates already inside the space resolve to themselves.
    /// Returns `DimensionMismatch` for the wrong arity and `OutOfRange`
    /// when the policy cannot produce a position (e.g. an empty axis).
    fn resolve<'a>(&'a self, coord: &[i64], space: &IndexSpace)
        -> Result<Resolved<'a, T>, AccessError>;
}

impl<T, E: ExtensionStrategy<T> + ?Sized> ExtensionStrategy<T> for &E {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        (**self).resolve(coord, space)
    }
}

impl<T, E: ExtensionStrategy<T> + ?Sized> ExtensionStrategy<T> for Box<E> {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        (**self).resolve(coord, space)
    }
}

/// Wraps every axis periodically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Periodic;

/// Reflects at the boundary.
///
/// The default policy duplicates the edge sample (period `2n`).
/// [`edge_excluding`](Self::edge_excluding) reflects about the edge sample
/// itself (period `2n - 2`); an axis of a single cell then maps everything
/// to that cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mirror {
    exclude_edge: bool,
}

impl Mirror {
    /// Edge-duplicating reflection: `-1 -> 0`, `n -> n - 1`.
    pub fn edge_duplicating() -> Self {
        Self {
            exclude_edge: false,
        }
    }

    /// Edge-excluding reflection: `-1 -> 1`, `n -> n - 2`.
    pub fn edge_excluding() -> Self {
        Self { exclude_edge: true }
    }
}

/// Moves every axis to the nearest valid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clamp;

/// Substitutes a fixed value for every outside coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constant<T>(pub T);

/// Refuses every outside coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Strict;

impl<T> ExtensionStrategy<T> for Periodic {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        remap(coord, space, |x, n| x.rem_euclid(n))
    }
}

impl<T> ExtensionStrategy<T> for Mirror {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        if self.exclude_edge {
            remap(coord, space, |x, n| {
                if n == 1 {
                    return 0;
                }
                let period = 2 * n - 2;
                let m = x.rem_euclid(period);
                if m >= n {
                    period - m
                } else {
                    m
                }
            })
        } else {
            remap(coord, space, |x, n| {
                let m = x.rem_euclid(2 * n);
                if m >= n {
                    2 * n - 1 - m
                } else {
                    m
                }
            })
        }
    }
}

impl<T> ExtensionStrategy<T> for Clamp {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        remap(coord, space, |x, n| x.clamp(0, n - 1))
    }
}

impl<T: Send + Sync> ExtensionStrategy<T> for Constant<T> {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        space.check_arity(coord.len())?;
        if space.contains(coord) {
            Ok(Resolved::Inside(SmallVec::from_slice(coord)))
        } else {
            Ok(Resolved::Value(&self.0))
        }
    }
}

impl<T> ExtensionStrategy<T> for Strict {
    fn resolve<'a>(
        &'a self,
        coord: &[i64],
        space: &IndexSpace,
    ) -> Result<Resolved<'a, T>, AccessError> {
        space.check(coord)?;
        Ok(Resolved::Inside(SmallVec::from_slice(coord)))
    }
}

/// Apply `axis(local, size)` to every axis, in i128 so no offset overflows.
///
/// `axis` receives the zero-based local coordinate and a size of at least
/// one, and must return a value in `[0, size)`.
fn remap<'a, T>(
    coord: &[i64],
    space: &IndexSpace,
    axis: impl Fn(i128, i128) -> i128,
) -> Result<Resolved<'a, T>, AccessError> {
    space.check_arity(coord.len())?;
    let mut out: Coord = SmallVec::with_capacity(coord.len());
    for (d, &x) in coord.iter().enumerate() {
        let n = space.size(d) as i128;
        if n == 0 {
            return Err(space.out_of_range(coord));
        }
        let lo = i128::from(space.min(d));
        let local = axis(i128::from(x) - lo, n);
        debug_assert!((0..n).contains(&local));
        out.push((lo + local) as i64);
    }
    Ok(Resolved::Inside(out))
}
