//! The immutable N-dimensional rectangular [`IndexSpace`].

use std::fmt;

use smallvec::SmallVec;

use crate::coord::{Coord, Extent};
use crate::error::{AccessError, SpaceError};

/// An immutable N-dimensional rectangular extent.
///
/// Axis `d` covers the absolute coordinates `[min[d], min[d] + sizes[d])`.
/// The number of axes is fixed at construction and is at least one. Sizes
/// may be zero, in which case the space is empty.
///
/// The canonical traversal order is row-major with the **first** axis
/// varying fastest; every container layout iterates in this order.
///
/// # Examples
///
/// ```
/// use strata_core::IndexSpace;
///
/// let space = IndexSpace::new(&[10, 9]).unwrap();
/// assert_eq!(space.ndim(), 2);
/// assert_eq!(space.len(), 90);
/// assert!(space.contains(&[9, 8]));
/// assert!(!space.contains(&[10, 0]));
///
/// // Growing by one cell on every side shifts the origin to -1.
/// let grown = space.expand(&[1, 1]).unwrap();
/// assert_eq!(grown.size(0), 12);
/// assert_eq!(grown.min(0), -1);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndexSpace {
    min: Coord,
    sizes: Extent,
    len: usize,
}

impl IndexSpace {
    /// Create a zero-based space with the given per-axis sizes.
    ///
    /// Returns `Err(SpaceError::NoDimensions)` for an empty size vector and
    /// `Err(SpaceError::SizeOverflow)` if the element count overflows.
    pub fn new(sizes: &[usize]) -> Result<Self, SpaceError> {
        let min: Coord = SmallVec::from_elem(0, sizes.len());
        Self::with_offset(sizes, &min)
    }

    /// Create a space whose axis `d` starts at `min[d]`.
    pub fn with_offset(sizes: &[usize], min: &[i64]) -> Result<Self, SpaceError> {
        if sizes.is_empty() {
            return Err(SpaceError::NoDimensions);
        }
        if min.len() != sizes.len() {
            return Err(SpaceError::DimensionMismatch {
                expected: sizes.len(),
                actual: min.len(),
            });
        }
        let overflow = || SpaceError::SizeOverflow {
            sizes: sizes.to_vec(),
        };
        let mut len: usize = 1;
        for (&size, &lo) in sizes.iter().zip(min) {
            len = len.checked_mul(size).ok_or_else(overflow)?;
            // Every axis end must stay representable as an i64 coordinate.
            let size = i64::try_from(size).map_err(|_| overflow())?;
            lo.checked_add(size).ok_or_else(overflow)?;
        }
        Ok(Self {
            min: SmallVec::from_slice(min),
            sizes: SmallVec::from_slice(sizes),
            len,
        })
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.sizes.len()
    }

    /// Size along axis `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d >= ndim()`.
    pub fn size(&self, d: usize) -> usize {
        self.sizes[d]
    }

    /// All per-axis sizes.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// First valid coordinate along axis `d`.
    pub fn min(&self, d: usize) -> i64 {
        self.min[d]
    }

    /// The minimum corner.
    pub fn min_corner(&self) -> &[i64] {
        &self.min
    }

    /// Last valid coordinate along axis `d`, or `None` for an empty axis.
    pub fn max(&self, d: usize) -> Option<i64> {
        match self.sizes[d] {
            0 => None,
            n => Some(self.min[d] + n as i64 - 1),
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the space holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `coord` has the right arity and lies inside the space.
    pub fn contains(&self, coord: &[i64]) -> bool {
        coord.len() == self.ndim()
            && coord.iter().enumerate().all(|(d, &x)| {
                x >= self.min[d]
                    && x
                        .checked_sub(self.min[d])
                        .is_some_and(|delta| (delta as u64) < self.sizes[d] as u64)
            })
    }

    /// Validate `coord`, reporting the precise failure.
    pub fn check(&self, coord: &[i64]) -> Result<(), AccessError> {
        self.check_arity(coord.len())?;
        if self.contains(coord) {
            Ok(())
        } else {
            Err(self.out_of_range(coord))
        }
    }

    /// Fail with `DimensionMismatch` unless `n == ndim()`.
    pub fn check_arity(&self, n: usize) -> Result<(), AccessError> {
        if n == self.ndim() {
            Ok(())
        } else {
            Err(AccessError::DimensionMismatch {
                expected: self.ndim(),
                actual: n,
            })
        }
    }

    /// Build the `OutOfRange` error for `coord` against this space.
    pub fn out_of_range(&self, coord: &[i64]) -> AccessError {
        AccessError::OutOfRange {
            coord: SmallVec::from_slice(coord),
            bounds: self.to_string(),
        }
    }

    /// Convert an absolute coordinate into a zero-based local position.
    ///
    /// Returns `None` if the coordinate is outside the space or has the
    /// wrong arity.
    pub fn to_local(&self, coord: &[i64]) -> Option<Extent> {
        if !self.contains(coord) {
            return None;
        }
        Some(
            coord
                .iter()
                .zip(&self.min)
                .map(|(&x, &lo)| (x - lo) as usize)
                .collect(),
        )
    }

    /// Convert a zero-based local position into an absolute coordinate.
    pub fn to_absolute(&self, local: &[usize], out: &mut [i64]) {
        for d in 0..self.ndim() {
            out[d] = self.min[d] + local[d] as i64;
        }
    }

    /// Canonical strides: `strides[0] == 1`, `strides[d] = strides[d-1] * size(d-1)`.
    pub fn strides(&self) -> Extent {
        let mut strides: Extent = SmallVec::with_capacity(self.ndim());
        let mut acc = 1usize;
        for &s in &self.sizes {
            strides.push(acc);
            acc = acc.saturating_mul(s);
        }
        strides
    }

    /// Canonical linear index of a zero-based local position.
    pub fn linear_index(&self, local: &[usize]) -> usize {
        let mut index = 0usize;
        let mut stride = 1usize;
        for (d, &p) in local.iter().enumerate() {
            index += p * stride;
            stride *= self.sizes[d];
        }
        index
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != ndim()`.
    pub fn local_of_linear(&self, mut linear: usize, out: &mut [usize]) {
        assert_eq!(out.len(), self.ndim(), "local_of_linear: arity mismatch");
        for (d, slot) in out.iter_mut().enumerate() {
            let size = self.sizes[d];
            if size == 0 {
                *slot = 0;
                continue;
            }
            *slot = linear % size;
            linear /= size;
        }
    }

    /// A space grown by `radius[d]` cells on both sides of every axis.
    ///
    /// The minimum corner moves to `min[d] - radius[d]`, so coordinates of
    /// the original space keep their meaning inside the grown one.
    pub fn expand(&self, radius: &[usize]) -> Result<Self, SpaceError> {
        if radius.len() != self.ndim() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.ndim(),
                actual: radius.len(),
            });
        }
        let overflow = || SpaceError::SizeOverflow {
            sizes: self.sizes.to_vec(),
        };
        let mut sizes: Extent = SmallVec::with_capacity(self.ndim());
        let mut min: Coord = SmallVec::with_capacity(self.ndim());
        for d in 0..self.ndim() {
            let r = radius[d];
            sizes.push(
                r.checked_mul(2)
                    .and_then(|grow| self.sizes[d].checked_add(grow))
                    .ok_or_else(overflow)?,
            );
            let r = i64::try_from(r).map_err(|_| overflow())?;
            min.push(self.min[d].checked_sub(r).ok_or_else(overflow)?);
        }
        Self::with_offset(&sizes, &min)
    }

    /// Whether every coordinate of `other` is also inside `self`.
    ///
    /// An empty `other` of matching arity is contained in anything.
    pub fn contains_space(&self, other: &IndexSpace) -> bool {
        if other.ndim() != self.ndim() {
            return false;
        }
        if other.is_empty() {
            return true;
        }
        (0..self.ndim()).all(|d| {
            let lo_ok = other.min[d] >= self.min[d];
            let hi_ok = match (other.max(d), self.max(d)) {
                (Some(o), Some(s)) => o <= s,
                _ => false,
            };
            lo_ok && hi_ok
        })
    }

    /// Whether both spaces have identical sizes, ignoring offsets.
    pub fn same_extent(&self, other: &IndexSpace) -> bool {
        self.sizes == other.sizes
    }
}

impl fmt::Debug for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSpace")
            .field("min", &self.min.as_slice())
            .field("sizes", &self.sizes.as_slice())
            .finish()
    }
}

impl fmt::Display for IndexSpace {
    /// Renders as `[min0, end0) x [min1, end1) x ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in 0..self.ndim() {
            if d > 0 {
                write!(f, " x ")?;
            }
            let lo = self.min[d];
            write!(f, "[{}, {})", lo, lo + self.sizes[d] as i64)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_axes() {
        assert_eq!(IndexSpace::new(&[]), Err(SpaceError::NoDimensions));
    }

    #[test]
    fn rejects_offset_arity_mismatch() {
        let err = IndexSpace::with_offset(&[3, 4], &[0]).unwrap_err();
        assert_eq!(
            err,
            SpaceError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_overflowing_len() {
        let err = IndexSpace::new(&[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, SpaceError::SizeOverflow { .. }));
    }

    #[test]
    fn zero_size_axis_is_empty() {
        let s = IndexSpace::new(&[4, 0, 3]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.max(1), None);
        assert!(!s.contains(&[0, 0, 0]));
    }

    #[test]
    fn offset_shifts_valid_range() {
        let s = IndexSpace::with_offset(&[3, 2], &[-1, 5]).unwrap();
        assert!(s.contains(&[-1, 5]));
        assert!(s.contains(&[1, 6]));
        assert!(!s.contains(&[2, 6]));
        assert!(!s.contains(&[0, 4]));
        assert_eq!(s.to_local(&[0, 6]).unwrap().as_slice(), &[1, 1]);
    }

    #[test]
    fn check_reports_arity_before_range() {
        let s = IndexSpace::new(&[3, 3]).unwrap();
        assert_eq!(
            s.check(&[1]),
            Err(AccessError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(matches!(
            s.check(&[3, 0]),
            Err(AccessError::OutOfRange { .. })
        ));
        assert_eq!(s.check(&[2, 2]), Ok(()));
    }

    #[test]
    fn first_axis_is_fastest() {
        let s = IndexSpace::new(&[3, 4]).unwrap();
        assert_eq!(s.linear_index(&[1, 0]), 1);
        assert_eq!(s.linear_index(&[0, 1]), 3);
        assert_eq!(s.strides().as_slice(), &[1, 3]);
    }

    #[test]
    fn expand_grows_and_shifts() {
        let s = IndexSpace::new(&[10, 9]).unwrap();
        let g = s.expand(&[3, 2]).unwrap();
        assert_eq!(g.sizes(), &[16, 13]);
        assert_eq!(g.min_corner(), &[-3, -2]);
        assert!(g.contains_space(&s));
        assert!(!s.contains_space(&g));
    }

    #[test]
    fn display_lists_half_open_ranges() {
        let s = IndexSpace::with_offset(&[2, 3], &[-1, 0]).unwrap();
        assert_eq!(s.to_string(), "[-1, 1) x [0, 3)");
    }

    proptest! {
        #[test]
        fn linear_round_trip(
            sizes in proptest::collection::vec(1usize..7, 1..5),
            seed in 0usize..10_000,
        ) {
            let s = IndexSpace::new(&sizes).unwrap();
            let linear = seed % s.len();
            let mut local = vec![0usize; s.ndim()];
            s.local_of_linear(linear, &mut local);
            prop_assert_eq!(s.linear_index(&local), linear);
            for (d, &p) in local.iter().enumerate() {
                prop_assert!(p < sizes[d]);
            }
        }
    }
}
