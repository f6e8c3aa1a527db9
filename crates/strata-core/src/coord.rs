//! The [`Coord`] and [`Extent`] type aliases.

use smallvec::SmallVec;

/// An absolute coordinate in an index space.
///
/// Uses `SmallVec<[i64; 4]>` to avoid heap allocation for spaces up to
/// four dimensions. Higher-dimensional spaces spill to the heap
/// transparently.
pub type Coord = SmallVec<[i64; 4]>;

/// Per-axis sizes or zero-based local positions.
///
/// Same inline capacity as [`Coord`].
pub type Extent = SmallVec<[usize; 4]>;

/// Step a zero-based position to its successor in canonical order.
///
/// The first axis varies fastest. Returns `false`, leaving `pos` at all
/// zeros, once the last position of `sizes` has been passed.
///
/// # Examples
///
/// ```
/// use strata_core::coord::odometer_step;
///
/// let mut pos = [1usize, 0];
/// assert!(odometer_step(&mut pos, &[2, 2]));
/// assert_eq!(pos, [0, 1]);
/// ```
pub fn odometer_step(pos: &mut [usize], sizes: &[usize]) -> bool {
    for d in 0..pos.len() {
        pos[d] += 1;
        if pos[d] < sizes[d] {
            return true;
        }
        pos[d] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odometer_visits_every_position_once() {
        let sizes = [2usize, 3];
        let mut pos = [0usize, 0];
        let mut visited = vec![pos];
        while odometer_step(&mut pos, &sizes) {
            visited.push(pos);
        }
        assert_eq!(visited, vec![[0, 0], [1, 0], [0, 1], [1, 1], [0, 2], [1, 2]]);
    }

    #[test]
    fn odometer_wraps_to_zero() {
        let mut pos = [1usize, 2];
        assert!(!odometer_step(&mut pos, &[2, 3]));
        assert_eq!(pos, [0, 0]);
    }
}
