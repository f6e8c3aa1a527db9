//! Structuring elements.
//!
//! A [`Shape`] enumerates integer offsets relative to a centre. Offsets are
//! generated lazily by walking the shape's bounding box in canonical order
//! (first axis fastest) and keeping the ones inside the shape, so large
//! neighbourhoods are never materialised unless the caller collects them.
//! Calling [`Shape::offsets`] again restarts the enumeration.

use smallvec::SmallVec;
use strata_core::coord::odometer_step;
use strata_core::{Coord, Extent};

use crate::error::ShapeError;

/// A structuring element.
pub trait Shape: Send + Sync {
    /// Offsets of the neighbourhood in `ndim` axes.
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError>;

    /// Largest absolute offset along each of `ndim` axes.
    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError>;
}

/// Lazy iterator over a shape's offsets.
#[derive(Clone, Debug)]
pub struct ShapeOffsets<'a> {
    walk: Walk<'a>,
}

#[derive(Clone, Debug)]
enum Walk<'a> {
    Bounded {
        radius: Extent,
        sizes: Extent,
        pos: Extent,
        remaining: usize,
        keep: Keep,
    },
    Listed(std::slice::Iter<'a, Coord>),
}

#[derive(Clone, Copy, Debug)]
enum Keep {
    All,
    AllButCentre,
    /// Squared Euclidean radius.
    Euclidean(u128),
    /// L1 radius.
    Manhattan(u128),
}

impl Keep {
    fn accepts(self, offset: &[i64]) -> bool {
        match self {
            Self::All => true,
            Self::AllButCentre => offset.iter().any(|&o| o != 0),
            Self::Euclidean(r2) => {
                offset.iter().map(|&o| (o as i128 * o as i128) as u128).sum::<u128>() <= r2
            }
            Self::Manhattan(r) => {
                offset.iter().map(|&o| o.unsigned_abs() as u128).sum::<u128>() <= r
            }
        }
    }
}

impl<'a> ShapeOffsets<'a> {
    fn bounded(radius: Extent, keep: Keep) -> Self {
        let sizes: Extent = radius.iter().map(|&r| 2 * r + 1).collect();
        let remaining = sizes.iter().fold(1usize, |acc, &s| acc.saturating_mul(s));
        let pos = SmallVec::from_elem(0, radius.len());
        Self {
            walk: Walk::Bounded {
                radius,
                sizes,
                pos,
                remaining,
                keep,
            },
        }
    }

    fn listed(offsets: &'a [Coord]) -> Self {
        Self {
            walk: Walk::Listed(offsets.iter()),
        }
    }
}

impl Iterator for ShapeOffsets<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        match &mut self.walk {
            Walk::Bounded {
                radius,
                sizes,
                pos,
                remaining,
                keep,
            } => {
                while *remaining > 0 {
                    let offset: Coord = pos
                        .iter()
                        .zip(radius.iter())
                        .map(|(&p, &r)| p as i64 - r as i64)
                        .collect();
                    *remaining -= 1;
                    odometer_step(pos, sizes);
                    if keep.accepts(&offset) {
                        return Some(offset);
                    }
                }
                None
            }
            Walk::Listed(iter) => iter.next().cloned(),
        }
    }
}

/// A hyper-cube of half-width `span` on every axis.
///
/// `RectangleShape::new(1, false)` is the 3x3 (3x3x3, ...) neighbourhood.
/// With `skip_center` the centre offset is left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RectangleShape {
    /// Half-width on every axis.
    pub span: usize,
    /// Leave out the all-zero offset.
    pub skip_center: bool,
}

impl RectangleShape {
    /// A hyper-cube shape.
    pub fn new(span: usize, skip_center: bool) -> Self {
        Self { span, skip_center }
    }
}

impl Shape for RectangleShape {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        let keep = if self.skip_center {
            Keep::AllButCentre
        } else {
            Keep::All
        };
        Ok(ShapeOffsets::bounded(self.radius(ndim)?, keep))
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        Ok(SmallVec::from_elem(self.span, ndim))
    }
}

/// A hyper-rectangle with its own half-width on every axis.
///
/// `spans = [3, 2]` covers offsets `-3..=3` by `-2..=2`, a 7x5
/// neighbourhood. Only defined for `spans.len()` axes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CenteredRectangleShape {
    /// Half-width per axis.
    pub spans: Extent,
    /// Leave out the all-zero offset.
    pub skip_center: bool,
}

impl CenteredRectangleShape {
    /// A hyper-rectangle shape.
    pub fn new(spans: &[usize], skip_center: bool) -> Self {
        Self {
            spans: SmallVec::from_slice(spans),
            skip_center,
        }
    }
}

impl Shape for CenteredRectangleShape {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        let keep = if self.skip_center {
            Keep::AllButCentre
        } else {
            Keep::All
        };
        Ok(ShapeOffsets::bounded(self.radius(ndim)?, keep))
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        if self.spans.len() != ndim {
            return Err(ShapeError::DimensionMismatch {
                expected: self.spans.len(),
                actual: ndim,
            });
        }
        Ok(self.spans.clone())
    }
}

/// All offsets within Euclidean distance `radius` of the centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HyperSphereShape {
    /// Ball radius.
    pub radius: usize,
}

impl HyperSphereShape {
    /// A Euclidean ball.
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl Shape for HyperSphereShape {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        let r = self.radius as u128;
        Ok(ShapeOffsets::bounded(self.radius(ndim)?, Keep::Euclidean(r * r)))
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        Ok(SmallVec::from_elem(self.radius, ndim))
    }
}

/// All offsets within L1 (city-block) distance `radius` of the centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiamondShape {
    /// Ball radius.
    pub radius: usize,
}

impl DiamondShape {
    /// An L1 ball.
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl Shape for DiamondShape {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        let r = self.radius as u128;
        Ok(ShapeOffsets::bounded(self.radius(ndim)?, Keep::Manhattan(r)))
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        Ok(SmallVec::from_elem(self.radius, ndim))
    }
}

/// A caller-listed set of offsets, enumerated in the given order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplicitShape {
    ndim: usize,
    offsets: Vec<Coord>,
}

impl ExplicitShape {
    /// A shape in `ndim` axes made of exactly `offsets`.
    ///
    /// Returns `Err(ShapeError::RaggedOffsets)` if an offset does not have
    /// `ndim` components.
    pub fn new<I, O>(ndim: usize, offsets: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = O>,
        O: AsRef<[i64]>,
    {
        let mut list = Vec::new();
        for (index, offset) in offsets.into_iter().enumerate() {
            let offset = offset.as_ref();
            if offset.len() != ndim {
                return Err(ShapeError::RaggedOffsets {
                    index,
                    expected: ndim,
                    actual: offset.len(),
                });
            }
            list.push(SmallVec::from_slice(offset));
        }
        Ok(Self {
            ndim,
            offsets: list,
        })
    }

    fn check(&self, ndim: usize) -> Result<(), ShapeError> {
        if ndim != self.ndim {
            return Err(ShapeError::DimensionMismatch {
                expected: self.ndim,
                actual: ndim,
            });
        }
        Ok(())
    }
}

impl Shape for ExplicitShape {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        self.check(ndim)?;
        Ok(ShapeOffsets::listed(&self.offsets))
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        self.check(ndim)?;
        let mut radius: Extent = SmallVec::from_elem(0, ndim);
        for offset in &self.offsets {
            for (r, &o) in radius.iter_mut().zip(offset) {
                *r = (*r).max(o.unsigned_abs() as usize);
            }
        }
        Ok(radius)
    }
}

impl<S: Shape + ?Sized> Shape for &S {
    fn offsets(&self, ndim: usize) -> Result<ShapeOffsets<'_>, ShapeError> {
        (**self).offsets(ndim)
    }

    fn radius(&self, ndim: usize) -> Result<Extent, ShapeError> {
        (**self).radius(ndim)
    }
}
