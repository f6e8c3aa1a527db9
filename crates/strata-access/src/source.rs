//! The [`Source`] and [`Sink`] traits cursors are built over.

use strata_core::IndexSpace;

/// Something that hands out samples of an index space by position.
///
/// Positions are zero-based local positions or canonical linear indices
/// (first axis fastest) relative to [`space`](Self::space). Callers
/// guarantee the position lies inside the space; implementations may
/// panic otherwise. Cursors perform that check before calling in.
///
/// Implemented by [`Container`](crate::Container), by [`Slab`](crate::Slab),
/// and by shared or exclusive references to any `Source`.
pub trait Source {
    /// The sample type.
    type Sample;

    /// The index space addressed by this source.
    fn space(&self) -> &IndexSpace;

    /// Sample at the zero-based position `local`.
    fn read_local(&self, local: &[usize]) -> &Self::Sample;

    /// Sample at canonical linear index `linear`.
    fn read_linear(&self, linear: usize) -> &Self::Sample;
}

/// A [`Source`] whose samples can also be written in place.
pub trait Sink: Source {
    /// Mutable sample at the zero-based position `local`.
    fn write_local(&mut self, local: &[usize]) -> &mut Self::Sample;

    /// Mutable sample at canonical linear index `linear`.
    fn write_linear(&mut self, linear: usize) -> &mut Self::Sample;
}

impl<X: Source + ?Sized> Source for &X {
    type Sample = X::Sample;

    fn space(&self) -> &IndexSpace {
        (**self).space()
    }

    #[inline]
    fn read_local(&self, local: &[usize]) -> &Self::Sample {
        (**self).read_local(local)
    }

    #[inline]
    fn read_linear(&self, linear: usize) -> &Self::Sample {
        (**self).read_linear(linear)
    }
}

impl<X: Source + ?Sized> Source for &mut X {
    type Sample = X::Sample;

    fn space(&self) -> &IndexSpace {
        (**self).space()
    }

    #[inline]
    fn read_local(&self, local: &[usize]) -> &Self::Sample {
        (**self).read_local(local)
    }

    #[inline]
    fn read_linear(&self, linear: usize) -> &Self::Sample {
        (**self).read_linear(linear)
    }
}

impl<X: Sink + ?Sized> Sink for &mut X {
    #[inline]
    fn write_local(&mut self, local: &[usize]) -> &mut Self::Sample {
        (**self).write_local(local)
    }

    #[inline]
    fn write_linear(&mut self, linear: usize) -> &mut Self::Sample {
        (**self).write_linear(linear)
    }
}
