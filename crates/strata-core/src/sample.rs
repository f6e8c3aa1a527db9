//! The value type stored in container slots.

use std::fmt;

/// A self-describing sample value.
///
/// Every slot of a container holds one `Sample`. The trait asks for copy
/// (`Clone`), assignment from another instance ([`assign`](Self::assign)),
/// equality (`PartialEq`) and creation of a fresh zero-valued instance of
/// the same kind ([`zeroed`](Self::zeroed)). Numeric semantics are not part
/// of the contract; algorithms that need ordering add their own bounds.
///
/// `zeroed` takes `&self` because the zero of a composite kind may depend
/// on the instance (e.g. a fixed-length vector sample).
///
/// # Examples
///
/// ```
/// use strata_core::Sample;
///
/// let prototype = 7u8;
/// assert_eq!(prototype.zeroed(), 0);
///
/// let mut s = String::from("old");
/// s.assign(&"new".to_string());
/// assert_eq!(s, "new");
/// ```
pub trait Sample: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// A fresh zero-valued instance of the same kind as `self`.
    fn zeroed(&self) -> Self;

    /// Overwrite `self` with the value of `other`.
    fn assign(&mut self, other: &Self) {
        self.clone_from(other);
    }
}

/// Samples with representable extremes.
///
/// `highest` is the identity element of `min` and `lowest` that of `max`,
/// which is what erosion and dilation seed their comparisons with.
pub trait Extremum: Sample + PartialOrd {
    /// Smallest representable value.
    fn lowest() -> Self;
    /// Largest representable value.
    fn highest() -> Self;
}

macro_rules! integer_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn zeroed(&self) -> Self {
                    0
                }
            }

            impl Extremum for $t {
                #[inline]
                fn lowest() -> Self {
                    <$t>::MIN
                }
                #[inline]
                fn highest() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

integer_sample!(u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);

macro_rules! float_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn zeroed(&self) -> Self {
                    0.0
                }
            }

            // Infinities are the true identities of min/max.
            impl Extremum for $t {
                #[inline]
                fn lowest() -> Self {
                    <$t>::NEG_INFINITY
                }
                #[inline]
                fn highest() -> Self {
                    <$t>::INFINITY
                }
            }
        )*
    };
}

float_sample!(f32, f64);

impl Sample for bool {
    fn zeroed(&self) -> Self {
        false
    }
}

impl Extremum for bool {
    fn lowest() -> Self {
        false
    }
    fn highest() -> Self {
        true
    }
}

impl Sample for String {
    fn zeroed(&self) -> Self {
        String::new()
    }
}

/// Fixed-length composite samples (e.g. RGB triples).
impl<T: Sample, const N: usize> Sample for [T; N] {
    fn zeroed(&self) -> Self {
        std::array::from_fn(|i| self[i].zeroed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_zeroes() {
        assert_eq!(200u8.zeroed(), 0);
        assert_eq!((-5i64).zeroed(), 0);
        assert_eq!(3.5f32.zeroed(), 0.0);
        assert!(!true.zeroed());
    }

    #[test]
    fn composite_zero_keeps_shape() {
        let rgb = [10u8, 20, 30];
        assert_eq!(rgb.zeroed(), [0, 0, 0]);
    }

    #[test]
    fn assign_copies_value() {
        let mut a = 1.0f64;
        a.assign(&2.5);
        assert_eq!(a, 2.5);
    }

    #[test]
    fn extremes_are_identities() {
        assert_eq!(u8::highest(), 255);
        assert_eq!(u8::lowest(), 0);
        assert!(f32::highest() > f32::MAX);
        assert_eq!(f32::lowest().min(-3.0), f32::NEG_INFINITY);
    }
}
