//! Value orderings for quantile queries
//!
//! The sampler sorts its retained values with a [`ValueOrder`] before
//! answering order-statistic queries. Any closure `Fn(&T, &T) -> Ordering`
//! works, and two zero-sized orderings cover the common cases.

use core::cmp::Ordering;

/// Total ordering over sampled values
pub trait ValueOrder<T: ?Sized> {
    /// Compare two values
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural ordering of `T: Ord`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> ValueOrder<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// IEEE 754 total ordering for floats
///
/// Uses `total_cmp`, so NaN values sort after positive infinity instead of
/// poisoning the sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalOrder;

impl ValueOrder<f64> for TotalOrder {
    #[inline]
    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }
}

impl ValueOrder<f32> for TotalOrder {
    #[inline]
    fn compare(&self, a: &f32, b: &f32) -> Ordering {
        a.total_cmp(b)
    }
}

impl<T: ?Sized, F> ValueOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
