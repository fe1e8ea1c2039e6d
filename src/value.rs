//! Numeric types and iteration utilities for interpolants.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluation, ensuring compatibility
//! with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - Unambiguous `abs`, `powi` and `finite` helpers.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for generating evaluation points.
//!
//! # Example
//!
//! ```rust
//! use polyinterp::value::{SteppedValues, Value};
//!
//! // 0.0, 0.25, .. 1.0
//! let xs: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.25).collect();
//! assert_eq!(xs.len(), 5);
//!
//! let two = f64::two();
//! assert_eq!(two.powi(3), 8.0);
//! ```
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Numeric type for samples, coefficients and evaluations
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }

    /// Returns true if the value is neither NaN nor infinite
    fn finite(self) -> bool {
        num_traits::float::FloatCore::is_finite(self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
    cap: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`.
    /// Yields nothing if `step` is zero, negative or not finite.
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        let cap = *range.end();
        Self {
            range,
            step,
            index: T::zero(),
            cap,
        }
    }

    /// Creates an iterator of `count` evenly spaced values covering `range`, ends included.
    ///
    /// A `count` below 2 yields only the start of the range.
    pub fn linspace(range: RangeInclusive<T>, count: usize) -> Self {
        let intervals = T::from_positive_int(count.saturating_sub(1).max(1));
        let step = (*range.end() - *range.start()) / intervals;
        if count < 2 || step <= T::zero() {
            let start = *range.start();
            return Self::new(start..=start, T::one());
        }

        // Nudge the end so accumulated rounding cannot drop the last point, and cap it
        // so rounding cannot overshoot either
        let end = *range.end() + step / T::two();
        Self {
            cap: *range.end(),
            ..Self::new(*range.start()..=end, step)
        }
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.step.finite() || self.step <= T::zero() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(nalgebra::RealField::min(value, self.cap))
        } else {
            None
        }
    }
}

/// Returns `(min, max)` of a sequence of values, or `None` if it is empty.
pub fn bounds<T: Value>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values.into_iter().fold(None, |acc: Option<(T, T)>, v| {
        Some(match acc {
            Some((min, max)) => (
                nalgebra::RealField::min(min, v),
                nalgebra::RealField::max(max, v),
            ),
            None => (v, v),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.1);
        let values: Vec<_> = range.collect();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_unusable_step_is_empty() {
        for step in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert_eq!(SteppedValues::new(0.0..=1.0, step).count(), 0, "step {step}");
        }
    }

    #[test]
    fn test_linspace() {
        let values: Vec<f64> = SteppedValues::linspace(0.0..=2.0, 5).collect();
        assert_eq!(values.len(), 5);
        crate::assert_all_close!(values, [0.0, 0.5, 1.0, 1.5, 2.0]);

        let single: Vec<f64> = SteppedValues::linspace(3.0..=4.0, 1).collect();
        assert_eq!(single, vec![3.0]);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds::<f64>([3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(bounds(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_finite() {
        assert!(1.0_f64.finite());
        assert!(!f64::NAN.finite());
        assert!(!f64::INFINITY.finite());
    }
}
