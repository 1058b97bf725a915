//! Numeric types and iteration utilities for polynomial curves.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in polynomial fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` for integer exponentiation.
//! - [`CoordExt`]: Accessors for the `x` and `y` halves of a point list.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   used to generate the sample positions of a curve.
//!
//! # Example
//!
//! ```rust
//! use powerfit::value::{SteppedValues, Value};
//!
//! // 0.0, 0.1, ..., 1.0
//! let range = SteppedValues::new(0.0..=1.0, 0.1);
//! assert_eq!(range.count(), 11);
//!
//! let two = f64::two();
//! assert_eq!(two.powi(3), 8.0);
//! ```
use std::ops::{Range, RangeInclusive};

use crate::error::Error;

/// Numeric type for curves
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
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `usize`
    fn as_usize(&self) -> Option<usize> {
        num_traits::cast(*self)
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
/// Values are generated by index (`start + i * step`) rather than by repeated
/// addition, so rounding error does not accumulate along the range.
///
/// The end of the range is included if it lies on the grid. A final position that
/// overshoots `end` by less than `step * 1e-9` is snapped to `end`.
///
/// A non-positive or non-finite step yields nothing.
#[derive(Debug, Clone)]
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    fn tolerance(&self) -> T {
        // 1e-9 of a step
        self.step * T::try_cast(1e-9).unwrap_or(T::epsilon())
    }

    fn is_valid(&self) -> bool {
        self.step > T::zero() && num_traits::float::FloatCore::is_finite(self.step)
    }

    /// Returns the number of steps remaining in the iterator
    pub fn len(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }

        let span = *self.range.end() - *self.range.start() + self.tolerance();
        if span < T::zero() {
            return 0;
        }

        let total = num_traits::float::FloatCore::floor(span / self.step)
            .as_usize()
            .map_or(0, |n| n + 1);
        let taken = self.index.as_usize().unwrap_or(total);
        total.saturating_sub(taken)
    }

    /// Returns true if the iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_valid() {
            return None;
        }

        let end = *self.range.end();
        let value = *self.range.start() + self.index * self.step;
        if value <= end {
            self.index += T::one();
            Some(value)
        } else if value - end <= self.tolerance() {
            self.index += T::one();
            Some(end)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

/// Extension trait for accessing the `x` and `y` coordinates of a type.
///
/// This trait is intended for any type that conceptually represents a list of
/// 2D points.
///
/// # Examples
///
/// ```
/// # use powerfit::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of this value.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of this value.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates of this value.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates of this value.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the range of x-coordinates of this value.
    fn x_range(&self) -> Option<Range<T>> {
        let x_min = self.x_iter().fold(None, |acc: Option<(T, T)>, x| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, x),
                    nalgebra::RealField::max(max, x),
                ),
                None => (x, x),
            })
        });
        x_min.map(|(start, end)| start..end)
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.1);
        let values: Vec<_> = range.collect();
        assert_eq!(values.len(), 11);
        assert_eq!(values[10], 1.0);
    }

    #[test]
    fn test_value_range_len_matches_count() {
        let range = SteppedValues::new(0.0..=10.0, 0.2);
        assert_eq!(range.len(), 51);
        assert_eq!(range.count(), 51);

        let mut range = SteppedValues::new(0.0..=3.0, 1.0);
        range.next();
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn test_value_range_off_grid_end() {
        // 0.0, 0.4, 0.8 - 1.0 is not on the grid
        let values: Vec<_> = SteppedValues::new(0.0..=1.0, 0.4).collect();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|&x| x <= 1.0));
    }

    #[test]
    fn test_value_range_degenerate_steps() {
        assert!(SteppedValues::new(0.0..=1.0, 0.0).next().is_none());
        assert!(SteppedValues::new(0.0..=1.0, -0.5).next().is_none());
        assert!(SteppedValues::new(0.0..=1.0, f64::NAN).next().is_none());
        assert!(SteppedValues::new(1.0..=0.0, 0.1).is_empty());

        let single: Vec<_> = SteppedValues::new(2.0..=2.0, 0.5).collect();
        assert_eq!(single, vec![2.0]);
    }

    #[test]
    fn test_coord_ext() {
        let data = vec![(3.0, 7.0), (8.0, 2.0), (5.0, 9.0)];
        assert_eq!(data.x(), vec![3.0, 8.0, 5.0]);
        assert_eq!(data.x_range(), Some(3.0..8.0));
        assert_eq!(data.y(), vec![7.0, 2.0, 9.0]);

        let empty: Vec<(f64, f64)> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn test_try_cast() {
        assert_eq!(f64::try_cast(3usize), Ok(3.0));
        assert_eq!(f32::from_positive_int(4), 4.0);
        assert_eq!(2.5f64.as_usize(), Some(2));
    }
}
