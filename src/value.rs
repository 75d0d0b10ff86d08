//! Numeric types used for metric evaluation.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that metrics can be computed over, ensuring compatibility with
//! nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `ComplexField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` for integer exponentiation.
//!   - `round_to` for decimal rounding of scores.
//!
//! # Example
//!
//! ```rust
//! use scorecard::value::Value;
//!
//! let two = f64::two();
//! let squared = Value::powi(two, 2);
//! assert_eq!(Value::round_to(8.333_333_3, 4), 8.3333);
//! ```
use num_traits::float::FloatCore;

use crate::error::Error;

/// Numeric type for observations and scores
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

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Rounds the value to a number of decimal places.
    ///
    /// Ties are rounded to the nearest even digit, on the value scaled by `10^decimals`.
    /// - `0.125` rounded to 2 decimals is `0.12`
    /// - `0.375` rounded to 2 decimals is `0.38`
    ///
    /// Non-finite values are returned unchanged, as are values too large to scale.
    #[must_use]
    fn round_to(self, decimals: usize) -> Self {
        if !FloatCore::is_finite(self) {
            return self;
        }

        let exponent = i32::try_from(decimals).unwrap_or(i32::MAX);
        let factor = Value::powi(Self::from_positive_int(10), exponent);
        let scaled = self * factor;
        if !FloatCore::is_finite(scaled) {
            return self;
        }

        let floor = FloatCore::floor(scaled);
        let half = Self::one() / Self::two();
        let diff = scaled - floor;
        let rounded = if diff > half {
            floor + Self::one()
        } else if diff < half {
            floor
        } else if FloatCore::floor(floor / Self::two()) * Self::two() == floor {
            floor
        } else {
            floor + Self::one()
        };

        // Keep the sign of values that round to zero
        if rounded == Self::zero() && FloatCore::is_sign_negative(self) {
            return -Self::zero();
        }

        rounded / factor
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
