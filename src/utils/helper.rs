use num_traits::{Float, ToPrimitive};

use crate::{Error, Result};

/// Rejects periods that cannot form a window
///
/// # Arguments
///
/// * `period` - The requested period
/// * `min` - The smallest accepted period
///
/// # Returns
///
/// * `Result<usize>` - The period, or `Error::InvalidPeriod`
#[inline]
pub fn validate_period(period: usize, min: usize) -> Result<usize> {
    if period < min {
        return Err(Error::InvalidPeriod {
            period,
            reason: if min == 2 {
                "period must be greater than 1"
            } else {
                "period is too small"
            },
        });
    }
    Ok(period)
}

/// Rejects NaN and infinite parameters
#[inline]
pub fn validate_finite<T: Float>(value: T, name: &'static str) -> Result<T> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteParameter { name })
    }
}

/// Converts a constant into the indicator's float type
#[inline]
pub fn cast<T: Float, V: ToPrimitive>(value: V, context: &'static str) -> Result<T> {
    T::from(value).ok_or(Error::NumericConversion { context })
}

/// Debug-asserts that a sample field is a real number
#[inline]
pub fn debug_assert_finite<T: Float>(value: T) {
    debug_assert!(value.is_finite(), "input must be finite");
}

/// Debug-asserts the `high >= close >= low` price ordering
#[inline]
pub fn debug_assert_hlc<T: Float>(high: T, low: T, close: T) {
    debug_assert_finite(high);
    debug_assert_finite(low);
    debug_assert_finite(close);
    debug_assert!(high >= low, "high must not be below low");
    debug_assert!(high >= close, "high must not be below close");
    debug_assert!(close >= low, "close must not be below low");
}

/// Debug-asserts that a volume is a non-negative real number
#[inline]
pub fn debug_assert_volume<T: Float>(volume: T) {
    debug_assert_finite(volume);
    debug_assert!(volume >= T::zero(), "volume must not be negative");
}
