use num_traits::Float;

use crate::{Indicator, Moments, Result, ScalarIndicator, Variance};

/// Population standard deviation over a rolling period.
///
/// Square root of [`Variance`]. A variance at or below zero, which round-off
/// can produce on flat windows, maps to exactly `0`. Warm-up outputs stay NaN.
///
/// # Examples
///
/// ```
/// # use ta_stream::{ScalarIndicator, StandardDeviation};
/// let mut stddev = StandardDeviation::<f64>::new(2).unwrap();
/// assert!(stddev.calc(0, 1.0).is_nan());
/// assert_eq!(stddev.calc(1, 3.0), 1.0);
/// assert_eq!(stddev.calc(2, 3.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct StandardDeviation<T> {
    variance: Variance<T>,
}

impl<T: Float + Default> StandardDeviation<T> {
    /// Creates a new standard deviation with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The number of samples in each window, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            variance: Variance::new(period)?,
        })
    }

    /// Commits a sample, returning the mean and the standard deviation
    ///
    /// The `variance` field of the result carries the standard deviation.
    #[inline]
    pub fn calc_moments(&mut self, sequence: u64, value: T) -> Moments<T> {
        let moments = self.variance.calc_moments(sequence, value);
        self.to_deviation(sequence, moments)
    }

    /// Previews [`calc_moments`](Self::calc_moments) without committing
    #[inline]
    pub fn pick_moments(&self, sequence: u64, value: T) -> Moments<T> {
        self.to_deviation(sequence, self.variance.pick_moments(sequence, value))
    }

    #[inline]
    fn to_deviation(&self, sequence: u64, moments: Moments<T>) -> Moments<T> {
        let deviation = if sequence >= self.lookback_period() as u64 {
            debug_assert!(!moments.variance.is_nan());
            if moments.variance <= T::zero() {
                T::zero()
            } else {
                moments.variance.sqrt()
            }
        } else {
            debug_assert!(moments.variance.is_nan());
            T::nan()
        };
        Moments {
            mean: moments.mean,
            variance: deviation,
        }
    }
}

impl<T: Float + Default> Indicator for StandardDeviation<T> {
    fn period(&self) -> usize {
        self.variance.period()
    }

    fn lookback_period(&self) -> usize {
        self.variance.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.variance.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.variance.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        self.variance.reset();
        self
    }
}

impl<T: Float + Default> ScalarIndicator<T> for StandardDeviation<T> {
    type Output = T;

    #[inline]
    fn calc(&mut self, sequence: u64, value: T) -> T {
        self.calc_moments(sequence, value).variance
    }

    #[inline]
    fn pick(&self, sequence: u64, value: T) -> T {
        self.pick_moments(sequence, value).variance
    }
}
