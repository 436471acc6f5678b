use num_traits::Float;

use crate::{
    Indicator, Kbn, Lookback, Result, ScalarIndicator, SequenceGuard, Window,
    helper::{cast, debug_assert_finite, validate_period},
};

/// Mean and population variance of one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments<T> {
    /// Arithmetic mean of the window
    pub mean: T,
    /// Population (biased) variance of the window, never negative once settled
    pub variance: T,
}

impl<T: Float> Moments<T> {
    fn unavailable() -> Self {
        Self {
            mean: T::nan(),
            variance: T::nan(),
        }
    }
}

/// Incremental mean and population variance over a rolling period.
///
/// The engine keeps the running sum and sum of squares of the trailing
/// `period - 1` samples, plus those samples in a ring buffer. The incoming
/// sample is folded in only for the computation of the current output:
///
/// ```text
/// mean     = (sum + x) / period
/// variance = (sum_sq + x * x) / period - mean * mean
/// ```
///
/// after which the oldest buffered sample is evicted from both sums and `x`
/// takes its slot. Each step is O(1) and allocation free.
///
/// Both sums use Kahan-Babuska-Neumaier summation. The sum-of-squares
/// formulation still cancels catastrophically for large offsets with tiny
/// spread, so a negative round-off result is clamped to zero.
///
/// # Examples
///
/// ```
/// # use ta_stream::{Indicator, ScalarIndicator, Variance};
/// let mut variance = Variance::<f64>::new(4).unwrap();
/// assert_eq!(variance.lookback_period(), 3);
///
/// let results: Vec<f64> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
///     .iter()
///     .enumerate()
///     .map(|(s, v)| variance.calc(s as u64, *v))
///     .collect();
///
/// assert!(results[..3].iter().all(|v| v.is_nan()));
/// assert_eq!(&results[3..], &[1.25, 1.25, 1.25]);
/// ```
#[derive(Debug, Clone)]
pub struct Variance<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    /// Trailing `period - 1` samples
    values: Window<T>,
    /// Sum of the buffered samples
    sum: Kbn<T>,
    /// Sum of squares of the buffered samples
    sum_sq: Kbn<T>,
    period_t: T,
}

impl<T: Float + Default> Variance<T> {
    /// Creates a new variance engine with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The number of samples in each window, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The engine, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period - 1);
        tracing::debug!(
            period,
            lookback = lookback.lookback_period(),
            "variance configured"
        );
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            values: Window::new(period - 1, T::nan()),
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
            period_t: cast(period, "variance period")?,
        })
    }

    /// Commits a sample and returns the mean and variance of the window
    ///
    /// # Arguments
    ///
    /// * `sequence` - The sample's sequence number
    /// * `value` - The sample
    ///
    /// # Returns
    ///
    /// * `Moments<T>` - Mean and variance, both NaN while warming up
    #[inline]
    pub fn calc_moments(&mut self, sequence: u64, value: T) -> Moments<T> {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        let slot = self.values.slot(sequence);
        if !self.lookback.is_settled(sequence) {
            self.sum += value;
            self.sum_sq += value * value;
            self.values.replace(slot, value);
            return Moments::unavailable();
        }

        let moments = self.moments_with(value);
        self.sum += value;
        self.sum_sq += value * value;
        let evicted = self.values.replace(slot, value);
        self.sum -= evicted;
        self.sum_sq -= evicted * evicted;
        moments
    }

    /// Previews the mean and variance `calc_moments` would return
    ///
    /// # Arguments
    ///
    /// * `sequence` - The sequence number the next `calc` would carry
    /// * `value` - The hypothetical sample
    ///
    /// # Returns
    ///
    /// * `Moments<T>` - Mean and variance, both NaN while warming up
    #[inline]
    pub fn pick_moments(&self, sequence: u64, value: T) -> Moments<T> {
        self.guard.check(sequence);
        debug_assert_finite(value);
        if self.lookback.is_settled(sequence) {
            self.moments_with(value)
        } else {
            Moments::unavailable()
        }
    }

    /// Recomputes both sums from the buffered samples
    ///
    /// Could be called periodically on very long streams to shed the
    /// rounding error accumulated by repeated add/evict cycles. Only the
    /// buffered samples are summed, so it is a no-op during warm-up.
    pub fn recompute(&mut self) -> &mut Self {
        if self.values.as_slice().iter().any(|v| v.is_nan()) {
            return self;
        }
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        for &v in self.values.as_slice() {
            self.sum += v;
            self.sum_sq += v * v;
        }
        self
    }

    /// Folds `value` into copies of the sums and derives the moments
    #[inline]
    fn moments_with(&self, value: T) -> Moments<T> {
        let mut sum = self.sum.clone();
        let mut sum_sq = self.sum_sq.clone();
        sum += value;
        sum_sq += value * value;
        let mean = sum.total() / self.period_t;
        let mean_sq = sum_sq.total() / self.period_t;
        let variance = mean_sq - mean * mean;
        Moments {
            mean,
            variance: if variance < T::zero() {
                T::zero()
            } else {
                variance
            },
        }
    }
}

impl<T: Float + Default> Indicator for Variance<T> {
    fn period(&self) -> usize {
        self.lookback.period()
    }

    fn lookback_period(&self) -> usize {
        self.lookback.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.guard.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.guard.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        tracing::trace!("variance reset");
        self.guard.reset();
        self.values.reset();
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self
    }
}

impl<T: Float + Default> ScalarIndicator<T> for Variance<T> {
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
