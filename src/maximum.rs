use num_traits::Float;

use crate::{
    ExtremumTracker, Indicator, Lookback, Max, Result, ScalarIndicator, SequenceGuard,
    helper::{debug_assert_finite, validate_period},
};

/// # Maximum Value over a Rolling Period
///
/// Tracks the highest of the last `period` samples, as used by Donchian
/// channels, stop placement and breakout detection.
///
/// Updates are amortized O(1): the slot of the current maximum is cached and
/// the window is only rescanned when that slot is evicted.
///
/// The lookback period is `period - 1`, yet every sample yields a value:
/// while the window fills up the output is the maximum of the samples seen
/// so far.
///
/// # Examples
///
/// ```
/// # use ta_stream::{MaximumInPeriod, ScalarIndicator};
/// let mut max = MaximumInPeriod::<f64>::new(3).unwrap();
/// let results: Vec<f64> = [5.0, 1.0, 9.0, 2.0, 2.0, 0.0]
///     .iter()
///     .enumerate()
///     .map(|(s, v)| max.calc(s as u64, *v))
///     .collect();
///
/// assert_eq!(results, [5.0, 5.0, 9.0, 9.0, 9.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MaximumInPeriod<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    tracker: ExtremumTracker<T, Max>,
}

impl<T: Float> MaximumInPeriod<T> {
    /// Creates a new maximum tracker with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `Error::InvalidPeriod`
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period - 1);
        tracing::debug!(
            period,
            lookback = lookback.lookback_period(),
            "maximum in period configured"
        );
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            tracker: ExtremumTracker::new(period),
        })
    }
}

impl<T: Float> Indicator for MaximumInPeriod<T> {
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
        tracing::trace!("maximum in period reset");
        self.guard.reset();
        self.tracker.reset();
        self
    }
}

impl<T: Float> ScalarIndicator<T> for MaximumInPeriod<T> {
    type Output = T;

    #[inline]
    fn calc(&mut self, sequence: u64, value: T) -> T {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        if self.lookback.is_settled(sequence) {
            self.tracker.update((sequence % self.period() as u64) as usize, value)
        } else {
            self.tracker.warm_up(sequence as usize, value)
        }
    }

    #[inline]
    fn pick(&self, sequence: u64, value: T) -> T {
        self.guard.check(sequence);
        debug_assert_finite(value);
        if self.lookback.is_settled(sequence) {
            self.tracker.peek((sequence % self.period() as u64) as usize, value)
        } else {
            self.tracker.peek_warm_up(sequence as usize, value)
        }
    }
}
