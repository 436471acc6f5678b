use num_traits::Float;

use crate::{
    ExtremumTracker, Indicator, Lookback, Min, Result, ScalarIndicator, SequenceGuard,
    helper::{debug_assert_finite, validate_period},
};

/// # Minimum Value over a Rolling Period
///
/// Tracks the lowest of the last `period` samples. Mirror image of
/// [`MaximumInPeriod`](crate::MaximumInPeriod), with the same warm-up behaviour:
/// partial-window minima until the window is full.
///
/// # Examples
///
/// ```
/// # use ta_stream::{MinimumInPeriod, ScalarIndicator};
/// let mut min = MinimumInPeriod::<f64>::new(3).unwrap();
/// let results: Vec<f64> = [5.0, 1.0, 9.0, 2.0, 2.0, 0.0]
///     .iter()
///     .enumerate()
///     .map(|(s, v)| min.calc(s as u64, *v))
///     .collect();
///
/// assert_eq!(results, [5.0, 1.0, 1.0, 1.0, 2.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MinimumInPeriod<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    tracker: ExtremumTracker<T, Min>,
}

impl<T: Float> MinimumInPeriod<T> {
    /// Creates a new minimum tracker with the specified period
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
            "minimum in period configured"
        );
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            tracker: ExtremumTracker::new(period),
        })
    }
}

impl<T: Float> Indicator for MinimumInPeriod<T> {
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
        tracing::trace!("minimum in period reset");
        self.guard.reset();
        self.tracker.reset();
        self
    }
}

impl<T: Float> ScalarIndicator<T> for MinimumInPeriod<T> {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_period() {
        assert!(MinimumInPeriod::<f64>::new(1).is_err());
    }

    #[test]
    fn min_follows_sliding_window() {
        let mut min = MinimumInPeriod::<f64>::new(3).unwrap();
        let inputs = [5.0, 1.0, 9.0, 2.0, 2.0, 0.0, 7.0, 8.0, 9.0];
        let expected = [5.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 0.0, 7.0];
        for (sequence, (value, expected)) in inputs.iter().zip(expected).enumerate() {
            let sequence = sequence as u64;
            assert_eq!(min.pick(sequence, *value), expected);
            assert_eq!(min.calc(sequence, *value), expected);
        }
    }

    #[test]
    fn reset_replays_identically() {
        let mut min = MinimumInPeriod::<f64>::new(4).unwrap();
        min.set_strict(true);
        let inputs = [3.5, 2.25, 4.0, 1.0, 6.0, 6.5, 0.5, 2.0];
        let first: Vec<f64> = inputs
            .iter()
            .enumerate()
            .map(|(s, v)| min.calc(s as u64, *v))
            .collect();
        min.reset();
        let second: Vec<f64> = inputs
            .iter()
            .enumerate()
            .map(|(s, v)| min.calc(s as u64, *v))
            .collect();
        assert_eq!(first, second);
    }
}
