use num_traits::Float;

use crate::{
    Indicator, Lookback, Result, SequenceGuard,
    helper::{cast, debug_assert_hlc, validate_period},
};

/// # True Range
///
/// Range of a bar extended to the previous close, so that gaps count as
/// movement:
///
/// ```text
/// TR = max(high - low, |high - previous close|, |low - previous close|)
/// ```
///
/// The first bar has no previous close, so the lookback period is `1`.
///
/// # Examples
///
/// ```
/// # use ta_stream::TrueRange;
/// let mut tr = TrueRange::<f64>::new();
/// assert!(tr.calc(0, 10.0, 9.0, 9.5).is_nan());
/// // gap up: the range starts from the previous close
/// assert_eq!(tr.calc(1, 12.0, 11.0, 11.5), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct TrueRange<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    previous_close: T,
}

impl<T: Float> TrueRange<T> {
    /// Creates a new true range
    pub fn new() -> Self {
        Self {
            guard: SequenceGuard::new(),
            lookback: Lookback::new(1, 1),
            previous_close: T::nan(),
        }
    }

    /// Commits a bar and returns its true range
    ///
    /// # Arguments
    ///
    /// * `sequence` - The bar's sequence number
    /// * `high` - High price of the bar
    /// * `low` - Low price of the bar
    /// * `close` - Close price of the bar, remembered for the next bar
    ///
    /// # Returns
    ///
    /// * `T` - The true range, NaN for the first bar
    #[inline]
    pub fn calc(&mut self, sequence: u64, high: T, low: T, close: T) -> T {
        self.guard.advance(sequence);
        debug_assert_hlc(high, low, close);
        let range = self.range(sequence, high, low);
        self.previous_close = close;
        range
    }

    /// Previews [`calc`](Self::calc); the close only matters for the next bar
    #[inline]
    pub fn pick(&self, sequence: u64, high: T, low: T, close: T) -> T {
        self.guard.check(sequence);
        debug_assert_hlc(high, low, close);
        self.range(sequence, high, low)
    }

    #[inline]
    fn range(&self, sequence: u64, high: T, low: T) -> T {
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        let close = self.previous_close;
        (high - low)
            .max((high - close).abs())
            .max((low - close).abs())
    }
}

impl<T: Float> Default for TrueRange<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Indicator for TrueRange<T> {
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
        tracing::trace!("true range reset");
        self.guard.reset();
        self.previous_close = T::nan();
        self
    }
}

/// # Average True Range
///
/// Wilder's average of the [`TrueRange`]. The first value is the mean of the
/// first `period` true ranges (bars `1..=period`); afterwards
///
/// ```text
/// ATR = (previous ATR * (period - 1) + TR) / period
/// ```
///
/// The lookback period is `untrusted + period`.
///
/// # Examples
///
/// ```
/// # use ta_stream::{AverageTrueRange, Indicator};
/// let mut atr = AverageTrueRange::<f64>::new(2, 0).unwrap();
/// assert_eq!(atr.lookback_period(), 2);
/// assert!(atr.calc(0, 10.0, 8.0, 9.0).is_nan());
/// assert!(atr.calc(1, 11.0, 9.0, 10.0).is_nan());
/// assert_eq!(atr.calc(2, 12.0, 8.0, 9.0), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct AverageTrueRange<T> {
    true_range: TrueRange<T>,
    lookback: Lookback,
    period_t: T,
    /// Sum of true ranges while seeding, the average afterwards
    value: T,
}

impl<T: Float> AverageTrueRange<T> {
    /// Creates a new average true range
    ///
    /// # Arguments
    ///
    /// * `period` - The number of true ranges averaged, at least 2
    /// * `untrusted` - Extra bars to withhold after seeding
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or the construction error
    pub fn new(period: usize, untrusted: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period).with_untrusted(untrusted);
        tracing::debug!(
            period,
            untrusted,
            lookback = lookback.lookback_period(),
            "average true range configured"
        );
        Ok(Self {
            true_range: TrueRange::new(),
            lookback,
            period_t: cast(period, "average true range period")?,
            value: T::zero(),
        })
    }

    /// Commits a bar and returns the average true range
    ///
    /// # Arguments
    ///
    /// * `sequence` - The bar's sequence number
    /// * `high` - High price of the bar
    /// * `low` - Low price of the bar
    /// * `close` - Close price of the bar
    ///
    /// # Returns
    ///
    /// * `T` - The average, NaN while warming up
    pub fn calc(&mut self, sequence: u64, high: T, low: T, close: T) -> T {
        let range = self.true_range.calc(sequence, high, low, close);
        if sequence == 0 {
            return T::nan();
        }
        let period = self.period() as u64;
        if sequence > period {
            self.value = self.smooth(range);
            if self.lookback.is_settled(sequence) {
                return self.value;
            }
        } else {
            self.value = self.value + range;
            if sequence == period {
                self.value = self.value / self.period_t;
                if self.lookback.is_first(sequence) {
                    return self.value;
                }
            }
        }
        T::nan()
    }

    /// Previews [`calc`](Self::calc) for a hypothetical bar
    pub fn pick(&self, sequence: u64, high: T, low: T, close: T) -> T {
        let range = self.true_range.pick(sequence, high, low, close);
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        if sequence > self.period() as u64 {
            self.smooth(range)
        } else {
            (self.value + range) / self.period_t
        }
    }

    #[inline]
    fn smooth(&self, range: T) -> T {
        (self.value * (self.period_t - T::one()) + range) / self.period_t
    }
}

impl<T: Float> Indicator for AverageTrueRange<T> {
    fn period(&self) -> usize {
        self.lookback.period()
    }

    fn lookback_period(&self) -> usize {
        self.lookback.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.true_range.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.true_range.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        tracing::trace!("average true range reset");
        self.true_range.reset();
        self.value = T::zero();
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    const BARS: [(f64, f64, f64); 8] = [
        (48.70, 47.79, 48.16),
        (48.72, 48.14, 48.61),
        (48.90, 48.39, 48.75),
        (48.87, 48.37, 48.63),
        (48.82, 48.24, 48.74),
        (49.05, 48.64, 49.03),
        (49.20, 48.94, 49.07),
        (49.35, 48.86, 49.32),
    ];

    fn true_ranges() -> Vec<f64> {
        BARS.windows(2)
            .map(|w| {
                let close = w[0].2;
                let (high, low) = (w[1].0, w[1].1);
                (high - low)
                    .max((high - close).abs())
                    .max((low - close).abs())
            })
            .collect()
    }

    #[test]
    fn true_range_covers_gaps() {
        let mut tr = TrueRange::<f64>::new();
        assert_eq!(tr.lookback_period(), 1);
        assert_eq!(tr.period(), 1);
        assert!(tr.calc(0, 10.0, 9.0, 9.5).is_nan());
        // inside bar
        assert_eq!(tr.pick(1, 10.0, 9.0, 9.5), 1.0);
        // gap down
        assert_eq!(tr.pick(1, 8.0, 7.5, 7.5), 2.0);
        assert_eq!(tr.calc(1, 8.0, 7.5, 7.5), 2.0);
        assert_eq!(tr.calc(2, 9.0, 8.0, 8.5), 1.5);
    }

    #[test]
    fn true_range_pick_ignores_close() {
        let mut tr = TrueRange::<f64>::new();
        tr.calc(0, 5.0, 4.0, 4.5);
        assert_eq!(tr.pick(1, 6.0, 5.0, 5.0), tr.pick(1, 6.0, 5.0, 6.0));
    }

    #[test]
    fn atr_seeds_with_mean_then_smooths() {
        let period = 3;
        let mut atr = AverageTrueRange::<f64>::new(period, 0).unwrap();
        let ranges = true_ranges();
        let mut expected = ranges[..period].iter().sum::<f64>() / 3.0;
        for (sequence, &(high, low, close)) in BARS.iter().enumerate() {
            let preview = atr.pick(sequence as u64, high, low, close);
            let value = atr.calc(sequence as u64, high, low, close);
            match sequence {
                0..=2 => assert!(value.is_nan() && preview.is_nan()),
                3 => assert_approx_eq!(value, expected, 1e-12),
                _ => {
                    expected = (expected * 2.0 + ranges[sequence - 1]) / 3.0;
                    assert_approx_eq!(value, expected, 1e-12);
                }
            }
            if sequence >= 3 {
                assert_eq!(preview.to_bits(), value.to_bits());
            }
        }
    }

    #[test]
    fn atr_untrusted_margin() {
        let mut trusted = AverageTrueRange::<f64>::new(3, 0).unwrap();
        let mut untrusted = AverageTrueRange::<f64>::new(3, 2).unwrap();
        assert_eq!(untrusted.lookback_period(), 5);
        for (sequence, &(high, low, close)) in BARS.iter().enumerate() {
            let sequence = sequence as u64;
            let expected = trusted.calc(sequence, high, low, close);
            let preview = untrusted.pick(sequence, high, low, close);
            let value = untrusted.calc(sequence, high, low, close);
            if sequence < 5 {
                assert!(value.is_nan() && preview.is_nan());
            } else {
                assert_eq!(value, expected);
                assert_eq!(preview, expected);
            }
        }
    }

    #[test]
    fn atr_rejects_short_period() {
        assert!(AverageTrueRange::<f64>::new(1, 0).is_err());
    }

    #[test]
    fn atr_reset_replays() {
        let mut atr = AverageTrueRange::<f64>::new(2, 1).unwrap();
        let first: Vec<f64> = BARS
            .iter()
            .enumerate()
            .map(|(s, b)| atr.calc(s as u64, b.0, b.1, b.2))
            .collect();
        atr.reset();
        for (sequence, b) in BARS.iter().enumerate() {
            let value = atr.calc(sequence as u64, b.0, b.1, b.2);
            if sequence < 3 {
                assert!(value.is_nan());
            } else {
                assert_eq!(value, first[sequence]);
            }
        }
    }
}
