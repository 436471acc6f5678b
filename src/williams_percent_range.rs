use num_traits::Float;

use crate::{
    ExtremumTracker, Indicator, Lookback, Max, Min, Result, SequenceGuard,
    helper::{cast, debug_assert_hlc, validate_period},
};

/// # Williams %R
///
/// Momentum oscillator locating the close inside the recent trading range:
///
/// ```text
/// %R = -100 * (highest high - close) / (highest high - lowest low)
/// ```
///
/// The result ranges from `-100` (close at the lowest low) to `0` (close at
/// the highest high). A flat range yields `0`. Highs and lows are tracked by
/// two sliding-window extremum trackers over the last `period` bars.
///
/// # Examples
///
/// ```
/// # use ta_stream::WilliamsPercentRange;
/// let mut wpr = WilliamsPercentRange::<f64>::new(2).unwrap();
/// assert!(wpr.calc(0, 10.0, 8.0, 9.0).is_nan());
/// assert_eq!(wpr.calc(1, 12.0, 9.0, 10.0), -50.0);
/// ```
#[derive(Debug, Clone)]
pub struct WilliamsPercentRange<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    highs: ExtremumTracker<T, Max>,
    lows: ExtremumTracker<T, Min>,
    scale: T,
}

impl<T: Float> WilliamsPercentRange<T> {
    /// Creates a new Williams %R over `period` bars
    ///
    /// # Arguments
    ///
    /// * `period` - The number of bars in the range, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The oscillator, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period - 1);
        tracing::debug!(period, "williams %r configured");
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            highs: ExtremumTracker::new(period),
            lows: ExtremumTracker::new(period),
            scale: cast(-100.0, "williams %r scale")?,
        })
    }

    /// Commits a bar and returns %R
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
    /// * `T` - %R in `[-100, 0]`, NaN while warming up
    pub fn calc(&mut self, sequence: u64, high: T, low: T, close: T) -> T {
        self.guard.advance(sequence);
        debug_assert_hlc(high, low, close);
        let slot = (sequence % self.period() as u64) as usize;
        if self.lookback.is_settled(sequence) {
            let highest = self.highs.update(slot, high);
            let lowest = self.lows.update(slot, low);
            self.percent(highest, lowest, close)
        } else {
            self.highs.warm_up(slot, high);
            self.lows.warm_up(slot, low);
            T::nan()
        }
    }

    /// Previews [`calc`](Self::calc) for a hypothetical bar
    pub fn pick(&self, sequence: u64, high: T, low: T, close: T) -> T {
        self.guard.check(sequence);
        debug_assert_hlc(high, low, close);
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        let slot = (sequence % self.period() as u64) as usize;
        let highest = self.highs.peek(slot, high);
        let lowest = self.lows.peek(slot, low);
        self.percent(highest, lowest, close)
    }

    #[inline]
    fn percent(&self, highest: T, lowest: T, close: T) -> T {
        let range = highest - lowest;
        if range == T::zero() {
            T::zero()
        } else {
            self.scale * (highest - close) / range
        }
    }
}

impl<T: Float> Indicator for WilliamsPercentRange<T> {
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
        tracing::trace!("williams %r reset");
        self.guard.reset();
        self.highs.reset();
        self.lows.reset();
        self
    }
}
