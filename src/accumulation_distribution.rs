use num_traits::Float;

use crate::{
    Error, Indicator, Lookback, Result, SequenceGuard,
    helper::{cast, debug_assert_hlc, debug_assert_volume, validate_period},
};

/// # Accumulation/Distribution Line
///
/// Running total of money-flow volume. Each bar contributes its volume
/// weighted by where the close sits inside the bar:
///
/// ```text
/// MFV = volume * ((close - low) - (high - close)) / (high - low)
/// ```
///
/// Bars with no range contribute nothing. Every bar yields a value, so the
/// lookback period is `0`.
///
/// # Examples
///
/// ```
/// # use ta_stream::AccumulationDistributionLine;
/// let mut adl = AccumulationDistributionLine::<f64>::new();
/// assert_eq!(adl.calc(0, 10.0, 8.0, 10.0, 100.0), 100.0);
/// assert_eq!(adl.calc(1, 10.0, 8.0, 9.0, 100.0), 100.0);
/// assert_eq!(adl.calc(2, 10.0, 8.0, 8.5, 200.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct AccumulationDistributionLine<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    value: T,
}

impl<T: Float> AccumulationDistributionLine<T> {
    /// Creates a new accumulation/distribution line starting at zero
    pub fn new() -> Self {
        Self {
            guard: SequenceGuard::new(),
            lookback: Lookback::new(1, 0),
            value: T::zero(),
        }
    }

    /// Commits a bar and returns the line
    ///
    /// # Arguments
    ///
    /// * `sequence` - The bar's sequence number
    /// * `high` - High price of the bar
    /// * `low` - Low price of the bar
    /// * `close` - Close price of the bar
    /// * `volume` - Traded volume of the bar, not negative
    ///
    /// # Returns
    ///
    /// * `T` - The accumulated money-flow volume
    #[inline]
    pub fn calc(&mut self, sequence: u64, high: T, low: T, close: T, volume: T) -> T {
        self.guard.advance(sequence);
        self.value = self.accumulate(high, low, close, volume);
        self.value
    }

    /// Previews [`calc`](Self::calc) for a hypothetical bar
    #[inline]
    pub fn pick(&self, sequence: u64, high: T, low: T, close: T, volume: T) -> T {
        self.guard.check(sequence);
        self.accumulate(high, low, close, volume)
    }

    #[inline]
    fn accumulate(&self, high: T, low: T, close: T, volume: T) -> T {
        debug_assert_hlc(high, low, close);
        debug_assert_volume(volume);
        let range = high - low;
        if range > T::zero() {
            self.value + volume * ((close - low) - (high - close)) / range
        } else {
            self.value
        }
    }
}

impl<T: Float> Default for AccumulationDistributionLine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Indicator for AccumulationDistributionLine<T> {
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
        tracing::trace!("accumulation/distribution line reset");
        self.guard.reset();
        self.value = T::zero();
        self
    }
}

/// # Accumulation/Distribution Oscillator
///
/// Chaikin oscillator: the difference between a fast and a slow exponential
/// average of the [`AccumulationDistributionLine`]. Both averages use the
/// factor `2 / (period + 1)` and are seeded with the first line value.
///
/// The period of the oscillator is the slow period, and the lookback period
/// is `untrusted + slow - 1`.
///
/// # Examples
///
/// ```
/// # use ta_stream::{AccumulationDistributionOscillator, Indicator};
/// let mut adosc = AccumulationDistributionOscillator::<f64>::new(3, 10, 0).unwrap();
/// assert_eq!(adosc.period(), 10);
/// assert_eq!(adosc.lookback_period(), 9);
/// assert!(adosc.calc(0, 10.0, 8.0, 9.5, 1000.0).is_nan());
/// ```
#[derive(Debug, Clone)]
pub struct AccumulationDistributionOscillator<T> {
    line: AccumulationDistributionLine<T>,
    lookback: Lookback,
    fast_period: usize,
    fast_factor: T,
    slow_factor: T,
    fast: T,
    slow: T,
}

impl<T: Float> AccumulationDistributionOscillator<T> {
    /// Creates a new oscillator
    ///
    /// # Arguments
    ///
    /// * `fast` - Period of the fast average, at least 2
    /// * `slow` - Period of the slow average, greater than `fast`
    /// * `untrusted` - Extra bars to withhold after the slow average settles
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The oscillator, or the construction error
    pub fn new(fast: usize, slow: usize, untrusted: usize) -> Result<Self> {
        let fast = validate_period(fast, 2)?;
        if slow <= fast {
            return Err(Error::InvalidPeriod {
                period: slow,
                reason: "slow period must be greater than the fast period",
            });
        }
        let lookback = Lookback::new(slow, slow - 1).with_untrusted(untrusted);
        let two: T = cast(2.0, "oscillator smoothing")?;
        let fast_factor = two / (cast::<T, _>(fast, "oscillator fast period")? + T::one());
        let slow_factor = two / (cast::<T, _>(slow, "oscillator slow period")? + T::one());
        tracing::debug!(
            fast,
            slow,
            untrusted,
            lookback = lookback.lookback_period(),
            "accumulation/distribution oscillator configured"
        );
        Ok(Self {
            line: AccumulationDistributionLine::new(),
            lookback,
            fast_period: fast,
            fast_factor,
            slow_factor,
            fast: T::zero(),
            slow: T::zero(),
        })
    }

    /// Returns the period of the fast average
    pub const fn fast_period(&self) -> usize {
        self.fast_period
    }

    /// Commits a bar and returns the oscillator
    ///
    /// # Arguments
    ///
    /// * `sequence` - The bar's sequence number
    /// * `high` - High price of the bar
    /// * `low` - Low price of the bar
    /// * `close` - Close price of the bar
    /// * `volume` - Traded volume of the bar, not negative
    ///
    /// # Returns
    ///
    /// * `T` - Fast minus slow average, NaN while warming up
    pub fn calc(&mut self, sequence: u64, high: T, low: T, close: T, volume: T) -> T {
        let line = self.line.calc(sequence, high, low, close, volume);
        (self.fast, self.slow) = self.smooth(sequence, line);
        if self.lookback.is_settled(sequence) {
            self.fast - self.slow
        } else {
            T::nan()
        }
    }

    /// Previews [`calc`](Self::calc) for a hypothetical bar
    pub fn pick(&self, sequence: u64, high: T, low: T, close: T, volume: T) -> T {
        let line = self.line.pick(sequence, high, low, close, volume);
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        let (fast, slow) = self.smooth(sequence, line);
        fast - slow
    }

    #[inline]
    fn smooth(&self, sequence: u64, line: T) -> (T, T) {
        if sequence == 0 {
            (line, line)
        } else {
            (
                self.fast + self.fast_factor * (line - self.fast),
                self.slow + self.slow_factor * (line - self.slow),
            )
        }
    }
}

impl<T: Float> Indicator for AccumulationDistributionOscillator<T> {
    fn period(&self) -> usize {
        self.lookback.period()
    }

    fn lookback_period(&self) -> usize {
        self.lookback.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.line.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.line.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        tracing::trace!("accumulation/distribution oscillator reset");
        self.line.reset();
        self.fast = T::zero();
        self.slow = T::zero();
        self
    }
}
