use num_traits::Float;

use crate::{
    Indicator, Lookback, MovingAverage, Result, ScalarIndicator, SequenceGuard, SumOverPeriod,
    helper::{cast, debug_assert_finite, validate_finite, validate_period},
};

/// Smoothing numerator of the conventional EMA, giving `alpha = 2 / (period + 1)`
pub const DEFAULT_SMOOTHING: f64 = 2.0;

/// Simple moving average over the last `period` samples.
///
/// # Examples
///
/// ```
/// # use ta_stream::{ScalarIndicator, SimpleMovingAverage};
/// let mut sma = SimpleMovingAverage::<f64>::new(3).unwrap();
/// assert!(sma.calc(0, 1.0).is_nan());
/// assert!(sma.calc(1, 2.0).is_nan());
/// assert_eq!(sma.calc(2, 3.0), 2.0);
/// assert_eq!(sma.calc(3, 7.0), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage<T> {
    sum: SumOverPeriod<T>,
    period_t: T,
}

impl<T: Float + Default> SimpleMovingAverage<T> {
    /// Creates a new simple moving average
    ///
    /// # Arguments
    ///
    /// * `period` - The number of samples averaged, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The moving average, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        let sum = SumOverPeriod::new(period)?;
        tracing::debug!(period, "simple moving average configured");
        Ok(Self {
            sum,
            period_t: cast(period, "simple moving average period")?,
        })
    }

    #[inline]
    fn average(&self, sequence: u64, sum: T) -> T {
        if sequence >= self.lookback_period() as u64 {
            sum / self.period_t
        } else {
            T::nan()
        }
    }
}

impl<T: Float + Default> Indicator for SimpleMovingAverage<T> {
    fn period(&self) -> usize {
        self.sum.period()
    }

    fn lookback_period(&self) -> usize {
        self.sum.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.sum.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.sum.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        self.sum.reset();
        self
    }
}

impl<T: Float + Default> ScalarIndicator<T> for SimpleMovingAverage<T> {
    type Output = T;

    #[inline]
    fn calc(&mut self, sequence: u64, value: T) -> T {
        let sum = self.sum.calc(sequence, value);
        self.average(sequence, sum)
    }

    #[inline]
    fn pick(&self, sequence: u64, value: T) -> T {
        self.average(sequence, self.sum.pick(sequence, value))
    }
}

impl<T: Float + Default> MovingAverage<T> for SimpleMovingAverage<T> {}

/// Exponential moving average.
///
/// The smoothing factor is `smoothing / (period + 1)`. The recurrence is
/// seeded with the simple average of the first `period` samples, which is
/// the first output. An untrusted margin postpones the first output further,
/// for callers that consider the head of the recurrence unreliable.
///
/// # Examples
///
/// ```
/// # use ta_stream::{ExponentialMovingAverage, Indicator, ScalarIndicator};
/// let mut ema = ExponentialMovingAverage::<f64>::new(3, 0).unwrap();
/// assert_eq!(ema.lookback_period(), 2);
/// assert!(ema.calc(0, 1.0).is_nan());
/// assert!(ema.calc(1, 2.0).is_nan());
/// assert_eq!(ema.calc(2, 3.0), 2.0);
/// assert_eq!(ema.calc(3, 4.0), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    period_t: T,
    /// `smoothing / (period + 1)`
    factor: T,
    /// Running sum during seeding, the average afterwards
    value: T,
}

impl<T: Float> ExponentialMovingAverage<T> {
    /// Creates an EMA with the conventional smoothing numerator of 2
    ///
    /// # Arguments
    ///
    /// * `period` - The EMA period, at least 2
    /// * `untrusted` - Extra samples to withhold after seeding
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The moving average, or the construction error
    pub fn new(period: usize, untrusted: usize) -> Result<Self> {
        Self::with_smoothing(period, untrusted, cast(DEFAULT_SMOOTHING, "smoothing")?)
    }

    /// Creates an EMA with a custom smoothing numerator
    ///
    /// # Arguments
    ///
    /// * `period` - The EMA period, at least 2
    /// * `untrusted` - Extra samples to withhold after seeding
    /// * `smoothing` - Numerator of the smoothing factor, finite
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The moving average, or the construction error
    pub fn with_smoothing(period: usize, untrusted: usize, smoothing: T) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let smoothing = validate_finite(smoothing, "smoothing")?;
        let lookback = Lookback::new(period, period - 1).with_untrusted(untrusted);
        let period_t: T = cast(period, "exponential moving average period")?;
        tracing::debug!(
            period,
            untrusted,
            lookback = lookback.lookback_period(),
            "exponential moving average configured"
        );
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            period_t,
            factor: smoothing / (period_t + T::one()),
            value: T::zero(),
        })
    }

    /// Returns the smoothing factor applied to each new sample
    pub const fn factor(&self) -> T {
        self.factor
    }
}

impl<T: Float> Indicator for ExponentialMovingAverage<T> {
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
        tracing::trace!("exponential moving average reset");
        self.guard.reset();
        self.value = T::zero();
        self
    }
}

impl<T: Float> ScalarIndicator<T> for ExponentialMovingAverage<T> {
    type Output = T;

    fn calc(&mut self, sequence: u64, value: T) -> T {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        let period = self.period() as u64;
        if sequence >= period {
            self.value = self.value + self.factor * (value - self.value);
            if self.lookback.is_settled(sequence) {
                return self.value;
            }
        } else {
            self.value = self.value + value;
            if sequence + 1 == period {
                self.value = self.value / self.period_t;
                if self.lookback.is_first(sequence) {
                    return self.value;
                }
            }
        }
        T::nan()
    }

    fn pick(&self, sequence: u64, value: T) -> T {
        self.guard.check(sequence);
        debug_assert_finite(value);
        let period = self.period() as u64;
        if sequence >= period && self.lookback.is_settled(sequence) {
            return self.value + self.factor * (value - self.value);
        }
        if sequence + 1 == period && self.lookback.is_first(sequence) {
            return (self.value + value) / self.period_t;
        }
        T::nan()
    }
}

impl<T: Float> MovingAverage<T> for ExponentialMovingAverage<T> {}
