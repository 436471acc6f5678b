use num_traits::Float;

use crate::{
    Indicator, Lookback, Result, ScalarIndicator, SequenceGuard,
    helper::{cast, debug_assert_finite, validate_period},
};

/// # Relative Strength Index
///
/// Wilder's RSI. The first `period` price changes are averaged into a mean
/// gain and a mean loss; afterwards both are smoothed with factor
/// `1 / period`:
///
/// ```text
/// RSI = 100 * avg_gain / (avg_gain + avg_loss)
/// ```
///
/// The first value is produced at sequence number `period`, which is the
/// lookback period. A window without any movement yields `0`.
///
/// # Examples
///
/// ```
/// # use ta_stream::{Indicator, RelativeStrengthIndex, ScalarIndicator};
/// let mut rsi = RelativeStrengthIndex::<f64>::new(2).unwrap();
/// assert_eq!(rsi.lookback_period(), 2);
/// assert!(rsi.calc(0, 10.0).is_nan());
/// assert!(rsi.calc(1, 11.0).is_nan());
/// assert_eq!(rsi.calc(2, 10.0), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    period_t: T,
    hundred: T,
    /// Previous sample, NaN before the first one
    previous: T,
    gain: T,
    loss: T,
}

impl<T: Float> RelativeStrengthIndex<T> {
    /// Creates a new RSI with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The number of price changes averaged, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period);
        tracing::debug!(period, "relative strength index configured");
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            period_t: cast(period, "relative strength index period")?,
            hundred: cast(100.0, "relative strength index scale")?,
            previous: T::nan(),
            gain: T::zero(),
            loss: T::zero(),
        })
    }

    #[inline]
    fn index(&self, gain: T, loss: T) -> T {
        let total = gain + loss;
        if total == T::zero() {
            T::zero()
        } else {
            self.hundred * gain / total
        }
    }

    /// Applies one Wilder smoothing step to copies of the averages
    #[inline]
    fn smooth(&self, delta: T) -> (T, T) {
        if delta > T::zero() {
            (
                self.gain + (delta - self.gain) / self.period_t,
                self.loss - self.loss / self.period_t,
            )
        } else {
            (
                self.gain - self.gain / self.period_t,
                self.loss + (-delta - self.loss) / self.period_t,
            )
        }
    }

    /// Adds one price change to copies of the seed sums
    #[inline]
    fn accumulate(&self, delta: T) -> (T, T) {
        if delta > T::zero() {
            (self.gain + delta, self.loss)
        } else {
            (self.gain, self.loss - delta)
        }
    }
}

impl<T: Float> Indicator for RelativeStrengthIndex<T> {
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
        tracing::trace!("relative strength index reset");
        self.guard.reset();
        self.previous = T::nan();
        self.gain = T::zero();
        self.loss = T::zero();
        self
    }
}

impl<T: Float> ScalarIndicator<T> for RelativeStrengthIndex<T> {
    type Output = T;

    fn calc(&mut self, sequence: u64, value: T) -> T {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        let delta = value - self.previous;
        self.previous = value;

        if self.lookback.is_settled(sequence) {
            if self.lookback.is_first(sequence) {
                let (gain, loss) = self.accumulate(delta);
                self.gain = gain / self.period_t;
                self.loss = loss / self.period_t;
            } else {
                (self.gain, self.loss) = self.smooth(delta);
            }
            return self.index(self.gain, self.loss);
        }
        if sequence > 0 {
            (self.gain, self.loss) = self.accumulate(delta);
        }
        T::nan()
    }

    fn pick(&self, sequence: u64, value: T) -> T {
        self.guard.check(sequence);
        debug_assert_finite(value);
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        let delta = value - self.previous;
        if self.lookback.is_first(sequence) {
            let (gain, loss) = self.accumulate(delta);
            self.index(gain / self.period_t, loss / self.period_t)
        } else {
            let (gain, loss) = self.smooth(delta);
            self.index(gain, loss)
        }
    }
}
