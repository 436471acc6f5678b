use num_traits::Float;

use crate::{
    Indicator, Lookback, Result, ScalarIndicator, SequenceGuard, Window,
    helper::{cast, debug_assert_finite, validate_period},
};

/// Least-squares line fitted to one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression<T> {
    /// Fitted value at the oldest sample of the window
    pub intercept: T,
    /// Change of the fitted value per sample, forward in time
    pub slope: T,
}

impl<T: Float> Regression<T> {
    fn unavailable() -> Self {
        Self {
            intercept: T::nan(),
            slope: T::nan(),
        }
    }

    /// Returns the fitted value `offset` samples after the oldest one
    ///
    /// An offset of `period - 1` gives the fitted value at the newest sample,
    /// `period` a one-step forecast.
    pub fn at(&self, offset: T) -> T {
        self.intercept + self.slope * offset
    }
}

/// # Linear Regression
///
/// Ordinary least-squares fit of a straight line through the last `period`
/// samples, with the sample position as the explanatory variable. The sums
/// over the positions are constants of the period, so each step costs one
/// pass over the window.
///
/// Outputs are NaN until the window is full at sequence number `period - 1`.
///
/// # Examples
///
/// ```
/// # use ta_stream::{LinearRegression, ScalarIndicator};
/// let mut linreg = LinearRegression::<f64>::new(3).unwrap();
/// linreg.calc(0, 1.0);
/// linreg.calc(1, 3.0);
/// let fit = linreg.calc(2, 5.0);
/// assert_eq!(fit.slope, 2.0);
/// assert_eq!(fit.intercept, 1.0);
/// assert_eq!(fit.at(3.0), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegression<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    values: Window<T>,
    period_t: T,
    /// Sum of the positions `0..period`
    sum_x: T,
    /// `sum_x^2 - period * sum of squared positions`
    divisor: T,
}

impl<T: Float> LinearRegression<T> {
    /// Creates a new linear regression over `period` samples
    ///
    /// # Arguments
    ///
    /// * `period` - The number of samples fitted, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or the construction error
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period - 1);
        let period_t: T = cast(period, "linear regression period")?;
        let two: T = cast(2.0, "linear regression constant")?;
        let six: T = cast(6.0, "linear regression constant")?;
        let sum_x = period_t * (period_t - T::one()) / two;
        let sum_x_sq = period_t * (period_t - T::one()) * (two * period_t - T::one()) / six;
        tracing::debug!(period, "linear regression configured");
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            values: Window::new(period, T::zero()),
            period_t,
            sum_x,
            divisor: sum_x * sum_x - period_t * sum_x_sq,
        })
    }

    /// Fits the window ending at `sequence`, whose newest sample is `newest`
    fn fit(&self, sequence: u64, newest: T) -> Regression<T> {
        let mut sum_y = T::zero();
        let mut sum_xy = T::zero();
        // positions count samples back from the newest one
        let mut x = self.period_t - T::one();
        for back in (1..self.period() as u64).rev() {
            let y = self.values.get(self.values.slot(sequence - back));
            sum_y = sum_y + y;
            sum_xy = sum_xy + x * y;
            x = x - T::one();
        }
        sum_y = sum_y + newest;

        let slope = (self.period_t * sum_xy - self.sum_x * sum_y) / self.divisor;
        Regression {
            intercept: (sum_y - slope * self.sum_x) / self.period_t,
            slope,
        }
    }
}

impl<T: Float> Indicator for LinearRegression<T> {
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
        tracing::trace!("linear regression reset");
        self.guard.reset();
        self.values.reset();
        self
    }
}

impl<T: Float> ScalarIndicator<T> for LinearRegression<T> {
    type Output = Regression<T>;

    fn calc(&mut self, sequence: u64, value: T) -> Regression<T> {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        let slot = self.values.slot(sequence);
        self.values.replace(slot, value);
        if self.lookback.is_settled(sequence) {
            self.fit(sequence, value)
        } else {
            Regression::unavailable()
        }
    }

    fn pick(&self, sequence: u64, value: T) -> Regression<T> {
        self.guard.check(sequence);
        debug_assert_finite(value);
        if self.lookback.is_settled(sequence) {
            self.fit(sequence, value)
        } else {
            Regression::unavailable()
        }
    }
}
