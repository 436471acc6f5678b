use num_traits::Float;

use crate::{
    Error, ExponentialMovingAverage, Indicator, MovingAverage, Result, ScalarIndicator,
    SimpleMovingAverage, StandardDeviation,
    helper::{debug_assert_finite, validate_finite},
};

/// Upper, middle and lower band of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands<T> {
    /// `middle + stddev * upper multiplier`
    pub upper: T,
    /// The moving average
    pub middle: T,
    /// `middle - stddev * lower multiplier`
    pub lower: T,
}

impl<T: Float> Bands<T> {
    fn unavailable() -> Self {
        Self {
            upper: T::nan(),
            middle: T::nan(),
            lower: T::nan(),
        }
    }

    /// Returns true while the bands are still warming up
    pub fn is_nan(&self) -> bool {
        self.middle.is_nan()
    }
}

/// # Bollinger Bands
///
/// A moving average wrapped by two bands placed a multiple of the rolling
/// standard deviation away from it. The moving average kind is a type
/// parameter, so the middle band is dispatched statically.
///
/// The standard deviation runs over the same period as the moving average, and
/// the bands become available at the moving average's lookback period.
///
/// # Examples
///
/// ```
/// # use ta_stream::{BollingerBands, Indicator, ScalarIndicator};
/// let mut bands = BollingerBands::<f64, _>::simple(3, 2.0, 2.0).unwrap();
/// assert_eq!(bands.lookback_period(), 2);
///
/// assert!(bands.calc(0, 1.0).is_nan());
/// assert!(bands.calc(1, 2.0).is_nan());
/// let out = bands.calc(2, 6.0);
/// assert_eq!(out.middle, 3.0);
/// assert!(out.upper > out.middle && out.lower < out.middle);
/// ```
#[derive(Debug, Clone)]
pub struct BollingerBands<T, M> {
    stddev: StandardDeviation<T>,
    average: M,
    upper_multiplier: T,
    lower_multiplier: T,
}

impl<T, M> BollingerBands<T, M>
where
    T: Float + Default,
    M: MovingAverage<T>,
{
    /// Builds the bands around an existing moving average
    ///
    /// # Arguments
    ///
    /// * `average` - The middle band, in its post-construction state
    /// * `upper_multiplier` - Standard deviations between middle and upper band
    /// * `lower_multiplier` - Standard deviations between middle and lower band
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The bands, or the construction error
    pub fn with_moving_average(
        average: M,
        upper_multiplier: T,
        lower_multiplier: T,
    ) -> Result<Self> {
        let upper_multiplier = validate_finite(upper_multiplier, "upper multiplier")?;
        let lower_multiplier = validate_finite(lower_multiplier, "lower multiplier")?;
        let stddev = StandardDeviation::new(average.period())?;
        if stddev.lookback_period() > average.lookback_period() {
            return Err(Error::MismatchedComponents {
                reason: "moving average settles before the standard deviation",
            });
        }
        tracing::debug!(
            period = average.period(),
            lookback = average.lookback_period(),
            "bollinger bands configured"
        );
        let mut bands = Self {
            stddev,
            average,
            upper_multiplier,
            lower_multiplier,
        };
        let strict = bands.average.is_strict();
        bands.stddev.set_strict(strict);
        Ok(bands)
    }

    /// Returns the moving average forming the middle band
    pub const fn moving_average(&self) -> &M {
        &self.average
    }

    #[inline]
    fn combine(&self, sequence: u64, middle: T, deviation: T) -> Bands<T> {
        if sequence < self.lookback_period() as u64 {
            return Bands::unavailable();
        }
        Bands {
            upper: middle + deviation * self.upper_multiplier,
            middle,
            lower: middle - deviation * self.lower_multiplier,
        }
    }
}

impl<T: Float + Default> BollingerBands<T, SimpleMovingAverage<T>> {
    /// Creates bands around a simple moving average
    ///
    /// # Arguments
    ///
    /// * `period` - Period of the average and of the standard deviation, at least 2
    /// * `upper_multiplier` - Standard deviations between middle and upper band
    /// * `lower_multiplier` - Standard deviations between middle and lower band
    pub fn simple(period: usize, upper_multiplier: T, lower_multiplier: T) -> Result<Self> {
        Self::with_moving_average(
            SimpleMovingAverage::new(period)?,
            upper_multiplier,
            lower_multiplier,
        )
    }
}

impl<T: Float + Default> BollingerBands<T, ExponentialMovingAverage<T>> {
    /// Creates bands around an exponential moving average
    ///
    /// # Arguments
    ///
    /// * `period` - Period of the average and of the standard deviation, at least 2
    /// * `untrusted` - Extra samples the average withholds after seeding
    /// * `upper_multiplier` - Standard deviations between middle and upper band
    /// * `lower_multiplier` - Standard deviations between middle and lower band
    pub fn exponential(
        period: usize,
        untrusted: usize,
        upper_multiplier: T,
        lower_multiplier: T,
    ) -> Result<Self> {
        Self::with_moving_average(
            ExponentialMovingAverage::new(period, untrusted)?,
            upper_multiplier,
            lower_multiplier,
        )
    }
}

impl<T, M> Indicator for BollingerBands<T, M>
where
    T: Float + Default,
    M: MovingAverage<T>,
{
    fn period(&self) -> usize {
        self.average.period()
    }

    fn lookback_period(&self) -> usize {
        self.average.lookback_period()
    }

    fn is_strict(&self) -> bool {
        self.average.is_strict()
    }

    fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.stddev.set_strict(strict);
        self.average.set_strict(strict);
        self
    }

    fn reset(&mut self) -> &mut Self {
        tracing::trace!("bollinger bands reset");
        self.stddev.reset();
        self.average.reset();
        self
    }
}

impl<T, M> ScalarIndicator<T> for BollingerBands<T, M>
where
    T: Float + Default,
    M: MovingAverage<T>,
{
    type Output = Bands<T>;

    #[inline]
    fn calc(&mut self, sequence: u64, value: T) -> Bands<T> {
        debug_assert_finite(value);
        let deviation = self.stddev.calc(sequence, value);
        let middle = self.average.calc(sequence, value);
        self.combine(sequence, middle, deviation)
    }

    #[inline]
    fn pick(&self, sequence: u64, value: T) -> Bands<T> {
        debug_assert_finite(value);
        let deviation = self.stddev.pick(sequence, value);
        let middle = self.average.pick(sequence, value);
        self.combine(sequence, middle, deviation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn simple_bands_match_reference() {
        let mut bands = BollingerBands::<f64, _>::simple(3, 2.0, 2.0).unwrap();
        let inputs = [25.4, 26.2, 26.0, 26.1, 25.8, 25.9];
        let results: Vec<Bands<f64>> = inputs
            .iter()
            .enumerate()
            .map(|(s, v)| bands.calc(s as u64, *v))
            .collect();
        assert!(results[0].is_nan() && results[1].is_nan());
        assert!(results[0].upper.is_nan() && results[1].lower.is_nan());

        // middle 25.8667, stddev 0.3399
        assert_approx_eq!(results[2].middle, 25.8667, 0.0001);
        assert_approx_eq!(results[2].upper, 26.54654, 1e-5);
        assert_approx_eq!(results[2].lower, 25.18680, 1e-5);
        // middle 26.1, stddev 0.0816
        assert_approx_eq!(results[3].middle, 26.1, 1e-9);
        assert_approx_eq!(results[3].upper, 26.26330, 1e-5);
        assert_approx_eq!(results[3].lower, 25.93670, 1e-5);
    }

    #[test]
    fn asymmetric_multipliers() {
        let mut bands = BollingerBands::<f64, _>::simple(2, 3.0, 1.0).unwrap();
        bands.calc(0, 1.0);
        let out = bands.calc(1, 3.0);
        assert_eq!(out.middle, 2.0);
        assert_eq!(out.upper, 5.0);
        assert_eq!(out.lower, 1.0);
    }

    #[test]
    fn exponential_bands_follow_ema_lookback() {
        let mut bands = BollingerBands::<f64, _>::exponential(3, 2, 2.0, 2.0).unwrap();
        let mut ema = ExponentialMovingAverage::<f64>::new(3, 2).unwrap();
        assert_eq!(bands.lookback_period(), 4);
        assert_eq!(bands.period(), 3);
        let inputs = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for (sequence, value) in inputs.iter().enumerate() {
            let sequence = sequence as u64;
            let middle = ema.calc(sequence, *value);
            let preview = bands.pick(sequence, *value);
            let out = bands.calc(sequence, *value);
            if sequence < 4 {
                assert!(out.is_nan() && preview.is_nan());
            } else {
                assert_eq!(out.middle, middle);
                assert_eq!(preview, out);
                assert!(out.upper >= out.middle && out.lower <= out.middle);
            }
        }
    }

    #[test]
    fn rejects_non_finite_multipliers() {
        assert_eq!(
            BollingerBands::<f64, _>::simple(5, f64::NAN, 2.0).unwrap_err(),
            Error::NonFiniteParameter {
                name: "upper multiplier"
            }
        );
        assert!(BollingerBands::<f64, _>::exponential(5, 0, 2.0, f64::INFINITY).is_err());
        assert!(BollingerBands::<f64, _>::simple(1, 2.0, 2.0).is_err());
    }

    /// Passes samples through with no warm-up at all
    #[derive(Debug)]
    struct Identity;

    impl Indicator for Identity {
        fn period(&self) -> usize {
            3
        }

        fn lookback_period(&self) -> usize {
            0
        }

        fn is_strict(&self) -> bool {
            false
        }

        fn set_strict(&mut self, _strict: bool) -> &mut Self {
            self
        }

        fn reset(&mut self) -> &mut Self {
            self
        }
    }

    impl ScalarIndicator<f64> for Identity {
        type Output = f64;

        fn calc(&mut self, _sequence: u64, value: f64) -> f64 {
            value
        }

        fn pick(&self, _sequence: u64, value: f64) -> f64 {
            value
        }
    }

    impl MovingAverage<f64> for Identity {}

    #[test]
    fn rejects_average_settling_early() {
        assert_eq!(
            BollingerBands::<f64, _>::with_moving_average(Identity, 2.0, 2.0).unwrap_err(),
            Error::MismatchedComponents {
                reason: "moving average settles before the standard deviation"
            }
        );
    }

    #[test]
    fn strict_flag_reaches_children() {
        let mut bands = BollingerBands::<f64, _>::simple(4, 2.0, 2.0).unwrap();
        bands.set_strict(true);
        assert!(bands.is_strict());
        bands.set_strict(false);
        assert!(!bands.is_strict());
        assert!(!bands.moving_average().is_strict());
    }

    #[test]
    fn reset_replays() {
        let mut bands = BollingerBands::<f64, _>::simple(3, 2.0, 1.5).unwrap();
        let inputs = [4.0, 8.0, 6.0, 5.0, 7.0];
        let first: Vec<Bands<f64>> = inputs
            .iter()
            .enumerate()
            .map(|(s, v)| bands.calc(s as u64, *v))
            .collect();
        bands.reset();
        for (sequence, value) in inputs.iter().enumerate() {
            let out = bands.calc(sequence as u64, *value);
            let before = first[sequence];
            if before.is_nan() {
                assert!(out.is_nan());
            } else {
                assert_eq!(out, before);
            }
        }
    }
}
