use num_traits::Float;

use crate::{
    Indicator, Kbn, Lookback, Result, ScalarIndicator, SequenceGuard, Window,
    helper::{debug_assert_finite, validate_period},
};

/// Rolling sum of the last `period` samples.
///
/// The window starts zero-filled, so during warm-up the output is the sum of
/// the samples seen so far. The running total uses Kahan-Babuska-Neumaier
/// summation to keep long streams from drifting.
#[derive(Debug, Clone)]
pub struct SumOverPeriod<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    values: Window<T>,
    sum: Kbn<T>,
}

impl<T: Float + Default> SumOverPeriod<T> {
    /// Creates a new rolling sum with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The rolling sum, or `Error::InvalidPeriod`
    pub fn new(period: usize) -> Result<Self> {
        let period = validate_period(period, 2)?;
        let lookback = Lookback::new(period, period - 1);
        tracing::debug!(period, "sum over period configured");
        Ok(Self {
            guard: SequenceGuard::new(),
            lookback,
            values: Window::new(period, T::zero()),
            sum: Kbn::default(),
        })
    }
}

impl<T: Float + Default> Indicator for SumOverPeriod<T> {
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
        tracing::trace!("sum over period reset");
        self.guard.reset();
        self.values.reset();
        self.sum = Kbn::default();
        self
    }
}

impl<T: Float + Default> ScalarIndicator<T> for SumOverPeriod<T> {
    type Output = T;

    #[inline]
    fn calc(&mut self, sequence: u64, value: T) -> T {
        self.guard.advance(sequence);
        debug_assert_finite(value);
        let slot = self.values.slot(sequence);
        let evicted = self.values.replace(slot, value);
        self.sum -= evicted;
        self.sum += value;
        self.sum.total()
    }

    #[inline]
    fn pick(&self, sequence: u64, value: T) -> T {
        self.guard.check(sequence);
        debug_assert_finite(value);
        let mut sum = self.sum.clone();
        sum -= self.values.get(self.values.slot(sequence));
        sum += value;
        sum.total()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sums_trailing_window() {
        let mut sum = SumOverPeriod::<f64>::new(3).unwrap();
        let inputs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let expected = [1.0, 3.0, 6.0, 9.0, 12.0, 15.0];
        for (sequence, (value, expected)) in inputs.iter().zip(expected).enumerate() {
            let sequence = sequence as u64;
            assert_eq!(sum.pick(sequence, *value), expected);
            assert_eq!(sum.calc(sequence, *value), expected);
        }
    }

    #[test]
    fn compensated_sum_stays_exact() {
        let mut sum = SumOverPeriod::<f64>::new(3).unwrap();
        let inputs = [
            1_000_000.1,
            1_000_000.2,
            1_000_000.3,
            1_000_000.4,
            1_000_000.5,
            1_000_000.6,
            1_000_000.7,
        ];
        let results: Vec<f64> = inputs
            .iter()
            .enumerate()
            .map(|(s, v)| sum.calc(s as u64, *v))
            .skip(2)
            .collect();
        let expected = [3000000.6, 3000000.9, 3000001.2, 3000001.5, 3000001.8];
        for (e, r) in expected.iter().zip(results) {
            assert_approx_eq::assert_approx_eq!(e, r, 1e-6);
        }
    }

    #[test]
    fn reset_zeroes_window() {
        let mut sum = SumOverPeriod::<f64>::new(2).unwrap();
        sum.calc(0, 10.0);
        sum.calc(1, 20.0);
        sum.reset();
        assert_eq!(sum.calc(0, 1.0), 1.0);
        assert_eq!(sum.calc(1, 2.0), 3.0);
    }
}
