use super::Indicator;

/// Indicator fed with one value per sample
///
/// Implemented by every indicator whose sample is a single scalar (close
/// price, volume, a derived series). The two operations share one formula:
///
/// - `calc` commits the sample, advancing ring buffers and accumulators;
/// - `pick` previews the same sample against the current state.
///
/// For any state and input, `pick(n, v)` followed by `calc(n, v)` returns the
/// same value twice, bit for bit.
pub trait ScalarIndicator<T>: Indicator {
    /// Value produced for each sample
    type Output;

    /// Commits a sample and returns the indicator value
    ///
    /// # Arguments
    ///
    /// * `sequence` - `0` for the first sample, then one more than the previous call
    /// * `value` - The sample, a finite number
    ///
    /// # Returns
    ///
    /// * `Self::Output` - The value, NaN while warming up
    fn calc(&mut self, sequence: u64, value: T) -> Self::Output;

    /// Previews the value `calc` would return, without committing
    ///
    /// # Arguments
    ///
    /// * `sequence` - The sequence number the next `calc` would carry
    /// * `value` - The hypothetical sample
    ///
    /// # Returns
    ///
    /// * `Self::Output` - The value, NaN while warming up
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_stream::{ScalarIndicator, Variance};
    /// let mut variance = Variance::<f64>::new(2).unwrap();
    /// variance.calc(0, 1.0);
    ///
    /// let preview = variance.pick(1, 3.0);
    /// assert_eq!(preview, variance.calc(1, 3.0));
    /// assert_eq!(preview, 1.0);
    /// ```
    fn pick(&self, sequence: u64, value: T) -> Self::Output;
}

/// Scalar indicator usable as the middle band of Bollinger Bands
///
/// The capability set `{period, lookback_period, calc, pick, reset}` shared by
/// the simple and exponential moving averages. Composites select an
/// implementation through a type parameter and dispatch statically.
pub trait MovingAverage<T>: ScalarIndicator<T, Output = T> {}
