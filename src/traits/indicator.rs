/// Common contract of every streaming indicator
///
/// An indicator consumes samples numbered `0, 1, 2, ...` in strict arrival
/// order. Each sample goes through one of two operations exposed by the
/// concrete type:
///
/// - `calc(sequence, ..)` commits the sample and returns the output value;
/// - `pick(sequence, ..)` returns what `calc` would return for the same
///   sequence number and inputs, leaving the indicator untouched.
///
/// Outputs before [`lookback_period`](Indicator::lookback_period) are NaN.
/// Always test them with `is_nan`, never by equality.
pub trait Indicator {
    /// Returns the window width of the indicator
    ///
    /// # Returns
    ///
    /// * `usize` - The period fixed at construction
    fn period(&self) -> usize;

    /// Returns the first sequence number that yields a valid output
    ///
    /// Accounts for the warm-up of the indicator itself, of every sub-indicator
    /// it owns, and of any untrusted margin requested at construction.
    ///
    /// # Returns
    ///
    /// * `usize` - The lookback period
    fn lookback_period(&self) -> usize;

    /// Returns true if out-of-order sequence numbers panic
    fn is_strict(&self) -> bool;

    /// Enables or disables the sequence ordering check
    ///
    /// Defaults to `cfg!(debug_assertions)`. Composite indicators forward the
    /// setting to the indicators they own.
    ///
    /// # Arguments
    ///
    /// * `strict` - Whether ordering violations panic
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The indicator, for chaining
    fn set_strict(&mut self, strict: bool) -> &mut Self
    where
        Self: Sized;

    /// Rewinds the indicator to its post-construction state
    ///
    /// Buffers are kept and refilled, nothing is reallocated. The next `calc`
    /// must carry sequence number `0`, and replaying the same samples yields
    /// the same outputs as the first run.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_stream::{Indicator, MaximumInPeriod, ScalarIndicator};
    /// let mut max = MaximumInPeriod::<f64>::new(2).unwrap();
    /// let first: Vec<f64> = [3.0, 1.0, 2.0]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(s, v)| max.calc(s as u64, *v))
    ///     .collect();
    ///
    /// max.reset();
    /// let second: Vec<f64> = [3.0, 1.0, 2.0]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(s, v)| max.calc(s as u64, *v))
    ///     .collect();
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(first, [3.0, 3.0, 2.0]);
    /// ```
    fn reset(&mut self) -> &mut Self
    where
        Self: Sized;
}
