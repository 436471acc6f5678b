use num_traits::Float;

use crate::{Indicator, Lookback, SequenceGuard, helper::debug_assert_finite};

/// # Ease of Movement
///
/// Arms' ease of movement relates the shift of a bar's midpoint to the volume
/// needed to move it:
///
/// ```text
/// box ratio = volume / 10000 / (high - low)
/// EMV       = (midpoint - previous midpoint) / box ratio
/// ```
///
/// The first bar has no previous midpoint, so the lookback period is `1`.
/// A bar without range has an infinite box ratio and yields `0`.
///
/// # Examples
///
/// ```
/// # use ta_stream::EaseOfMovement;
/// let mut emv = EaseOfMovement::<f64>::new();
/// assert!(emv.calc(0, 10.0, 8.0, 10_000.0).is_nan());
/// assert_eq!(emv.calc(1, 12.0, 10.0, 20_000.0), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct EaseOfMovement<T> {
    guard: SequenceGuard,
    lookback: Lookback,
    half: T,
    volume_scale: T,
    midpoint: T,
}

impl<T: Float> EaseOfMovement<T> {
    /// Creates a new ease of movement
    pub fn new() -> Self {
        let two = T::one() + T::one();
        let ten = two * two * two + two;
        let hundred = ten * ten;
        Self {
            guard: SequenceGuard::new(),
            lookback: Lookback::new(1, 1),
            half: T::one() / two,
            volume_scale: hundred * hundred,
            midpoint: T::zero(),
        }
    }

    /// Commits a bar and returns its ease of movement
    ///
    /// # Arguments
    ///
    /// * `sequence` - The bar's sequence number
    /// * `high` - High price of the bar
    /// * `low` - Low price of the bar
    /// * `volume` - Traded volume of the bar, not negative
    ///
    /// # Returns
    ///
    /// * `T` - The ease of movement, NaN for the first bar
    pub fn calc(&mut self, sequence: u64, high: T, low: T, volume: T) -> T {
        self.guard.advance(sequence);
        let value = self.ease(sequence, high, low, volume);
        self.midpoint = (high + low) * self.half;
        value
    }

    /// Previews [`calc`](Self::calc) for a hypothetical bar
    pub fn pick(&self, sequence: u64, high: T, low: T, volume: T) -> T {
        self.guard.check(sequence);
        self.ease(sequence, high, low, volume)
    }

    #[inline]
    fn ease(&self, sequence: u64, high: T, low: T, volume: T) -> T {
        debug_assert_finite(high);
        debug_assert_finite(low);
        debug_assert!(high >= low, "high must not be below low");
        debug_assert!(volume >= T::zero(), "volume must not be negative");
        if !self.lookback.is_settled(sequence) {
            return T::nan();
        }
        let midpoint = (high + low) * self.half;
        let box_ratio = volume / self.volume_scale / (high - low);
        (midpoint - self.midpoint) / box_ratio
    }
}

impl<T: Float> Default for EaseOfMovement<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Indicator for EaseOfMovement<T> {
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
        tracing::trace!("ease of movement reset");
        self.guard.reset();
        self.midpoint = T::zero();
        self
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn midpoint_move_over_box_ratio() {
        let mut emv = EaseOfMovement::<f64>::new();
        assert_eq!(emv.lookback_period(), 1);
        assert!(emv.pick(0, 20.0, 18.0, 5_000.0).is_nan());
        assert!(emv.calc(0, 20.0, 18.0, 5_000.0).is_nan());
        // midpoint 19 -> 20, box ratio 0.125
        let preview = emv.pick(1, 22.0, 18.0, 5_000.0);
        assert_eq!(preview, emv.calc(1, 22.0, 18.0, 5_000.0));
        assert_approx_eq!(preview, 8.0, 1e-12);
        // midpoint 20 -> 19
        assert_approx_eq!(emv.calc(2, 20.0, 18.0, 10_000.0), -2.0, 1e-12);
    }

    #[test]
    fn flat_bar_is_zero() {
        let mut emv = EaseOfMovement::<f64>::new();
        emv.calc(0, 10.0, 9.0, 100.0);
        assert_eq!(emv.calc(1, 12.0, 12.0, 100.0), 0.0);
    }

    #[test]
    fn reset_forgets_midpoint() {
        let mut emv = EaseOfMovement::<f64>::new();
        emv.calc(0, 10.0, 8.0, 10_000.0);
        emv.calc(1, 30.0, 20.0, 10_000.0);
        emv.reset();
        assert!(emv.calc(0, 10.0, 8.0, 10_000.0).is_nan());
        assert_eq!(emv.calc(1, 12.0, 10.0, 20_000.0), 2.0);
    }

    #[test]
    fn default_uses_arms_constants() {
        let mut emv = EaseOfMovement::<f64>::default();
        assert_eq!(emv.half, 0.5);
        assert_eq!(emv.volume_scale, 10_000.0);
        emv.calc(0, 10.0, 8.0, 10_000.0);
        assert_eq!(emv.pick(1, 12.0, 10.0, 20_000.0), 2.0);
    }
}
