/// Warm-up bookkeeping for an indicator.
///
/// `period` is the window width. `lookback_period` is the first sequence
/// number whose output is valid: the warm-up the formula itself needs plus an
/// optional untrusted margin for long recurrences whose head is considered
/// numerically unreliable. Outputs before it are NaN.
///
/// The state is a pure function of the sequence number, so an instance moves
/// from warming up to settled exactly once per lifetime (or per `reset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    period: usize,
    lookback: usize,
}

impl Lookback {
    /// Creates the bookkeeping for `period` with the given base warm-up.
    pub const fn new(period: usize, warm_up: usize) -> Self {
        Self {
            period,
            lookback: warm_up,
        }
    }

    /// Extends the warm-up by an untrusted margin.
    pub const fn with_untrusted(self, untrusted: usize) -> Self {
        Self {
            period: self.period,
            lookback: self.lookback + untrusted,
        }
    }

    /// Returns the window width.
    #[inline]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Returns the first sequence number with a valid output.
    #[inline]
    pub const fn lookback_period(&self) -> usize {
        self.lookback
    }

    /// Returns true once `sequence` has reached the lookback period.
    #[inline]
    pub const fn is_settled(&self, sequence: u64) -> bool {
        sequence >= self.lookback as u64
    }

    /// Returns true for the one sequence number that produces the first value.
    #[inline]
    pub const fn is_first(&self, sequence: u64) -> bool {
        sequence == self.lookback as u64
    }
}

#[cfg(test)]
mod tests {
    use super::Lookback;

    #[test]
    fn settles_once_at_lookback() {
        let lookback = Lookback::new(4, 3);
        let settled: Vec<_> = (0..6).map(|s| lookback.is_settled(s)).collect();
        assert_eq!(settled, [false, false, false, true, true, true]);
        assert_eq!((0..6).filter(|&s| lookback.is_first(s)).count(), 1);
    }

    #[test]
    fn untrusted_margin_extends_warm_up() {
        let lookback = Lookback::new(5, 4).with_untrusted(10);
        assert_eq!(lookback.period(), 5);
        assert_eq!(lookback.lookback_period(), 14);
        assert!(!lookback.is_settled(13));
        assert!(lookback.is_first(14));
    }
}
