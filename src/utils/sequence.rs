/// Guards the sequencing contract shared by every indicator.
///
/// Samples fed to one indicator instance are numbered `0, 1, 2, ...` with no
/// gaps, repeats or regressions; `reset` rewinds the expected number to `0`.
/// `calc` consumes the expected number, `pick` only previews it.
///
/// In strict mode a violation is logged and then panics. Strict mode defaults
/// to `cfg!(debug_assertions)`, so release builds pay for a single branch on
/// a flag that is never set.
#[derive(Debug, Clone)]
pub struct SequenceGuard {
    strict: bool,
    expected: u64,
}

impl Default for SequenceGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceGuard {
    /// Creates a guard expecting sequence number `0`.
    pub const fn new() -> Self {
        Self {
            strict: cfg!(debug_assertions),
            expected: 0,
        }
    }

    /// Returns true if violations panic.
    #[inline]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Enables or disables the ordering check.
    #[inline]
    pub const fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Returns the sequence number the next `calc` must carry.
    #[inline]
    pub const fn expected(&self) -> u64 {
        self.expected
    }

    /// Verifies `sequence` without consuming it.
    #[inline]
    pub fn check(&self, sequence: u64) {
        if self.strict && sequence != self.expected {
            tracing::error!(
                sequence,
                expected = self.expected,
                "out-of-order sequence number"
            );
            panic!(
                "out-of-order sequence number: got {sequence}, expected {}",
                self.expected
            );
        }
    }

    /// Verifies and consumes `sequence`.
    #[inline]
    pub fn advance(&mut self, sequence: u64) {
        self.check(sequence);
        self.expected = sequence.wrapping_add(1);
    }

    /// Rewinds the expected sequence number to `0`.
    #[inline]
    pub const fn reset(&mut self) {
        self.expected = 0;
    }
}
