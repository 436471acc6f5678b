//! Construction errors.
//!
//! Only indicator construction is fallible. Once built, `calc` and `pick` never
//! return errors: ordering and input-domain violations are contract violations
//! caught by assertions, and an unavailable output is reported as NaN.

use thiserror::Error;

/// Error returned when an indicator cannot be built from the supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The period is too small (or otherwise inconsistent) for the indicator.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The rejected period.
        period: usize,
        /// Why the period was rejected.
        reason: &'static str,
    },

    /// A floating-point parameter is NaN or infinite.
    #[error("parameter `{name}` must be finite")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// A constant could not be represented in the indicator's float type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// What was being converted.
        context: &'static str,
    },

    /// Sub-indicators of a composite do not agree with each other.
    #[error("mismatched components: {reason}")]
    MismatchedComponents {
        /// Description of the mismatch.
        reason: &'static str,
    },
}

/// Convenience alias for construction results.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_period_message() {
        let err = Error::InvalidPeriod {
            period: 1,
            reason: "period must be greater than 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid period 1: period must be greater than 1"
        );
    }

    #[test]
    fn non_finite_parameter_message() {
        let err = Error::NonFiniteParameter { name: "smoothing" };
        assert_eq!(err.to_string(), "parameter `smoothing` must be finite");
    }

    #[test]
    fn numeric_conversion_message() {
        let err = Error::NumericConversion { context: "period" };
        assert_eq!(err.to_string(), "numeric conversion failed: period");
    }

    #[test]
    fn mismatched_components_message() {
        let err = Error::MismatchedComponents {
            reason: "moving average period differs",
        };
        assert_eq!(
            err.to_string(),
            "mismatched components: moving average period differs"
        );
    }
}
