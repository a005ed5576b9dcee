//! Engine error types.

use crate::algorithms::Algorithm;

/// Error type for every fallible engine operation.
///
/// All variants are terminal for the run that produced them. Nothing is
/// retried, and the shared reference value is never touched on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiError {
    /// Non-positive or out-of-range digit/term/sample count, or an unknown
    /// algorithm name
    InvalidArgument(String),
    /// The guard digits were too few to hold the requested digits stable
    PrecisionInsufficient {
        algorithm: Algorithm,
        requested_digits: u32,
        guard_digits: u32,
    },
    /// The run was cancelled through its `CancellationToken`
    Cancelled,
    /// Configuration could not be read or parsed
    Config(String),
}

impl std::fmt::Display for PiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PiError::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
            PiError::PrecisionInsufficient {
                algorithm,
                requested_digits,
                guard_digits,
            } => write!(
                f,
                "precision insufficient: {} with {} guard digits is unstable at {} digits",
                algorithm, guard_digits, requested_digits
            ),
            PiError::Cancelled => write!(f, "computation cancelled"),
            PiError::Config(s) => write!(f, "configuration error: {}", s),
        }
    }
}

impl std::error::Error for PiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PiError::InvalidArgument("digits must be positive".into());
        assert_eq!(err.to_string(), "invalid argument: digits must be positive");

        assert_eq!(PiError::Cancelled.to_string(), "computation cancelled");

        let err = PiError::PrecisionInsufficient {
            algorithm: Algorithm::Leibniz,
            requested_digits: 12,
            guard_digits: 0,
        };
        assert_eq!(
            err.to_string(),
            "precision insufficient: Leibniz with 0 guard digits is unstable at 12 digits"
        );
    }
}
