// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Complexity Kernel failures.
#[derive(Error, Debug)]
pub enum ComplexityError {
    /// A period reached the location-quotient stage with a zero grand,
    /// row, or column total. The sanitizer should make this impossible.
    #[error("degenerate period {period}: {reason}")]
    DegeneratePeriod { period: String, reason: String },

    /// Malformed input row, label, or value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration or column mapping.
    #[error("config error: {0}")]
    Config(String),

    /// Numerical error (shape mismatch, NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type ComplexityResult<T> = Result<T, ComplexityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_period_message() {
        let err = ComplexityError::DegeneratePeriod {
            period: "2019".into(),
            reason: "grand total is 0".into(),
        };
        assert_eq!(err.to_string(), "degenerate period 2019: grand total is 0");
    }

    #[test]
    fn test_config_message() {
        let err = ComplexityError::Config("threshold must be > 0".into());
        assert_eq!(err.to_string(), "config error: threshold must be > 0");
    }
}
