// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ComplexityError, ComplexityResult};

/// Upper bound on reflection iterations accepted by `validate()`.
pub const MAX_ITERATIONS: usize = 10_000;

/// Standard-deviation convention used when standardizing ICE/ICS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdConvention {
    /// Divide by n - 1. Matches the published reference numerics.
    #[default]
    Sample,
    /// Divide by n.
    Population,
}

impl StdConvention {
    /// Delta degrees of freedom subtracted from n.
    pub fn ddof(self) -> usize {
        match self {
            StdConvention::Sample => 1,
            StdConvention::Population => 0,
        }
    }
}

/// Runtime configuration for the complexity pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Revealed-advantage cut-off: M = 1 where QL >= threshold.
    /// Default: 1.0.
    pub threshold: f64,

    /// Fixed number of reflection steps before the final Kr half-step.
    /// Default: 19, calibrated against published results.
    pub iterations: usize,

    /// Standard deviation used to z-score the reflection vectors.
    /// Default: sample (n - 1).
    pub std_convention: StdConvention,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            iterations: 19,
            std_convention: StdConvention::Sample,
        }
    }
}

impl ComplexityConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> ComplexityResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ComplexityError::Config(format!(
                "threshold must be finite and > 0, got {}",
                self.threshold
            )));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(ComplexityError::Config(format!(
                "iterations must be <= {MAX_ITERATIONS}, got {}",
                self.iterations
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ComplexityResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ComplexityError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = ComplexityConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.iterations, 19);
        assert_eq!(cfg.threshold, 1.0);
        assert_eq!(cfg.std_convention, StdConvention::Sample);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let cfg = ComplexityConfig {
            threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ComplexityError::Config(_))));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let cfg = ComplexityConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_iterations() {
        let cfg = ComplexityConfig {
            iterations: MAX_ITERATIONS + 1,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = ComplexityConfig::from_json(r#"{"iterations": 5, "std_convention": "population"}"#)
            .unwrap();
        assert_eq!(cfg.iterations, 5);
        assert_eq!(cfg.threshold, 1.0);
        assert_eq!(cfg.std_convention, StdConvention::Population);
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(matches!(
            ComplexityConfig::from_json("{not json"),
            Err(ComplexityError::Config(_))
        ));
    }

    #[test]
    fn test_ddof() {
        assert_eq!(StdConvention::Sample.ddof(), 1);
        assert_eq!(StdConvention::Population.ddof(), 0);
    }
}
