//! Configuration types for comparisons and consistency checks.
//!
//! [`ToleranceConfig`] controls approximate transform comparison and
//! [`CheckConfig`] controls how Model/Data consistency checks report
//! their findings.

use crate::{Result, SimError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used by approximate comparisons of transforms.
///
/// Two values `a` and `b` are close when `|a - b| <= absolute + relative * |b|`,
/// evaluated elementwise on homogeneous matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToleranceConfig {
    /// Relative tolerance (scaled by the magnitude of the reference value).
    pub relative: f64,
    /// Absolute tolerance.
    pub absolute: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-8,
        }
    }
}

impl ToleranceConfig {
    /// Create a tolerance from relative and absolute parts.
    #[must_use]
    pub const fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    /// Near machine-precision tolerance for values that went through at most
    /// a handful of floating-point operations.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            relative: 1e-12,
            absolute: 1e-12,
        }
    }

    /// Set the relative tolerance.
    #[must_use]
    pub const fn with_relative(mut self, relative: f64) -> Self {
        self.relative = relative;
        self
    }

    /// Set the absolute tolerance.
    #[must_use]
    pub const fn with_absolute(mut self, absolute: f64) -> Self {
        self.absolute = absolute;
        self
    }

    /// Whether `actual` is within tolerance of `expected`.
    #[inline]
    #[must_use]
    pub fn is_close(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= self.absolute + self.relative * expected.abs()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.relative.is_finite() || self.relative < 0.0 {
            return Err(SimError::invalid_config(format!(
                "relative tolerance must be finite and non-negative, got {}",
                self.relative
            )));
        }
        if !self.absolute.is_finite() || self.absolute < 0.0 {
            return Err(SimError::invalid_config(format!(
                "absolute tolerance must be finite and non-negative, got {}",
                self.absolute
            )));
        }
        Ok(())
    }
}

/// Behaviour of Model/Data consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckConfig {
    /// Stop at the first mismatch instead of collecting all of them.
    pub fail_fast: bool,
    /// Emit a `tracing` warning for every mismatch found.
    pub log_mismatches: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            log_mismatches: true,
        }
    }
}

impl CheckConfig {
    /// Report only the first mismatch.
    #[must_use]
    pub const fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            log_mismatches: true,
        }
    }

    /// Collect every mismatch without logging (batch validation).
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            fail_fast: false,
            log_mismatches: false,
        }
    }

    /// Enable or disable mismatch logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.log_mismatches = enabled;
        self
    }
}
