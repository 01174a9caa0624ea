//! Error types for transform construction and configuration.

use thiserror::Error;

/// Errors raised while building spatial transforms or validating configuration.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimError {
    /// Rotation block is not orthonormal with determinant +1.
    #[error("rotation is not orthonormal: |RᵀR - I| = {deviation:e}, det = {determinant}")]
    NotOrthonormal {
        /// Largest absolute entry of `RᵀR - I`.
        deviation: f64,
        /// Determinant of the rotation block.
        determinant: f64,
    },

    /// Homogeneous matrix does not have the `[0 0 0 1]` bottom row.
    #[error("invalid homogeneous matrix: bottom row is {row:?}")]
    InvalidHomogeneous {
        /// The offending bottom row.
        row: [f64; 4],
    },

    /// Transform contains `NaN` or `Inf`.
    #[error("transform contains non-finite values")]
    NonFinite,

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl SimError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
