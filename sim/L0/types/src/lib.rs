//! Core value types shared by the simulation crates.
//!
//! - [`SpatialTransform`] - Rigid transform (rotation + translation) used for
//!   joint placements, geometry reference placements and world placements
//! - [`ToleranceConfig`] - Tolerances for approximate transform comparison
//! - [`CheckConfig`] - How Model/Data consistency checks report mismatches
//! - [`SimError`] - Errors for transform construction and configuration
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They know nothing about models, joints or
//! geometries; sim-core builds the Model/Data layer on top of them.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless training loops
//! - Hardware control code
//! - Analysis tools
//! - Other engines
//!
//! # Example
//!
//! ```
//! use sim_types::{SpatialTransform, ToleranceConfig};
//!
//! let m = SpatialTransform::random();
//! let same = SpatialTransform::identity() * m;
//! assert!(same.is_approx(&m, &ToleranceConfig::default()));
//! ```

#![doc(html_root_url = "https://docs.rs/sim-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,       // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,           // mul_add style changes aren't always clearer
    clippy::neg_cmp_op_on_partial_ord,  // !(x <= eps) is intentional for NaN rejection
    clippy::missing_errors_doc,         // Error docs added where non-obvious
)]

mod config;
mod error;
mod transform;

pub use config::{CheckConfig, ToleranceConfig};
pub use error::SimError;
pub use transform::SpatialTransform;

// Re-export math types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};

/// Result type for transform and configuration operations.
pub type Result<T> = std::result::Result<T, SimError>;
