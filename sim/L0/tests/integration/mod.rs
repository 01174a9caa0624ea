//! Integration tests for the sim-* geometry Model/Data layer.
//!
//! These tests verify end-to-end behavior through the public API only:
//! - Geometry object access and in-place mutation on a humanoid model
//! - Model/Data creation and cross-structure consistency checks
//! - Geometry placement updates, single and batched

pub mod batch_placements;
pub mod geometry_object;
pub mod model_data_consistency;
pub mod placements;
pub mod test_utils;
