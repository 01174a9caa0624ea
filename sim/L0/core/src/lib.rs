//! Geometry Model/Data layer.
//!
//! This crate provides the Model/Data split for geometry attached to an
//! articulated system. It follows the pinocchio/MuJoCo design where:
//!
//! - [`Model`] and [`GeometryModel`] are static (shared, read-only in use)
//! - [`Data`] and [`GeometryData`] are per-use (one per thread or context)
//! - Geometry world placements are derived from joint placements
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐    ┌──────────────────────────────┐
//! │            Model             │    │        GeometryModel         │
//! │  joint tree (0 = universe)   │◄───┤  GeometryObject[] (AoS)      │
//! └──────────────┬───────────────┘    │  parent_joint, placement     │
//!                │ make_data()        └──────────────┬───────────────┘
//!                ▼                                   │ make_data()
//! ┌──────────────────────────────┐                   ▼
//! │            Data              │    ┌──────────────────────────────┐
//! │  q, o_mi, li_mi              ├───►│        GeometryData          │
//! └──────────────────────────────┘    │  o_mg (one per object)       │
//!                                     └──────────────────────────────┘
//! ```
//!
//! A geometry object's `parent_joint` is an index into the kinematic model
//! that the geometry model never validates on its own.
//! [`ConsistencyChecker`] and [`create_datas`] perform that cross-structure
//! check before any data is handed out.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no rendering or engine dependencies.
//!
//! # Quick Start
//!
//! ```
//! use sim_core::{GeometryModel, Model, create_datas, update_geometry_placements};
//!
//! let model = Model::sample_humanoid();
//! let geom_model = GeometryModel::sample_humanoid(&model);
//!
//! let (mut data, mut geom_data) = create_datas(&model, &geom_model)?;
//! assert!(model.check(&data));
//! assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms());
//!
//! data.propagate_placements(&model);
//! update_geometry_placements(&model, &data, &geom_model, &mut geom_data)?;
//! # Ok::<(), sim_core::GeometryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/sim-core/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,       // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,           // mul_add style changes aren't always clearer
    clippy::option_if_let_else,         // if-let is often more readable than map_or_else
    clippy::doc_markdown,               // Not all technical terms need backticks
    clippy::missing_errors_doc,         // Error variants are documented on GeometryError
    clippy::module_name_repetitions,
)]

// Core type definitions (enums, models, data, geometry objects)
pub mod types;

// Model/Data cross-structure validation
pub mod consistency;

// Geometry placement update
pub mod forward;

// Batched contexts (N independent data pairs sharing one model pair)
pub mod batch;

pub use batch::{GeometryBatch, GeometryEnv};
pub use consistency::{ConsistencyChecker, ConsistencyReport, Mismatch, create_datas};
pub use forward::update_geometry_placements;
pub use types::{
    CollisionPair, DEFAULT_MESH_COLOR, Data, ElementType, GeomIndex, GeomType, GeometryData,
    GeometryError, GeometryModel, GeometryObject, JointIndex, JointType, Model, UNIVERSE_NAME,
};

// Re-export sim-types so downstream crates need a single dependency.
pub use sim_types::{CheckConfig, SpatialTransform, ToleranceConfig};
