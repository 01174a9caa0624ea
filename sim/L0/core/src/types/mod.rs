//! Core type definitions for the geometry Model/Data layer.
//!
//! This module contains the types that flow through every consistency check:
//! enums, the kinematic [`Model`]/[`Data`] pair, geometry objects, and the
//! [`GeometryModel`]/[`GeometryData`] pair built on top of them.

pub(crate) mod collision_pair;
pub(crate) mod data;
pub(crate) mod enums;
pub(crate) mod error;
pub(crate) mod geometry_data;
pub(crate) mod geometry_model;
pub(crate) mod geometry_object;
pub(crate) mod model;
mod model_factories;

/// Index of a joint in a [`Model`] (0 is the universe).
pub type JointIndex = usize;

/// Index of a geometry object in a [`GeometryModel`].
pub type GeomIndex = usize;

pub use collision_pair::CollisionPair;
pub use data::Data;
pub use enums::*;
pub use error::GeometryError;
pub use geometry_data::GeometryData;
pub use geometry_model::GeometryModel;
pub use geometry_object::{DEFAULT_MESH_COLOR, GeometryObject};
pub use model::{Model, UNIVERSE_NAME};
