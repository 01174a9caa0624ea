//! Position-stage computations on top of the kinematic data.
//!
//! Joint forward kinematics (filling [`Data::o_mi`] from `q`) is owned by the
//! caller; this module only composes the resulting joint placements with the
//! static geometry placements.
//!
//! [`Data::o_mi`]: crate::Data::o_mi

pub(crate) mod position;

pub use position::update_geometry_placements;
