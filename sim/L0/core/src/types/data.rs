//! Kinematic data: per-use joint state paired with a [`Model`].
//!
//! [`Data`] is the mutable counterpart to [`Model`]: one `Data` is created
//! per execution context via `model.make_data()`.
//!
//! [`Model`]: super::Model

use nalgebra::DVector;
use sim_types::SpatialTransform;

use super::model::Model;

/// Per-context joint state (like pinocchio's `Data`).
///
/// # Key Invariant
///
/// `o_mi` and `li_mi` have one entry per joint of the originating model and
/// `q` has `model.nq()` entries. `Model::check` verifies exactly this.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    /// Joint configuration (length `nq`).
    pub q: DVector<f64>,
    /// World placement of every joint frame (length `njoints`).
    ///
    /// Written by forward kinematics; identity after `make_data()`.
    pub o_mi: Vec<SpatialTransform>,
    /// Placement of every joint relative to its parent (length `njoints`).
    pub li_mi: Vec<SpatialTransform>,
}

impl Data {
    /// Number of joints this data was sized for.
    #[must_use]
    pub fn njoints(&self) -> usize {
        self.o_mi.len()
    }

    /// Recompute `o_mi` from `li_mi` by chaining placements from the root.
    ///
    /// Parents precede children in `model` (guaranteed by
    /// [`Model::add_joint`]). Joints without a `li_mi` or `o_mi` entry, or
    /// whose parent does not precede them, are left untouched.
    pub fn propagate_placements(&mut self, model: &Model) {
        let Self { o_mi, li_mi, .. } = self;
        let links = model.joint_parent.iter().zip(li_mi.iter()).enumerate();
        for (jnt_id, (&parent, &local)) in links {
            let placement = if jnt_id == 0 {
                local
            } else {
                match o_mi.get(parent) {
                    Some(&parent_placement) if parent < jnt_id => parent_placement * local,
                    _ => continue,
                }
            };
            if let Some(slot) = o_mi.get_mut(jnt_id) {
                *slot = placement;
            }
        }
    }
}
