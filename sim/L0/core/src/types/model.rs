//! Kinematic model: the joint tree geometry objects attach to.
//!
//! [`Model`] is the static, structural description of the articulated
//! system: joint names, parents, kinds, axes and placements. Joint 0 is the
//! fixed "universe" joint (the world frame). Only structure lives here;
//! evaluating joint placements from a configuration belongs to a forward
//! kinematics routine that writes [`Data::o_mi`].

use nalgebra::{DVector, Unit, Vector3};
use sim_types::SpatialTransform;

use super::JointIndex;
use super::data::Data;
use super::enums::{ElementType, JointType};
use super::error::GeometryError;

/// Name of joint 0.
pub const UNIVERSE_NAME: &str = "universe";

/// Static joint tree (like pinocchio's `Model` or mjModel's `jnt_*` arrays).
///
/// # Memory Layout
///
/// `joint_*` arrays are indexed by joint id (0 = universe) and always have
/// the same length, [`Model::njoints`].
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Model name.
    pub name: String,

    // ==================== Joints (indexed by joint id) ====================
    /// Joint names.
    pub joint_name: Vec<String>,
    /// Parent joint (the universe is its own parent).
    pub joint_parent: Vec<JointIndex>,
    /// Joint kind.
    pub joint_type: Vec<JointType>,
    /// Axis for hinge/slide joints (unused for the other kinds).
    pub joint_axis: Vec<Unit<Vector3<f64>>>,
    /// Placement of the joint frame relative to its parent joint frame.
    pub joint_placement: Vec<SpatialTransform>,
    /// Start index in the configuration vector `q`.
    pub joint_qpos_adr: Vec<usize>,
    /// Start index in the velocity vector.
    pub joint_dof_adr: Vec<usize>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new("")
    }
}

impl Model {
    /// Model with the universe joint only.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joint_name: vec![UNIVERSE_NAME.to_string()],
            joint_parent: vec![0],
            joint_type: vec![JointType::Fixed],
            joint_axis: vec![Vector3::z_axis()],
            joint_placement: vec![SpatialTransform::identity()],
            joint_qpos_adr: vec![0],
            joint_dof_adr: vec![0],
        }
    }

    /// Number of joints, including the universe.
    #[must_use]
    pub fn njoints(&self) -> usize {
        self.joint_parent.len()
    }

    /// Number of configuration coordinates.
    #[must_use]
    pub fn nq(&self) -> usize {
        self.joint_type.iter().map(|t| t.nq()).sum()
    }

    /// Number of velocity coordinates.
    #[must_use]
    pub fn nv(&self) -> usize {
        self.joint_type.iter().map(|t| t.nv()).sum()
    }

    /// Append a joint under `parent`.
    ///
    /// `axis` is only meaningful for hinge and slide joints.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParentJoint`] if `parent` is not an
    /// existing joint. Parents must be added before their children, so joint
    /// ids are always in topological order.
    pub fn add_joint(
        &mut self,
        parent: JointIndex,
        joint_type: JointType,
        axis: Unit<Vector3<f64>>,
        placement: SpatialTransform,
        name: impl Into<String>,
    ) -> Result<JointIndex, GeometryError> {
        let njoints = self.njoints();
        if parent >= njoints {
            return Err(GeometryError::InvalidParentJoint { parent, njoints });
        }

        Ok(self.push_joint(parent, joint_type, axis, placement, name.into()))
    }

    /// Append a joint whose parent is known to exist.
    pub(crate) fn push_joint(
        &mut self,
        parent: JointIndex,
        joint_type: JointType,
        axis: Unit<Vector3<f64>>,
        placement: SpatialTransform,
        name: String,
    ) -> JointIndex {
        let id = self.njoints();
        self.joint_qpos_adr.push(self.nq());
        self.joint_dof_adr.push(self.nv());
        self.joint_name.push(name);
        self.joint_parent.push(parent);
        self.joint_type.push(joint_type);
        self.joint_axis.push(axis);
        self.joint_placement.push(placement);
        id
    }

    /// Index of the first joint called `name`.
    #[must_use]
    pub fn get_joint_id(&self, name: &str) -> Option<JointIndex> {
        self.joint_name.iter().position(|n| n == name)
    }

    /// Whether a joint called `name` exists.
    #[must_use]
    pub fn exist_joint_name(&self, name: &str) -> bool {
        self.get_joint_id(name).is_some()
    }

    /// Like [`Self::get_joint_id`] but fails with [`GeometryError::NotFound`].
    pub fn joint_id(&self, name: &str) -> Result<JointIndex, GeometryError> {
        self.get_joint_id(name)
            .ok_or_else(|| GeometryError::not_found(ElementType::Joint, name))
    }

    /// Whether `ancestor` lies on the path from `joint` to the universe
    /// (a joint is its own ancestor).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: JointIndex, joint: JointIndex) -> bool {
        if joint >= self.njoints() {
            return false;
        }
        let mut current = joint;
        for _ in 0..self.njoints() {
            if current == ancestor {
                return true;
            }
            match self.joint_parent.get(current) {
                Some(&parent) if current != 0 => current = parent,
                _ => return false,
            }
        }
        false
    }

    /// Neutral configuration: zeros, with identity quaternions for ball and
    /// free joints (stored `[w, x, y, z]` after any position part).
    #[must_use]
    pub fn neutral_configuration(&self) -> DVector<f64> {
        let mut q = DVector::zeros(self.nq());
        for (joint_type, &adr) in self.joint_type.iter().zip(&self.joint_qpos_adr) {
            let w = match joint_type {
                JointType::Ball => adr,
                JointType::Free => adr + 3,
                JointType::Fixed | JointType::Hinge | JointType::Slide => continue,
            };
            if let Some(qw) = q.get_mut(w) {
                *qw = 1.0;
            }
        }
        q
    }

    /// Allocate a [`Data`] sized to this model.
    ///
    /// Joint placements start at identity; no kinematics are evaluated.
    #[must_use]
    pub fn make_data(&self) -> Data {
        Data {
            q: self.neutral_configuration(),
            o_mi: vec![SpatialTransform::identity(); self.njoints()],
            li_mi: self.joint_placement.clone(),
        }
    }

    /// Whether `data` is structurally compatible with this model.
    #[must_use]
    pub fn check(&self, data: &Data) -> bool {
        self.check_self()
            && data.o_mi.len() == self.njoints()
            && data.li_mi.len() == self.njoints()
            && data.q.len() == self.nq()
    }

    /// Internal array lengths agree and parents precede children.
    pub(crate) fn check_self(&self) -> bool {
        let n = self.njoints();
        self.joint_array_lens().iter().all(|&(_, len)| len == n)
            && self.misordered_parents().next().is_none()
    }

    /// Length of every `joint_*` array other than `joint_parent`.
    pub(crate) fn joint_array_lens(&self) -> [(&'static str, usize); 6] {
        [
            ("joint_name", self.joint_name.len()),
            ("joint_type", self.joint_type.len()),
            ("joint_axis", self.joint_axis.len()),
            ("joint_placement", self.joint_placement.len()),
            ("joint_qpos_adr", self.joint_qpos_adr.len()),
            ("joint_dof_adr", self.joint_dof_adr.len()),
        ]
    }

    /// `(joint, parent)` for every non-root joint whose parent does not
    /// precede it.
    pub(crate) fn misordered_parents(&self) -> impl Iterator<Item = (JointIndex, JointIndex)> + '_ {
        self.joint_parent
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(joint, &parent)| parent >= joint)
            .map(|(joint, &parent)| (joint, parent))
    }
}
