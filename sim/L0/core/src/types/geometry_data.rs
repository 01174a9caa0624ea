//! Geometry data: per-use world placements of geometry objects.
//!
//! [`GeometryData`] is the mutable half of the geometry Model/Data split.
//! One instance is created per execution context via
//! [`GeometryModel::make_data`]; instances never share storage, so each
//! context can refresh its own placements without locking.

use std::collections::BTreeMap;

use sim_types::SpatialTransform;

use super::enums::ElementType;
use super::error::GeometryError;
use super::geometry_model::GeometryModel;
use super::{GeomIndex, JointIndex};

/// Per-context geometry state.
///
/// # Key Invariant
///
/// `o_mg` has exactly one entry per geometry object of the originating
/// model, in the same index order. Its length is fixed at creation: entries
/// can be overwritten through [`Self::o_mg_mut`] but never added or removed.
/// Staleness after the model changes is not tracked; use
/// [`GeometryModel::check`] to detect it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// World placement of every geometry object (`oMg`).
    o_mg: Vec<SpatialTransform>,
    /// Activation flag per collision pair of the originating model.
    active_collision_pairs: Vec<bool>,
    /// Geometry objects attached to each joint.
    inner_objects: BTreeMap<JointIndex, Vec<GeomIndex>>,
    /// Geometry objects paired (by collision pair) with each joint's inner objects.
    outer_objects: BTreeMap<JointIndex, Vec<GeomIndex>>,
}

impl GeometryData {
    /// Allocate identity placements and active pair flags in one go.
    pub(crate) fn new(ngeoms: usize, ncollision_pairs: usize) -> Self {
        Self {
            o_mg: vec![SpatialTransform::identity(); ngeoms],
            active_collision_pairs: vec![true; ncollision_pairs],
            inner_objects: BTreeMap::new(),
            outer_objects: BTreeMap::new(),
        }
    }

    /// Number of geometry objects this data was sized for.
    #[must_use]
    pub fn ngeoms(&self) -> usize {
        self.o_mg.len()
    }

    /// World placements, index-aligned with the geometry model.
    #[must_use]
    pub fn o_mg(&self) -> &[SpatialTransform] {
        &self.o_mg
    }

    /// Mutable world placements. The slice cannot change length.
    pub fn o_mg_mut(&mut self) -> &mut [SpatialTransform] {
        &mut self.o_mg
    }

    // ==================== Collision pair activation ====================

    /// Activation flag per collision pair.
    #[must_use]
    pub fn active_collision_pairs(&self) -> &[bool] {
        &self.active_collision_pairs
    }

    /// Number of active collision pairs.
    #[must_use]
    pub fn nactive_collision_pairs(&self) -> usize {
        self.active_collision_pairs.iter().filter(|&&a| a).count()
    }

    /// Activate pair `pair_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if the pair does not exist.
    pub fn activate_collision_pair(&mut self, pair_id: usize) -> Result<(), GeometryError> {
        self.set_pair_flag(pair_id, true)
    }

    /// Deactivate pair `pair_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if the pair does not exist.
    pub fn deactivate_collision_pair(&mut self, pair_id: usize) -> Result<(), GeometryError> {
        self.set_pair_flag(pair_id, false)
    }

    /// Deactivate every pair.
    pub fn deactivate_all_collision_pairs(&mut self) {
        self.active_collision_pairs.fill(false);
    }

    /// Enable or disable every pair that involves `geom_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if `geom_id` is not an object of
    /// `geom_model`, and [`GeometryError::StructuralMismatch`] if this data
    /// was not created from `geom_model`.
    pub fn set_geometry_collision_status(
        &mut self,
        geom_model: &GeometryModel,
        geom_id: GeomIndex,
        enabled: bool,
    ) -> Result<(), GeometryError> {
        if geom_id >= geom_model.ngeoms() {
            return Err(GeometryError::geom_out_of_range(geom_id, geom_model.ngeoms()));
        }
        let report = crate::consistency::geometry_data_report(geom_model, self, false);
        if !report.is_consistent() {
            return Err(GeometryError::StructuralMismatch(report));
        }

        for (flag, pair) in self
            .active_collision_pairs
            .iter_mut()
            .zip(geom_model.collision_pairs())
        {
            if pair.contains(geom_id) {
                *flag = enabled;
            }
        }
        Ok(())
    }

    fn set_pair_flag(&mut self, pair_id: usize, value: bool) -> Result<(), GeometryError> {
        let len = self.active_collision_pairs.len();
        let flag = self
            .active_collision_pairs
            .get_mut(pair_id)
            .ok_or(GeometryError::OutOfRange {
                element: ElementType::CollisionPair,
                index: pair_id,
                len,
            })?;
        *flag = value;
        Ok(())
    }

    // ==================== Inner / outer objects ====================

    /// Rebuild the per-joint object maps from `geom_model`.
    ///
    /// `inner_objects[j]` lists the objects whose parent joint is `j`.
    /// `outer_objects[j]` lists the objects attached to other joints that
    /// share a collision pair with one of `j`'s inner objects. Lists are in
    /// increasing index order without duplicates.
    pub fn fill_inner_outer_objects(&mut self, geom_model: &GeometryModel) {
        self.inner_objects.clear();
        self.outer_objects.clear();

        for (geom_id, obj) in geom_model.iter().enumerate() {
            self.inner_objects
                .entry(obj.parent_joint)
                .or_default()
                .push(geom_id);
        }

        for pair in geom_model.collision_pairs() {
            let (a, b) = (pair.first(), pair.second());
            let (Ok(obj_a), Ok(obj_b)) = (geom_model.geometry_object(a), geom_model.geometry_object(b))
            else {
                continue;
            };
            if obj_a.parent_joint == obj_b.parent_joint {
                continue;
            }
            self.outer_objects.entry(obj_a.parent_joint).or_default().push(b);
            self.outer_objects.entry(obj_b.parent_joint).or_default().push(a);
        }

        for list in self.outer_objects.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
    }

    /// Objects attached to `joint` (empty before [`Self::fill_inner_outer_objects`]).
    #[must_use]
    pub fn inner_objects(&self, joint: JointIndex) -> &[GeomIndex] {
        self.inner_objects.get(&joint).map_or(&[][..], Vec::as_slice)
    }

    /// Objects that can collide with `joint`'s inner objects.
    #[must_use]
    pub fn outer_objects(&self, joint: JointIndex) -> &[GeomIndex] {
        self.outer_objects.get(&joint).map_or(&[][..], Vec::as_slice)
    }
}
