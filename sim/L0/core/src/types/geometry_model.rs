//! Geometry model: the ordered, owning collection of geometry objects.
//!
//! [`GeometryModel`] is the static half of the geometry Model/Data split.
//! The position of an object in the collection is its identity: every
//! [`GeometryData`] created from the model stores one placement per object
//! at the same index.

use tracing::{debug, warn};

use super::collision_pair::CollisionPair;
use super::enums::ElementType;
use super::error::GeometryError;
use super::geometry_data::GeometryData;
use super::geometry_object::GeometryObject;
use super::model::Model;
use super::GeomIndex;

/// Ordered collection of [`GeometryObject`]s plus the collision pairs
/// between them.
///
/// Cardinality is recomputed from the storage ([`Self::ngeoms`]), never
/// stored separately. Adding or removing objects after a [`GeometryData`]
/// was created leaves that data stale; [`Self::check`] reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryModel {
    geometry_objects: Vec<GeometryObject>,
    collision_pairs: Vec<CollisionPair>,
}

impl GeometryModel {
    /// Empty geometry model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of geometry objects.
    #[must_use]
    pub fn ngeoms(&self) -> usize {
        self.geometry_objects.len()
    }

    /// Number of collision pairs.
    #[must_use]
    pub fn ncollision_pairs(&self) -> usize {
        self.collision_pairs.len()
    }

    // ==================== Objects ====================

    /// Append an object without validating its parent joint.
    pub fn add_geometry_object(&mut self, object: GeometryObject) -> GeomIndex {
        self.geometry_objects.push(object);
        self.geometry_objects.len() - 1
    }

    /// Append an object after checking its parent joint exists in `model`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UncheckedReference`] if
    /// `object.parent_joint >= model.njoints()`; the model is left unchanged.
    pub fn add_geometry_object_checked(
        &mut self,
        object: GeometryObject,
        model: &Model,
    ) -> Result<GeomIndex, GeometryError> {
        let njoints = model.njoints();
        if object.parent_joint >= njoints {
            return Err(GeometryError::UncheckedReference {
                geom_id: self.ngeoms(),
                name: object.name,
                parent_joint: object.parent_joint,
                njoints,
            });
        }
        Ok(self.add_geometry_object(object))
    }

    /// Remove the first object called `name` and return it.
    ///
    /// Collision pairs naming the object are dropped and pairs naming later
    /// objects are shifted down by one.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotFound`] if no object has that name.
    pub fn remove_geometry_object(&mut self, name: &str) -> Result<GeometryObject, GeometryError> {
        let geom_id = self.geometry_id(name)?;
        let removed = self.geometry_objects.remove(geom_id);

        let shift = |i: GeomIndex| if i > geom_id { i - 1 } else { i };
        self.collision_pairs = self
            .collision_pairs
            .iter()
            .filter(|pair| !pair.contains(geom_id))
            .map(|pair| CollisionPair::new(shift(pair.first()), shift(pair.second())))
            .collect();

        debug!(geom_name = name, geom_id, "removed geometry object");
        Ok(removed)
    }

    /// Object at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if `index >= ngeoms()`.
    pub fn geometry_object(&self, index: GeomIndex) -> Result<&GeometryObject, GeometryError> {
        let len = self.ngeoms();
        self.geometry_objects
            .get(index)
            .ok_or_else(|| GeometryError::geom_out_of_range(index, len))
    }

    /// Mutable object at `index`; field writes land in the model itself.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if `index >= ngeoms()`.
    pub fn geometry_object_mut(
        &mut self,
        index: GeomIndex,
    ) -> Result<&mut GeometryObject, GeometryError> {
        let len = self.ngeoms();
        self.geometry_objects
            .get_mut(index)
            .ok_or_else(|| GeometryError::geom_out_of_range(index, len))
    }

    /// Replace the object at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if `index >= ngeoms()`.
    pub fn set_geometry_object(
        &mut self,
        index: GeomIndex,
        object: GeometryObject,
    ) -> Result<(), GeometryError> {
        *self.geometry_object_mut(index)? = object;
        Ok(())
    }

    /// All objects in index order.
    #[must_use]
    pub fn geometry_objects(&self) -> &[GeometryObject] {
        &self.geometry_objects
    }

    /// Iterator over objects in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &GeometryObject> {
        self.geometry_objects.iter()
    }

    /// Index of the first object called `name`.
    ///
    /// Names can be rewritten in place through [`Self::geometry_object_mut`],
    /// so this scans the objects instead of caching a name table.
    #[must_use]
    pub fn get_geometry_id(&self, name: &str) -> Option<GeomIndex> {
        self.geometry_objects.iter().position(|obj| obj.name == name)
    }

    /// Whether an object called `name` exists.
    #[must_use]
    pub fn exist_geometry_name(&self, name: &str) -> bool {
        self.get_geometry_id(name).is_some()
    }

    /// Like [`Self::get_geometry_id`] but fails with [`GeometryError::NotFound`].
    pub fn geometry_id(&self, name: &str) -> Result<GeomIndex, GeometryError> {
        self.get_geometry_id(name)
            .ok_or_else(|| GeometryError::not_found(ElementType::Geom, name))
    }

    // ==================== Collision pairs ====================

    /// Register a collision pair. Adding an existing pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if either index is not a
    /// geometry object, and [`GeometryError::InvalidCollisionPair`] for a
    /// self pair.
    pub fn add_collision_pair(&mut self, pair: CollisionPair) -> Result<(), GeometryError> {
        if pair.second() >= self.ngeoms() {
            warn!(%pair, ngeoms = self.ngeoms(), "collision pair names a missing geometry");
            return Err(GeometryError::geom_out_of_range(pair.second(), self.ngeoms()));
        }
        if pair.is_self_pair() {
            return Err(GeometryError::InvalidCollisionPair {
                first: pair.first(),
                second: pair.second(),
            });
        }
        if !self.exist_collision_pair(&pair) {
            self.collision_pairs.push(pair);
        }
        Ok(())
    }

    /// Register every pair of objects attached to different joints.
    ///
    /// Objects with `disable_collision` set are skipped. Pairs already
    /// present are kept; existing order is preserved.
    pub fn add_all_collision_pairs(&mut self) {
        let n = self.ngeoms();
        for i in 0..n {
            let a = &self.geometry_objects[i];
            if a.disable_collision {
                continue;
            }
            for j in (i + 1)..n {
                let b = &self.geometry_objects[j];
                if b.disable_collision || a.parent_joint == b.parent_joint {
                    continue;
                }
                let pair = CollisionPair::new(i, j);
                if !self.collision_pairs.contains(&pair) {
                    self.collision_pairs.push(pair);
                }
            }
        }
        debug!(
            ngeoms = n,
            npairs = self.ncollision_pairs(),
            "generated collision pairs"
        );
    }

    /// Remove a pair. Returns whether it was present.
    pub fn remove_collision_pair(&mut self, pair: &CollisionPair) -> bool {
        match self.find_collision_pair(pair) {
            Some(index) => {
                self.collision_pairs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every collision pair.
    pub fn remove_all_collision_pairs(&mut self) {
        self.collision_pairs.clear();
    }

    /// Whether the pair is registered.
    #[must_use]
    pub fn exist_collision_pair(&self, pair: &CollisionPair) -> bool {
        self.collision_pairs.contains(pair)
    }

    /// Index of the pair in [`Self::collision_pairs`].
    #[must_use]
    pub fn find_collision_pair(&self, pair: &CollisionPair) -> Option<usize> {
        self.collision_pairs.iter().position(|p| p == pair)
    }

    /// All registered pairs in registration order.
    #[must_use]
    pub fn collision_pairs(&self) -> &[CollisionPair] {
        &self.collision_pairs
    }

    // ==================== Data ====================

    /// Allocate a [`GeometryData`] sized to this model.
    ///
    /// Every placement starts at identity and every collision pair starts
    /// active. No kinematics are evaluated. Successive calls return
    /// independent values.
    #[must_use]
    pub fn make_data(&self) -> GeometryData {
        debug!(
            ngeoms = self.ngeoms(),
            npairs = self.ncollision_pairs(),
            "allocating geometry data"
        );
        GeometryData::new(self.ngeoms(), self.ncollision_pairs())
    }

    /// Whether `data` is sized to this model.
    #[must_use]
    pub fn check(&self, data: &GeometryData) -> bool {
        data.ngeoms() == self.ngeoms()
            && data.active_collision_pairs().len() == self.ncollision_pairs()
    }
}

impl std::ops::Index<GeomIndex> for GeometryModel {
    type Output = GeometryObject;

    /// Panics when out of range, like slice indexing; use
    /// [`GeometryModel::geometry_object`] for a checked lookup.
    fn index(&self, index: GeomIndex) -> &GeometryObject {
        &self.geometry_objects[index]
    }
}
