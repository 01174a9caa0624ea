//! Geometry object: one collision/visual shape descriptor.

use nalgebra::Vector3;
use sim_types::SpatialTransform;

use super::enums::GeomType;
use super::JointIndex;

/// Default RGBA for geometries without an explicit color.
pub const DEFAULT_MESH_COLOR: [f64; 4] = [0.9, 0.9, 0.9, 1.0];

/// One shape attached to a joint of the kinematic model.
///
/// A plain value type: every field is public and can be reassigned without
/// side effects on the other fields. `parent_joint` is not range-checked
/// here; only a consumer that also knows the joint count
/// (see [`crate::ConsistencyChecker`]) can decide whether it is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryObject {
    /// Display name.
    pub name: String,
    /// Index of the joint this shape moves with.
    pub parent_joint: JointIndex,
    /// Pose of the shape relative to its parent joint frame.
    pub placement: SpatialTransform,
    /// External mesh source; empty when the shape is a primitive.
    pub mesh_path: String,
    /// Shape kind.
    pub geom_type: GeomType,
    /// Type-specific size parameters (see [`GeomType::bounding_radius`]).
    pub size: Vector3<f64>,
    /// Per-axis scale applied to mesh vertices.
    pub mesh_scale: Vector3<f64>,
    /// Display color (RGBA).
    pub mesh_color: [f64; 4],
    /// Exclude this object from automatically generated collision pairs.
    pub disable_collision: bool,
}

impl GeometryObject {
    /// Create a primitive shape with no mesh source.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parent_joint: JointIndex,
        geom_type: GeomType,
        size: Vector3<f64>,
        placement: SpatialTransform,
    ) -> Self {
        Self {
            name: name.into(),
            parent_joint,
            placement,
            mesh_path: String::new(),
            geom_type,
            size,
            mesh_scale: Vector3::repeat(1.0),
            mesh_color: DEFAULT_MESH_COLOR,
            disable_collision: false,
        }
    }

    /// Create a mesh shape whose vertices come from `mesh_path`.
    #[must_use]
    pub fn with_mesh(
        name: impl Into<String>,
        parent_joint: JointIndex,
        placement: SpatialTransform,
        mesh_path: impl Into<String>,
        mesh_scale: Vector3<f64>,
    ) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            mesh_scale,
            ..Self::new(name, parent_joint, GeomType::Mesh, mesh_scale, placement)
        }
    }

    /// Set the display color.
    #[must_use]
    pub fn with_color(mut self, rgba: [f64; 4]) -> Self {
        self.mesh_color = rgba;
        self
    }

    /// Exclude the object from [`GeometryModel::add_all_collision_pairs`].
    ///
    /// [`GeometryModel::add_all_collision_pairs`]: super::GeometryModel::add_all_collision_pairs
    #[must_use]
    pub fn with_collision_disabled(mut self) -> Self {
        self.disable_collision = true;
        self
    }

    /// Whether the shape comes from an external mesh source.
    #[must_use]
    pub fn has_mesh(&self) -> bool {
        !self.mesh_path.is_empty()
    }

    /// Bounding sphere radius around the shape origin.
    #[must_use]
    pub fn bounding_radius(&self) -> f64 {
        self.geom_type.bounding_radius(self.size)
    }
}
