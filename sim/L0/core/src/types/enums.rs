//! Enums shared by the kinematic and geometry models.
//!
//! Joint kinds, geometry shape kinds and the element categories used when
//! reporting lookup and range errors.

use nalgebra::Vector3;

/// Element category used by lookups and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Joints of the kinematic model (indexed by joint id, 0 = universe).
    Joint,
    /// Geometry objects (indexed by geom id).
    Geom,
    /// Collision pairs (indexed by pair id).
    CollisionPair,
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joint => write!(f, "joint"),
            Self::Geom => write!(f, "geometry object"),
            Self::CollisionPair => write!(f, "collision pair"),
        }
    }
}

/// Joint kind.
///
/// Hinge and slide joints carry their axis in `Model::joint_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JointType {
    /// Rigid attachment (0 DOF). Joint 0 ("universe") is always fixed.
    #[default]
    Fixed,
    /// Hinge joint (1 DOF): rotation about a single axis.
    Hinge,
    /// Slide joint (1 DOF): translation along a single axis.
    Slide,
    /// Ball joint (3 DOF), quaternion configuration.
    Ball,
    /// Free joint (6 DOF): position + quaternion configuration.
    Free,
}

impl JointType {
    /// Number of position coordinates (nq contribution).
    #[must_use]
    pub const fn nq(self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::Hinge | Self::Slide => 1,
            Self::Ball => 4, // quaternion
            Self::Free => 7, // pos + quat
        }
    }

    /// Number of velocity coordinates / DOFs (nv contribution).
    #[must_use]
    pub const fn nv(self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::Hinge | Self::Slide => 1,
            Self::Ball => 3,
            Self::Free => 6,
        }
    }

    /// Whether the joint needs an axis.
    #[must_use]
    pub const fn has_axis(self) -> bool {
        matches!(self, Self::Hinge | Self::Slide)
    }
}

/// Shape kind of a geometry object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeomType {
    /// Plane (infinite, typically used for ground).
    Plane,
    /// Sphere defined by radius.
    #[default]
    Sphere,
    /// Capsule (cylinder with hemispherical caps).
    Capsule,
    /// Cylinder.
    Cylinder,
    /// Box (rectangular cuboid).
    Box,
    /// Ellipsoid.
    Ellipsoid,
    /// Triangle mesh loaded from `mesh_path` by an external mesh loader.
    Mesh,
}

impl GeomType {
    /// Bounding sphere radius for a geometry from its type and size.
    ///
    /// # Arguments
    /// * `size` - Type-specific size parameters:
    ///   - Sphere: `[radius, _, _]`
    ///   - Box: `[half_x, half_y, half_z]`
    ///   - Capsule: `[radius, half_length, _]`
    ///   - Cylinder: `[radius, half_length, _]`
    ///   - Ellipsoid: `[radius_x, radius_y, radius_z]`
    ///   - Plane: ignored (returns infinity)
    ///   - Mesh: `[scale_x, scale_y, scale_z]` (conservative estimate)
    #[must_use]
    pub fn bounding_radius(self, size: Vector3<f64>) -> f64 {
        match self {
            Self::Sphere => size.x,
            Self::Box => size.norm(),
            Self::Capsule => size.x + size.y,
            Self::Cylinder => size.x.hypot(size.y),
            Self::Ellipsoid => size.x.max(size.y).max(size.z),
            Self::Plane => f64::INFINITY,
            Self::Mesh => {
                // Mesh vertices are not known here; the loader owns them.
                let scale = size.x.max(size.y).max(size.z);
                if scale > 0.0 { scale * 10.0 } else { 10.0 }
            }
        }
    }

    /// Whether the shape is described by an external mesh source.
    #[must_use]
    pub const fn is_mesh(self) -> bool {
        matches!(self, Self::Mesh)
    }
}
