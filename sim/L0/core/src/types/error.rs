//! Error type for the geometry Model/Data layer.

use thiserror::Error;

use super::enums::ElementType;
use crate::consistency::ConsistencyReport;

/// Errors raised by geometry model access, data creation and validation.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    /// Indexed access beyond the current element count.
    #[error("{element} index {index} out of range (count is {len})")]
    OutOfRange {
        /// Category of the indexed element.
        element: ElementType,
        /// The requested index.
        index: usize,
        /// The number of elements at the time of the call.
        len: usize,
    },

    /// Data (or a model pair) is not structurally compatible with its model.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(ConsistencyReport),

    /// A geometry object names a parent joint the kinematic model does not have.
    #[error(
        "geometry object {geom_id} ('{name}') references joint {parent_joint}, \
         but the model has {njoints} joints"
    )]
    UncheckedReference {
        /// Index of the geometry object.
        geom_id: usize,
        /// Name of the geometry object.
        name: String,
        /// The out-of-range parent joint.
        parent_joint: usize,
        /// Number of joints in the kinematic model.
        njoints: usize,
    },

    /// No element with the given name.
    #[error("{element} '{name}' not found")]
    NotFound {
        /// Category of the looked-up element.
        element: ElementType,
        /// The missing name.
        name: String,
    },

    /// A collision pair must name two distinct geometry objects.
    #[error("invalid collision pair ({first}, {second}): a geometry cannot collide with itself")]
    InvalidCollisionPair {
        /// First geometry index.
        first: usize,
        /// Second geometry index.
        second: usize,
    },

    /// A joint was attached to a parent that does not exist yet.
    #[error("invalid parent joint {parent} (model has {njoints} joints)")]
    InvalidParentJoint {
        /// The requested parent joint.
        parent: usize,
        /// Number of joints at the time of the call.
        njoints: usize,
    },
}

impl GeometryError {
    /// Create an out-of-range error for a geometry index.
    #[must_use]
    pub fn geom_out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange {
            element: ElementType::Geom,
            index,
            len,
        }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(element: ElementType, name: impl Into<String>) -> Self {
        Self::NotFound {
            element,
            name: name.into(),
        }
    }

    /// Check if this is an out-of-range error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Check if this is a structural mismatch.
    #[must_use]
    pub fn is_structural_mismatch(&self) -> bool {
        matches!(self, Self::StructuralMismatch(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::geom_out_of_range(7, 3);
        assert_eq!(
            err.to_string(),
            "geometry object index 7 out of range (count is 3)"
        );

        let err = GeometryError::UncheckedReference {
            geom_id: 0,
            name: "foot".to_string(),
            parent_joint: 40,
            njoints: 28,
        };
        let msg = err.to_string();
        assert!(msg.contains("'foot'"));
        assert!(msg.contains("joint 40"));

        let err = GeometryError::not_found(ElementType::Joint, "elbow");
        assert_eq!(err.to_string(), "joint 'elbow' not found");
    }

    #[test]
    fn test_error_predicates() {
        assert!(GeometryError::geom_out_of_range(1, 0).is_out_of_range());
        let err = GeometryError::StructuralMismatch(ConsistencyReport::default());
        assert!(err.is_structural_mismatch());
        assert!(!err.is_out_of_range());
    }
}
