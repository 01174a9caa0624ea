//! Factory methods for sample models.
//!
//! These constructors produce a pre-configured humanoid [`Model`] and a
//! matching [`GeometryModel`]. Used by inline tests and by
//! `sim-conformance-tests`.

use nalgebra::{Unit, Vector3};
use sim_types::SpatialTransform;

use super::JointIndex;
use super::enums::{GeomType, JointType};
use super::geometry_model::GeometryModel;
use super::geometry_object::GeometryObject;
use super::model::Model;

/// Limb prefixes in joint order.
const LIMBS: [&str; 4] = ["rleg", "lleg", "rarm", "larm"];

/// Distance between shoulder and elbow, and between elbow and wrist.
const LIMB_SEGMENT: f64 = 0.5;

/// Local joint names and axes of one 6-joint limb.
const LIMB_JOINTS: [(&str, LimbAxis); 6] = [
    ("shoulder1_joint", LimbAxis::X),
    ("shoulder2_joint", LimbAxis::Y),
    ("shoulder3_joint", LimbAxis::Z),
    ("elbow_joint", LimbAxis::Y),
    ("wrist1_joint", LimbAxis::Y),
    ("wrist2_joint", LimbAxis::X),
];

#[derive(Clone, Copy)]
enum LimbAxis {
    X,
    Y,
    Z,
}

impl LimbAxis {
    fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Self::X => Vector3::x_axis(),
            Self::Y => Vector3::y_axis(),
            Self::Z => Vector3::z_axis(),
        }
    }
}

impl Model {
    /// Create the sample humanoid.
    ///
    /// Joint layout (28 joints):
    ///
    /// | ids     | joints                                  |
    /// |---------|-----------------------------------------|
    /// | 0       | `universe`                              |
    /// | 1       | `root_joint` (free flyer)               |
    /// | 2..=7   | right leg (`rleg_shoulder1_joint`, ...) |
    /// | 8..=13  | left leg                                |
    /// | 14, 15  | `chest1_joint`, `chest2_joint`          |
    /// | 16..=21 | right arm                               |
    /// | 22..=27 | left arm                                |
    ///
    /// Every limb is `shoulder1/2/3`, `elbow`, `wrist1/2`, all hinges.
    #[must_use]
    pub fn sample_humanoid() -> Self {
        let mut model = Self::new("humanoid");
        let root = model.push_joint(
            0,
            JointType::Free,
            Vector3::z_axis(),
            SpatialTransform::identity(),
            "root_joint".to_string(),
        );

        model.push_limb(root, "rleg", Vector3::new(0.0, -0.2, -0.1));
        model.push_limb(root, "lleg", Vector3::new(0.0, 0.2, -0.1));

        let chest1 = model.push_joint(
            root,
            JointType::Hinge,
            Vector3::x_axis(),
            SpatialTransform::identity(),
            "chest1_joint".to_string(),
        );
        let chest2 = model.push_joint(
            chest1,
            JointType::Hinge,
            Vector3::y_axis(),
            SpatialTransform::identity(),
            "chest2_joint".to_string(),
        );

        model.push_limb(chest2, "rarm", Vector3::new(0.0, -0.3, 1.0));
        model.push_limb(chest2, "larm", Vector3::new(0.0, 0.3, 1.0));
        model
    }

    fn push_limb(&mut self, parent: JointIndex, prefix: &str, offset: Vector3<f64>) {
        let mut current = parent;
        for (i, (name, axis)) in LIMB_JOINTS.iter().enumerate() {
            let placement = match i {
                0 => SpatialTransform::from_translation(offset),
                3 | 4 => SpatialTransform::from_translation(Vector3::new(0.0, 0.0, -LIMB_SEGMENT)),
                _ => SpatialTransform::identity(),
            };
            current = self.push_joint(
                current,
                JointType::Hinge,
                axis.unit(),
                placement,
                format!("{prefix}_{name}"),
            );
        }
    }
}

impl GeometryModel {
    /// Primitive shapes for [`Model::sample_humanoid`].
    ///
    /// Each limb carries five objects named `{limb}{part}_object`, in the
    /// order shoulder, upper arm, elbow, lower arm, wrist; limbs follow the
    /// joint order (right leg first), so object 0 is `rlegshoulder_object`
    /// on `rleg_shoulder1_joint` with identity placement. The torso and
    /// head follow the limbs.
    ///
    /// Joints are looked up by name; limbs missing from `model` are
    /// skipped.
    #[must_use]
    pub fn sample_humanoid(model: &Model) -> Self {
        let mut geom_model = Self::new();
        let half = Vector3::new(0.0, 0.0, -LIMB_SEGMENT / 2.0);

        for limb in LIMBS {
            let joint = |local: &str| model.get_joint_id(&format!("{limb}_{local}"));
            let (Some(shoulder), Some(shoulder3), Some(elbow), Some(wrist)) = (
                joint("shoulder1_joint"),
                joint("shoulder3_joint"),
                joint("elbow_joint"),
                joint("wrist1_joint"),
            ) else {
                continue;
            };

            let ball = |part: &str, parent| {
                GeometryObject::new(
                    format!("{limb}{part}_object"),
                    parent,
                    GeomType::Sphere,
                    Vector3::new(0.05, 0.0, 0.0),
                    SpatialTransform::identity(),
                )
            };
            let segment = |part: &str, parent| {
                GeometryObject::new(
                    format!("{limb}{part}_object"),
                    parent,
                    GeomType::Capsule,
                    Vector3::new(0.04, LIMB_SEGMENT / 2.0 - 0.05, 0.0),
                    SpatialTransform::from_translation(half),
                )
            };

            geom_model.add_geometry_object(ball("shoulder", shoulder));
            geom_model.add_geometry_object(segment("upperarm", shoulder3));
            geom_model.add_geometry_object(ball("elbow", elbow));
            geom_model.add_geometry_object(segment("lowerarm", elbow));
            geom_model.add_geometry_object(ball("wrist", wrist));
        }

        if let Some(chest) = model.get_joint_id("chest2_joint") {
            geom_model.add_geometry_object(GeometryObject::new(
                "chest_object",
                chest,
                GeomType::Box,
                Vector3::new(0.1, 0.25, 0.4),
                SpatialTransform::from_translation(Vector3::new(0.0, 0.0, 0.5)),
            ));
            geom_model.add_geometry_object(GeometryObject::new(
                "head_object",
                chest,
                GeomType::Sphere,
                Vector3::new(0.15, 0.0, 0.0),
                SpatialTransform::from_translation(Vector3::new(0.0, 0.0, 1.25)),
            ));
        }

        geom_model
    }
}
