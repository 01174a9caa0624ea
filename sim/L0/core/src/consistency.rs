//! Model/Data consistency checks.
//!
//! A [`GeometryModel`] stores joint indices it never validates, and a
//! [`GeometryData`] stores placements sized to the model it was created
//! from. The checks here compare those structures against each other:
//!
//! - the kinematic [`Model`] must be well formed: every `joint_*` array has
//!   one entry per joint and parents precede their children
//! - every geometry `parent_joint` must name a joint of the kinematic [`Model`]
//! - a [`GeometryData`] must hold one placement per geometry object and one
//!   activation flag per collision pair
//! - a kinematic [`Data`] must be sized to its [`Model`]
//!
//! [`create_datas`] runs the model checks before allocating anything, so a
//! caller never receives data for an incompatible pair.

use std::fmt;

use sim_types::CheckConfig;
use tracing::{debug, warn};

use crate::types::{Data, GeomIndex, GeometryData, GeometryError, GeometryModel, JointIndex, Model};

/// One structural incompatibility found by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mismatch {
    /// A `joint_*` array of the kinematic model has the wrong length.
    JointArrayLength {
        /// Name of the offending array.
        field: &'static str,
        /// Its length.
        len: usize,
        /// `Model::njoints()`, the length of `joint_parent`.
        njoints: usize,
    },
    /// A joint's parent does not precede it in the kinematic model.
    JointParentOrder {
        /// The joint.
        joint: JointIndex,
        /// Its recorded parent.
        parent: JointIndex,
    },
    /// A geometry object names a joint the kinematic model does not have.
    UncheckedReference {
        /// Index of the geometry object.
        geom_id: GeomIndex,
        /// Name of the geometry object.
        name: String,
        /// The out-of-range parent joint.
        parent_joint: JointIndex,
        /// Number of joints in the kinematic model.
        njoints: usize,
    },
    /// Geometry data holds a different number of placements than the model
    /// has geometry objects.
    PlacementCount {
        /// `GeometryModel::ngeoms()`.
        expected: usize,
        /// Length of `o_mg`.
        actual: usize,
    },
    /// Geometry data holds a different number of collision pair flags than
    /// the model has pairs.
    CollisionPairCount {
        /// `GeometryModel::ncollision_pairs()`.
        expected: usize,
        /// Number of activation flags.
        actual: usize,
    },
    /// Kinematic data is not sized to the kinematic model.
    JointDataShape {
        /// `Model::njoints()`.
        njoints: usize,
        /// Joint placements held by the data.
        data_njoints: usize,
        /// `Model::nq()`.
        nq: usize,
        /// Configuration length held by the data.
        data_nq: usize,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JointArrayLength {
                field,
                len,
                njoints,
            } => write!(f, "{field} has {len} entries but the model has {njoints} joints"),
            Self::JointParentOrder { joint, parent } => {
                write!(f, "joint {joint} has parent {parent}, which does not precede it")
            }
            Self::UncheckedReference {
                geom_id,
                name,
                parent_joint,
                njoints,
            } => write!(
                f,
                "geometry object {geom_id} ('{name}') references joint {parent_joint} \
                 but the model has {njoints} joints"
            ),
            Self::PlacementCount { expected, actual } => {
                write!(f, "expected {expected} geometry placements, found {actual}")
            }
            Self::CollisionPairCount { expected, actual } => {
                write!(f, "expected {expected} collision pair flags, found {actual}")
            }
            Self::JointDataShape {
                njoints,
                data_njoints,
                nq,
                data_nq,
            } => write!(
                f,
                "joint data sized for {data_njoints} joints / nq {data_nq}, \
                 model has {njoints} joints / nq {nq}"
            ),
        }
    }
}

/// Outcome of a consistency check: every mismatch found, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    mismatches: Vec<Mismatch>,
}

impl ConsistencyReport {
    /// Whether no mismatch was found.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Mismatches in discovery order.
    #[must_use]
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Number of mismatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    /// Same as [`Self::is_consistent`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// `Ok(())` when consistent, otherwise [`GeometryError::StructuralMismatch`].
    pub fn into_result(self) -> Result<(), GeometryError> {
        if self.is_consistent() {
            Ok(())
        } else {
            Err(GeometryError::StructuralMismatch(self))
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mismatches.is_empty() {
            return write!(f, "consistent");
        }
        for (i, mismatch) in self.mismatches.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{mismatch}")?;
        }
        Ok(())
    }
}

/// Accumulates mismatches, stopping after the first one in fail-fast mode.
struct Collector {
    report: ConsistencyReport,
    fail_fast: bool,
}

impl Collector {
    fn new(fail_fast: bool) -> Self {
        Self {
            report: ConsistencyReport::default(),
            fail_fast,
        }
    }

    fn done(&self) -> bool {
        self.fail_fast && !self.report.is_consistent()
    }

    fn push(&mut self, mismatch: Mismatch) {
        if !self.done() {
            self.report.mismatches.push(mismatch);
        }
    }

    fn kinematic_model(&mut self, model: &Model) {
        let njoints = model.njoints();
        for (field, len) in model.joint_array_lens() {
            if len != njoints {
                self.push(Mismatch::JointArrayLength {
                    field,
                    len,
                    njoints,
                });
            }
        }
        for (joint, parent) in model.misordered_parents() {
            if self.done() {
                return;
            }
            self.push(Mismatch::JointParentOrder { joint, parent });
        }
    }

    fn geometry_model(&mut self, model: &Model, geom_model: &GeometryModel) {
        let njoints = model.njoints();
        for (geom_id, obj) in geom_model.iter().enumerate() {
            if self.done() {
                return;
            }
            if obj.parent_joint >= njoints {
                self.push(Mismatch::UncheckedReference {
                    geom_id,
                    name: obj.name.clone(),
                    parent_joint: obj.parent_joint,
                    njoints,
                });
            }
        }
    }

    fn geometry_data(&mut self, geom_model: &GeometryModel, geom_data: &GeometryData) {
        if geom_data.ngeoms() != geom_model.ngeoms() {
            self.push(Mismatch::PlacementCount {
                expected: geom_model.ngeoms(),
                actual: geom_data.ngeoms(),
            });
        }
        let nflags = geom_data.active_collision_pairs().len();
        if nflags != geom_model.ncollision_pairs() {
            self.push(Mismatch::CollisionPairCount {
                expected: geom_model.ncollision_pairs(),
                actual: nflags,
            });
        }
    }

    fn joint_data(&mut self, model: &Model, data: &Data) {
        if !model.check(data) {
            self.push(Mismatch::JointDataShape {
                njoints: model.njoints(),
                data_njoints: data.njoints(),
                nq: model.nq(),
                data_nq: data.q.len(),
            });
        }
    }
}

/// Geometry data check without logging, for callers inside the crate.
pub(crate) fn geometry_data_report(
    geom_model: &GeometryModel,
    geom_data: &GeometryData,
    fail_fast: bool,
) -> ConsistencyReport {
    let mut collector = Collector::new(fail_fast);
    collector.geometry_data(geom_model, geom_data);
    collector.report
}

/// Data sizes only (joint data and geometry data), without parent joint
/// checks or logging.
pub(crate) fn shape_report(
    model: &Model,
    data: &Data,
    geom_model: &GeometryModel,
    geom_data: &GeometryData,
) -> ConsistencyReport {
    let mut collector = Collector::new(false);
    collector.joint_data(model, data);
    collector.geometry_data(geom_model, geom_data);
    collector.report
}

/// Runs consistency checks under a [`CheckConfig`].
///
/// # Example
///
/// ```
/// use sim_core::{ConsistencyChecker, GeometryModel, Model};
/// use sim_types::CheckConfig;
///
/// let model = Model::sample_humanoid();
/// let geom_model = GeometryModel::sample_humanoid(&model);
///
/// let checker = ConsistencyChecker::new(CheckConfig::quiet());
/// let (data, geom_data) = checker.create_datas(&model, &geom_model)?;
/// assert!(model.check(&data));
/// assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms());
/// # Ok::<(), sim_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsistencyChecker {
    config: CheckConfig,
}

impl ConsistencyChecker {
    /// Checker with the given behaviour.
    #[must_use]
    pub const fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// `model` must be well formed on its own.
    #[must_use]
    pub fn check_model(&self, model: &Model) -> ConsistencyReport {
        let mut collector = Collector::new(self.config.fail_fast);
        collector.kinematic_model(model);
        self.finish(collector)
    }

    /// Every geometry `parent_joint` must be a joint of `model`.
    #[must_use]
    pub fn check_geometry_model(&self, model: &Model, geom_model: &GeometryModel) -> ConsistencyReport {
        let mut collector = Collector::new(self.config.fail_fast);
        collector.geometry_model(model, geom_model);
        self.finish(collector)
    }

    /// `geom_data` must be sized to `geom_model`.
    #[must_use]
    pub fn check_geometry_data(
        &self,
        geom_model: &GeometryModel,
        geom_data: &GeometryData,
    ) -> ConsistencyReport {
        let mut collector = Collector::new(self.config.fail_fast);
        collector.geometry_data(geom_model, geom_data);
        self.finish(collector)
    }

    /// Full check of a model pair and its data pair.
    #[must_use]
    pub fn check_datas(
        &self,
        model: &Model,
        data: &Data,
        geom_model: &GeometryModel,
        geom_data: &GeometryData,
    ) -> ConsistencyReport {
        let mut collector = Collector::new(self.config.fail_fast);
        collector.kinematic_model(model);
        collector.joint_data(model, data);
        collector.geometry_model(model, geom_model);
        collector.geometry_data(geom_model, geom_data);
        self.finish(collector)
    }

    /// Validate the model pair, then create one [`Data`] and one
    /// [`GeometryData`] for it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::StructuralMismatch`] if `model` is malformed
    /// or any `parent_joint` is out of range. No data is allocated in that
    /// case.
    pub fn create_datas(
        &self,
        model: &Model,
        geom_model: &GeometryModel,
    ) -> Result<(Data, GeometryData), GeometryError> {
        let mut collector = Collector::new(self.config.fail_fast);
        collector.kinematic_model(model);
        collector.geometry_model(model, geom_model);
        self.finish(collector).into_result()?;

        let data = model.make_data();
        let geom_data = geom_model.make_data();
        debug!(
            njoints = model.njoints(),
            ngeoms = geom_model.ngeoms(),
            "created kinematic and geometry data"
        );
        Ok((data, geom_data))
    }

    fn finish(&self, collector: Collector) -> ConsistencyReport {
        if self.config.log_mismatches {
            for mismatch in collector.report.mismatches() {
                warn!("Model/Data mismatch: {}", mismatch);
            }
        }
        collector.report
    }
}

/// Create a [`Data`] and a [`GeometryData`] for a validated model pair.
///
/// Shorthand for [`ConsistencyChecker::create_datas`] with the default
/// configuration (collect every mismatch, log each one).
///
/// # Errors
///
/// Returns [`GeometryError::StructuralMismatch`] if `model` is malformed or
/// a geometry object references a joint `model` does not have.
pub fn create_datas(
    model: &Model,
    geom_model: &GeometryModel,
) -> Result<(Data, GeometryData), GeometryError> {
    ConsistencyChecker::default().create_datas(model, geom_model)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{CollisionPair, GeomType, GeometryObject, JointType};
    use nalgebra::Vector3;
    use sim_types::SpatialTransform;

    fn one_joint_model() -> Model {
        let mut model = Model::new("pendulum");
        model
            .add_joint(
                0,
                JointType::Hinge,
                Vector3::y_axis(),
                SpatialTransform::identity(),
                "hinge",
            )
            .unwrap();
        model
    }

    fn geom(name: &str, parent_joint: JointIndex) -> GeometryObject {
        GeometryObject::new(
            name,
            parent_joint,
            GeomType::Sphere,
            Vector3::new(0.1, 0.0, 0.0),
            SpatialTransform::identity(),
        )
    }

    fn broken_pair() -> (Model, GeometryModel) {
        let model = one_joint_model();
        let mut geom_model = GeometryModel::new();
        geom_model.add_geometry_object(geom("ok", 1));
        geom_model.add_geometry_object(geom("bad", 5));
        geom_model.add_geometry_object(geom("worse", 9));
        (model, geom_model)
    }

    #[test]
    fn test_consistent_pair() {
        let model = one_joint_model();
        let mut geom_model = GeometryModel::new();
        geom_model.add_geometry_object(geom("world", 0));
        geom_model.add_geometry_object(geom("link", 1));

        let (data, geom_data) = create_datas(&model, &geom_model).unwrap();
        assert!(model.check(&data));
        assert!(geom_model.check(&geom_data));
        assert_eq!(geom_data.o_mg().len(), 2);

        let report = ConsistencyChecker::default().check_datas(&model, &data, &geom_model, &geom_data);
        assert!(report.is_consistent());
        assert_eq!(report.to_string(), "consistent");
    }

    #[test]
    fn test_collect_all_reports_every_reference() {
        let (model, geom_model) = broken_pair();
        let err = create_datas(&model, &geom_model).unwrap_err();
        let GeometryError::StructuralMismatch(report) = err else {
            panic!("expected structural mismatch, got {err:?}");
        };
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.mismatches()[0],
            Mismatch::UncheckedReference {
                geom_id: 1,
                name: "bad".to_string(),
                parent_joint: 5,
                njoints: 2,
            }
        );
        assert!(report.to_string().contains("'worse'"));
    }

    #[test]
    fn test_fail_fast_stops_at_first() {
        let (model, geom_model) = broken_pair();
        let checker = ConsistencyChecker::new(CheckConfig::fail_fast().with_logging(false));
        let report = checker.check_geometry_model(&model, &geom_model);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.mismatches()[0],
            Mismatch::UncheckedReference { geom_id: 1, .. }
        ));
    }

    #[test]
    fn test_geometry_data_counts() {
        let model = one_joint_model();
        let mut geom_model = GeometryModel::new();
        geom_model.add_geometry_object(geom("a", 0));
        geom_model.add_geometry_object(geom("b", 1));
        let geom_data = geom_model.make_data();

        geom_model.add_geometry_object(geom("c", 1));
        geom_model.add_collision_pair(CollisionPair::new(0, 2)).unwrap();

        let checker = ConsistencyChecker::new(CheckConfig::quiet());
        let report = checker.check_geometry_data(&geom_model, &geom_data);
        assert_eq!(
            report.mismatches(),
            &[
                Mismatch::PlacementCount {
                    expected: 3,
                    actual: 2
                },
                Mismatch::CollisionPairCount {
                    expected: 1,
                    actual: 0
                },
            ]
        );
        assert!(checker.check_geometry_model(&model, &geom_model).is_consistent());
    }

    #[test]
    fn test_joint_data_shape() {
        let model = one_joint_model();
        let data = Model::new("other").make_data();
        let geom_model = GeometryModel::new();
        let geom_data = geom_model.make_data();

        let report = ConsistencyChecker::new(CheckConfig::quiet())
            .check_datas(&model, &data, &geom_model, &geom_data);
        assert_eq!(
            report.mismatches(),
            &[Mismatch::JointDataShape {
                njoints: 2,
                data_njoints: 1,
                nq: 1,
                data_nq: 0,
            }]
        );
        assert!(report.clone().into_result().unwrap_err().is_structural_mismatch());
    }

    #[test]
    fn test_malformed_model_rejected() {
        let model = Model::sample_humanoid();
        let geom_model = GeometryModel::sample_humanoid(&model);

        // One parent too many: every other joint array is now short.
        let mut extra_parent = model.clone();
        extra_parent.joint_parent.push(0);
        let err = create_datas(&extra_parent, &geom_model).unwrap_err();
        let GeometryError::StructuralMismatch(report) = err else {
            panic!("expected structural mismatch, got {err:?}");
        };
        assert_eq!(report.len(), 6);
        assert_eq!(
            report.mismatches()[0],
            Mismatch::JointArrayLength {
                field: "joint_name",
                len: 28,
                njoints: 29,
            }
        );

        // A joint kind without an address must not reach allocation.
        let mut extra_type = model.clone();
        extra_type.joint_type.push(JointType::Ball);
        let report = ConsistencyChecker::new(CheckConfig::quiet()).check_model(&extra_type);
        assert_eq!(
            report.mismatches(),
            &[Mismatch::JointArrayLength {
                field: "joint_type",
                len: 29,
                njoints: 28,
            }]
        );
        assert!(create_datas(&extra_type, &geom_model).unwrap_err().is_structural_mismatch());
    }

    #[test]
    fn test_parent_order_rejected() {
        let mut model = one_joint_model();
        model.joint_parent[1] = 1;
        let checker = ConsistencyChecker::new(CheckConfig::quiet());
        assert_eq!(
            checker.check_model(&model).mismatches(),
            &[Mismatch::JointParentOrder {
                joint: 1,
                parent: 1
            }]
        );
        let err = checker.create_datas(&model, &GeometryModel::new()).unwrap_err();
        assert!(err.to_string().contains("does not precede"));
    }

    #[test]
    fn test_created_data_passes_model_check() {
        let model = Model::sample_humanoid();
        let geom_model = GeometryModel::sample_humanoid(&model);
        assert!(ConsistencyChecker::default().check_model(&model).is_consistent());
        let (data, geom_data) = create_datas(&model, &geom_model).unwrap();
        assert!(model.check(&data));
        assert!(geom_model.check(&geom_data));
    }

    #[test]
    fn test_empty_geometry_model() {
        let model = one_joint_model();
        let (_, geom_data) = create_datas(&model, &GeometryModel::new()).unwrap();
        assert_eq!(geom_data.ngeoms(), 0);
    }
}
