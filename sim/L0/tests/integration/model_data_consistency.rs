//! Model/Data creation and consistency checks through the public API.

use crate::test_utils::humanoid_pair;
use sim_core::{
    CheckConfig, CollisionPair, ConsistencyChecker, GeomType, GeometryError, GeometryModel,
    GeometryObject, Mismatch, Model, SpatialTransform, create_datas,
};

fn sphere(name: &str, parent_joint: usize) -> GeometryObject {
    GeometryObject::new(
        name,
        parent_joint,
        GeomType::Sphere,
        nalgebra::Vector3::new(0.05, 0.0, 0.0),
        SpatialTransform::identity(),
    )
}

#[test]
fn create_datas_on_humanoid() {
    let (model, geom_model) = humanoid_pair();
    let (data, geom_data) = create_datas(&model, &geom_model).unwrap();

    assert!(model.check(&data));
    assert!(geom_model.check(&geom_data));
    assert_eq!(data.o_mi.len(), model.njoints());
    assert_eq!(data.q.len(), model.nq());
    assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms());
    assert!(
        geom_data
            .o_mg()
            .iter()
            .all(|m| *m == SpatialTransform::identity())
    );
}

#[test]
fn create_data_is_independent_per_call() {
    let (_, geom_model) = humanoid_pair();
    let mut a = geom_model.make_data();
    let b = geom_model.make_data();
    a.o_mg_mut()[0] = SpatialTransform::from_translation(nalgebra::Vector3::new(1.0, 0.0, 0.0));
    assert_ne!(a, b);
    assert_eq!(b.o_mg()[0], SpatialTransform::identity());
}

#[test]
fn empty_geometry_model_yields_empty_placements() {
    let model = Model::sample_humanoid();
    let geom_model = GeometryModel::new();
    let (data, geom_data) = create_datas(&model, &geom_model).unwrap();
    assert!(model.check(&data));
    assert!(geom_data.o_mg().is_empty());
}

#[test]
fn out_of_range_parent_joint_is_only_caught_at_the_boundary() {
    let (model, mut geom_model) = humanoid_pair();
    let njoints = model.njoints();

    // Accepted by the geometry model itself.
    geom_model.geometry_object_mut(0).unwrap().parent_joint = njoints;
    geom_model.add_geometry_object(sphere("floating", njoints + 5));
    let data = geom_model.make_data();
    assert_eq!(data.o_mg().len(), geom_model.ngeoms());

    let err = create_datas(&model, &geom_model).unwrap_err();
    let GeometryError::StructuralMismatch(report) = err else {
        panic!("expected structural mismatch, got {err:?}");
    };
    let offenders: Vec<usize> = report
        .mismatches()
        .iter()
        .filter_map(|m| match m {
            Mismatch::UncheckedReference { geom_id, .. } => Some(*geom_id),
            _ => None,
        })
        .collect();
    assert_eq!(offenders, vec![0, geom_model.ngeoms() - 1]);
}

#[test]
fn fail_fast_reports_first_offender_only() {
    let (model, mut geom_model) = humanoid_pair();
    for i in [3, 7] {
        geom_model.geometry_object_mut(i).unwrap().parent_joint = 1000;
    }

    let checker = ConsistencyChecker::new(CheckConfig::fail_fast().with_logging(false));
    let report = checker.check_geometry_model(&model, &geom_model);
    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.mismatches()[0],
        Mismatch::UncheckedReference { geom_id: 3, .. }
    ));

    let collect_all = ConsistencyChecker::new(CheckConfig::quiet());
    assert_eq!(collect_all.check_geometry_model(&model, &geom_model).len(), 2);
}

#[test]
fn checked_add_rejects_missing_joint() {
    let (model, mut geom_model) = humanoid_pair();
    let ngeoms = geom_model.ngeoms();

    let id = geom_model
        .add_geometry_object_checked(sphere("hand", model.njoints() - 1), &model)
        .unwrap();
    assert_eq!(id, ngeoms);

    let err = geom_model
        .add_geometry_object_checked(sphere("ghost", model.njoints()), &model)
        .unwrap_err();
    assert!(matches!(err, GeometryError::UncheckedReference { .. }));
    assert_eq!(geom_model.ngeoms(), ngeoms + 1);
}

#[test]
fn stale_data_is_detected_not_prevented() {
    let (model, mut geom_model) = humanoid_pair();
    let (data, geom_data) = create_datas(&model, &geom_model).unwrap();

    geom_model.add_geometry_object(sphere("late", 1));
    assert!(!geom_model.check(&geom_data));
    assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms() - 1);

    let report = ConsistencyChecker::new(CheckConfig::quiet())
        .check_datas(&model, &data, &geom_model, &geom_data);
    assert_eq!(
        report.mismatches(),
        &[Mismatch::PlacementCount {
            expected: geom_model.ngeoms(),
            actual: geom_model.ngeoms() - 1,
        }]
    );
}

#[test]
fn collision_pairs_follow_object_removal() {
    let (model, mut geom_model) = humanoid_pair();
    geom_model.add_all_collision_pairs();
    let npairs = geom_model.ncollision_pairs();
    assert!(npairs > 0);
    assert!(
        geom_model
            .collision_pairs()
            .iter()
            .all(|p| geom_model[p.first()].parent_joint != geom_model[p.second()].parent_joint)
    );

    let removed_id = geom_model.geometry_id("head_object").unwrap();
    let involving = geom_model
        .collision_pairs()
        .iter()
        .filter(|p| p.contains(removed_id))
        .count();
    geom_model.remove_geometry_object("head_object").unwrap();
    assert_eq!(geom_model.ncollision_pairs(), npairs - involving);
    assert!(
        geom_model
            .collision_pairs()
            .iter()
            .all(|p| p.second() < geom_model.ngeoms())
    );

    let (_, mut geom_data) = create_datas(&model, &geom_model).unwrap();
    assert_eq!(geom_data.active_collision_pairs().len(), geom_model.ncollision_pairs());
    geom_data.set_geometry_collision_status(&geom_model, 0, false).unwrap();
    let pair = geom_model.find_collision_pair(&CollisionPair::new(0, 6)).unwrap();
    assert!(!geom_data.active_collision_pairs()[pair]);
}

#[test]
fn create_datas_rejects_malformed_kinematic_model() {
    let (model, geom_model) = humanoid_pair();

    let mut extra_parent = model.clone();
    extra_parent.joint_parent.push(0);
    let err = create_datas(&extra_parent, &geom_model).unwrap_err();
    assert!(err.is_structural_mismatch());

    // A joint kind with no configuration address: rejected, not a panic.
    let mut extra_type = model;
    extra_type.joint_type.push(sim_core::JointType::Ball);
    let result = std::panic::catch_unwind(|| create_datas(&extra_type, &geom_model));
    let err = result.expect("create_datas must not panic").unwrap_err();
    let GeometryError::StructuralMismatch(report) = err else {
        panic!("expected structural mismatch, got {err:?}");
    };
    assert!(matches!(
        report.mismatches(),
        [Mismatch::JointArrayLength {
            field: "joint_type",
            ..
        }]
    ));
}
