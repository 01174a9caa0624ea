//! Geometry placement update on the sample humanoid.

use approx::assert_relative_eq;
use crate::test_utils::{humanoid_pair, seeded_rng};
use sim_core::{GeometryError, SpatialTransform, ToleranceConfig, create_datas, update_geometry_placements};

#[test]
fn placements_compose_joint_and_reference_poses() {
    let (model, geom_model) = humanoid_pair();
    let (mut data, mut geom_data) = create_datas(&model, &geom_model).unwrap();

    let mut rng = seeded_rng();
    for o_mi in &mut data.o_mi {
        *o_mi = SpatialTransform::random_with(&mut rng);
    }
    update_geometry_placements(&model, &data, &geom_model, &mut geom_data).unwrap();

    let tol = ToleranceConfig::strict();
    for (i, obj) in geom_model.iter().enumerate() {
        let expected = data.o_mi[obj.parent_joint] * obj.placement;
        assert!(geom_data.o_mg()[i].is_approx(&expected, &tol), "object {i}");
    }
}

#[test]
fn neutral_pose_places_right_leg_shoulder() {
    let (model, geom_model) = humanoid_pair();
    let (mut data, mut geom_data) = create_datas(&model, &geom_model).unwrap();
    data.propagate_placements(&model);
    update_geometry_placements(&model, &data, &geom_model, &mut geom_data).unwrap();

    // root at origin, rleg_shoulder1_joint offset (0, -0.2, -0.1).
    let shoulder = geom_data.o_mg()[0];
    assert_relative_eq!(shoulder.translation, nalgebra::Vector3::new(0.0, -0.2, -0.1));

    // Upper segment hangs halfway to the elbow.
    let upper = geom_model.geometry_id("rlegupperarm_object").unwrap();
    assert_relative_eq!(
        geom_data.o_mg()[upper].translation,
        nalgebra::Vector3::new(0.0, -0.2, -0.35),
        epsilon = 1e-12
    );
}

#[test]
fn failed_update_leaves_data_untouched() {
    let (model, mut geom_model) = humanoid_pair();
    let (data, mut geom_data) = create_datas(&model, &geom_model).unwrap();
    let marker = SpatialTransform::random_with(&mut seeded_rng());
    geom_data.o_mg_mut().fill(marker);

    let last = geom_model.ngeoms() - 1;
    geom_model.geometry_object_mut(last).unwrap().parent_joint = model.njoints();
    let err = update_geometry_placements(&model, &data, &geom_model, &mut geom_data).unwrap_err();
    assert!(matches!(err, GeometryError::UncheckedReference { geom_id, .. } if geom_id == last));
    assert!(geom_data.o_mg().iter().all(|m| *m == marker));
}
