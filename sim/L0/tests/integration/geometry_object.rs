//! Geometry object access on the sample humanoid.
//!
//! Reads and rewrites the fields of object 0 (`rlegshoulder_object`) through
//! the geometry model, then creates data from the mutated model.

use approx::assert_relative_eq;
use crate::test_utils::{humanoid_pair, seeded_rng};
use sim_core::{GeometryObject, SpatialTransform, ToleranceConfig, create_datas};

#[test]
fn humanoid_geometry_object_round_trip() {
    let (model, mut geom_model) = humanoid_pair();

    let obj = geom_model.geometry_object(0).unwrap();
    assert_eq!(obj.name, "rlegshoulder_object");
    assert_eq!(obj.parent_joint, 2);
    assert_eq!(obj.placement, SpatialTransform::identity());
    assert_eq!(obj.mesh_path, "");

    geom_model.geometry_object_mut(0).unwrap().name = "new_collision_name".to_string();
    assert_eq!(geom_model[0].name, "new_collision_name");

    geom_model.geometry_object_mut(0).unwrap().parent_joint = 3;
    assert_eq!(geom_model[0].parent_joint, 3);

    let new_m = SpatialTransform::random_with(&mut seeded_rng());
    geom_model.geometry_object_mut(0).unwrap().placement = new_m;
    let read_back = geom_model[0].placement.homogeneous();
    let expected = new_m.homogeneous();
    for (a, b) in read_back.iter().zip(expected.iter()) {
        assert!(ToleranceConfig::default().is_close(*a, *b), "{a} vs {b}");
    }

    let geom_data = geom_model.make_data();
    assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms());

    let (data, geom_data) = create_datas(&model, &geom_model).unwrap();
    assert!(model.check(&data));
    assert_eq!(geom_data.o_mg().len(), geom_model.ngeoms());
}

#[test]
fn mutating_one_object_leaves_others_untouched() {
    let (_, mut geom_model) = humanoid_pair();
    let before = geom_model.clone();

    let obj = geom_model.geometry_object_mut(4).unwrap();
    obj.placement = SpatialTransform::random_with(&mut seeded_rng());
    obj.name = "moved".to_string();

    for (i, (a, b)) in geom_model.iter().zip(before.iter()).enumerate() {
        if i == 4 {
            assert_eq!(a.parent_joint, b.parent_joint);
            assert_eq!(a.mesh_path, b.mesh_path);
        } else {
            assert_eq!(a, b, "object {i} changed");
        }
    }
    assert_eq!(geom_model.get_geometry_id("moved"), Some(4));
}

#[test]
fn replacing_an_object_keeps_cardinality() {
    let (_, mut geom_model) = humanoid_pair();
    let ngeoms = geom_model.ngeoms();
    let replacement = GeometryObject::with_mesh(
        "rlegshoulder_mesh",
        2,
        SpatialTransform::identity(),
        "meshes/shoulder.stl",
        nalgebra::Vector3::repeat(0.001),
    );

    geom_model.set_geometry_object(0, replacement).unwrap();
    assert_eq!(geom_model.ngeoms(), ngeoms);
    assert!(geom_model[0].has_mesh());
    assert_relative_eq!(geom_model[0].mesh_scale.x, 0.001);

    assert!(geom_model.geometry_object(ngeoms).unwrap_err().is_out_of_range());
}

#[test]
fn identity_is_neutral_for_composition() {
    let mut rng = seeded_rng();
    for _ in 0..16 {
        let t = SpatialTransform::random_with(&mut rng);
        let id = SpatialTransform::identity();
        let tol = ToleranceConfig::default();
        assert!((id * t).is_approx(&t, &tol));
        assert!((t * id).is_approx(&t, &tol));
    }
    assert_eq!(
        SpatialTransform::identity().homogeneous(),
        nalgebra::Matrix4::identity()
    );
}
