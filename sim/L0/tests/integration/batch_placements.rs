//! Integration tests for batched placement updates (`GeometryBatch`).
//!
//! Each context gets its own random joint placements; the batched update must
//! match a per-context sequential update exactly.

use crate::test_utils::{humanoid_pair, seeded_rng};
use sim_core::batch::GeometryBatch;
use sim_core::{SpatialTransform, update_geometry_placements};
use std::sync::Arc;

#[test]
fn batched_update_matches_sequential() {
    let (model, geom_model) = humanoid_pair();
    let (model, geom_model) = (Arc::new(model), Arc::new(geom_model));
    let mut batch = GeometryBatch::new(Arc::clone(&model), Arc::clone(&geom_model), 32).unwrap();

    let mut rng = seeded_rng();
    for env in batch.envs_mut() {
        for o_mi in &mut env.data.o_mi {
            *o_mi = SpatialTransform::random_with(&mut rng);
        }
    }

    let mut expected = Vec::with_capacity(batch.len());
    for env in batch.envs() {
        let mut geom_data = geom_model.make_data();
        update_geometry_placements(&model, &env.data, &geom_model, &mut geom_data).unwrap();
        expected.push(geom_data);
    }

    let errors = batch.update_all_placements();
    assert!(errors.iter().all(Option::is_none));
    for (env, expected) in batch.envs().zip(&expected) {
        assert_eq!(env.geom_data.o_mg(), expected.o_mg());
    }
}

#[test]
fn empty_batch() {
    let (model, geom_model) = humanoid_pair();
    let mut batch = GeometryBatch::new(Arc::new(model), Arc::new(geom_model), 0).unwrap();
    assert!(batch.is_empty());
    assert!(batch.update_all_placements().is_empty());
}
