//! Shared fixtures: the humanoid model pair and seeded randomness.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sim_core::{GeometryModel, Model};

/// Seed used by every randomized integration test.
pub const TEST_SEED: u64 = 0x5EED_0F9E;

/// The sample humanoid and its geometry.
pub fn humanoid_pair() -> (Model, GeometryModel) {
    let model = Model::sample_humanoid();
    let geom_model = GeometryModel::sample_humanoid(&model);
    (model, geom_model)
}

/// Deterministic RNG for reproducible random transforms.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}
