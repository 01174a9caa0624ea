//! Batched geometry data: N independent contexts sharing one model pair.
//!
//! All contexts use the same [`Model`] and [`GeometryModel`], but own their
//! state (a separate [`Data`] and [`GeometryData`] each). Placement updates
//! are parallelized across CPU cores via rayon when the `parallel` feature is
//! enabled; sequential fallback when disabled.
//!
//! # Examples
//!
//! ```
//! use sim_core::batch::GeometryBatch;
//! use sim_core::{GeometryModel, Model};
//! use sim_types::{SpatialTransform, Vector3};
//! use std::sync::Arc;
//!
//! let model = Arc::new(Model::sample_humanoid());
//! let geom_model = Arc::new(GeometryModel::sample_humanoid(&model));
//! let mut batch = GeometryBatch::new(model, geom_model, 16)?;
//!
//! // Joint placements are written per context (e.g. by forward kinematics).
//! for (i, env) in batch.envs_mut().enumerate() {
//!     let x = i as f64;
//!     env.data.o_mi[1] = SpatialTransform::from_translation(Vector3::new(x, 0.0, 0.0));
//! }
//!
//! let errors = batch.update_all_placements();
//! assert!(errors.iter().all(Option::is_none));
//! # Ok::<(), sim_core::GeometryError>(())
//! ```

use std::sync::Arc;

use crate::consistency::create_datas;
use crate::forward::update_geometry_placements;
use crate::types::{Data, GeometryData, GeometryError, GeometryModel, Model};

/// State of one context in a [`GeometryBatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryEnv {
    /// Kinematic data; `o_mi` is the input of the placement update.
    pub data: Data,
    /// Geometry data; `o_mg` is the output of the placement update.
    pub geom_data: GeometryData,
}

/// Batched geometry contexts sharing one validated model pair.
///
/// # Single Model Constraint
///
/// All contexts share the same [`Arc<Model>`] and [`Arc<GeometryModel>`].
/// The models are read-only for the lifetime of the batch, so contexts can
/// never go stale relative to them.
#[derive(Debug)]
pub struct GeometryBatch {
    model: Arc<Model>,
    geom_model: Arc<GeometryModel>,
    envs: Vec<GeometryEnv>,
}

impl GeometryBatch {
    /// Validate the model pair and create `n` contexts.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::StructuralMismatch`] if `model` is malformed
    /// or a geometry object references a joint `model` does not have.
    pub fn new(
        model: Arc<Model>,
        geom_model: Arc<GeometryModel>,
        n: usize,
    ) -> Result<Self, GeometryError> {
        let (data, geom_data) = create_datas(&model, &geom_model)?;
        let envs = vec![GeometryEnv { data, geom_data }; n];
        Ok(Self {
            model,
            geom_model,
            envs,
        })
    }

    /// Number of contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// Shared kinematic model.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Shared geometry model.
    #[must_use]
    pub fn geom_model(&self) -> &GeometryModel {
        &self.geom_model
    }

    // ==================== Environment Access ====================

    /// Context `i`, or `None` if `i >= len()`.
    #[must_use]
    pub fn env(&self, i: usize) -> Option<&GeometryEnv> {
        self.envs.get(i)
    }

    /// Mutable context `i`, or `None` if `i >= len()`.
    pub fn env_mut(&mut self, i: usize) -> Option<&mut GeometryEnv> {
        self.envs.get_mut(i)
    }

    /// Iterator over all contexts.
    pub fn envs(&self) -> impl ExactSizeIterator<Item = &GeometryEnv> {
        self.envs.iter()
    }

    /// Mutable iterator over all contexts.
    pub fn envs_mut(&mut self) -> impl ExactSizeIterator<Item = &mut GeometryEnv> {
        self.envs.iter_mut()
    }

    // ==================== Placement update ====================

    /// Run [`update_geometry_placements`] on every context.
    ///
    /// Returns per-context errors: `None` = success. A context fails only if
    /// its public `Data` fields were resized since creation.
    ///
    /// Output is independent of thread count and scheduling order; each
    /// context reads only its own data and the shared models.
    pub fn update_all_placements(&mut self) -> Vec<Option<GeometryError>> {
        let model = &*self.model;
        let geom_model = &*self.geom_model;
        let update = |env: &mut GeometryEnv| {
            update_geometry_placements(model, &env.data, geom_model, &mut env.geom_data).err()
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};
            self.envs.par_iter_mut().map(update).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.envs.iter_mut().map(update).collect()
        }
    }

    // ==================== Reset ====================

    /// Replace context `i` with freshly created data.
    ///
    /// Returns `None` if `i >= len()`.
    pub fn reset(&mut self, i: usize) -> Option<()> {
        let env = self.envs.get_mut(i)?;
        *env = fresh_env(&self.model, &self.geom_model);
        Some(())
    }

    /// Reset every context where `mask[i]` is true.
    ///
    /// Missing mask entries count as false; excess entries are ignored.
    pub fn reset_where(&mut self, mask: &[bool]) {
        let (model, geom_model) = (&self.model, &self.geom_model);
        for (env, _) in self
            .envs
            .iter_mut()
            .zip(mask.iter())
            .filter(|(_, reset)| **reset)
        {
            *env = fresh_env(model, geom_model);
        }
    }

    /// Reset every context.
    pub fn reset_all(&mut self) {
        let (model, geom_model) = (&self.model, &self.geom_model);
        for env in &mut self.envs {
            *env = fresh_env(model, geom_model);
        }
    }
}

/// Allocate a context for a pair already validated by [`GeometryBatch::new`].
fn fresh_env(model: &Model, geom_model: &GeometryModel) -> GeometryEnv {
    GeometryEnv {
        data: model.make_data(),
        geom_data: geom_model.make_data(),
    }
}
