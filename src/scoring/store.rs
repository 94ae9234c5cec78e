use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use super::params::{ModelParameters, ParameterUpdate};
use super::validation::{validate_parameters, ValidationReport};
use crate::error::{EngineError, Result};

/// Shared holder of the current, validated model parameters.
///
/// Readers take an `Arc` snapshot and never see a partially merged set:
/// updates build and validate a fresh `ModelParameters` before swapping the
/// pointer under the write lock.
#[derive(Debug)]
pub struct ParameterStore {
    current: RwLock<Arc<ModelParameters>>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(ModelParameters::default())),
        }
    }
}

impl ParameterStore {
    /// Create a store holding `initial`, which must pass validation.
    pub fn new(initial: ModelParameters) -> Result<Self> {
        validate_parameters(&initial).map_err(EngineError::validation)?;
        Ok(Self {
            current: RwLock::new(Arc::new(initial)),
        })
    }

    /// Immutable snapshot of the current parameters.
    pub fn snapshot(&self) -> Arc<ModelParameters> {
        Arc::clone(&self.current.read())
    }

    pub fn get(&self) -> ModelParameters {
        (*self.snapshot()).clone()
    }

    pub fn validate(&self, candidate: &ModelParameters) -> ValidationReport {
        ValidationReport::from(validate_parameters(candidate))
    }

    /// Merge `update` into the current parameters. The merged set is stored
    /// only if it validates; otherwise the store is left untouched and every
    /// violation is returned.
    pub fn update(&self, update: &ParameterUpdate) -> Result<Arc<ModelParameters>> {
        self.update_with(update, |_| Ok(())).map(|(params, ())| params)
    }

    /// Merge and validate `update`, run `f` against the merged set, and store
    /// it only if `f` succeeds. The write lock is held throughout, so no other
    /// update can land between validation and commit.
    pub fn update_with<T>(
        &self,
        update: &ParameterUpdate,
        f: impl FnOnce(&ModelParameters) -> Result<T>,
    ) -> Result<(Arc<ModelParameters>, T)> {
        let mut guard = self.current.write();
        let merged = guard.merged(update);

        if let Err(errors) = validate_parameters(&merged) {
            warn!(errors = ?errors, "rejected parameter update");
            return Err(EngineError::validation(errors));
        }

        let output = f(&merged)?;

        let next = Arc::new(merged);
        *guard = Arc::clone(&next);
        info!(
            alpha = next.alpha,
            e_weight = next.e_weight,
            s_weight = next.s_weight,
            g_weight = next.g_weight,
            use_cross_terms = next.use_cross_terms,
            "model parameters updated"
        );
        Ok((next, output))
    }
}
