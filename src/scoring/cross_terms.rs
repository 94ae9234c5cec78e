use serde::Serialize;

use super::aggregator::PerDimension;
use super::params::ModelParameters;

/// Pairwise dimension interaction terms, on a 0-1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CrossTerms {
    #[serde(rename = "ES")]
    pub es: f64,
    #[serde(rename = "EG")]
    pub eg: f64,
    #[serde(rename = "SG")]
    pub sg: f64,
    #[serde(rename = "crossTermTotal")]
    pub total: f64,
}

/// Interaction terms from post-adjustment dimension scores (0-100).
/// All zero when cross-terms are disabled.
pub fn calculate_cross_terms(scores: &PerDimension<f64>, params: &ModelParameters) -> CrossTerms {
    if !params.use_cross_terms {
        return CrossTerms::default();
    }

    let e = scores.e / 100.0;
    let s = scores.s / 100.0;
    let g = scores.g / 100.0;

    let es = params.delta_coeff * e * s;
    let eg = params.epsilon_coeff * e * g;
    let sg = params.zeta_coeff * s * g;

    CrossTerms {
        es,
        eg,
        sg,
        total: es + eg + sg,
    }
}
