use serde::{Deserialize, Serialize};

use crate::catalog::Industry;

/// Model parameters read by every scoring call.
///
/// Example YAML:
/// ```yaml
/// alpha: 0.5
/// e_weight: 0.4
/// s_weight: 0.3
/// g_weight: 0.3
/// delta_coeff: 0.1
/// epsilon_coeff: 0.15
/// zeta_coeff: 0.12
/// severity_factor: 0.4
/// max_bonus: 10
/// bonus_steepness: 0.7
/// threshold_multiplier: 1.0
/// use_cross_terms: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelParameters {
    /// Blend between the linear baseline and the cross-term adjusted score (0-1)
    pub alpha: f64,

    pub e_weight: f64,
    pub s_weight: f64,
    pub g_weight: f64,

    /// E x S interaction coefficient
    pub delta_coeff: f64,
    /// E x G interaction coefficient
    pub epsilon_coeff: f64,
    /// S x G interaction coefficient
    pub zeta_coeff: f64,

    /// Scales event severity into a raw score delta
    pub severity_factor: f64,
    /// Upper bound on the magnitude of a dimension's event adjustment
    pub max_bonus: f64,
    /// Sharpness of the saturation curve
    pub bonus_steepness: f64,
    /// Scales every reference band during normalization
    pub threshold_multiplier: f64,

    pub use_cross_terms: bool,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            e_weight: 0.33,
            s_weight: 0.33,
            g_weight: 0.34,
            delta_coeff: 0.1,
            epsilon_coeff: 0.15,
            zeta_coeff: 0.12,
            severity_factor: 0.4,
            max_bonus: 10.0,
            bonus_steepness: 0.7,
            threshold_multiplier: 1.0,
            use_cross_terms: true,
        }
    }
}

impl ModelParameters {
    /// Copy of `self` with every field present in `update` overwritten.
    /// The result is not validated here.
    pub fn merged(&self, update: &ParameterUpdate) -> ModelParameters {
        ModelParameters {
            alpha: update.alpha.unwrap_or(self.alpha),
            e_weight: update.e_weight.unwrap_or(self.e_weight),
            s_weight: update.s_weight.unwrap_or(self.s_weight),
            g_weight: update.g_weight.unwrap_or(self.g_weight),
            delta_coeff: update.delta_coeff.unwrap_or(self.delta_coeff),
            epsilon_coeff: update.epsilon_coeff.unwrap_or(self.epsilon_coeff),
            zeta_coeff: update.zeta_coeff.unwrap_or(self.zeta_coeff),
            severity_factor: update.severity_factor.unwrap_or(self.severity_factor),
            max_bonus: update.max_bonus.unwrap_or(self.max_bonus),
            bonus_steepness: update.bonus_steepness.unwrap_or(self.bonus_steepness),
            threshold_multiplier: update
                .threshold_multiplier
                .unwrap_or(self.threshold_multiplier),
            use_cross_terms: update.use_cross_terms.unwrap_or(self.use_cross_terms),
        }
    }

    pub fn weight_sum(&self) -> f64 {
        self.e_weight + self.s_weight + self.g_weight
    }
}

/// Partial parameter update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coeff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon_coeff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zeta_coeff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_steepness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cross_terms: Option<bool>,
}

impl ParameterUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ParameterUpdate::default()
    }

    /// Update setting only the dimension weights, from the industry profile.
    pub fn industry_weights(industry: Industry) -> Self {
        let (e, s, g) = industry.dimension_weights();
        Self {
            e_weight: Some(e),
            s_weight: Some(s),
            g_weight: Some(g),
            ..Default::default()
        }
    }
}

impl From<&ModelParameters> for ParameterUpdate {
    fn from(params: &ModelParameters) -> Self {
        Self {
            alpha: Some(params.alpha),
            e_weight: Some(params.e_weight),
            s_weight: Some(params.s_weight),
            g_weight: Some(params.g_weight),
            delta_coeff: Some(params.delta_coeff),
            epsilon_coeff: Some(params.epsilon_coeff),
            zeta_coeff: Some(params.zeta_coeff),
            severity_factor: Some(params.severity_factor),
            max_bonus: Some(params.max_bonus),
            bonus_steepness: Some(params.bonus_steepness),
            threshold_multiplier: Some(params.threshold_multiplier),
            use_cross_terms: Some(params.use_cross_terms),
        }
    }
}
