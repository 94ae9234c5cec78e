use serde::{Deserialize, Serialize};

use crate::catalog::{default_catalog, IndicatorCatalog, IndicatorDefinition};
use crate::scoring::{validate_parameters, ModelParameters, ParameterUpdate};

/// Contents of `config.yaml`.
///
/// Example YAML:
/// ```yaml
/// log_level: info
/// parameters:
///   e_weight: 0.4
///   s_weight: 0.3
///   g_weight: 0.3
///   use_cross_terms: false
/// indicators:
///   - key: renewable_energy_share
///     display_name: Renewable energy share (%)
///     dimension: E
///     direction: higher-better
///     default_band: { min: 0, max: 80 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log filter used when RUST_LOG is unset (e.g. "info", "esg_score=debug")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Overrides merged onto the built-in parameter defaults
    #[serde(default, skip_serializing_if = "ParameterUpdate::is_empty")]
    pub parameters: ParameterUpdate,

    /// Catalog entries; an existing key is replaced whole, a new key is added
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<IndicatorDefinition>,
}

impl Config {
    /// Effective parameters: defaults merged with `parameters`, validated.
    /// Returns all validation errors at once.
    pub fn model_parameters(&self) -> Result<ModelParameters, Vec<String>> {
        let params = ModelParameters::default().merged(&self.parameters);
        validate_parameters(&params)
            .map(|_| params)
            .map_err(|errors| errors.into_iter().map(|e| format!("parameters.{}", e)).collect())
    }

    /// Built-in catalog with the configured entries applied in order.
    pub fn catalog(&self) -> Result<IndicatorCatalog, Vec<String>> {
        let mut errors = Vec::new();
        let mut catalog = default_catalog();
        for (i, definition) in self.indicators.iter().enumerate() {
            match catalog.with_replaced(definition.clone()) {
                Ok(updated) => catalog = updated,
                Err(errs) => errors.extend(errs.into_iter().map(|e| format!("indicators[{}]: {}", i, e))),
            }
        }
        if errors.is_empty() {
            Ok(catalog)
        } else {
            Err(errors)
        }
    }
}
