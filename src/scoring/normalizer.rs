use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::catalog::{BandSource, Dimension, IndicatorCatalog, Industry, ReferenceBand};
use crate::error::{EngineError, Result};

/// Already-typed indicator measurement supplied by the data-processing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessedIndicatorValue {
    #[serde(alias = "indicatorKey")]
    pub indicator_key: String,
    #[serde(alias = "rawValue")]
    pub raw_value: f64,
    /// Industry the measurement was collected for; must agree with the request.
    #[serde(default, alias = "companyIndustry", skip_serializing_if = "Option::is_none")]
    pub company_industry: Option<String>,
}

impl ProcessedIndicatorValue {
    pub fn new(indicator_key: impl Into<String>, raw_value: f64) -> Self {
        Self {
            indicator_key: indicator_key.into(),
            raw_value,
            company_industry: None,
        }
    }
}

/// Industry label as supplied, plus its resolution against [`Industry`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryContext {
    pub label: String,
    pub resolved: Option<Industry>,
}

impl IndustryContext {
    pub fn resolve(label: &str) -> Self {
        Self {
            label: label.trim().to_string(),
            resolved: Industry::parse(label),
        }
    }

    fn matches(&self, other: &str) -> bool {
        match (self.resolved, Industry::parse(other)) {
            (Some(a), Some(b)) => a == b,
            _ => self.label.to_lowercase() == other.trim().to_lowercase(),
        }
    }
}

/// Indicator mapped onto [0, 100] against its (scaled) reference band.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIndicator {
    pub key: String,
    pub display_name: String,
    pub dimension: Dimension,
    pub raw_value: f64,
    pub band: ReferenceBand,
    pub band_source: BandSource,
    pub score: f64,
    pub explicit_weight: Option<f64>,
}

/// Normalize each processed value, preserving input order.
///
/// Fails with a data error for empty, duplicate, unknown or non-finite input
/// and with a configuration error when an indicator has no usable band.
pub fn normalize_indicators(
    values: &[ProcessedIndicatorValue],
    industry: &IndustryContext,
    catalog: &IndicatorCatalog,
    threshold_multiplier: f64,
) -> Result<Vec<NormalizedIndicator>> {
    if values.is_empty() {
        return Err(EngineError::Data(
            "no processed indicator values supplied".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(values.len());

    for value in values {
        let key = value.indicator_key.as_str();
        if !seen.insert(key) {
            return Err(EngineError::Data(format!("duplicate indicator '{}'", key)));
        }
        if !value.raw_value.is_finite() {
            return Err(EngineError::Data(format!(
                "indicator '{}': raw value must be finite, got {}",
                key, value.raw_value
            )));
        }
        if let Some(ref company_industry) = value.company_industry {
            if !industry.matches(company_industry) {
                return Err(EngineError::Data(format!(
                    "indicator '{}': collected for industry '{}' but scoring '{}'",
                    key, company_industry, industry.label
                )));
            }
        }

        let def = catalog
            .get(key)
            .ok_or_else(|| EngineError::Data(format!("unknown indicator '{}'", key)))?;

        let (band, band_source) = def.band_for(industry.resolved).ok_or_else(|| {
            EngineError::Configuration(format!(
                "indicator '{}' has no reference band for industry '{}' and no default band",
                key, industry.label
            ))
        })?;

        let band = band.scaled(threshold_multiplier);
        if !band.is_finite() {
            return Err(EngineError::Configuration(format!(
                "indicator '{}': reference band [{}, {}] overflows when scaled by {}",
                key, band.min, band.max, threshold_multiplier
            )));
        }
        let score = band.normalize(value.raw_value, def.direction);

        if band_source == BandSource::DefaultFallback {
            debug!(indicator = key, industry = %industry.label, "using default reference band");
        }

        normalized.push(NormalizedIndicator {
            key: def.key.clone(),
            display_name: def.display_name.clone(),
            dimension: def.dimension,
            raw_value: value.raw_value,
            band,
            band_source,
            score,
            explicit_weight: def.weight,
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Direction, IndicatorDefinition};
    use std::collections::BTreeMap;

    fn catalog() -> IndicatorCatalog {
        let mut emissions_bands = BTreeMap::new();
        emissions_bands.insert(Industry::Energy, ReferenceBand::new(100.0, 1100.0));
        IndicatorCatalog::new(vec![
            IndicatorDefinition {
                key: "emissions".to_string(),
                display_name: "Emissions".to_string(),
                dimension: Dimension::Environmental,
                direction: Direction::LowerBetter,
                weight: None,
                default_band: Some(ReferenceBand::new(0.0, 200.0)),
                bands: emissions_bands,
            },
            IndicatorDefinition {
                key: "training".to_string(),
                display_name: "Training".to_string(),
                dimension: Dimension::Social,
                direction: Direction::HigherBetter,
                weight: Some(2.0),
                default_band: Some(ReferenceBand::new(0.0, 100.0)),
                bands: BTreeMap::new(),
            },
            IndicatorDefinition {
                key: "bespoke".to_string(),
                display_name: "Bespoke".to_string(),
                dimension: Dimension::Governance,
                direction: Direction::HigherBetter,
                weight: None,
                default_band: None,
                bands: BTreeMap::from([(Industry::Finance, ReferenceBand::new(0.0, 10.0))]),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_industry_band_used_when_available() {
        let out = normalize_indicators(
            &[ProcessedIndicatorValue::new("emissions", 600.0)],
            &IndustryContext::resolve("energy"),
            &catalog(),
            1.0,
        )
        .unwrap();
        assert_eq!(out[0].band_source, BandSource::Industry);
        assert!((out[0].score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_industry_falls_back_to_default_band() {
        let out = normalize_indicators(
            &[ProcessedIndicatorValue::new("emissions", 50.0)],
            &IndustryContext::resolve("asteroid mining"),
            &catalog(),
            1.0,
        )
        .unwrap();
        assert_eq!(out[0].band_source, BandSource::DefaultFallback);
        assert!((out[0].score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_multiplier_scales_band() {
        let out = normalize_indicators(
            &[ProcessedIndicatorValue::new("training", 50.0)],
            &IndustryContext::resolve("technology"),
            &catalog(),
            2.0,
        )
        .unwrap();
        assert_eq!(out[0].band, ReferenceBand::new(0.0, 200.0));
        assert!((out[0].score - 25.0).abs() < 1e-9);
        assert_eq!(out[0].explicit_weight, Some(2.0));
    }

    #[test]
    fn test_overflowing_scaled_band_is_configuration_error() {
        let wide = IndicatorCatalog::new(vec![IndicatorDefinition {
            key: "wide".to_string(),
            display_name: "Wide".to_string(),
            dimension: Dimension::Environmental,
            direction: Direction::HigherBetter,
            weight: None,
            default_band: Some(ReferenceBand::new(-1e308, 1e307)),
            bands: BTreeMap::new(),
        }])
        .unwrap();
        let ctx = IndustryContext::resolve("energy");
        let values = [ProcessedIndicatorValue::new("wide", f64::MAX)];

        assert!(normalize_indicators(&values, &ctx, &wide, 1.0).is_ok());
        let err = normalize_indicators(&values, &ctx, &wide, 2.0).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_extreme_values_clamp() {
        let out = normalize_indicators(
            &[
                ProcessedIndicatorValue::new("emissions", -1e300),
                ProcessedIndicatorValue::new("training", 1e300),
            ],
            &IndustryContext::resolve("retail"),
            &catalog(),
            1.0,
        )
        .unwrap();
        assert_eq!(out[0].score, 100.0);
        assert_eq!(out[1].score, 100.0);
    }

    #[test]
    fn test_empty_input_is_data_error() {
        let err = normalize_indicators(&[], &IndustryContext::resolve("energy"), &catalog(), 1.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Data(_)));
    }

    #[test]
    fn test_unknown_and_duplicate_keys_are_data_errors() {
        let ctx = IndustryContext::resolve("energy");
        let err = normalize_indicators(&[ProcessedIndicatorValue::new("nope", 1.0)], &ctx, &catalog(), 1.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Data(ref m) if m.contains("unknown")));

        let dup = [
            ProcessedIndicatorValue::new("training", 1.0),
            ProcessedIndicatorValue::new("training", 2.0),
        ];
        let err = normalize_indicators(&dup, &ctx, &catalog(), 1.0).unwrap_err();
        assert!(matches!(err, EngineError::Data(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_non_finite_raw_value_is_data_error() {
        let err = normalize_indicators(
            &[ProcessedIndicatorValue::new("training", f64::NAN)],
            &IndustryContext::resolve("energy"),
            &catalog(),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Data(_)));
    }

    #[test]
    fn test_missing_band_is_configuration_error() {
        let ctx = IndustryContext::resolve("energy");
        let err = normalize_indicators(&[ProcessedIndicatorValue::new("bespoke", 5.0)], &ctx, &catalog(), 1.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));

        let ok = normalize_indicators(
            &[ProcessedIndicatorValue::new("bespoke", 5.0)],
            &IndustryContext::resolve("finance"),
            &catalog(),
            1.0,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_company_industry_must_match() {
        let mut value = ProcessedIndicatorValue::new("training", 10.0);
        value.company_industry = Some("制造业".to_string());
        let ok = normalize_indicators(
            std::slice::from_ref(&value),
            &IndustryContext::resolve("Manufacturing"),
            &catalog(),
            1.0,
        );
        assert!(ok.is_ok());

        let err = normalize_indicators(&[value], &IndustryContext::resolve("finance"), &catalog(), 1.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Data(_)));
    }

    #[test]
    fn test_camel_case_payload_accepted() {
        let value: ProcessedIndicatorValue =
            serde_json::from_str(r#"{"indicatorKey": "training", "rawValue": 42.5}"#).unwrap();
        assert_eq!(value, ProcessedIndicatorValue::new("training", 42.5));
    }
}
