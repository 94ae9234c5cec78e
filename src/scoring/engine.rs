use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::aggregator::{aggregate, PerDimension};
use super::composer::{compose, Breakdown, ScoreResult};
use super::cross_terms::calculate_cross_terms;
use super::events::{apply_events, validate_events, Event};
use super::normalizer::{normalize_indicators, IndustryContext, ProcessedIndicatorValue};
use super::params::{ModelParameters, ParameterUpdate};
use super::store::ParameterStore;
use super::validation::ValidationReport;
use crate::catalog::{IndicatorCatalog, IndicatorDefinition, Industry};
use crate::error::{EngineError, Result};

/// Run the full pipeline against one parameter snapshot.
///
/// Normalizer -> Aggregator -> Event Adjustment -> Cross-Terms -> Composer.
/// Deterministic: no hidden state, identical inputs give identical results.
pub fn calculate_score(
    indicators: &[ProcessedIndicatorValue],
    industry: &str,
    events: &[Event],
    params: &ModelParameters,
    catalog: &IndicatorCatalog,
) -> Result<ScoreResult> {
    validate_events(events)?;

    let industry = IndustryContext::resolve(industry);
    if industry.resolved.is_none() {
        warn!(industry = %industry.label, "unrecognized industry, using default reference bands");
    }

    let normalized = normalize_indicators(indicators, &industry, catalog, params.threshold_multiplier)?;
    let aggregation = aggregate(&normalized);

    let aggregated = PerDimension::from_fn(|d| aggregation.dimensions.get(d).score);
    let adjustments = apply_events(&aggregated, events, params);

    let adjusted = PerDimension::from_fn(|d| adjustments.get(d).post_adjustment);
    let cross_terms = calculate_cross_terms(&adjusted, params);

    let result = compose(&industry, &normalized, &aggregation, &adjustments, cross_terms, params);
    debug!(
        e = result.e_score,
        s = result.s_score,
        g = result.g_score,
        total = result.total_score,
        "calculated score"
    );
    Ok(result)
}

/// Entry point for callers: owns the indicator catalog and shares the
/// parameter store.
#[derive(Debug)]
pub struct ScoringEngine {
    params: Arc<ParameterStore>,
    catalog: RwLock<Arc<IndicatorCatalog>>,
}

impl ScoringEngine {
    pub fn new(params: Arc<ParameterStore>, catalog: IndicatorCatalog) -> Self {
        Self {
            params,
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Score a company. Parameter overrides, if any, are merged and validated,
    /// the whole computation runs on the merged set, and the set is committed
    /// to the store only when scoring succeeds.
    pub fn calculate_score(
        &self,
        indicators: &[ProcessedIndicatorValue],
        industry: &str,
        events: &[Event],
        overrides: Option<&ParameterUpdate>,
    ) -> Result<ScoreResult> {
        if indicators.is_empty() {
            return Err(EngineError::Data(
                "no processed indicator values supplied".to_string(),
            ));
        }
        validate_events(events)?;

        let catalog = self.catalog();
        match overrides {
            Some(update) if !update.is_empty() => self
                .params
                .update_with(update, |params| {
                    calculate_score(indicators, industry, events, params, &catalog)
                })
                .map(|(_, result)| result),
            _ => {
                let params = self.params.snapshot();
                calculate_score(indicators, industry, events, &params, &catalog)
            }
        }
    }

    /// Breakdown for the given indicators without events, consistent with the
    /// breakdown a `calculate_score` call with the same inputs embeds.
    pub fn get_breakdown(
        &self,
        indicators: &[ProcessedIndicatorValue],
        industry: &str,
    ) -> Result<Breakdown> {
        let params = self.params.snapshot();
        let catalog = self.catalog();
        calculate_score(indicators, industry, &[], &params, &catalog).map(|r| r.breakdown)
    }

    pub fn get_parameters(&self) -> ModelParameters {
        self.params.get()
    }

    pub fn validate_parameters(&self, candidate: &ModelParameters) -> ValidationReport {
        self.params.validate(candidate)
    }

    pub fn update_parameters(&self, update: &ParameterUpdate) -> Result<ModelParameters> {
        self.params.update(update).map(|p| (*p).clone())
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<IndicatorCatalog> {
        Arc::clone(&self.catalog.read())
    }

    /// Replace (or add) one catalog entry as a whole.
    pub fn replace_indicator(&self, definition: IndicatorDefinition) -> Result<()> {
        let key = definition.key.clone();
        let mut guard = self.catalog.write();
        let updated = guard
            .with_replaced(definition)
            .map_err(EngineError::validation)?;
        *guard = Arc::new(updated);
        info!(indicator = %key, "indicator definition replaced");
        Ok(())
    }

    pub fn industries(&self) -> &'static [Industry] {
        &Industry::ALL
    }
}
