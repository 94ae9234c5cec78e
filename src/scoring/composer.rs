use serde::Serialize;
use std::fmt;

use super::aggregator::{Aggregation, PerDimension};
use super::cross_terms::CrossTerms;
use super::events::{AppliedEvent, DimensionAdjustment};
use super::normalizer::{IndustryContext, NormalizedIndicator};
use super::params::ModelParameters;
use crate::catalog::{BandSource, Dimension, ReferenceBand};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorContribution {
    pub key: String,
    pub display_name: String,
    pub dimension: Dimension,
    pub raw_value: f64,
    /// Band after `threshold_multiplier` scaling
    pub band: ReferenceBand,
    pub band_source: BandSource,
    pub normalized_score: f64,
    /// Effective weight within the dimension
    pub weight: f64,
    pub weighted_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub indicator_count: usize,
    pub insufficient_data: bool,
    pub pre_adjustment: f64,
    pub post_adjustment: f64,
    pub raw_event_delta: f64,
    pub event_adjustment: f64,
    pub events: Vec<AppliedEvent>,
}

/// Explanation of how a total score was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub industry: String,
    pub industry_recognized: bool,
    pub indicators: Vec<IndicatorContribution>,
    pub dimensions: Vec<DimensionBreakdown>,
    pub dimension_weights: PerDimension<f64>,
    pub alpha: f64,
    pub baseline_score: f64,
    pub cross_terms: CrossTerms,
}

impl Breakdown {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionBreakdown> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Indicators scored against a default band instead of an industry band.
    pub fn fallback_indicators(&self) -> impl Iterator<Item = &IndicatorContribution> {
        self.indicators
            .iter()
            .filter(|i| i.band_source == BandSource::DefaultFallback)
    }
}

/// Result of one scoring call. All scores are within [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub e_score: f64,
    pub s_score: f64,
    pub g_score: f64,
    pub total_score: f64,
    pub breakdown: Breakdown,
    #[serde(rename = "crossTerms")]
    pub cross_terms: CrossTerms,
}

impl ScoreResult {
    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_score(self.total_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Poor,
}

impl PerformanceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceLevel::Excellent
        } else if score >= 80.0 {
            PerformanceLevel::Good
        } else if score >= 70.0 {
            PerformanceLevel::Average
        } else if score >= 60.0 {
            PerformanceLevel::BelowAverage
        } else {
            PerformanceLevel::Poor
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::BelowAverage => "Below Average",
            PerformanceLevel::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// `e_weight*E + s_weight*S + g_weight*G` on the 0-100 scale.
pub fn baseline_score(scores: &PerDimension<f64>, params: &ModelParameters) -> f64 {
    params.e_weight * scores.e + params.s_weight * scores.s + params.g_weight * scores.g
}

/// Blend the baseline with the cross-term adjusted score and clamp.
pub fn total_score(baseline: f64, cross_terms: &CrossTerms, params: &ModelParameters) -> f64 {
    let adjusted = baseline + cross_terms.total * 100.0;
    (params.alpha * baseline + (1.0 - params.alpha) * adjusted).clamp(0.0, 100.0)
}

/// Assemble the final result. Pure function of its inputs.
pub fn compose(
    industry: &IndustryContext,
    normalized: &[NormalizedIndicator],
    aggregation: &Aggregation,
    adjustments: &PerDimension<DimensionAdjustment>,
    cross_terms: CrossTerms,
    params: &ModelParameters,
) -> ScoreResult {
    let scores = PerDimension::from_fn(|d| adjustments.get(d).post_adjustment.clamp(0.0, 100.0));
    let baseline = baseline_score(&scores, params);
    let total = total_score(baseline, &cross_terms, params);

    let indicators = normalized
        .iter()
        .zip(&aggregation.weights)
        .map(|(ind, w)| IndicatorContribution {
            key: ind.key.clone(),
            display_name: ind.display_name.clone(),
            dimension: ind.dimension,
            raw_value: ind.raw_value,
            band: ind.band,
            band_source: ind.band_source,
            normalized_score: ind.score,
            weight: w.weight,
            weighted_contribution: w.contribution,
        })
        .collect();

    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let agg = aggregation.dimensions.get(dimension);
            let adj = adjustments.get(dimension);
            DimensionBreakdown {
                dimension,
                indicator_count: agg.indicator_count,
                insufficient_data: agg.insufficient_data,
                pre_adjustment: adj.pre_adjustment,
                post_adjustment: *scores.get(dimension),
                raw_event_delta: adj.raw_delta,
                event_adjustment: adj.adjustment,
                events: adj.events.clone(),
            }
        })
        .collect();

    ScoreResult {
        e_score: scores.e,
        s_score: scores.s,
        g_score: scores.g,
        total_score: total,
        breakdown: Breakdown {
            industry: industry.label.clone(),
            industry_recognized: industry.resolved.is_some(),
            indicators,
            dimensions,
            dimension_weights: PerDimension {
                e: params.e_weight,
                s: params.s_weight,
                g: params.g_weight,
            },
            alpha: params.alpha,
            baseline_score: baseline,
            cross_terms,
        },
        cross_terms,
    }
}
