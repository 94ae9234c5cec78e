use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregator::PerDimension;
use super::params::ModelParameters;
use crate::catalog::Dimension;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDirection {
    Adverse,
    Favorable,
}

impl EventDirection {
    fn sign(&self) -> f64 {
        match self {
            EventDirection::Adverse => -1.0,
            EventDirection::Favorable => 1.0,
        }
    }
}

/// Event category. Each carries a fixed impact coefficient applied to the raw delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DataBreach,
    WorkplaceAccident,
    EnvironmentalPollution,
    FinancialFraud,
    LaborDispute,
    ProductQuality,
    SupplyChainRisk,
    ComplianceViolation,
    Other,
}

impl EventKind {
    pub fn coefficient(&self) -> f64 {
        match self {
            EventKind::DataBreach => 1.2,
            EventKind::WorkplaceAccident => 0.8,
            EventKind::EnvironmentalPollution => 1.5,
            EventKind::FinancialFraud => 1.3,
            EventKind::LaborDispute => 0.9,
            EventKind::ProductQuality => 1.1,
            EventKind::SupplyChainRisk => 0.9,
            EventKind::ComplianceViolation => 1.4,
            EventKind::Other => 1.0,
        }
    }
}

/// Discrete incident or achievement affecting one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub dimension: Dimension,
    pub direction: EventDirection,
    /// In [0, 1]
    pub severity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
}

impl Event {
    pub fn adverse(dimension: Dimension, severity: f64) -> Self {
        Self {
            dimension,
            direction: EventDirection::Adverse,
            severity,
            kind: None,
        }
    }

    pub fn favorable(dimension: Dimension, severity: f64) -> Self {
        Self {
            dimension,
            direction: EventDirection::Favorable,
            severity,
            kind: None,
        }
    }

    /// Signed, unsaturated score delta.
    pub fn raw_delta(&self, severity_factor: f64) -> f64 {
        let coefficient = self.kind.map(|k| k.coefficient()).unwrap_or(1.0);
        self.direction.sign() * severity_factor * self.severity * coefficient
    }
}

/// Reject events with severities outside [0, 1].
pub fn validate_events(events: &[Event]) -> Result<()> {
    for (i, event) in events.iter().enumerate() {
        if !event.severity.is_finite() || !(0.0..=1.0).contains(&event.severity) {
            return Err(EngineError::Data(format!(
                "events[{}].severity: must be within [0, 1], got {}",
                i, event.severity
            )));
        }
    }
    Ok(())
}

/// Bounded odd function: `max_bonus * tanh(steepness * raw / max_bonus)`.
/// The result never exceeds `max_bonus` in magnitude.
pub fn saturate(raw_delta: f64, max_bonus: f64, steepness: f64) -> f64 {
    if max_bonus <= 0.0 {
        return 0.0;
    }
    max_bonus * (steepness * raw_delta / max_bonus).tanh()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedEvent {
    /// Position in the request's event list
    pub index: usize,
    pub direction: EventDirection,
    pub severity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    pub raw_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DimensionAdjustment {
    pub pre_adjustment: f64,
    pub post_adjustment: f64,
    /// Sum of raw deltas before saturation
    pub raw_delta: f64,
    pub adjustment: f64,
    pub events: Vec<AppliedEvent>,
}

/// Apply events to aggregated dimension scores.
///
/// Raw deltas sharing a dimension are summed first and saturated once, so
/// many small events compound sub-additively. Results are re-clamped to [0, 100].
pub fn apply_events(
    scores: &PerDimension<f64>,
    events: &[Event],
    params: &ModelParameters,
) -> PerDimension<DimensionAdjustment> {
    PerDimension::from_fn(|dimension| {
        let pre_adjustment = *scores.get(dimension);

        let applied: Vec<AppliedEvent> = events
            .iter()
            .enumerate()
            .filter(|(_, event)| event.dimension == dimension)
            .map(|(index, event)| AppliedEvent {
                index,
                direction: event.direction,
                severity: event.severity,
                kind: event.kind,
                raw_delta: event.raw_delta(params.severity_factor),
            })
            .collect();

        let raw_delta: f64 = applied.iter().map(|e| e.raw_delta).sum();
        let adjustment = saturate(raw_delta, params.max_bonus, params.bonus_steepness);
        let post_adjustment = (pre_adjustment + adjustment).clamp(0.0, 100.0);

        if !applied.is_empty() {
            debug!(
                dimension = %dimension,
                events = applied.len(),
                raw_delta,
                adjustment,
                "applied event adjustment"
            );
        }

        DimensionAdjustment {
            pre_adjustment,
            post_adjustment,
            raw_delta,
            adjustment,
            events: applied,
        }
    })
}
