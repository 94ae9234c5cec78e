pub mod aggregator;
pub mod composer;
pub mod cross_terms;
pub mod engine;
pub mod events;
pub mod normalizer;
pub mod params;
pub mod store;
pub mod validation;

pub use aggregator::PerDimension;
pub use composer::{Breakdown, DimensionBreakdown, IndicatorContribution, PerformanceLevel, ScoreResult};
pub use cross_terms::CrossTerms;
pub use engine::{calculate_score, ScoringEngine};
pub use events::{Event, EventDirection, EventKind};
pub use normalizer::ProcessedIndicatorValue;
pub use params::{ModelParameters, ParameterUpdate};
pub use store::ParameterStore;
pub use validation::{validate_parameters, ValidationReport};
