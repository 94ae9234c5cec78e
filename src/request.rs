use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scoring::{Event, ParameterUpdate, ProcessedIndicatorValue};

/// Scoring request document read by the CLI. YAML or JSON.
///
/// Example YAML:
/// ```yaml
/// company: Acme Corp
/// industry: manufacturing
/// indicators:
///   - { indicator_key: carbon_intensity, raw_value: 310 }
///   - { indicator_key: training_coverage, raw_value: 72 }
/// events:
///   - { dimension: S, direction: adverse, severity: 0.6, kind: workplace_accident }
/// parameters:
///   use_cross_terms: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoreRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    pub industry: String,

    pub indicators: Vec<ProcessedIndicatorValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParameterUpdate>,
}

/// Read a request file. JSON documents parse through the YAML reader as well.
pub fn load_request(path: &Path) -> Result<ScoreRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file at {}", path.display()))?;

    let request: ScoreRequest = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse request in {}", path.display()))?;

    Ok(request)
}
