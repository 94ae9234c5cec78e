use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::catalog::{BandSource, IndicatorCatalog, Industry};
use crate::scoring::{Breakdown, ModelParameters, PerformanceLevel, ScoreResult};

const NAME_WIDTH: usize = 44;
const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a 0-100 score with one decimal
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Traffic-light coloring: >=70 green, >=50 yellow, red below
fn colorize_score(score: f64, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    if score >= 70.0 {
        text.green().to_string()
    } else if score >= 50.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Horizontal bar for a 0-100 score, e.g. "██████████░░░░░░░░░░"
fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Truncate to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Summary: total, performance level, per-dimension bars and cross-terms
pub fn format_score_result(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let total = format_score(result.total_score);
    let level = result.performance_level().to_string();
    if use_colors {
        lines.push(format!(
            "{} {} ({})",
            "ESG score:".bold(),
            colorize_score(result.total_score, &total, true).bold(),
            level
        ));
    } else {
        lines.push(format!("ESG score: {} ({})", total, level));
    }

    for (code, name, score) in [
        ("E", "Environmental", result.e_score),
        ("S", "Social", result.s_score),
        ("G", "Governance", result.g_score),
    ] {
        let value = format!("{:>5}", format_score(score));
        lines.push(format!(
            "  {} {:<13} {}  {}",
            code,
            name,
            colorize_score(score, &value, use_colors),
            score_bar(score)
        ));
    }

    let terms = &result.cross_terms;
    lines.push(format!(
        "  Cross-terms: ES {:.4}  EG {:.4}  SG {:.4}  (total {:.4})",
        terms.es, terms.eg, terms.sg, terms.total
    ));
    lines.push(format!(
        "  Baseline: {}  alpha: {}",
        format_score(result.breakdown.baseline_score),
        result.breakdown.alpha
    ));

    lines.join("\n")
}

/// Per-indicator and per-dimension explanation
pub fn format_breakdown(breakdown: &Breakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let industry_note = if breakdown.industry_recognized {
        String::new()
    } else {
        " (unrecognized, default bands used)".to_string()
    };
    lines.push(format!("Industry: {}{}", breakdown.industry, industry_note));
    lines.push(String::new());

    for dim in &breakdown.dimensions {
        let header = format!(
            "[{}] {} -> {}",
            dim.dimension,
            format_score(dim.pre_adjustment),
            format_score(dim.post_adjustment)
        );
        if use_colors {
            lines.push(header.bold().to_string());
        } else {
            lines.push(header);
        }

        if dim.insufficient_data {
            lines.push("    insufficient data".to_string());
        }

        for ind in breakdown.indicators.iter().filter(|i| i.dimension == dim.dimension) {
            let fallback = match ind.band_source {
                BandSource::Industry => "",
                BandSource::DefaultFallback => " *",
            };
            lines.push(format!(
                "    {:<width$} {:>10.2} -> {:>5}  w {:.3}  = {:>6.2}{}",
                truncate_name(&ind.display_name, NAME_WIDTH),
                ind.raw_value,
                format_score(ind.normalized_score),
                ind.weight,
                ind.weighted_contribution,
                fallback,
                width = NAME_WIDTH
            ));
        }

        if !dim.events.is_empty() {
            lines.push(format!(
                "    {} event(s): raw {:+.3}, adjustment {:+.3}",
                dim.events.len(),
                dim.raw_event_delta,
                dim.event_adjustment
            ));
        }
    }

    if breakdown.fallback_indicators().next().is_some() {
        lines.push(String::new());
        lines.push("* scored against the default reference band".to_string());
    }

    lines.join("\n")
}

pub fn format_parameters(params: &ModelParameters) -> String {
    [
        format!("alpha:                {}", params.alpha),
        format!(
            "weights (E/S/G):      {} / {} / {}",
            params.e_weight, params.s_weight, params.g_weight
        ),
        format!(
            "cross-term coeffs:    delta {} / epsilon {} / zeta {}",
            params.delta_coeff, params.epsilon_coeff, params.zeta_coeff
        ),
        format!("use_cross_terms:      {}", params.use_cross_terms),
        format!("severity_factor:      {}", params.severity_factor),
        format!("max_bonus:            {}", params.max_bonus),
        format!("bonus_steepness:      {}", params.bonus_steepness),
        format!("threshold_multiplier: {}", params.threshold_multiplier),
    ]
    .join("\n")
}

/// One line per indicator: dimension, key, direction, default band
pub fn format_catalog(catalog: &IndicatorCatalog, use_colors: bool) -> String {
    if catalog.is_empty() {
        return "No indicators configured.".to_string();
    }

    catalog
        .iter()
        .map(|def| {
            let band = def
                .default_band
                .map(|b| format!("[{}, {}]", b.min, b.max))
                .unwrap_or_else(|| "-".to_string());
            let direction = match def.direction {
                crate::catalog::Direction::HigherBetter => "higher-better",
                crate::catalog::Direction::LowerBetter => "lower-better",
            };
            let key = if use_colors {
                def.key.cyan().to_string()
            } else {
                def.key.clone()
            };
            format!(
                "{}  {}  {}  default {}  ({} industry band(s))",
                def.dimension,
                key,
                direction,
                band,
                def.bands.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_industries(industries: &[Industry]) -> String {
    industries
        .iter()
        .map(|industry| {
            let aliases = industry.aliases();
            if aliases.is_empty() {
                industry.as_str().to_string()
            } else {
                format!("{} ({})", industry.as_str(), aliases.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata<'a> {
    pub calculated_at: DateTime<Utc>,
    pub model_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<&'a str>,
    pub industry: &'a str,
}

/// JSON envelope printed by `score --json`
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub scores: &'a ScoreResult,
    pub performance_level: PerformanceLevel,
    pub metadata: ReportMetadata<'a>,
}

impl<'a> ScoreReport<'a> {
    pub fn new(result: &'a ScoreResult, company: Option<&'a str>, calculated_at: DateTime<Utc>) -> Self {
        Self {
            scores: result,
            performance_level: result.performance_level(),
            metadata: ReportMetadata {
                calculated_at,
                model_version: env!("CARGO_PKG_VERSION"),
                company,
                industry: &result.breakdown.industry,
            },
        }
    }
}
