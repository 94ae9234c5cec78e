pub mod formatter;

pub use formatter::{
    format_breakdown, format_catalog, format_industries, format_parameters, format_score,
    format_score_result, should_use_colors, ReportMetadata, ScoreReport,
};
