use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Pick the filter directive: `--verbose` wins, then the configured level.
/// `RUST_LOG` is consulted separately in [`init`] and overrides both.
pub fn filter_directive(verbose: bool, configured: Option<&str>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.unwrap_or(DEFAULT_LOG_LEVEL).to_string()
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(verbose: bool, configured: Option<&str>) -> Result<(), TelemetryError> {
    let directive = filter_directive(verbose, configured);
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !verbose => filter,
        _ => EnvFilter::try_new(&directive).map_err(|source| TelemetryError::EnvFilter {
            value: directive.clone(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        assert_eq!(filter_directive(true, Some("error")), "debug");
    }

    #[test]
    fn test_configured_level_used() {
        assert_eq!(filter_directive(false, Some("esg_score=info")), "esg_score=info");
        assert_eq!(filter_directive(false, None), DEFAULT_LOG_LEVEL);
    }
}
