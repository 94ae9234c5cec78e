use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use esg_score::catalog::Industry;
use esg_score::config::Config;
use esg_score::error::EngineError;
use esg_score::scoring::{ParameterStore, ParameterUpdate, ScoringEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum ParamsCommand {
    /// Print the effective model parameters
    Show,
    /// Update model parameters and persist them to the config file
    Set {
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(long)]
        e_weight: Option<f64>,
        #[arg(long)]
        s_weight: Option<f64>,
        #[arg(long)]
        g_weight: Option<f64>,
        #[arg(long)]
        delta_coeff: Option<f64>,
        #[arg(long)]
        epsilon_coeff: Option<f64>,
        #[arg(long)]
        zeta_coeff: Option<f64>,
        #[arg(long)]
        severity_factor: Option<f64>,
        #[arg(long)]
        max_bonus: Option<f64>,
        #[arg(long)]
        bonus_steepness: Option<f64>,
        #[arg(long)]
        threshold_multiplier: Option<f64>,
        #[arg(long)]
        use_cross_terms: Option<bool>,
    },
    /// Set the E/S/G weights to an industry's profile and persist them
    Preset {
        /// Industry name or alias (see `esg-score industries`)
        industry: String,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a company from a request file (YAML or JSON)
    Score {
        /// Path to the request file
        request: PathBuf,
    },
    /// Explain per-indicator and per-dimension scores (events ignored)
    Breakdown {
        /// Path to the request file
        request: PathBuf,
    },
    /// Show or update model parameters
    Params {
        #[command(subcommand)]
        command: ParamsCommand,
    },
    /// List the indicator catalog
    Indicators,
    /// List supported industries and their aliases
    Industries,
}

#[derive(Parser, Debug)]
#[command(name = "esg-score")]
#[command(about = "Explainable ESG composite scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/esg-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn exit_code(error: &EngineError) -> i32 {
    match error {
        EngineError::Configuration(_) | EngineError::Validation { .. } => EXIT_CONFIG,
        EngineError::Data(_) => EXIT_DATA,
    }
}

fn fail(context: &str, error: &EngineError) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(exit_code(error));
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn load_request_or_exit(path: &std::path::Path) -> esg_score::request::ScoreRequest {
    match esg_score::request::load_request(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

/// Apply `update` to the engine, then write the full parameter set back to the config file.
fn persist_parameters(
    engine: &ScoringEngine,
    update: &ParameterUpdate,
    config: &Config,
    config_path: anyhow::Result<PathBuf>,
    json: bool,
) {
    let params = match engine.update_parameters(update) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parameter errors:");
            for error in e.field_errors() {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    let path = match config_path {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let mut updated = config.clone();
    updated.parameters = ParameterUpdate::from(&params);
    if let Err(e) = esg_score::config::save_config(&path, &updated) {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    if json {
        print_json(&params);
    } else {
        println!("{}", esg_score::output::format_parameters(&params));
        println!();
        println!("Saved to {}", path.display());
    }
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Commands that write the config may create it
    let writes_config = matches!(
        cli.command,
        Commands::Params {
            command: ParamsCommand::Set { .. } | ParamsCommand::Preset { .. }
        }
    );

    // Load config
    let config_path = esg_score::config::resolve_config_path(cli.config.clone());
    let loaded = if writes_config {
        esg_score::config::load_config_or_default(cli.config.clone())
    } else {
        esg_score::config::load_config(cli.config.clone())
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(e) = esg_score::telemetry::init(cli.verbose, config.log_level.as_deref()) {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    // Validate parameters and catalog at startup
    let mut errors = Vec::new();
    let params = config.model_parameters().map_err(|e| errors.extend(e)).ok();
    let catalog = config.catalog().map_err(|e| errors.extend(e)).ok();
    let (params, catalog) = match (params, catalog) {
        (Some(p), Some(c)) if errors.is_empty() => (p, c),
        _ => {
            eprintln!("Config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(
        indicators = catalog.len(),
        overrides = !config.parameters.is_empty(),
        "configuration loaded"
    );

    let store = match ParameterStore::new(params) {
        Ok(s) => Arc::new(s),
        Err(e) => fail("Config error", &e),
    };
    let engine = ScoringEngine::new(store, catalog);
    let use_colors = esg_score::output::should_use_colors();

    match cli.command {
        Commands::Score { request } => {
            let request = load_request_or_exit(&request);
            let result = match engine.calculate_score(
                &request.indicators,
                &request.industry,
                &request.events,
                request.parameters.as_ref(),
            ) {
                Ok(r) => r,
                Err(e) => fail("Scoring error", &e),
            };

            if cli.json {
                let report = esg_score::output::ScoreReport::new(
                    &result,
                    request.company.as_deref(),
                    chrono::Utc::now(),
                );
                print_json(&report);
            } else {
                if let Some(company) = &request.company {
                    println!("{}", company);
                }
                println!("{}", esg_score::output::format_score_result(&result, use_colors));
                if cli.verbose {
                    println!();
                    println!(
                        "{}",
                        esg_score::output::format_breakdown(&result.breakdown, use_colors)
                    );
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Scored {} indicators in {:?}",
                    request.indicators.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Breakdown { request } => {
            let request = load_request_or_exit(&request);
            if !request.events.is_empty() {
                tracing::info!(
                    events = request.events.len(),
                    "events are not applied to a standalone breakdown"
                );
            }
            let breakdown = match engine.get_breakdown(&request.indicators, &request.industry) {
                Ok(b) => b,
                Err(e) => fail("Scoring error", &e),
            };

            if cli.json {
                print_json(&breakdown);
            } else {
                println!("{}", esg_score::output::format_breakdown(&breakdown, use_colors));
            }
        }
        Commands::Params { command: ParamsCommand::Show } => {
            let params = engine.get_parameters();
            if cli.json {
                print_json(&params);
            } else {
                println!("{}", esg_score::output::format_parameters(&params));
            }
        }
        Commands::Params {
            command:
                ParamsCommand::Set {
                    alpha,
                    e_weight,
                    s_weight,
                    g_weight,
                    delta_coeff,
                    epsilon_coeff,
                    zeta_coeff,
                    severity_factor,
                    max_bonus,
                    bonus_steepness,
                    threshold_multiplier,
                    use_cross_terms,
                },
        } => {
            let update = ParameterUpdate {
                alpha,
                e_weight,
                s_weight,
                g_weight,
                delta_coeff,
                epsilon_coeff,
                zeta_coeff,
                severity_factor,
                max_bonus,
                bonus_steepness,
                threshold_multiplier,
                use_cross_terms,
            };
            if update.is_empty() {
                eprintln!("No parameters given. See `esg-score params set --help`.");
                std::process::exit(EXIT_CONFIG);
            }

            persist_parameters(&engine, &update, &config, config_path, cli.json);
        }
        Commands::Params {
            command: ParamsCommand::Preset { industry },
        } => {
            let Some(resolved) = Industry::parse(&industry) else {
                eprintln!(
                    "Unknown industry '{}'. See `esg-score industries` for accepted names.",
                    industry
                );
                std::process::exit(EXIT_DATA);
            };
            tracing::debug!(industry = %resolved, "applying industry weight profile");

            let update = ParameterUpdate::industry_weights(resolved);
            persist_parameters(&engine, &update, &config, config_path, cli.json);
        }
        Commands::Indicators => {
            let catalog = engine.catalog();
            if cli.json {
                let definitions: Vec<_> = catalog.iter().collect();
                print_json(&definitions);
            } else {
                println!("{}", esg_score::output::format_catalog(&catalog, use_colors));
            }
        }
        Commands::Industries => {
            let industries = engine.industries();
            if cli.json {
                print_json(&industries);
            } else {
                println!("{}", esg_score::output::format_industries(industries));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
