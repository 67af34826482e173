//! CLI entry point for the survey ETL engine.
//!
//! Loads and enriches the survey once, then answers a single query per
//! invocation the way the dashboard would ask for it.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use survey_etl::EngineContext;
use survey_etl::analyzers::types::HistogramBin;
use survey_etl::config::EngineConfig;
use survey_etl::output::{Report, print_json, write_csv};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "survey_etl")]
#[command(about = "Derived views over airline passenger satisfaction survey data", long_about = None)]
struct Cli {
    /// JSON config file overriding thresholds, bins and targets
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Survey CSV (or .csv.gz); overrides the config's data_path
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Write the result rows to this CSV file instead of printing JSON
    #[arg(long, global = true, value_name = "FILE")]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Grouping dimension (AgeGroup, Class, CustomerType, FlightDistanceGroup, Gender, TypeOfTravel)
    #[arg(short, long, default_value = "AgeGroup")]
    dimension: String,

    /// Value of the dimension to keep, or "All"
    #[arg(short, long, default_value = "All")]
    filter: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Satisfaction group counts and percentages per dimension value
    Barchart {
        #[arg(short, long, default_value = "AgeGroup")]
        dimension: String,
    },
    /// Score distribution of the selected subset
    Histogram(Selection),
    /// Mean score and tier of each service feature for the selected subset
    Services(Selection),
    /// Response count, mean score and group shares for the selected subset
    Cards(Selection),
    /// Filter values available for a dimension
    Options {
        #[arg(short, long, default_value = "AgeGroup")]
        dimension: String,
    },
    /// Most important service features for predicting satisfaction
    Features {
        /// Number of features to return (defaults to the config's top_n)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        top_n: Option<u64>,
    },
}

#[derive(Serialize)]
struct HistogramView {
    responses: usize,
    bins: Vec<HistogramBin>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os("SURVEY_CONFIG_PATH").map(PathBuf::from));
    let mut config = match config_path {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(data) = cli
        .data
        .or_else(|| std::env::var_os("SURVEY_DATA_PATH").map(PathBuf::from))
    {
        config.data_path = data;
    }

    let ctx = EngineContext::load(config).context("failed to load survey data")?;
    let csv = cli.csv.as_deref();

    match cli.command {
        Commands::Barchart { dimension } => {
            let rows = ctx.barchart(&dimension)?;
            let report = Report::new("barchart", &rows).with_selection(&dimension, None);
            emit(csv, &rows, &report)?;
        }
        Commands::Histogram(sel) => {
            let responses = ctx.histogram(&sel.dimension, Some(&sel.filter))?.len();
            let bins = ctx.score_histogram(&sel.dimension, Some(&sel.filter))?;
            let view = HistogramView { responses, bins };
            let report = Report::new("histogram", &view)
                .with_selection(&sel.dimension, Some(&sel.filter));
            emit(csv, &view.bins, &report)?;
        }
        Commands::Services(sel) => {
            let summary = ctx.service_scores(&sel.dimension, Some(&sel.filter))?;
            let report = Report::new("services", &summary)
                .with_selection(&sel.dimension, Some(&sel.filter));
            emit(csv, &summary.rows, &report)?;
        }
        Commands::Cards(sel) => {
            let cards = ctx.summary_cards(&sel.dimension, Some(&sel.filter))?;
            let report =
                Report::new("cards", &cards).with_selection(&sel.dimension, Some(&sel.filter));
            emit(csv, &cards.groups, &report)?;
        }
        Commands::Options { dimension } => {
            let values = ctx.filter_options(&dimension)?;
            let report = Report::new("options", &values).with_selection(&dimension, None);
            emit(csv, &values, &report)?;
        }
        Commands::Features { top_n } => {
            let top_n = top_n.map_or(ctx.config().top_n, |n| n as usize);
            let ranked = match ctx.feature_importance(top_n) {
                Ok(ranked) => ranked,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Feature importance unavailable, returning empty ranking");
                    Vec::new()
                }
                Err(e) => return Err(e.into()),
            };
            let report = Report::new("features", &ranked);
            emit(csv, &ranked, &report)?;
        }
    }

    info!("Query complete");
    Ok(())
}

/// Writes `rows` as CSV when a path was given, otherwise prints `report` as JSON.
fn emit<R: Serialize, D: Serialize>(
    csv: Option<&Path>,
    rows: &[R],
    report: &Report<D>,
) -> Result<()> {
    match csv {
        Some(path) => write_csv(path, rows),
        None => print_json(report),
    }
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/survey_etl.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("survey_etl.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
