//! Biomarker Trends CLI Tool
//!
//! Run the analysis core against JSON exports of lab history, supplements
//! and goals.
//!
//! Usage:
//!   biomarker-trends trend <history.json> --biomarker <name> [--now <date>]
//!   biomarker-trends status --biomarker <name> --value <value>
//!   biomarker-trends summary <history.json> [--now <date>]
//!   biomarker-trends costs <supplements.json>
//!   biomarker-trends goal --current <value> --target <value> --direction <dir>
//!   biomarker-trends catalog [--category <category>]
//!
//! Set RUST_LOG=debug to see window selection decisions on stderr.

use biomarker_trends::*;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "biomarker-trends")]
#[command(version = "0.1.0")]
#[command(about = "Analyse biomarker history, supplement costs and goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Evaluation date (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    now: Option<String>,

    /// Trend engine config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the trend for one biomarker
    Trend {
        /// JSON array of readings; readings for other biomarkers are ignored
        history: PathBuf,

        /// Biomarker name as listed in the catalog
        #[arg(short, long)]
        biomarker: String,
    },

    /// Classify a single value against the catalog ranges
    Status {
        #[arg(short, long)]
        biomarker: String,

        #[arg(short, long)]
        value: f64,
    },

    /// Summarize every biomarker in a history file
    Summary {
        /// JSON array of readings
        history: PathBuf,
    },

    /// Total supplement costs
    Costs {
        /// JSON array of supplements
        supplements: PathBuf,
    },

    /// Progress toward a goal
    Goal {
        #[arg(long)]
        current: Option<f64>,

        #[arg(long)]
        target: Option<f64>,

        #[arg(long, value_enum)]
        direction: DirectionArg,
    },

    /// List catalog entries
    Catalog {
        /// Only show one category (e.g. "lipids")
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Increase,
    Decrease,
    Maintain,
}

impl From<DirectionArg> for GoalDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Increase => GoalDirection::Increase,
            DirectionArg::Decrease => GoalDirection::Decrease,
            DirectionArg::Maintain => GoalDirection::Maintain,
        }
    }
}

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let now = match &cli.now {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let config = match &cli.config {
        Some(path) => TrendConfig::from_path(path)?,
        None => TrendConfig::default(),
    };
    let engine = TrendEngine::new(config);
    let catalog = ReferenceCatalog::builtin();

    let result = match cli.command {
        Commands::Trend { history, biomarker } => {
            run_trend(&engine, &catalog, &history, &biomarker, now)?
        }
        Commands::Status { biomarker, value } => {
            let reference = catalog.require(&biomarker)?;
            let status = get_biomarker_status(
                value,
                Some(reference.reference_range.low),
                Some(reference.reference_range.high),
                Some(reference.optimal_range.low),
                Some(reference.optimal_range.high),
            );
            serde_json::json!({
                "biomarker": reference.name,
                "value": value,
                "unit": reference.unit,
                "status": status,
            })
        }
        Commands::Summary { history } => {
            let readings = load_readings(&history, now)?;
            serde_json::to_value(engine.summarize(&readings, &catalog, now))?
        }
        Commands::Costs { supplements } => {
            let raw = fs::read_to_string(&supplements)?;
            let supplements: Vec<Supplement> = serde_json::from_str(&raw)?;
            serde_json::to_value(calculate_supplement_costs(&supplements))?
        }
        Commands::Goal {
            current,
            target,
            direction,
        } => {
            let goal = Goal::new(current, target, direction.into());
            serde_json::json!({
                "progress": goal.progress(),
                "achieved": goal.is_achieved(),
            })
        }
        Commands::Catalog { category } => run_catalog(&catalog, category.as_deref())?,
    };

    let output_str = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };

    if let Some(output_path) = cli.output {
        fs::write(&output_path, &output_str)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

/// Read a readings file and validate every entry against `now`
fn load_readings(path: &Path, now: NaiveDate) -> CliResult<Vec<Reading>> {
    let readings: Vec<Reading> = serde_json::from_str(&fs::read_to_string(path)?)?;
    for reading in &readings {
        reading.validate(now)?;
    }
    info!(count = readings.len(), path = %path.display(), "Loaded readings");
    Ok(readings)
}

fn run_trend(
    engine: &TrendEngine,
    catalog: &ReferenceCatalog,
    history: &Path,
    biomarker: &str,
    now: NaiveDate,
) -> CliResult<Value> {
    let reference = catalog.require(biomarker)?;
    let readings: Vec<Reading> = load_readings(history, now)?
        .into_iter()
        .filter(|r| r.name.trim().eq_ignore_ascii_case(&reference.name))
        .collect();

    let trend = engine.calculate(&readings, reference, now);
    Ok(serde_json::json!({
        "biomarker": reference.name,
        "unit": reference.unit,
        "trend": trend,
    }))
}

fn run_catalog(catalog: &ReferenceCatalog, category: Option<&str>) -> CliResult<Value> {
    let entries: Vec<&ReferenceEntry> = match category {
        Some(name) => {
            let category: BiomarkerCategory =
                serde_json::from_value(Value::String(name.to_lowercase()))?;
            catalog.by_category(category)
        }
        None => catalog.iter().collect(),
    };
    Ok(serde_json::to_value(entries)?)
}
