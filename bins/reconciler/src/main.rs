//! Tillbook reconciler
//!
//! Loads a week from the record store and prints its reconciliation as JSON.

mod report;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tillbook_core::validation::validate_week;
use tillbook_core::{WeekStore, WeeklySummaryEngine};
use tillbook_shared::config::LoggingConfig;
use tillbook_shared::types::WeekId;
use tillbook_shared::{AppConfig, AppError};

#[derive(Parser, Debug)]
#[command(name = "tillbook")]
#[command(about = "Weekly cash reconciliation (closings, products, expenses, loans)")]
struct Cli {
    /// Store root directory or key prefix (overrides `store.root`).
    #[arg(long, env = "TILLBOOK_STORE_ROOT")]
    root: Option<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Weekly balance with per-day and per-person detail.
    Summary {
        /// Week id.
        week: WeekId,
    },
    /// Reconciliation of every register slot.
    Closings {
        /// Week id.
        week: WeekId,
    },
    /// Personal loans and expenses per person.
    People {
        /// Week id.
        week: WeekId,
    },
    /// Check every record against the entry rules.
    Validate {
        /// Week id.
        week: WeekId,
    },
    /// Summaries of several weeks; every week in the store when none is given.
    Weeks {
        /// Week ids.
        weeks: Vec<WeekId>,
    },
}

/// What a command produced: JSON to print and whether it found problems.
struct Outcome {
    output: serde_json::Value,
    failed: bool,
}

impl Outcome {
    fn ok<T: Serialize>(value: &T) -> anyhow::Result<Self> {
        Ok(Self {
            output: serde_json::to_value(value).map_err(AppError::from)?,
            failed: false,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_with_dotenv() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("error: {err}");
            return exit_code(&err);
        }
    };
    init_tracing(&config.logging);

    match run(cli, config).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err:#}");
            err.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn exit_code(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<ExitCode> {
    if let Some(root) = cli.root {
        config.store.root = root;
    }

    let store = WeekStore::from_config(&config.store).map_err(AppError::from)?;
    let engine = WeeklySummaryEngine::new(config.engine);
    info!(root = %config.store.root, command = ?cli.command, "Running command");

    let outcome = match cli.command {
        Command::Summary { week } => {
            let records = store.load_week(week).await.map_err(AppError::from)?;
            Outcome::ok(&report::WeekReport {
                week: &records.week,
                summary: engine.summarize_week(&records),
            })?
        }
        Command::Closings { week } => {
            let records = store.load_week(week).await.map_err(AppError::from)?;
            Outcome::ok(&report::closing_slots(&records))?
        }
        Command::People { week } => {
            let records = store.load_week(week).await.map_err(AppError::from)?;
            Outcome::ok(&report::people(engine.loan_ledger(), &records))?
        }
        Command::Validate { week } => {
            let records = store.load_week(week).await.map_err(AppError::from)?;
            let issues = validate_week(&records);
            let failed = !issues.is_empty();
            let mut outcome = Outcome::ok(&report::ValidationReport {
                week: &records.week,
                checked: records.record_count(),
                issues,
            })?;
            outcome.failed = failed;
            outcome
        }
        Command::Weeks { weeks } => {
            let ids = if weeks.is_empty() {
                store.list_week_ids().await.map_err(AppError::from)?
            } else {
                weeks
            };
            let loaded = store.load_weeks(&ids).await.map_err(AppError::from)?;
            let summaries = engine.summarize_many(&loaded);
            let reports: Vec<_> = loaded
                .iter()
                .zip(summaries)
                .map(|(records, summary)| report::WeekReport {
                    week: &records.week,
                    summary,
                })
                .collect();
            Outcome::ok(&reports)?
        }
    };

    print_json(&outcome.output, cli.compact)?;

    if outcome.failed {
        let err = AppError::Validation("records break entry rules".to_string());
        return Ok(exit_code(&err));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_json(value: &serde_json::Value, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(AppError::from)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")
        .map_err(AppError::from)
        .context("writing output")?;
    Ok(())
}
