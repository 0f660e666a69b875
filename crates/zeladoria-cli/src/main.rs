//! Zeladoria CLI - municipal complaint tracking from the terminal
//!
//! This CLI lets a citizen or city operator:
//! - Register complaints with an optional photo
//! - List, filter and inspect complaints
//! - Move complaints through their resolution status
//! - Export a PDF report per complaint
//! - View the status dashboard

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeladoria_types::{Category, Status};

mod commands;
mod config;
mod error;
mod output;

use commands::{dashboard, records, register, report, status};
use config::{CliConfig, StoreConfig};
use error::CliResult;
use output::{DetailRow, OutputFormat};

/// Zeladoria CLI application
#[derive(Parser)]
#[command(name = "zeladoria")]
#[command(about = "Zeladoria Digital - municipal complaint tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ZELADORIA_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Register a new complaint
    Register(register::RegisterArgs),

    /// List complaints
    #[command(alias = "ls")]
    List {
        /// Only complaints with this status
        #[arg(short, long)]
        status: Option<Status>,

        /// Only complaints in this category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show one complaint
    Show {
        /// Protocol number
        protocol: String,
    },

    /// Set the status of a complaint
    Status {
        /// Protocol number
        protocol: String,

        /// New status (Unanswered, "Under Review", "In Progress", Completed)
        status: Status,
    },

    /// Export the PDF report of a complaint
    Report {
        /// Protocol number
        protocol: String,

        /// Output directory (defaults to report.out_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show status and category counts
    Dashboard,

    /// Show configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.output;

    if let Commands::Config = cli.command {
        return show_config(&config, format);
    }

    let workflow = config.build_workflow()?;
    match cli.command {
        Commands::Register(args) => register::execute(args, &workflow, format).await,
        Commands::List { status, category } => {
            records::list(&workflow, status, category, format).await
        }
        Commands::Show { protocol } => records::show(&workflow, &protocol, format).await,
        Commands::Status { protocol, status } => {
            status::execute(&workflow, &protocol, status, format).await
        }
        Commands::Report { protocol, out } => {
            let out_dir = out.unwrap_or_else(|| config.report_dir());
            report::execute(&workflow, &protocol, out_dir).await
        }
        Commands::Dashboard => dashboard::execute(&workflow, format).await,
        Commands::Config => Ok(()),
    }
}

fn show_config(config: &CliConfig, format: OutputFormat) -> CliResult<()> {
    let config = config.redacted();
    output::print_single(
        &config,
        || {
            let store = match &config.store {
                StoreConfig::File { path } => format!("file {}", config.resolve(path).display()),
                StoreConfig::Sheets(settings) => format!(
                    "sheets {} ({})",
                    settings.spreadsheet_id, settings.range
                ),
            };
            vec![
                DetailRow::new("Data dir", config.data_dir.display()),
                DetailRow::new("Store", store),
                DetailRow::new("Photos dir", &config.photos.dir),
                DetailRow::new(
                    "Duplicate policy",
                    format!("{:?}", config.workflow.duplicate_policy),
                ),
                DetailRow::new("Allow reopen", config.workflow.allow_reopen),
                DetailRow::new(
                    "Guard degraded writes",
                    config.workflow.guard_degraded_writes,
                ),
                DetailRow::new("Report dir", config.report_dir().display()),
            ]
        },
        format,
    )
}
