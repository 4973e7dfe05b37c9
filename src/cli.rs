//! Command-line interface components.

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::services::contact_csv_parser::ContactCsvParser;
use crate::app::services::contact_import::{ContactImporter, ImportSummary, InMemoryContactStore};
use crate::config::ImportConfig;
use crate::error::Result;

#[derive(Parser, Debug, Clone)]
#[command(name = "contact-importer")]
#[command(about = "Import contacts from CSV and report every problem line by line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// CSV file with Name, DateOfBirth, Married, Phone, Salary columns
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format for the import report
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Number of concurrent coercion workers (1 = sequential)
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Lines buffered per parallel coercion batch
    #[arg(long = "batch-size", value_name = "LINES")]
    pub batch_size: Option<usize>,

    /// Treat the first line as data even if it looks like a header
    #[arg(long = "no-header-detection")]
    pub no_header_detection: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format options for the import report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Build the parser configuration: defaults, environment, then flags
    pub fn to_config(&self) -> Result<ImportConfig> {
        let mut config = ImportConfig::from_env()?;

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if self.no_header_detection {
            config = config.without_header_detection();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Install the tracing subscriber; `RUST_LOG` takes precedence over flags
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contact_importer={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run an import for the parsed arguments and print the report
pub async fn run(args: &Args, cancellation_token: CancellationToken) -> Result<ImportSummary> {
    let config = args.to_config()?;
    debug!("Import configuration: {:?}", config);

    let importer = ContactImporter::new(ContactCsvParser::new(config), InMemoryContactStore::new());
    let summary = importer
        .import_file(&args.input, &cancellation_token)
        .await?;

    match args.output_format {
        OutputFormat::Human => print_human_report(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(summary)
}

fn print_human_report(summary: &ImportSummary) {
    if summary.success {
        println!("{}", summary.message.bright_green().bold());
    } else {
        println!("{}", summary.message.bright_yellow().bold());
    }

    let stats = &summary.stats;
    println!(
        "  {} data lines, {} accepted, {} rejected ({:.1}% success)",
        stats.lines_read,
        stats.records_parsed,
        stats.lines_rejected,
        stats.success_rate()
    );
    if stats.header_skipped {
        println!("  {}", "Header line detected and skipped".bright_black());
    }

    if !summary.diagnostics.is_empty() {
        println!();
        println!("{}", "Problems found:".bright_red().bold());
        for diagnostic in &summary.diagnostics {
            println!("  - {}", diagnostic);
        }
    }
}
