use anyhow::Context;
use clap::Parser;
use contact_importer::cli::{self, Args};
use std::process;
use tokio_util::sync::CancellationToken;

/// Exit code when the import finished but reported diagnostics
const EXIT_WITH_DIAGNOSTICS: i32 = 2;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    match run(args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(EXIT_WITH_DIAGNOSTICS),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Ctrl-C stops reading; lines already read are still reported
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, stopping import...");
                signal_token.cancel();
            }
        });

        let summary = cli::run(&args, cancellation_token)
            .await
            .with_context(|| format!("Import of {} failed", args.input.display()))?;

        Ok(summary.success)
    })
}
