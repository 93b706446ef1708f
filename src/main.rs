//! Restore Gradle Cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use restore_gradle_cache::cli::{Cli, Commands};
use restore_gradle_cache::error::StepResult;
use restore_gradle_cache::log::ConsoleLogger;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            eprintln!("{} {}", style("Failed phase:").red(), e.phase());
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StepResult<()> {
    let cli = Cli::parse();

    let (filter, handle) = reload::Layer::new(EnvFilter::new(&cli.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.selected_command() {
        Commands::Keys => {
            restore_gradle_cache::cli::commands::keys();
            Ok(())
        }
        Commands::Run => {
            let logger =
                Arc::new(ConsoleLogger::new().with_filter_handle(handle, cli.log_filter.clone()));
            restore_gradle_cache::cli::commands::run(logger, cli.cache_client.clone()).await
        }
    }
}
