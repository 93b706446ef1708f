//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "restore_gradle_cache=info";

/// Restore Gradle Cache - CI step
///
/// Restores the Gradle build cache saved by a previous build. Step inputs
/// are read from the `verbose` and `retries` environment variables.
#[derive(Parser, Debug)]
#[command(name = "restore-gradle-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Cache client program (falls back to RESTORE_CACHE_CLIENT, then `cache-client`)
    #[arg(long, global = true)]
    pub cache_client: Option<String>,

    /// Tracing filter for diagnostics on stderr
    #[arg(long, global = true, env = "RESTORE_CACHE_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Restore the cache (default)
    Run,

    /// Print the cache key templates
    Keys,
}

impl Cli {
    /// The command to run, `run` when none was given
    pub fn selected_command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}
