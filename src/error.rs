//! Error types for the restore step
//!
//! All modules use `StepResult<T>` as their return type. Errors are split
//! by the phase that raised them so the binary can report which part of
//! the step failed.

use std::fmt;
use thiserror::Error;

/// Result type alias for step operations
pub type StepResult<T> = Result<T, StepError>;

/// Phase of the step an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Parsing and validating inputs
    Configuration,
    /// Delegated cache restore
    Restore,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Restore => write!(f, "restore"),
        }
    }
}

/// All errors that can terminate the step
#[derive(Error, Debug)]
pub enum StepError {
    #[error("failed to parse inputs: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Restore(#[from] RestoreError),
}

impl StepError {
    /// The phase that failed
    pub fn phase(&self) -> Phase {
        match self {
            Self::Config(_) => Phase::Configuration,
            Self::Restore(_) => Phase::Restore,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(ConfigError::MissingInput { .. })
            | Self::Config(ConfigError::Invalid(_)) => {
                Some("Set the `verbose` and `retries` step inputs")
            }
            Self::Config(ConfigError::InvalidBool { .. }) => {
                Some("Set `verbose` to one of true/false, yes/no or 1/0")
            }
            Self::Config(ConfigError::InvalidInteger { .. }) => {
                Some("Set `retries` to a whole number of full retries, such as 0 or 2")
            }
            Self::Restore(RestoreError::Spawn { .. }) => {
                Some("Point --cache-client (or RESTORE_CACHE_CLIENT) at the cache client binary")
            }
            _ => None,
        }
    }
}

/// Step input errors, raised before any restore attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required input `{name}` is not set")]
    MissingInput { name: String },

    #[error("input `{name}`: `{value}` is not a boolean (expected true/false, yes/no or 1/0)")]
    InvalidBool { name: String, value: String },

    #[error("input `{name}`: `{value}` is not a non-negative integer")]
    InvalidInteger { name: String, value: String },

    #[error("{}", join_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors reported by a cache restorer
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("failed to start cache client {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache restore failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: String },

    #[error("cache restore failed: {0}")]
    Failed(String),
}

/// Errors from running an external command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
