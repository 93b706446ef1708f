//! Step input parsing
//!
//! Inputs arrive as environment variables. Accepted spellings:
//!
//! | Type | Accepted values (case-insensitive, trimmed) |
//! |------|---------------------------------------------|
//! | bool | `true`/`yes`/`1`, `false`/`no`/`0` |
//! | u32  | base-10 digits, optional leading `+` |
//!
//! An empty value is the same as an unset one.

use crate::env::EnvRepository;
use crate::error::ConfigError;
use crate::log::Logger;
use std::sync::Arc;

/// Name of the verbosity input
pub const VERBOSE_INPUT: &str = "verbose";
/// Name of the retry count input
pub const RETRIES_INPUT: &str = "retries";

/// Resolved step inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    /// Enable debug logging
    pub verbose: bool,
    /// Additional full restore attempts after a failure
    pub retries: u32,
}

impl Input {
    /// Echo the resolved configuration
    pub fn print(&self, logger: &dyn Logger) {
        logger.info("Configuration:");
        logger.info(&format!("- {}: {}", VERBOSE_INPUT, self.verbose));
        logger.info(&format!("- {}: {}", RETRIES_INPUT, self.retries));
    }
}

/// Maps configuration into typed inputs
pub trait InputParser: Send + Sync {
    fn parse(&self) -> Result<Input, ConfigError>;
}

/// Parses inputs from an environment repository
pub struct EnvInputParser {
    env: Arc<dyn EnvRepository>,
}

impl EnvInputParser {
    pub fn new(env: Arc<dyn EnvRepository>) -> Self {
        Self { env }
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.env
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingInput {
                name: name.to_string(),
            })
    }
}

impl InputParser for EnvInputParser {
    fn parse(&self) -> Result<Input, ConfigError> {
        let verbose = self
            .required(VERBOSE_INPUT)
            .and_then(|v| parse_bool(VERBOSE_INPUT, &v));
        let retries = self
            .required(RETRIES_INPUT)
            .and_then(|v| parse_u32(RETRIES_INPUT, &v));

        match (verbose, retries) {
            (Ok(verbose), Ok(retries)) => Ok(Input { verbose, retries }),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(a), Err(b)) => Err(ConfigError::Invalid(vec![a, b])),
        }
    }
}

/// Coerce a boolean input value
pub fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Coerce a non-negative integer input value
pub fn parse_u32(name: &str, value: &str) -> Result<u32, ConfigError> {
    // u32::from_str accepts a leading '+' and rejects '-'
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidInteger {
        name: name.to_string(),
        value: value.to_string(),
    })
}
