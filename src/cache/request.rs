//! Request handed to the restorer

use crate::cache::keys::cache_keys;
use crate::input::Input;
use serde::{Deserialize, Serialize};

/// Identifies this step to the shared restorer
pub const STEP_ID: &str = "restore-gradle-cache";

/// Everything the restorer needs for one restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestoreRequest {
    pub step_id: String,
    pub verbose: bool,
    /// Key templates, most specific first
    pub keys: Vec<String>,
    /// Additional full attempts after the first failure
    pub num_full_retries: u32,
}

impl RestoreRequest {
    /// Build the request for the given inputs
    pub fn from_input(input: &Input) -> Self {
        Self {
            step_id: STEP_ID.to_string(),
            verbose: input.verbose,
            keys: cache_keys(),
            num_full_retries: input.retries,
        }
    }

    /// Total attempts the restorer may make
    pub fn max_attempts(&self) -> u32 {
        self.num_full_retries.saturating_add(1)
    }
}
