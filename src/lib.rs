//! Restore Gradle Cache - CI step
//!
//! Builds the Gradle cache key templates and hands a restore request to
//! an external cache client.

pub mod cache;
pub mod cli;
pub mod command;
pub mod env;
pub mod error;
pub mod input;
pub mod log;
pub mod step;

pub use error::{StepError, StepResult};
pub use step::RestoreCacheStep;
