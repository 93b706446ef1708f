//! CLI command implementations

pub mod keys;
pub mod run;

pub use keys::execute as keys;
pub use run::execute as run;
