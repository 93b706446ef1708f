//! The restore step
//!
//! Parses inputs, logs the key templates, sets debug verbosity and hands
//! a [`RestoreRequest`] to the restorer. The restorer's outcome is the
//! step's outcome.

use crate::cache::{CommandRestorerFactory, RestoreRequest, RestorerFactory, CACHE_KEYS};
use crate::command::CommandFactory;
use crate::env::EnvRepository;
use crate::error::StepResult;
use crate::input::InputParser;
use crate::log::Logger;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Where a step run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Configuring,
    Restoring,
    Succeeded,
    Failed,
}

impl StepState {
    /// Next state after the current phase finished with `ok`
    pub fn advance(self, ok: bool) -> Self {
        match (self, ok) {
            (Self::Configuring, true) => Self::Restoring,
            (Self::Restoring, true) => Self::Succeeded,
            (Self::Configuring | Self::Restoring, false) => Self::Failed,
            (terminal, _) => terminal,
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuring => write!(f, "configuring"),
            Self::Restoring => write!(f, "restoring"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Restores the Gradle cache for the current build
pub struct RestoreCacheStep {
    logger: Arc<dyn Logger>,
    input_parser: Arc<dyn InputParser>,
    env_repo: Arc<dyn EnvRepository>,
    cmd_factory: Arc<dyn CommandFactory>,
    restorers: Arc<dyn RestorerFactory>,
}

impl RestoreCacheStep {
    /// Create a step that restores through the default cache client
    pub fn new(
        logger: Arc<dyn Logger>,
        input_parser: Arc<dyn InputParser>,
        env_repo: Arc<dyn EnvRepository>,
        cmd_factory: Arc<dyn CommandFactory>,
    ) -> Self {
        Self {
            logger,
            input_parser,
            env_repo,
            cmd_factory,
            restorers: Arc::new(CommandRestorerFactory::default()),
        }
    }

    /// Replace how the restorer is built
    pub fn with_restorer_factory(mut self, restorers: Arc<dyn RestorerFactory>) -> Self {
        self.restorers = restorers;
        self
    }

    /// Run the step once
    pub async fn run(&self) -> StepResult<()> {
        let mut state = StepState::Configuring;
        debug!(%state, "Step started");

        let input = match self.input_parser.parse() {
            Ok(input) => input,
            Err(e) => {
                state = state.advance(false);
                debug!(%state, "Input parsing failed");
                return Err(e.into());
            }
        };

        input.print(&*self.logger);
        self.logger.println();
        self.logger.info("Cache keys:");
        self.logger.info(&CACHE_KEYS.join("\n"));
        self.logger.println();

        self.logger.enable_debug_log(input.verbose);

        state = state.advance(true);
        debug!(%state, retries = input.retries, "Delegating to restorer");

        let restorer = self.restorers.create(
            self.env_repo.clone(),
            self.logger.clone(),
            self.cmd_factory.clone(),
        );
        let request = RestoreRequest::from_input(&input);
        let result = restorer.restore(&request).await;

        state = state.advance(result.is_ok());
        debug!(%state, "Step finished");

        result.map_err(Into::into)
    }
}
