//! Restorer seam and the cache-client binding
//!
//! The step only builds a [`RestoreRequest`]. Locating, fetching and
//! extracting the archive is the restorer's job. [`CommandRestorer`]
//! hands the request to an external cache client program and re-runs it
//! for each full retry.

use crate::cache::request::RestoreRequest;
use crate::command::{CommandFactory, CommandOutput, CommandSpec};
use crate::env::EnvRepository;
use crate::error::{CommandError, RestoreError};
use crate::log::Logger;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Program used when no cache client is configured
pub const DEFAULT_CACHE_CLIENT: &str = "cache-client";

/// Environment variable naming the cache client program
pub const CACHE_CLIENT_ENV_VAR: &str = "RESTORE_CACHE_CLIENT";

/// Environment variable carrying the JSON request to the cache client
pub const REQUEST_ENV_VAR: &str = "CACHE_RESTORE_REQUEST";

/// Max number of client output lines to include in error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Locates and materializes a cache for a request
///
/// A missing cache is not an error: implementations return `Ok(())` when
/// neither key matches.
#[async_trait]
pub trait Restorer: Send + Sync {
    async fn restore(&self, request: &RestoreRequest) -> Result<(), RestoreError>;
}

/// Builds a restorer from the step's collaborators
pub trait RestorerFactory: Send + Sync {
    fn create(
        &self,
        env: Arc<dyn EnvRepository>,
        logger: Arc<dyn Logger>,
        commands: Arc<dyn CommandFactory>,
    ) -> Box<dyn Restorer>;
}

/// Factory for [`CommandRestorer`]
#[derive(Debug, Clone, Default)]
pub struct CommandRestorerFactory {
    client: Option<String>,
}

impl CommandRestorerFactory {
    /// `client` overrides the `RESTORE_CACHE_CLIENT` lookup
    pub fn new(client: Option<String>) -> Self {
        Self { client }
    }

    /// Cache client program: explicit path, then `RESTORE_CACHE_CLIENT`, then the default
    pub fn client_for(&self, env: &dyn EnvRepository) -> String {
        self.client
            .clone()
            .or_else(|| env.get(CACHE_CLIENT_ENV_VAR).filter(|c| !c.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_CACHE_CLIENT.to_string())
    }
}

impl RestorerFactory for CommandRestorerFactory {
    fn create(
        &self,
        env: Arc<dyn EnvRepository>,
        logger: Arc<dyn Logger>,
        commands: Arc<dyn CommandFactory>,
    ) -> Box<dyn Restorer> {
        let client = self.client_for(&*env);
        Box::new(CommandRestorer::new(client, logger, commands).with_env(env.list()))
    }
}

/// Restorer that runs `<client> restore` once per attempt
///
/// Variables passed to [`with_env`](Self::with_env) are layered into the
/// client's environment ahead of `CACHE_RESTORE_REQUEST`, which always wins.
pub struct CommandRestorer {
    client: String,
    env: Vec<(String, String)>,
    logger: Arc<dyn Logger>,
    commands: Arc<dyn CommandFactory>,
}

impl CommandRestorer {
    pub fn new(
        client: impl Into<String>,
        logger: Arc<dyn Logger>,
        commands: Arc<dyn CommandFactory>,
    ) -> Self {
        Self {
            client: client.into(),
            env: Vec::new(),
            logger,
            commands,
        }
    }

    /// Environment handed to the client on every attempt
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    fn command(&self, request: &RestoreRequest) -> Result<CommandSpec, RestoreError> {
        let payload = serde_json::to_string(request)
            .map_err(|e| RestoreError::Failed(format!("encoding request: {}", e)))?;
        let spec = self
            .env
            .iter()
            .filter(|(key, _)| key != REQUEST_ENV_VAR)
            .fold(CommandSpec::new(&self.client).arg("restore"), |spec, (key, value)| {
                spec.env(key, value)
            });
        Ok(spec.env(REQUEST_ENV_VAR, payload))
    }

    fn forward_output(&self, output: &CommandOutput) {
        for line in output.stdout.lines().chain(output.stderr.lines()) {
            self.logger.debug(line);
        }
    }
}

#[async_trait]
impl Restorer for CommandRestorer {
    async fn restore(&self, request: &RestoreRequest) -> Result<(), RestoreError> {
        let spec = self.command(request)?;
        let attempts = request.max_attempts();
        let mut last = String::new();

        for attempt in 1..=attempts {
            if attempt > 1 {
                self.logger
                    .info(&format!("Retrying cache restore ({}/{})", attempt, attempts));
            }
            self.logger.debug(&format!("$ {}", spec.display()));

            let output = self.commands.run(&spec).await.map_err(|e| match e {
                CommandError::Spawn { program, source } => RestoreError::Spawn { program, source },
            })?;
            self.forward_output(&output);

            if output.success() {
                debug!(attempt, "Cache client succeeded");
                return Ok(());
            }

            last = failure_summary(&output);
            self.logger.warn(&format!(
                "Cache restore attempt {}/{} failed: {}",
                attempt,
                attempts,
                exit_description(&output)
            ));
        }

        Err(RestoreError::Exhausted { attempts, last })
    }
}

fn exit_description(output: &CommandOutput) -> String {
    match output.code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Exit status plus the useful tail of the client's output.
fn failure_summary(output: &CommandOutput) -> String {
    let lines: Vec<&str> = output
        .stdout
        .lines()
        .chain(output.stderr.lines())
        .collect();
    let tail = &lines[lines.len().saturating_sub(ERROR_TAIL_LINES)..];
    if tail.is_empty() {
        exit_description(output)
    } else {
        format!("{}\n{}", exit_description(output), tail.join("\n"))
    }
}
