//! External process execution
//!
//! The step never runs processes itself; the capability is handed to the
//! restorer so it can drive the cache client.

use crate::error::CommandError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A process to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra variables layered over the inherited environment
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Program and arguments joined for display
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external processes
#[async_trait]
pub trait CommandFactory: Send + Sync {
    /// Run the process to completion, capturing its output
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;
}

/// Runs processes with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandFactory;

#[async_trait]
impl CommandFactory for TokioCommandFactory {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        debug!("Executing: {}", spec.display());

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display() {
        let spec = CommandSpec::new("cache-client").arg("restore").env("A", "B");
        assert_eq!(spec.display(), "cache-client restore");
        assert_eq!(spec.env, vec![("A".to_string(), "B".to_string())]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_output_and_exit_code() {
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo \"$GREETING\"; echo oops >&2; exit 3")
            .env("GREETING", "hello");

        let output = TokioCommandFactory.run(&spec).await.unwrap();

        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let spec = CommandSpec::new("restore-gradle-cache-no-such-program");
        let err = TokioCommandFactory.run(&spec).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
