//! Subprocess execution for package manager commands
//!
//! This module provides:
//! - A `CommandRunner` seam so query and update logic can be tested
//!   without real package managers installed
//! - `SystemCommandRunner`, which spawns processes with tokio

use crate::domain::Invocation;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (`None` when killed by a signal)
    pub code: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// Create an output with the given exit code
    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for running external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` in `working_dir` and wait for it to finish
    ///
    /// `Err` means the process could not be started at all; a non-zero
    /// exit is reported through `CommandOutput::code`.
    async fn run(&self, invocation: &Invocation, working_dir: &Path)
        -> std::io::Result<CommandOutput>;
}

/// Runner that executes real commands
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        working_dir: &Path,
    ) -> std::io::Result<CommandOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(working_dir)
            .output()
            .await?;

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
    fn test_command_output_success() {
        assert!(CommandOutput::new(0, "", "").success());
        assert!(!CommandOutput::new(1, "{}", "").success());

        let killed = CommandOutput {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!killed.success());
    }

    #[tokio::test]
    async fn test_system_runner_missing_binary() {
        let runner = SystemCommandRunner::new();
        let invocation = Invocation::new("pkgup-definitely-not-a-real-binary", ["--json"]);
        let temp_dir = tempfile::tempdir().unwrap();

        let result = runner.run(&invocation, temp_dir.path()).await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_output_and_code() {
        let runner = SystemCommandRunner::new();
        let invocation = Invocation::new("sh", ["-c", "echo out; echo err >&2; exit 3"]);
        let temp_dir = tempfile::tempdir().unwrap();

        let output = runner.run(&invocation, temp_dir.path()).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_uses_working_dir() {
        let runner = SystemCommandRunner::new();
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "here").unwrap();

        let invocation = Invocation::new("cat", ["marker.txt"]);
        let output = runner.run(&invocation, temp_dir.path()).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "here");
    }

    #[tokio::test]
    async fn test_scripted_runner_records_calls() {
        let runner = testing::ScriptedRunner::new().respond_ok(1, "{}", "");
        let invocation = Invocation::new("npm", ["outdated", "--json"]);

        let output = runner.run(&invocation, Path::new(".")).await.unwrap();
        assert_eq!(output.code, Some(1));
        assert_eq!(runner.calls(), vec![invocation]);
    }
}
