//! Application error types using thiserror
//!
//! One enum per stage; `main` wraps them in `anyhow` with context:
//! - DetectError: Lockfile checks that could not be performed
//! - QueryError: Failures running or parsing the outdated query
//! - UpdateError: Update requests that cannot be attempted at all

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::PackageManagerKind;

/// Errors related to package manager detection
#[derive(Error, Debug)]
pub enum DetectError {
    /// None of the known lockfiles exist
    #[error("no supported package manager detected in {dir} (looked for {expected})")]
    NotDetected { dir: PathBuf, expected: String },

    /// A lockfile path could not be checked
    #[error("cannot access {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the outdated query
#[derive(Error, Debug)]
pub enum QueryError {
    /// The caller passed a kind with no command table entry
    #[error("unsupported package manager: {kind}")]
    UnsupportedManager { kind: PackageManagerKind },

    /// The process could not be started
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit without usable output
    #[error("'{command}' failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The package manager printed a JSON error object
    #[error("'{command}' reported an error: {message}")]
    ManagerReported { command: String, message: String },

    /// Output was neither empty nor a recognised JSON shape
    #[error("failed to parse output of '{command}': {message}")]
    Parse { command: String, message: String },
}

/// Errors related to applying updates
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The caller passed a kind with no command table entry
    #[error("unsupported package manager: {kind}")]
    UnsupportedManager { kind: PackageManagerKind },

    /// Writing progress to the output failed
    #[error("failed to write update progress: {0}")]
    Output(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

impl DetectError {
    /// Creates a new NotDetected error listing the lockfiles looked for
    pub fn not_detected(dir: impl Into<PathBuf>) -> Self {
        let expected = crate::domain::MANAGERS
            .iter()
            .map(|m| m.lockfile)
            .collect::<Vec<_>>()
            .join(", ");
        DetectError::NotDetected {
            dir: dir.into(),
            expected,
        }
    }

    /// Creates a new Access error
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DetectError::Access {
            path: path.into(),
            source,
        }
    }
}

impl QueryError {
    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        QueryError::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(command: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::Parse {
            command: command.into(),
            message: message.into(),
        }
    }
}
