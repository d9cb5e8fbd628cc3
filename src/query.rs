//! Outdated dependency query
//!
//! Runs `<manager> outdated --json` and turns whatever the manager prints
//! into an `OutdatedReport`. Two output families are understood:
//! - npm/pnpm: one JSON object keyed by package name
//! - yarn classic: newline-delimited JSON events, rows in a `table` event
//!
//! npm and pnpm exit with status 1 whenever something is outdated, so the
//! exit code alone never decides success; the output does.

use crate::domain::{OutdatedEntry, OutdatedReport, PackageManagerKind};
use crate::error::QueryError;
use crate::runner::CommandRunner;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Why output could not be turned into a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputProblem {
    /// Output is not in any recognised shape
    Malformed(String),
    /// The manager emitted a structured error instead of results
    Reported(String),
}

/// Per-package object in npm/pnpm output
#[derive(Debug, Deserialize)]
struct RawEntry {
    current: Option<String>,
    wanted: Option<String>,
    latest: Option<String>,
}

/// npm prints an array when a package is installed in several locations
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDetails {
    Single(RawEntry),
    Multiple(Vec<RawEntry>),
}

/// Query the package manager for outdated dependencies of `dir`
pub async fn query_outdated<R: CommandRunner + ?Sized>(
    runner: &R,
    kind: PackageManagerKind,
    dir: &Path,
) -> Result<OutdatedReport, QueryError> {
    let commands = kind
        .commands()
        .ok_or(QueryError::UnsupportedManager { kind })?;
    let invocation = commands.outdated_invocation();
    let command = invocation.to_string();

    let output = runner
        .run(&invocation, dir)
        .await
        .map_err(|e| QueryError::spawn(&command, e))?;

    if output.stdout.trim().is_empty() {
        // Exit 1 is "outdated found"; anything else without output is a failure
        let quiet_exit = matches!(output.code, Some(0) | Some(1));
        if !quiet_exit || (!output.success() && !output.stderr.trim().is_empty()) {
            let stderr = match output.stderr.trim() {
                "" => "no output".to_string(),
                stderr => stderr.to_string(),
            };
            return Err(QueryError::CommandFailed {
                command,
                code: output.code,
                stderr,
            });
        }
        return Ok(OutdatedReport::new());
    }

    match parse_outdated_output(&output.stdout) {
        Ok(report) => Ok(report),
        Err(OutputProblem::Reported(message)) => {
            Err(QueryError::ManagerReported { command, message })
        }
        Err(OutputProblem::Malformed(message)) => {
            if output.success() {
                Err(QueryError::parse(command, message))
            } else {
                let stderr = if output.stderr.trim().is_empty() {
                    output.stdout.trim().to_string()
                } else {
                    output.stderr.trim().to_string()
                };
                Err(QueryError::CommandFailed {
                    command,
                    code: output.code,
                    stderr,
                })
            }
        }
    }
}

/// Parse the structured output of an `outdated --json` command
///
/// Whitespace-only output is an empty report.
pub fn parse_outdated_output(stdout: &str) -> Result<OutdatedReport, OutputProblem> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(OutdatedReport::new());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) if is_event(&map) => parse_event_stream(vec![map]),
        Ok(Value::Object(map)) => parse_object_map(map),
        Ok(other) => Err(OutputProblem::Malformed(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
        Err(whole_err) => {
            let mut events = Vec::new();
            for line in trimmed.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<Value>(line) {
                    Ok(Value::Object(map)) if is_event(&map) => events.push(map),
                    _ => return Err(OutputProblem::Malformed(whole_err.to_string())),
                }
            }
            parse_event_stream(events)
        }
    }
}

/// npm/pnpm shape: `{ "<name>": { "current", "wanted", "latest", ... } }`
fn parse_object_map(map: Map<String, Value>) -> Result<OutdatedReport, OutputProblem> {
    if let Some(message) = npm_error_message(&map) {
        return Err(OutputProblem::Reported(message));
    }

    let raw: BTreeMap<String, RawDetails> = serde_json::from_value(Value::Object(map))
        .map_err(|e| OutputProblem::Malformed(e.to_string()))?;

    let mut report = OutdatedReport::new();
    for (name, details) in raw {
        let entry = match details {
            RawDetails::Single(entry) => entry,
            RawDetails::Multiple(entries) => entries.into_iter().next().ok_or_else(|| {
                OutputProblem::Malformed(format!("package '{}' has no entries", name))
            })?,
        };

        let latest = entry.latest.or_else(|| entry.wanted.clone()).ok_or_else(|| {
            OutputProblem::Malformed(format!("package '{}' has no latest version", name))
        })?;

        report.insert(OutdatedEntry::new(name, entry.current, entry.wanted, latest));
    }

    Ok(report)
}

/// npm reports failures as `{"error": {"code": ..., "summary": ..., "detail": ...}}`
fn npm_error_message(map: &Map<String, Value>) -> Option<String> {
    let error = map.get("error")?.as_object()?;
    if !error.contains_key("code") && !error.contains_key("summary") {
        return None;
    }

    let summary = error
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let code = error.get("code").and_then(Value::as_str);

    Some(match (code, summary) {
        (Some(code), Some(summary)) => format!("{}: {}", code, summary),
        (None, Some(summary)) => summary.to_string(),
        (Some(code), None) => code.to_string(),
        (None, None) => "unknown error".to_string(),
    })
}

fn is_event(map: &Map<String, Value>) -> bool {
    map.get("type").is_some_and(Value::is_string) && map.contains_key("data")
}

/// yarn classic shape: one JSON event per line
fn parse_event_stream(events: Vec<Map<String, Value>>) -> Result<OutdatedReport, OutputProblem> {
    let mut report = OutdatedReport::new();

    for event in events {
        match event.get("type").and_then(Value::as_str) {
            Some("table") => {
                let data = event.get("data").cloned().unwrap_or(Value::Null);
                for entry in parse_table(&data)? {
                    report.insert(entry);
                }
            }
            Some("error") => {
                let message = event
                    .get("data")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                return Err(OutputProblem::Reported(message));
            }
            _ => {}
        }
    }

    Ok(report)
}

fn parse_table(data: &Value) -> Result<Vec<OutdatedEntry>, OutputProblem> {
    let malformed = |what: &str| OutputProblem::Malformed(format!("yarn table {}", what));

    let head = data
        .get("head")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("has no head"))?;
    let body = data
        .get("body")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("has no body"))?;

    let column = |label: &str| {
        head.iter()
            .position(|h| h.as_str().is_some_and(|h| h.eq_ignore_ascii_case(label)))
    };
    let package_col = column("Package").ok_or_else(|| malformed("has no Package column"))?;
    let latest_col = column("Latest").ok_or_else(|| malformed("has no Latest column"))?;
    let current_col = column("Current");
    let wanted_col = column("Wanted");

    let mut entries = Vec::with_capacity(body.len());
    for row in body {
        let cells = row.as_array().ok_or_else(|| malformed("row is not an array"))?;
        let cell = |idx: usize| cells.get(idx).and_then(Value::as_str).map(str::to_string);

        let name = cell(package_col).ok_or_else(|| malformed("row has no package name"))?;
        let latest = cell(latest_col)
            .ok_or_else(|| OutputProblem::Malformed(format!("package '{}' has no latest version", name)))?;

        entries.push(OutdatedEntry::new(
            name,
            current_col.and_then(cell),
            wanted_col.and_then(cell),
            latest,
        ));
    }

    Ok(entries)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
