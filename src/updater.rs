//! Upgrading outdated packages to their latest release
//!
//! Each package gets its own `<manager> add|install <pkg>@latest` call.
//! Calls run strictly one after another in report order, and a failing
//! package never stops the remaining ones.

use crate::domain::{OutdatedReport, PackageManagerKind};
use crate::error::UpdateError;
use crate::output::{Palette, NOTHING_TO_UPDATE};
use crate::progress::Progress;
use crate::runner::CommandRunner;
use std::io::Write;
use std::path::Path;

/// Result of upgrading a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Package that was upgraded
    pub package: String,
    /// The command that was executed
    pub command: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Failure detail (manager stderr or spawn error)
    pub error: Option<String>,
}

impl UpdateOutcome {
    /// Create a successful outcome
    pub fn success(package: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            command: command.into(),
            success: true,
            error: None,
        }
    }

    /// Create a failed outcome
    pub fn failure(
        package: impl Into<String>,
        command: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            command: command.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Outcomes of one update run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub outcomes: Vec<UpdateOutcome>,
}

impl UpdateSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn any_failed(&self) -> bool {
        self.failed() > 0
    }
}

/// Applies `@latest` upgrades through a `CommandRunner`
pub struct Updater<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    palette: Palette,
    show_progress: bool,
}

impl<'a, R: CommandRunner + ?Sized> Updater<'a, R> {
    pub fn new(runner: &'a R, palette: Palette) -> Self {
        Self {
            runner,
            palette,
            show_progress: false,
        }
    }

    /// Show a spinner while each install command runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Upgrade every package in `report`, one at a time
    ///
    /// Progress goes to `out`, per-package failures to `err`. An absent or
    /// empty report prints the nothing-to-update message and runs nothing.
    pub async fn update_packages(
        &self,
        kind: PackageManagerKind,
        report: Option<&OutdatedReport>,
        dir: &Path,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<UpdateSummary, UpdateError> {
        let commands = kind
            .commands()
            .ok_or(UpdateError::UnsupportedManager { kind })?;

        let report = match report {
            Some(report) if !report.is_empty() => report,
            _ => {
                writeln!(out, "{}", self.palette.notice(NOTHING_TO_UPDATE))?;
                return Ok(UpdateSummary::default());
            }
        };

        writeln!(out, "{}", self.palette.success("Updating packages..."))?;

        let mut summary = UpdateSummary::default();
        for package in report.package_names() {
            let invocation = commands.install_latest_invocation(package);
            let command = invocation.to_string();
            writeln!(out, "{}", self.palette.package(&format!("Running: {}", command)))?;
            out.flush()?;

            let mut progress = Progress::new(self.show_progress);
            progress.spinner(&format!("Installing {}@latest", package));
            let result = self.runner.run(&invocation, dir).await;
            progress.finish_and_clear();

            let outcome = match result {
                Ok(output) if output.success() => UpdateOutcome::success(package, command),
                Ok(output) => {
                    let detail = if output.stderr.trim().is_empty() {
                        match output.code {
                            Some(code) => format!("exited with code {}", code),
                            None => "terminated by signal".to_string(),
                        }
                    } else {
                        output.stderr.trim().to_string()
                    };
                    UpdateOutcome::failure(package, command, detail)
                }
                Err(e) => UpdateOutcome::failure(package, command, e.to_string()),
            };

            match &outcome.error {
                None => writeln!(
                    out,
                    "{}",
                    self.palette.success(&format!("Updated {}", package))
                )?,
                Some(detail) => writeln!(
                    err,
                    "{}",
                    self.palette.failure(&format!(
                        "Failed to update {}: {} (ran `{}`)",
                        package, detail, outcome.command
                    ))
                )?,
            }

            summary.outcomes.push(outcome);
        }

        let totals = format!(
            "Updated {} of {} packages",
            summary.succeeded(),
            summary.outcomes.len()
        );
        if summary.any_failed() {
            writeln!(
                out,
                "{}",
                self.palette
                    .failure(&format!("{} ({} failed)", totals, summary.failed()))
            )?;
        } else {
            writeln!(out, "{}", self.palette.success(&totals))?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutdatedEntry;
    use crate::runner::testing::ScriptedRunner;

    fn report(names: &[&str]) -> OutdatedReport {
        names
            .iter()
            .map(|name| OutdatedEntry::new(*name, Some("1.0.0".into()), None, "2.0.0"))
            .collect()
    }

    async fn run(
        runner: &ScriptedRunner,
        kind: PackageManagerKind,
        report: Option<&OutdatedReport>,
    ) -> (Result<UpdateSummary, UpdateError>, String, String) {
        let updater = Updater::new(runner, Palette::plain());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = updater
            .update_packages(kind, report, Path::new("."), &mut out, &mut err)
            .await;
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_update_summary_counts() {
        let summary = UpdateSummary {
            outcomes: vec![
                UpdateOutcome::success("a", "npm install a@latest"),
                UpdateOutcome::failure("b", "npm install b@latest", "E404"),
            ],
        };
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(summary.any_failed());
        assert!(!UpdateSummary::default().any_failed());
    }

    #[tokio::test]
    async fn test_absent_report_runs_nothing() {
        let runner = ScriptedRunner::new();
        let (result, out, err) = run(&runner, PackageManagerKind::Npm, None).await;

        assert!(result.unwrap().outcomes.is_empty());
        assert_eq!(out, "No packages to update.\n");
        assert!(err.is_empty());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_report_runs_nothing() {
        let runner = ScriptedRunner::new();
        let empty = OutdatedReport::new();
        let (result, out, _) = run(&runner, PackageManagerKind::Yarn, Some(&empty)).await;

        assert!(result.unwrap().outcomes.is_empty());
        assert_eq!(out, "No packages to update.\n");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_manager_is_rejected() {
        let runner = ScriptedRunner::new();
        let report = report(&["left-pad"]);
        let (result, _, _) = run(&runner, PackageManagerKind::Unknown, Some(&report)).await;

        assert!(matches!(
            result,
            Err(UpdateError::UnsupportedManager {
                kind: PackageManagerKind::Unknown
            })
        ));
        assert!(runner.calls().is_empty());
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_one_call_per_package_in_report_order() {
        let runner = ScriptedRunner::new();
        let report = report(&["typescript", "left-pad", "react"]);
        let (result, out, _) = run(&runner, PackageManagerKind::Pnpm, Some(&report)).await;

        let commands: Vec<String> = runner.calls().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            commands,
            vec![
                "pnpm add left-pad@latest",
                "pnpm add react@latest",
                "pnpm add typescript@latest",
            ]
        );

        let summary = result.unwrap();
        assert_eq!(summary.succeeded(), 3);
        assert!(out.contains("Running: pnpm add left-pad@latest\nUpdated left-pad\n"));
        assert!(out.ends_with("Updated 3 of 3 packages\n"));
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_npm_uses_install() {
        let runner = ScriptedRunner::new();
        let report = report(&["lodash"]);
        run(&runner, PackageManagerKind::Npm, Some(&report)).await.0.unwrap();

        assert_eq!(runner.calls()[0].to_string(), "npm install lodash@latest");
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let runner = ScriptedRunner::new()
            .respond_ok(0, "", "")
            .respond_ok(1, "", "error Couldn't find package \"b\" on the \"npm\" registry.")
            .respond(Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
            .respond_ok(0, "", "");
        let report = report(&["a", "b", "c", "d"]);
        let (result, out, err) = run(&runner, PackageManagerKind::Yarn, Some(&report)).await;

        assert_eq!(runner.calls().len(), 4);

        let summary = result.unwrap();
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 2);
        assert!(!summary.outcomes[1].success);
        assert!(summary.outcomes[1]
            .error
            .as_deref()
            .unwrap()
            .contains("Couldn't find package"));
        assert_eq!(
            summary.outcomes[2].error.as_deref(),
            Some("permission denied")
        );

        assert!(err.contains("Failed to update b:"));
        assert!(err.contains("Failed to update c: permission denied"));
        let yarn_add_c = PackageManagerKind::Yarn
            .commands()
            .unwrap()
            .install_latest_invocation("c");
        assert!(err.contains(&format!("permission denied (ran `{}`)", yarn_add_c)));
        assert!(out.contains("Updated d"));
        assert!(out.ends_with("Updated 2 of 4 packages (2 failed)\n"));
    }

    #[tokio::test]
    async fn test_failure_without_stderr_reports_exit_code() {
        let runner = ScriptedRunner::new().respond_ok(7, "", "");
        let report = report(&["a"]);
        let (result, _, err) = run(&runner, PackageManagerKind::Npm, Some(&report)).await;

        let summary = result.unwrap();
        assert_eq!(
            summary.outcomes[0].error.as_deref(),
            Some("exited with code 7")
        );
        assert!(err.contains("exited with code 7"));
    }
}
