//! pkgup - JavaScript package manager outdated checker
//!
//! Detects npm, yarn or pnpm from the project's lockfile, asks it for
//! outdated dependencies, and prints them or upgrades them (`--update`).

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use pkgup::cli::CliArgs;
use pkgup::detector::require_package_manager;
use pkgup::output::{create_formatter, OutputConfig};
use pkgup::progress::Progress;
use pkgup::query::query_outdated;
use pkgup::runner::SystemCommandRunner;
use pkgup::updater::Updater;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("pkgup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        eprintln!(
            "Mode: {}",
            if args.update { "update" } else { "report" }
        );
    }

    let kind = require_package_manager(&args.path)?;

    let output_config = OutputConfig::from_cli(args.json, args.no_color);
    let palette = output_config.palette();

    if !args.json {
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "{}",
            palette.success(&format!("Detected package manager: {}", kind))
        )?;
        stdout.flush()?;
    }

    if args.verbose {
        if let Some(commands) = kind.commands() {
            eprintln!("Running: {}", commands.outdated_invocation());
        }
    }

    let runner = SystemCommandRunner::new();

    let mut progress = Progress::new(!args.json);
    progress.spinner("Checking for outdated packages...");
    let report = query_outdated(&runner, kind, &args.path).await;
    progress.finish_and_clear();
    let report = report.context("failed to query outdated packages")?;

    if args.verbose {
        eprintln!("Found {} outdated package(s)", report.len());
    }

    if args.update {
        let updater = Updater::new(&runner, palette).with_progress(true);
        let summary = updater
            .update_packages(
                kind,
                Some(&report),
                &args.path,
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await?;

        if summary.any_failed() {
            return Ok(ExitCode::FAILURE);
        }
    } else {
        let formatter = create_formatter(&output_config);
        let mut stdout = io::stdout().lock();
        formatter.format(kind, Some(&report), &mut stdout)?;
        stdout.flush()?;
    }

    Ok(ExitCode::SUCCESS)
}
