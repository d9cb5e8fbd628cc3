//! Output formatting for outdated reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - The `Palette` coloring strategy shared with the updater

mod json;
mod palette;
mod text;

pub use json::JsonFormatter;
pub use palette::Palette;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::{OutdatedReport, PackageManagerKind};
use std::io::Write;

/// Message printed whenever there is nothing outdated
pub const NOTHING_TO_UPDATE: &str = "No packages to update.";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            color: !no_color,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.color)
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Render `report`; `None` is treated like an empty report
    fn format(
        &self,
        manager: PackageManagerKind,
        report: Option<&OutdatedReport>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create a report formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn ReportFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.palette())),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
