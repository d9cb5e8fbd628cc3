//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One aligned line per outdated package: name, current -> latest
//! - Semantic version change type indication (major/minor/patch)
//! - The wanted version when it lags behind latest

use crate::domain::{OutdatedEntry, OutdatedReport, PackageManagerKind};
use crate::output::{Palette, ReportFormatter, NOTHING_TO_UPDATE};
use semver::Version;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        match (parse_version(old), parse_version(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the label styled by `palette`
    pub fn styled_label(&self, palette: &Palette) -> String {
        let label = self.label();
        match self {
            VersionChangeType::Major => palette.breaking(label),
            VersionChangeType::Minor => palette.notice(label),
            VersionChangeType::Patch => palette.success(label),
            VersionChangeType::Unknown => palette.dimmed(label),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Lenient semver parse: accepts a leading `v` and `1` / `1.2` shorthands
fn parse_version(raw: &str) -> Option<Version> {
    let v = raw.trim();
    let v = v.strip_prefix('v').unwrap_or(v);
    if let Ok(version) = Version::parse(v) {
        return Some(version);
    }

    let mut parts = v.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, 0))
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    palette: Palette,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Format a single package line
    fn format_entry_line(
        &self,
        entry: &OutdatedEntry,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let current = entry.current_display();
        let change_type = match &entry.current {
            Some(current) => VersionChangeType::from_versions(current, &entry.latest),
            None => VersionChangeType::Unknown,
        };

        let name = format!("{:width$}", entry.name, width = max_name_len);
        let wanted = entry
            .wanted_if_behind_latest()
            .map(|w| self.palette.dimmed(&format!(" (wanted {})", w)))
            .unwrap_or_default();

        let label = change_type.styled_label(&self.palette);

        writeln!(
            writer,
            "  {}  {} -> {}{} [{}]",
            self.palette.package(&name),
            self.palette.current(current),
            self.palette.latest(&entry.latest),
            wanted,
            label
        )
    }
}

impl ReportFormatter for TextFormatter {
    fn format(
        &self,
        _manager: PackageManagerKind,
        report: Option<&OutdatedReport>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let report = match report {
            Some(report) if !report.is_empty() => report,
            _ => return writeln!(writer, "{}", self.palette.notice(NOTHING_TO_UPDATE)),
        };

        writeln!(writer, "{}", self.palette.heading("Outdated packages:"))?;

        let max_name_len = report.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in report {
            self.format_entry_line(entry, max_name_len, writer)?;
        }

        Ok(())
    }
}
