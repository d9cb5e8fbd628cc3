//! JSON output formatter for machine processing

use crate::domain::{OutdatedReport, PackageManagerKind};
use crate::output::ReportFormatter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    /// Detected package manager
    package_manager: PackageManagerKind,
    /// Outdated packages keyed by name
    packages: BTreeMap<&'a str, JsonPackage<'a>>,
}

/// JSON representation of one outdated package
#[derive(Serialize)]
struct JsonPackage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wanted: Option<&'a str>,
    latest: &'a str,
}

impl ReportFormatter for JsonFormatter {
    fn format(
        &self,
        manager: PackageManagerKind,
        report: Option<&OutdatedReport>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let packages = report
            .into_iter()
            .flat_map(|r| r.iter())
            .map(|entry| {
                (
                    entry.name.as_str(),
                    JsonPackage {
                        current: entry.current.as_deref(),
                        wanted: entry.wanted.as_deref(),
                        latest: &entry.latest,
                    },
                )
            })
            .collect();

        let output = JsonOutput {
            package_manager: manager,
            packages,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
