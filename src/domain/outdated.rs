//! Outdated dependency entries and the per-run report

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version drift of a single dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    /// Package name
    pub name: String,
    /// Installed version (`None` when the dependency is not installed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Highest version satisfying the declared range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wanted: Option<String>,
    /// Latest version published to the registry
    pub latest: String,
}

impl OutdatedEntry {
    pub fn new(
        name: impl Into<String>,
        current: Option<String>,
        wanted: Option<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current,
            wanted,
            latest: latest.into(),
        }
    }

    /// Current version for display, `missing` when not installed
    pub fn current_display(&self) -> &str {
        self.current.as_deref().unwrap_or("missing")
    }

    /// The wanted version if it is distinct from latest
    pub fn wanted_if_behind_latest(&self) -> Option<&str> {
        self.wanted
            .as_deref()
            .filter(|wanted| *wanted != self.latest)
    }
}

/// Outdated dependencies keyed by package name, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutdatedReport {
    entries: BTreeMap<String, OutdatedEntry>,
}

impl OutdatedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same name
    pub fn insert(&mut self, entry: OutdatedEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&OutdatedEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutdatedEntry> {
        self.entries.values()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<OutdatedEntry> for OutdatedReport {
    fn from_iter<T: IntoIterator<Item = OutdatedEntry>>(iter: T) -> Self {
        let mut report = OutdatedReport::new();
        for entry in iter {
            report.insert(entry);
        }
        report
    }
}

impl<'a> IntoIterator for &'a OutdatedReport {
    type Item = &'a OutdatedEntry;
    type IntoIter = std::collections::btree_map::Values<'a, String, OutdatedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, current: &str, latest: &str) -> OutdatedEntry {
        OutdatedEntry::new(name, Some(current.to_string()), None, latest)
    }

    #[test]
    fn test_report_is_keyed_by_name() {
        let mut report = OutdatedReport::new();
        report.insert(entry("lodash", "4.17.0", "4.17.21"));
        report.insert(entry("lodash", "4.17.1", "4.17.21"));

        assert_eq!(report.len(), 1);
        assert_eq!(
            report.get("lodash").unwrap().current.as_deref(),
            Some("4.17.1")
        );
    }

    #[test]
    fn test_iteration_is_sorted_by_name() {
        let report: OutdatedReport = vec![
            entry("react", "17.0.0", "18.2.0"),
            entry("axios", "0.27.0", "1.6.0"),
            entry("lodash", "4.17.0", "4.17.21"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = report.package_names().collect();
        assert_eq!(names, vec!["axios", "lodash", "react"]);
    }

    #[test]
    fn test_empty_report() {
        let report = OutdatedReport::new();
        assert!(report.is_empty());
        assert_eq!(report.iter().count(), 0);
    }

    #[test]
    fn test_current_display_missing() {
        let e = OutdatedEntry::new("left-pad", None, None, "1.3.0");
        assert_eq!(e.current_display(), "missing");
    }

    #[test]
    fn test_wanted_if_behind_latest() {
        let same = OutdatedEntry::new(
            "a",
            Some("1.0.0".into()),
            Some("2.0.0".into()),
            "2.0.0",
        );
        assert_eq!(same.wanted_if_behind_latest(), None);

        let behind = OutdatedEntry::new(
            "b",
            Some("1.0.0".into()),
            Some("1.4.0".into()),
            "2.0.0",
        );
        assert_eq!(behind.wanted_if_behind_latest(), Some("1.4.0"));
    }
}
