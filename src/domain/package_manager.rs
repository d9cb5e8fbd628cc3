//! Package manager kinds and the command table that drives them

use serde::{Deserialize, Serialize};
use std::fmt;

/// JavaScript package managers recognised by their lockfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    /// npm (package-lock.json)
    Npm,
    /// Yarn (yarn.lock)
    Yarn,
    /// pnpm (pnpm-lock.yaml)
    Pnpm,
    /// No recognised lockfile
    Unknown,
}

/// Static description of how to drive one package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerCommands {
    /// Which manager this entry describes
    pub kind: PackageManagerKind,
    /// Lockfile whose presence selects this manager
    pub lockfile: &'static str,
    /// Executable name (without platform suffix)
    pub program: &'static str,
    /// Arguments for the structured outdated query
    pub outdated_args: &'static [&'static str],
    /// Subcommand that installs a specific package version
    pub install_verb: &'static str,
}

/// Command table, in detection priority order
pub const MANAGERS: &[ManagerCommands] = &[
    ManagerCommands {
        kind: PackageManagerKind::Npm,
        lockfile: "package-lock.json",
        program: "npm",
        outdated_args: &["outdated", "--json"],
        install_verb: "install",
    },
    ManagerCommands {
        kind: PackageManagerKind::Yarn,
        lockfile: "yarn.lock",
        program: "yarn",
        outdated_args: &["outdated", "--json"],
        install_verb: "add",
    },
    ManagerCommands {
        kind: PackageManagerKind::Pnpm,
        lockfile: "pnpm-lock.yaml",
        program: "pnpm",
        outdated_args: &["outdated", "--json"],
        install_verb: "add",
    },
];

/// A program plus its arguments, ready to be spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl ManagerCommands {
    /// Program name as it must be spawned on this platform
    ///
    /// npm, yarn and pnpm ship as `.cmd` shims on Windows, which
    /// `CreateProcess` does not resolve without the extension.
    pub fn executable(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.program)
        } else {
            self.program.to_string()
        }
    }

    /// Command that lists outdated packages as JSON
    pub fn outdated_invocation(&self) -> Invocation {
        Invocation::new(self.executable(), self.outdated_args.iter().copied())
    }

    /// Command that upgrades a single package to its latest release
    pub fn install_latest_invocation(&self, package: &str) -> Invocation {
        Invocation::new(
            self.executable(),
            [self.install_verb.to_string(), format!("{}@latest", package)],
        )
    }
}

impl PackageManagerKind {
    /// Look up the command table entry; `None` for `Unknown`
    pub fn commands(&self) -> Option<&'static ManagerCommands> {
        MANAGERS.iter().find(|m| m.kind == *self)
    }

    /// Returns the name used in messages and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
