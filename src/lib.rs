//! pkgup - JavaScript package manager outdated checker library
//!
//! This library provides the building blocks of the `pkgup` tool:
//! - Detection of npm, yarn or pnpm from the project's lockfile
//! - Querying the package manager for outdated dependencies
//! - Reporting the result or upgrading each package to its latest version

pub mod cli;
pub mod detector;
pub mod domain;
pub mod error;
pub mod output;
pub mod progress;
pub mod query;
pub mod runner;
pub mod updater;
