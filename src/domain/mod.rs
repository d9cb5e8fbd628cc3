//! Core domain models for pkgup
//!
//! This module contains the fundamental types used throughout the application:
//! - Package manager kinds and their command table
//! - Outdated dependency entries and reports

mod outdated;
mod package_manager;

pub use outdated::{OutdatedEntry, OutdatedReport};
pub use package_manager::{Invocation, ManagerCommands, PackageManagerKind, MANAGERS};
