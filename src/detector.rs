//! Package manager detection from lockfiles
//!
//! Lockfiles are checked in the order of the command table
//! (package-lock.json, yarn.lock, pnpm-lock.yaml); the first one present
//! decides. Only existence is checked, never the contents.

use crate::domain::{PackageManagerKind, MANAGERS};
use crate::error::DetectError;
use std::path::Path;

/// Detect the package manager governing `dir`
///
/// Returns `PackageManagerKind::Unknown` when no lockfile is present,
/// including when `dir` itself does not exist. Fails only when a lockfile
/// path cannot be checked, e.g. because of missing permissions.
pub fn detect_package_manager(dir: &Path) -> Result<PackageManagerKind, DetectError> {
    for manager in MANAGERS {
        let lockfile = dir.join(manager.lockfile);
        let exists = lockfile
            .try_exists()
            .map_err(|e| DetectError::access(&lockfile, e))?;

        if exists {
            return Ok(manager.kind);
        }
    }

    Ok(PackageManagerKind::Unknown)
}

/// Detect the package manager, treating `Unknown` as an error
pub fn require_package_manager(dir: &Path) -> Result<PackageManagerKind, DetectError> {
    match detect_package_manager(dir)? {
        PackageManagerKind::Unknown => Err(DetectError::not_detected(dir)),
        kind => Ok(kind),
    }
}
