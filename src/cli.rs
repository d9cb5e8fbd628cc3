//! CLI argument parsing module for pkgup

use clap::Parser;
use std::path::PathBuf;

/// Check or upgrade outdated npm, yarn and pnpm dependencies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pkgup",
    version,
    about = "Check or upgrade outdated npm, yarn and pnpm dependencies"
)]
pub struct CliArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Upgrade every outdated package to its latest version
    #[arg(long)]
    pub update: bool,

    /// Print the outdated report as JSON
    #[arg(long, conflicts_with = "update")]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print diagnostic information to stderr
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["pkgup"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.update);
        assert!(!args.json);
        assert!(!args.no_color);
        assert!(!args.verbose);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["pkgup", "/some/path"]);
        assert_eq!(args.path, PathBuf::from("/some/path"));
    }

    #[test]
    fn test_update_flag() {
        let args = CliArgs::parse_from(["pkgup", "--update"]);
        assert!(args.update);
    }

    #[test]
    fn test_json_flag() {
        let args = CliArgs::parse_from(["pkgup", "--json"]);
        assert!(args.json);
    }

    #[test]
    fn test_json_conflicts_with_update() {
        let result = CliArgs::try_parse_from(["pkgup", "--json", "--update"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(CliArgs::try_parse_from(["pkgup", "--upgrade"]).is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "pkgup",
            "/path/to/project",
            "--update",
            "--no-color",
            "--verbose",
        ]);
        assert_eq!(args.path, PathBuf::from("/path/to/project"));
        assert!(args.update);
        assert!(args.no_color);
        assert!(args.verbose);
    }
}
