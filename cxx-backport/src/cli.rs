use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.cxx-backport.toml):
  Searched from the first path upward; command-line flags win.

  [cxx-backport]
  max_passes = 16            # Give up on a file after N changing passes
  allow_parse_errors = false # Rewrite files the parser had to recover from

  # Path filters
  exclude_folders = [\"build\", \"third_party\"]
  include_folders = [\"vendor\"]  # Force-include these
  extensions = [\"cpp\", \"hpp\"]   # Replaces the default extension list

EXIT STATUS:
  0  success
  1  --check found files to rewrite, or a file failed
  2  invalid arguments
";

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Files or directories to rewrite.
    /// When no paths are provided, defaults to the current directory.
    /// With --apply, writes stay inside the paths named here.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root to rewrite.
    /// Used as both the target AND the containment boundary for --apply.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// What to do with the rewritten text.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct ModeArgs {
    /// Write rewritten files in place.
    /// Without this flag only a preview of what would change is shown.
    #[arg(short = 'a', long, conflicts_with_all = ["check", "stdout"])]
    pub apply: bool,

    /// Exit with code 1 if any file would be rewritten (for CI).
    #[arg(long)]
    pub check: bool,

    /// Print the rewritten text of every file instead of status lines.
    #[arg(long, conflicts_with = "json")]
    pub stdout: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output a JSON report.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (lists unchanged files, debug logging).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cxx-backport - Rewrite C++17 fold expressions and message-less static_assert for older compilers",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output mode.
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Maximum number of changing passes per file (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_passes: Option<u32>,

    /// Folders to exclude.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// File extensions to process, without the dot (replaces the defaults).
    #[arg(long = "extensions", alias = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Rewrite files even if the parser had to recover from syntax errors.
    #[arg(long)]
    pub allow_parse_errors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cxx-backport"]).unwrap();
        assert!(cli.paths.paths.is_empty());
        assert!(!cli.mode.apply);
        assert!(cli.max_passes.is_none());
    }

    #[test]
    fn test_paths_conflict_with_root() {
        let result = Cli::try_parse_from(["cxx-backport", "src", "--root", "."]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_conflicts_with_check() {
        assert!(Cli::try_parse_from(["cxx-backport", "--apply", "--check"]).is_err());
    }

    #[test]
    fn test_extensions_are_comma_separated() {
        let cli = Cli::try_parse_from(["cxx-backport", "--extensions", "cpp,hpp"]).unwrap();
        assert_eq!(cli.extensions, vec!["cpp", "hpp"]);
    }

    #[test]
    fn test_max_passes_must_be_positive() {
        assert!(Cli::try_parse_from(["cxx-backport", "--max-passes", "0"]).is_err());
        let cli = Cli::try_parse_from(["cxx-backport", "--max-passes", "3"]).unwrap();
        assert_eq!(cli.max_passes, Some(3));
    }
}
