use crate::cli::Cli;
use crate::commands::{run_rewrite, RewriteOptions};
use crate::config::Config;
use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_MAX_PASSES};
use crate::fixpoint::FixpointOptions;
use crate::utils::{collect_cpp_files, has_extension};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Runs the rewriter with the given arguments.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run cxx-backport with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["cxx-backport".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(2);
            }
        },
    };

    crate::logging::init_tracing(cli_var.output.verbose);

    // Every named path bounds the writes to what it covers.
    let roots = match &cli_var.paths.root {
        Some(root) => vec![root.clone()],
        None if cli_var.paths.paths.is_empty() => vec![PathBuf::from(".")],
        None => cli_var.paths.paths.clone(),
    };

    for path in &roots {
        if !path.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                path.display()
            );
            return Ok(2);
        }
    }

    let config = Config::load_from_path(&roots[0]);
    let settings = &config.cxx_backport;

    let mut exclude_folders = settings.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli_var.exclude_folders.iter().cloned());
    let mut include_folders = settings.include_folders.clone().unwrap_or_default();
    include_folders.extend(cli_var.include_folders.iter().cloned());

    let extensions = if cli_var.extensions.is_empty() {
        settings.extensions.clone().unwrap_or_else(|| {
            DEFAULT_EXTENSIONS()
                .iter()
                .map(|&ext| ext.to_owned())
                .collect()
        })
    } else {
        cli_var
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_owned())
            .collect()
    };

    let fixpoint = FixpointOptions {
        max_passes: cli_var
            .max_passes
            .map(|n| n as usize)
            .or(settings.max_passes)
            .unwrap_or(DEFAULT_MAX_PASSES),
        allow_parse_errors: cli_var.allow_parse_errors
            || settings.allow_parse_errors.unwrap_or(false),
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        threads = rayon::current_num_threads(),
        config = ?config.config_file_path,
        ?exclude_folders,
        ?extensions,
        max_passes = fixpoint.max_passes,
        "starting"
    );

    let files = gather_files(&roots, &exclude_folders, &include_folders, &extensions);

    let verbose = cli_var.output.verbose;
    let human = !cli_var.output.json && !cli_var.mode.stdout && !cli_var.output.quiet;
    if verbose && human {
        crate::output::print_exclusion_list(writer, &exclude_folders)?;
    }

    let options = RewriteOptions {
        apply: cli_var.mode.apply,
        check: cli_var.mode.check,
        stdout: cli_var.mode.stdout,
        json: cli_var.output.json,
        verbose,
        quiet: cli_var.output.quiet,
        fixpoint,
        roots,
    };

    let report = run_rewrite(&files, &options, &mut *writer)?;

    if report.summary.failed > 0 || (options.check && report.summary.changed > 0) {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Expand directories; explicit files are taken as given, whatever their extension.
fn gather_files(
    roots: &[PathBuf],
    exclude: &[String],
    include: &[String],
    extensions: &[String],
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_dir() {
            let (found, dirs) = collect_cpp_files(root, exclude, include, extensions);
            tracing::debug!(root = %root.display(), files = found.len(), dirs, "collected sources");
            files.extend(found);
        } else {
            if !has_extension(root, extensions) {
                tracing::debug!(file = %root.display(), "explicit file outside the extension list");
            }
            files.push(root.clone());
        }
    }
    dedup_preserving_order(files)
}

fn dedup_preserving_order(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = rustc_hash::FxHashSet::default();
    files
        .into_iter()
        .filter(|path| seen.insert(normalize_key(path)))
        .collect()
}

fn normalize_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> (i32, String) {
        let mut buffer = Vec::new();
        let code = run_with_args_to(args.iter().map(|&s| s.to_owned()).collect(), &mut buffer)
            .unwrap();
        (code, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_help_exits_zero() {
        let (code, output) = run(&["--help"]);
        assert_eq!(code, 0);
        assert!(output.contains("CONFIGURATION FILE"));
    }

    #[test]
    fn test_bad_flag_exits_two() {
        let (code, _) = run(&["--no-such-flag"]);
        assert_eq!(code, 2);
    }

    #[test]
    fn test_missing_path_exits_two() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let (code, _) = run(&[missing.to_str().unwrap()]);
        assert_eq!(code, 2);
    }

    #[test]
    fn test_check_mode_exit_codes() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.cpp");
        std::fs::write(&source, "static_assert(true);\n").unwrap();

        let (code, _) = run(&["--check", "--quiet", dir.path().to_str().unwrap()]);
        assert_eq!(code, 1);

        std::fs::write(&source, "static_assert(true, \"\");\n").unwrap();
        let (code, _) = run(&["--check", "--quiet", dir.path().to_str().unwrap()]);
        assert_eq!(code, 0);
    }

    #[test]
    fn test_gather_files_dedups() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.cpp");
        std::fs::write(&source, "int a;\n").unwrap();

        let files = gather_files(
            &[dir.path().to_path_buf(), source.clone()],
            &[],
            &[],
            &["cpp".to_owned()],
        );
        assert_eq!(files.len(), 1);
    }
}
