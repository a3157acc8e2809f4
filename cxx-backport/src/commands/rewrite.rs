//! Rewrite command: normalize C++ sources and report, preview or apply the result.

use crate::fixpoint::{normalize, FixpointOptions};
use crate::output;
use crate::utils::{normalize_display_path, validate_path_within_root, LineIndex};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the rewrite command
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RewriteOptions {
    /// Write rewritten files in place
    pub apply: bool,
    /// Report only; the caller fails when anything would change
    pub check: bool,
    /// Print rewritten text instead of status lines
    pub stdout: bool,
    /// Emit a JSON report
    pub json: bool,
    /// List unchanged files too
    pub verbose: bool,
    /// Only print the summary line
    pub quiet: bool,
    /// Pass limit and parse-error policy
    pub fixpoint: FixpointOptions,
    /// Containment boundaries for in-place writes; a file must lie inside one
    pub roots: Vec<PathBuf>,
}

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Nothing to rewrite
    Unchanged,
    /// At least one rewrite
    Changed,
    /// Rejected, unparsable or unreadable; left untouched
    Failed,
}

/// Per-file result
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File path for display
    pub file: String,
    /// Outcome
    pub status: FileStatus,
    /// Passes run until the text was stable
    pub passes: usize,
    /// Rewrites over all passes
    pub rewrites: usize,
    /// Whether the rewritten text was written back
    pub written: bool,
    /// Error message of a failed file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 1-indexed line the error points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-indexed column the error points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Rewritten text
    #[serde(skip)]
    pub text: Option<String>,
    #[serde(skip)]
    path: PathBuf,
}

impl FileReport {
    fn new(path: &Path) -> Self {
        Self {
            file: normalize_display_path(path),
            status: FileStatus::Unchanged,
            passes: 0,
            rewrites: 0,
            written: false,
            error: None,
            line: None,
            column: None,
            text: None,
            path: path.to_path_buf(),
        }
    }

    fn fail(mut self, error: impl std::fmt::Display, position: Option<(usize, usize)>) -> Self {
        self.status = FileStatus::Failed;
        self.error = Some(error.to_string());
        self.line = position.map(|(line, _)| line);
        self.column = position.map(|(_, column)| column);
        self.passes = 0;
        self.rewrites = 0;
        self.text = None;
        self
    }
}

/// Totals over all files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteSummary {
    /// Files processed
    pub files: usize,
    /// Files with at least one rewrite
    pub changed: usize,
    /// Files left as they were
    pub unchanged: usize,
    /// Files that failed
    pub failed: usize,
    /// Rewrites over all files
    pub rewrites: usize,
}

/// Full command result
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    /// Per-file results, in input order
    pub files: Vec<FileReport>,
    /// Totals
    pub summary: RewriteSummary,
}

impl RewriteReport {
    fn from_files(files: Vec<FileReport>) -> Self {
        let mut summary = RewriteSummary {
            files: files.len(),
            ..RewriteSummary::default()
        };
        for report in &files {
            match report.status {
                FileStatus::Unchanged => summary.unchanged += 1,
                FileStatus::Changed => summary.changed += 1,
                FileStatus::Failed => summary.failed += 1,
            }
            summary.rewrites += report.rewrites;
        }
        Self { files, summary }
    }
}

/// Read and normalize one file. Never writes.
#[must_use]
pub fn process_file(path: &Path, options: &FixpointOptions) -> FileReport {
    let report = FileReport::new(path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(file = %report.file, error = %e, "cannot read file");
            return report.fail(e, None);
        }
    };

    match normalize(&content, options) {
        Ok(normalized) => FileReport {
            status: if normalized.changed {
                FileStatus::Changed
            } else {
                FileStatus::Unchanged
            },
            passes: normalized.passes,
            rewrites: normalized.total_edits(),
            text: Some(normalized.text),
            ..report
        },
        Err(e) => {
            // Positions of later passes refer to partially rewritten text; the
            // line is still right for errors met in the first pass.
            let position = e.offset().map(|offset| LineIndex::new(&content).line_col(offset));
            tracing::warn!(file = %report.file, error = %e, "skipping file");
            report.fail(e, position)
        }
    }
}

/// Normalize `files` in parallel, then report, preview or apply.
///
/// # Errors
///
/// Returns an error if writing to the output fails. Per-file failures are
/// part of the report.
pub fn run_rewrite<W: Write>(
    files: &[PathBuf],
    options: &RewriteOptions,
    mut writer: W,
) -> Result<RewriteReport> {
    let show_progress = !options.json && !options.stdout && !options.quiet && files.len() > 1;
    let progress = if show_progress {
        output::create_progress_bar(files.len() as u64)
    } else {
        indicatif::ProgressBar::hidden()
    };

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            let report = process_file(path, &options.fixpoint);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();

    if options.apply {
        reports = reports
            .into_iter()
            .map(|report| write_back(report, &options.roots))
            .collect();
    }

    let report = RewriteReport::from_files(reports);

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if options.stdout {
        for file in &report.files {
            match (&file.text, &file.error) {
                (Some(text), _) => write!(writer, "{text}")?,
                (None, Some(error)) => eprintln!("{}: {error}", file.file),
                (None, None) => {}
            }
        }
    } else {
        print_status_lines(&mut writer, &report, options)?;
        output::print_summary(&mut writer, &report.summary, options)?;
    }
    writer.flush()?;

    Ok(report)
}

fn write_back(mut report: FileReport, roots: &[PathBuf]) -> FileReport {
    if report.status != FileStatus::Changed {
        return report;
    }
    let Some(text) = report.text.as_deref() else {
        return report;
    };
    let result = contained_path(&report.path, roots)
        .and_then(|path| fs::write(&path, text).map_err(anyhow::Error::from));
    match result {
        Ok(()) => {
            tracing::debug!(file = %report.file, "wrote rewritten file");
            report.written = true;
            report
        }
        Err(e) => {
            tracing::warn!(file = %report.file, error = %e, "cannot write file");
            report.fail(e, None)
        }
    }
}

/// Resolve `path` inside the first root that contains it.
fn contained_path(path: &Path, roots: &[PathBuf]) -> Result<PathBuf> {
    let mut last_error = None;
    for root in roots {
        match validate_path_within_root(path, root) {
            Ok(resolved) => return Ok(resolved),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No root to write {} into", path.display())))
}

fn print_status_lines<W: Write>(
    writer: &mut W,
    report: &RewriteReport,
    options: &RewriteOptions,
) -> Result<()> {
    if options.quiet {
        return Ok(());
    }
    if !options.apply && report.summary.changed > 0 {
        writeln!(writer, "{}", "[DRY-RUN] Files that would be rewritten:".yellow())?;
    }

    for file in &report.files {
        match file.status {
            FileStatus::Changed => {
                let label = if file.written {
                    "Rewritten:".green()
                } else {
                    "Would rewrite:".yellow()
                };
                writeln!(
                    writer,
                    "  {} {} ({} rewrites, {} passes)",
                    label, file.file, file.rewrites, file.passes
                )?;
            }
            FileStatus::Failed => {
                let location = match (file.line, file.column) {
                    (Some(line), Some(column)) => format!(":{line}:{column}"),
                    _ => String::new(),
                };
                writeln!(
                    writer,
                    "  {} {}{}: {}",
                    "Failed:".red(),
                    file.file,
                    location,
                    file.error.as_deref().unwrap_or_default()
                )?;
            }
            FileStatus::Unchanged if options.verbose => {
                writeln!(writer, "  {} {}", "Unchanged:".dimmed(), file.file)?;
            }
            FileStatus::Unchanged => {}
        }
    }
    Ok(())
}
