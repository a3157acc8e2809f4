use crate::commands::{RewriteOptions, RewriteSummary};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("rewriting...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick();
    pb
}

fn count_cell(count: usize, bad: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::Green)
    } else {
        Cell::new(count).fg(bad)
    }
}

/// Print the run totals.
///
/// Quiet mode prints a single line instead of the table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    summary: &RewriteSummary,
    options: &RewriteOptions,
) -> std::io::Result<()> {
    let changed_label = if options.apply { "Rewritten" } else { "Would rewrite" };

    if options.quiet {
        writeln!(
            writer,
            "{} files: {} {}, {} unchanged, {} failed",
            summary.files,
            summary.changed,
            changed_label.to_lowercase(),
            summary.unchanged,
            summary.failed
        )?;
        return Ok(());
    }

    if summary.files == 0 {
        writeln!(writer, "{}", "No C++ sources found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Files", changed_label, "Unchanged", "Failed", "Rewrites"]);
    table.add_row(vec![
        Cell::new(summary.files),
        count_cell(summary.changed, Color::Yellow),
        Cell::new(summary.unchanged),
        count_cell(summary.failed, Color::Red),
        Cell::new(summary.rewrites),
    ]);

    writeln!(writer)?;
    writeln!(writer, "{table}")?;
    if options.check && summary.changed > 0 {
        writeln!(
            writer,
            "{}",
            "[CHECK] C++17 constructs remain; run with --apply to rewrite them.".red().bold()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_summary_is_one_line() {
        let summary = RewriteSummary {
            files: 3,
            changed: 1,
            unchanged: 1,
            failed: 1,
            rewrites: 2,
        };
        let options = RewriteOptions {
            quiet: true,
            ..RewriteOptions::default()
        };
        let mut buffer = Vec::new();
        print_summary(&mut buffer, &summary, &options).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "3 files: 1 would rewrite, 1 unchanged, 1 failed\n"
        );
    }

    #[test]
    fn test_summary_table_mentions_check_failure() {
        let summary = RewriteSummary {
            files: 1,
            changed: 1,
            unchanged: 0,
            failed: 0,
            rewrites: 4,
        };
        let options = RewriteOptions {
            check: true,
            ..RewriteOptions::default()
        };
        let mut buffer = Vec::new();
        print_summary(&mut buffer, &summary, &options).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Would rewrite"));
        assert!(output.contains("--apply"));
    }
}
