//! Report formatting and printing utilities.
//!
//! One line per file with a leading mark, then a short verdict. Kept
//! separate from the pipeline so phrasefill can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, RunOutcome, SeedSummary, StatusSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::pipeline::{FileOutcome, FileReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// When set, the wall-clock line is suppressed so output is identical
/// between runs.
const DISABLE_TIMING_ENV: &str = "PHRASEFILL_DISABLE_TIMING";

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Run(outcome) => print_run(outcome, writer),
        CommandSummary::Seed(summary) => print_seed(summary, writer),
        CommandSummary::Status(summary) => print_status(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_run<W: Write>(outcome: &RunOutcome, writer: &mut W) {
    let summary = &outcome.summary;

    for report in &summary.reports {
        print_file_report(report, writer);
    }

    if summary.skipped_completed > 0 {
        let _ = writeln!(
            writer,
            "{} file(s) skipped (already completed)",
            summary.skipped_completed
        );
    }

    if summary.reports.is_empty() {
        if summary.skipped_completed == 0 {
            let _ = writeln!(writer, "No phrase tables found.");
        }
    } else {
        let _ = writeln!(writer);
        print_verdict(outcome, writer);
    }

    if timing_enabled() {
        let _ = writeln!(writer, "Finished in {:.2}s", outcome.elapsed.as_secs_f64());
    }
}

fn print_file_report<W: Write>(report: &FileReport, writer: &mut W) {
    match &report.outcome {
        Ok(FileOutcome::Completed(stats)) => {
            let mark = if stats.unresolved == 0 {
                SUCCESS_MARK.green()
            } else {
                FAILURE_MARK.red()
            };
            let mut line = format!(
                "{}: {} row(s), {} from cache, {} translated, {} already filled",
                report.file, stats.rows, stats.from_cache, stats.translated, stats.already_filled
            );
            if stats.unresolved > 0 {
                line.push_str(&format!(", {} unresolved", stats.unresolved));
            }
            let _ = writeln!(writer, "{} {}", mark, line);
        }
        Ok(FileOutcome::Cancelled { next_row, .. }) => {
            let _ = writeln!(
                writer,
                "{} {}: stopped at row {}",
                FAILURE_MARK.yellow(),
                report.file,
                next_row
            );
        }
        // Both error variants name the file themselves.
        Err(err) => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), err);
        }
    }
}

fn print_verdict<W: Write>(outcome: &RunOutcome, writer: &mut W) {
    let summary = &outcome.summary;
    if summary.is_clean() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "All tables up to date".green()
        );
        return;
    }

    let totals = summary.totals();
    if totals.unresolved > 0 {
        let _ = writeln!(
            writer,
            "{} {} row(s) left untranslated",
            FAILURE_MARK.red(),
            totals.unresolved
        );
    }
    let failed = summary.failed_files();
    if failed > 0 {
        let _ = writeln!(writer, "{} {} file(s) failed", FAILURE_MARK.red(), failed);
    }
    if summary.was_cancelled() {
        let _ = writeln!(
            writer,
            "{} stopped early, progress saved",
            FAILURE_MARK.yellow()
        );
    }
}

fn print_seed<W: Write>(summary: &SeedSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} Seeded {} file(s): {} new, {} already cached, {} blank row(s) skipped",
        SUCCESS_MARK.green(),
        summary.files,
        summary.inserted,
        summary.existing,
        summary.skipped_blank
    );
}

fn print_status<W: Write>(summary: &StatusSummary, writer: &mut W) {
    if summary.in_progress.is_empty() && summary.completed.is_empty() {
        let _ = writeln!(writer, "Ledger is empty.");
    } else {
        if !summary.in_progress.is_empty() {
            let _ = writeln!(writer, "In progress:");
            for (file, next_row) in &summary.in_progress {
                let _ = writeln!(writer, "  {}: next row {}", file, next_row);
            }
        }
        if !summary.completed.is_empty() {
            let _ = writeln!(writer, "Completed:");
            for file in &summary.completed {
                let _ = writeln!(writer, "  {}", file);
            }
        }
    }
    let _ = writeln!(writer, "Cache entries: {}", summary.cache_entries);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn timing_enabled() -> bool {
    std::env::var_os(DISABLE_TIMING_ENV).is_none()
}
