//! Directory-level translation runs.
//!
//! A run scans a root for phrase tables, drops the ones the ledger already
//! marks completed, and hands the rest to a worker pool. Files are
//! independent, so a failure in one never aborts the others; the summary
//! collects every file's outcome for reporting.

pub mod cancel;
mod runner;
mod walker;

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;

pub use cancel::CancelToken;
pub use runner::{BatchRunner, FileOutcome, FileStats, output_path_for};
pub use walker::{ScanResult, find_tables};

use crate::cache::PhraseCache;
use crate::error::FileError;
use crate::ledger::ProgressLedger;
use crate::provider::Translator;
use crate::table::TableFormat;

/// Everything a directory run needs beyond its collaborators.
pub struct RunOptions {
    pub root: PathBuf,
    pub format: TableFormat,
    /// Table file extension to pick up, without the dot.
    pub extension: String,
    /// Inserted before the extension when naming output files.
    pub output_suffix: String,
    pub ignores: Vec<String>,
    /// Worker threads. Translation is provider-bound, so the default of one
    /// keeps request order stable; more workers trade that for throughput.
    pub jobs: usize,
}

/// One file's fate within a run.
#[derive(Debug)]
pub struct FileReport {
    pub file: String,
    pub outcome: Result<FileOutcome, FileError>,
}

/// Aggregated result of a directory run.
#[derive(Debug)]
pub struct RunSummary {
    /// Per-file outcomes, in scan order.
    pub reports: Vec<FileReport>,
    /// Files the ledger already marked completed.
    pub skipped_completed: usize,
    /// Directory entries the scan could not access.
    pub scan_skipped: usize,
}

impl RunSummary {
    pub fn completed_files(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Ok(FileOutcome::Completed(_))))
            .count()
    }

    pub fn failed_files(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_err()).count()
    }

    pub fn was_cancelled(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r.outcome, Ok(FileOutcome::Cancelled { .. })))
    }

    /// Row counters summed across every file that produced any.
    pub fn totals(&self) -> FileStats {
        let mut totals = FileStats::default();
        for report in &self.reports {
            let stats = match &report.outcome {
                Ok(FileOutcome::Completed(stats)) => stats,
                Ok(FileOutcome::Cancelled { stats, .. }) => stats,
                Err(_) => continue,
            };
            totals.rows += stats.rows;
            totals.already_filled += stats.already_filled;
            totals.from_cache += stats.from_cache;
            totals.translated += stats.translated;
            totals.unresolved += stats.unresolved;
        }
        totals
    }

    /// True when nothing is left to do: every file completed and no row
    /// stayed unresolved. An empty run is clean.
    pub fn is_clean(&self) -> bool {
        self.reports
            .iter()
            .all(|r| matches!(r.outcome, Ok(FileOutcome::Completed(_))))
            && self.totals().unresolved == 0
    }
}

/// Translate every pending table under `options.root`.
pub fn run_directory(
    options: &RunOptions,
    cache: &PhraseCache,
    translator: Option<&dyn Translator>,
    ledger: &ProgressLedger,
    cancel: &CancelToken,
) -> anyhow::Result<RunSummary> {
    let scan = find_tables(
        &options.root,
        &options.extension,
        &options.output_suffix,
        &options.ignores,
    );

    let mut pending = Vec::new();
    let mut skipped_completed = 0;
    for file in scan.files {
        if ledger.is_completed(&file) {
            skipped_completed += 1;
            debug!(file, "already completed, skipping");
        } else {
            pending.push(file);
        }
    }

    let runner = BatchRunner::new(
        cache,
        translator,
        ledger,
        cancel,
        &options.format,
        &options.output_suffix,
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()?;
    let reports: Vec<FileReport> = pool.install(|| {
        pending
            .par_iter()
            .map(|file| FileReport {
                file: file.clone(),
                outcome: runner.process_file(file),
            })
            .collect()
    });

    Ok(RunSummary {
        reports,
        skipped_completed,
        scan_skipped: scan.skipped_count,
    })
}
