//! Per-file translation pass.
//!
//! A pass walks one table row by row, filling blank targets from the phrase
//! cache first and from the provider only on a miss. Provider calls operate
//! on text spans between placeholders; the reassembled whole phrase is what
//! lands in the cache, so the next file (or the next run) resolves the same
//! phrase without touching the network.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::cancel::CancelToken;
use crate::cache::PhraseCache;
use crate::error::FileError;
use crate::ledger::ProgressLedger;
use crate::provider::Translator;
use crate::segment::{self, Segment};
use crate::table::{PhraseTable, TableFormat, is_blank_target};

/// Row counters for one file's pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Data rows in the table.
    pub rows: usize,
    /// Rows whose target was already filled before this pass touched them.
    pub already_filled: usize,
    /// Rows resolved from the phrase cache.
    pub from_cache: usize,
    /// Rows translated through the provider.
    pub translated: usize,
    /// Rows left blank: provider failure, or a cache miss while offline.
    pub unresolved: usize,
}

/// How one file's pass ended.
#[derive(Debug)]
pub enum FileOutcome {
    /// Every row was visited and the output written.
    Completed(FileStats),
    /// A stop was requested; rows so far are flushed and the resume point
    /// recorded, so the next run picks up at `next_row`.
    Cancelled { next_row: usize, stats: FileStats },
}

/// Where one phrase's translation came from.
enum Resolution {
    Cached(String),
    Fresh(String),
    /// Offline and not in the cache.
    Miss,
    /// The provider failed on one of the phrase's spans.
    Failed,
}

/// Output path for an input table: the suffix goes between the file stem
/// and the extension, so `quests/chapter1.csv` becomes
/// `quests/chapter1_translated.csv`.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = input.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    input.with_file_name(name)
}

pub struct BatchRunner<'a> {
    cache: &'a PhraseCache,
    translator: Option<&'a dyn Translator>,
    ledger: &'a ProgressLedger,
    cancel: &'a CancelToken,
    format: &'a TableFormat,
    output_suffix: &'a str,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        cache: &'a PhraseCache,
        translator: Option<&'a dyn Translator>,
        ledger: &'a ProgressLedger,
        cancel: &'a CancelToken,
        format: &'a TableFormat,
        output_suffix: &'a str,
    ) -> Self {
        Self {
            cache,
            translator,
            ledger,
            cancel,
            format,
            output_suffix,
        }
    }

    /// Run one file to completion or to the first observed stop request.
    ///
    /// On resume (a non-zero ledger offset) the rows below the offset are
    /// taken from the previous partial output, so earlier work is kept
    /// without revisiting it.
    pub fn process_file(&self, file: &str) -> Result<FileOutcome, FileError> {
        let input = Path::new(file);
        let mut table = PhraseTable::read(input, self.format)?;
        let output = output_path_for(input, self.output_suffix);

        let resume_row = self.ledger.resume_row(file);
        if resume_row > 0 {
            debug!(file, resume_row, "resuming from earlier run");
            self.merge_prior_output(&mut table, &output, resume_row);
        }

        let mut stats = FileStats {
            rows: table.len(),
            ..FileStats::default()
        };

        for row in resume_row..table.len() {
            if self.cancel.is_cancelled() {
                self.write_output(&table, &output)?;
                self.ledger.record_progress(file, row);
                debug!(file, row, "stop requested, partial output flushed");
                return Ok(FileOutcome::Cancelled {
                    next_row: row,
                    stats,
                });
            }

            if !is_blank_target(table.target(row)) {
                stats.already_filled += 1;
                continue;
            }
            let source = table.source(row).to_string();
            if source.trim().is_empty() {
                continue;
            }

            match self.resolve_phrase(&source) {
                Resolution::Cached(target) => {
                    table.set_target(row, target);
                    stats.from_cache += 1;
                }
                Resolution::Fresh(target) => {
                    table.set_target(row, target);
                    stats.translated += 1;
                }
                Resolution::Miss => {
                    table.set_target(row, String::new());
                    stats.unresolved += 1;
                }
                Resolution::Failed => {
                    table.set_target(row, String::new());
                    stats.unresolved += 1;
                    warn!(file, row, "row left untranslated");
                }
            }
        }

        self.write_output(&table, &output)?;
        self.ledger.mark_completed(file);
        Ok(FileOutcome::Completed(stats))
    }

    /// Carry non-blank targets from the previous partial output into the
    /// rows below the resume offset. A missing or unreadable output is not
    /// fatal; those rows simply keep their input targets.
    fn merge_prior_output(&self, table: &mut PhraseTable, output: &Path, resume_row: usize) {
        if !output.exists() {
            return;
        }
        let prior = match PhraseTable::read(output, self.format) {
            Ok(prior) => prior,
            Err(err) => {
                warn!(output = %output.display(), "ignoring unreadable prior output: {err}");
                return;
            }
        };
        let limit = resume_row.min(prior.len()).min(table.len());
        for row in 0..limit {
            let target = prior.target(row);
            if !is_blank_target(target) {
                table.set_target(row, target.to_string());
            }
        }
    }

    fn write_output(&self, table: &PhraseTable, output: &Path) -> Result<(), FileError> {
        table
            .write(output, self.format)
            .map_err(|source| FileError::OutputWrite {
                path: output.display().to_string(),
                source,
            })
    }

    /// Resolve one whole phrase: cache first, then the provider span by
    /// span. Placeholders and whitespace-only spans pass through verbatim.
    /// Only a fully reassembled phrase is stored back into the cache; a
    /// failed span poisons the whole phrase so it stays eligible next run.
    fn resolve_phrase(&self, source: &str) -> Resolution {
        match self.cache.lookup(source) {
            Ok(Some(target)) => return Resolution::Cached(target),
            Ok(None) => {}
            Err(err) => warn!("cache lookup failed, treating as miss: {err}"),
        }

        let Some(translator) = self.translator else {
            return Resolution::Miss;
        };

        let mut translated = String::new();
        for seg in segment::split(source) {
            match seg {
                Segment::Placeholder(token) => translated.push_str(&token),
                Segment::Text(text) => {
                    if text.trim().is_empty() {
                        translated.push_str(&text);
                        continue;
                    }
                    match translator.translate(&text) {
                        Ok(span) => translated.push_str(&span),
                        Err(err) => {
                            warn!(phrase = source, "span translation failed: {err}");
                            return Resolution::Failed;
                        }
                    }
                }
            }
        }

        if let Err(err) = self.cache.store(source, &translated) {
            warn!("cache store failed: {err}");
        }
        Resolution::Fresh(translated)
    }
}
