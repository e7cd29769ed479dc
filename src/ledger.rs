//! Resume state for the batch pipeline.
//!
//! The ledger is a small JSON document tracking, per input file, the next row
//! to process after a cancellation and the set of files translated to the
//! end. It is read once at startup and rewritten after every cancellation or
//! completion. A missing or unreadable document is treated as empty state;
//! a failed write costs resume capability for this run, nothing more.
//!
//! Every mutation runs read-merge-write under one mutex so that concurrent
//! file workers cannot clobber each other's progress, and a ledger shared
//! with another process loses at most the races it would lose anyway
//! (last writer wins per file).

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The serialized ledger document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerState {
    /// Input path to the index of the next row to process.
    pub in_progress: BTreeMap<String, usize>,
    /// Input paths whose every row is resolved. Terminal: entries are never
    /// removed, and such files are skipped by later runs.
    pub completed: BTreeSet<String>,
}

/// Handle to the ledger document, shared across worker threads.
pub struct ProgressLedger {
    path: PathBuf,
    state: Mutex<LedgerState>,
}

impl ProgressLedger {
    /// Load the ledger at `path`. Never fails: absent and corrupt documents
    /// both start as empty state (the latter with a warning).
    pub fn load(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            state: Mutex::new(read_state(path)),
        }
    }

    /// Index of the next row to process for `file`; 0 for unseen files.
    pub fn resume_row(&self, file: &str) -> usize {
        self.lock().in_progress.get(file).copied().unwrap_or(0)
    }

    pub fn is_completed(&self, file: &str) -> bool {
        self.lock().completed.contains(file)
    }

    /// Record that `file` stops before `next_row` and flush to disk.
    pub fn record_progress(&self, file: &str, next_row: usize) {
        let mut state = self.lock();
        state.in_progress.insert(file.to_string(), next_row);
        self.persist(&mut state);
    }

    /// Mark `file` fully translated, dropping any in-progress entry, and
    /// flush to disk.
    pub fn mark_completed(&self, file: &str) {
        let mut state = self.lock();
        state.in_progress.remove(file);
        state.completed.insert(file.to_string());
        self.persist(&mut state);
    }

    pub fn snapshot(&self) -> LedgerState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read the document, layer our entries over it, and write the result
    /// back. Completion always beats a stale in-progress entry.
    fn persist(&self, state: &mut LedgerState) {
        let mut merged = read_state(&self.path);
        merged.completed.extend(state.completed.iter().cloned());
        for (file, row) in &state.in_progress {
            merged.in_progress.insert(file.clone(), *row);
        }
        let LedgerState {
            in_progress,
            completed,
        } = &mut merged;
        in_progress.retain(|file, _| !completed.contains(file));
        *state = merged;

        let json = match serde_json::to_string_pretty(&*state) {
            Ok(json) => json,
            Err(err) => {
                warn!(path = %self.path.display(), "cannot serialize ledger: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            warn!(
                path = %self.path.display(),
                "ledger write failed, resume disabled for this run: {err}"
            );
        }
    }
}

fn read_state(path: &Path) -> LedgerState {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %path.display(), "ignoring unreadable ledger: {err}");
                LedgerState::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => LedgerState::default(),
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable ledger: {err}");
            LedgerState::default()
        }
    }
}
