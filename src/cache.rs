//! Durable phrase cache backed by SQLite.
//!
//! One table, keyed by the whole source phrase. Writes are insert-if-absent:
//! the first translation recorded for a phrase wins and is never overwritten,
//! so repeated runs (and parallel workers) agree on what a phrase maps to.
//! The cache outlives any single run; there is no eviction.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

use crate::error::StorageError;
use crate::table::{TranslationPair, is_blank_target};

const POOL_SIZE: u32 = 8;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS phrases (
    source TEXT PRIMARY KEY,
    target TEXT NOT NULL
);
";

/// Summary of a bulk import, reported by the `seed` command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Rows written as new cache entries.
    pub inserted: usize,
    /// Rows whose source phrase was already cached (left untouched).
    pub existing: usize,
    /// Rows with a blank source or target, never imported.
    pub skipped_blank: usize,
}

/// Handle to the phrase database. Cheap to share across worker threads; every
/// call checks a connection out of the pool.
pub struct PhraseCache {
    pool: Pool<SqliteConnectionManager>,
}

impl PhraseCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")
        });
        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;

        let conn = pool.get()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self { pool })
    }

    /// Return the cached translation for `source`, if any.
    pub fn lookup(&self, source: &str) -> Result<Option<String>, StorageError> {
        let conn = self.pool.get()?;
        let target = conn
            .query_row(
                "SELECT target FROM phrases WHERE source = ?1",
                params![source],
                |row| row.get(0),
            )
            .optional()?;
        Ok(target)
    }

    /// Record a translation, unless one already exists for `source`.
    ///
    /// Returns `true` if the entry was inserted, `false` if an earlier entry
    /// held the key.
    pub fn store(&self, source: &str, target: &str) -> Result<bool, StorageError> {
        let conn = self.pool.get()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO phrases (source, target) VALUES (?1, ?2)",
            params![source, target],
        )?;
        Ok(inserted > 0)
    }

    /// Bulk-import curated (source, target) pairs, insert-if-absent per row.
    ///
    /// Rows with a blank source or a blank target are counted but not
    /// written; existing entries are never overwritten.
    pub fn seed<I>(&self, pairs: I) -> Result<SeedOutcome, StorageError>
    where
        I: IntoIterator<Item = TranslationPair>,
    {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let mut outcome = SeedOutcome::default();

        for pair in pairs {
            if pair.source.trim().is_empty() || is_blank_target(&pair.target) {
                outcome.skipped_blank += 1;
                continue;
            }
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO phrases (source, target) VALUES (?1, ?2)",
                params![pair.source, pair.target],
            )?;
            if inserted > 0 {
                outcome.inserted += 1;
            } else {
                outcome.existing += 1;
            }
        }

        tx.commit()?;
        Ok(outcome)
    }

    /// Number of cached phrases.
    pub fn len(&self) -> Result<usize, StorageError> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM phrases", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}
