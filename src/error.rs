//! Error taxonomy for the translation pipeline.
//!
//! Errors are scoped to the smallest unit they can poison: a bad input file
//! skips that file, a failed provider call leaves one row blank, a cache
//! hiccup degrades to a miss. Nothing here aborts the batch as a whole.

use thiserror::Error;

/// The input table cannot be processed at all. File-level: the file is
/// skipped and the batch moves on.
#[derive(Debug, Error)]
pub enum InputFormatError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: String, column: String },
}

/// A translation call failed. Span-level: the affected row keeps an empty
/// target and stays eligible for the next run.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected the request with code {0}")]
    Rejected(i64),

    #[error("provider response contained no translation")]
    EmptyResponse,
}

/// The phrase cache misbehaved. Lookup failures degrade to cache misses,
/// store failures lose the entry but not the translation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cache database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("cache connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Why a single file could not produce an output table. Carried per file in
/// the run summary; other files are unaffected.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Input(#[from] InputFormatError),

    #[error("cannot write {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: csv::Error,
    },
}
