//! Phrasefill - batch translation for game phrase tables
//!
//! Phrasefill walks a directory of delimited phrase tables, fills in the
//! blank target cells through a DeepLX-compatible endpoint, and remembers
//! every finished phrase in a persistent cache so the same phrase is never
//! translated twice. Interrupted runs resume where they stopped via a
//! progress ledger.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Configuration file loading and parsing
//! - `pipeline`: Directory runs, per-file translation, cancellation
//! - `cache`: Persistent phrase cache
//! - `ledger`: Resume offsets and completed-file tracking
//! - `provider`: Translation endpoint client
//! - `segment`: Placeholder-aware phrase splitting
//! - `table`: Delimited phrase-table I/O

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod provider;
pub mod segment;
pub mod table;
