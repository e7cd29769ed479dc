use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::super::args::{CommonArgs, FormatArgs};
use crate::cache::PhraseCache;
use crate::config::{Config, load_config};

/// Load config discovered from `start_dir`, fold in CLI overrides, and
/// validate the merged result. Flags beat the config file, which beats the
/// built-in defaults.
pub fn load_effective_config(start_dir: &Path, format: Option<&FormatArgs>) -> Result<Config> {
    let loaded = load_config(start_dir)?;
    let mut config = loaded.config;

    if let Some(format) = format {
        if let Some(source_column) = &format.source_column {
            config.source_column = source_column.clone();
        }
        if let Some(target_column) = &format.target_column {
            config.target_column = target_column.clone();
        }
        if let Some(delimiter) = &format.delimiter {
            config.delimiter = delimiter.clone();
        }
        // Flag values bypassed the load-time check, so validate again.
        config.validate()?;
    }

    Ok(config)
}

pub fn cache_path(config: &Config, common: &CommonArgs) -> PathBuf {
    common
        .cache
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.cache_path))
}

pub fn ledger_path(config: &Config, common: &CommonArgs) -> PathBuf {
    common
        .ledger
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.ledger_path))
}

pub fn open_cache(config: &Config, common: &CommonArgs) -> Result<PhraseCache> {
    let path = cache_path(config, common);
    PhraseCache::open(&path)
        .with_context(|| format!("cannot open phrase cache at {}", path.display()))
}
