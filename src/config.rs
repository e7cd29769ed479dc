use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::table::TableFormat;

pub const CONFIG_FILE_NAME: &str = ".phrasefillrc.json";

/// Extension of the table files picked up by a run, without the dot.
pub const TABLE_EXTENSION: &str = "csv";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_column")]
    pub source_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// Cell delimiter as a one-character string, the way it reads in JSON.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_column() -> String {
    "source".to_string()
}

fn default_target_column() -> String {
    "target".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_output_suffix() -> String {
    "_translated".to_string()
}

fn default_cache_path() -> String {
    "phrasefill.db".to_string()
}

fn default_ledger_path() -> String {
    "phrasefill-status.json".to_string()
}

fn default_endpoint() -> String {
    "http://127.0.0.1:1188/translate".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "fr".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            source_column: default_source_column(),
            target_column: default_target_column(),
            delimiter: default_delimiter(),
            output_suffix: default_output_suffix(),
            cache_path: default_cache_path(),
            ledger_path: default_ledger_path(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Checks glob patterns in `ignores`, the delimiter, the output suffix,
    /// and the provider timeout.
    pub fn validate(&self) -> Result<()> {
        // Validate ignore patterns that contain glob wildcards (* or ?).
        // Patterns without wildcards are treated as literal directory paths,
        // so bracketed names like backup/[old] are valid without escaping.
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        self.delimiter_byte()?;

        if self.output_suffix.trim().is_empty() {
            bail!("'outputSuffix' must not be empty");
        }
        if self.provider.timeout_secs == 0 {
            bail!("'provider.timeoutSecs' must be at least 1");
        }

        Ok(())
    }

    /// The delimiter as the single byte the table reader wants.
    ///
    /// A one-character UTF-8 string of length one is necessarily ASCII,
    /// which is exactly the range the reader accepts.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => bail!(
                "'delimiter' must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        }
    }

    pub fn table_format(&self) -> Result<TableFormat> {
        Ok(TableFormat {
            delimiter: self.delimiter_byte()?,
            source_column: self.source_column.clone(),
            target_column: self.target_column.clone(),
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
