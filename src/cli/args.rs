//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! phrasefill commands. It uses clap's derive API for declarative argument
//! parsing.
//!
//! ## Commands
//!
//! - `run`: translate pending phrase tables under a directory
//! - `seed`: import already-translated rows into the phrase cache
//! - `status`: show ledger state and cache size
//! - `init`: initialize a phrasefill configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Run(cmd)) => cmd.common.verbose,
            Some(Command::Seed(cmd)) => cmd.common.verbose,
            Some(Command::Status(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the cache-touching commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Phrase cache database path (overrides config file)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Progress ledger path (overrides config file)
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Table format overrides shared by commands that read tables.
#[derive(Debug, Clone, Args)]
pub struct FormatArgs {
    /// Source column name (overrides config file)
    #[arg(long)]
    pub source_column: Option<String>,

    /// Target column name (overrides config file)
    #[arg(long)]
    pub target_column: Option<String>,

    /// Cell delimiter, a single character (overrides config file)
    #[arg(long)]
    pub delimiter: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    /// Directory to scan for phrase tables
    #[arg(default_value = ".")]
    pub root: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub format: FormatArgs,

    /// Translate from the cache only; the provider is never called
    #[arg(long)]
    pub offline: bool,

    /// Worker threads translating files in parallel
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Translation endpoint URL (overrides config file)
    #[arg(long, env = "PHRASEFILL_ENDPOINT")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args)]
pub struct SeedCommand {
    /// Tables whose filled rows are imported into the cache
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate every pending phrase table under a directory
    Run(RunCommand),
    /// Import (source, target) rows from tables into the phrase cache
    Seed(SeedCommand),
    /// Show in-progress and completed files plus the cache entry count
    Status(StatusCommand),
    /// Initialize a new .phrasefillrc.json configuration file
    Init,
}
