use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use signal_hook::{consts::SIGINT, iterator::Signals};
use tracing::debug;

use super::super::args::RunCommand;
use super::helper::{ledger_path, load_effective_config, open_cache};
use super::{CommandResult, CommandSummary, RunOutcome};
use crate::config::TABLE_EXTENSION;
use crate::ledger::ProgressLedger;
use crate::pipeline::{self, CancelToken, RunOptions};
use crate::provider::{DeepLxTranslator, Translator};

pub fn run(cmd: RunCommand) -> Result<CommandResult> {
    let started = Instant::now();

    if !cmd.root.is_dir() {
        bail!("{} is not a directory", cmd.root.display());
    }

    let config = load_effective_config(&cmd.root, Some(&cmd.format))?;
    let format = config.table_format()?;
    let cache = open_cache(&config, &cmd.common)?;
    let ledger = ProgressLedger::load(&ledger_path(&config, &cmd.common));

    let translator = if cmd.offline {
        None
    } else {
        let provider = &config.provider;
        let endpoint = cmd
            .endpoint
            .clone()
            .unwrap_or_else(|| provider.endpoint.clone());
        Some(DeepLxTranslator::new(
            endpoint,
            &provider.source_lang,
            &provider.target_lang,
            Duration::from_secs(provider.timeout_secs),
        )?)
    };

    // Ctrl-C requests a graceful stop; workers notice at the next row
    // boundary, flush, and record their resume points.
    let cancel = CancelToken::new();
    let mut signals = Signals::new([SIGINT]).context("cannot install Ctrl-C handler")?;
    let handler_token = cancel.clone();
    thread::spawn(move || {
        for _ in signals.forever() {
            handler_token.cancel();
        }
    });

    debug!(
        root = %cmd.root.display(),
        offline = cmd.offline,
        jobs = cmd.jobs,
        "starting run"
    );

    let options = RunOptions {
        root: cmd.root.clone(),
        format,
        extension: TABLE_EXTENSION.to_string(),
        output_suffix: config.output_suffix.clone(),
        ignores: config.ignores.clone(),
        jobs: cmd.jobs,
    };

    let summary = pipeline::run_directory(
        &options,
        &cache,
        translator.as_ref().map(|t| t as &dyn Translator),
        &ledger,
        &cancel,
    )?;

    Ok(CommandResult {
        summary: CommandSummary::Run(RunOutcome {
            summary,
            elapsed: started.elapsed(),
        }),
    })
}
