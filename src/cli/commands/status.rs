use std::path::Path;

use anyhow::Result;

use super::super::args::StatusCommand;
use super::helper::{ledger_path, load_effective_config, open_cache};
use super::{CommandResult, CommandSummary, StatusSummary};
use crate::ledger::ProgressLedger;

/// Report what the ledger and cache currently hold, without touching either.
pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let config = load_effective_config(Path::new("."), None)?;
    let cache = open_cache(&config, &cmd.common)?;
    let ledger = ProgressLedger::load(&ledger_path(&config, &cmd.common));

    let state = ledger.snapshot();
    Ok(CommandResult {
        summary: CommandSummary::Status(StatusSummary {
            in_progress: state.in_progress.into_iter().collect(),
            completed: state.completed.into_iter().collect(),
            cache_entries: cache.len()?,
        }),
    })
}
