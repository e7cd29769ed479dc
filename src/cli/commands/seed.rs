use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::SeedCommand;
use super::helper::{load_effective_config, open_cache};
use super::{CommandResult, CommandSummary, SeedSummary};
use crate::table::PhraseTable;

/// Import the filled rows of the given tables into the phrase cache.
///
/// Existing cache entries always win, so seeding the same files twice is
/// harmless and reported as "already cached".
pub fn seed(cmd: SeedCommand) -> Result<CommandResult> {
    let config = load_effective_config(Path::new("."), Some(&cmd.format))?;
    let format = config.table_format()?;
    let cache = open_cache(&config, &cmd.common)?;

    let mut summary = SeedSummary::default();
    for file in &cmd.files {
        let table = PhraseTable::read(file, &format)
            .with_context(|| format!("cannot seed from {}", file.display()))?;
        let outcome = cache.seed(table.pairs())?;

        debug!(
            file = %file.display(),
            inserted = outcome.inserted,
            existing = outcome.existing,
            "seeded"
        );
        summary.files += 1;
        summary.inserted += outcome.inserted;
        summary.existing += outcome.existing;
        summary.skipped_blank += outcome.skipped_blank;
    }

    Ok(CommandResult {
        summary: CommandSummary::Seed(summary),
    })
}
