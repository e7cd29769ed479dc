use std::time::Duration;

use super::super::exit_status::ExitStatus;
use crate::pipeline::RunSummary;

#[derive(Debug)]
pub enum CommandSummary {
    Run(RunOutcome),
    Seed(SeedSummary),
    Status(StatusSummary),
    Init(InitSummary),
}

/// A directory run plus the wall-clock time it took.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub files: usize,
    /// Rows written as new cache entries.
    pub inserted: usize,
    /// Rows whose source was already cached; the stored target wins.
    pub existing: usize,
    /// Rows with a blank source or target.
    pub skipped_blank: usize,
}

#[derive(Debug)]
pub struct StatusSummary {
    /// In-progress files with the next row each resumes from, sorted by path.
    pub in_progress: Vec<(String, usize)>,
    /// Completed files, sorted by path.
    pub completed: Vec<String>,
    pub cache_entries: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a phrasefill command.
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    /// Exit status for the shell: a run that leaves work behind (unresolved
    /// rows, failed files, or an early stop) exits with `Failure`. The other
    /// commands report what exists and always succeed once they get this far.
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Run(outcome) => {
                if outcome.summary.is_clean() {
                    ExitStatus::Success
                } else {
                    ExitStatus::Failure
                }
            }
            CommandSummary::Seed(_) | CommandSummary::Status(_) | CommandSummary::Init(_) => {
                ExitStatus::Success
            }
        }
    }
}
