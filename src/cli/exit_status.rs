use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for batch
/// tools.
///
/// - `Success` (0): command completed and nothing is left to do
/// - `Failure` (1): command ran but left work behind (unresolved rows,
///   failed files, or an early stop)
/// - `Error` (2): command could not run (bad usage, config error, cache
///   unavailable)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
