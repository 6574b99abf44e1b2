use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status of `trlint`.
///
/// Undeclared keys and units that fail to parse are both findings about the
/// checked code, so either one gives `Failure`. `Error` is reserved for runs
/// that could not check anything: an invalid `.trlintrc.json`, a source root
/// that is not a directory, or `init` refusing to overwrite a config.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every unit was checked and nothing was reported (0).
    Success,
    /// At least one `undefined-string` or `parse-error` issue (1).
    Failure,
    /// The command itself failed (2).
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.issues.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code: u8 = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
