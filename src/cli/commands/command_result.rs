use crate::issues::{Issue, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Check,
    Init,
}

/// Result of running a trlint command.
pub struct CommandResult {
    pub kind: CommandKind,
    /// All issues found during the check. Empty for `init`.
    pub issues: Vec<Issue>,
    /// Number of `undefined-string` issues.
    pub undefined_count: usize,
    /// Number of units that failed to parse or read.
    pub parse_error_count: usize,
    /// Number of `.vue` units that were checked.
    pub files_checked: usize,
}

impl CommandResult {
    pub fn from_issues(kind: CommandKind, issues: Vec<Issue>, files_checked: usize) -> Self {
        let count = |rule: Rule| issues.iter().filter(|i| i.rule() == rule).count();
        let undefined_count = count(Rule::UndefinedString);
        let parse_error_count = count(Rule::ParseError);

        Self {
            kind,
            issues,
            undefined_count,
            parse_error_count,
            files_checked,
        }
    }
}
