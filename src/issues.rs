//! Issue types for translation-key usage checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;
use crate::core::validate::undefined_message;

// ============================================================
// Rule
// ============================================================

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UndefinedString,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UndefinedString => write!(f, "undefined-string"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A literal key passed to a translate call but declared in neither the
/// unit's `$trs` nor any of its mixins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedStringIssue {
    pub context: SourceContext,
    /// The undeclared key.
    pub key: String,
}

impl UndefinedStringIssue {
    pub fn rule() -> Rule {
        Rule::UndefinedString
    }
}

/// Unit could not be parsed. Reported once per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    /// Line of the failure, when known.
    pub line: Option<usize>,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while checking units. Every issue is an error.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UndefinedString(UndefinedStringIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn rule(&self) -> Rule {
        match self {
            Issue::UndefinedString(_) => UndefinedStringIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }

    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path, .. } => path,
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level, optionally with a line (no source context).
    File { path: &'a str, line: Option<usize> },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on
/// `Issue` without dynamic dispatch.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for UndefinedStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        undefined_message(&self.key)
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
