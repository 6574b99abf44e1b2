//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept out of `core` so the
//! checker can be used as a library without touching stdout.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandKind, CommandResult};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Rule};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Issues are sorted by file, line and column before printing.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let msg = format!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} vue {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
    let _ = writeln!(writer, "{}", msg);
}

pub fn print(result: &CommandResult) {
    match result.kind {
        CommandKind::Check => {
            if result.issues.is_empty() {
                print_success(result.files_checked);
            } else {
                report(&result.issues);
            }
        }
        CommandKind::Init => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
        }
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let ctx = match issue.location() {
        ReportLocation::Source(ctx) => ctx,
        ReportLocation::File { path, line } => {
            match line {
                Some(line) => {
                    let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, line);
                }
                None => {
                    let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
                }
            }
            let _ = writeln!(writer);
            return;
        }
    };

    // Clickable location: --> path:line:col
    let (line, col) = (ctx.line(), ctx.col());
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), ctx.file_path(), line, col);

    let source_line = ctx.source_line.as_str();
    let caret_char = "^".red();

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret under the column (col is 1-based, counted in chars)
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let count = |rule: Rule| issues.iter().filter(|i| i.report_rule() == rule).count();
    let undefined = count(Rule::UndefinedString);
    let parse_errors = count(Rule::ParseError);
    let total = issues.len();

    if total > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total,
            if total == 1 { "problem" } else { "problems" },
            undefined,
            Rule::UndefinedString.to_string().red(),
            parse_errors,
            Rule::ParseError.to_string().red(),
        );
    }
}

/// (path, line, col) used for ordering; file-level issues sort first in their file.
fn sort_key<'a>(loc: &ReportLocation<'a>) -> (&'a str, usize, usize) {
    match loc {
        ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
        ReportLocation::File { path, line } => (*path, line.unwrap_or(0), 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    sort_key(&a.location()).cmp(&sort_key(&b.location()))
}
