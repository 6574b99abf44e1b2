//! Finds the JavaScript expressions embedded in a `<template>` block.
//!
//! Vue markup carries code in three places:
//! - `{{ expr }}` interpolations in text
//! - directive values: `v-if="expr"`, `v-bind:title="expr"`, `:title="expr"`
//! - event handlers: `@click="expr"` / `v-on:click="stmt; stmt"`
//!
//! Slot bindings (`v-slot`, `#name`, `slot-scope`) are patterns, not
//! expressions, and are skipped. For `v-for` only the iterated source
//! (the part after `in`/`of`) is returned.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::UnitError;
use crate::core::parsers::line_index::LineIndex;
use crate::core::parsers::sfc::find_tag_end;

static V_FOR_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    // Alias forms: `item`, `(item, index)`, `{ id, name }`, `[key, value]`,
    // with one level of nested destructuring.
    Regex::new(
        r"^\s*(?:\([^)]*\)|\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}|\[[^\[\]]*(?:\[[^\[\]]*\][^\[\]]*)*\]|[^\s]+)\s+(?:in|of)\s+",
    )
    .expect("valid regex")
});

/// How an embedded snippet must be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// A single expression.
    Expression,
    /// An event handler; may be a statement list.
    Handler,
}

/// One code snippet from the markup, located by its byte offset in the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateExpr {
    pub offset: usize,
    pub code: String,
    pub kind: ExprKind,
}

/// Collect every embedded snippet in `source[start..end]`, in source order.
pub fn scan_template(source: &str, start: usize, end: usize) -> Result<Vec<TemplateExpr>, UnitError> {
    let bytes = source.as_bytes();
    let mut exprs = Vec::new();
    let mut i = start;

    while i < end {
        let rest = &source[i..end];
        if rest.starts_with("<!--") {
            i = rest.find("-->").map_or(end, |rel| i + rel + 3);
        } else if rest.starts_with("{{") {
            let code_start = i + 2;
            let Some(rel) = source[code_start..end].find("}}") else {
                return Err(UnitError::UnclosedInterpolation {
                    line: LineIndex::new(source).line(i),
                });
            };
            push_expr(&mut exprs, source, code_start, code_start + rel, ExprKind::Expression);
            i = code_start + rel + 2;
        } else if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            i = scan_start_tag(source, i + 1, end, &mut exprs);
        } else if rest.starts_with("</") {
            i = find_tag_end(&bytes[..end], i).unwrap_or(end);
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    Ok(exprs)
}

/// Scan the name and attributes of a start tag, returning the offset after it.
fn scan_start_tag(source: &str, name_start: usize, end: usize, exprs: &mut Vec<TemplateExpr>) -> usize {
    let bytes = source.as_bytes();
    let mut i = name_start;
    while i < end && !is_name_terminator(bytes[i]) {
        i += 1;
    }

    loop {
        while i < end && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= end {
            return end;
        }
        match bytes[i] {
            b'>' => return i + 1,
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < end && !is_name_terminator(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let name = &source[attr_start..i];

        while i < end && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= end || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < end && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= end {
            return end;
        }

        let (value_start, value_end) = if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            let value_start = i + 1;
            let value_end = bytes[value_start..end]
                .iter()
                .position(|&b| b == quote)
                .map_or(end, |rel| value_start + rel);
            i = (value_end + 1).min(end);
            (value_start, value_end)
        } else {
            let value_start = i;
            while i < end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            (value_start, i)
        };

        classify_attribute(source, name, value_start, value_end, exprs);
    }
}

fn is_name_terminator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

fn classify_attribute(
    source: &str,
    name: &str,
    value_start: usize,
    value_end: usize,
    exprs: &mut Vec<TemplateExpr>,
) {
    if name == "v-slot" || name.starts_with("v-slot:") || name.starts_with('#') || name == "slot-scope"
    {
        return;
    }

    if name == "v-for" {
        let value = &source[value_start..value_end];
        if let Some(m) = V_FOR_ALIAS.find(value) {
            push_expr(exprs, source, value_start + m.end(), value_end, ExprKind::Expression);
        }
        return;
    }

    if name.starts_with('@') || name.starts_with("v-on:") || name == "v-on" {
        push_expr(exprs, source, value_start, value_end, ExprKind::Handler);
    } else if name.starts_with("v-") || name.starts_with(':') {
        push_expr(exprs, source, value_start, value_end, ExprKind::Expression);
    }
}

fn push_expr(exprs: &mut Vec<TemplateExpr>, source: &str, start: usize, end: usize, kind: ExprKind) {
    let code = &source[start..end];
    if code.trim().is_empty() {
        return;
    }
    exprs.push(TemplateExpr {
        offset: start,
        code: code.to_string(),
        kind,
    });
}
