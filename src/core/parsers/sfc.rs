//! Splits a Vue single-file component into its `<template>` and `<script>` blocks.
//!
//! Only block boundaries are located here. Block contents are handed to the
//! template scanner and the swc script parser, both of which work with byte
//! offsets relative to the whole unit so diagnostics point into the original file.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::UnitError;
use crate::core::parsers::line_index::LineIndex;

static LANG_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\blang\s*=\s*["']?([A-Za-z]+)"#).expect("valid regex"));

static SETUP_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)setup(?:\s|=|$)").expect("valid regex"));

/// Syntax of a script block or script module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptLang {
    #[default]
    JavaScript,
    TypeScript,
}

impl ScriptLang {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "ts" | "mts" | "cts" | "tsx" => ScriptLang::TypeScript,
            _ => ScriptLang::JavaScript,
        }
    }
}

/// A top-level block: the byte range of its content within the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock {
    pub start: usize,
    pub end: usize,
    pub lang: ScriptLang,
    /// `<script setup>`.
    pub setup: bool,
}

impl SfcBlock {
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor {
    pub template: Option<SfcBlock>,
    pub scripts: Vec<SfcBlock>,
}

/// Locate the blocks of `source`.
///
/// The first top-level `<template>` wins; nested `<template>` tags are
/// balanced. Every `<script>` block is returned. `<style>` and custom
/// blocks are skipped.
pub fn split_sfc(source: &str) -> Result<SfcDescriptor, UnitError> {
    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let line_of = |offset: usize| LineIndex::new(source).line(offset);

    let mut pos = 0;
    while let Some(rel) = source[pos..].find('<') {
        let tag_start = pos + rel;

        if source[tag_start..].starts_with("<!--") {
            pos = source[tag_start..]
                .find("-->")
                .map_or(source.len(), |end| tag_start + end + 3);
            continue;
        }

        // A `<` in plain text does not start a tag.
        if !bytes
            .get(tag_start + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'/' || b == b'!')
        {
            pos = tag_start + 1;
            continue;
        }

        let Some(open_end) = find_tag_end(bytes, tag_start) else {
            break;
        };

        if is_tag_at(source, tag_start, "template") && source[..open_end].ends_with("/>") {
            if descriptor.template.is_none() {
                descriptor.template = Some(SfcBlock {
                    start: open_end,
                    end: open_end,
                    lang: ScriptLang::JavaScript,
                    setup: false,
                });
            }
            pos = open_end;
        } else if is_tag_at(source, tag_start, "template") {
            let close = find_matching_template_close(source, open_end).ok_or_else(|| {
                UnitError::UnclosedBlock {
                    tag: "template",
                    line: line_of(tag_start),
                }
            })?;
            if descriptor.template.is_none() {
                descriptor.template = Some(SfcBlock {
                    start: open_end,
                    end: close,
                    lang: ScriptLang::JavaScript,
                    setup: false,
                });
            }
            pos = find_tag_end(bytes, close).unwrap_or(source.len());
        } else if is_tag_at(source, tag_start, "script") {
            let close = source[open_end..]
                .find("</script")
                .map(|rel| open_end + rel)
                .ok_or_else(|| UnitError::UnclosedBlock {
                    tag: "script",
                    line: line_of(tag_start),
                })?;
            let attrs = &source[tag_start + "<script".len()..open_end - 1];
            descriptor.scripts.push(SfcBlock {
                start: open_end,
                end: close,
                lang: script_lang(attrs),
                setup: SETUP_ATTR.is_match(attrs),
            });
            pos = find_tag_end(bytes, close).unwrap_or(source.len());
        } else if is_tag_at(source, tag_start, "style") {
            pos = source[open_end..]
                .find("</style")
                .and_then(|rel| find_tag_end(bytes, open_end + rel))
                .unwrap_or(source.len());
        } else {
            pos = open_end;
        }
    }

    Ok(descriptor)
}

fn script_lang(attrs: &str) -> ScriptLang {
    LANG_ATTR
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map_or(ScriptLang::JavaScript, |m| {
            ScriptLang::from_extension(m.as_str())
        })
}

/// True when an opening tag `<name` starts at `pos` and the name ends there.
pub(crate) fn is_tag_at(source: &str, pos: usize, name: &str) -> bool {
    let rest = &source[pos..];
    rest.strip_prefix('<')
        .and_then(|r| r.strip_prefix(name))
        .is_some_and(|after| {
            after
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
        })
}

/// Byte offset just past the `>` closing the tag that starts at `pos`.
///
/// Quoted attribute values may contain `>`.
pub(crate) fn find_tag_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(pos) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

/// Offset of the `</template` that balances an opening tag ending at `from`.
fn find_matching_template_close(source: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(rel) = source[pos..].find('<') {
        let at = pos + rel;
        if source[at..].starts_with("<!--") {
            pos = source[at..].find("-->").map(|end| at + end + 3)?;
            continue;
        }
        if source[at..].starts_with("</template") {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
        } else if is_tag_at(source, at, "template") {
            let end = find_tag_end(source.as_bytes(), at)?;
            if !source[..end].ends_with("/>") {
                depth += 1;
            }
        }
        pos = at + 1;
    }
    None
}
