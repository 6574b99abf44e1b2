use std::fmt;

/// Which part of a single-file component a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    /// Inside the `<template>` block (interpolations and directive values).
    Markup,
    /// Inside the `<script>` block.
    Logic,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Markup => write!(f, "template"),
            Region::Logic => write!(f, "script"),
        }
    }
}

/// Pure position information in a `.vue` unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with context information in a `.vue` unit.
///
/// Carries the source line so the reporter can print it with a caret under
/// the offending call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
    pub region: Region,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>, region: Region) -> Self {
        Self {
            location,
            source_line: source_line.into(),
            region,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
