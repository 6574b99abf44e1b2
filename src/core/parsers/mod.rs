//! Parsers for `.vue` units and mixin modules.
//!
//! - `sfc`: splits a unit into `<template>` and `<script>` blocks
//! - `template`: finds expressions embedded in template markup
//! - `script`: swc parsing of script blocks, modules and template snippets
//! - `line_index`: byte offset → line/column lookups

pub mod line_index;
pub mod script;
pub mod sfc;
pub mod template;
