//! trlint - translation key checker for Vue single-file components
//!
//! trlint finds translate calls (`$tr('key')`, `this.$tr('key')` and any
//! configured aliases) whose literal key is declared neither in the
//! component's own `$trs` bundle nor in the bundle of any mixin it composes.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and cargo-style report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Unit parsing, extraction, mixin resolution and validation
//! - `issues`: Issue type definitions and reporting
//! - `logging`: `tracing` subscriber setup for the binary

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
