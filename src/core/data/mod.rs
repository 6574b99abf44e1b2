//! Core data types shared by the parsing, extraction and validation stages.
//!
//! - `bundle`: `$trs` bundles and the per-unit effective key set
//! - `source`: source positions inside a `.vue` unit

pub mod bundle;
pub mod source;

pub use bundle::{BundleEntry, EffectiveKeySet, TranslationBundle};
pub use source::{Region, SourceContext, SourceLocation};
