//! Checking engine for Vue single-file components.
//!
//! A unit goes through the same stages every time:
//!
//! 1. `parsers`: split the `.vue` source into blocks and parse each with swc
//! 2. `extract`: read the component options (`$trs`, `mixins`) and collect
//!    translate-call sites from template and script
//! 3. `resolve`: load the bundles contributed by mixins
//! 4. `validate`: report literal keys missing from the effective key set
//!
//! `context` drives this over a whole project.

pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod resolve;
pub mod validate;

pub use context::CheckContext;
pub use data::{BundleEntry, EffectiveKeySet, Region, SourceContext, SourceLocation, TranslationBundle};
pub use error::UnitError;
pub use resolve::{FsMixinResolver, MixinResolver, NoMixins, StaticMixinResolver};
pub use validate::{ReportSink, UnitReport, UnitValidator, Violation};
