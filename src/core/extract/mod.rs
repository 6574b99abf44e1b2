//! Extraction from parsed units: component options and translate-call sites.

pub mod call_sites;
pub mod component;

pub use call_sites::{CallSite, CallSiteCollector, KeyArgument, OffsetMap};
pub use component::{
    ComponentOptions, ImportInfo, MixinEntry, MixinReference, ModuleScope, collect_imports,
};
