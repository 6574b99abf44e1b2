use std::collections::HashMap;

use crate::core::data::TranslationBundle;
use crate::core::extract::MixinReference;
use crate::core::extract::component::DEFAULT_EXPORT;

use super::MixinResolver;

/// Resolver backed by a fixed specifier → bundle table.
///
/// Lookups ignore the importing file. Useful for tests and for embedding the
/// validator where mixin bundles are already known.
#[derive(Debug, Clone, Default)]
pub struct StaticMixinResolver {
    bundles: HashMap<(String, String), TranslationBundle>,
}

impl StaticMixinResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default export of `specifier`.
    pub fn insert(&mut self, specifier: impl Into<String>, bundle: TranslationBundle) {
        self.insert_named(specifier, DEFAULT_EXPORT, bundle);
    }

    /// Register the export `name` of `specifier`.
    pub fn insert_named(
        &mut self,
        specifier: impl Into<String>,
        name: impl Into<String>,
        bundle: TranslationBundle,
    ) {
        self.bundles.insert((specifier.into(), name.into()), bundle);
    }

    pub fn with(mut self, specifier: impl Into<String>, bundle: TranslationBundle) -> Self {
        self.insert(specifier, bundle);
        self
    }
}

impl MixinResolver for StaticMixinResolver {
    fn resolve(&self, reference: &MixinReference) -> Option<TranslationBundle> {
        self.bundles
            .get(&(reference.specifier.clone(), reference.imported.clone()))
            .cloned()
    }
}
