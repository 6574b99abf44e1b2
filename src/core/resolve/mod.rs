//! Mixin resolution: turning `mixins` entries into the bundles they contribute.
//!
//! A resolver only answers for imported mixins. Inline object mixins carry
//! their bundle directly and are flattened here, together with whatever
//! mixins they list in turn.

mod fs;
mod in_memory;

pub use fs::FsMixinResolver;
pub use in_memory::StaticMixinResolver;

use tracing::{debug, warn};

use crate::core::data::TranslationBundle;
use crate::core::extract::{MixinEntry, MixinReference};

/// Loads the bundle an imported mixin contributes.
///
/// `None` means the mixin could not be loaded. That is never fatal: the
/// mixin simply adds no keys.
pub trait MixinResolver: Sync {
    /// Bundle of the referenced mixin, including the keys of its own mixins.
    fn resolve(&self, reference: &MixinReference) -> Option<TranslationBundle>;
}

/// Resolver for units that compose nothing from other files.
pub struct NoMixins;

impl MixinResolver for NoMixins {
    fn resolve(&self, _reference: &MixinReference) -> Option<TranslationBundle> {
        None
    }
}

/// Collect the bundles contributed by `mixins`, in list order.
///
/// Inline mixins are expanded recursively. Imported mixins go through
/// `resolve`; a failed lookup is logged and skipped.
pub fn compose_bundles<F>(mixins: &[MixinEntry], resolve: &mut F) -> Vec<TranslationBundle>
where
    F: FnMut(&MixinReference) -> Option<TranslationBundle>,
{
    let mut bundles = Vec::new();
    collect_into(mixins, resolve, &mut bundles);
    bundles
}

fn collect_into<F>(mixins: &[MixinEntry], resolve: &mut F, bundles: &mut Vec<TranslationBundle>)
where
    F: FnMut(&MixinReference) -> Option<TranslationBundle>,
{
    for mixin in mixins {
        match mixin {
            MixinEntry::Inline(options) => {
                bundles.push(options.bundle.clone());
                collect_into(&options.mixins, resolve, bundles);
            }
            MixinEntry::Import(reference) => match resolve(reference) {
                Some(bundle) => {
                    debug!(
                        specifier = %reference.specifier,
                        keys = bundle.len(),
                        "resolved mixin"
                    );
                    bundles.push(bundle);
                }
                None => warn!(
                    importer = %reference.importer,
                    specifier = %reference.specifier,
                    imported = %reference.imported,
                    "cannot resolve mixin, it contributes no keys"
                ),
            },
            MixinEntry::Unknown(expr) => {
                debug!(expr = %expr, "skipping mixin that is not a static reference");
            }
        }
    }
}
