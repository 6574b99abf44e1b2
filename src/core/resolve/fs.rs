use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Component, Path, PathBuf},
};

use swc_common::SourceMap;
use tracing::debug;

use crate::core::data::TranslationBundle;
use crate::core::extract::{MixinReference, ModuleScope};
use crate::core::parsers::script::parse_module_source;
use crate::core::parsers::sfc::{ScriptLang, split_sfc};

use super::{MixinResolver, compose_bundles};

const MODULE_EXTENSIONS: &[&str] = &["js", "ts", "vue"];

/// Resolves mixin imports by reading modules from disk.
///
/// Relative specifiers are joined to the importing file's directory.
/// Aliased specifiers (`@/mixins/coach`, `kolibri.coreVue.mixins.commonCoreStrings`)
/// are mapped through the configured prefix table, longest prefix first, onto
/// directories under the project root. Bare package names are not resolved.
pub struct FsMixinResolver {
    aliases: Vec<(String, PathBuf)>,
}

impl FsMixinResolver {
    pub fn new(root: impl Into<PathBuf>, aliases: &BTreeMap<String, String>) -> Self {
        let root = root.into();
        let mut aliases: Vec<(String, PathBuf)> = aliases
            .iter()
            .map(|(prefix, target)| (prefix.clone(), root.join(target)))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { aliases }
    }

    /// File a specifier refers to, if one exists.
    pub fn resolve_path(&self, importer: &Path, specifier: &str) -> Option<PathBuf> {
        let base = if is_relative(specifier) {
            importer.parent()?.join(specifier)
        } else {
            self.aliases.iter().find_map(|(prefix, target)| {
                let rest = specifier.strip_prefix(prefix.as_str())?;
                if rest.is_empty() {
                    Some(target.clone())
                } else {
                    rest.strip_prefix('/').map(|rest| target.join(rest))
                }
            })?
        };
        find_module_file(&normalize(&base))
    }

    /// Bundle of the export `imported` of the module at `path`, merged with
    /// the bundles of its mixins. `visiting` cuts import cycles.
    fn load(
        &self,
        path: &Path,
        imported: &str,
        visiting: &mut HashSet<(PathBuf, String)>,
    ) -> Option<TranslationBundle> {
        let visit_key = (path.to_path_buf(), imported.to_string());
        if !visiting.insert(visit_key.clone()) {
            debug!(path = %path.display(), "mixin import cycle, skipping");
            return None;
        }
        let bundle = self.load_module(path, imported, visiting);
        visiting.remove(&visit_key);
        bundle
    }

    fn load_module(
        &self,
        path: &Path,
        imported: &str,
        visiting: &mut HashSet<(PathBuf, String)>,
    ) -> Option<TranslationBundle> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot read mixin module");
                return None;
            }
        };
        let (code, lang) = module_code(path, source)?;
        let path_str = path.to_string_lossy().to_string();

        let source_map = SourceMap::default();
        let parsed = match parse_module_source(code, &path_str, lang, &source_map) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(path = %path_str, error = %err.message, "cannot parse mixin module");
                return None;
            }
        };

        let options = ModuleScope::new(&parsed.module, &path_str).exported_options(imported)?;
        let mut bundle = options.bundle;
        let nested = compose_bundles(&options.mixins, &mut |reference: &MixinReference| {
            let target = self.resolve_path(Path::new(&reference.importer), &reference.specifier)?;
            self.load(&target, &reference.imported, visiting)
        });
        for mixin_bundle in &nested {
            bundle.merge(mixin_bundle);
        }
        Some(bundle)
    }
}

impl MixinResolver for FsMixinResolver {
    fn resolve(&self, reference: &MixinReference) -> Option<TranslationBundle> {
        let path = self.resolve_path(Path::new(&reference.importer), &reference.specifier)?;
        self.load(&path, &reference.imported, &mut HashSet::new())
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Script code of a module file. For `.vue` files this is the first plain
/// `<script>` block (a `<script setup>` block only when it is the sole one).
fn module_code(path: &Path, source: String) -> Option<(String, ScriptLang)> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if ext != "vue" {
        return Some((source, ScriptLang::from_extension(ext)));
    }

    let descriptor = split_sfc(&source).ok()?;
    let block = descriptor
        .scripts
        .iter()
        .find(|b| !b.setup)
        .or_else(|| descriptor.scripts.first())?;
    Some((block.content(&source).to_string(), block.lang))
}

fn find_module_file(base: &Path) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.to_path_buf());
    }

    let base_str = base.to_string_lossy();
    for ext in MODULE_EXTENSIONS {
        let with_ext = PathBuf::from(format!("{}.{}", base_str, ext));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    for ext in MODULE_EXTENSIONS {
        let index_path = base.join(format!("index.{}", ext));
        if index_path.is_file() {
            return Some(index_path);
        }
    }

    None
}

/// Drop `.` components and fold `..` so that cycle detection sees one path per file.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
