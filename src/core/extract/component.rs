//! Reads the `$trs` bundle and `mixins` list from component options objects.
//!
//! The options object is located through the module's exports:
//! `export default { ... }`, `export default defineComponent({ ... })`,
//! `export default Vue.extend({ ... })`, or an identifier bound to one of
//! those at the top level. Named exports (`export const mixin = { ... }`,
//! `export { mixin as coachMixin }`) are used when resolving mixins.

use std::collections::HashMap;

use swc_ecma_ast::{
    Decl, Expr, ImportSpecifier, Lit, Module, ModuleDecl, ModuleExportName, ModuleItem,
    ObjectLit, Pat, Prop, PropName, PropOrSpread, Stmt,
};

use crate::core::data::TranslationBundle;

const TRS_PROPERTY: &str = "$trs";
const MIXINS_PROPERTY: &str = "mixins";
pub const DEFAULT_EXPORT: &str = "default";

/// Import statement information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Local binding name.
    pub local_name: String,
    /// Exported name in the source module: `"default"`, `"*"` or a name.
    pub imported_name: String,
    pub module_path: String,
}

/// One `mixins` entry that must be loaded from another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixinReference {
    /// Path of the unit or module that lists the mixin.
    pub importer: String,
    /// Module specifier as written in the import.
    pub specifier: String,
    /// Imported binding: `"default"` or an export name.
    pub imported: String,
}

impl MixinReference {
    pub fn new(
        importer: impl Into<String>,
        specifier: impl Into<String>,
        imported: impl Into<String>,
    ) -> Self {
        Self {
            importer: importer.into(),
            specifier: specifier.into(),
            imported: imported.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixinEntry {
    /// Imported binding.
    Import(MixinReference),
    /// Object literal written in place, or a local binding to one.
    Inline(Box<ComponentOptions>),
    /// An expression that cannot be traced to options (a call, a global).
    Unknown(String),
}

/// The translation-related parts of a component options object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentOptions {
    pub bundle: TranslationBundle,
    pub mixins: Vec<MixinEntry>,
}

/// Top-level bindings of one module, used to follow identifiers.
pub struct ModuleScope<'a> {
    module: &'a Module,
    importer: &'a str,
    imports: Vec<ImportInfo>,
    locals: HashMap<String, &'a Expr>,
}

impl<'a> ModuleScope<'a> {
    pub fn new(module: &'a Module, importer: &'a str) -> Self {
        let mut locals = HashMap::new();
        for item in &module.body {
            let decl = match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
                _ => continue,
            };
            if let Decl::Var(var) = decl {
                for declarator in &var.decls {
                    if let (Pat::Ident(ident), Some(init)) = (&declarator.name, &declarator.init) {
                        locals.insert(ident.id.sym.to_string(), &**init);
                    }
                }
            }
        }

        Self {
            module,
            importer,
            imports: collect_imports(module),
            locals,
        }
    }

    /// Options object of the default export.
    pub fn default_options(&self) -> Option<ComponentOptions> {
        self.exported_options(DEFAULT_EXPORT)
    }

    /// Options object behind the export named `name` (`"default"` included).
    pub fn exported_options(&self, name: &str) -> Option<ComponentOptions> {
        let expr = self.find_export(name)?;
        self.options_from_expr(expr, &mut Vec::new())
    }

    fn find_export(&self, name: &str) -> Option<&'a Expr> {
        for item in &self.module.body {
            let ModuleItem::ModuleDecl(decl) = item else {
                continue;
            };
            match decl {
                ModuleDecl::ExportDefaultExpr(export) if name == DEFAULT_EXPORT => {
                    return Some(&*export.expr);
                }
                ModuleDecl::ExportDecl(export) => {
                    if let Decl::Var(var) = &export.decl {
                        for declarator in &var.decls {
                            if let (Pat::Ident(ident), Some(init)) =
                                (&declarator.name, &declarator.init)
                                && ident.id.sym.as_str() == name
                            {
                                return Some(&**init);
                            }
                        }
                    }
                }
                ModuleDecl::ExportNamed(named) if named.src.is_none() => {
                    for spec in &named.specifiers {
                        if let swc_ecma_ast::ExportSpecifier::Named(spec) = spec {
                            let orig = export_name(&spec.orig);
                            let exported = spec.exported.as_ref().map_or(orig.clone(), export_name);
                            if exported == name
                                && let Some(expr) = self.locals.get(&orig).copied()
                            {
                                return Some(expr);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Follow `expr` to an options object. `seen` guards against `a = b; b = a`.
    fn options_from_expr(&self, expr: &'a Expr, seen: &mut Vec<String>) -> Option<ComponentOptions> {
        match unwrap_ts_expr(expr) {
            Expr::Object(obj) => Some(self.read_options(obj, seen)),
            // defineComponent({...}), Vue.extend({...}), Vue.component('name', {...})
            Expr::Call(call) => call.args.iter().find_map(|arg| match unwrap_ts_expr(&arg.expr) {
                Expr::Object(obj) if arg.spread.is_none() => Some(self.read_options(obj, seen)),
                _ => None,
            }),
            Expr::Ident(ident) => {
                let name = ident.sym.to_string();
                if seen.contains(&name) {
                    return None;
                }
                let init = self.locals.get(&name).copied()?;
                seen.push(name);
                let options = self.options_from_expr(init, seen);
                seen.pop();
                options
            }
            _ => None,
        }
    }

    fn read_options(&self, obj: &'a ObjectLit, seen: &mut Vec<String>) -> ComponentOptions {
        let mut options = ComponentOptions::default();

        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let (key, value): (String, &'a Expr) = match &**prop {
                Prop::KeyValue(kv) => match prop_name(&kv.key) {
                    Some(key) => (key, &*kv.value),
                    None => continue,
                },
                Prop::Shorthand(ident) => match self.locals.get(ident.sym.as_str()).copied() {
                    Some(init) => (ident.sym.to_string(), init),
                    None => continue,
                },
                _ => continue,
            };

            match key.as_str() {
                TRS_PROPERTY => {
                    if let Some(trs) = self.resolve_object(value) {
                        read_bundle(trs, &mut options.bundle);
                    }
                }
                MIXINS_PROPERTY => {
                    if let Expr::Array(arr) = unwrap_ts_expr(value) {
                        for elem in arr.elems.iter().flatten() {
                            if elem.spread.is_some() {
                                continue;
                            }
                            options.mixins.push(self.mixin_entry(&elem.expr, seen));
                        }
                    }
                }
                _ => {}
            }
        }

        options
    }

    fn resolve_object(&self, expr: &'a Expr) -> Option<&'a ObjectLit> {
        match unwrap_ts_expr(expr) {
            Expr::Object(obj) => Some(obj),
            Expr::Ident(ident) => match unwrap_ts_expr(self.locals.get(ident.sym.as_str()).copied()?) {
                Expr::Object(obj) => Some(obj),
                _ => None,
            },
            _ => None,
        }
    }

    fn mixin_entry(&self, expr: &'a Expr, seen: &mut Vec<String>) -> MixinEntry {
        let expr = unwrap_ts_expr(expr);
        if let Expr::Ident(ident) = expr {
            let name = ident.sym.as_str();
            if let Some(import) = self.imports.iter().find(|i| i.local_name == name) {
                return MixinEntry::Import(MixinReference::new(
                    self.importer,
                    &import.module_path,
                    &import.imported_name,
                ));
            }
        }
        // `helpers.coachMixin` on a namespace import
        if let Expr::Member(member) = expr
            && let (Expr::Ident(obj), swc_ecma_ast::MemberProp::Ident(prop)) =
                (&*member.obj, &member.prop)
            && let Some(import) = self
                .imports
                .iter()
                .find(|i| i.imported_name == "*" && i.local_name == obj.sym.as_str())
        {
            return MixinEntry::Import(MixinReference::new(
                self.importer,
                &import.module_path,
                prop.sym.as_str(),
            ));
        }

        match self.options_from_expr(expr, seen) {
            Some(options) => MixinEntry::Inline(Box::new(options)),
            None => MixinEntry::Unknown(describe_expr(expr)),
        }
    }
}

/// Collect all import statements in a module.
pub fn collect_imports(module: &Module) -> Vec<ImportInfo> {
    let mut imports = Vec::new();
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        let module_path = import.src.value.to_string_lossy().to_string();
        for spec in &import.specifiers {
            match spec {
                ImportSpecifier::Named(named) => {
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local_name.clone());
                    imports.push(ImportInfo {
                        local_name,
                        imported_name,
                        module_path: module_path.clone(),
                    });
                }
                ImportSpecifier::Default(default) => imports.push(ImportInfo {
                    local_name: default.local.sym.to_string(),
                    imported_name: DEFAULT_EXPORT.to_string(),
                    module_path: module_path.clone(),
                }),
                ImportSpecifier::Namespace(ns) => imports.push(ImportInfo {
                    local_name: ns.local.sym.to_string(),
                    imported_name: "*".to_string(),
                    module_path: module_path.clone(),
                }),
            }
        }
    }
    imports
}

/// Add every key of a `$trs` object to `bundle`.
///
/// Values may be plain strings or `{ message, context }` objects. Other
/// values still declare the key, with an empty message.
fn read_bundle(trs: &ObjectLit, bundle: &mut TranslationBundle) {
    for prop in &trs.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        match &**prop {
            Prop::KeyValue(kv) => {
                if let Some(key) = prop_name(&kv.key) {
                    bundle.insert(key, message_text(&kv.value).unwrap_or_default());
                }
            }
            Prop::Shorthand(ident) => bundle.insert(ident.sym.to_string(), String::new()),
            _ => {}
        }
    }
}

fn message_text(value: &Expr) -> Option<String> {
    match unwrap_ts_expr(value) {
        Expr::Object(obj) => obj.props.iter().find_map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) if prop_name(&kv.key).as_deref() == Some("message") => {
                    message_text(&kv.value)
                }
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        }),
        other => string_literal(other),
    }
}

/// A string literal or a template literal without substitutions.
fn string_literal(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(str::to_string)),
        _ => None,
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(n.value.to_string()),
        // `['key']` and `` [`key`] ``; other computed keys need evaluation.
        PropName::Computed(computed) => string_literal(&computed.expr),
        _ => None,
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

fn describe_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(ident) => ident.sym.to_string(),
        Expr::Call(_) => "<call>".to_string(),
        Expr::Member(_) => "<member>".to_string(),
        _ => "<expression>".to_string(),
    }
}
