//! Translation-key usage validation for one `.vue` unit.
//!
//! Every `$tr('key')` style call in the template and in the script blocks is
//! checked against the unit's effective key set: its own `$trs` plus the
//! `$trs` of every mixin it composes. Calls whose key is not a literal are
//! left alone.

use swc_common::SourceMap;
use tracing::debug;

use crate::core::data::{EffectiveKeySet, Region, SourceContext, SourceLocation, TranslationBundle};
use crate::core::error::UnitError;
use crate::core::extract::{
    CallSite, CallSiteCollector, ComponentOptions, MixinReference, ModuleScope, OffsetMap,
};
use crate::core::parsers::line_index::LineIndex;
use crate::core::parsers::script::{ParsedSnippet, SyntaxFailure, parse_module_source, parse_snippet};
use crate::core::parsers::sfc::{ScriptLang, SfcDescriptor, split_sfc};
use crate::core::parsers::template::{ExprKind, TemplateExpr, scan_template};
use crate::core::resolve::{MixinResolver, compose_bundles};

/// Default translate call name.
pub const DEFAULT_CALL_NAME: &str = "$tr";

/// A literal key that is not in the effective key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub key: String,
    /// Call name the key was passed to.
    pub call_name: String,
    /// Byte offset of the call in the unit.
    pub offset: usize,
    pub context: SourceContext,
}

impl Violation {
    pub fn message(&self) -> String {
        undefined_message(&self.key)
    }
}

/// `Message not defined in $trs: "<key>"`
pub fn undefined_message(key: &str) -> String {
    format!("Message not defined in $trs: \"{}\"", key)
}

/// Outcome of validating one unit.
#[derive(Debug, Clone, Default)]
pub struct UnitReport {
    /// Violations in source order.
    pub violations: Vec<Violation>,
    /// Translate calls found, literal or not.
    pub call_count: usize,
    /// Size of the effective key set.
    pub key_count: usize,
}

/// Receives `(message, location)` pairs.
pub trait ReportSink {
    fn report(&mut self, message: String, location: SourceLocation);
}

impl ReportSink for Vec<(String, SourceLocation)> {
    fn report(&mut self, message: String, location: SourceLocation) {
        self.push((message, location));
    }
}

/// Validates units against their declared and composed `$trs`.
pub struct UnitValidator<'r> {
    call_names: Vec<String>,
    resolver: &'r dyn MixinResolver,
}

impl<'r> UnitValidator<'r> {
    /// `call_names` are matched both bare (`$tr(...)`) and on `this` (`this.$tr(...)`).
    pub fn new(call_names: Vec<String>, resolver: &'r dyn MixinResolver) -> Self {
        Self {
            call_names,
            resolver,
        }
    }

    /// Validate one unit, reporting each violation to `sink` in source order.
    ///
    /// Returns the number of violations reported.
    pub fn validate_into(
        &self,
        file_path: &str,
        source: &str,
        sink: &mut dyn ReportSink,
    ) -> Result<usize, UnitError> {
        let report = self.validate(file_path, source)?;
        for violation in &report.violations {
            sink.report(violation.message(), violation.context.location.clone());
        }
        Ok(report.violations.len())
    }

    /// Validate one unit.
    ///
    /// A unit that cannot be parsed yields a single `UnitError` and no violations.
    pub fn validate(&self, file_path: &str, source: &str) -> Result<UnitReport, UnitError> {
        let descriptor = split_sfc(source)?;
        let line_index = LineIndex::new(source);
        let source_map = SourceMap::default();

        let mut sites = self.template_call_sites(&descriptor, file_path, source, &line_index, &source_map)?;

        let mut options: Option<ComponentOptions> = None;
        for block in &descriptor.scripts {
            let parsed = parse_module_source(
                block.content(source).to_string(),
                file_path,
                block.lang,
                &source_map,
            )
            .map_err(|failure| UnitError::Script {
                line: line_index.line(block.start + failure.offset),
                message: failure.message,
            })?;

            let offsets = OffsetMap {
                start_pos: parsed.start_pos,
                prefix_len: 0,
                unit_offset: block.start,
            };
            sites.extend(
                CallSiteCollector::new(&self.call_names, offsets, Region::Logic)
                    .collect(&parsed.module),
            );

            if options.is_none() && !block.setup {
                options = ModuleScope::new(&parsed.module, file_path).default_options();
            }
        }

        let ComponentOptions { bundle, mixins } = options.unwrap_or_default();
        let composed: Vec<TranslationBundle> =
            compose_bundles(&mixins, &mut |reference: &MixinReference| {
                self.resolver.resolve(reference)
            });
        let key_set = EffectiveKeySet::new(&bundle, &composed);

        sites.sort_by_key(|site| site.offset);
        let violations: Vec<Violation> = sites
            .iter()
            .filter_map(|site| {
                let key = site.argument.literal()?;
                if key_set.contains(key) {
                    return None;
                }
                Some(self.violation(site, key, file_path, source, &line_index))
            })
            .collect();

        debug!(
            file = file_path,
            calls = sites.len(),
            keys = key_set.len(),
            mixins = mixins.len(),
            violations = violations.len(),
            "validated unit"
        );

        Ok(UnitReport {
            violations,
            call_count: sites.len(),
            key_count: key_set.len(),
        })
    }

    fn template_call_sites(
        &self,
        descriptor: &SfcDescriptor,
        file_path: &str,
        source: &str,
        line_index: &LineIndex,
        source_map: &SourceMap,
    ) -> Result<Vec<CallSite>, UnitError> {
        let Some(template) = &descriptor.template else {
            return Ok(Vec::new());
        };
        // Template expressions follow the script's syntax (`lang="ts"` allows `as` casts).
        let lang = descriptor
            .scripts
            .first()
            .map_or(ScriptLang::JavaScript, |b| b.lang);

        let mut sites = Vec::new();
        for expr in scan_template(source, template.start, template.end)? {
            let snippet = parse_template_expr(&expr, file_path, lang, source_map).map_err(
                |failure| UnitError::TemplateExpression {
                    line: line_index.line(expr.offset + failure.offset),
                    message: failure.message,
                },
            )?;
            let offsets = OffsetMap {
                start_pos: snippet.start_pos,
                prefix_len: snippet.prefix_len,
                unit_offset: expr.offset,
            };
            sites.extend(
                CallSiteCollector::new(&self.call_names, offsets, Region::Markup)
                    .collect(&snippet.script),
            );
        }
        Ok(sites)
    }

    fn violation(
        &self,
        site: &CallSite,
        key: &str,
        file_path: &str,
        source: &str,
        line_index: &LineIndex,
    ) -> Violation {
        let (line, col) = line_index.line_col(source, site.offset);
        let location = SourceLocation::new(file_path, line, col);
        Violation {
            key: key.to_string(),
            call_name: site.call_name.clone(),
            offset: site.offset,
            context: SourceContext::new(location, line_index.line_text(source, line), site.region),
        }
    }
}

/// Handlers may be statement lists (`a = 1; save()`); they are tried as an
/// expression first.
fn parse_template_expr(
    expr: &TemplateExpr,
    file_path: &str,
    lang: ScriptLang,
    source_map: &SourceMap,
) -> Result<ParsedSnippet, SyntaxFailure> {
    match expr.kind {
        ExprKind::Expression => parse_snippet(&expr.code, file_path, lang, false, source_map),
        ExprKind::Handler => parse_snippet(&expr.code, file_path, lang, false, source_map)
            .or_else(|_| parse_snippet(&expr.code, file_path, lang, true, source_map)),
    }
}
