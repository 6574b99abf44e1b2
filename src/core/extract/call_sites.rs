//! Collects translate-call sites from parsed script and template code.

use swc_common::{BytePos, Span};
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit, MemberProp, OptCall};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::Region;

/// The first argument of a translate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyArgument {
    /// A string literal or a template literal without substitutions.
    Literal(String),
    /// Anything that needs evaluation: identifiers, member lookups, calls,
    /// interpolated templates, spreads. Never checked.
    Dynamic,
    /// The call has no arguments.
    Missing,
}

impl KeyArgument {
    pub fn literal(&self) -> Option<&str> {
        match self {
            KeyArgument::Literal(key) => Some(key),
            _ => None,
        }
    }

    fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Lit(Lit::Str(s)) => s
                .value
                .as_str()
                .map_or(KeyArgument::Dynamic, |v| KeyArgument::Literal(v.to_string())),
            Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
                .quasis
                .first()
                .and_then(|q| q.cooked.as_ref())
                .and_then(|cooked| cooked.as_str())
                .map_or(KeyArgument::Dynamic, |v| KeyArgument::Literal(v.to_string())),
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            _ => KeyArgument::Dynamic,
        }
    }
}

/// A recognized translate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Name the call was made through (`$tr`, `coachString`, ...).
    pub call_name: String,
    /// Whether the callee was `this.<name>`.
    pub via_this: bool,
    pub argument: KeyArgument,
    /// Byte offset of the call expression in the unit.
    pub offset: usize,
    pub region: Region,
}

/// Maps swc positions of one parsed source back to unit offsets.
#[derive(Debug, Clone, Copy)]
pub struct OffsetMap {
    /// Position of the parsed source's first byte in the `SourceMap`.
    pub start_pos: BytePos,
    /// Bytes of wrapper code in front of the original code.
    pub prefix_len: usize,
    /// Offset of the original code in the unit.
    pub unit_offset: usize,
}

impl OffsetMap {
    pub fn unit_offset(&self, pos: BytePos) -> usize {
        let rel = pos.0.saturating_sub(self.start_pos.0) as usize;
        self.unit_offset + rel.saturating_sub(self.prefix_len)
    }
}

/// swc visitor that records calls to any of `call_names`, bare or through `this`.
///
/// The walk continues into arguments, so `a.map(k => $tr(k))` and
/// `$tr('outer', { n: $tr('inner') })` are both seen.
pub struct CallSiteCollector<'a> {
    call_names: &'a [String],
    offsets: OffsetMap,
    region: Region,
    sites: Vec<CallSite>,
}

impl<'a> CallSiteCollector<'a> {
    pub fn new(call_names: &'a [String], offsets: OffsetMap, region: Region) -> Self {
        Self {
            call_names,
            offsets,
            region,
            sites: Vec::new(),
        }
    }

    pub fn collect<N: VisitWith<Self>>(mut self, node: &N) -> Vec<CallSite> {
        node.visit_with(&mut self);
        self.sites
    }

    fn is_call_name(&self, name: &str) -> bool {
        self.call_names.iter().any(|n| n == name)
    }

    /// Name of the translate function `callee` refers to, if any, and
    /// whether it was reached through `this`.
    fn match_callee(&self, callee: &Expr) -> Option<(String, bool)> {
        match callee {
            Expr::Ident(ident) if self.is_call_name(ident.sym.as_str()) => {
                Some((ident.sym.to_string(), false))
            }
            Expr::Member(member) if matches!(&*member.obj, Expr::This(_)) => {
                let name = match &member.prop {
                    MemberProp::Ident(prop) => prop.sym.to_string(),
                    MemberProp::Computed(computed) => match KeyArgument::from_expr(&computed.expr) {
                        KeyArgument::Literal(name) => name,
                        _ => return None,
                    },
                    _ => return None,
                };
                self.is_call_name(&name).then_some((name, true))
            }
            Expr::Paren(paren) => self.match_callee(&paren.expr),
            _ => None,
        }
    }

    fn record(&mut self, callee: &Expr, args: &[ExprOrSpread], span: Span) {
        let Some((call_name, via_this)) = self.match_callee(callee) else {
            return;
        };
        let argument = match args.first() {
            None => KeyArgument::Missing,
            Some(arg) if arg.spread.is_some() => KeyArgument::Dynamic,
            Some(arg) => KeyArgument::from_expr(&arg.expr),
        };
        self.sites.push(CallSite {
            call_name,
            via_this,
            argument,
            offset: self.offsets.unit_offset(span.lo),
            region: self.region,
        });
    }
}

impl Visit for CallSiteCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee {
            self.record(callee, &node.args, node.span);
        }
        node.visit_children_with(self);
    }

    /// `this.$tr?.('key')`
    fn visit_opt_call(&mut self, node: &OptCall) {
        self.record(&node.callee, &node.args, node.span);
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_common::SourceMap;

    use super::*;
    use crate::core::parsers::script::{parse_module_source, parse_snippet};
    use crate::core::parsers::sfc::ScriptLang;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn collect_module(code: &str, call_names: &[String]) -> Vec<CallSite> {
        let source_map = SourceMap::default();
        let parsed =
            parse_module_source(code.to_string(), "t.vue", ScriptLang::JavaScript, &source_map)
                .unwrap();
        let offsets = OffsetMap {
            start_pos: parsed.start_pos,
            prefix_len: 0,
            unit_offset: 0,
        };
        CallSiteCollector::new(call_names, offsets, Region::Logic).collect(&parsed.module)
    }

    fn literals(sites: &[CallSite]) -> Vec<Option<&str>> {
        sites.iter().map(|s| s.argument.literal()).collect()
    }

    #[test]
    fn test_bare_and_this_calls() {
        let code = "export default {\n  methods: {\n    label() { return this.$tr('personLabel') + $tr('other'); },\n  },\n};";
        let sites = collect_module(code, &names(&["$tr"]));

        assert_eq!(literals(&sites), vec![Some("personLabel"), Some("other")]);
        assert!(sites[0].via_this);
        assert!(!sites[1].via_this);
        assert_eq!(&code[sites[0].offset..sites[0].offset + 8], "this.$tr");
        assert_eq!(&code[sites[1].offset..sites[1].offset + 4], "$tr(");
    }

    #[test]
    fn test_computed_and_optional_this_calls() {
        let code = "this['$tr']('computed');\nthis.$tr?.('optional');\nthis[name]('dynamicName');\nvm.$tr('otherReceiver');";
        let sites = collect_module(code, &names(&["$tr"]));

        assert_eq!(literals(&sites), vec![Some("computed"), Some("optional")]);
        assert!(sites.iter().all(|site| site.via_this));
    }

    #[test]
    fn test_dynamic_arguments() {
        let code = r#"
            const label = map[this.kind];
            this.$tr(label);
            ['topic', 'channel'].map(f => $tr(f) + ":");
            $tr(`${prefix}.title`);
            $tr(...args);
            $tr();
        "#;
        let sites = collect_module(code, &names(&["$tr"]));

        assert_eq!(
            sites.iter().map(|s| s.argument.clone()).collect::<Vec<_>>(),
            vec![
                KeyArgument::Dynamic,
                KeyArgument::Dynamic,
                KeyArgument::Dynamic,
                KeyArgument::Dynamic,
                KeyArgument::Missing,
            ]
        );
    }

    #[test]
    fn test_plain_template_literal_is_literal() {
        let sites = collect_module("$tr(`plain`); $tr(('wrapped'));", &names(&["$tr"]));
        assert_eq!(literals(&sites), vec![Some("plain"), Some("wrapped")]);
    }

    #[test]
    fn test_aliases_and_unrelated_calls() {
        let code = "coachString('coachLabel'); this.coreString('core'); vm.$tr('other'); tr('x'); this.$trs.a;";
        let sites = collect_module(code, &names(&["$tr", "coachString", "coreString"]));

        assert_eq!(literals(&sites), vec![Some("coachLabel"), Some("core")]);
        assert_eq!(sites[0].call_name, "coachString");
        assert_eq!(sites[1].call_name, "coreString");
    }

    #[test]
    fn test_nested_calls_in_arguments() {
        let sites = collect_module("$tr('outer', { n: $tr('inner') });", &names(&["$tr"]));
        assert_eq!(literals(&sites), vec![Some("outer"), Some("inner")]);
    }

    #[test]
    fn test_snippet_offsets_map_to_unit() {
        let unit = "<h1>{{ $tr('helloWorld') }}</h1>";
        let code_offset = unit.find("{{").unwrap() + 2;
        let code = &unit[code_offset..unit.find("}}").unwrap()];

        let source_map = SourceMap::default();
        let snippet =
            parse_snippet(code, "t.vue", ScriptLang::JavaScript, false, &source_map).unwrap();
        let offsets = OffsetMap {
            start_pos: snippet.start_pos,
            prefix_len: snippet.prefix_len,
            unit_offset: code_offset,
        };
        let names = names(&["$tr"]);
        let sites =
            CallSiteCollector::new(&names, offsets, Region::Markup).collect(&snippet.script);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].region, Region::Markup);
        assert_eq!(&unit[sites[0].offset..sites[0].offset + 4], "$tr(");
    }
}
