use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap, Spanned};
use swc_ecma_ast::{Module, Script};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, error::Error};

use crate::core::parsers::sfc::ScriptLang;

/// A parse failure, located relative to the parsed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFailure {
    pub offset: usize,
    pub message: String,
}

impl SyntaxFailure {
    fn from_swc(err: &Error, start_pos: BytePos) -> Self {
        Self {
            offset: err.span().lo.0.saturating_sub(start_pos.0) as usize,
            message: err.kind().msg().to_string(),
        }
    }
}

/// A parsed script block or mixin module.
///
/// `start_pos` is the position of the first byte of the code in the shared
/// `SourceMap`; subtract it from a span to get an offset into the code.
pub struct ParsedModule {
    pub module: Module,
    pub start_pos: BytePos,
}

/// A parsed markup snippet.
///
/// Expressions are wrapped as `(<code>\n);` before parsing so the whole
/// snippet must form exactly one expression; `prefix_len` is the length of
/// the wrapper before the original code.
pub struct ParsedSnippet {
    pub script: Script,
    pub start_pos: BytePos,
    pub prefix_len: usize,
}

fn syntax_for(lang: ScriptLang) -> Syntax {
    match lang {
        ScriptLang::JavaScript => Syntax::Es(EsSyntax {
            decorators: true,
            ..Default::default()
        }),
        ScriptLang::TypeScript => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parse a script block or module source.
///
/// Accepts a shared SourceMap; each call adds one source file to it.
pub fn parse_module_source(
    code: String,
    file_path: &str,
    lang: ScriptLang,
    source_map: &SourceMap,
) -> Result<ParsedModule, SyntaxFailure> {
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);
        let start_pos = source_file.start_pos;

        let mut parser = Parser::new(syntax_for(lang), StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| SyntaxFailure::from_swc(&e, start_pos))?;
        // Errors the parser recovered from still make the code invalid.
        if let Some(err) = parser.take_errors().first() {
            return Err(SyntaxFailure::from_swc(err, start_pos));
        }

        Ok(ParsedModule { module, start_pos })
    })
}

/// Parse one template snippet.
///
/// With `as_statements` the code is parsed as a statement list (event
/// handlers such as `a = 1; save()`), otherwise as a single expression.
pub fn parse_snippet(
    code: &str,
    file_path: &str,
    lang: ScriptLang,
    as_statements: bool,
    source_map: &SourceMap,
) -> Result<ParsedSnippet, SyntaxFailure> {
    let (wrapped, prefix_len) = if as_statements {
        (code.to_string(), 0)
    } else {
        (format!("({}\n);", code), 1)
    };

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), wrapped);
        let start_pos = source_file.start_pos;

        let mut parser = Parser::new(syntax_for(lang), StringInput::from(&*source_file), None);
        let to_failure = |e: &Error| {
            let mut failure = SyntaxFailure::from_swc(e, start_pos);
            failure.offset = failure.offset.saturating_sub(prefix_len).min(code.len());
            failure
        };
        let script = parser.parse_script().map_err(|e| to_failure(&e))?;
        if let Some(err) = parser.take_errors().first() {
            return Err(to_failure(err));
        }

        Ok(ParsedSnippet {
            script,
            start_pos,
            prefix_len,
        })
    })
}
