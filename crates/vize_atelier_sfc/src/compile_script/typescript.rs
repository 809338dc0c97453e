//! Strip TypeScript syntax from already-rewritten script-setup output.
//!
//! Runs after the macro pipeline has rewritten `defineProps`/`defineEmits`/etc.
//! call sites, so by this point the remaining TypeScript surface is just type
//! annotations, interfaces, type aliases and `as` assertions sitting around
//! otherwise-valid JS -- exactly what `oxc_transformer`'s TypeScript preset
//! removes.

use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer, TypeScriptOptions};

/// Transpile TypeScript source to plain JavaScript, stripping type-only
/// syntax. On any parse/transform failure the input is returned unchanged --
/// this runs on compiler-generated output, not arbitrary user code, so a
/// failure here means an upstream rewrite produced invalid TS and silently
/// keeping the TS-ish text is safer than panicking the whole compile.
pub fn transform_typescript_to_js(code: &str) -> String {
    let allocator = Allocator::default();
    let source_type = SourceType::ts();
    let ret = Parser::new(&allocator, code, source_type).parse();
    if !ret.errors.is_empty() {
        return code.to_string();
    }

    let mut program = ret.program;
    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
        return code.to_string();
    }
    let (symbols, scopes) = semantic_ret.semantic.into_symbol_table_and_scope_tree();

    let transform_options = TransformOptions {
        typescript: TypeScriptOptions {
            only_remove_type_imports: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let transform_ret = Transformer::new(&allocator, std::path::Path::new(""), &transform_options)
        .build_with_symbols_and_scopes(symbols, scopes, &mut program);
    if !transform_ret.errors.is_empty() {
        return code.to_string();
    }

    Codegen::new().build(&program).code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_interfaces_and_annotations() {
        let input = "interface Foo { a: string }\nconst x: number = 1\n";
        let out = transform_typescript_to_js(input);
        assert!(!out.contains("interface Foo"));
        assert!(!out.contains(": number"));
        assert!(out.contains("const x = 1"));
    }

    #[test]
    fn strips_as_assertions() {
        let input = "const el = (document.querySelector('a')) as HTMLAnchorElement\n";
        let out = transform_typescript_to_js(input);
        assert!(!out.contains("as HTMLAnchorElement"));
    }

    #[test]
    fn invalid_input_passes_through() {
        let input = "this is not valid ts {{{";
        assert_eq!(transform_typescript_to_js(input), input);
    }
}
