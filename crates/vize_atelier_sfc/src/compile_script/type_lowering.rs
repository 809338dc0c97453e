//! Lowers OXC's `TSType` AST into `vize_croquis`'s type-shape AST ([`TypeNode`]),
//! and builds the same-file [`Scope`] a `defineProps`/`defineEmits` type
//! argument needs to resolve against.
//!
//! This is the piece that lets `defineProps<Props>()` actually consult C2
//! (`vize_croquis::types::TypeResolver`) instead of re-deriving runtime prop
//! types by splitting raw source text on braces. Cross-file import following
//! is out of scope here -- only the current file's interfaces/type aliases
//! (as already collected by [`ScriptCompileContext`](crate::script::ScriptCompileContext))
//! are registered, which covers every case `resolveTypeElements` needs for a
//! single-file `<script setup>` block.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    FormalParameter, Program, PropertyKey, Statement, TSLiteral, TSSignature, TSType, TSTypeName,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use vize_carton::{CompactString, FxHashMap};
use vize_croquis::cross_file::Scope;
use vize_croquis::types::{LiteralValue, StringTypeExpr, TypeMember, TypeNode, TypeNodeId};

/// Original source text for each lowered node that can meaningfully carry
/// one (currently: property value types), keyed by `TypeNodeId`. Needed
/// because codegen still wants to emit `as PropType<OriginalText>` for
/// complex prop types, and `TypeNode` itself intentionally carries no spans.
pub type NodeText = FxHashMap<TypeNodeId, String>;

/// Parses `text` as a standalone type expression (wrapping it in a synthetic
/// `type __X = ...;` declaration, the same "wrap a fragment, parse, pull the
/// sub-AST out" idiom used elsewhere in this crate) and lowers it to a
/// [`TypeNode`]. Falls back to `TypeNode::Unknown` if the fragment doesn't
/// parse -- consistent with "any failure collapses to Unknown" elsewhere in
/// the resolver.
pub fn lower_type_text(text: &str, next_id: &mut u32, id_text: &mut NodeText) -> TypeNode {
    let wrapped = format!("type __Lowered = {text};");
    let allocator = Allocator::default();
    let source_type = SourceType::from_path("lowered.ts").unwrap_or_default();
    let ret = Parser::new(&allocator, &wrapped, source_type).parse();
    if ret.panicked {
        return unknown(next_id);
    }
    find_type_alias_annotation(&ret.program)
        .map(|ts_type| lower_ts_type(ts_type, &wrapped, next_id, id_text))
        .unwrap_or_else(|| unknown(next_id))
}

fn find_type_alias_annotation<'a>(program: &'a Program<'a>) -> Option<&'a TSType<'a>> {
    program.body.iter().find_map(|stmt| match stmt {
        Statement::TSTypeAliasDeclaration(decl) => Some(&decl.type_annotation),
        _ => None,
    })
}

/// Builds a local [`Scope`] from a `<script setup>` block's first-pass
/// collected interface/type-alias text (name -> body text), re-parsing each
/// one the same way `lower_type_text` does.
pub fn build_local_scope(
    interfaces: &FxHashMap<String, String>,
    type_aliases: &FxHashMap<String, String>,
    next_id: &mut u32,
    id_text: &mut NodeText,
) -> Scope {
    let mut scope = Scope::empty();

    for (name, body) in interfaces {
        let wrapped = format!("interface __Lowered {body}");
        let allocator = Allocator::default();
        let source_type = SourceType::from_path("lowered.ts").unwrap_or_default();
        let ret = Parser::new(&allocator, &wrapped, source_type).parse();
        if ret.panicked {
            continue;
        }
        let Some(Statement::TSInterfaceDeclaration(iface)) = ret.program.body.first() else {
            continue;
        };
        let id = TypeNodeId(next(next_id));
        let members = lower_type_literal_members(&iface.body.body, &wrapped, next_id, id_text);
        let node = TypeNode::InterfaceDecl {
            id,
            extends: Vec::new(),
            body: Box::new(TypeNode::TypeLiteral {
                id: TypeNodeId(next(next_id)),
                members,
            }),
        };
        scope.declare_type(name.as_str(), node, false);
    }

    for (name, body) in type_aliases {
        let node = lower_type_text(body, next_id, id_text);
        scope.declare_type(name.as_str(), node, false);
    }

    scope
}

fn next(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

fn unknown(next_id: &mut u32) -> TypeNode {
    TypeNode::Unknown {
        id: TypeNodeId(next(next_id)),
    }
}

/// Lower a single `TSType` node into `vize_croquis`'s `TypeNode` shape.
/// Anything not handled collapses to `Unknown`, matching the resolver's
/// "never propagate a parse error, just fail to classify" design.
pub fn lower_ts_type(
    ts_type: &TSType<'_>,
    source: &str,
    next_id: &mut u32,
    id_text: &mut NodeText,
) -> TypeNode {
    match ts_type {
        TSType::TSTypeLiteral(lit) => {
            let id = TypeNodeId(next(next_id));
            let members = lower_type_literal_members(&lit.members, source, next_id, id_text);
            TypeNode::TypeLiteral { id, members }
        }
        TSType::TSParenthesizedType(paren) => {
            let id = TypeNodeId(next(next_id));
            let inner = Box::new(lower_ts_type(&paren.type_annotation, source, next_id, id_text));
            TypeNode::Parenthesized { id, inner }
        }
        TSType::TSUnionType(union) => {
            let id = TypeNodeId(next(next_id));
            let members = union
                .types
                .iter()
                .map(|t| lower_ts_type(t, source, next_id, id_text))
                .collect();
            TypeNode::Union { id, members }
        }
        TSType::TSIntersectionType(intersection) => {
            let id = TypeNodeId(next(next_id));
            let members = intersection
                .types
                .iter()
                .map(|t| lower_ts_type(t, source, next_id, id_text))
                .collect();
            TypeNode::Intersection { id, members }
        }
        TSType::TSFunctionType(func) => {
            let id = TypeNodeId(next(next_id));
            let params = func
                .params
                .items
                .iter()
                .map(|p| lower_formal_parameter(p, source, next_id, id_text))
                .collect();
            TypeNode::FunctionType { id, params }
        }
        TSType::TSArrayType(_) => type_reference(next_id, "Array"),
        TSType::TSLiteralType(lit) => lower_literal(lit, next_id),
        TSType::TSTypeReference(reference) => {
            let id = TypeNodeId(next(next_id));
            let name = type_name_text(&reference.type_name);
            let type_args = reference
                .type_parameters
                .as_ref()
                .map(|params| {
                    params
                        .params
                        .iter()
                        .map(|t| lower_ts_type(t, source, next_id, id_text))
                        .collect()
                })
                .unwrap_or_default();
            TypeNode::TypeReference {
                id,
                name: CompactString::new(name),
                type_args,
            }
        }
        TSType::TSMappedType(mapped) => {
            let id = TypeNodeId(next(next_id));
            let constraint = Box::new(
                mapped
                    .type_parameter
                    .constraint
                    .as_ref()
                    .map(ts_type_to_string_expr)
                    .unwrap_or(StringTypeExpr::Union(Vec::new())),
            );
            let value = Box::new(
                mapped
                    .type_annotation
                    .as_ref()
                    .map(|t| lower_ts_type(t, source, next_id, id_text))
                    .unwrap_or_else(|| unknown(next_id)),
            );
            // `-?`/`?` optionality modifiers aren't tracked: resolution
            // treats every mapped-type member as required, matching
            // `MappedType`'s lack of a per-key optional flag.
            TypeNode::MappedType {
                id,
                constraint,
                value,
            }
        }
        TSType::TSIndexedAccessType(indexed) => {
            let id = TypeNodeId(next(next_id));
            let object = Box::new(lower_ts_type(&indexed.object_type, source, next_id, id_text));
            let index = Box::new(ts_type_to_string_expr(&indexed.index_type));
            TypeNode::IndexedAccess { id, object, index }
        }
        TSType::TSStringKeyword(_) => type_reference(next_id, "String"),
        TSType::TSNumberKeyword(_) => type_reference(next_id, "Number"),
        TSType::TSBooleanKeyword(_) => type_reference(next_id, "Boolean"),
        TSType::TSObjectKeyword(_) => type_reference(next_id, "Object"),
        TSType::TSSymbolKeyword(_) => type_reference(next_id, "Symbol"),
        TSType::TSBigIntKeyword(_) => type_reference(next_id, "BigInt"),
        TSType::TSNullKeyword(_) => type_reference(next_id, "Null"),
        _ => unknown(next_id),
    }
}

fn type_reference(next_id: &mut u32, name: &str) -> TypeNode {
    TypeNode::TypeReference {
        id: TypeNodeId(next(next_id)),
        name: CompactString::new(name),
        type_args: Vec::new(),
    }
}

fn lower_literal(lit: &oxc_ast::ast::TSLiteralType<'_>, next_id: &mut u32) -> TypeNode {
    let id = TypeNodeId(next(next_id));
    let value = match &lit.literal {
        TSLiteral::StringLiteral(s) => LiteralValue::String(CompactString::new(s.value.as_str())),
        TSLiteral::NumericLiteral(n) => {
            LiteralValue::Number(CompactString::new(n.value.to_string()))
        }
        TSLiteral::BooleanLiteral(b) => LiteralValue::Boolean(b.value),
        // Template literals and unary expressions in literal-type position
        // aren't reduced to a concrete value; treated as Unknown instead.
        _ => return unknown(next_id),
    };
    TypeNode::Literal { id, value }
}

fn lower_formal_parameter(
    param: &FormalParameter<'_>,
    source: &str,
    next_id: &mut u32,
    id_text: &mut NodeText,
) -> TypeNode {
    match param.pattern.type_annotation.as_ref() {
        Some(annotation) => lower_ts_type(&annotation.type_annotation, source, next_id, id_text),
        None => unknown(next_id),
    }
}

fn lower_type_literal_members(
    members: &[TSSignature<'_>],
    source: &str,
    next_id: &mut u32,
    id_text: &mut NodeText,
) -> Vec<TypeMember> {
    let mut out = Vec::new();
    for member in members {
        match member {
            TSSignature::TSPropertySignature(prop) => {
                let Some(key) = property_key_text(&prop.key) else {
                    continue;
                };
                let value = match prop.type_annotation.as_ref() {
                    Some(annotation) => {
                        let value = lower_ts_type(&annotation.type_annotation, source, next_id, id_text);
                        let span = annotation.type_annotation.span();
                        let (start, end) = (span.start as usize, span.end as usize);
                        if start <= end && end <= source.len() {
                            id_text.insert(value.id(), source[start..end].to_string());
                        }
                        value
                    }
                    None => unknown(next_id),
                };
                out.push(TypeMember::Property {
                    key: CompactString::new(key),
                    optional: prop.optional,
                    value,
                });
            }
            TSSignature::TSCallSignatureDeclaration(call) => {
                let id = TypeNodeId(next(next_id));
                let params = call
                    .params
                    .items
                    .iter()
                    .map(|p| lower_formal_parameter(p, source, next_id, id_text))
                    .collect();
                out.push(TypeMember::Call {
                    value: TypeNode::FunctionType { id, params },
                });
            }
            _ => {}
        }
    }
    out
}

fn property_key_text(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        PropertyKey::NumericLiteral(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn type_name_text(name: &TSTypeName<'_>) -> String {
    match name {
        TSTypeName::IdentifierReference(id) => id.name.to_string(),
        TSTypeName::QualifiedName(qualified) => {
            format!("{}.{}", type_name_text(&qualified.left), qualified.right.name)
        }
    }
}

/// Best-effort reduction of a type to a [`StringTypeExpr`], for mapped-type
/// constraints (`[K in Keys]`) and indexed-access indices (`T[Keys]`).
/// Anything that isn't a string literal or a union of them evaluates to the
/// empty set rather than guessing.
fn ts_type_to_string_expr(ts_type: &TSType<'_>) -> StringTypeExpr {
    match ts_type {
        TSType::TSLiteralType(lit) => match &lit.literal {
            TSLiteral::StringLiteral(s) => {
                StringTypeExpr::Literal(CompactString::new(s.value.as_str()))
            }
            _ => StringTypeExpr::Union(Vec::new()),
        },
        TSType::TSUnionType(union) => {
            StringTypeExpr::Union(union.types.iter().map(ts_type_to_string_expr).collect())
        }
        TSType::TSParenthesizedType(paren) => ts_type_to_string_expr(&paren.type_annotation),
        _ => StringTypeExpr::Union(Vec::new()),
    }
}
