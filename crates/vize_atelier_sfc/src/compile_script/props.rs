//! Props and emit type extraction utilities.
//!
//! This module handles extracting prop types from TypeScript type definitions
//! and processing withDefaults defaults. Type extraction goes through
//! `vize_croquis`'s scope graph and type resolver (C1/C2): a `defineProps<T>()`
//! type argument is lowered to a `TypeNode`, resolved against a `Scope` built
//! from the file's interfaces/type aliases, and the result's runtime type
//! tags and call signatures drive prop/emit codegen directly, rather than
//! re-deriving them from raw type text.

use std::collections::{HashMap, HashSet};

use vize_croquis::cross_file::{Scope, ScopeGraph};
use vize_croquis::types::{emit_name_candidates, infer_runtime_type, ordered_prop_keys, RuntimeTypeTag, TypeResolver};

use super::type_lowering::{build_local_scope, lower_type_text, NodeText};

/// Prop type information
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct PropTypeInfo {
    /// Runtime type tags in declaration order (e.g. `["String", "Number"]`
    /// for `foo: string | number`). Rendered as a bare identifier when there
    /// is exactly one, or `[A, B, ...]` otherwise.
    pub js_types: Vec<String>,
    /// Original TypeScript type (for PropType<T> usage)
    pub ts_type: Option<String>,
    /// Whether the prop is optional
    pub optional: bool,
}

impl PropTypeInfo {
    /// True when the prop's type couldn't be resolved to anything runtime
    /// checkable (a bare user-defined type, a generic parameter, ...): Vue
    /// emits a literal `null` type annotation for these.
    pub fn is_unresolved(&self) -> bool {
        self.js_types.len() == 1 && self.js_types[0] == "null"
    }
}

/// Extract prop types from a `defineProps<T>()` type argument.
/// Returns a Vec to preserve definition order (important for matching Vue's output).
pub fn extract_prop_types_from_type(
    type_args: &str,
    interfaces: &vize_carton::FxHashMap<String, String>,
    type_aliases: &vize_carton::FxHashMap<String, String>,
) -> Vec<(String, PropTypeInfo)> {
    let mut next_id = 0u32;
    let mut id_text = NodeText::default();
    let scope = build_local_scope(interfaces, type_aliases, &mut next_id, &mut id_text);
    let lowered = lower_type_text(type_args, &mut next_id, &mut id_text);

    let graph = ScopeGraph::new();
    let mut resolver = TypeResolver::new(&graph);
    let resolved = resolver.resolve_type_elements(&lowered, &scope);

    let mut props = Vec::new();
    for key in ordered_prop_keys(&lowered, &scope) {
        let Some(elem) = resolved.props.get(key.as_str()) else {
            continue;
        };
        let js_types = runtime_tags_to_js(&infer_runtime_type(&elem.value));
        let ts_type = id_text.get(&elem.value.id()).cloned();
        props.push((
            key.to_string(),
            PropTypeInfo {
                js_types,
                ts_type,
                optional: elem.optional,
            },
        ));
    }
    props
}

/// `inferRuntimeType`'s tag set, mapped to the constructor names/`null`
/// sentinel codegen emits. Order and duplicates from `infer_runtime_type`
/// are preserved/deduped as-is (it already dedups union branches).
fn runtime_tags_to_js(tags: &[RuntimeTypeTag]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|t| runtime_tag_name(*t).to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

fn runtime_tag_name(tag: RuntimeTypeTag) -> &'static str {
    match tag {
        RuntimeTypeTag::String => "String",
        RuntimeTypeTag::Number => "Number",
        RuntimeTypeTag::Boolean => "Boolean",
        RuntimeTypeTag::Object => "Object",
        RuntimeTypeTag::Array => "Array",
        RuntimeTypeTag::Function => "Function",
        RuntimeTypeTag::Date => "Date",
        RuntimeTypeTag::Promise => "Promise",
        RuntimeTypeTag::Set => "Set",
        RuntimeTypeTag::Map => "Map",
        RuntimeTypeTag::WeakSet => "WeakSet",
        RuntimeTypeTag::WeakMap => "WeakMap",
        RuntimeTypeTag::Symbol => "Symbol",
        RuntimeTypeTag::Null | RuntimeTypeTag::Unknown => "null",
    }
}

/// Extract emit names from a `defineEmits<T>()` type argument. Event names
/// come from the resolved `calls` list's first-parameter literal(s)
/// (`(e: 'click', payload: MouseEvent) => void` -> `click`), not from
/// scanning the type text for quoted strings -- a string literal appearing
/// later in a call signature's payload type is never mistaken for an event
/// name. The property-style form (`{ click: [id: number] }`) falls back to
/// the object's own keys, since there are no call signatures to read.
pub fn extract_emit_names_from_type(type_args: &str) -> Vec<String> {
    let mut next_id = 0u32;
    let mut id_text = NodeText::default();
    let scope = Scope::empty();
    let lowered = lower_type_text(type_args, &mut next_id, &mut id_text);

    let graph = ScopeGraph::new();
    let mut resolver = TypeResolver::new(&graph);
    let resolved = resolver.resolve_type_elements(&lowered, &scope);

    if resolved.calls.is_empty() {
        return ordered_prop_keys(&lowered, &scope)
            .into_iter()
            .map(|k| k.to_string())
            .collect();
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for call in &resolved.calls {
        for name in emit_name_candidates(call) {
            let name = name.to_string();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}

/// Extract default values from withDefaults second argument
/// Input: "withDefaults(defineProps<{...}>(), { prop1: default1, prop2: default2 })"
/// Returns: HashMap of prop name to default value string
pub fn extract_with_defaults_defaults(with_defaults_args: &str) -> HashMap<String, String> {
    let mut defaults = HashMap::new();

    // Find the second argument (the defaults object)
    // withDefaults(defineProps<...>(), { ... })
    // We need to find the { after "defineProps<...>()"

    let content = with_defaults_args.trim();
    let chars: Vec<char> = content.chars().collect();

    // First, find "defineProps" and then its closing parenthesis
    let define_props_pos = content.find("defineProps");
    if define_props_pos.is_none() {
        return defaults;
    }

    let start_search = define_props_pos.unwrap();
    let mut paren_depth = 0;
    let mut in_define_props_call = false;
    let mut found_define_props_end = false;
    let mut defaults_start = None;

    let mut i = start_search;
    while i < chars.len() {
        let c = chars[i];

        if !in_define_props_call {
            // Looking for the opening paren of defineProps()
            if c == '(' {
                in_define_props_call = true;
                paren_depth = 1;
            }
        } else if !found_define_props_end {
            match c {
                '(' => paren_depth += 1,
                ')' => {
                    paren_depth -= 1;
                    if paren_depth == 0 {
                        found_define_props_end = true;
                    }
                }
                _ => {}
            }
        } else {
            // Looking for the defaults object start
            if c == '{' {
                defaults_start = Some(i);
                break;
            }
        }
        i += 1;
    }

    if let Some(start) = defaults_start {
        // Find matching closing brace
        let mut brace_depth = 0;
        let mut end = start;

        for (j, &c) in chars.iter().enumerate().skip(start) {
            match c {
                '{' => brace_depth += 1,
                '}' => {
                    brace_depth -= 1;
                    if brace_depth == 0 {
                        end = j;
                        break;
                    }
                }
                _ => {}
            }
        }

        // Extract the defaults object content (without braces)
        let defaults_content: String = chars[start + 1..end].iter().collect();
        parse_defaults_object(&defaults_content, &mut defaults);
    }

    defaults
}

/// Parse a JavaScript object literal to extract key-value pairs
fn parse_defaults_object(content: &str, defaults: &mut HashMap<String, String>) {
    let content = content.trim();
    if content.is_empty() {
        return;
    }

    // Split by commas, but respect nested braces/parens/brackets
    let mut depth = 0;
    let mut current = String::new();

    for c in content.chars() {
        match c {
            '{' | '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            '}' | ')' | ']' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                extract_default_pair(&current, defaults);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    extract_default_pair(&current, defaults);
}

/// Extract a single key: value pair from a default definition
fn extract_default_pair(pair: &str, defaults: &mut HashMap<String, String>) {
    let trimmed = pair.trim();
    if trimmed.is_empty() {
        return;
    }

    // Find the first : that's not inside a nested structure
    let mut depth = 0;
    let mut colon_pos = None;

    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '{' | '(' | '[' | '<' => depth += 1,
            '}' | ')' | ']' | '>' => depth -= 1,
            ':' if depth == 0 => {
                colon_pos = Some(i);
                break;
            }
            _ => {}
        }
    }

    if let Some(pos) = colon_pos {
        let key = trimmed[..pos].trim();
        let value = trimmed[pos + 1..].trim();

        if !key.is_empty() && !value.is_empty() {
            defaults.insert(key.to_string(), value.to_string());
        }
    }
}

/// Check if a string is a valid JS identifier
pub fn is_valid_identifier(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
