//! Cross-file TypeScript type resolution (`resolveTypeElements` and friends).
//!
//! This is the piece that lets `defineProps<Props>()` work when `Props` is an
//! interface imported from another file: walk the referenced type down to a
//! flat set of property/call signatures, following interface `extends`,
//! union/intersection merges, mapped and indexed-access types, and a handful
//! of framework-recognized type-level helpers (`Partial`, `Pick`, `Omit`,
//! `ExtractPropTypes`, ...).
//!
//! Resolution is memoized per `TypeNode` identity (see [`TypeResolver::resolve_type_elements`])
//! since the same interface is commonly referenced from many call sites in one file.

use rustc_hash::FxHashMap;
use vize_carton::CompactString;

use crate::cross_file::{Scope, ScopeGraph};

/// A type-level AST node, reduced to the shape `resolveTypeElements` actually
/// needs to dispatch on. Real source spans are tracked by `id` so results can
/// be memoized and diagnostics can point back at source text.
#[derive(Debug, Clone)]
pub enum TypeNode {
    TypeLiteral {
        id: TypeNodeId,
        members: Vec<TypeMember>,
    },
    InterfaceDecl {
        id: TypeNodeId,
        extends: Vec<TypeNode>,
        body: Box<TypeNode>,
    },
    TypeAlias {
        id: TypeNodeId,
        inner: Box<TypeNode>,
    },
    Parenthesized {
        id: TypeNodeId,
        inner: Box<TypeNode>,
    },
    FunctionType {
        id: TypeNodeId,
        /// Parameter types in declaration order. `defineEmits`'s event-name
        /// extraction reads the first entry; nothing else currently consults
        /// the rest, but dropping them would throw away information a
        /// lowering step already has cheaply available.
        params: Vec<TypeNode>,
    },
    /// A literal type: `'click'`, `42`, `true`. Props/emits resolution needs
    /// these both for `inferRuntimeType` (a literal maps to its base
    /// primitive) and for reading emit event names straight out of a call
    /// signature's first parameter.
    Literal {
        id: TypeNodeId,
        value: LiteralValue,
    },
    Union {
        id: TypeNodeId,
        members: Vec<TypeNode>,
    },
    Intersection {
        id: TypeNodeId,
        members: Vec<TypeNode>,
    },
    MappedType {
        id: TypeNodeId,
        constraint: Box<StringTypeExpr>,
        value: Box<TypeNode>,
    },
    IndexedAccess {
        id: TypeNodeId,
        object: Box<TypeNode>,
        index: Box<StringTypeExpr>,
    },
    TypeReference {
        id: TypeNodeId,
        name: CompactString,
        type_args: Vec<TypeNode>,
    },
    ImportType {
        id: TypeNodeId,
        source: CompactString,
        qualifier: CompactString,
    },
    TypeQuery {
        id: TypeNodeId,
        name: CompactString,
    },
    Unknown {
        id: TypeNodeId,
    },
}

impl TypeNode {
    pub fn id(&self) -> TypeNodeId {
        match self {
            TypeNode::TypeLiteral { id, .. }
            | TypeNode::InterfaceDecl { id, .. }
            | TypeNode::TypeAlias { id, .. }
            | TypeNode::Parenthesized { id, .. }
            | TypeNode::FunctionType { id, .. }
            | TypeNode::Literal { id, .. }
            | TypeNode::Union { id, .. }
            | TypeNode::Intersection { id, .. }
            | TypeNode::MappedType { id, .. }
            | TypeNode::IndexedAccess { id, .. }
            | TypeNode::TypeReference { id, .. }
            | TypeNode::ImportType { id, .. }
            | TypeNode::TypeQuery { id, .. }
            | TypeNode::Unknown { id } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeNodeId(pub u32);

/// Concrete value carried by a [`TypeNode::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(CompactString),
    Number(CompactString),
    Boolean(bool),
}

/// One member of a `TypeLiteral`/`InterfaceDecl` body, pre-split into the two
/// shapes `resolveTypeElements` cares about.
#[derive(Debug, Clone)]
pub enum TypeMember {
    /// `foo: T` or `foo?: T` (optional flag carried separately).
    Property {
        key: CompactString,
        optional: bool,
        value: TypeNode,
    },
    /// `(e: 'click'): void` — call signature, used by `defineEmits<T>()`.
    Call { value: TypeNode },
}

/// Flattened result of resolving a type down to its member shape.
#[derive(Debug, Clone, Default)]
pub struct ResolvedElements {
    pub props: FxHashMap<CompactString, PropertyElement>,
    pub calls: Vec<TypeNode>,
}

#[derive(Debug, Clone)]
pub struct PropertyElement {
    pub optional: bool,
    pub value: TypeNode,
}

impl ResolvedElements {
    fn insert_required(&mut self, key: CompactString, value: TypeNode, optional: bool) {
        self.props
            .entry(key)
            .and_modify(|existing| {
                existing.optional = existing.optional || optional;
            })
            .or_insert(PropertyElement { optional, value });
    }

    /// Union merge: a key present in only some branches becomes optional.
    fn union_with(branches: Vec<ResolvedElements>) -> Self {
        let mut seen_in: FxHashMap<CompactString, usize> = FxHashMap::default();
        let count = branches.len();
        let mut out = ResolvedElements::default();
        for branch in &branches {
            for key in branch.props.keys() {
                *seen_in.entry(key.clone()).or_insert(0) += 1;
            }
        }
        for branch in branches {
            for (key, elem) in branch.props {
                let seen = *seen_in.get(&key).unwrap_or(&0);
                let optional = elem.optional || seen < count;
                out.insert_required(key, elem.value, optional);
            }
            out.calls.extend(branch.calls);
        }
        out
    }

    /// Intersection merge: same field-merge as union, minus `Unknown` branches.
    fn intersect_with(branches: Vec<ResolvedElements>) -> Self {
        let mut out = ResolvedElements::default();
        for branch in branches {
            for (key, elem) in branch.props {
                out.insert_required(key, elem.value, elem.optional);
            }
            out.calls.extend(branch.calls);
        }
        out
    }
}

/// A finite set of concrete strings, the evaluated form of a mapped-type
/// constraint or an indexed-access index.
#[derive(Debug, Clone)]
pub enum StringTypeExpr {
    Literal(CompactString),
    Union(Vec<StringTypeExpr>),
    TemplateLiteral {
        quasis: Vec<CompactString>,
        exprs: Vec<StringTypeExpr>,
    },
    Extract(Box<StringTypeExpr>, Box<StringTypeExpr>),
    Exclude(Box<StringTypeExpr>, Box<StringTypeExpr>),
    Uppercase(Box<StringTypeExpr>),
    Lowercase(Box<StringTypeExpr>),
    Capitalize(Box<StringTypeExpr>),
    Uncapitalize(Box<StringTypeExpr>),
}

/// Evaluate a string-type expression down to a concrete, deduplicated set of
/// strings. Used for mapped-type constraints (`[K in Keys]`) and
/// indexed-access indices (`T[Keys]`).
pub fn evaluate_string_type(expr: &StringTypeExpr) -> Vec<CompactString> {
    match expr {
        StringTypeExpr::Literal(s) => vec![s.clone()],
        StringTypeExpr::Union(members) => {
            let mut out = Vec::new();
            for m in members {
                out.extend(evaluate_string_type(m));
            }
            dedup(out)
        }
        StringTypeExpr::TemplateLiteral { quasis, exprs } => {
            let mut combos: Vec<CompactString> = vec![CompactString::new("")];
            for (i, quasi) in quasis.iter().enumerate() {
                combos = combos
                    .into_iter()
                    .map(|c| {
                        let mut s = c.to_string();
                        s.push_str(quasi);
                        CompactString::new(s)
                    })
                    .collect();
                if let Some(expr) = exprs.get(i) {
                    let options = evaluate_string_type(expr);
                    let mut next = Vec::with_capacity(combos.len() * options.len().max(1));
                    for base in &combos {
                        for opt in &options {
                            let mut s = base.to_string();
                            s.push_str(opt);
                            next.push(CompactString::new(s));
                        }
                    }
                    combos = next;
                }
            }
            dedup(combos)
        }
        StringTypeExpr::Extract(source, pattern) => {
            let pattern_set = evaluate_string_type(pattern);
            evaluate_string_type(source)
                .into_iter()
                .filter(|s| pattern_set.contains(s))
                .collect()
        }
        StringTypeExpr::Exclude(source, pattern) => {
            let pattern_set = evaluate_string_type(pattern);
            evaluate_string_type(source)
                .into_iter()
                .filter(|s| !pattern_set.contains(s))
                .collect()
        }
        StringTypeExpr::Uppercase(inner) => evaluate_string_type(inner)
            .into_iter()
            .map(|s| CompactString::new(s.to_uppercase()))
            .collect(),
        StringTypeExpr::Lowercase(inner) => evaluate_string_type(inner)
            .into_iter()
            .map(|s| CompactString::new(s.to_lowercase()))
            .collect(),
        StringTypeExpr::Capitalize(inner) => evaluate_string_type(inner)
            .into_iter()
            .map(|s| CompactString::new(capitalize(&s)))
            .collect(),
        StringTypeExpr::Uncapitalize(inner) => evaluate_string_type(inner)
            .into_iter()
            .map(|s| CompactString::new(uncapitalize(&s)))
            .collect(),
    }
}

fn dedup(mut v: Vec<CompactString>) -> Vec<CompactString> {
    v.sort();
    v.dedup();
    v
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Runtime-type tags produced by `inferRuntimeType`, matching Vue's
/// `PropType`-compatible constructor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeTypeTag {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Function,
    Date,
    Promise,
    Set,
    Map,
    WeakSet,
    WeakMap,
    Symbol,
    Null,
    Unknown,
}

/// Resolves type references against a [`ScopeGraph`], memoizing by node id.
pub struct TypeResolver<'g> {
    graph: &'g ScopeGraph,
    cache: FxHashMap<TypeNodeId, ResolvedElements>,
}

impl<'g> TypeResolver<'g> {
    pub fn new(graph: &'g ScopeGraph) -> Self {
        Self {
            graph,
            cache: FxHashMap::default(),
        }
    }

    /// `resolveTypeElements(ctx, node, scope) -> ResolvedElements`, memoized on `node`.
    pub fn resolve_type_elements(&mut self, node: &TypeNode, scope: &Scope) -> ResolvedElements {
        let id = node.id();
        if let Some(cached) = self.cache.get(&id) {
            return cached.clone();
        }
        // Insert a provisional empty entry before recursing so that a type
        // which (incorrectly) refers back to itself resolves to "nothing
        // more" on the second visit instead of looping forever.
        self.cache.insert(id, ResolvedElements::default());
        let resolved = self.resolve_uncached(node, scope);
        self.cache.insert(id, resolved.clone());
        resolved
    }

    fn resolve_uncached(&mut self, node: &TypeNode, scope: &Scope) -> ResolvedElements {
        match node {
            TypeNode::TypeLiteral { members, .. } => {
                let mut out = ResolvedElements::default();
                for member in members {
                    match member {
                        TypeMember::Property {
                            key,
                            optional,
                            value,
                        } => out.insert_required(key.clone(), value.clone(), *optional),
                        TypeMember::Call { value } => out.calls.push(value.clone()),
                    }
                }
                out
            }
            TypeNode::InterfaceDecl { extends, body, .. } => {
                let mut branches: Vec<ResolvedElements> = extends
                    .iter()
                    .map(|e| self.resolve_type_elements(e, scope))
                    .collect();
                branches.push(self.resolve_type_elements(body, scope));
                ResolvedElements::intersect_with(branches)
            }
            TypeNode::TypeAlias { inner, .. } | TypeNode::Parenthesized { inner, .. } => {
                self.resolve_type_elements(inner, scope)
            }
            TypeNode::FunctionType { .. } => ResolvedElements {
                props: FxHashMap::default(),
                calls: vec![node.clone()],
            },
            TypeNode::Literal { .. } => ResolvedElements::default(),
            TypeNode::Union { members, .. } => {
                let branches = members
                    .iter()
                    .map(|m| self.resolve_type_elements(m, scope))
                    .collect();
                ResolvedElements::union_with(branches)
            }
            TypeNode::Intersection { members, .. } => {
                let branches: Vec<_> = members
                    .iter()
                    .filter(|m| !matches!(m, TypeNode::Unknown { .. }))
                    .map(|m| self.resolve_type_elements(m, scope))
                    .collect();
                ResolvedElements::intersect_with(branches)
            }
            TypeNode::MappedType {
                constraint, value, ..
            } => {
                let mut out = ResolvedElements::default();
                for key in evaluate_string_type(constraint) {
                    out.insert_required(key, (**value).clone(), false);
                }
                out
            }
            TypeNode::IndexedAccess { object, index, .. } => {
                let object_elements = self.resolve_type_elements(object, scope);
                let keys = evaluate_string_type(index);
                let mut out = ResolvedElements::default();
                for key in keys {
                    if let Some(elem) = object_elements.props.get(&key) {
                        out.insert_required(key, elem.value.clone(), elem.optional);
                    }
                }
                out
            }
            TypeNode::TypeReference {
                name, type_args, ..
            } => self.resolve_reference(name, type_args, scope),
            TypeNode::ImportType {
                source, qualifier, ..
            } => {
                let Some(target) = self.graph.resolve_module(source, scope) else {
                    return ResolvedElements::default();
                };
                match target.types.get(qualifier) {
                    Some(t) => self.resolve_type_elements(t, &target),
                    None => ResolvedElements::default(),
                }
            }
            TypeNode::TypeQuery { name, .. } => {
                // `typeof x` — look up the declares chain, not types.
                match scope.lookup_declare(name) {
                    Some(t) => self.resolve_type_elements(t, scope),
                    None => ResolvedElements::default(),
                }
            }
            TypeNode::Unknown { .. } => ResolvedElements::default(),
        }
    }

    fn resolve_reference(
        &mut self,
        name: &str,
        type_args: &[TypeNode],
        scope: &Scope,
    ) -> ResolvedElements {
        match name {
            "ExtractPropTypes" | "ExtractPublicPropTypes" => {
                if let Some(arg) = type_args.first() {
                    let resolved = self.resolve_type_elements(arg, scope);
                    return reverse_infer_props(&resolved);
                }
                ResolvedElements::default()
            }
            "Partial" => type_args
                .first()
                .map(|arg| {
                    let mut resolved = self.resolve_type_elements(arg, scope);
                    for elem in resolved.props.values_mut() {
                        elem.optional = true;
                    }
                    resolved
                })
                .unwrap_or_default(),
            "Required" => type_args
                .first()
                .map(|arg| {
                    let mut resolved = self.resolve_type_elements(arg, scope);
                    for elem in resolved.props.values_mut() {
                        elem.optional = false;
                    }
                    resolved
                })
                .unwrap_or_default(),
            "Readonly" => type_args
                .first()
                .map(|arg| self.resolve_type_elements(arg, scope))
                .unwrap_or_default(),
            "Pick" => {
                let (Some(obj), Some(keys)) = (type_args.first(), type_args.get(1)) else {
                    return ResolvedElements::default();
                };
                let resolved = self.resolve_type_elements(obj, scope);
                let key_set = self.string_literal_set(keys);
                let mut out = ResolvedElements::default();
                for key in key_set {
                    if let Some(elem) = resolved.props.get(&key) {
                        out.insert_required(key, elem.value.clone(), elem.optional);
                    }
                }
                out
            }
            "Omit" => {
                let (Some(obj), Some(keys)) = (type_args.first(), type_args.get(1)) else {
                    return ResolvedElements::default();
                };
                let resolved = self.resolve_type_elements(obj, scope);
                let key_set = self.string_literal_set(keys);
                let mut out = ResolvedElements::default();
                for (key, elem) in resolved.props {
                    if !key_set.contains(&key) {
                        out.insert_required(key, elem.value, elem.optional);
                    }
                }
                out
            }
            "ReturnType" => type_args
                .first()
                .map(|arg| self.resolve_type_elements(arg, scope))
                .unwrap_or_default(),
            _ => match scope.lookup_type(name) {
                Some(target) => self.resolve_type_elements(target, scope),
                None => ResolvedElements::default(),
            },
        }
    }

    /// Best-effort string-literal-set extraction for a `Pick`/`Omit` key argument.
    fn string_literal_set(&mut self, node: &TypeNode) -> Vec<CompactString> {
        match node {
            TypeNode::TypeReference { name, .. } => vec![name.clone()],
            TypeNode::Union { members, .. } => {
                members.iter().flat_map(|m| self.string_literal_set(m)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// `inferRuntimeType(node) -> [tag]`. Never propagates an error: anything it
/// can't classify collapses to `[Unknown]`.
pub fn infer_runtime_type(node: &TypeNode) -> Vec<RuntimeTypeTag> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| infer_runtime_type_inner(node)))
    {
        Ok(tags) => tags,
        Err(_) => {
            tracing::debug!(node = ?node.id(), "inferRuntimeType could not classify node, collapsing to Unknown");
            vec![RuntimeTypeTag::Unknown]
        }
    }
}

fn infer_runtime_type_inner(node: &TypeNode) -> Vec<RuntimeTypeTag> {
    match node {
        TypeNode::TypeReference { name, .. } => match name.as_str() {
            "String" => vec![RuntimeTypeTag::String],
            "Number" => vec![RuntimeTypeTag::Number],
            "Boolean" => vec![RuntimeTypeTag::Boolean],
            "Array" => vec![RuntimeTypeTag::Array],
            "Function" => vec![RuntimeTypeTag::Function],
            "Date" => vec![RuntimeTypeTag::Date],
            "Promise" => vec![RuntimeTypeTag::Promise],
            "Set" => vec![RuntimeTypeTag::Set],
            "Map" => vec![RuntimeTypeTag::Map],
            "WeakSet" => vec![RuntimeTypeTag::WeakSet],
            "WeakMap" => vec![RuntimeTypeTag::WeakMap],
            "Symbol" => vec![RuntimeTypeTag::Symbol],
            "Object" => vec![RuntimeTypeTag::Object],
            _ => vec![RuntimeTypeTag::Unknown],
        },
        TypeNode::TypeLiteral { .. } | TypeNode::InterfaceDecl { .. } => vec![RuntimeTypeTag::Object],
        TypeNode::FunctionType { .. } => vec![RuntimeTypeTag::Function],
        // Literal types map to their base primitive (`'click'` -> String).
        TypeNode::Literal { value, .. } => match value {
            LiteralValue::String(_) => vec![RuntimeTypeTag::String],
            LiteralValue::Number(_) => vec![RuntimeTypeTag::Number],
            LiteralValue::Boolean(_) => vec![RuntimeTypeTag::Boolean],
        },
        TypeNode::Union { members, .. } => dedup_tags(
            members
                .iter()
                .flat_map(infer_runtime_type_inner)
                .collect(),
        ),
        TypeNode::Intersection { members, .. } => dedup_tags(
            members
                .iter()
                .flat_map(infer_runtime_type_inner)
                .filter(|t| *t != RuntimeTypeTag::Unknown)
                .collect(),
        ),
        TypeNode::Parenthesized { inner, .. } | TypeNode::TypeAlias { inner, .. } => {
            infer_runtime_type_inner(inner)
        }
        _ => vec![RuntimeTypeTag::Unknown],
    }
}

fn dedup_tags(mut tags: Vec<RuntimeTypeTag>) -> Vec<RuntimeTypeTag> {
    tags.sort_by_key(|t| *t as u8);
    tags.dedup();
    tags
}

/// §4.2.2 reverse inference for `ExtractPropTypes<T>`: reinterpret each
/// resolved property's value type as a prop-options object.
fn reverse_infer_props(resolved: &ResolvedElements) -> ResolvedElements {
    let mut out = ResolvedElements::default();
    for (key, elem) in &resolved.props {
        let (value, optional) = match &elem.value {
            TypeNode::TypeLiteral { members, .. } => {
                let type_member = members.iter().find_map(|m| match m {
                    TypeMember::Property { key, value, .. } if key.as_str() == "type" => {
                        Some(value.clone())
                    }
                    _ => None,
                });
                let required = members.iter().any(|m| {
                    matches!(m, TypeMember::Property { key, .. } if key.as_str() == "required")
                });
                match type_member {
                    Some(t) => (t, !required),
                    None => (TypeNode::Unknown { id: elem.value.id() }, elem.optional),
                }
            }
            TypeNode::TypeReference { name, type_args, .. }
                if name.ends_with("Constructor") || name.as_str() == "PropType" =>
            {
                let value = type_args
                    .first()
                    .cloned()
                    .unwrap_or_else(|| TypeNode::Unknown { id: elem.value.id() });
                (value, elem.optional)
            }
            other => (other.clone(), elem.optional),
        };
        out.insert_required(key.clone(), value, optional);
    }
    out
}

/// First-parameter literal values of a `calls` entry, i.e. the event names
/// a `defineEmits<{(e: 'click'): void}>()` call signature declares. Reading
/// this straight off the resolved `calls` list (rather than scanning the
/// type's source text for quoted strings) means a literal appearing in a
/// later parameter's payload type is never mistaken for an event name.
pub fn emit_name_candidates(call: &TypeNode) -> Vec<CompactString> {
    let TypeNode::FunctionType { params, .. } = call else {
        return Vec::new();
    };
    match params.first() {
        Some(first) => collect_string_literals(first),
        None => Vec::new(),
    }
}

fn collect_string_literals(node: &TypeNode) -> Vec<CompactString> {
    match node {
        TypeNode::Literal {
            value: LiteralValue::String(s),
            ..
        } => vec![s.clone()],
        TypeNode::Union { members, .. } => {
            members.iter().flat_map(collect_string_literals).collect()
        }
        TypeNode::Parenthesized { inner, .. } => collect_string_literals(inner),
        _ => Vec::new(),
    }
}

/// Declaration-order prop keys for `node`, matching the order
/// `resolveTypeElements` would encounter them. `ResolvedElements::props` is a
/// hash map so it can't answer "what order were these declared in"; this
/// walks the same extends/merge shape `resolve_uncached` does, but only to
/// collect keys, so callers can render props in source order instead of
/// whatever order the map happens to iterate in.
pub fn ordered_prop_keys(node: &TypeNode, scope: &Scope) -> Vec<CompactString> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    collect_ordered_keys(node, scope, &mut out, &mut seen, 0);
    out
}

fn collect_ordered_keys(
    node: &TypeNode,
    scope: &Scope,
    out: &mut Vec<CompactString>,
    seen: &mut std::collections::HashSet<CompactString>,
    depth: u32,
) {
    if depth > 64 {
        return;
    }
    match node {
        TypeNode::TypeLiteral { members, .. } => {
            for member in members {
                if let TypeMember::Property { key, .. } = member {
                    if seen.insert(key.clone()) {
                        out.push(key.clone());
                    }
                }
            }
        }
        TypeNode::InterfaceDecl { extends, body, .. } => {
            for e in extends {
                collect_ordered_keys(e, scope, out, seen, depth + 1);
            }
            collect_ordered_keys(body, scope, out, seen, depth + 1);
        }
        TypeNode::TypeAlias { inner, .. } | TypeNode::Parenthesized { inner, .. } => {
            collect_ordered_keys(inner, scope, out, seen, depth + 1);
        }
        TypeNode::Union { members, .. } | TypeNode::Intersection { members, .. } => {
            for m in members {
                collect_ordered_keys(m, scope, out, seen, depth + 1);
            }
        }
        TypeNode::TypeReference { name, type_args, .. } => match name.as_str() {
            "Partial" | "Required" | "Readonly" | "ReturnType" | "Pick" | "Omit"
            | "ExtractPropTypes" | "ExtractPublicPropTypes" => {
                if let Some(arg) = type_args.first() {
                    collect_ordered_keys(arg, scope, out, seen, depth + 1);
                }
            }
            _ => {
                if let Some(target) = scope.lookup_type(name) {
                    collect_ordered_keys(target, scope, out, seen, depth + 1);
                }
            }
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merge_marks_partial_keys_optional() {
        let a = TypeNode::TypeLiteral {
            id: TypeNodeId(1),
            members: vec![TypeMember::Property {
                key: CompactString::new("foo"),
                optional: false,
                value: TypeNode::Unknown { id: TypeNodeId(2) },
            }],
        };
        let b = TypeNode::TypeLiteral {
            id: TypeNodeId(3),
            members: vec![],
        };
        let graph = ScopeGraph::new();
        let scope = Scope::empty();
        let mut resolver = TypeResolver::new(&graph);
        let union = TypeNode::Union {
            id: TypeNodeId(4),
            members: vec![a, b],
        };
        let resolved = resolver.resolve_type_elements(&union, &scope);
        assert!(resolved.props.get("foo").unwrap().optional);
    }

    #[test]
    fn template_literal_expands_cross_product() {
        let expr = StringTypeExpr::TemplateLiteral {
            quasis: vec![CompactString::new("on"), CompactString::new("")],
            exprs: vec![StringTypeExpr::Union(vec![
                StringTypeExpr::Literal(CompactString::new("Click")),
                StringTypeExpr::Literal(CompactString::new("Hover")),
            ])],
        };
        let mut keys = evaluate_string_type(&expr);
        keys.sort();
        assert_eq!(keys, vec!["onClick", "onHover"]);
    }

    #[test]
    fn infer_runtime_type_never_panics_on_unknown() {
        let node = TypeNode::ImportType {
            id: TypeNodeId(1),
            source: CompactString::new("./x"),
            qualifier: CompactString::new("Y"),
        };
        assert_eq!(infer_runtime_type(&node), vec![RuntimeTypeTag::Unknown]);
    }
}
