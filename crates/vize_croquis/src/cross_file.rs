//! Cross-file scope graph (C1): for a given file path, the set of
//! type/value declarations visible to that file's top level, built from
//! imports, local declarations and exports, and merged across files that
//! re-export each other.
//!
//! This is deliberately a different shape from [`crate::scope`]'s binding
//! scope chain: that chain tracks *runtime* variable visibility inside one
//! template/script (for-loop aliases, slot params, closures). This module
//! tracks *type-level* declarations across file boundaries, which is what
//! `defineProps<ImportedInterface>()` needs to resolve.

use rustc_hash::FxHashMap;
use vize_carton::CompactString;

use crate::types::TypeNode;

/// An import binding: `import { imported as local } from source`.
#[derive(Debug, Clone)]
pub struct ImportBinding {
    pub source: CompactString,
    pub imported: CompactString,
}

/// Everything one file contributes to the type graph.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub path: CompactString,
    pub imports: FxHashMap<CompactString, ImportBinding>,
    pub types: FxHashMap<CompactString, TypeNode>,
    pub declares: FxHashMap<CompactString, TypeNode>,
    pub exported_types: FxHashMap<CompactString, TypeNode>,
    pub exported_declares: FxHashMap<CompactString, TypeNode>,
}

impl Scope {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(path: impl Into<CompactString>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Declaration-merging insert for `types`: interface+interface concatenates
    /// bodies, anything else simply overwrites (module merging is handled
    /// one level up, in [`ScopeGraph`], since it needs visibility into both
    /// sides' full bodies).
    pub fn declare_type(&mut self, name: impl Into<CompactString>, node: TypeNode, exported: bool) {
        let name = name.into();
        self.merge_type_entry(name.clone(), node.clone());
        if exported {
            self.exported_types.insert(name, node);
        }
    }

    fn merge_type_entry(&mut self, name: CompactString, node: TypeNode) {
        match self.types.get(&name) {
            Some(TypeNode::InterfaceDecl { extends, body, id }) => {
                if let TypeNode::InterfaceDecl {
                    body: new_body,
                    extends: new_extends,
                    ..
                } = &node
                {
                    let merged_body = TypeNode::TypeLiteral {
                        id: *id,
                        members: merge_members(body, new_body),
                    };
                    let mut merged_extends = extends.clone();
                    merged_extends.extend(new_extends.clone());
                    self.types.insert(
                        name,
                        TypeNode::InterfaceDecl {
                            id: *id,
                            extends: merged_extends,
                            body: Box::new(merged_body),
                        },
                    );
                    return;
                }
                self.types.insert(name, node);
            }
            _ => {
                self.types.insert(name, node);
            }
        }
    }

    pub fn declare_value(&mut self, name: impl Into<CompactString>, node: TypeNode, exported: bool) {
        let name = name.into();
        self.declares.insert(name.clone(), node.clone());
        if exported {
            self.exported_declares.insert(name, node);
        }
    }

    pub fn add_import(&mut self, local: impl Into<CompactString>, binding: ImportBinding) {
        self.imports.insert(local.into(), binding);
    }

    /// Lookup order: file-local types (honoring the graph's import chain is
    /// done by [`ScopeGraph::resolve`], this is the local-only half).
    pub fn lookup_type(&self, name: &str) -> Option<&TypeNode> {
        self.types.get(name)
    }

    pub fn lookup_declare(&self, name: &str) -> Option<&TypeNode> {
        self.declares.get(name)
    }
}

fn merge_members(a: &TypeNode, b: &TypeNode) -> Vec<crate::types::TypeMember> {
    let mut out = Vec::new();
    if let TypeNode::TypeLiteral { members, .. } = a {
        out.extend(members.clone());
    }
    if let TypeNode::TypeLiteral { members, .. } = b {
        out.extend(members.clone());
    }
    out
}

/// A registry of every file [`Scope`] discovered so far, plus the relative
/// and non-relative import resolution rules from spec §4.1.
#[derive(Debug, Default)]
pub struct ScopeGraph {
    files: FxHashMap<CompactString, Scope>,
}

impl ScopeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scope: Scope) {
        self.files.insert(scope.path.clone(), scope);
    }

    pub fn get(&self, path: &str) -> Option<&Scope> {
        self.files.get(path)
    }

    /// `invalidateTypeCache(path)`: drop the cached [`Scope`] for `path` so
    /// the next [`Self::resolve`]/[`Self::resolve_module`] against it
    /// re-reads the file instead of serving a stale scope. Callers (the SFC
    /// watch/HMR entrypoint) are responsible for re-inserting a freshly
    /// parsed `Scope` afterward; this only clears the memo.
    pub fn invalidate(&mut self, path: &str) {
        if self.files.remove(path).is_some() {
            tracing::debug!(path, "invalidated cached scope, next resolve will re-read the file");
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Resolve `resolve(name, scope, onlyExported)`: file imports -> file
    /// local types/declares (or exported-only) -> nothing (globally
    /// configured scopes are injected by the caller via `global_scope`).
    pub fn resolve(&self, name: &str, scope: &Scope, only_exported: bool) -> Option<&TypeNode> {
        if let Some(import) = scope.imports.get(name) {
            let target_path = self.join_relative(&scope.path, &import.source);
            if let Some(target) = self.files.get(&target_path) {
                return target.exported_types.get(import.imported.as_str());
            }
            return None;
        }
        if only_exported {
            scope.exported_types.get(name)
        } else {
            scope.types.get(name)
        }
    }

    /// `export * from 'x'` target resolution, reused by [`TypeResolver`](crate::types::TypeResolver)
    /// for `ImportType` nodes (`import('./x').Y`).
    pub fn resolve_module(&self, source: &str, from: &Scope) -> Option<Scope> {
        let path = self.join_relative(&from.path, source);
        self.files.get(&path).cloned()
    }

    /// Relative-import candidate resolution: try `x`, `x.ts`, `x.d.ts`,
    /// `x/index.ts`, `x/index.d.ts` in order against the registered file set.
    /// Non-relative sources (bare package specifiers) are returned unchanged —
    /// a real resolver would consult tsconfig path mapping here.
    fn join_relative(&self, containing: &str, source: &str) -> CompactString {
        if !source.starts_with('.') {
            return CompactString::new(source);
        }
        let dir = containing.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
        let joined = normalize_join(dir, source);
        let candidates = [
            joined.clone(),
            format!("{joined}.ts"),
            format!("{joined}.d.ts"),
            format!("{joined}/index.ts"),
            format!("{joined}/index.d.ts"),
        ];
        for candidate in &candidates {
            if self.files.contains_key(candidate.as_str()) {
                return CompactString::new(candidate.as_str());
            }
        }
        CompactString::new(joined)
    }
}

fn normalize_join(dir: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = if dir.is_empty() {
        Vec::new()
    } else {
        dir.split('/').collect()
    };
    for segment in rel.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeNodeId;

    #[test]
    fn relative_import_resolves_to_registered_file() {
        let mut graph = ScopeGraph::new();
        let mut target = Scope::new("src/props.ts");
        target.declare_type(
            "Props",
            TypeNode::TypeLiteral {
                id: TypeNodeId(1),
                members: vec![],
            },
            true,
        );
        graph.insert(target);

        let mut from = Scope::new("src/component.vue");
        from.add_import(
            "Props",
            ImportBinding {
                source: CompactString::new("./props"),
                imported: CompactString::new("Props"),
            },
        );

        assert!(graph.resolve("Props", &from, false).is_some());
    }

    #[test]
    fn invalidate_forces_a_fresh_scope_to_be_reinserted() {
        let mut graph = ScopeGraph::new();
        graph.insert(Scope::new("src/props.ts"));
        assert!(graph.contains("src/props.ts"));

        graph.invalidate("src/props.ts");
        assert!(!graph.contains("src/props.ts"));

        let mut from = Scope::new("src/component.vue");
        from.add_import(
            "Props",
            ImportBinding {
                source: CompactString::new("./props"),
                imported: CompactString::new("Props"),
            },
        );
        // scope gone -> resolve can't find the re-export, matching
        // "next resolveTypeElements referring to p re-reads the file".
        assert!(graph.resolve("Props", &from, false).is_none());
    }

    #[test]
    fn non_relative_import_is_passed_through_unresolved() {
        let graph = ScopeGraph::new();
        let mut from = Scope::new("src/component.vue");
        from.add_import(
            "Ref",
            ImportBinding {
                source: CompactString::new("vue"),
                imported: CompactString::new("Ref"),
            },
        );
        assert!(graph.resolve("Ref", &from, false).is_none());
    }

    #[test]
    fn interface_merging_concatenates_members() {
        use crate::types::TypeMember;
        let mut scope = Scope::new("src/a.ts");
        scope.declare_type(
            "Foo",
            TypeNode::InterfaceDecl {
                id: TypeNodeId(1),
                extends: vec![],
                body: Box::new(TypeNode::TypeLiteral {
                    id: TypeNodeId(2),
                    members: vec![TypeMember::Property {
                        key: CompactString::new("a"),
                        optional: false,
                        value: TypeNode::Unknown { id: TypeNodeId(3) },
                    }],
                }),
            },
            false,
        );
        scope.declare_type(
            "Foo",
            TypeNode::InterfaceDecl {
                id: TypeNodeId(1),
                extends: vec![],
                body: Box::new(TypeNode::TypeLiteral {
                    id: TypeNodeId(4),
                    members: vec![TypeMember::Property {
                        key: CompactString::new("b"),
                        optional: false,
                        value: TypeNode::Unknown { id: TypeNodeId(5) },
                    }],
                }),
            },
            false,
        );
        if let Some(TypeNode::InterfaceDecl { body, .. }) = scope.types.get("Foo") {
            if let TypeNode::TypeLiteral { members, .. } = &**body {
                assert_eq!(members.len(), 2);
                return;
            }
        }
        panic!("expected merged interface body");
    }
}
