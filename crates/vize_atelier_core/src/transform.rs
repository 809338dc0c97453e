//! The transform context shared by every structural transform.
//!
//! Transforms walk the [`RootNode`] produced by `vize_armature`, rewriting
//! `TemplateChildNode`s in place and recording the runtime helpers / hoists
//! / cached-node slots the codegen glue layer needs afterwards.

use bumpalo::Bump;
use rustc_hash::FxHashSet;

use crate::ast::*;
use crate::options::CodegenOptions;

/// Per-compile transform state.
///
/// One context is built per template compile and threaded through every
/// node transform. It owns nothing borrowed from the AST itself -- only
/// bookkeeping -- so it can be mutated freely while `&mut` references into
/// the arena-allocated tree are held by the caller.
pub struct TransformContext<'a> {
    pub allocator: &'a Bump,
    pub options: &'a CodegenOptions,
    helpers: FxHashSet<RuntimeHelper>,
    next_cache_index: u32,
    in_v_once: bool,
}

impl<'a> TransformContext<'a> {
    pub fn new(allocator: &'a Bump, options: &'a CodegenOptions) -> Self {
        Self {
            allocator,
            options,
            helpers: FxHashSet::default(),
            next_cache_index: 0,
            in_v_once: false,
        }
    }

    /// Record that codegen will need to import/reference this runtime helper.
    pub fn helper(&mut self, helper: RuntimeHelper) {
        self.helpers.insert(helper);
    }

    pub fn helpers(&self) -> impl Iterator<Item = &RuntimeHelper> {
        self.helpers.iter()
    }

    /// Reserve the next `_cache[n]` slot for a `CacheExpression`.
    pub fn next_cache_index(&mut self) -> u32 {
        let index = self.next_cache_index;
        self.next_cache_index += 1;
        index
    }

    pub fn enter_v_once(&mut self) -> bool {
        std::mem::replace(&mut self.in_v_once, true)
    }

    pub fn set_in_v_once(&mut self, value: bool) {
        self.in_v_once = value;
    }

    pub fn in_v_once(&self) -> bool {
        self.in_v_once
    }
}

/// Run every structural transform over the parsed template, depth-first.
///
/// Order mirrors directive precedence: `v-for` wraps `v-if` (a `v-for` on an
/// element with `v-if` iterates the conditional, not the other way around),
/// then `v-slot`/`v-memo` are handled at the element itself, then patch
/// flags are derived from the (now final) children of the subtree.
pub fn transform_root<'a>(root: &RootNode<'a>, ctx: &mut TransformContext<'a>) {
    for child in root.children.iter() {
        transform_node(child, ctx);
    }
}

fn transform_node<'a>(node: &TemplateChildNode<'a>, ctx: &mut TransformContext<'a>) {
    match node {
        TemplateChildNode::Element(el) => transform_element(el, ctx),
        TemplateChildNode::If(if_node) => {
            for branch in if_node.branches.iter() {
                for child in branch.children.iter() {
                    transform_node(child, ctx);
                }
            }
        }
        TemplateChildNode::For(for_node) => {
            crate::transforms::v_for::transform_for(for_node, ctx);
            for child in for_node.children.iter() {
                transform_node(child, ctx);
            }
        }
        _ => {}
    }
}

fn transform_element<'a>(el: &vize_carton::Box<'a, ElementNode<'a>>, ctx: &mut TransformContext<'a>) {
    if crate::transforms::v_memo::has_v_memo(el) {
        crate::transforms::v_memo::process_v_memo(ctx);
    }
    if crate::transforms::v_slot::has_v_slot(el) {
        crate::transforms::v_slot::transform_slot_outlet(el, ctx);
    }
    for child in el.children.iter() {
        transform_node(child, ctx);
    }
    crate::transforms::patch_flag::derive_patch_flag(el, ctx);
}
