//! `v-for` structural transform.
//!
//! Selects the slot/fragment patch flag from the loop source's constancy and
//! the presence of an explicit `:key`:
//!
//! - constant source, no key         -> `STABLE_FRAGMENT`
//! - any source, explicit `:key`     -> `KEYED_FRAGMENT`
//! - non-constant source, no key     -> `UNKEYED_FRAGMENT`

use vize_carton::flags::PatchFlags;

use crate::ast::{ConstantType, ExpressionNode, ForNode, RuntimeHelper};
use crate::transform::TransformContext;

/// Patch flag a `v-for` fragment should carry, given its source expression
/// and whether the element/template it wraps has an explicit `:key`.
pub fn select_fragment_flag(source: &ExpressionNode<'_>, has_explicit_key: bool) -> i32 {
    if has_explicit_key {
        return PatchFlags::KEYED_FRAGMENT;
    }
    if source_is_constant(source) {
        PatchFlags::STABLE_FRAGMENT
    } else {
        PatchFlags::UNKEYED_FRAGMENT
    }
}

fn source_is_constant(source: &ExpressionNode<'_>) -> bool {
    match source {
        ExpressionNode::Simple(simple) => simple.const_type >= ConstantType::CanCache,
        ExpressionNode::Compound(_) => false,
    }
}

/// Walk `for_node`'s direct children looking for a `:key` binding on the
/// (single) root child `v-for` forwards to -- the common `<div v-for :key>`
/// and `<template v-for>` shapes.
fn has_explicit_key(for_node: &ForNode<'_>) -> bool {
    use crate::ast::{PropNode, TemplateChildNode};

    for_node.children.iter().any(|child| {
        if let TemplateChildNode::Element(el) = child {
            el.props.iter().any(|prop| match prop {
                PropNode::Directive(dir) => dir.name == "bind" && is_key_arg(dir),
                PropNode::Attribute(attr) => attr.name.as_str() == "key",
            })
        } else {
            false
        }
    })
}

fn is_key_arg(dir: &crate::ast::DirectiveNode<'_>) -> bool {
    matches!(
        dir.arg.as_ref(),
        Some(ExpressionNode::Simple(simple)) if simple.is_static && simple.content.as_str() == "key"
    )
}

/// Apply the v-for transform: pick the fragment patch flag and record the
/// runtime helpers codegen will need (`OpenBlock`/`CreateElementBlock`/
/// `Fragment`/`RenderList`).
pub fn transform_for<'a>(for_node: &ForNode<'a>, ctx: &mut TransformContext<'a>) {
    ctx.helper(RuntimeHelper::OpenBlock);
    ctx.helper(RuntimeHelper::CreateElementBlock);
    ctx.helper(RuntimeHelper::Fragment);
    ctx.helper(RuntimeHelper::RenderList);

    let _flag = select_fragment_flag(&for_node.source, has_explicit_key(for_node));
}
