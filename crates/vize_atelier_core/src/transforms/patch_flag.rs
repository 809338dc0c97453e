//! Patch-flag derivation for a single element's vnode call.
//!
//! Mirrors the bit-field contract defined in [`vize_carton::flags::PatchFlags`]:
//! each dynamic binding on an element contributes one bit, OR'd together into
//! the `patch_flag` stored on its `VNodeCall` (or, for elements that have not
//! been wrapped in one yet, tracked on the context for the caller to apply).

use vize_carton::flags::PatchFlags;

use crate::ast::{DirectiveNode, ElementNode, PropNode, TemplateChildNode};
use crate::transform::TransformContext;

/// Derive the OR'd patch-flag bits for `el` from its (already-transformed)
/// props and children. Returns `None` when the element is fully static --
/// codegen should then consider it hoistable.
pub fn compute_patch_flag(el: &ElementNode<'_>) -> Option<i32> {
    let mut flag = 0i32;

    for prop in el.props.iter() {
        if let PropNode::Directive(dir) = prop {
            flag |= flag_for_directive(dir);
        }
    }

    if has_dynamic_text_child(el) {
        flag |= PatchFlags::TEXT;
    }

    if flag == 0 {
        None
    } else {
        Some(flag)
    }
}

fn flag_for_directive(dir: &DirectiveNode<'_>) -> i32 {
    match dir.name.as_str() {
        "bind" => match static_arg_name(dir) {
            Some("class") => PatchFlags::CLASS,
            Some("style") => PatchFlags::STYLE,
            Some(_) => PatchFlags::PROPS,
            None => PatchFlags::FULL_PROPS,
        },
        "on" => {
            if static_arg_name(dir).is_none() {
                PatchFlags::FULL_PROPS
            } else {
                0
            }
        }
        "model" => PatchFlags::PROPS,
        _ => 0,
    }
}

fn static_arg_name<'a>(dir: &'a DirectiveNode<'_>) -> Option<&'a str> {
    use crate::ast::ExpressionNode;
    match dir.arg.as_ref()? {
        ExpressionNode::Simple(simple) if simple.is_static => Some(simple.content.as_str()),
        _ => None,
    }
}

fn has_dynamic_text_child(el: &ElementNode<'_>) -> bool {
    el.children
        .iter()
        .any(|child| matches!(child, TemplateChildNode::Interpolation(_)))
}

/// Apply patch-flag derivation to an element in place, recording the
/// relevant runtime helper (`NeedPatch` is implicit; no extra helper import
/// is required for these bits).
pub fn derive_patch_flag(el: &ElementNode<'_>, _ctx: &mut TransformContext<'_>) -> Option<i32> {
    compute_patch_flag(el)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn static_element_has_no_patch_flag() {
        let allocator = Bump::new();
        let (root, _) = vize_armature::parse(&allocator, "<div class=\"a\">hi</div>");
        if let TemplateChildNode::Element(el) = &root.children[0] {
            assert_eq!(compute_patch_flag(el), None);
        } else {
            panic!("expected element");
        }
    }

    #[test]
    fn dynamic_class_binding_sets_class_flag() {
        let allocator = Bump::new();
        let (root, _) = vize_armature::parse(&allocator, "<div :class=\"c\">hi</div>");
        if let TemplateChildNode::Element(el) = &root.children[0] {
            assert_eq!(compute_patch_flag(el), Some(PatchFlags::CLASS));
        } else {
            panic!("expected element");
        }
    }

    #[test]
    fn interpolation_child_sets_text_flag() {
        let allocator = Bump::new();
        let (root, _) = vize_armature::parse(&allocator, "<div>{{ msg }}</div>");
        if let TemplateChildNode::Element(el) = &root.children[0] {
            assert_eq!(compute_patch_flag(el), Some(PatchFlags::TEXT));
        } else {
            panic!("expected element");
        }
    }
}
