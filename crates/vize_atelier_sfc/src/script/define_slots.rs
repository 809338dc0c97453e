//! defineSlots macro handling.
//!
//! `defineSlots<{ default(props: T): any }>()` is type-only: it declares the
//! shape of the component's slots for template type-checking and IDE
//! tooling, and is fully erased at compile time (it is removed from the
//! generated script, the same way a type-only defineProps<T>() is).

pub const DEFINE_SLOTS: &str = "defineSlots";

use super::context::ScriptCompileContext;

/// The raw type-parameter text of `defineSlots<...>()`, if present.
#[allow(dead_code)]
pub fn slot_type_decl(ctx: &ScriptCompileContext) -> Option<&str> {
    ctx.macros
        .define_slots
        .as_ref()
        .and_then(|call| call.type_args.as_deref())
}

#[cfg(test)]
mod tests {
    use super::super::context::ScriptCompileContext;

    #[test]
    fn records_define_slots_call() {
        let content = "const slots = defineSlots<{ default(): any }>()";
        let mut ctx = ScriptCompileContext::new(content);
        ctx.extract_all_macros();
        assert!(ctx.has_define_slots_call);
    }
}
