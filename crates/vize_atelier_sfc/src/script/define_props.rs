//! defineProps / withDefaults macro handling.
//!
//! `defineProps` accepts either a runtime declaration (array or object of
//! validators) or a type parameter (`defineProps<{ foo: string }>()`).
//! `withDefaults(defineProps<T>(), { ... })` pairs a type-only declaration
//! with default values, normally consumed together with the props-destructure
//! rewrite when the call result is itself destructured.

pub const DEFINE_PROPS: &str = "defineProps";
pub const WITH_DEFAULTS: &str = "withDefaults";

use super::context::ScriptCompileContext;

/// The raw runtime argument text passed to `defineProps(...)`, if the call
/// used the runtime (non type-parameter) form.
#[allow(dead_code)]
pub fn runtime_props_decl(ctx: &ScriptCompileContext) -> Option<&str> {
    ctx.macros
        .define_props
        .as_ref()
        .filter(|call| call.type_args.is_none())
        .map(|call| call.args.as_str())
}

/// The default-values object literal passed as `withDefaults`'s second
/// argument, if `withDefaults` was used.
#[allow(dead_code)]
pub fn with_defaults_object(ctx: &ScriptCompileContext) -> Option<&str> {
    ctx.macros
        .with_defaults
        .as_ref()
        .map(|call| call.args.as_str())
        .and_then(|args| {
            let args = args.trim();
            let comma = args.rfind(',')?;
            Some(args[comma + 1..].trim())
        })
}

#[cfg(test)]
mod tests {
    use super::super::context::ScriptCompileContext;

    #[test]
    fn typed_props_have_no_runtime_decl() {
        let content = "const props = defineProps<{ msg: string }>()";
        let mut ctx = ScriptCompileContext::new(content);
        ctx.extract_all_macros();
        assert!(super::runtime_props_decl(&ctx).is_none());
    }
}
