//! defineExpose macro handling.
//!
//! `defineExpose({ ... })` registers the public instance surface exposed to
//! parent components via template refs. It has no type-only form: the single
//! runtime argument is forwarded to `__expose()` as-is.

pub const DEFINE_EXPOSE: &str = "defineExpose";

use super::context::ScriptCompileContext;

/// Generate the runtime `__expose(...)` call body, if `defineExpose` was used.
#[allow(dead_code)]
pub fn gen_expose_call(ctx: &ScriptCompileContext) -> Option<String> {
    ctx.macros
        .define_expose
        .as_ref()
        .map(|call| call.args.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::super::context::ScriptCompileContext;

    #[test]
    fn records_expose_argument() {
        let content = "defineExpose({ foo, bar })";
        let mut ctx = ScriptCompileContext::new(content);
        ctx.extract_all_macros();
        assert!(ctx.has_define_expose_call);
        assert!(ctx.macros.define_expose.is_some());
    }
}
