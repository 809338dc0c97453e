//! defineOptions macro handling.
//!
//! `defineOptions({ name, inheritAttrs, ... })` merges arbitrary component
//! options (anything not already covered by a dedicated macro) into the
//! compiled options object. It takes no type parameter.

pub const DEFINE_OPTIONS: &str = "defineOptions";

use super::context::ScriptCompileContext;

/// Options object literal passed to `defineOptions`, if present.
#[allow(dead_code)]
pub fn gen_options_object(ctx: &ScriptCompileContext) -> Option<String> {
    ctx.macros
        .define_options
        .as_ref()
        .map(|call| call.args.trim().to_string())
}

/// The component's explicit `name` option, if `defineOptions({ name: '...' })`
/// was used and the name is a plain string literal.
#[allow(dead_code)]
pub fn extract_name_option(ctx: &ScriptCompileContext) -> Option<String> {
    let args = gen_options_object(ctx)?;
    let key_pos = args.find("name")?;
    let after = &args[key_pos + 4..];
    let colon = after.find(':')?;
    let value = after[colon + 1..].trim_start();
    let quote = value.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let rest = &value[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::super::context::ScriptCompileContext;
    use super::*;

    #[test]
    fn records_options_object() {
        let content = "defineOptions({ name: 'Foo', inheritAttrs: false })";
        let mut ctx = ScriptCompileContext::new(content);
        ctx.extract_all_macros();
        assert!(ctx.has_define_options_call);
        assert_eq!(extract_name_option(&ctx), Some("Foo".to_string()));
    }
}
