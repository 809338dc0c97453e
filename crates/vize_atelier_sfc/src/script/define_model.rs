//! defineModel macro handling.
//!
//! `const name = defineModel('name'?, options?)` declares a two-way bindable
//! prop: a prop named `name` (default `"modelValue"`), a matching
//! `update:name` emit, and a local `ref`-like binding that reads the prop and
//! emits on write. Multiple calls declare multiple independently-named
//! models (`defineModel('foo')`, `defineModel('bar')`).

pub const DEFINE_MODEL: &str = "defineModel";

use super::context::ScriptCompileContext;
use super::utils::MacroCall;

/// One resolved `defineModel()` call.
#[derive(Debug, Clone)]
pub struct ModelBinding {
    /// Prop name, defaulting to `"modelValue"` for the unnamed call.
    pub prop_name: String,
    /// Local variable the call result is bound to.
    pub local_name: Option<String>,
    /// Whether options contained `required: true` or `default: ...`.
    pub options: Option<String>,
}

/// Split a `defineModel` call's argument list into an optional name literal
/// and an optional trailing options object.
fn split_model_args(args: &str) -> (Option<String>, Option<String>) {
    let args = args.trim();
    if args.is_empty() {
        return (None, None);
    }
    if args.starts_with('\'') || args.starts_with('"') {
        let quote = args.as_bytes()[0] as char;
        if let Some(end) = args[1..].find(quote) {
            let name = args[1..=end].to_string();
            let rest = args[end + 2..].trim_start().trim_start_matches(',').trim();
            let options = if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            return (Some(name), options);
        }
    }
    // No leading name literal: the whole argument list is the options object.
    (None, Some(args.to_string()))
}

/// Resolve every recorded `defineModel()` call into its prop/local-binding shape.
pub fn resolve_models(ctx: &ScriptCompileContext) -> Vec<ModelBinding> {
    ctx.macros
        .define_models
        .iter()
        .map(|call: &MacroCall| {
            let (name, options) = split_model_args(&call.args);
            ModelBinding {
                prop_name: name.unwrap_or_else(|| "modelValue".to_string()),
                local_name: call.binding_name.clone(),
                options,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_is_model_value() {
        let (name, options) = split_model_args("");
        assert_eq!(name, None);
        assert_eq!(options, None);
    }

    #[test]
    fn named_model_with_options() {
        let (name, options) = split_model_args("'count', { default: 0 }");
        assert_eq!(name, Some("count".to_string()));
        assert_eq!(options, Some("{ default: 0 }".to_string()));
    }
}
