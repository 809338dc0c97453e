//! # vize_atelier_sfc
//!
//! Atelier SFC - the workshop where a raw `.vue` text file becomes a
//! compiled JavaScript/TypeScript module plus extracted CSS.
//!
//! ## Architecture
//!
//! ```text
//! raw SFC text
//!      ↓
//!  parse.rs            -- splits into <template>/<script>/<script setup>/<style>* blocks
//!      ↓
//!  script.rs, compile_script/*  -- macro pipeline (C3/C4): defineProps, defineEmits,
//!                                  defineModel, defineExpose, defineOptions, defineSlots,
//!                                  props-destructure rewriting
//!      ↓
//!  compile_template.rs  -- hands the template block to vize_atelier_core (C5/C7)
//!      ↓
//!  compile.rs           -- assembles script + template + styles into one module
//! ```
//!
//! `rewrite_default` and `style` are leaf utilities `compile.rs` reaches for:
//! rewriting a plain `<script>` block's `export default` into an assignable
//! `const`, and scoping `<style scoped>` CSS selectors.

pub mod compile;
pub mod compile_script;
pub mod compile_template;
pub mod parse;
pub mod rewrite_default;
pub mod script;
pub mod style;
pub mod types;

pub use compile::{compile_sfc, ScriptCompileResult};
pub use parse::parse_sfc;
pub use rewrite_default::rewrite_default;
pub use style::{apply_scoped_css, compile_style, extract_css_vars};
pub use types::*;
