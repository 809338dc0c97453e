//! Armature - the structural parser framework for Vize Vue templates.
//!
//! An armature is the wire skeleton a sculptor builds before applying the
//! clay: this crate turns raw template text into the [`vize_relief`] AST,
//! nothing more. It owns the HTML tokenizer state machine and the recursive
//! parser that assembles nodes on top of it; directive binding resolution,
//! scope tracking and codegen all happen downstream in `vize_croquis` and
//! `vize_atelier_core`.

pub mod parser;
mod tokenizer;

pub use parser::{parse, parse_with_options, Parser};
pub use tokenizer::{char_codes, Callbacks, QuoteType, Tokenizer};
