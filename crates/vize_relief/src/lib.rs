//! Relief - the sculptured AST surface for Vize Vue templates.
//!
//! Named after bas-relief: the template AST is carved in shallow layers out
//! of one flat source string, each node keeping its `SourceLocation` back
//! into that original surface. This crate only defines the node shapes
//! (arena-allocated via [`vize_carton::Allocator`]) and compiler options —
//! parsing lives in `vize_armature`, transforms and codegen glue in
//! `vize_atelier_core`.

pub mod ast;
pub mod errors;
pub mod options;

pub use ast::*;
pub use errors::{CompilerError, ErrorCode};
pub use options::*;
