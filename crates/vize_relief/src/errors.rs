//! Compiler diagnostics shared by the tokenizer, parser, transform and
//! script-macro pipelines.
//!
//! Most template/script problems are recorded via `on_error`/`on_warn`
//! rather than aborting the compile — see the policy table on [`ErrorCode`].

use crate::SourceLocation;
use thiserror::Error;

/// A single compiler diagnostic.
#[derive(Debug, Clone, Error)]
#[error("{code}")]
pub struct CompilerError {
    pub code: ErrorCode,
    pub loc: Option<SourceLocation>,
}

impl CompilerError {
    pub fn new(code: ErrorCode, loc: Option<SourceLocation>) -> Self {
        Self { code, loc }
    }

    /// Hard-error codes abort compilation; everything else is recorded and
    /// compilation continues with a best-effort IR.
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

/// Diagnostic category. Tokenizer/parser codes come first (mirroring the
/// historical HTML-parsing error set); script-macro, type-resolution and
/// scheduler codes follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    // --- Tokenizer / parser -------------------------------------------------
    #[error("unexpected end of file while scanning a tag")]
    EofInTag,
    #[error("unexpected end of file inside a comment")]
    EofInComment,
    #[error("invalid end tag name")]
    InvalidEndTag,
    #[error("tag is missing a matching end tag")]
    MissingEndTag,
    #[error("end tag is missing a name")]
    MissingEndTagName,

    // --- Template transform (recorded, non-fatal) --------------------------
    #[error("malformed v-for expression")]
    InvalidForExpression,
    #[error("duplicate static slot name")]
    DuplicateSlotNames,
    #[error("v-else/v-else-if with no matching v-if")]
    ElseNoAdjacentIf,
    #[error(":key is not allowed on <template v-for> when forwarding to a single child")]
    KeyedTemplateFor,

    // --- Script macro pipeline (fatal) --------------------------------------
    #[error("macro called with both a type argument and a runtime argument")]
    MacroMixedTypeAndRuntimeArgs,
    #[error("duplicate macro call in the same file")]
    MacroDuplicateCall,
    #[error("withDefaults() used without a type-based defineProps<T>()")]
    WithDefaultsWithoutTypeProps,
    #[error("defineOptions() may not declare props/emits/expose/slots")]
    DefineOptionsReservedKey,

    // --- Props destructure (fatal) ------------------------------------------
    #[error("assignment to a destructured prop is not allowed")]
    AssignToDestructuredProp,
    #[error("destructured prop passed to watch()/toRef() loses reactivity; use a getter")]
    DestructuredPropNotReactive,

    // --- Type resolver -------------------------------------------------------
    #[error("unresolvable type reference")]
    UnresolvableType,
    #[error("computed, non-static property key in a type literal")]
    ComputedTypeLiteralKey,

    // --- Import / filesystem (fatal) -----------------------------------------
    #[error("failed to resolve import")]
    ImportResolutionFailed,

    // --- Scheduler (non-fatal) ------------------------------------------------
    #[error("job recursion limit exceeded; skipping further runs in this flush")]
    RecursionLimitExceeded,
}

impl ErrorCode {
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorCode::MacroMixedTypeAndRuntimeArgs
                | ErrorCode::MacroDuplicateCall
                | ErrorCode::WithDefaultsWithoutTypeProps
                | ErrorCode::DefineOptionsReservedKey
                | ErrorCode::AssignToDestructuredProp
                | ErrorCode::DestructuredPropNotReactive
                | ErrorCode::UnresolvableType
                | ErrorCode::ImportResolutionFailed
        )
    }
}
