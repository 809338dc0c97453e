//! Arena allocator wrapper.
//!
//! A thin wrapper around `bumpalo::Bump` so downstream crates depend on
//! `vize_carton::Allocator` rather than `bumpalo` directly, keeping the
//! arena story swappable in one place.

use bumpalo::Bump;

/// Owns a bump arena used to allocate AST nodes for a single compile.
#[derive(Default)]
pub struct Allocator {
    bump: Bump,
}

impl Allocator {
    /// Create a new, empty arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Borrow the underlying `Bump` for use with `bumpalo`-based collections.
    #[inline]
    pub fn as_bump(&self) -> &Bump {
        &self.bump
    }

    /// Reset the arena, dropping every allocation made through it.
    ///
    /// Only safe to call once every reference borrowed from this allocator
    /// has gone out of scope, which the borrow checker enforces since this
    /// takes `&mut self`.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl std::fmt::Debug for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator")
            .field("allocated_bytes", &self.bump.allocated_bytes())
            .finish()
    }
}
