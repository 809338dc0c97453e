//! Deep-clone-into-an-arena trait.
//!
//! Transform passes occasionally need to duplicate a subtree into the same
//! (or a different) arena — for example, re-emitting a `:key` expression
//! inside a synthesized slot function. `Clone` alone isn't enough once a
//! type borrows from a `Bump`, since the clone must itself be arena
//! allocated rather than heap allocated.

use bumpalo::Bump;

/// Clone `self` into `bump`, producing a value with the arena's lifetime.
pub trait CloneIn<'new> {
    type Cloned;

    fn clone_in(&self, bump: &'new Bump) -> Self::Cloned;
}
