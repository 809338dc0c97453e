//! Arena-allocated box with `serde::Serialize` support.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};

/// An owning pointer into a bump arena, analogous to `std::boxed::Box`
/// but allocated from a [`crate::Allocator`] rather than the global heap.
pub struct Box<'a, T>(bumpalo::boxed::Box<'a, T>);

impl<'a, T> Box<'a, T> {
    /// Allocate `value` in `bump` and return an owning handle to it.
    #[inline]
    pub fn new_in(value: T, bump: &'a bumpalo::Bump) -> Self {
        Self(bumpalo::boxed::Box::new_in(value, bump))
    }

    /// Unwrap into the underlying value, consuming the box.
    ///
    /// The arena allocation itself is not reclaimed until the whole arena
    /// is reset; this only moves `T` out.
    #[inline]
    pub fn into_inner(boxed: Self) -> T {
        bumpalo::boxed::Box::into_inner(boxed.0)
    }
}

impl<'a, T> Deref for Box<'a, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<'a, T> DerefMut for Box<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Box<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<'a, T: Serialize> Serialize for Box<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (**self).serialize(serializer)
    }
}
