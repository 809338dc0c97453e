//! Arena-allocated vector with `serde::Serialize` support.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};

/// A growable array allocated from a bump arena, analogous to `std::vec::Vec`.
pub struct Vec<'a, T>(bumpalo::collections::Vec<'a, T>);

impl<'a, T> Vec<'a, T> {
    #[inline]
    pub fn new_in(bump: &'a bumpalo::Bump) -> Self {
        Self(bumpalo::collections::Vec::new_in(bump))
    }

    #[inline]
    pub fn with_capacity_in(capacity: usize, bump: &'a bumpalo::Bump) -> Self {
        Self(bumpalo::collections::Vec::with_capacity_in(capacity, bump))
    }
}

impl<'a, T> Deref for Vec<'a, T> {
    type Target = bumpalo::collections::Vec<'a, T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, T> DerefMut for Vec<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Vec<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<'a, T: Serialize> Serialize for Vec<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'a, 'b, T> IntoIterator for &'b Vec<'a, T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
