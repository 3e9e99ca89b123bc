//! Final markers: identity tokens attached to accepting states.
//!
//! An automaton accepts any `F: Copy + PartialEq` as a final marker and only
//! ever copies the handle and compares it. Whatever the handle refers to stays
//! owned by the caller and is never released by the automaton.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::ptr;

/// A borrowed reference compared by address rather than by value.
///
/// Two markers are equal only when they point at the same object, so two
/// distinct rules that happen to compare equal stay distinct in a node's
/// final set. The lifetime ties the automaton to the rules it refers to.
pub struct Marker<'a, T: ?Sized>(&'a T);

impl<'a, T: ?Sized> Marker<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Marker(target)
    }

    pub fn get(self) -> &'a T {
        self.0
    }
}

impl<T: ?Sized> Clone for Marker<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Marker<'_, T> {}

impl<T: ?Sized> PartialEq for Marker<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl<T: ?Sized> Eq for Marker<'_, T> {}

impl<T: ?Sized> Hash for Marker<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state)
    }
}

impl<T: ?Sized> Deref for Marker<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Marker<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({:?} @ {:p})", self.0, self.0 as *const T as *const ())
    }
}

impl<'a, T: ?Sized> From<&'a T> for Marker<'a, T> {
    fn from(target: &'a T) -> Self {
        Marker(target)
    }
}
