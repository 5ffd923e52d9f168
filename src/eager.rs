use std::ops::{Deref, DerefMut};

use crate::{LResult, LazyValue};

/// A lazy value that was never lazy.
///
/// Always evaluated, useful wherever a [`LazyValue`] is expected
/// but the value is already at hand.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Eager<T>(T);

impl<T> Eager<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> LazyValue<T> for Eager<T> {
    #[inline]
    fn try_get_value(&mut self) -> LResult<&mut T> {
        Ok(&mut self.0)
    }

    #[inline]
    fn peek(&self) -> Option<&T> {
        Some(&self.0)
    }

    #[inline]
    fn is_evaluated(&self) -> bool {
        true
    }

    fn reassign(&mut self, value: T) {
        self.0 = value;
    }
}

impl<T> From<T> for Eager<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

// nothing is ever computed, so a plain reference is fine here
impl<T> Deref for Eager<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Eager<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Eager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(stringify!(Eager)).field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_evaluated() {
        let mut lazy = Eager::new(3);

        assert!(lazy.is_evaluated());
        assert_eq!(lazy.peek(), Some(&3));
        assert_eq!(*lazy.get_value(), 3);
        assert_eq!(*lazy, 3);
    }

    #[test]
    fn test_reassign() {
        let mut lazy = Eager::new(3);
        lazy.reassign(5);

        assert!(lazy.is_evaluated());
        assert_eq!(*lazy.get_value(), 5);
    }

    #[test]
    fn test_deref_mut() {
        let mut lazy = Eager::from(vec![1, 2]);
        lazy.push(3);

        assert_eq!(lazy.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Eager::new(String::from("left"));
        let mut copy = original.clone();
        copy.reassign("right".into());

        assert_eq!(*original, "left");
        assert_eq!(*copy, "right");
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Eager::new(7)), "Eager(7)");
    }
}
