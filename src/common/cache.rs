//! Memoization cell with explicit invalidation.
//!
//! Derived shape state (resolved fill, per-level font tables) is computed on
//! first read and kept until a mutator calls [`ResetCell::reset`]. Nothing
//! recomputes implicitly: a stale value stays until it is reset.

use std::cell::RefCell;
use std::fmt;

/// A lazily computed value that can be cleared and recomputed.
pub struct ResetCell<T> {
    value: RefCell<Option<T>>,
}

impl<T> ResetCell<T> {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self {
            value: RefCell::new(None),
        }
    }

    /// Drop the cached value so the next read recomputes it.
    #[inline]
    pub fn reset(&self) {
        self.value.borrow_mut().take();
    }
}

impl<T: Clone> ResetCell<T> {
    /// Return the cached value, computing it with `init` if the cell is empty.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> T {
        if let Some(value) = self.value.borrow().as_ref() {
            return value.clone();
        }

        let value = init();
        *self.value.borrow_mut() = Some(value.clone());
        value
    }
}

impl<T> Default for ResetCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ResetCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResetCell").field(&self.value.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_value_is_computed_once() {
        let calls = Cell::new(0);
        let cell = ResetCell::new();

        let first = cell.get_or_init(|| {
            calls.set(calls.get() + 1);
            42
        });
        let second = cell.get_or_init(|| {
            calls.set(calls.get() + 1);
            7
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reset_forces_recompute() {
        let calls = Cell::new(0);
        let cell = ResetCell::new();
        let compute = |value: &str| {
            calls.set(calls.get() + 1);
            value.to_string()
        };

        assert_eq!(cell.get_or_init(|| compute("old")), "old");
        assert_eq!(cell.get_or_init(|| compute("ignored")), "old");
        assert_eq!(calls.get(), 1);

        cell.reset();
        assert_eq!(cell.get_or_init(|| compute("new")), "new");
        assert_eq!(calls.get(), 2);

        // resetting an empty cell is harmless
        let empty: ResetCell<u8> = ResetCell::default();
        empty.reset();
        assert_eq!(empty.get_or_init(|| 5), 5);
    }
}
