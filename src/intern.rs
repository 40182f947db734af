//! Weak-keyed interning for `Symbol`, `Char` and `RatComplex`.
//!
//! Unlike a classic string interner (one entry per unique key, kept alive
//! for the program's lifetime), the value model needs interning that does
//! **not** extend an atom's lifetime: once the last `Rc` handle to a
//! `Symbol`/`Char`/`RatComplex` is dropped, its table entry must be
//! reclaimable. Rust gives us genuine weak references natively (`Weak<T>`),
//! so there is no need for the finalization-hook workaround a
//! weak-reference-less host would require — we just store `Weak<T>` values
//! and let `Weak::upgrade` tell us whether the canonical instance is still
//! alive.
//!
//! Each table is process-wide but **not** thread-safe: the value model is
//! single-threaded cooperative (see the crate's concurrency notes), so the
//! interners live in thread-local storage rather than behind a mutex.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

/// A weak-keyed cache mapping canonical keys to at-most-one live `Rc<V>`.
///
/// Calling [`WeakInterner::intern`] with a key already backing a live value
/// returns that same `Rc` (identity is preserved); calling it after the
/// last external reference has been dropped creates a fresh instance.
pub struct WeakInterner<K, V> {
    table: RefCell<HashMap<K, Weak<V>>>,
}

impl<K, V> WeakInterner<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        WeakInterner { table: RefCell::new(HashMap::new()) }
    }

    /// Returns the live instance for `key`, constructing one with `make` if
    /// none is currently alive.
    pub fn intern(&self, key: K, make: impl FnOnce() -> V) -> Rc<V> {
        let mut table = self.table.borrow_mut();
        if let Some(weak) = table.get(&key) {
            if let Some(strong) = weak.upgrade() {
                log::trace!("intern hit for {key:?}");
                return strong;
            }
            log::trace!("intern key {key:?} reclaimed, reconstructing");
        }
        let strong = Rc::new(make());
        table.insert(key, Rc::downgrade(&strong));
        strong
    }

    /// Number of entries whose canonical instance is still alive.
    ///
    /// Used by tests to observe reclamation; not needed on the hot path.
    pub fn live_count(&self) -> usize {
        self.table.borrow().values().filter(|w| w.strong_count() > 0).count()
    }
}

impl<K, V> Default for WeakInterner<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_instance_while_alive() {
        let interner: WeakInterner<String, String> = WeakInterner::new();
        let a = interner.intern("hello".to_string(), || "hello".to_string());
        let b = interner.intern("hello".to_string(), || "hello".to_string());
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn intern_distinguishes_different_keys() {
        let interner: WeakInterner<String, String> = WeakInterner::new();
        let a = interner.intern("hello".to_string(), || "hello".to_string());
        let b = interner.intern("world".to_string(), || "world".to_string());
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn dropping_last_handle_allows_reclamation() {
        let interner: WeakInterner<String, String> = WeakInterner::new();
        let a = interner.intern("hello".to_string(), || "hello".to_string());
        drop(a);
        assert_eq!(interner.live_count(), 0);
        // A fresh construction after the drop is a *new* instance.
        let b = interner.intern("hello".to_string(), || "hello".to_string());
        let c = interner.intern("hello".to_string(), || "hello".to_string());
        assert!(Rc::ptr_eq(&b, &c));
    }

    #[test]
    fn live_count_tracks_alive_entries() {
        let interner: WeakInterner<String, String> = WeakInterner::new();
        let a = interner.intern("a".to_string(), || "a".to_string());
        let _b = interner.intern("b".to_string(), || "b".to_string());
        assert_eq!(interner.live_count(), 2);
        drop(a);
        assert_eq!(interner.live_count(), 1);
    }
}
