//! Interned symbols.
//!
//! A `Symbol` is a non-empty canonical string; two symbols with the same
//! (post-case-folding) text are the same object. Case folding happens at
//! construction time, governed by the active [`crate::dialect::DialectConfig`],
//! so the interner itself only ever sees already-folded keys.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::intern::WeakInterner;

pub struct SymbolInner {
    pub value: String,
}

pub type Symbol = Rc<SymbolInner>;

impl PartialEq for SymbolInner {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl Eq for SymbolInner {}

impl Hash for SymbolInner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl std::fmt::Debug for SymbolInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.value)
    }
}

thread_local! {
    static SYMBOL_TABLE: WeakInterner<String, SymbolInner> = WeakInterner::new();
}

/// Interns `text`, case-folding to lowercase first when `ignore_case` is
/// set. Rejects the empty string.
pub fn make_symbol(text: &str, ignore_case: bool) -> Result<Symbol> {
    if text.is_empty() {
        return Err(Error::Construction("Symbol must not be empty".into()));
    }
    let canonical = if ignore_case { text.to_lowercase() } else { text.to_string() };
    Ok(SYMBOL_TABLE.with(|t| {
        t.intern(canonical.clone(), || SymbolInner { value: canonical })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_instance() {
        let a = make_symbol("foo", false).unwrap();
        let b = make_symbol("foo", false).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn ignore_case_folds_before_interning() {
        let a = make_symbol("FOO", true).unwrap();
        let b = make_symbol("foo", true).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.value, "foo");
    }

    #[test]
    fn case_sensitive_keeps_distinct_identity() {
        let a = make_symbol("Foo", false).unwrap();
        let b = make_symbol("foo", false).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn empty_symbol_is_a_construction_error() {
        let err = make_symbol("", false).unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }
}
