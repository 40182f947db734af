//! The `String` value: a sequence of Unicode scalar values. Unlike
//! `Symbol`/`Char`/`Complex`, strings are never interned — equal text
//! doesn't imply equal identity — but the `value` field is still
//! write-once, so it is wrapped in `Rc<str>` rather than exposed as a
//! mutable buffer.

use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SxString {
    value: Rc<str>,
}

impl SxString {
    pub fn new(value: impl Into<String>) -> Self {
        SxString { value: Rc::from(value.into()) }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for SxString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_instances_with_equal_text_are_not_interned() {
        let a = SxString::new("hi");
        let b = SxString::new("hi");
        assert_eq!(a, b);
        assert!(!Rc::ptr_eq(&a.value, &b.value));
    }

    #[test]
    fn value_accessor_exposes_text() {
        let s = SxString::new("hello");
        assert_eq!(s.value(), "hello");
    }
}
