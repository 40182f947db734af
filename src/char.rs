//! Interned single-Unicode-scalar characters.
//!
//! Construction accepts three textual shapes (the tokenizer decides which
//! one applies and passes the remainder after the `#\` prefix):
//! a single scalar value taken literally, a named character such as
//! `Space` or `Newline` (matched case-insensitively), or a hex escape
//! `u…`/`x…`/`U…` up to `0x10FFFF`.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::intern::WeakInterner;

pub struct CharInner {
    pub value: char,
}

pub type SxChar = Rc<CharInner>;

impl PartialEq for CharInner {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl Eq for CharInner {}

impl Hash for CharInner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl std::fmt::Debug for CharInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Char({:?})", self.value)
    }
}

/// Canonical spellings for the named characters, in the order the
/// printer prefers them when more than one name applies to a code point.
const NAMED_CHARS: &[(&str, char)] = &[
    ("Backspace", '\u{0008}'),
    ("Escape", '\u{001B}'),
    ("Linefeed", '\u{000A}'),
    ("Newline", '\u{000A}'),
    ("Page", '\u{000C}'),
    ("Return", '\u{000D}'),
    ("Rubout", '\u{007F}'),
    ("Space", '\u{0020}'),
    ("Tab", '\u{0009}'),
);

/// Looks up a named character case-insensitively, e.g. `"space"`,
/// `"SPACE"`, and `"Space"` all resolve to U+0020.
pub fn named_char(name: &str) -> Option<char> {
    NAMED_CHARS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, c)| *c)
}

/// Returns the preferred canonical name for `c`, if it has one.
pub fn char_name(c: char) -> Option<&'static str> {
    NAMED_CHARS.iter().find(|(n, ch)| *ch == c && *n != "Linefeed").map(|(n, _)| *n)
}

thread_local! {
    static CHAR_TABLE: WeakInterner<char, CharInner> = WeakInterner::new();
}

fn intern(value: char) -> SxChar {
    CHAR_TABLE.with(|t| t.intern(value, || CharInner { value }))
}

/// Interns the literal scalar `c` as a `Char`.
pub fn make_char(c: char) -> SxChar {
    intern(c)
}

/// Resolves `name` against the named-character table.
pub fn make_named_char(name: &str) -> Result<SxChar> {
    named_char(name)
        .map(intern)
        .ok_or_else(|| Error::Construction(format!("'{name}' is not a named character")))
}

/// Parses a hex escape body (digits only, no `u`/`x`/`U` prefix) into a
/// `Char`, rejecting code points above `0x10FFFF` or ones that do not
/// name a Unicode scalar value (e.g. a bare surrogate).
pub fn make_hex_char(digits: &str) -> Result<SxChar> {
    let code = u32::from_str_radix(digits, 16)
        .map_err(|_| Error::Construction(format!("'{digits}' is not a valid hex char literal")))?;
    if code > 0x10FFFF {
        return Err(Error::Construction(format!(
            "char code point {code:#x} exceeds 0x10FFFF"
        )));
    }
    char::from_u32(code)
        .map(intern)
        .ok_or_else(|| Error::Construction(format!("{code:#x} is not a Unicode scalar value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_scalar_interns() {
        let a = make_char('a');
        let b = make_char('a');
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn named_char_is_case_insensitive() {
        let a = make_named_char("space").unwrap();
        let b = make_named_char("SPACE").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.value, ' ');
    }

    #[test]
    fn newline_and_linefeed_share_canonical_spelling() {
        let a = make_named_char("Newline").unwrap();
        let b = make_named_char("Linefeed").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn unknown_name_is_a_construction_error() {
        assert!(make_named_char("Bogus").is_err());
    }

    #[test]
    fn hex_escape_parses_and_bounds_checks() {
        let c = make_hex_char("41").unwrap();
        assert_eq!(c.value, 'A');
        assert!(make_hex_char("110000").is_err());
    }
}
