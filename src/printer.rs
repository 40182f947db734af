//! Textual rendering: `str` (read-back-safe) and a pretty-printer with
//! indentation. Both are dialect-aware (a dialect that doesn't recognize
//! a numeric syntax doesn't need to quote symbols that merely look like
//! it) and cycle-safe (a revisited `Cons` prints `...` instead of
//! recursing forever).

use std::fmt::Write as _;

use crate::array::ArrayRef;
use crate::char::SxChar;
use crate::cons::Cons;
use crate::dialect::DialectConfig;
use crate::symbol::Symbol;
use crate::sxstring::SxString;
use crate::traversal::{identity, VisitSet};
use crate::value::Value;

/// Renders `value` to its `str` form under `dialect`.
pub fn to_string(value: &Value, dialect: &DialectConfig) -> String {
    let mut out = String::new();
    let mut seen = VisitSet::new();
    write_value(&mut out, value, dialect, &mut seen);
    out
}

/// Pretty-prints `value` to `out`, indenting nested lists/arrays beyond
/// the outermost by `indent` spaces per level.
pub fn pretty_print(value: &Value, dialect: &DialectConfig, indent: usize) -> String {
    let mut out = String::new();
    let mut seen = VisitSet::new();
    write_pretty(&mut out, value, dialect, &mut seen, 0, indent);
    out
}

fn write_value(out: &mut String, value: &Value, dialect: &DialectConfig, seen: &mut VisitSet) {
    match value {
        Value::Nil => out.push_str("()"),
        Value::Cons(c) => write_cons(out, c, dialect, seen),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => write_float(out, *f),
        Value::Rational(r) => {
            let _ = write!(out, "{}/{}", r.numer(), r.denom());
        }
        Value::Complex(c) => {
            let _ = write!(out, "#C({} {})", c.real, c.imag);
        }
        Value::Symbol(s) => write_symbol(out, s, dialect),
        Value::String(s) => write_string(out, s, dialect),
        Value::Char(c) => write_char(out, c),
        Value::Array(a) => write_array(out, a, dialect, seen),
    }
}

fn write_cons(out: &mut String, cons: &Cons, dialect: &DialectConfig, seen: &mut VisitSet) {
    let id = identity(cons);
    if seen.contains(&id) {
        out.push_str("...");
        return;
    }
    if let Some((prefix, inner)) = quote_abbreviation(cons, dialect) {
        out.push_str(prefix);
        let mut local = seen.clone();
        local.insert(id);
        write_value(out, &inner, dialect, &mut local);
        return;
    }
    let mut local = seen.clone();
    local.insert(id);
    out.push('(');
    let mut first = true;
    let mut cur = Value::Cons(std::rc::Rc::clone(cons));
    loop {
        match cur {
            Value::Cons(c) => {
                let cid = identity(&c);
                if local.contains(&cid) && !first {
                    if !first {
                        out.push(' ');
                    }
                    out.push_str("...");
                    out.push(')');
                    return;
                }
                if !first {
                    out.push(' ');
                }
                first = false;
                let (car, cdr) = {
                    let cell = c.borrow();
                    (cell.car.clone(), cell.cdr.clone())
                };
                local.insert(cid);
                write_value(out, &car, dialect, &mut local);
                cur = cdr;
            }
            Value::Nil => {
                out.push(')');
                return;
            }
            other => {
                out.push_str(" . ");
                write_value(out, &other, dialect, &mut local);
                out.push(')');
                return;
            }
        }
    }
}

/// Recognizes `Cons(Symbol("quote"), Cons(x, Nil))` / `Cons(Symbol("function"), Cons(x, Nil))`
/// — the parser's expansion of `'x` / `#'x` — and returns the matching
/// reader-macro prefix and `x`, gated on the dialect option that makes
/// the prefix parse back to the same form.
fn quote_abbreviation(cons: &Cons, dialect: &DialectConfig) -> Option<(&'static str, Value)> {
    let (car, cdr) = {
        let cell = cons.borrow();
        (cell.car.clone(), cell.cdr.clone())
    };
    let Value::Symbol(s) = &car else { return None };
    let (prefix, enabled) = match s.value.as_str() {
        "quote" => ("'", dialect.enable_quote),
        "function" => ("#'", dialect.enable_func_ref),
        _ => return None,
    };
    if !enabled {
        return None;
    }
    let Value::Cons(rest) = &cdr else { return None };
    let (inner, tail) = {
        let rest_cell = rest.borrow();
        (rest_cell.car.clone(), rest_cell.cdr.clone())
    };
    tail.is_nil().then_some((prefix, inner))
}

fn write_array(out: &mut String, array: &ArrayRef, dialect: &DialectConfig, seen: &mut VisitSet) {
    let (dim, payload) = {
        let a = array.borrow();
        (a.dim, a.value.clone())
    };
    if dim == 1 {
        out.push('#');
    } else {
        let _ = write!(out, "#{dim}A");
    }
    write_value(out, &payload, dialect, seen);
}

/// Rust's default `f64` `Display` drops the decimal point for integral
/// values (`1.0` prints as `"1"`), which would parse back as an `Int`
/// rather than a `Float`. Append `.0` whenever that would otherwise
/// happen so `str`/`parse` round-trips preserve the Float/Int distinction.
fn write_float(out: &mut String, f: f64) {
    let mut rendered = String::new();
    let _ = write!(rendered, "{f}");
    if f.fract() == 0.0 && !rendered.contains(['.', 'e', 'E']) {
        rendered.push_str(".0");
    }
    out.push_str(&rendered);
}

fn write_char(out: &mut String, c: &SxChar) {
    let v = c.value;
    if let Some(name) = crate::char::char_name(v) {
        let _ = write!(out, "#\\{name}");
        return;
    }
    if v.is_ascii_graphic() || (v as u32 > 0x7F && !v.is_control()) {
        let _ = write!(out, "#\\{v}");
    } else if (v as u32) <= 0xFF {
        let _ = write!(out, "#\\x{:02x}", v as u32);
    } else {
        let _ = write!(out, "#\\U{:08x}", v as u32);
    }
}

fn write_string(out: &mut String, s: &SxString, dialect: &DialectConfig) {
    out.push('"');
    for c in s.value().chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' if dialect.enable_escape => out.push_str("\\\\"),
            '\\' => out.push('\\'),
            '\n' if dialect.enable_escape => out.push_str("\\n"),
            '\t' if dialect.enable_escape => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn write_symbol(out: &mut String, s: &Symbol, dialect: &DialectConfig) {
    let text = &s.value;
    if text == "." {
        out.push_str("\\.");
        return;
    }
    let needs_escaping = text
        .chars()
        .any(|c| matches!(c, '(' | ')' | '"' | '|') || c_needs_underscore(c) || c.is_control());
    let would_parse_as_number = looks_numeric(text, dialect);
    if !needs_escaping && !would_parse_as_number {
        out.push_str(text);
        return;
    }
    if would_parse_as_number && !needs_escaping {
        let _ = write!(out, "|{text}|");
        return;
    }
    out.push_str("|");
    for c in text.chars() {
        match c {
            ' ' => out.push('_'),
            '|' => out.push_str("\\|"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('|');
}

fn c_needs_underscore(c: char) -> bool {
    c == ' '
}

fn looks_numeric(text: &str, dialect: &DialectConfig) -> bool {
    if text.parse::<i64>().is_ok() || text.parse::<f64>().is_ok() {
        return true;
    }
    if dialect.enable_frac {
        if let Some((n, d)) = text.split_once('/') {
            if !n.is_empty() && !d.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) && d.bytes().all(|b| b.is_ascii_digit()) {
                return true;
            }
        }
    }
    if dialect.any_extended_numeric_syntax() && text.starts_with('#') {
        return true;
    }
    false
}

fn write_pretty(
    out: &mut String,
    value: &Value,
    dialect: &DialectConfig,
    seen: &mut VisitSet,
    depth: usize,
    indent: usize,
) {
    match value {
        Value::Cons(c) => write_cons_pretty(out, c, dialect, seen, depth, indent),
        Value::Array(a) => {
            let (dim, payload) = {
                let a = a.borrow();
                (a.dim, a.value.clone())
            };
            if dim == 1 {
                out.push('#');
            } else {
                let _ = write!(out, "#{dim}A");
            }
            write_pretty(out, &payload, dialect, seen, depth, indent);
        }
        other => write_value(out, other, dialect, seen),
    }
}

fn write_cons_pretty(
    out: &mut String,
    cons: &Cons,
    dialect: &DialectConfig,
    seen: &mut VisitSet,
    depth: usize,
    indent: usize,
) {
    let id = identity(cons);
    if seen.contains(&id) {
        out.push_str("...)");
        return;
    }
    let mut local = seen.clone();
    local.insert(id);
    out.push('(');
    let mut first = true;
    let mut cur = Value::Cons(std::rc::Rc::clone(cons));
    loop {
        match cur {
            Value::Cons(c) => {
                let cid = identity(&c);
                if local.contains(&cid) && !first {
                    out.push(' ');
                    out.push_str("...)");
                    return;
                }
                if !first {
                    out.push('\n');
                    out.push_str(&" ".repeat((depth + 1) * indent));
                } else {
                    first = false;
                }
                let (car, cdr) = {
                    let cell = c.borrow();
                    (cell.car.clone(), cell.cdr.clone())
                };
                local.insert(cid);
                write_pretty(out, &car, dialect, &mut local, depth + 1, indent);
                cur = cdr;
            }
            Value::Nil => {
                out.push(')');
                return;
            }
            other => {
                out.push_str(" . ");
                write_pretty(out, &other, dialect, &mut local, depth + 1, indent);
                out.push(')');
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cons::mkcons;
    use num_bigint::BigInt;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    #[test]
    fn nil_prints_empty_parens() {
        assert_eq!(to_string(&Value::Nil, &DialectConfig::default()), "()");
    }

    #[test]
    fn list_round_trips_textually() {
        let list = crate::cons::mklist(vec![int(1), int(2), int(3)]);
        assert_eq!(to_string(&list, &DialectConfig::default()), "(1 2 3)");
    }

    #[test]
    fn dotted_pair_prints_with_dot() {
        let c = mkcons(int(1), int(2));
        assert_eq!(to_string(&Value::Cons(c), &DialectConfig::default()), "(1 . 2)");
    }

    #[test]
    fn quote_form_abbreviates_when_enabled() {
        let dialect = DialectConfig::new().with_quote(true);
        let quote = crate::symbol::make_symbol("quote", false).unwrap();
        let foo = crate::symbol::make_symbol("foo", false).unwrap();
        let form = Value::Cons(mkcons(Value::Symbol(quote), Value::Cons(mkcons(Value::Symbol(foo), Value::Nil))));
        assert_eq!(to_string(&form, &dialect), "'foo");
    }

    #[test]
    fn quote_form_prints_plainly_when_disabled() {
        let dialect = DialectConfig::default();
        let quote = crate::symbol::make_symbol("quote", false).unwrap();
        let foo = crate::symbol::make_symbol("foo", false).unwrap();
        let form = Value::Cons(mkcons(Value::Symbol(quote), Value::Cons(mkcons(Value::Symbol(foo), Value::Nil))));
        assert_eq!(to_string(&form, &dialect), "(quote foo)");
    }

    #[test]
    fn function_form_abbreviates_when_enabled() {
        let dialect = DialectConfig::new().with_func_ref(true);
        let function = crate::symbol::make_symbol("function", false).unwrap();
        let foo = crate::symbol::make_symbol("foo", false).unwrap();
        let form = Value::Cons(mkcons(Value::Symbol(function), Value::Cons(mkcons(Value::Symbol(foo), Value::Nil))));
        assert_eq!(to_string(&form, &dialect), "#'foo");
    }

    #[test]
    fn integral_float_keeps_decimal_point() {
        assert_eq!(to_string(&Value::Float(1.0), &DialectConfig::default()), "1.0");
        assert_eq!(to_string(&Value::Float(2.5), &DialectConfig::default()), "2.5");
    }

    #[test]
    fn cyclic_cons_prints_ellipsis() {
        let c = mkcons(int(1), Value::Nil);
        c.borrow_mut().cdr = Value::Cons(std::rc::Rc::clone(&c));
        assert_eq!(to_string(&Value::Cons(c), &DialectConfig::default()), "(1 ...)");
    }

    #[test]
    fn number_shaped_symbol_is_quoted() {
        let dialect = DialectConfig::new().with_frac(true);
        let sym = crate::symbol::make_symbol("1/2", false).unwrap();
        assert_eq!(to_string(&Value::Symbol(sym), &dialect), "|1/2|");
    }

    #[test]
    fn dot_symbol_escapes() {
        let sym = crate::symbol::make_symbol(".", false).unwrap();
        assert_eq!(to_string(&Value::Symbol(sym), &DialectConfig::default()), "\\.");
    }
}
