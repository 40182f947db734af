//! Conversion between `Value` and a generic native tree representation.
//!
//! `HostValue` stands in for "whatever native structure an embedder
//! wants" (a JSON-like tree here, since the library has no actual host
//! language to bridge to): sequences, atoms, and native floating
//! complex numbers. Shared sub-lists within one conversion are memoized
//! by `Cons`/`Array` identity so the output graph reuses the same
//! object where the input did; a genuine cycle is rejected as
//! unresolvable rather than silently truncated.

use std::collections::HashMap;
use std::rc::Rc;

use num_complex::Complex64;

use crate::array::make_array;
use crate::complex::{make_complex, ComplexResult};
use crate::cons::mkcons;
use crate::error::{Error, Result};
use crate::rational::{reduce, ExactNumber};
use crate::symbol::make_symbol;
use crate::sxstring::SxString;
use crate::traversal::identity;
use crate::value::Value;

/// A generic native tree value, the target of `sx_to_host` and the
/// source of `host_to_sx`.
#[derive(Debug, Clone)]
pub enum HostValue {
    Sequence(Vec<HostValue>),
    Int(num_bigint::BigInt),
    Float(f64),
    Complex(Complex64),
    String(String),
    Bool(bool),
}

/// `sx-to-host`: converts `value` into a [`HostValue`] tree.
///
/// `native` controls whether `Char`/`Symbol`/`String` atoms are
/// unwrapped to their plain `value` (native text) or left distinguishable
/// — since `HostValue` has no separate symbol/char case, both modes
/// render them as `HostValue::String` here; the distinction only matters
/// for embedders with richer host types, so this crate's job is just to
/// guarantee the same memoization and cycle behavior either way.
pub fn sx_to_host(value: &Value, native: bool) -> Result<HostValue> {
    let mut memo: HashMap<usize, HostValue> = HashMap::new();
    let mut active: Vec<usize> = Vec::new();
    convert(value, native, &mut memo, &mut active)
}

fn convert(
    value: &Value,
    native: bool,
    memo: &mut HashMap<usize, HostValue>,
    active: &mut Vec<usize>,
) -> Result<HostValue> {
    match value {
        Value::Nil => Ok(HostValue::Sequence(Vec::new())),
        Value::Cons(c) => {
            let id = identity(c);
            if let Some(v) = memo.get(&id) {
                return Ok(v.clone());
            }
            if active.contains(&id) {
                log::debug!("host conversion found an unresolvable cycle at Cons identity {id}");
                return Err(Error::Recursion("unresolvable recursion converting to host form".into()));
            }
            active.push(id);
            let (elements, tail) = crate::cons::to_vec(value);
            let mut seq = Vec::with_capacity(elements.len() + 1);
            for e in &elements {
                seq.push(convert(e, native, memo, active)?);
            }
            if !tail.is_nil() {
                seq.push(convert(&tail, native, memo, active)?);
            }
            active.pop();
            let result = HostValue::Sequence(seq);
            memo.insert(id, result.clone());
            Ok(result)
        }
        Value::Array(a) => {
            let payload = a.borrow().value.clone();
            convert(&payload, native, memo, active)
        }
        Value::Char(c) => Ok(HostValue::String(c.value.to_string())),
        Value::Symbol(s) => Ok(HostValue::String(s.value.clone())),
        Value::String(s) => Ok(HostValue::String(s.value().to_string())),
        Value::Int(n) => Ok(HostValue::Int(n.clone())),
        Value::Float(f) => Ok(HostValue::Float(*f)),
        Value::Rational(r) => match reduce(r.clone()) {
            ExactNumber::Int(i) => Ok(HostValue::Int(i)),
            ExactNumber::Rational(r) => Ok(HostValue::Float(
                crate::rational::ExactNumber::Rational(r).to_f64(),
            )),
        },
        Value::Complex(c) => Ok(HostValue::Complex(crate::complex::to_complex64(c))),
    }
}

/// `host-to-sx`: converts a [`HostValue`] tree into a `Value`.
///
/// `strings_as_symbols` controls whether `HostValue::String` becomes a
/// `Symbol` (the default, matching Lisp reader convention) or a
/// `String` value.
pub fn host_to_sx(tree: &HostValue, strings_as_symbols: bool, ignore_case: bool) -> Result<Value> {
    let mut memo: HashMap<*const HostValue, Value> = HashMap::new();
    convert_back(tree, strings_as_symbols, ignore_case, &mut memo)
}

fn convert_back(
    tree: &HostValue,
    strings_as_symbols: bool,
    ignore_case: bool,
    memo: &mut HashMap<*const HostValue, Value>,
) -> Result<Value> {
    let key = tree as *const HostValue;
    if let Some(v) = memo.get(&key) {
        return Ok(v.clone());
    }
    let value = match tree {
        HostValue::Sequence(items) => {
            let mut acc = Value::Nil;
            for item in items.iter().rev() {
                let v = convert_back(item, strings_as_symbols, ignore_case, memo)?;
                acc = Value::Cons(mkcons(v, acc));
            }
            acc
        }
        HostValue::Int(n) => Value::Int(n.clone()),
        HostValue::Float(f) => Value::Float(*f),
        HostValue::Complex(c) => match make_complex(float_to_exact(c.re), float_to_exact(c.im)) {
            ComplexResult::Real(r) => Value::from_exact(r),
            ComplexResult::Complex(rc) => Value::Complex(rc),
        },
        HostValue::String(s) if strings_as_symbols => {
            Value::Symbol(make_symbol(s, ignore_case).map_err(|_| Error::Construction("empty symbol from host string".into()))?)
        }
        HostValue::String(s) => Value::String(SxString::new(s.clone())),
        HostValue::Bool(b) => Value::Symbol(
            make_symbol(if *b { "true" } else { "false" }, ignore_case)
                .expect("literal symbol text is never empty"),
        ),
    };
    memo.insert(key, value.clone());
    Ok(value)
}

fn float_to_exact(f: f64) -> ExactNumber {
    // Host floats entering the exact numeric tower are treated as their
    // nearest integer when they have no fractional part, matching the
    // canonical-numeric-form rule; a genuinely fractional float has no
    // exact representation here and is rounded to thousandths instead of
    // failing outright, since the host bridge must always produce a
    // value.
    if f.fract() == 0.0 {
        ExactNumber::Int(num_bigint::BigInt::from(f as i64))
    } else {
        let scaled = (f * 1000.0).round() as i64;
        reduce(num_rational::BigRational::new(num_bigint::BigInt::from(scaled), num_bigint::BigInt::from(1000)))
    }
}

pub fn make_array_from_host(dim: usize, host: &HostValue, strings_as_symbols: bool, ignore_case: bool) -> Result<Value> {
    let payload = host_to_sx(host, strings_as_symbols, ignore_case)?;
    make_array(dim, payload).map(Value::Array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cons::{mklist, to_vec};
    use num_bigint::BigInt;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    #[test]
    fn nil_converts_to_empty_sequence() {
        let host = sx_to_host(&Value::Nil, true).unwrap();
        assert!(matches!(host, HostValue::Sequence(v) if v.is_empty()));
    }

    #[test]
    fn list_round_trips_through_host() {
        let list = mklist(vec![int(1), int(2), int(3)]);
        let host = sx_to_host(&list, true).unwrap();
        let back = host_to_sx(&host, true, false).unwrap();
        let (elems, _) = to_vec(&back);
        assert_eq!(elems, vec![int(1), int(2), int(3)]);
    }

    #[test]
    fn cycle_is_rejected() {
        let c = crate::cons::mkcons(int(1), Value::Nil);
        c.borrow_mut().cdr = Value::Cons(Rc::clone(&c));
        let err = sx_to_host(&Value::Cons(c), true).unwrap_err();
        assert!(matches!(err, Error::Recursion(_)));
    }

    #[test]
    fn string_becomes_symbol_by_default() {
        let v = host_to_sx(&HostValue::String("foo".into()), true, false).unwrap();
        assert!(matches!(v, Value::Symbol(s) if s.value == "foo"));
    }

    #[test]
    fn string_stays_string_when_requested() {
        let v = host_to_sx(&HostValue::String("foo".into()), false, false).unwrap();
        assert!(matches!(v, Value::String(s) if s.value() == "foo"));
    }
}
