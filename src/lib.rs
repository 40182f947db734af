//! S-expression value model, dialect-configurable tokenizer/parser, and
//! cycle-safe printer/host-bridge for Lisp-family text — source code,
//! EDIF netlists, KiCAD files.
//!
//! ```
//! use sxpr::{dialect::DialectConfig, parse, printer};
//!
//! let value = parse("(1 2 3)", DialectConfig::default()).unwrap().unwrap();
//! assert_eq!(printer::to_string(&value, &DialectConfig::default()), "(1 2 3)");
//! ```

pub mod array;
pub mod char;
pub mod complex;
pub mod cons;
pub mod dialect;
pub mod error;
pub mod host;
pub mod intern;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod printer;
pub mod rational;
pub mod streamer;
pub mod symbol;
pub mod sxstring;
pub mod token;
pub mod traversal;
pub mod value;

use std::rc::Rc;

pub use array::{make_array, ArrayRef};
pub use char::SxChar;
pub use complex::{ComplexResult, RatComplex};
pub use cons::Cons;
pub use dialect::DialectConfig;
pub use error::{Error, Result};
pub use host::{host_to_sx, sx_to_host, HostValue};
pub use rational::ExactNumber;
pub use symbol::Symbol;
pub use sxstring::SxString;
pub use value::Value;

use streamer::{FileStreamer, StringStreamer};

/// Parses one complete S-expression from `text`. Returns `Ok(None)` at a
/// clean end of input (no tokens before EOF) and an error for malformed
/// or incomplete input.
pub fn parse(text: &str, dialect: DialectConfig) -> Result<Option<Value>> {
    let mut p = parser::Parser::new(StringStreamer::new(text), dialect);
    p.parse_one()
}

/// Iterates successive S-expressions out of a file, reading one
/// character at a time. The underlying file handle is released when the
/// reader is dropped.
pub struct FileReader {
    parser: parser::Parser<FileStreamer>,
}

impl FileReader {
    pub fn open(path: impl AsRef<std::path::Path>, dialect: DialectConfig) -> std::io::Result<Self> {
        Ok(FileReader { parser: parser::Parser::new(FileStreamer::open(path)?, dialect) })
    }
}

impl Iterator for FileReader {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        match self.parser.parse_one() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Renders `value` to its `str` form.
pub fn to_string(value: &Value, dialect: &DialectConfig) -> String {
    printer::to_string(value, dialect)
}

/// Pretty-prints `value`, indenting nested forms by `indent` spaces per
/// level beyond the outermost.
pub fn pretty_print(value: &Value, dialect: &DialectConfig, indent: usize) -> String {
    printer::pretty_print(value, dialect, indent)
}

// --- List helpers -----------------------------------------------------

pub fn car(v: &Value) -> Value {
    cons::car(v)
}

pub fn cdr(v: &Value) -> Value {
    cons::cdr(v)
}

pub fn mkcons(car: Value, cdr: Value) -> Value {
    Value::Cons(cons::mkcons(car, cdr))
}

pub fn mklist(values: Vec<Value>) -> Value {
    cons::mklist(values)
}

/// Cycle-safe length: 0 for `Nil`, otherwise the count of distinct `Cons`
/// cells visited before a dotted tail or a previously seen cell.
pub fn length(v: &Value) -> usize {
    match v {
        Value::Cons(c) => cons::length(c),
        _ => 0,
    }
}

/// Builds a new list with the same elements in reverse order. Raises a
/// type error if `v` is not a proper or dotted list.
pub fn mkreverse(v: &Value) -> Result<Value> {
    if !v.is_list() {
        return Err(Error::Type("mkreverse requires a list".into()));
    }
    let (mut elements, _tail) = cons::to_vec(v);
    elements.reverse();
    Ok(cons::mklist(elements))
}

/// Builds a new list that is the concatenation of `a` then `b`; `a` is
/// copied, `b` is shared as the tail.
pub fn mkappend(a: &Value, b: &Value) -> Result<Value> {
    if !a.is_list() {
        return Err(Error::Type("mkappend requires a list".into()));
    }
    let (elements, _tail) = cons::to_vec(a);
    let mut acc = b.clone();
    for e in elements.into_iter().rev() {
        acc = Value::Cons(cons::mkcons(e, acc));
    }
    Ok(acc)
}

/// Destructively appends `b` onto the end of `a` by mutating `a`'s final
/// `cdr`, and returns `a`. `nconc(a, a)` deliberately produces a
/// self-cycle rather than erroring — the source library does not guard
/// against it, and a caller who asks to splice a list onto itself gets
/// exactly the circular structure that implies.
pub fn nconc(a: &Value, b: Value) -> Result<Value> {
    let Value::Cons(last) = a else {
        return if a.is_nil() {
            Ok(b)
        } else {
            Err(Error::Type("nconc requires a list".into()))
        };
    };
    let mut seen = traversal::VisitSet::new();
    let mut cur = Rc::clone(last);
    loop {
        let id = traversal::identity(&cur);
        if !seen.insert(id) {
            break;
        }
        let next = cur.borrow().cdr.clone();
        match next {
            Value::Cons(next_cons) => cur = next_cons,
            _ => break,
        }
    }
    cur.borrow_mut().cdr = b;
    Ok(a.clone())
}

/// Returns the first sublist whose car equals `item`, or `Nil`.
pub fn member(item: &Value, list: &Value) -> Value {
    let mut seen = traversal::VisitSet::new();
    let mut cur = list.clone();
    loop {
        match cur {
            Value::Cons(c) => {
                let id = traversal::identity(&c);
                if !seen.insert(id) {
                    return Value::Nil;
                }
                if c.borrow().car == *item {
                    return Value::Cons(c);
                }
                cur = c.borrow().cdr.clone();
            }
            _ => return Value::Nil,
        }
    }
}

// --- Predicates ---------------------------------------------------------

pub fn consp(v: &Value) -> bool {
    v.is_cons()
}

pub fn null(v: &Value) -> bool {
    v.is_nil()
}

pub fn listp(v: &Value) -> bool {
    v.is_list()
}

pub fn symbolp(v: &Value) -> bool {
    matches!(v, Value::Symbol(_))
}

pub fn stringp(v: &Value) -> bool {
    matches!(v, Value::String(_))
}

pub fn characterp(v: &Value) -> bool {
    matches!(v, Value::Char(_))
}

pub fn integerp(v: &Value) -> bool {
    matches!(v, Value::Int(_))
}

pub fn floatp(v: &Value) -> bool {
    matches!(v, Value::Float(_))
}

pub fn rationalp(v: &Value) -> bool {
    matches!(v, Value::Rational(_))
}

pub fn complexp(v: &Value) -> bool {
    matches!(v, Value::Complex(_))
}

pub fn realp(v: &Value) -> bool {
    matches!(v, Value::Int(_) | Value::Float(_) | Value::Rational(_))
}

pub fn numberp(v: &Value) -> bool {
    realp(v) || complexp(v)
}

/// True for anything that isn't a `Cons` — `Nil` included.
pub fn atom(v: &Value) -> bool {
    v.is_atom()
}

pub fn arrayp(v: &Value) -> bool {
    matches!(v, Value::Array(_))
}

/// An array of declared dimensionality 1.
pub fn vectorp(v: &Value) -> bool {
    matches!(v, Value::Array(a) if a.borrow().dim == 1)
}
