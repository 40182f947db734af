//! The central `Value` tagged union every other component operates on.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::array::ArrayRef;
use crate::char::SxChar;
use crate::complex::RatComplex;
use crate::cons::Cons;
use crate::rational::ExactNumber;
use crate::symbol::Symbol;
use crate::sxstring::SxString;

/// An S-expression value.
///
/// `Rational` is only ever constructed with a denominator greater than 1
/// (the canonical-numeric-form invariant lowers anything else to `Int`);
/// `Complex` is only ever constructed with a nonzero imaginary part (the
/// same invariant lowers anything else to its real part, which itself
/// obeys the `Int`-vs-`Rational` rule). See [`crate::rational::reduce`]
/// and [`crate::complex::make_complex`].
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Cons(Cons),
    Int(BigInt),
    Float(f64),
    Rational(BigRational),
    Complex(RatComplex),
    Symbol(Symbol),
    String(SxString),
    Char(SxChar),
    Array(ArrayRef),
}

impl Value {
    pub fn int(n: impl Into<BigInt>) -> Value {
        Value::Int(n.into())
    }

    /// Lifts an [`ExactNumber`] to its canonical `Value` form.
    pub fn from_exact(n: ExactNumber) -> Value {
        match n {
            ExactNumber::Int(i) => Value::Int(i),
            ExactNumber::Rational(r) => Value::Rational(r),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_cons(&self) -> bool {
        matches!(self, Value::Cons(_))
    }

    /// True for anything that isn't a `Cons` (`Nil` included — an atom,
    /// per the glossary, is "any non-Cons value").
    pub fn is_atom(&self) -> bool {
        !self.is_cons()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::Nil | Value::Cons(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Cons(a), Value::Cons(b)) => crate::cons::structural_eq(a, b),
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Rational(a), Value::Rational(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => std::rc::Rc::ptr_eq(a, b) || a == b,
            (Value::Symbol(a), Value::Symbol(b)) => std::rc::Rc::ptr_eq(a, b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => std::rc::Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => crate::array::structural_eq(a, b),
            // Canonical numeric form: a Rational with denom 1 never
            // exists as a Value, so no Int/Rational cross-arm is needed;
            // likewise Complex with imag 0 never exists as a Value.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_equals_nil() {
        assert_eq!(Value::Nil, Value::Nil);
    }

    #[test]
    fn is_atom_true_for_nil() {
        assert!(Value::Nil.is_atom());
    }

    #[test]
    fn different_variants_are_unequal() {
        assert_ne!(Value::Int(BigInt::from(1)), Value::Float(1.0));
    }
}
