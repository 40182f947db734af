//! Exact rational arithmetic, normalized so that an integral result is
//! always lowered to a plain integer at the API boundary.
//!
//! `num_rational::BigRational` already keeps numerator/denominator in
//! lowest terms with a positive denominator; what it does not do is tell
//! callers when a ratio has become whole. [`ExactNumber`] is the small
//! enum that closes that gap: every arithmetic helper in this crate that
//! might produce a rational result returns one, and [`reduce`] is the
//! single place that decides Int vs Rational.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Either side of the canonical-numeric-form boundary: a plain integer, or
/// a rational that is genuinely non-integral (denominator > 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactNumber {
    Int(BigInt),
    Rational(BigRational),
}

impl ExactNumber {
    pub fn numer(&self) -> BigInt {
        match self {
            ExactNumber::Int(n) => n.clone(),
            ExactNumber::Rational(r) => r.numer().clone(),
        }
    }

    pub fn denom(&self) -> BigInt {
        match self {
            ExactNumber::Int(_) => BigInt::one(),
            ExactNumber::Rational(r) => r.denom().clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            ExactNumber::Int(n) => n.is_zero(),
            ExactNumber::Rational(r) => r.is_zero(),
        }
    }

    pub fn to_rational(&self) -> BigRational {
        match self {
            ExactNumber::Int(n) => BigRational::from_integer(n.clone()),
            ExactNumber::Rational(r) => r.clone(),
        }
    }

    pub fn neg(&self) -> ExactNumber {
        match self {
            ExactNumber::Int(n) => ExactNumber::Int(-n),
            ExactNumber::Rational(r) => reduce(-r.clone()),
        }
    }

    pub fn add(&self, other: &ExactNumber) -> ExactNumber {
        reduce(self.to_rational() + other.to_rational())
    }

    pub fn sub(&self, other: &ExactNumber) -> ExactNumber {
        reduce(self.to_rational() - other.to_rational())
    }

    pub fn mul(&self, other: &ExactNumber) -> ExactNumber {
        reduce(self.to_rational() * other.to_rational())
    }

    pub fn div(&self, other: &ExactNumber) -> ExactNumber {
        reduce(self.to_rational() / other.to_rational())
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            ExactNumber::Int(n) => bigint_to_f64(n),
            ExactNumber::Rational(r) => {
                bigint_to_f64(r.numer()) / bigint_to_f64(r.denom())
            }
        }
    }
}

impl std::fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExactNumber::Int(n) => write!(f, "{n}"),
            ExactNumber::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
        }
    }
}

fn bigint_to_f64(n: &BigInt) -> f64 {
    use num_traits::ToPrimitive;
    n.to_f64().unwrap_or(f64::NAN)
}

/// Lowers `r` to [`ExactNumber::Int`] when its denominator is 1 (the
/// canonical numeric form invariant), keeping it as a reduced
/// [`ExactNumber::Rational`] otherwise.
pub fn reduce(r: BigRational) -> ExactNumber {
    if r.denom().is_one() {
        ExactNumber::Int(r.numer().clone())
    } else {
        ExactNumber::Rational(r)
    }
}

/// Builds a normalized rational from an integer numerator/denominator
/// pair, rejecting a zero denominator.
pub fn make_rational(numer: BigInt, denom: BigInt) -> Result<ExactNumber> {
    if denom.is_zero() {
        return Err(Error::Construction("rational denominator must not be zero".into()));
    }
    Ok(reduce(BigRational::new(numer, denom)))
}
