//! Complex numbers whose real and imaginary parts are each an exact
//! integer-or-rational, interned by canonical `(rnum, rden, inum, iden)`
//! key so that every live `RatComplex` with the same reduced parts is the
//! same object.
//!
//! A `RatComplex` with a zero imaginary part is not constructible: the
//! canonicalization invariant says that value *is* its real part, so the
//! constructor in this module returns [`ComplexResult::Real`] instead.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use num_bigint::BigInt;
use num_complex::Complex64;

use crate::intern::WeakInterner;
use crate::rational::ExactNumber;

/// Canonical `(rnum, rden, inum, iden)` key an interned `RatComplex` is
/// stored under.
type ComplexKey = (BigInt, BigInt, BigInt, BigInt);

/// A complex number with exact (integer-or-rational) real and imaginary
/// parts, guaranteed nonzero imaginary part.
#[derive(Debug)]
pub struct RatComplexInner {
    pub real: ExactNumber,
    pub imag: ExactNumber,
}

pub type RatComplex = Rc<RatComplexInner>;

impl PartialEq for RatComplexInner {
    fn eq(&self, other: &Self) -> bool {
        // Interning makes this equivalent to pointer equality for two
        // live instances, but derive structural equality too so that a
        // freshly-constructed (not-yet-interned) value still compares
        // sensibly in tests.
        self.real == other.real && self.imag == other.imag
    }
}
impl Eq for RatComplexInner {}

impl Hash for RatComplexInner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.real.numer().hash(state);
        self.real.denom().hash(state);
        self.imag.numer().hash(state);
        self.imag.denom().hash(state);
    }
}

impl std::fmt::Display for RatComplexInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#C({} {})", self.real, self.imag)
    }
}

thread_local! {
    static COMPLEX_TABLE: WeakInterner<ComplexKey, RatComplexInner> = WeakInterner::new();
}

/// The outcome of constructing a complex value: either it canonicalizes
/// down to a real (imag = 0) or it is a genuine interned `RatComplex`.
#[derive(Debug, Clone)]
pub enum ComplexResult {
    Real(ExactNumber),
    Complex(RatComplex),
}

/// Builds the canonical complex value for `(real, imag)`, interning it
/// when the imaginary part is nonzero.
pub fn make_complex(real: ExactNumber, imag: ExactNumber) -> ComplexResult {
    if imag.is_zero() {
        return ComplexResult::Real(real);
    }
    let key = (real.numer(), real.denom(), imag.numer(), imag.denom());
    let rc = COMPLEX_TABLE.with(|t| {
        t.intern(key, || RatComplexInner { real: real.clone(), imag: imag.clone() })
    });
    ComplexResult::Complex(rc)
}

/// Gaussian addition: `(a+bi) + (c+di) = (a+c) + (b+d)i`.
pub fn add(a: &RatComplexInner, b: &RatComplexInner) -> ComplexResult {
    make_complex(a.real.add(&b.real), a.imag.add(&b.imag))
}

pub fn sub(a: &RatComplexInner, b: &RatComplexInner) -> ComplexResult {
    make_complex(a.real.sub(&b.real), a.imag.sub(&b.imag))
}

/// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`.
pub fn mul(a: &RatComplexInner, b: &RatComplexInner) -> ComplexResult {
    let real = a.real.mul(&b.real).sub(&a.imag.mul(&b.imag));
    let imag = a.real.mul(&b.imag).add(&a.imag.mul(&b.real));
    make_complex(real, imag)
}

/// `(a+bi)/(c+di) = ((ac+bd) + (bc-ad)i) / (c^2+d^2)`.
pub fn div(a: &RatComplexInner, b: &RatComplexInner) -> ComplexResult {
    let denom = b.real.mul(&b.real).add(&b.imag.mul(&b.imag));
    let real_numer = a.real.mul(&b.real).add(&a.imag.mul(&b.imag));
    let imag_numer = a.imag.mul(&b.real).sub(&a.real.mul(&b.imag));
    make_complex(real_numer.div(&denom), imag_numer.div(&denom))
}

/// Divides a complex value by an exact real, preserving exactness.
pub fn div_real(a: &RatComplexInner, r: &ExactNumber) -> ComplexResult {
    make_complex(a.real.div(r), a.imag.div(r))
}

pub fn neg(a: &RatComplexInner) -> ComplexResult {
    make_complex(a.real.neg(), a.imag.neg())
}

pub fn conjugate(a: &RatComplexInner) -> ComplexResult {
    make_complex(a.real.clone(), a.imag.neg())
}

/// Absolute value. Exact when one part is zero (the magnitude is then
/// just the other part's absolute value); a host float otherwise, since
/// the general case is irrational.
pub fn abs(a: &RatComplexInner) -> f64 {
    (a.real.to_f64().powi(2) + a.imag.to_f64().powi(2)).sqrt()
}

pub fn to_complex64(a: &RatComplexInner) -> Complex64 {
    Complex64::new(a.real.to_f64(), a.imag.to_f64())
}

/// Complex power, promoted to host floating complex: the numerical tower
/// does not attempt to keep exactness under exponentiation.
pub fn pow(a: &RatComplexInner, exp: Complex64) -> Complex64 {
    to_complex64(a).powc(exp)
}

/// Combines two exact reals into a complex value using the Gaussian
/// re-composition rule for "complex built from complex" construction:
/// `Complex(a+bi, c+di) = (a-d) + (b+c)i`.
pub fn compose(re: &ComplexResult, im: &ComplexResult) -> ComplexResult {
    let (a, b) = parts(re);
    let (c, d) = parts(im);
    make_complex(a.sub(&d), b.add(&c))
}

fn parts(v: &ComplexResult) -> (ExactNumber, ExactNumber) {
    match v {
        ComplexResult::Real(r) => (r.clone(), ExactNumber::Int(BigInt::from(0))),
        ComplexResult::Complex(c) => (c.real.clone(), c.imag.clone()),
    }
}
