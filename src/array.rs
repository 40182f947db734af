//! `Array(dim, value)`: a declared-dimensionality array whose payload is
//! an ordinary list (`Nil` or `Cons`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::traversal::identity;
use crate::value::Value;

pub struct ArrayCell {
    pub dim: usize,
    pub value: Value,
}

pub type ArrayRef = Rc<RefCell<ArrayCell>>;

/// Builds an array of dimensionality `dim` over `payload`, which must be
/// `Nil` or a `Cons` chain (the host bridge is responsible for coercing
/// arbitrary host sequences into that shape before calling this).
pub fn make_array(dim: usize, payload: Value) -> Result<ArrayRef> {
    if dim == 0 {
        return Err(Error::Construction("Array dimensionality must be >= 1".into()));
    }
    if !payload.is_list() {
        return Err(Error::Type("Array value must be a list".into()));
    }
    Ok(Rc::new(RefCell::new(ArrayCell { dim, value: payload })))
}

pub fn dim(array: &ArrayRef) -> usize {
    array.borrow().dim
}

pub fn set_value(array: &ArrayRef, payload: Value) -> Result<()> {
    if !payload.is_list() {
        return Err(Error::Type("Array value must be a list".into()));
    }
    array.borrow_mut().value = payload;
    Ok(())
}

/// Structural equality: same dimensionality and structurally-equal
/// payload list. Payload equality already handles cycles via
/// [`crate::cons::structural_eq`]; this only adds the identity guard for
/// an array compared against itself.
pub fn structural_eq(a: &ArrayRef, b: &ArrayRef) -> bool {
    if identity(a) == identity(b) {
        return true;
    }
    let a = a.borrow();
    let b = b.borrow();
    a.dim == b.dim && a.value == b.value
}
