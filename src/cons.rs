//! `Cons`: the mutable ordered-pair building block of lists.
//!
//! A `Cons` is `Rc<RefCell<ConsCell>>` — shared, mutable, and (because
//! `cdr` may be reassigned to an ancestor) potentially cyclic. Every
//! operation here either bounds its own walk (indexing counts down a
//! fixed number of steps regardless of cycles) or threads a visit set
//! (`length`, structural equality) so that a cycle terminates instead of
//! looping forever.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::traversal::{identity, PairedVisitSet, VisitSet};
use crate::value::Value;

pub struct ConsCell {
    pub car: Value,
    pub cdr: Value,
}

pub type Cons = Rc<RefCell<ConsCell>>;

/// Builds a new (unshared) `Cons(car, cdr)`.
pub fn mkcons(car: Value, cdr: Value) -> Cons {
    Rc::new(RefCell::new(ConsCell { car, cdr }))
}

/// Builds a proper list `(x0 x1 … xn)` from the given values.
pub fn mklist(values: Vec<Value>) -> Value {
    let mut acc = Value::Nil;
    for v in values.into_iter().rev() {
        acc = Value::Cons(mkcons(v, acc));
    }
    acc
}

pub fn car(v: &Value) -> Value {
    match v {
        Value::Cons(c) => c.borrow().car.clone(),
        _ => Value::Nil,
    }
}

pub fn cdr(v: &Value) -> Value {
    match v {
        Value::Cons(c) => c.borrow().cdr.clone(),
        _ => Value::Nil,
    }
}

/// Cycle-safe length: the count of distinct `Cons` cells visited before
/// hitting `Nil`, a non-`Cons` dotted tail, or a cell seen before.
pub fn length(cons: &Cons) -> usize {
    let mut seen = VisitSet::new();
    let mut cur = Value::Cons(Rc::clone(cons));
    let mut count = 0usize;
    loop {
        match cur {
            Value::Cons(c) => {
                let id = identity(&c);
                if !seen.insert(id) {
                    break;
                }
                count += 1;
                cur = c.borrow().cdr.clone();
            }
            _ => break,
        }
    }
    count
}

/// Reads the value at `index` by walking `cdr` that many times. Raises
/// an index error if a non-`Cons` atom is reached before `index` steps
/// are consumed; otherwise returns the car of the cell reached, or (for
/// a dotted tail) the terminal atom itself when `index` lands exactly on
/// it.
pub fn get(cons: &Cons, index: usize) -> Result<Value> {
    let mut cur = Value::Cons(Rc::clone(cons));
    let mut remaining = index;
    while remaining > 0 {
        match cur {
            Value::Cons(c) => {
                cur = c.borrow().cdr.clone();
                remaining -= 1;
            }
            _ => return Err(Error::Index(format!("index {index} out of range"))),
        }
    }
    match cur {
        Value::Cons(c) => Ok(c.borrow().car.clone()),
        terminal => Ok(terminal),
    }
}

/// Writes `new_value` at `index`. Walking past the last `Cons` sets the
/// preceding cell's `cdr` (extending or replacing a dotted tail);
/// otherwise sets the target cell's `car`.
pub fn set(cons: &Cons, index: usize, new_value: Value) -> Result<()> {
    let mut cur = Value::Cons(Rc::clone(cons));
    let mut prev: Option<Cons> = None;
    let mut remaining = index;
    while remaining > 0 {
        match cur {
            Value::Cons(c) => {
                cur = c.borrow().cdr.clone();
                prev = Some(c);
                remaining -= 1;
            }
            _ => return Err(Error::Index(format!("index {index} out of range"))),
        }
    }
    match cur {
        Value::Cons(c) => {
            c.borrow_mut().car = new_value;
            Ok(())
        }
        _ => match prev {
            Some(p) => {
                p.borrow_mut().cdr = new_value;
                Ok(())
            }
            None => Err(Error::Index(format!("index {index} out of range"))),
        },
    }
}

/// Structural equality via a visit set paired across both graphs: a
/// repeated pair of cell identities is treated as an equal cycle rather
/// than re-walked.
pub fn structural_eq(a: &Cons, b: &Cons) -> bool {
    let mut seen = PairedVisitSet::new();
    eq_value(&Value::Cons(Rc::clone(a)), &Value::Cons(Rc::clone(b)), &mut seen)
}

fn eq_value(a: &Value, b: &Value, seen: &mut PairedVisitSet) -> bool {
    match (a, b) {
        (Value::Cons(ca), Value::Cons(cb)) => {
            let key = (identity(ca), identity(cb));
            if !seen.insert(key) {
                return true;
            }
            let (car_a, cdr_a) = {
                let cell = ca.borrow();
                (cell.car.clone(), cell.cdr.clone())
            };
            let (car_b, cdr_b) = {
                let cell = cb.borrow();
                (cell.car.clone(), cell.cdr.clone())
            };
            eq_value(&car_a, &car_b, seen) && eq_value(&cdr_a, &cdr_b, seen)
        }
        _ => a == b,
    }
}

/// Collects a proper or dotted list into (elements, terminal atom); the
/// terminal atom is `Value::Nil` for a proper list. Stops at the first
/// revisited cell so a cycle yields a finite prefix.
pub fn to_vec(value: &Value) -> (Vec<Value>, Value) {
    let mut seen = VisitSet::new();
    let mut elements = Vec::new();
    let mut cur = value.clone();
    loop {
        match cur {
            Value::Cons(c) => {
                let id = identity(&c);
                if !seen.insert(id) {
                    return (elements, Value::Nil);
                }
                let cell = c.borrow();
                elements.push(cell.car.clone());
                cur = cell.cdr.clone();
            }
            other => return (elements, other),
        }
    }
}
