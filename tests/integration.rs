use std::rc::Rc;

use num_bigint::BigInt;

use sxpr::{mklist, parse, pretty_print, to_string, DialectConfig, Value};

fn int(n: i64) -> Value {
    Value::Int(BigInt::from(n))
}

#[test]
fn simple_list_round_trips() {
    let dialect = DialectConfig::default();
    let v = parse("(1 2 3)", dialect).unwrap().unwrap();
    assert_eq!(v, mklist(vec![int(1), int(2), int(3)]));
    assert_eq!(to_string(&v, &dialect), "(1 2 3)");
}

#[test]
fn quoted_symbol_expands_and_round_trips() {
    let dialect = DialectConfig::new().with_quote(true);
    let v = parse("'foo", dialect).unwrap().unwrap();
    let (elems, tail) = sxpr::cons::to_vec(&v);
    assert_eq!(elems.len(), 2);
    assert!(matches!(&elems[0], Value::Symbol(s) if s.value == "quote"));
    assert!(matches!(&elems[1], Value::Symbol(s) if s.value == "foo"));
    assert!(tail.is_nil());
    assert_eq!(to_string(&v, &dialect), "'foo");
}

#[test]
fn complex_with_fraction_round_trips_and_canonicalizes() {
    let dialect = DialectConfig::new().with_complex(true).with_frac(true);
    let v = parse("#C(1/2 3)", dialect).unwrap().unwrap();
    assert_eq!(to_string(&v, &dialect), "#C(1/2 3)");

    let real = sxpr::rational::make_rational(BigInt::from(1), BigInt::from(2)).unwrap();
    let zero_imag = sxpr::complex::make_complex(real, sxpr::rational::ExactNumber::Int(BigInt::from(0)));
    match zero_imag {
        sxpr::ComplexResult::Real(sxpr::rational::ExactNumber::Rational(r)) => {
            assert_eq!(format!("{r}"), "1/2");
        }
        other => panic!("expected a bare rational real part, got {other:?}"),
    }
}

#[test]
fn hex_literals_parse_to_int_and_rational() {
    let dialect = DialectConfig::new().with_hex(true).with_frac(true);
    let int_v = parse("#xFE", dialect).unwrap().unwrap();
    assert_eq!(int_v, Value::Int(BigInt::from(254)));

    let rat_v = parse("#x1/2", dialect).unwrap().unwrap();
    match rat_v {
        Value::Rational(r) => assert_eq!(format!("{}/{}", r.numer(), r.denom()), "1/2"),
        other => panic!("expected Rational, got {other:?}"),
    }
}

#[test]
fn array_literal_round_trips_with_declared_dim() {
    let dialect = DialectConfig::new().with_array(true);
    let v = parse("#2A((1 2) (3 4))", dialect).unwrap().unwrap();
    match &v {
        Value::Array(a) => assert_eq!(a.borrow().dim, 2),
        other => panic!("expected Array, got {other:?}"),
    }
    assert_eq!(to_string(&v, &dialect), "#2A((1 2) (3 4))");
}

#[test]
fn dotted_pair_round_trips() {
    let dialect = DialectConfig::default();
    let v = parse("(a . b)", dialect).unwrap().unwrap();
    assert_eq!(to_string(&v, &dialect), "(a . b)");
}

#[test]
fn cyclic_cons_prints_ellipsis_and_has_length_one() {
    let c = sxpr::cons::mkcons(int(1), Value::Nil);
    c.borrow_mut().cdr = Value::Cons(Rc::clone(&c));
    let v = Value::Cons(c);
    assert_eq!(to_string(&v, &DialectConfig::default()), "(1 ...)");
    assert_eq!(sxpr::length(&v), 1);
}

#[test]
fn pretty_print_indents_each_element_by_depth() {
    let dialect = DialectConfig::default();
    let v = parse("(1 (2 3))", dialect).unwrap().unwrap();
    let pretty = pretty_print(&v, &dialect, 2);
    assert_eq!(pretty, "(1\n  (2\n    3))");
}

#[test]
fn host_bridge_round_trips_a_finite_nested_list() {
    let list = mklist(vec![int(1), mklist(vec![int(2), int(3)])]);
    let host = sxpr::sx_to_host(&list, true).unwrap();
    let back = sxpr::host_to_sx(&host, true, false).unwrap();
    assert_eq!(to_string(&back, &DialectConfig::default()), to_string(&list, &DialectConfig::default()));
}

#[test]
fn denominator_zero_is_a_construction_error() {
    let err = sxpr::rational::make_rational(BigInt::from(1), BigInt::from(0)).unwrap_err();
    assert!(matches!(err, sxpr::Error::Construction(_)));
}

#[test]
fn empty_symbol_is_a_construction_error() {
    let err = sxpr::symbol::make_symbol("", false).unwrap_err();
    assert!(matches!(err, sxpr::Error::Construction(_)));
}

#[test]
fn out_of_range_char_is_a_construction_error() {
    let err = sxpr::char::make_hex_char("110000").unwrap_err();
    assert!(matches!(err, sxpr::Error::Construction(_)));
}
