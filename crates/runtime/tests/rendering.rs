//! Cross-runtime scenarios
//!
//! Every runtime for the language must produce this exact text and these
//! exact enumeration orders, so the expected strings are fixed literals.

use dafny_runtime::{
    Array, Int, Map, MultiSet, Real, Seq, Set, Tuple, Value, catch_halt_to, string,
};

fn v(n: i64) -> Value {
    Value::Int(Int::from(n))
}

fn frac(n: i64, d: i64) -> String {
    string(&Value::Real(Real::of_frac(&Int::from(n), &Int::from(d))))
}

#[test]
fn test_decimal_rendering() {
    assert_eq!(frac(1, 4), "0.25");
    assert_eq!(frac(1, 3), "(1.0 / 3.0)");
    assert_eq!(frac(0, 1), "0.0");
    assert_eq!(frac(-1, 8), "-0.125");
    assert_eq!(frac(5, 1), "5.0");
    assert_eq!(frac(-7, 2), "-3.5");
    assert_eq!(frac(2, 6), "(1.0 / 3.0)");
}

#[test]
fn test_all_subsets_order() {
    let rendered: Vec<String> = Set::of([v(1), v(2)])
        .all_subsets()
        .map(|s| string(&Value::Set(s)))
        .collect();
    assert_eq!(rendered, vec!["{}", "{2}", "{1}", "{1, 2}"]);
}

#[test]
fn test_array_update_touches_one_cell() {
    let a = Array::with_value(&[Int::two(), Int::from(3)], v(4));
    a.set(&[Int::zero(), Int::one()], v(9));
    assert_eq!(string(&Value::Array(a)), "[[4, 9, 4], [4, 4, 4]]");
}

#[test]
fn test_rotate_scenario() {
    let one = Int::one();
    assert_eq!(one.rotate_left(&Int::one(), 4), Int::two());
    assert_eq!(one.rotate_right(&Int::one(), 4), Int::from(8));
    assert_eq!(dafny_core::native::lrot_u8(0b0001, &Int::one(), 4), 0b0010);
    assert_eq!(dafny_core::native::rrot_u8(0b0001, &Int::one(), 4), 0b1000);
}

#[test]
fn test_nested_collections() {
    let inner = Value::Seq(Seq::of_string("ab"));
    let value = Value::Map(Map::of([
        (v(1), Value::Set(Set::of([inner.clone()]))),
        (
            v(2),
            Value::Tuple(Tuple::of([
                Value::MultiSet(MultiSet::of([v(3), v(3)])),
                inner,
            ])),
        ),
    ]));
    assert_eq!(
        string(&value),
        "map[1 := {ab}, 2 := (multiset{3, 3}, ab)]"
    );
}

#[test]
fn test_halt_message() {
    let mut out = Vec::new();
    let result = catch_halt_to(&mut out, || {
        let s = Seq::of([v(1), v(2), v(3)]);
        s.subseq(&Int::two(), &Int::one())
    });
    assert!(result.is_none());
    let text = String::from_utf8_lossy(&out);
    assert!(text.starts_with("[Program halted] index out of range"), "{}", text);
}
