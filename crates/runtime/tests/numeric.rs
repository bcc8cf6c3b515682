//! Numeric round trips: rendering a number and parsing the text back
//! yields the same number.

use dafny_runtime::{Int, Real, Value, int_of_any};
use num_bigint::BigInt;
use proptest::prelude::*;

fn big_int() -> impl Strategy<Value = Int> {
    prop_oneof![
        any::<i64>().prop_map(Int::from),
        prop::collection::vec(any::<u32>(), 1..6).prop_map(|digits| {
            Int::from_big(BigInt::from_slice(num_bigint::Sign::Minus, &digits))
        }),
        prop::collection::vec(any::<u32>(), 1..6)
            .prop_map(|digits| Int::from_big(BigInt::from_slice(num_bigint::Sign::Plus, &digits))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_int_roundtrip(n in big_int()) {
        prop_assert_eq!(Int::parse(&n.to_string()).unwrap(), n);
    }

    #[test]
    fn prop_real_roundtrip(num in big_int(), den in any::<i64>().prop_filter("nonzero", |d| *d != 0)) {
        let r = Real::of_frac(&num, &Int::from(den));
        prop_assert_eq!(Real::parse(&r.to_string()).unwrap(), r);
    }

    #[test]
    fn prop_int_of_string_value(n in any::<i64>()) {
        let text = Value::from(n.to_string().as_str());
        prop_assert_eq!(int_of_any(&text), Int::from(n));
    }
}

#[test]
fn test_edge_values_roundtrip() {
    for n in [Int::zero(), Int::negative_one(), Int::from(i64::MIN), Int::from(u64::MAX)] {
        assert_eq!(Int::parse(&n.to_string()).unwrap(), n);
    }
    for (n, d) in [(0, 1), (1, 3), (-1, 8), (22, 7), (-5, 1)] {
        let r = Real::of_frac(&Int::from(n), &Int::from(d));
        assert_eq!(Real::parse(&r.to_string()).unwrap(), r);
    }
}
