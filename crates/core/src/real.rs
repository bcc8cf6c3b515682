//! Arbitrary-precision reals (exact rationals)
//!
//! A `Real` is a fully reduced numerator/denominator pair with a positive
//! denominator, so zero has the single representation `0/1`. Like `Int`,
//! there is an absent value (`Real::NIL`) that faults when used as a number.
//!
//! # Rendering
//!
//! The text form is shared with every other runtime of the language:
//!
//! - integral values print as `N.0`
//! - a denominator that divides a power of ten prints as a finite decimal
//!   (`1/4` is `0.25`, `-1/8` is `-0.125`)
//! - anything else prints as an explicit fraction, `(1.0 / 3.0)`

use crate::error::{Fault, fault};
use crate::int::Int;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// An immutable arbitrary-precision rational number
#[derive(Clone)]
pub struct Real {
    repr: Option<Arc<BigRational>>,
}

static ZERO: LazyLock<Real> = LazyLock::new(|| Real::boxed(BigRational::zero()));

impl Real {
    /// The absent real
    pub const NIL: Real = Real { repr: None };

    fn boxed(value: BigRational) -> Real {
        Real {
            repr: Some(Arc::new(value)),
        }
    }

    /// Wrap a rational, sharing the canonical zero
    pub fn from_ratio(value: BigRational) -> Real {
        if value.is_zero() {
            Real::zero()
        } else {
            Real::boxed(value)
        }
    }

    pub fn zero() -> Real {
        ZERO.clone()
    }

    /// `num / denom`, reduced
    pub fn of_frac(num: &Int, denom: &Int) -> Real {
        if denom.is_zero() {
            fault(Fault::DivisionByZero { operation: "real" });
        }
        Real::from_ratio(BigRational::new(num.as_big().clone(), denom.as_big().clone()))
    }

    /// The exact value of a finite float
    pub fn of_f64(value: f64) -> Real {
        match BigRational::from_float(value) {
            Some(r) => Real::from_ratio(r),
            None => fault(Fault::UnsupportedConversion {
                target: "real",
                found: value.to_string(),
            }),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.repr.is_none()
    }

    /// Borrow the underlying rational, faulting on the absent real
    pub fn as_ratio(&self) -> &BigRational {
        self.ratio("real")
    }

    fn ratio(&self, operation: &'static str) -> &BigRational {
        match &self.repr {
            Some(r) => r,
            None => fault(Fault::AbsentValue { operation }),
        }
    }

    /// Parse a real literal.
    ///
    /// Accepts a fraction `a/b` (each side an integer literal, the
    /// denominator unsigned and nonzero), a decimal with optional fraction
    /// digits and exponent (`-12.5e3`), or the parenthesised fraction this
    /// type renders (`(1.0 / 3.0)`).
    pub fn parse(text: &str) -> Result<Real, Fault> {
        let malformed = || Fault::ParseError {
            kind: "real",
            text: text.to_string(),
        };

        if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            let (num, den) = inner.split_once('/').ok_or_else(malformed)?;
            let num = parse_decimal(num.trim()).ok_or_else(malformed)?;
            let den = parse_decimal(den.trim()).ok_or_else(malformed)?;
            if den.is_zero() {
                return Err(malformed());
            }
            return Ok(Real::from_ratio(num / den));
        }

        if let Some((num, den)) = text.split_once('/') {
            if den.starts_with(['-', '+']) {
                return Err(malformed());
            }
            let num = Int::parse(num).map_err(|_| malformed())?;
            let den = Int::parse(den).map_err(|_| malformed())?;
            if den.is_zero() {
                return Err(malformed());
            }
            return Ok(Real::from_ratio(BigRational::new(
                num.as_big().clone(),
                den.as_big().clone(),
            )));
        }

        parse_decimal(text).map(Real::from_ratio).ok_or_else(malformed)
    }

    /// Parse generated literal text, faulting if it is malformed
    pub fn of_string(text: &str) -> Real {
        match Real::parse(text) {
            Ok(r) => r,
            Err(f) => fault(f),
        }
    }

    pub fn num(&self) -> Int {
        Int::from_big(self.ratio("num").numer().clone())
    }

    pub fn denom(&self) -> Int {
        Int::from_big(self.ratio("denom").denom().clone())
    }

    /// The greatest integer not above this value (floor, also for negatives)
    pub fn floor(&self) -> Int {
        let r = self.ratio("floor");
        Int::from_big(r.numer().div_floor(r.denom()))
    }

    pub fn plus(&self, other: &Real) -> Real {
        Real::from_ratio(self.ratio("plus") + other.ratio("plus"))
    }

    pub fn minus(&self, other: &Real) -> Real {
        Real::from_ratio(self.ratio("minus") - other.ratio("minus"))
    }

    pub fn times(&self, other: &Real) -> Real {
        Real::from_ratio(self.ratio("times") * other.ratio("times"))
    }

    pub fn div_by(&self, other: &Real) -> Real {
        let divisor = other.ratio("div");
        if divisor.is_zero() {
            fault(Fault::DivisionByZero { operation: "real div" });
        }
        Real::from_ratio(self.ratio("div") / divisor)
    }

    pub fn negated(&self) -> Real {
        Real::from_ratio(-self.ratio("negate"))
    }

    /// -1, 0 or 1
    pub fn sign(&self) -> i32 {
        let r = self.ratio("sign");
        if r.is_negative() {
            -1
        } else if r.is_zero() {
            0
        } else {
            1
        }
    }
}

/// Parse `[sign]digits[.digits][(e|E)[sign]digits]` exactly
fn parse_decimal(text: &str) -> Option<BigRational> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], body[at + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    let mut value = BigRational::from_integer(BigInt::parse_bytes(digits.as_bytes(), 10)?);
    let scale = exponent.checked_sub(i32::try_from(fraction.len()).ok()?)?;
    let ten = BigRational::from_integer(BigInt::from(10));
    if scale >= 0 {
        value *= num_traits::pow(ten, scale as usize);
    } else {
        value /= num_traits::pow(ten, scale.unsigned_abs() as usize);
    }
    Some(if negative { -value } else { value })
}

/// If `denom` divides a power of ten, return `(factor, k)` with
/// `denom * factor == 10^k`
fn decimal_shift(denom: &BigInt) -> Option<(BigInt, usize)> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let ten = BigInt::from(10);

    let mut d = denom.clone();
    let mut factor = BigInt::one();
    let mut shift = 0;
    while !d.is_one() {
        if d.is_multiple_of(&ten) {
            d /= &ten;
        } else if d.is_multiple_of(&two) {
            d /= &two;
            factor *= &five;
        } else if d.is_multiple_of(&five) {
            d /= &five;
            factor *= &two;
        } else {
            return None;
        }
        shift += 1;
    }
    Some((factor, shift))
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = match &self.repr {
            Some(r) => r,
            None => return write!(f, "null"),
        };
        let (num, denom) = (r.numer(), r.denom());
        if num.is_zero() || denom.is_one() {
            return write!(f, "{}.0", num);
        }

        match decimal_shift(denom) {
            Some((factor, shift)) => {
                let sign = if num.is_negative() { "-" } else { "" };
                let digits = (num.abs() * factor).to_string();
                if shift < digits.len() {
                    let (int_part, frac_part) = digits.split_at(digits.len() - shift);
                    write!(f, "{}{}.{}", sign, int_part, frac_part)
                } else {
                    let zeros = "0".repeat(shift - digits.len());
                    write!(f, "{}0.{}{}", sign, zeros, digits)
                }
            }
            None => write!(f, "({}.0 / {}.0)", num, denom),
        }
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Some(r) => write!(f, "Real({})", r),
            None => write!(f, "Real(nil)"),
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.as_deref().hash(state);
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio("compare").cmp(other.ratio("compare"))
    }
}

impl Default for Real {
    fn default() -> Self {
        Real::zero()
    }
}

impl FromStr for Real {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Real::parse(s)
    }
}

impl From<Int> for Real {
    fn from(n: Int) -> Self {
        Real::from_ratio(BigRational::from_integer(n.as_big().clone()))
    }
}

macro_rules! real_binop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<&Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                self.$inherent(rhs)
            }
        }

        impl $trait for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                (&self).$inherent(&rhs)
            }
        }
    };
}

real_binop!(Add, add, plus);
real_binop!(Sub, sub, minus);
real_binop!(Mul, mul, times);
real_binop!(Div, div, div_by);

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        self.negated()
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frac(n: i64, d: i64) -> Real {
        Real::of_frac(&Int::from(n), &Int::from(d))
    }

    #[test]
    fn test_rendering_scenarios() {
        assert_eq!(frac(1, 4).to_string(), "0.25");
        assert_eq!(frac(1, 3).to_string(), "(1.0 / 3.0)");
        assert_eq!(frac(0, 1).to_string(), "0.0");
        assert_eq!(frac(-1, 8).to_string(), "-0.125");
    }

    #[test]
    fn test_rendering_more_shapes() {
        assert_eq!(frac(6, 2).to_string(), "3.0");
        assert_eq!(frac(-7, 1).to_string(), "-7.0");
        assert_eq!(frac(5, 2).to_string(), "2.5");
        assert_eq!(frac(1, 20).to_string(), "0.05");
        assert_eq!(frac(1, 40).to_string(), "0.025");
        assert_eq!(frac(123, 100).to_string(), "1.23");
        assert_eq!(frac(1, 1000).to_string(), "0.001");
        assert_eq!(frac(-2, 6).to_string(), "(-1.0 / 3.0)");
        assert_eq!(frac(7, 12).to_string(), "(7.0 / 12.0)");
        assert_eq!(frac(0, -5).to_string(), "0.0");
    }

    #[test]
    fn test_floor_rounds_toward_negative_infinity() {
        assert_eq!(frac(7, 2).floor(), Int::from(3));
        assert_eq!(frac(-7, 2).floor(), Int::from(-4));
        assert_eq!(frac(-8, 2).floor(), Int::from(-4));
        assert_eq!(frac(-1, 3).floor(), Int::from(-1));
        assert_eq!(Real::zero().floor(), Int::from(0));
    }

    #[test]
    fn test_arithmetic_and_ordering() {
        assert_eq!(frac(1, 2) + frac(1, 3), frac(5, 6));
        assert_eq!(frac(1, 2) - frac(1, 3), frac(1, 6));
        assert_eq!(frac(2, 3) * frac(3, 4), frac(1, 2));
        assert_eq!(frac(1, 2) / frac(1, 4), frac(2, 1));
        assert!(frac(1, 3) < frac(1, 2));
        assert_eq!(frac(1, 3).min(frac(1, 2)), frac(1, 3));
        assert_eq!(frac(1, 3).max(frac(1, 2)), frac(1, 2));
        assert_eq!(frac(-3, 4).sign(), -1);
        assert_eq!((frac(1, 2) - frac(1, 2)).sign(), 0);
    }

    #[test]
    fn test_zero_is_canonical() {
        let z = frac(3, 4) - frac(6, 8);
        assert_eq!(z, Real::zero());
        assert_eq!(z.denom(), Int::one());
        assert_eq!(z.to_string(), "0.0");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Real::parse("1/3").unwrap(), frac(1, 3));
        assert_eq!(Real::parse("-2/4").unwrap(), frac(-1, 2));
        assert_eq!(Real::parse("0.25").unwrap(), frac(1, 4));
        assert_eq!(Real::parse("-0.125").unwrap(), frac(-1, 8));
        assert_eq!(Real::parse("1.5e2").unwrap(), frac(150, 1));
        assert_eq!(Real::parse("25e-2").unwrap(), frac(1, 4));
        assert_eq!(Real::parse("3").unwrap(), frac(3, 1));
        assert_eq!(Real::parse(".5").unwrap(), frac(1, 2));
        assert_eq!(Real::parse("(1.0 / 3.0)").unwrap(), frac(1, 3));
        assert_eq!(Real::parse("(-7.0 / 12.0)").unwrap(), frac(-7, 12));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", ".", "1/0", "1/-2", "abc", "1.2.3", "(1.0 / 0.0)", "1e", "--1"] {
            assert!(Real::parse(text).is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_parse_rejects_exponent_underflow() {
        assert!(Real::parse("1.5e-2147483648").is_err());
        assert!(Real::parse("-0.25e-2147483647").is_err());
    }

    #[test]
    #[should_panic(expected = "unable to parse string as real")]
    fn test_of_string_faults() {
        Real::of_string("one half");
    }

    #[test]
    fn test_of_f64_is_exact() {
        assert_eq!(Real::of_f64(0.5), frac(1, 2));
        assert_eq!(Real::of_f64(-2.25), frac(-9, 4));
        assert_eq!(Real::of_f64(0.0), Real::zero());
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_divide_by_zero_faults() {
        let _ = frac(1, 2) / Real::zero();
    }

    proptest! {
        #[test]
        fn prop_display_parse_round_trip(n in any::<i64>(), d in 1i64..100_000) {
            let r = frac(n, d);
            prop_assert_eq!(Real::parse(&r.to_string()).unwrap(), r);
        }

        #[test]
        fn prop_floor_brackets_value(n in any::<i32>(), d in 1i32..1000) {
            let r = frac(n as i64, d as i64);
            let fl = Real::from(r.floor());
            prop_assert!(fl <= r);
            prop_assert!(r < fl + Real::from(Int::one()));
        }
    }
}
