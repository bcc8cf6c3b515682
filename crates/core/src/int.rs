//! Arbitrary-precision integers
//!
//! `Int` is an immutable big integer shared through an `Arc`, so cloning is
//! O(1). A distinguished absent value (`Int::NIL`) stands for an open range
//! bound; it is never the result of arithmetic and faults when used as a
//! number.
//!
//! # Division
//!
//! `/` and `%` are Euclidean: the remainder always lies in `[0, |y|)` and
//! `x == (x / y) * y + x % y`, whatever the signs of `x` and `y`.
//!
//! # Small values
//!
//! -1, 0, 1, 2, 5 and 10 come from a process-wide table built once, so the
//! values generated code produces most often share one allocation.
//! Equality is always by value; the shared allocation only makes it cheaper.

use crate::error::{Fault, fault};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// An immutable arbitrary-precision integer
#[derive(Clone)]
pub struct Int {
    repr: Option<Arc<BigInt>>,
}

/// Bitvectors are integers presumed non-negative
pub type BitVector = Int;

struct Constants {
    negative_one: Int,
    zero: Int,
    one: Int,
    two: Int,
    five: Int,
    ten: Int,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| Constants {
    negative_one: Int::boxed(BigInt::from(-1)),
    zero: Int::boxed(BigInt::zero()),
    one: Int::boxed(BigInt::one()),
    two: Int::boxed(BigInt::from(2)),
    five: Int::boxed(BigInt::from(5)),
    ten: Int::boxed(BigInt::from(10)),
});

impl Int {
    /// The absent integer (an open range bound)
    pub const NIL: Int = Int { repr: None };

    fn boxed(value: BigInt) -> Int {
        Int {
            repr: Some(Arc::new(value)),
        }
    }

    fn cached(n: i64) -> Option<Int> {
        let c = &*CONSTANTS;
        match n {
            -1 => Some(c.negative_one.clone()),
            0 => Some(c.zero.clone()),
            1 => Some(c.one.clone()),
            2 => Some(c.two.clone()),
            5 => Some(c.five.clone()),
            10 => Some(c.ten.clone()),
            _ => None,
        }
    }

    /// Wrap a `BigInt`, reusing a cached constant when one matches
    pub fn from_big(value: BigInt) -> Int {
        match value.to_i64().and_then(Int::cached) {
            Some(cached) => cached,
            None => Int::boxed(value),
        }
    }

    pub fn from_i64(n: i64) -> Int {
        Int::cached(n).unwrap_or_else(|| Int::boxed(BigInt::from(n)))
    }

    pub fn from_u64(n: u64) -> Int {
        match i64::try_from(n) {
            Ok(small) => Int::from_i64(small),
            Err(_) => Int::boxed(BigInt::from(n)),
        }
    }

    pub fn negative_one() -> Int {
        CONSTANTS.negative_one.clone()
    }

    pub fn zero() -> Int {
        CONSTANTS.zero.clone()
    }

    pub fn one() -> Int {
        CONSTANTS.one.clone()
    }

    pub fn two() -> Int {
        CONSTANTS.two.clone()
    }

    pub fn five() -> Int {
        CONSTANTS.five.clone()
    }

    pub fn ten() -> Int {
        CONSTANTS.ten.clone()
    }

    /// Is this the absent integer?
    pub fn is_nil(&self) -> bool {
        self.repr.is_none()
    }

    /// Borrow the underlying magnitude, faulting on the absent integer
    pub fn as_big(&self) -> &BigInt {
        self.big("int")
    }

    fn big(&self, operation: &'static str) -> &BigInt {
        match &self.repr {
            Some(b) => b,
            None => fault(Fault::AbsentValue { operation }),
        }
    }

    /// Parse an integer literal in any base a generic literal parser accepts:
    /// an optional sign, then `0x`/`0X` (hex), `0b`/`0B` (binary), `0o`/`0O`
    /// or a bare leading `0` (octal), or plain decimal digits. Underscores
    /// may separate digits (and a base prefix from the first digit).
    pub fn parse(text: &str) -> Result<Int, Fault> {
        let malformed = || Fault::ParseError {
            kind: "int",
            text: text.to_string(),
        };

        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (radix, digits, prefixed) = split_radix(body);
        if !valid_digit_run(digits, prefixed) {
            return Err(malformed());
        }

        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        let magnitude = BigInt::parse_bytes(cleaned.as_bytes(), radix).ok_or_else(malformed)?;
        Ok(Int::from_big(if negative { -magnitude } else { magnitude }))
    }

    /// Parse generated literal text, faulting if it is malformed
    pub fn of_string(text: &str) -> Int {
        match Int::parse(text) {
            Ok(n) => n,
            Err(f) => fault(f),
        }
    }

    // =========================================================================
    // Conversions back to native widths
    //
    // Out-of-range values keep only their low bits (two's complement), the
    // same as an `as` cast.
    // =========================================================================

    fn low_u64(&self) -> u64 {
        let low: BigInt = self.big("conversion") & &BigInt::from(u64::MAX);
        low.to_u64().unwrap_or(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.low_u64() as i64
    }

    pub fn as_i32(&self) -> i32 {
        self.low_u64() as i32
    }

    pub fn as_i16(&self) -> i16 {
        self.low_u64() as i16
    }

    pub fn as_i8(&self) -> i8 {
        self.low_u64() as i8
    }

    pub fn as_u64(&self) -> u64 {
        self.low_u64()
    }

    pub fn as_u32(&self) -> u32 {
        self.low_u64() as u32
    }

    pub fn as_u16(&self) -> u16 {
        self.low_u64() as u16
    }

    pub fn as_u8(&self) -> u8 {
        self.low_u64() as u8
    }

    pub fn as_isize(&self) -> isize {
        self.low_u64() as isize
    }

    pub fn as_usize(&self) -> usize {
        self.low_u64() as usize
    }

    /// Exact conversion to an index; `None` when negative, absent, or too big
    pub fn to_usize(&self) -> Option<usize> {
        self.repr.as_ref().and_then(|b| b.to_usize())
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    pub fn plus(&self, other: &Int) -> Int {
        Int::from_big(self.big("plus") + other.big("plus"))
    }

    pub fn minus(&self, other: &Int) -> Int {
        Int::from_big(self.big("minus") - other.big("minus"))
    }

    pub fn times(&self, other: &Int) -> Int {
        Int::from_big(self.big("times") * other.big("times"))
    }

    /// Euclidean quotient: `self == q * other + r` with `0 <= r < |other|`
    pub fn div_euclid(&self, other: &Int) -> Int {
        let (q, _) = euclid(self.big("div"), other.big("div"), "div");
        Int::from_big(q)
    }

    /// Euclidean remainder, always in `[0, |other|)`
    pub fn rem_euclid(&self, other: &Int) -> Int {
        let (_, r) = euclid(self.big("mod"), other.big("mod"), "mod");
        Int::from_big(r)
    }

    pub fn negated(&self) -> Int {
        Int::from_big(-self.big("negate"))
    }

    pub fn abs(&self) -> Int {
        Int::from_big(self.big("abs").abs())
    }

    /// -1, 0 or 1
    pub fn sign(&self) -> i32 {
        let b = self.big("sign");
        if b.is_negative() {
            -1
        } else if b.is_zero() {
            0
        } else {
            1
        }
    }

    pub fn is_zero(&self) -> bool {
        self.big("compare").is_zero()
    }

    // =========================================================================
    // Bitwise operations (two's complement on negative values)
    // =========================================================================

    pub fn bit_and(&self, other: &Int) -> Int {
        Int::from_big(self.big("and") & other.big("and"))
    }

    pub fn bit_or(&self, other: &Int) -> Int {
        Int::from_big(self.big("or") | other.big("or"))
    }

    pub fn bit_xor(&self, other: &Int) -> Int {
        Int::from_big(self.big("xor") ^ other.big("xor"))
    }

    pub fn bit_not(&self) -> Int {
        Int::from_big(!self.big("not"))
    }

    pub fn shift_left(&self, amount: &Int) -> Int {
        Int::from_big(self.big("shift") << shift_amount(amount))
    }

    /// Arithmetic right shift (rounds toward negative infinity)
    pub fn shift_right(&self, amount: &Int) -> Int {
        Int::from_big(self.big("shift") >> shift_amount(amount))
    }

    /// Rotate the low `width` bits left by `amount`:
    /// `((x << n) mod 2^w) | (x >> (w - n))`
    pub fn rotate_left(&self, amount: &Int, width: u32) -> BitVector {
        let x = self.big("rotate");
        let n = amount.as_u64();
        let w = u64::from(width);
        let modulus = BigInt::one() << w;
        let left = (x << n).mod_floor(&modulus);
        let right = match w.checked_sub(n) {
            Some(back) => x >> back,
            None => BigInt::zero(),
        };
        Int::from_big(left | right)
    }

    /// Rotate the low `width` bits right by `amount`:
    /// `((x << (w - n)) mod 2^w) | (x >> n)`
    pub fn rotate_right(&self, amount: &Int, width: u32) -> BitVector {
        let x = self.big("rotate");
        let n = amount.as_u64();
        let w = u64::from(width);
        let modulus = BigInt::one() << w;
        let left = match w.checked_sub(n) {
            Some(back) => (x << back).mod_floor(&modulus),
            None => BigInt::zero(),
        };
        Int::from_big(left | (x >> n))
    }
}

fn euclid(x: &BigInt, y: &BigInt, operation: &'static str) -> (BigInt, BigInt) {
    if y.is_zero() {
        fault(Fault::DivisionByZero { operation });
    }
    let r = x.mod_floor(&y.abs());
    let q = (x - &r) / y;
    (q, r)
}

fn shift_amount(amount: &Int) -> usize {
    match amount.to_usize() {
        Some(n) => n,
        None => fault(Fault::UnsupportedConversion {
            target: "shift amount",
            found: amount.to_string(),
        }),
    }
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let bytes = body.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &body[2..], true),
            b'b' | b'B' => return (2, &body[2..], true),
            b'o' | b'O' => return (8, &body[2..], true),
            _ => return (8, &body[1..], true),
        }
    }
    (10, body, false)
}

/// Digits with single underscores between them (one may also follow a prefix)
fn valid_digit_run(digits: &str, prefixed: bool) -> bool {
    if digits.is_empty() || digits.ends_with('_') || digits.contains("__") {
        return false;
    }
    if digits.starts_with('_') && !prefixed {
        return false;
    }
    digits.chars().any(|c| c != '_') && digits.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}

// =============================================================================
// Standard traits
// =============================================================================

impl PartialEq for Int {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Int {}

impl Hash for Int {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.as_deref().hash(state);
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        self.big("compare").cmp(other.big("compare"))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Some(b) => write!(f, "{}", b),
            None => write!(f, "null"),
        }
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Some(b) => write!(f, "Int({})", b),
            None => write!(f, "Int(nil)"),
        }
    }
}

impl Default for Int {
    fn default() -> Self {
        Int::zero()
    }
}

impl FromStr for Int {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Int::parse(s)
    }
}

impl From<BigInt> for Int {
    fn from(value: BigInt) -> Self {
        Int::from_big(value)
    }
}

macro_rules! int_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Int {
            fn from(n: $t) -> Self {
                Int::from_i64(n as i64)
            }
        }
    )*};
}

macro_rules! int_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Int {
            fn from(n: $t) -> Self {
                Int::from_u64(n as u64)
            }
        }
    )*};
}

int_from_signed!(i8, i16, i32, i64, isize);
int_from_unsigned!(u8, u16, u32, u64, usize);

macro_rules! int_binop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<&Int> for &Int {
            type Output = Int;

            fn $method(self, rhs: &Int) -> Int {
                self.$inherent(rhs)
            }
        }

        impl $trait for Int {
            type Output = Int;

            fn $method(self, rhs: Int) -> Int {
                (&self).$inherent(&rhs)
            }
        }
    };
}

int_binop!(Add, add, plus);
int_binop!(Sub, sub, minus);
int_binop!(Mul, mul, times);
int_binop!(Div, div, div_euclid);
int_binop!(Rem, rem, rem_euclid);
int_binop!(BitAnd, bitand, bit_and);
int_binop!(BitOr, bitor, bit_or);
int_binop!(BitXor, bitxor, bit_xor);

impl Neg for &Int {
    type Output = Int;

    fn neg(self) -> Int {
        self.negated()
    }
}

impl Neg for Int {
    type Output = Int;

    fn neg(self) -> Int {
        self.negated()
    }
}

impl Not for &Int {
    type Output = Int;

    fn not(self) -> Int {
        self.bit_not()
    }
}

impl Not for Int {
    type Output = Int;

    fn not(self) -> Int {
        self.bit_not()
    }
}
