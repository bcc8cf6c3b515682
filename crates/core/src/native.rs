//! Fixed-width arithmetic with the language's semantics
//!
//! Generated code sometimes lowers `int` to a host-native width. Division
//! and modulo must still be Euclidean (the remainder is never negative), and
//! bitvector rotation must stay within the low `w` bits.

use crate::error::{Fault, fault};
use crate::int::Int;

macro_rules! euclid_ops {
    ($($ty:ty => $div:ident, $modulo:ident;)*) => {
        $(
            #[doc = concat!("Euclidean quotient of two `", stringify!($ty), "`s")]
            pub fn $div(x: $ty, y: $ty) -> $ty {
                if y == 0 {
                    fault(Fault::DivisionByZero { operation: stringify!($div) });
                }
                x.wrapping_div_euclid(y)
            }

            #[doc = concat!("Euclidean remainder of two `", stringify!($ty), "`s")]
            pub fn $modulo(x: $ty, y: $ty) -> $ty {
                if y == 0 {
                    fault(Fault::DivisionByZero { operation: stringify!($modulo) });
                }
                x.wrapping_rem_euclid(y)
            }
        )*
    };
}

euclid_ops! {
    i8 => div_i8, mod_i8;
    i16 => div_i16, mod_i16;
    i32 => div_i32, mod_i32;
    i64 => div_i64, mod_i64;
    isize => div_isize, mod_isize;
}

pub fn div_f32(x: f32, y: f32) -> f32 {
    x.div_euclid(y)
}

pub fn mod_f32(x: f32, y: f32) -> f32 {
    x.rem_euclid(y)
}

pub fn div_f64(x: f64, y: f64) -> f64 {
    x.div_euclid(y)
}

pub fn mod_f64(x: f64, y: f64) -> f64 {
    x.rem_euclid(y)
}

macro_rules! rotate_ops {
    ($($ty:ty => $lrot:ident, $rrot:ident;)*) => {
        $(
            #[doc = concat!("Rotate the low `w` bits of a `", stringify!($ty), "` left by `n`")]
            pub fn $lrot(x: $ty, n: &Int, w: u32) -> $ty {
                let n = n.as_u32();
                let mask = width_mask!($ty, w);
                (x.checked_shl(n).unwrap_or(0) & mask)
                    | w.checked_sub(n).and_then(|s| x.checked_shr(s)).unwrap_or(0)
            }

            #[doc = concat!("Rotate the low `w` bits of a `", stringify!($ty), "` right by `n`")]
            pub fn $rrot(x: $ty, n: &Int, w: u32) -> $ty {
                let n = n.as_u32();
                let mask = width_mask!($ty, w);
                let high = w
                    .checked_sub(n)
                    .and_then(|s| x.checked_shl(s))
                    .unwrap_or(0);
                (high & mask) | x.checked_shr(n).unwrap_or(0)
            }
        )*
    };
}

macro_rules! width_mask {
    ($ty:ty, $w:expr) => {
        if $w >= <$ty>::BITS {
            <$ty>::MAX
        } else {
            ((1 as $ty) << $w) - 1
        }
    };
}

rotate_ops! {
    u8 => lrot_u8, rrot_u8;
    u16 => lrot_u16, rrot_u16;
    u32 => lrot_u32, rrot_u32;
    u64 => lrot_u64, rrot_u64;
    usize => lrot_usize, rrot_usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_division_is_euclidean() {
        assert_eq!(div_i32(7, 2), 3);
        assert_eq!(mod_i32(7, 2), 1);
        assert_eq!(div_i32(-7, 2), -4);
        assert_eq!(mod_i32(-7, 2), 1);
        assert_eq!(div_i32(7, -2), -3);
        assert_eq!(mod_i32(7, -2), 1);
        assert_eq!(div_i32(-7, -2), 4);
        assert_eq!(mod_i32(-7, -2), 1);
        assert_eq!(div_i8(-128, 3), -43);
        assert_eq!(mod_i8(-128, 3), 1);
        assert_eq!(div_i64(i64::MIN, -1), i64::MIN);
        assert_eq!(mod_isize(-1, 5), 4);
        assert_eq!(mod_i16(-9, 4), 3);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_zero_divisor_faults() {
        div_i64(1, 0);
    }

    #[test]
    fn test_float_division_is_euclidean() {
        assert_eq!(div_f64(-7.0, 2.0), -4.0);
        assert_eq!(mod_f64(-7.0, 2.0), 1.0);
        assert_eq!(div_f32(7.0, -2.0), -3.0);
        assert_eq!(mod_f32(7.0, -2.0), 1.0);
    }

    #[test]
    fn test_rotation_within_width() {
        let one = Int::one();
        assert_eq!(lrot_u8(0b0001, &one, 4), 0b0010);
        assert_eq!(rrot_u8(0b0001, &one, 4), 0b1000);
        assert_eq!(lrot_u8(0b1000, &one, 4), 0b0001);
        assert_eq!(lrot_u32(0x8000_0001, &one, 32), 0x0000_0003);
        assert_eq!(rrot_u64(1, &one, 64), 1 << 63);
        assert_eq!(lrot_u16(0xABCD, &Int::zero(), 16), 0xABCD);
        assert_eq!(rrot_usize(0b101, &Int::from(3), 3), 0b101);
    }
}
