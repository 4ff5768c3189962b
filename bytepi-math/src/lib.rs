//! # bytepi-math
//!
//! Arbitrary-precision unsigned arithmetic in radix 256 for the mini-bytepi
//! Chudnovsky engine.
//!
//! Values are [`BigUint`]s over caller-owned byte storage. Operations never
//! allocate: multi-step algorithms borrow a scratch slice whose size comes
//! from the matching `*_scratch_len` function, and every precondition
//! (capacity, zero divisor, operand order) is checked before a digit is
//! written.
//!
//! - [`add`], [`sub`], [`sub_assign`], [`mul_small`], [`mul_by_ten`], [`decrement`]
//! - shifts by whole digits and by 1..=7 bits
//! - [`mul`]: schoolbook below [`KARATSUBA_THRESHOLD_MUL`] digits, Karatsuba above
//! - [`div`] / [`div_rem`]: Knuth division, recursive above [`KARATSUBA_THRESHOLD_DIV`]
//! - [`sqrt`] / [`sqrt_rem`]: Newton on words, recursive square root above

pub mod arith;
pub mod digits;
pub mod div;
pub mod error;
pub mod mul;
pub mod shift;
pub mod sqrt;

pub use arith::{add, cmp, decrement, mul_by_ten, mul_small, sub, sub_assign};
pub use digits::{BigUint, DigitStorage};
pub use div::{div, div_rem, div_schoolbook, div_scratch_len, KARATSUBA_THRESHOLD_DIV};
pub use error::BnError;
pub use mul::{
    mul, mul_karatsuba, mul_karatsuba_scratch_len, mul_schoolbook, mul_scratch_len,
    KARATSUBA_THRESHOLD_MUL,
};
pub use shift::{
    shift_left_1bit, shift_left_bits, shift_left_bits_in_place, shift_left_words,
    shift_right_bits, shift_right_bits_in_place,
};
pub use sqrt::{sqrt, sqrt_rem, sqrt_scratch_len, NEWTON_SQRT_DIGITS};
