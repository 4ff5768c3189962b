//! Carry and borrow arithmetic: addition, subtraction, comparison and
//! single-digit scaling.
//!
//! The slice kernels at the top work on raw little-endian digit runs and are
//! shared by the multiplication, division and square root modules.

use std::cmp::Ordering;

use crate::digits::{cmp_digits, BigUint, DigitStorage};
use crate::error::{ensure_capacity, BnError};

/// `acc += term`, where `term` is no longer than `acc`. Returns the carry out
/// of the top digit of `acc`.
pub(crate) fn add_in_place(acc: &mut [u8], term: &[u8]) -> u8 {
    debug_assert!(term.len() <= acc.len());
    let mut carry = 0u16;
    let (head, tail) = acc.split_at_mut(term.len());
    for (a, &t) in head.iter_mut().zip(term) {
        let sum = u16::from(*a) + u16::from(t) + carry;
        *a = sum as u8;
        carry = sum >> 8;
    }
    for a in tail {
        if carry == 0 {
            break;
        }
        let sum = u16::from(*a) + carry;
        *a = sum as u8;
        carry = sum >> 8;
    }
    carry as u8
}

/// `acc -= term`, where `term` is no longer than `acc`. Returns the borrow out
/// of the top digit; on borrow `acc` holds the two's complement wraparound.
pub(crate) fn sub_in_place(acc: &mut [u8], term: &[u8]) -> u8 {
    debug_assert!(term.len() <= acc.len());
    let mut borrow = 0u8;
    let (head, tail) = acc.split_at_mut(term.len());
    for (a, &t) in head.iter_mut().zip(term) {
        let (d, b1) = a.overflowing_sub(t);
        let (d, b2) = d.overflowing_sub(borrow);
        *a = d;
        borrow = u8::from(b1 || b2);
    }
    for a in tail {
        if borrow == 0 {
            break;
        }
        let (d, b) = a.overflowing_sub(1);
        *a = d;
        borrow = u8::from(b);
    }
    borrow
}

/// `acc -= 1`; returns true when the run wrapped below zero.
pub(crate) fn decrement_in_place(acc: &mut [u8]) -> bool {
    for a in acc.iter_mut() {
        let (d, b) = a.overflowing_sub(1);
        *a = d;
        if !b {
            return false;
        }
    }
    true
}

/// Total ordering of two canonical values.
pub fn cmp<A: AsRef<[u8]>, B: AsRef<[u8]>>(a: &BigUint<A>, b: &BigUint<B>) -> Ordering {
    cmp_digits(a.digits(), b.digits())
}

/// `result += term`.
///
/// `result` must have room for one digit beyond the longer operand.
pub fn add<S: DigitStorage, T: AsRef<[u8]>>(
    result: &mut BigUint<S>,
    term: &BigUint<T>,
) -> Result<(), BnError> {
    let len = result.used().max(term.used());
    ensure_capacity(len + 1, result.capacity())?;

    let used = result.used();
    let digits = result.storage_mut();
    digits[used..len].fill(0);
    digits[len] = add_in_place(&mut digits[..len], term.digits());
    result.set_len(len + 1);
    Ok(())
}

/// `result = minuend - subtrahend`.
pub fn sub<S: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    result: &mut BigUint<S>,
    minuend: &BigUint<A>,
    subtrahend: &BigUint<B>,
) -> Result<(), BnError> {
    if cmp(minuend, subtrahend) == Ordering::Less {
        return Err(BnError::InvalidOperand("minuend is smaller than subtrahend"));
    }
    let len = minuend.used();
    ensure_capacity(len, result.capacity())?;

    let digits = &mut result.storage_mut()[..len];
    digits.copy_from_slice(minuend.digits());
    sub_in_place(digits, subtrahend.digits());
    result.set_len(len);
    Ok(())
}

/// `acc -= subtrahend`.
pub fn sub_assign<S: DigitStorage, T: AsRef<[u8]>>(
    acc: &mut BigUint<S>,
    subtrahend: &BigUint<T>,
) -> Result<(), BnError> {
    if cmp(acc, subtrahend) == Ordering::Less {
        return Err(BnError::InvalidOperand("minuend is smaller than subtrahend"));
    }
    let len = acc.used();
    sub_in_place(&mut acc.storage_mut()[..len], subtrahend.digits());
    acc.set_len(len);
    Ok(())
}

/// `x *= factor` for a single-digit factor.
pub fn mul_small<S: DigitStorage>(x: &mut BigUint<S>, factor: u8) -> Result<(), BnError> {
    let len = x.used();
    ensure_capacity(len + 1, x.capacity())?;

    let digits = x.storage_mut();
    let mut carry = 0u16;
    for d in &mut digits[..len] {
        let prod = u16::from(*d) * u16::from(factor) + carry;
        *d = prod as u8;
        carry = prod >> 8;
    }
    digits[len] = carry as u8;
    x.set_len(len + 1);
    Ok(())
}

pub fn mul_by_ten<S: DigitStorage>(x: &mut BigUint<S>) -> Result<(), BnError> {
    mul_small(x, 10)
}

/// `x -= 1`; zero is rejected.
pub fn decrement<S: DigitStorage>(x: &mut BigUint<S>) -> Result<(), BnError> {
    if x.is_zero() {
        return Err(BnError::InvalidOperand("cannot decrement zero"));
    }
    let len = x.used();
    decrement_in_place(&mut x.storage_mut()[..len]);
    x.set_len(len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64, capacity: usize) -> BigUint {
        BigUint::from_u64(vec![0u8; capacity], value).unwrap()
    }

    #[test]
    fn test_add_appends_carry_digit() {
        let mut a = big(0xFFFF, 4);
        add(&mut a, &big(1, 1)).unwrap();
        assert_eq!(a.digits(), &[0, 0, 1]);
    }

    #[test]
    fn test_add_shorter_accumulator() {
        let mut a = big(7, 6);
        add(&mut a, &big(0x1_0000_0000, 5)).unwrap();
        assert_eq!(a.to_u64(), Some(0x1_0000_0007));
    }

    #[test]
    fn test_add_requires_room_for_carry() {
        let mut a = big(0xFFFF, 2);
        assert_eq!(add(&mut a, &big(1, 1)), Err(BnError::CapacityViolation(3, 2)));
        assert_eq!(a.to_u64(), Some(0xFFFF));
    }

    #[test]
    fn test_sub_borrows_through_zeros() {
        let mut r = BigUint::with_capacity(4);
        sub(&mut r, &big(0x1_00_00_00, 4), &big(1, 1)).unwrap();
        assert_eq!(r.digits(), &[0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_sub_rejects_negative_result() {
        let mut r = big(42, 4);
        assert_eq!(
            sub(&mut r, &big(1, 1), &big(2, 1)),
            Err(BnError::InvalidOperand("minuend is smaller than subtrahend"))
        );
        assert_eq!(r.to_u64(), Some(42));
    }

    #[test]
    fn test_sub_assign_to_zero() {
        let mut a = big(123_456_789, 4);
        sub_assign(&mut a, &big(123_456_789, 4)).unwrap();
        assert!(a.is_zero());
    }

    #[test]
    fn test_mul_by_ten() {
        let mut x = big(30, 2);
        mul_by_ten(&mut x).unwrap();
        assert_eq!(x.to_u64(), Some(300));

        let mut y = big(0, 2);
        mul_by_ten(&mut y).unwrap();
        assert!(y.is_zero());
    }

    #[test]
    fn test_decrement() {
        let mut x = big(0x100, 2);
        decrement(&mut x).unwrap();
        assert_eq!(x.digits(), &[0xFF]);

        let mut z = big(0, 1);
        assert!(decrement(&mut z).is_err());
    }

    #[test]
    fn test_cmp_by_length_then_digits() {
        assert_eq!(cmp(&big(0x100, 2), &big(0xFF, 2)), Ordering::Greater);
        assert_eq!(cmp(&big(0x1234, 2), &big(0x1235, 2)), Ordering::Less);
        assert_eq!(cmp(&big(9, 1), &big(9, 4)), Ordering::Equal);
    }

    #[test]
    fn test_kernels_report_carry_and_borrow() {
        let mut acc = [0xFF, 0xFF];
        assert_eq!(add_in_place(&mut acc, &[1]), 1);
        assert_eq!(acc, [0, 0]);
        assert_eq!(sub_in_place(&mut acc, &[1]), 1);
        assert_eq!(acc, [0xFF, 0xFF]);
        let mut one = [1, 0];
        assert!(!decrement_in_place(&mut one));
        assert!(decrement_in_place(&mut one));
    }
}
