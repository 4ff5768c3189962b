use crate::digits::{BigUint, DigitStorage};
use crate::error::{ensure_capacity, BnError};

/// `res[..val.len()] = val << bits`; returns the bits carried out of the top digit.
pub(crate) fn shl_bits(res: &mut [u8], val: &[u8], bits: u32) -> u8 {
    debug_assert!((1..8).contains(&bits) && res.len() >= val.len());
    let mut carry = 0u8;
    for (r, &v) in res.iter_mut().zip(val) {
        *r = (v << bits) | carry;
        carry = v >> (8 - bits);
    }
    carry
}

pub(crate) fn shl_bits_in_place(digits: &mut [u8], bits: u32) -> u8 {
    debug_assert!((1..8).contains(&bits));
    let mut carry = 0u8;
    for d in digits.iter_mut() {
        let v = *d;
        *d = (v << bits) | carry;
        carry = v >> (8 - bits);
    }
    carry
}

/// Shifts the run right by `bits`; the low bits of the bottom digit are dropped.
pub(crate) fn shr_bits_in_place(digits: &mut [u8], bits: u32) {
    debug_assert!((1..8).contains(&bits));
    let mut carry = 0u8;
    for d in digits.iter_mut().rev() {
        let v = *d;
        *d = (v >> bits) | carry;
        carry = v << (8 - bits);
    }
}

fn check_bits(bits: u32) -> Result<(), BnError> {
    if !(1..=7).contains(&bits) {
        return Err(BnError::InvalidOperand("shift amount must be in 1..=7"));
    }
    Ok(())
}

/// `res = val * 256^words`.
pub fn shift_left_words<S: DigitStorage, T: AsRef<[u8]>>(
    res: &mut BigUint<S>,
    val: &BigUint<T>,
    words: usize,
) -> Result<(), BnError> {
    if val.is_zero() {
        ensure_capacity(1, res.capacity())?;
        res.set_zero();
        return Ok(());
    }
    let len = val.used() + words;
    ensure_capacity(len, res.capacity())?;

    let digits = res.storage_mut();
    digits[..words].fill(0);
    digits[words..len].copy_from_slice(val.digits());
    res.set_len(len);
    Ok(())
}

/// `res = val << bits` for `bits` in `1..=7`.
pub fn shift_left_bits<S: DigitStorage, T: AsRef<[u8]>>(
    res: &mut BigUint<S>,
    val: &BigUint<T>,
    bits: u32,
) -> Result<(), BnError> {
    check_bits(bits)?;
    let len = val.used();
    ensure_capacity(len + 1, res.capacity())?;

    let digits = res.storage_mut();
    digits[len] = shl_bits(&mut digits[..len], val.digits(), bits);
    res.set_len(len + 1);
    Ok(())
}

pub fn shift_left_bits_in_place<S: DigitStorage>(x: &mut BigUint<S>, bits: u32) -> Result<(), BnError> {
    check_bits(bits)?;
    let len = x.used();
    ensure_capacity(len + 1, x.capacity())?;

    let digits = x.storage_mut();
    digits[len] = shl_bits_in_place(&mut digits[..len], bits);
    x.set_len(len + 1);
    Ok(())
}

/// `res = val >> bits` for `bits` in `1..=7`.
pub fn shift_right_bits<S: DigitStorage, T: AsRef<[u8]>>(
    res: &mut BigUint<S>,
    val: &BigUint<T>,
    bits: u32,
) -> Result<(), BnError> {
    check_bits(bits)?;
    let len = val.used();
    ensure_capacity(len, res.capacity())?;

    let digits = &mut res.storage_mut()[..len];
    digits.copy_from_slice(val.digits());
    shr_bits_in_place(digits, bits);
    res.set_len(len);
    Ok(())
}

pub fn shift_right_bits_in_place<S: DigitStorage>(x: &mut BigUint<S>, bits: u32) -> Result<(), BnError> {
    check_bits(bits)?;
    let len = x.used();
    shr_bits_in_place(&mut x.storage_mut()[..len], bits);
    x.set_len(len);
    Ok(())
}

/// `res = val << 1`.
pub fn shift_left_1bit<S: DigitStorage, T: AsRef<[u8]>>(
    res: &mut BigUint<S>,
    val: &BigUint<T>,
) -> Result<(), BnError> {
    shift_left_bits(res, val, 1)
}
