//! Long division: Knuth's schoolbook algorithm and a divide-and-conquer
//! variant that recurses on halves of the quotient and corrects with
//! Karatsuba products.
//!
//! Both operands are normalized into scratch copies first, so the divisor's
//! top digit has its high bit set. Scratch layout for a dividend of `un`
//! digits and a divisor of `n` digits:
//!
//! ```text
//! [ divisor copy: n | dividend copy: un + 1 | product: q | mul scratch ]
//! ```
//!
//! where `q` bounds the quotient length.

use tracing::instrument;

use crate::arith::{add_in_place, decrement_in_place, sub_in_place};
use crate::digits::{significant_len, BigUint, DigitStorage};
use crate::error::{ensure_capacity, BnError};
use crate::mul::{karatsuba_scratch, mul_digits};
use crate::shift::{shl_bits, shr_bits_in_place};

/// Minimum divisor length, and minimum quotient length inside the recursion,
/// for the recursive path.
pub const KARATSUBA_THRESHOLD_DIV: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Auto,
    Schoolbook,
}

/// Scratch digits [`div`] and [`div_rem`] need.
pub fn div_scratch_len(dividend_len: usize, divisor_len: usize) -> usize {
    let (un, n) = (dividend_len.max(1), divisor_len.max(1));
    if un < n {
        return 0;
    }
    let q = un + 2 - n;
    n + (un + 1) + q + karatsuba_scratch(q)
}

/// Quotient length of the normalized division, used for the capacity check.
fn quotient_len(dividend: &[u8], divisor: &[u8]) -> usize {
    let shift = divisor[divisor.len() - 1].leading_zeros();
    let top = dividend[dividend.len() - 1];
    let grows = shift > 0 && top >> (8 - shift) != 0;
    dividend.len() + usize::from(grows) - divisor.len() + 1
}

/// Divides trimmed `dividend` by trimmed nonzero `divisor`, where the
/// dividend is at least as long as the divisor.
///
/// Writes the quotient into `quotient` and returns its trimmed length plus
/// the trimmed length of the remainder, which is left at
/// `scratch[divisor.len()..]`.
pub(crate) fn divide(
    quotient: &mut [u8],
    dividend: &[u8],
    divisor: &[u8],
    scratch: &mut [u8],
    method: Method,
) -> (usize, usize) {
    let n = divisor.len();
    let dl = dividend.len();
    let shift = divisor[n - 1].leading_zeros();

    let (v, rest) = scratch.split_at_mut(n);
    let (u, rest) = rest.split_at_mut(dl + 1);
    let un = if shift == 0 {
        v.copy_from_slice(divisor);
        u[..dl].copy_from_slice(dividend);
        dl
    } else {
        let carry = shl_bits(v, divisor, shift);
        debug_assert_eq!(carry, 0);
        let carry = shl_bits(&mut u[..dl], dividend, shift);
        u[dl] = carry;
        if carry != 0 {
            dl + 1
        } else {
            dl
        }
    };
    let u = &mut u[..un];
    let v: &[u8] = v;
    let m = un - n;
    let q = &mut quotient[..=m];

    if method == Method::Schoolbook || n < KARATSUBA_THRESHOLD_DIV || m > n {
        schoolbook(q, u, v);
    } else {
        let (prod, mul_scratch) = rest.split_at_mut(m + 1);
        recursive(q, u, v, prod, mul_scratch);
    }

    let rem = &mut u[..n];
    if shift != 0 {
        shr_bits_in_place(rem, shift);
    }
    (significant_len(q), significant_len(rem))
}

/// Knuth's algorithm D. `u` is the normalized dividend window, overwritten
/// with the remainder in its low `v.len()` digits; `q` receives
/// `u.len() - v.len() + 1` digits.
fn schoolbook(q: &mut [u8], u: &mut [u8], v: &[u8]) {
    let (un, n) = (u.len(), v.len());
    let vt = u32::from(v[n - 1]);
    let vn = if n >= 2 { u32::from(v[n - 2]) } else { 0 };

    for j in (0..=un - n).rev() {
        let mut top = if j + n < un { u[j + n] } else { 0 };
        let num = (u32::from(top) << 8) | u32::from(u[j + n - 1]);
        let mut qhat = num / vt;
        let mut rhat = num % vt;
        let below = if n >= 2 { u32::from(u[j + n - 2]) } else { 0 };
        while qhat > 0xFF || qhat * vn > ((rhat << 8) | below) {
            qhat -= 1;
            rhat += vt;
            if rhat > 0xFF {
                break;
            }
        }

        // Multiply and subtract; the borrow never exceeds one digit.
        let mut borrow = 0u32;
        for (ud, &vd) in u[j..j + n].iter_mut().zip(v) {
            let p = qhat * u32::from(vd) + borrow;
            let (d, b) = ud.overflowing_sub(p as u8);
            *ud = d;
            borrow = (p >> 8) + u32::from(b);
        }
        let (t, mut negative) = top.overflowing_sub(borrow as u8);
        top = t;

        while negative {
            qhat -= 1;
            let carry = add_in_place(&mut u[j..j + n], v);
            let (t, c) = top.overflowing_add(carry);
            top = t;
            negative = !c;
        }
        if j + n < un {
            u[j + n] = top;
        }
        q[j] = qhat as u8;
    }
}

/// Divide-and-conquer division of `u` by `v`. Quotient digits `m + 1`, where
/// `m = u.len() - v.len()` is at most `v.len()`.
fn recursive(q: &mut [u8], u: &mut [u8], v: &[u8], prod: &mut [u8], scratch: &mut [u8]) {
    let n = v.len();
    let m = u.len() - n;
    if m < KARATSUBA_THRESHOLD_DIV {
        schoolbook(q, u, v);
        return;
    }

    let k = m / 2;
    let (v_low, v_high) = v.split_at(k);
    let high_len = m - k + 1;

    // Upper quotient half against the top of the divisor, then correct
    // against the full divisor.
    recursive(&mut q[k..k + high_len], &mut u[2 * k..], v_high, prod, scratch);
    {
        let p = &mut prod[..=m];
        mul_digits(p, &q[k..k + high_len], v_low, scratch);
        if sub_in_place(&mut u[k..], p) != 0 {
            loop {
                decrement_in_place(&mut q[k..k + high_len]);
                if add_in_place(&mut u[k..], v) != 0 {
                    break;
                }
            }
        }
    }

    if u[k..].iter().all(|&d| d == 0) {
        q[..k].fill(0);
        return;
    }

    // The lower half overwrites q[k]; keep it for the merge.
    let overlap = q[k];
    recursive(&mut q[..=k], &mut u[k..k + n], v_high, prod, scratch);
    let low_len = if q[k] != 0 { k + 1 } else { k };
    let p = &mut prod[..low_len + k];
    mul_digits(p, &q[..low_len], v_low, scratch);
    if sub_in_place(u, p) != 0 {
        loop {
            decrement_in_place(&mut q[..low_len]);
            if add_in_place(u, v) != 0 {
                break;
            }
        }
    }

    let mut digit = u16::from(overlap) + u16::from(q[k]);
    let mut idx = k;
    loop {
        q[idx] = digit as u8;
        if digit <= 0xFF {
            break;
        }
        idx += 1;
        digit = u16::from(q[idx]) + 1;
    }
}

/// Shared front end: validates, handles the short-dividend case, and returns
/// the remainder length for the general case.
fn run<Q: DigitStorage>(
    quotient: &mut BigUint<Q>,
    dividend: &[u8],
    divisor: &[u8],
    scratch: &mut [u8],
    method: Method,
) -> Result<Option<usize>, BnError> {
    if divisor.len() == 1 && divisor[0] == 0 {
        return Err(BnError::DivisionByZero);
    }
    if dividend.len() < divisor.len() {
        ensure_capacity(1, quotient.capacity())?;
        quotient.set_zero();
        return Ok(None);
    }

    ensure_capacity(quotient_len(dividend, divisor), quotient.capacity())?;
    ensure_capacity(div_scratch_len(dividend.len(), divisor.len()), scratch.len())?;

    let (q_len, r_len) = divide(quotient.storage_mut(), dividend, divisor, scratch, method);
    quotient.set_len(q_len);
    Ok(Some(r_len))
}

/// `quotient = dividend / divisor`, rounded down.
#[instrument(skip_all, level = "debug")]
pub fn div<Q: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    quotient: &mut BigUint<Q>,
    dividend: &BigUint<A>,
    divisor: &BigUint<B>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    run(quotient, dividend.digits(), divisor.digits(), scratch, Method::Auto)?;
    Ok(())
}

/// `quotient = dividend / divisor` and `remainder = dividend % divisor`.
#[instrument(skip_all, level = "debug")]
pub fn div_rem<Q: DigitStorage, R: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    quotient: &mut BigUint<Q>,
    remainder: &mut BigUint<R>,
    dividend: &BigUint<A>,
    divisor: &BigUint<B>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    divide_with_remainder(quotient, remainder, dividend, divisor, scratch, Method::Auto)
}

/// [`div_rem`] restricted to the schoolbook algorithm.
pub fn div_schoolbook<Q: DigitStorage, R: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    quotient: &mut BigUint<Q>,
    remainder: &mut BigUint<R>,
    dividend: &BigUint<A>,
    divisor: &BigUint<B>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    divide_with_remainder(quotient, remainder, dividend, divisor, scratch, Method::Schoolbook)
}

fn divide_with_remainder<Q: DigitStorage, R: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    quotient: &mut BigUint<Q>,
    remainder: &mut BigUint<R>,
    dividend: &BigUint<A>,
    divisor: &BigUint<B>,
    scratch: &mut [u8],
    method: Method,
) -> Result<(), BnError> {
    let (a, b) = (dividend.digits(), divisor.digits());
    if !divisor.is_zero() {
        ensure_capacity(a.len().min(b.len()), remainder.capacity())?;
    }
    match run(quotient, a, b, scratch, method)? {
        None => remainder.assign(dividend),
        Some(r_len) => {
            let offset = b.len();
            remainder.storage_mut()[..r_len].copy_from_slice(&scratch[offset..offset + r_len]);
            remainder.set_len(r_len);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64) -> BigUint {
        BigUint::from_u64(vec![0u8; 8], value).unwrap()
    }

    fn from_seed(len: usize, seed: u32) -> BigUint {
        let mut state = seed;
        let mut be: Vec<u8> = (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8
            })
            .collect();
        be[0] |= 1;
        BigUint::from_be_digits(vec![0u8; len], &be).unwrap()
    }

    fn divide_both(a: &BigUint, b: &BigUint) -> ((BigUint, BigUint), (BigUint, BigUint)) {
        let mut scratch = vec![0x5Au8; div_scratch_len(a.used(), b.used())];
        let mut q1 = BigUint::with_capacity(a.used() + 2);
        let mut r1 = BigUint::with_capacity(b.used());
        div_rem(&mut q1, &mut r1, a, b, &mut scratch).unwrap();
        let mut q2 = BigUint::with_capacity(a.used() + 2);
        let mut r2 = BigUint::with_capacity(b.used());
        div_schoolbook(&mut q2, &mut r2, a, b, &mut scratch).unwrap();
        ((q1, r1), (q2, r2))
    }

    #[test]
    fn test_small_division() {
        let ((q, r), _) = divide_both(&big(1_000_003), &big(97));
        assert_eq!(q.to_u64(), Some(1_000_003 / 97));
        assert_eq!(r.to_u64(), Some(1_000_003 % 97));
    }

    #[test]
    fn test_single_digit_divisor() {
        let ((q, r), _) = divide_both(&big(u64::MAX), &big(3));
        assert_eq!(q.to_u64(), Some(u64::MAX / 3));
        assert!(r.is_zero());
    }

    #[test]
    fn test_short_dividend() {
        let ((q, r), (q2, r2)) = divide_both(&big(5), &big(0x1_0000));
        assert!(q.is_zero());
        assert_eq!(r.to_u64(), Some(5));
        assert_eq!((q, r), (q2, r2));
    }

    #[test]
    fn test_equal_operands() {
        let a = from_seed(20, 11);
        let ((q, r), _) = divide_both(&a, &a.clone());
        assert_eq!(q.to_u64(), Some(1));
        assert!(r.is_zero());
    }

    #[test]
    fn test_division_by_zero() {
        let mut q = BigUint::with_capacity(4);
        let mut r = BigUint::with_capacity(4);
        let zero = BigUint::from_u32(vec![0u8; 1], 0).unwrap();
        assert_eq!(
            div_rem(&mut q, &mut r, &big(10), &zero, &mut []),
            Err(BnError::DivisionByZero)
        );
        assert_eq!(div(&mut q, &big(10), &zero, &mut []), Err(BnError::DivisionByZero));
    }

    #[test]
    fn test_quotient_capacity() {
        let a = from_seed(40, 5);
        let b = from_seed(16, 6);
        let mut scratch = vec![0u8; div_scratch_len(40, 16)];
        let mut q = BigUint::with_capacity(10);
        let mut r = BigUint::with_capacity(16);
        assert!(matches!(
            div_rem(&mut q, &mut r, &a, &b, &mut scratch),
            Err(BnError::CapacityViolation(_, 10))
        ));
    }

    #[test]
    fn test_paths_agree_40_by_16() {
        let a = from_seed(40, 40);
        let b = from_seed(16, 16);
        let (recursive, schoolbook) = divide_both(&a, &b);
        assert_eq!(recursive, schoolbook);
    }

    #[test]
    fn test_paths_agree_31_by_16() {
        // m <= n even with a normalisation carry: recursive path
        let a = from_seed(31, 31);
        let b = from_seed(16, 17);
        let ((q1, r1), (q2, r2)) = divide_both(&a, &b);
        assert_eq!(q1, q2);
        assert_eq!(r1, r2);
        assert!(r1 < b);
    }

    #[test]
    fn test_paths_agree_on_recursive_shapes() {
        for (la, lb) in [(30, 15), (31, 16), (60, 30), (61, 31), (90, 50), (129, 64)] {
            let a = from_seed(la, la as u32 * 3);
            let b = from_seed(lb, lb as u32 * 7 + 1);
            let ((q1, r1), (q2, r2)) = divide_both(&a, &b);
            assert_eq!(q1, q2, "quotient {}/{}", la, lb);
            assert_eq!(r1, r2, "remainder {}/{}", la, lb);
            assert!(r1 < b);
        }
    }

    #[test]
    fn test_all_ones_divisor() {
        // (256^40 - 1) / (256^20 - 1) = 256^20 + 1
        let a = BigUint::from_be_digits(vec![0u8; 40], &[0xFF; 40]).unwrap();
        let b = BigUint::from_be_digits(vec![0u8; 20], &[0xFF; 20]).unwrap();
        let ((q, r), (q2, _)) = divide_both(&a, &b);
        let mut expected = vec![0u8; 21];
        expected[0] = 1;
        expected[20] = 1;
        assert_eq!(q.digits(), &expected[..]);
        assert!(r.is_zero());
        assert_eq!(q, q2);
    }
}
