//! Schoolbook and Karatsuba multiplication.
//!
//! All temporaries come from a caller-supplied scratch slice sized with
//! [`mul_scratch_len`]. Karatsuba keeps its operand sums in the destination
//! buffer before the low and high products overwrite it; the cross product
//! gets its own scratch region.

use tracing::instrument;

use crate::arith::{add_in_place, sub_in_place};
use crate::digits::{significant_len, BigUint, DigitStorage};
use crate::error::{ensure_capacity, BnError};

/// Both operands must be longer than this for the Karatsuba path.
pub const KARATSUBA_THRESHOLD_MUL: usize = 20;

/// Scratch needed to multiply by dispatch when the longer operand has `len` digits.
pub(crate) fn karatsuba_scratch(len: usize) -> usize {
    if len <= KARATSUBA_THRESHOLD_MUL {
        0
    } else {
        karatsuba_level(len)
    }
}

/// Scratch for one Karatsuba step on `len` digits: the cross product, its
/// carry digits, and whatever the half-size products below it need.
fn karatsuba_level(len: usize) -> usize {
    len + 4 + karatsuba_scratch(len / 2 + 2)
}

/// Scratch digits [`mul`] needs for operands of the given lengths.
pub fn mul_scratch_len(len1: usize, len2: usize) -> usize {
    if len1 <= KARATSUBA_THRESHOLD_MUL || len2 <= KARATSUBA_THRESHOLD_MUL {
        0
    } else {
        karatsuba_scratch(len1.max(len2))
    }
}

/// Scratch digits [`mul_karatsuba`] needs for operands of the given lengths.
pub fn mul_karatsuba_scratch_len(len1: usize, len2: usize) -> usize {
    if len1 < 2 || len2 < 2 {
        0
    } else {
        karatsuba_level(len1.max(len2))
    }
}

/// `res[..x.len() + y.len()] = x * y`, choosing the algorithm by size.
pub(crate) fn mul_digits(res: &mut [u8], x: &[u8], y: &[u8], scratch: &mut [u8]) {
    if x.len() > KARATSUBA_THRESHOLD_MUL && y.len() > KARATSUBA_THRESHOLD_MUL {
        karatsuba(res, x, y, scratch);
    } else {
        schoolbook(res, x, y);
    }
}

fn schoolbook(res: &mut [u8], x: &[u8], y: &[u8]) {
    let res = &mut res[..x.len() + y.len()];
    res.fill(0);
    for (i, &xi) in x.iter().enumerate() {
        let mut carry = 0u16;
        for (r, &yj) in res[i..].iter_mut().zip(y) {
            let w = u16::from(*r) + u16::from(xi) * u16::from(yj) + carry;
            *r = w as u8;
            carry = w >> 8;
        }
        res[i + y.len()] = carry as u8;
    }
}

fn karatsuba(res: &mut [u8], x: &[u8], y: &[u8], scratch: &mut [u8]) {
    let (x, y) = if x.len() > y.len() { (y, x) } else { (x, y) };
    let (n1, n2) = (x.len(), y.len());
    debug_assert!(scratch.len() >= karatsuba_level(n2));
    let total = n1 + n2;
    let l = n2 / 2;
    let (y_low, y_high) = y.split_at(l);

    if n1 <= l {
        // Only the longer operand splits.
        let hy = y_high.len();
        mul_digits(&mut res[..n1 + l], x, y_low, scratch);
        res[n1 + l..total].fill(0);
        let (high, rest) = scratch.split_at_mut(n1 + hy);
        mul_digits(high, x, y_high, rest);
        let carry = add_in_place(&mut res[l..total], high);
        debug_assert_eq!(carry, 0);
        return;
    }

    let (x_low, x_high) = x.split_at(l);
    let sx = l.max(x_high.len()) + 1;
    let sy = l.max(y_high.len()) + 1;
    let (cross, rest) = scratch.split_at_mut(sx + sy);
    {
        let (x_sum, tail) = res[..total].split_at_mut(sx);
        let y_sum = &mut tail[..sy];
        x_sum[..l].copy_from_slice(x_low);
        x_sum[l..].fill(0);
        add_in_place(x_sum, x_high);
        y_sum[..l].copy_from_slice(y_low);
        y_sum[l..].fill(0);
        add_in_place(y_sum, y_high);
        mul_digits(cross, x_sum, y_sum, rest);
    }

    let (low, high) = res[..total].split_at_mut(2 * l);
    mul_digits(low, x_low, y_low, rest);
    mul_digits(high, x_high, y_high, rest);
    sub_in_place(cross, low);
    sub_in_place(cross, high);

    let cross_len = significant_len(cross);
    let carry = add_in_place(&mut res[l..total], &cross[..cross_len]);
    debug_assert_eq!(carry, 0);
}

/// `result = factor1 * factor2`.
#[instrument(skip_all, level = "debug")]
pub fn mul<S: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    result: &mut BigUint<S>,
    factor1: &BigUint<A>,
    factor2: &BigUint<B>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    let (x, y) = (factor1.digits(), factor2.digits());
    let len = x.len() + y.len();
    ensure_capacity(len, result.capacity())?;
    ensure_capacity(mul_scratch_len(x.len(), y.len()), scratch.len())?;

    mul_digits(result.storage_mut(), x, y, scratch);
    result.set_len(len);
    Ok(())
}

/// `result = factor1 * factor2` by the quadratic algorithm only.
pub fn mul_schoolbook<S: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    result: &mut BigUint<S>,
    factor1: &BigUint<A>,
    factor2: &BigUint<B>,
) -> Result<(), BnError> {
    let (x, y) = (factor1.digits(), factor2.digits());
    let len = x.len() + y.len();
    ensure_capacity(len, result.capacity())?;

    schoolbook(result.storage_mut(), x, y);
    result.set_len(len);
    Ok(())
}

/// `result = factor1 * factor2`, taking a Karatsuba step at the top level
/// regardless of size. Single-digit operands go straight to schoolbook.
pub fn mul_karatsuba<S: DigitStorage, A: AsRef<[u8]>, B: AsRef<[u8]>>(
    result: &mut BigUint<S>,
    factor1: &BigUint<A>,
    factor2: &BigUint<B>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    let (x, y) = (factor1.digits(), factor2.digits());
    let len = x.len() + y.len();
    ensure_capacity(len, result.capacity())?;
    ensure_capacity(mul_karatsuba_scratch_len(x.len(), y.len()), scratch.len())?;

    if x.len() < 2 || y.len() < 2 {
        schoolbook(result.storage_mut(), x, y);
    } else {
        karatsuba(result.storage_mut(), x, y, scratch);
    }
    result.set_len(len);
    Ok(())
}
