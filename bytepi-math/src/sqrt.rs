//! Integer square root with remainder.
//!
//! Inputs are first shifted left by an even number of bits so the top digit
//! is at least 64. Operands of up to [`NEWTON_SQRT_DIGITS`] digits are solved
//! with machine-word Newton iteration; longer ones split into quarters and
//! recurse on the upper half, refining with one division.

use std::cmp::Ordering;

use tracing::instrument;

use crate::arith::{add_in_place, decrement_in_place, sub_in_place};
use crate::digits::{cmp_digits, significant_len, BigUint, DigitStorage};
use crate::div::{div_scratch_len, divide, Method};
use crate::error::{ensure_capacity, BnError};
use crate::mul::{karatsuba_scratch, mul_digits};
use crate::shift::{shl_bits, shr_bits_in_place};

/// Largest operand, in digits, handled by Newton iteration.
pub const NEWTON_SQRT_DIGITS: usize = 4;

const NEWTON_MAX_ITERATIONS: usize = 64;

/// Scratch for one recursive call on a normalized operand of `len` digits.
fn recursion_scratch(len: usize) -> usize {
    if len <= NEWTON_SQRT_DIGITS {
        return 0;
    }
    let k = len / 4;
    let nh = len - 2 * k;
    let sh = (nh + 1) / 2;
    let s_len = (len + 1) / 2;
    let work = div_scratch_len(k + sh + 1, sh).max(karatsuba_scratch(k + 1));
    let level = (sh + 1) + (k + 3) + (2 * k + 2) + (s_len + 2) + work;
    (s_len + 3) + recursion_scratch(nh).max(level)
}

/// Scratch digits [`sqrt`] and [`sqrt_rem`] need for an `n_len`-digit input.
pub fn sqrt_scratch_len(n_len: usize) -> usize {
    let len = n_len.max(1);
    let s_len = (len + 1) / 2;
    let tail = recursion_scratch(len).max(2 * s_len + karatsuba_scratch(s_len));
    len + (s_len + 1) + (s_len + 3) + tail
}

/// Floor square root of a machine word.
fn newton_isqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }
    let mut x = value >> 1;
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let next = (x + value / x) >> 1;
        if next >= x {
            return x;
        }
        x = next;
    }
    x
}

/// Square root of normalized `a` (top digit at least 64).
///
/// Writes `ceil(a.len() / 2)` root digits plus one zero spare digit into
/// `root`, the remainder into `rem`, and returns the remainder's length.
/// `rem` must hold `ceil(a.len() / 2) + 3` digits.
fn sqrt_recursive(a: &[u8], root: &mut [u8], rem: &mut [u8], scratch: &mut [u8]) -> usize {
    let n = a.len();
    let s_len = (n + 1) / 2;
    debug_assert!(a[n - 1] >= 64);

    if n <= NEWTON_SQRT_DIGITS {
        let value = a.iter().rev().fold(0u64, |acc, &d| (acc << 8) | u64::from(d));
        let s = newton_isqrt(value);
        let r = value - s * s;
        root[..s_len].copy_from_slice(&s.to_le_bytes()[..s_len]);
        root[s_len] = 0;
        rem[..4].copy_from_slice(&r.to_le_bytes()[..4]);
        return significant_len(&rem[..4]);
    }

    let k = n / 4;
    let (a0, upper) = a.split_at(k);
    let (a1, a_high) = upper.split_at(k);
    let sh = (a_high.len() + 1) / 2;

    // (s1, r1) = sqrt(a_high), with r1 landing above a1 in the dividend buffer.
    let (d, level) = scratch.split_at_mut(s_len + 3);
    let r1_len = sqrt_recursive(a_high, &mut root[k..], &mut d[k..], level);
    d[..k].copy_from_slice(a1);
    let d_len = significant_len(&d[..k + r1_len]);

    let (v, level) = level.split_at_mut(sh + 1);
    v[sh] = shl_bits(&mut v[..sh], &root[k..k + sh], 1);
    let v_len = significant_len(v);
    let (q, level) = level.split_at_mut(k + 3);
    let (y, level) = level.split_at_mut(2 * k + 2);
    let (t, work) = level.split_at_mut(s_len + 2);

    // (q, u) = (r1 * 256^k + a1) / (2 * s1); X = u * 256^k + a0.
    let (q_len, u_len) = if d_len < v_len {
        q[0] = 0;
        rem[k..k + d_len].copy_from_slice(&d[..d_len]);
        (1, d_len)
    } else {
        let (q_len, u_len) = divide(q, &d[..d_len], &v[..v_len], work, Method::Auto);
        rem[k..k + u_len].copy_from_slice(&work[v_len..v_len + u_len]);
        (q_len, u_len)
    };
    rem[..k].copy_from_slice(a0);
    let mut x_len = significant_len(&rem[..k + u_len]);

    // s = s1 * 256^k + q
    root[..k].fill(0);
    root[s_len] = 0;
    add_in_place(&mut root[..=s_len], &q[..q_len]);

    let y = &mut y[..2 * q_len];
    mul_digits(y, &q[..q_len], &q[..q_len], work);
    let y_len = significant_len(y);

    if cmp_digits(&rem[..x_len], &y[..y_len]) == Ordering::Less {
        // X += 2s - 1, s -= 1
        let s_cur = significant_len(&root[..=s_len]);
        t[s_cur] = shl_bits(&mut t[..s_cur], &root[..s_cur], 1);
        let t_len = significant_len(&t[..=s_cur]);
        let width = x_len.max(t_len) + 1;
        rem[x_len..width].fill(0);
        add_in_place(&mut rem[..width], &t[..t_len]);
        decrement_in_place(&mut rem[..width]);
        decrement_in_place(&mut root[..=s_len]);
        x_len = significant_len(&rem[..width]);
    }

    sub_in_place(&mut rem[..x_len], &y[..y_len]);
    significant_len(&rem[..x_len])
}

/// Square root of trimmed nonzero `n` inside `scratch`.
///
/// Returns the root length (root at `scratch[n.len()..]`) and, when
/// `with_rem` is set, the remainder length (remainder at `scratch[..]`).
fn isqrt_in_scratch(n: &[u8], scratch: &mut [u8], with_rem: bool) -> (usize, usize) {
    let len = n.len();
    let s_len = (len + 1) / 2;
    let shift = n[len - 1].leading_zeros() / 2;

    let (a, rest) = scratch.split_at_mut(len);
    let (s, rest) = rest.split_at_mut(s_len + 1);
    let (r, tail) = rest.split_at_mut(s_len + 3);
    if shift == 0 {
        a.copy_from_slice(n);
    } else {
        let carry = shl_bits(a, n, 2 * shift);
        debug_assert_eq!(carry, 0);
    }

    let r_len = sqrt_recursive(a, s, r, tail);
    let s = &mut s[..s_len];
    if shift == 0 {
        a[..r_len].copy_from_slice(&r[..r_len]);
        return (significant_len(s), r_len);
    }

    shr_bits_in_place(s, shift);
    let root_len = significant_len(s);
    if !with_rem {
        return (root_len, 0);
    }
    // The shifted remainder does not carry over; recompute n - root^2.
    let (sq, mul_scratch) = tail.split_at_mut(2 * root_len);
    mul_digits(sq, &s[..root_len], &s[..root_len], mul_scratch);
    let sq_len = significant_len(sq);
    a.copy_from_slice(n);
    sub_in_place(a, &sq[..sq_len]);
    (root_len, significant_len(a))
}

/// `root = floor(sqrt(n))`.
#[instrument(skip_all, level = "debug")]
pub fn sqrt<N: AsRef<[u8]>, R: DigitStorage>(
    n: &BigUint<N>,
    root: &mut BigUint<R>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    let digits = n.digits();
    ensure_capacity((digits.len() + 1) / 2, root.capacity())?;
    if n.is_zero() {
        root.set_zero();
        return Ok(());
    }
    ensure_capacity(sqrt_scratch_len(digits.len()), scratch.len())?;

    let (root_len, _) = isqrt_in_scratch(digits, scratch, false);
    let offset = digits.len();
    root.storage_mut()[..root_len].copy_from_slice(&scratch[offset..offset + root_len]);
    root.set_len(root_len);
    Ok(())
}

/// `root = floor(sqrt(n))` and `rem = n - root^2`, so `rem <= 2 * root`.
#[instrument(skip_all, level = "debug")]
pub fn sqrt_rem<N: AsRef<[u8]>, R: DigitStorage, M: DigitStorage>(
    n: &BigUint<N>,
    root: &mut BigUint<R>,
    rem: &mut BigUint<M>,
    scratch: &mut [u8],
) -> Result<(), BnError> {
    let digits = n.digits();
    let s_len = (digits.len() + 1) / 2;
    ensure_capacity(s_len, root.capacity())?;
    ensure_capacity(s_len + 1, rem.capacity())?;
    if n.is_zero() {
        root.set_zero();
        rem.set_zero();
        return Ok(());
    }
    ensure_capacity(sqrt_scratch_len(digits.len()), scratch.len())?;

    let (root_len, rem_len) = isqrt_in_scratch(digits, scratch, true);
    let offset = digits.len();
    root.storage_mut()[..root_len].copy_from_slice(&scratch[offset..offset + root_len]);
    root.set_len(root_len);
    rem.storage_mut()[..rem_len].copy_from_slice(&scratch[..rem_len]);
    rem.set_len(rem_len);
    Ok(())
}
