use bytepi_math::{add, div, mul, sub, sub_assign};
use tracing::{debug, instrument};

use crate::constants::{A_WEIGHT, B_WEIGHT};
use crate::error::PiError;
use crate::workspace::Workspace;

/// The three small factors of `a_k / a_{k-1}` and `k^3`, or `None` once
/// they no longer fit their words.
fn term_factors(k: u64) -> Option<([u32; 3], u64)> {
    let f1 = u32::try_from(k.checked_mul(6)?.checked_sub(5)?).ok()?;
    let f2 = u32::try_from(k.checked_mul(2)?.checked_sub(1)?).ok()?;
    let f3 = u32::try_from(k.checked_mul(6)?.checked_sub(1)?).ok()?;
    let cube = k.checked_mul(k)?.checked_mul(k)?;
    Some(([f1, f2, f3], cube))
}

/// Accumulates `a = sum (-1)^k a_k` and `b = sum (-1)^(k+1) k a_k` with
/// `a_0 = 256^W` and
/// `a_k = a_{k-1} (6k-5)(2k-1)(6k-1) / (k^3 * 640320^3 / 24)`,
/// stopping at the first term that truncates to zero.
///
/// Returns the number of terms after `a_0`.
#[instrument(skip_all, level = "debug")]
pub fn accumulate(ws: &mut Workspace) -> Result<u64, PiError> {
    ws.a.set_power_of_radix(ws.words)?;
    ws.term.set_power_of_radix(ws.words)?;
    ws.b.set_zero();

    let mut k: u64 = 1;
    loop {
        let (factors, cube) = term_factors(k).ok_or(PiError::SeriesOverflow(k))?;

        // numerator = a_{k-1} * (6k-5) * (2k-1) * (6k-1)
        ws.small.set_u64(factors[0].into())?;
        mul(&mut ws.numerator, &ws.term, &ws.small, &mut ws.scratch)?;
        ws.small.set_u64(factors[1].into())?;
        mul(&mut ws.numerator_tmp, &ws.numerator, &ws.small, &mut ws.scratch)?;
        ws.small.set_u64(factors[2].into())?;
        mul(&mut ws.numerator, &ws.numerator_tmp, &ws.small, &mut ws.scratch)?;

        ws.small.set_u64(cube)?;
        mul(&mut ws.divisor, &ws.coefficient, &ws.small, &mut ws.scratch)?;
        if ws.numerator < ws.divisor {
            break;
        }
        div(&mut ws.term, &ws.numerator, &ws.divisor, &mut ws.scratch)?;

        ws.small.set_u64(k)?;
        mul(&mut ws.weighted, &ws.term, &ws.small, &mut ws.scratch)?;
        if k % 2 == 1 {
            sub_assign(&mut ws.a, &ws.term)?;
            add(&mut ws.b, &ws.weighted)?;
        } else {
            add(&mut ws.a, &ws.term)?;
            sub_assign(&mut ws.b, &ws.weighted)?;
        }

        if k % 64 == 0 {
            debug!(terms = k, term_digits = ws.term.used(), "series progress");
        }
        k += 1;
    }

    let terms = k - 1;
    debug!(terms, words = ws.words, "series converged");
    Ok(terms)
}

/// `13591409 * a - 545140134 * b`.
#[instrument(skip_all, level = "debug")]
pub fn denominator(ws: &mut Workspace) -> Result<(), PiError> {
    ws.small.set_u64(A_WEIGHT.into())?;
    mul(&mut ws.weighted_a, &ws.a, &ws.small, &mut ws.scratch)?;
    ws.small.set_u64(B_WEIGHT.into())?;
    mul(&mut ws.weighted_b, &ws.b, &ws.small, &mut ws.scratch)?;
    sub(&mut ws.denominator, &ws.weighted_a, &ws.weighted_b)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PiConfig;

    #[test]
    fn test_term_factors() {
        assert_eq!(term_factors(1), Some(([1, 1, 5], 1)));
        assert_eq!(term_factors(3), Some(([13, 5, 17], 27)));
        assert_eq!(term_factors(u64::MAX / 2), None);
        assert_eq!(term_factors(1 << 22), None);
    }

    #[test]
    fn test_ten_digits_needs_one_term() {
        let mut ws = Workspace::new(&PiConfig::new(10)).unwrap();
        assert_eq!(accumulate(&mut ws).unwrap(), 1);
    }

    #[test]
    fn test_term_counts_grow_with_precision() {
        let mut ws = Workspace::new(&PiConfig::new(50)).unwrap();
        assert_eq!(accumulate(&mut ws).unwrap(), 4);
        let mut ws = Workspace::new(&PiConfig::new(1000)).unwrap();
        assert_eq!(accumulate(&mut ws).unwrap(), 71);
        denominator(&mut ws).unwrap();
        assert!(ws.denominator > ws.a);
    }

    #[test]
    fn test_single_word_series_is_empty() {
        // With one fraction word a_1 = 256 * 5 / coefficient truncates to zero.
        let mut ws = Workspace::new(&PiConfig::new(1).with_guard_digits(0)).unwrap();
        assert_eq!(ws.words(), 1);
        let terms = accumulate(&mut ws).unwrap();
        assert_eq!(terms, 0);
        assert_eq!(ws.a.to_u64(), Some(256));
        assert!(ws.b.is_zero());
    }
}
