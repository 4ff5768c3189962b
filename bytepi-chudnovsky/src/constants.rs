//! Seeds of the Chudnovsky formula
//!
//! ```text
//! 1/pi = 12 * sum_k (-1)^k (6k)! (13591409 + 545140134 k) / ((3k)! (k!)^3 640320^(3k + 3/2))
//! ```
//!
//! rearranged as `pi = 426880 * sqrt(10005) / (13591409 * a - 545140134 * b)`.

use bytepi_math::{div, div_scratch_len, mul, sqrt, BigUint};
use tracing::instrument;

use crate::error::PiError;
use crate::workspace::Workspace;

pub const C: u32 = 640_320;
pub const C_DIVISOR: u32 = 24;
pub const A_WEIGHT: u32 = 13_591_409;
pub const B_WEIGHT: u32 = 545_140_134;
pub const SQRT_RADICAND: u32 = 10_005;
pub const SQRT_MULTIPLIER: u32 = 426_880;

/// `640320^3 / 24`, the per-term denominator factor.
pub fn coefficient() -> Result<BigUint, PiError> {
    let c = BigUint::from_u32(vec![0u8; 4], C)?;
    let mut square = BigUint::with_capacity(8);
    mul(&mut square, &c, &c, &mut [])?;
    let mut cube = BigUint::with_capacity(12);
    mul(&mut cube, &square, &c, &mut [])?;

    let divisor = BigUint::from_u32(vec![0u8; 1], C_DIVISOR)?;
    let mut result = BigUint::with_capacity(cube.used() + 1);
    let mut scratch = vec![0u8; div_scratch_len(cube.used(), divisor.used())];
    div(&mut result, &cube, &divisor, &mut scratch)?;
    Ok(result)
}

/// `426880 * isqrt(10005 * 256^(2W))`, i.e. `426880 * sqrt(10005)` scaled by `256^W`.
#[instrument(skip_all, level = "debug")]
pub fn sqrt_constant(ws: &mut Workspace) -> Result<(), PiError> {
    ws.radix_power.set_power_of_radix(2 * ws.words)?;
    ws.small.set_u64(SQRT_RADICAND.into())?;
    mul(&mut ws.radicand, &ws.radix_power, &ws.small, &mut ws.scratch)?;

    sqrt(&ws.radicand, &mut ws.root, &mut ws.scratch)?;

    ws.small.set_u64(SQRT_MULTIPLIER.into())?;
    mul(&mut ws.sqrt_constant, &ws.root, &ws.small, &mut ws.scratch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PiConfig;

    #[test]
    fn test_coefficient() {
        assert_eq!(coefficient().unwrap().to_u64(), Some(10_939_058_860_032_000));
    }

    #[test]
    fn test_sqrt_constant_bounds() {
        let mut ws = Workspace::new(&PiConfig::new(10)).unwrap();
        sqrt_constant(&mut ws).unwrap();

        // root = isqrt(10005 * 256^(2W)): root^2 <= radicand < (root + 1)^2
        let w = ws.words();
        let root = ws.root.to_be_digits();
        let root = num_bigint::BigUint::from_bytes_be(&root);
        let radicand = num_bigint::BigUint::from(SQRT_RADICAND) << (16 * w);
        assert!(&root * &root <= radicand);
        assert!((&root + 1u32) * (&root + 1u32) > radicand);

        let expected = root * SQRT_MULTIPLIER;
        assert_eq!(
            num_bigint::BigUint::from_bytes_le(ws.sqrt_constant.digits()),
            expected
        );
    }
}
