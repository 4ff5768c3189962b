use anyhow::{Context, Result};
use bytepi_math::{div, div_scratch_len, mul, mul_scratch_len, sqrt, sqrt_scratch_len, BigUint};
use sha2::{Digest, Sha256};

// Prints digests of fixed computations so outputs can be compared across
// platforms and builds.
fn main() -> Result<()> {
    const WORDS: usize = 64;

    // floor(sqrt(2) * 256^WORDS)
    let mut two = BigUint::with_capacity(2 * WORDS + 2);
    two.set_power_of_radix(2 * WORDS)?;
    let mut tmp = two.clone();
    bytepi_math::add(&mut tmp, &two)?;
    let mut root = BigUint::with_capacity(WORDS + 1);
    let mut scratch = vec![0u8; sqrt_scratch_len(tmp.used())];
    sqrt(&tmp, &mut root, &mut scratch).context("sqrt(2)")?;
    println!("SQRT2_HASH {}", digest_hex(&root));

    // root^2 / 3
    let mut square = BigUint::with_capacity(2 * root.used());
    let mut scratch = vec![0u8; mul_scratch_len(root.used(), root.used())];
    mul(&mut square, &root, &root, &mut scratch).context("square root")?;
    let three = BigUint::from_u32(vec![0u8; 1], 3)?;
    let mut third = BigUint::with_capacity(square.used() + 1);
    let mut scratch = vec![0u8; div_scratch_len(square.used(), 1)];
    div(&mut third, &square, &three, &mut scratch).context("divide by three")?;
    println!("DIV3_HASH {}", digest_hex(&third));
    Ok(())
}

/// SHA-256 of the little-endian digits, hex encoded.
fn digest_hex(value: &BigUint) -> String {
    hex::encode(Sha256::digest(value.digits()))
}
