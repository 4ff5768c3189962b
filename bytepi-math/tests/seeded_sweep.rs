use bytepi_math::{
    div_rem, div_scratch_len, mul, mul_scratch_len, sqrt_rem, sqrt_scratch_len, BigUint,
};
use num_integer::Integer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Many-seed sweeps over operand shapes that random property inputs rarely
// reach: all-ones values, near-squares, and powers of the radix.

type Reference = num_bigint::BigUint;

fn to_engine(x: &Reference, capacity: usize) -> BigUint {
    BigUint::from_be_digits(vec![0u8; capacity.max(1)], &x.to_bytes_be()).unwrap()
}

fn reference(x: &BigUint) -> Reference {
    Reference::from_bytes_le(x.digits())
}

fn random_value(rng: &mut StdRng, len: usize) -> Reference {
    let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    Reference::from_bytes_le(&bytes)
}

fn radix_power(len: usize) -> Reference {
    Reference::from(1u32) << (8 * len)
}

#[test]
fn test_sqrt_sweep_many_seeds() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..40 {
            let len = rng.gen_range(1..=90);
            let n = match rng.gen_range(0..4) {
                0 => {
                    let x = random_value(&mut rng, (len + 1) / 2) + 1u32;
                    &x * &x
                }
                1 => {
                    let x = random_value(&mut rng, (len + 1) / 2) + 2u32;
                    &x * &x - 1u32
                }
                2 => radix_power(len) - 1u32,
                _ => random_value(&mut rng, len),
            };

            let engine_n = to_engine(&n, len + 1);
            let s_len = (engine_n.used() + 1) / 2;
            let mut root = BigUint::with_capacity(s_len);
            let mut rem = BigUint::with_capacity(s_len + 1);
            let mut scratch = vec![0xA5u8; sqrt_scratch_len(engine_n.used())];
            sqrt_rem(&engine_n, &mut root, &mut rem, &mut scratch).unwrap();

            let (s, r) = (reference(&root), reference(&rem));
            assert_eq!(s, n.sqrt(), "seed {} len {}", seed, len);
            assert_eq!(&s * &s + &r, n);
        }
    }
}

#[test]
fn test_newton_boundary_lengths() {
    // Four digits is the last Newton size; five is the first recursive one.
    let mut rng = StdRng::seed_from_u64(4);
    for len in 1..=10 {
        for _ in 0..200 {
            let n = random_value(&mut rng, len) | radix_power(len - 1);
            let engine_n = to_engine(&n, len);
            let s_len = (len + 1) / 2;
            let mut root = BigUint::with_capacity(s_len);
            let mut rem = BigUint::with_capacity(s_len + 1);
            let mut scratch = vec![0u8; sqrt_scratch_len(len)];
            sqrt_rem(&engine_n, &mut root, &mut rem, &mut scratch).unwrap();
            assert_eq!(reference(&root), n.sqrt());
        }
    }
}

#[test]
fn test_division_sweep_extreme_divisors() {
    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(1000 + seed);
        for _ in 0..30 {
            let n2 = rng.gen_range(1..=70);
            let n1 = rng.gen_range(1..=140);
            let b = match rng.gen_range(0..3) {
                0 => radix_power(n2) - 1u32,
                1 => radix_power(n2 - 1),
                _ => random_value(&mut rng, n2) + 1u32,
            };
            let a = if rng.gen_bool(0.5) {
                &b * random_value(&mut rng, n1) + random_value(&mut rng, n2) % &b
            } else {
                random_value(&mut rng, n1)
            };

            let (ea, eb) = (to_engine(&a, a.bits() as usize / 8 + 1), to_engine(&b, n2 + 1));
            let mut q = BigUint::with_capacity(ea.used() + 1);
            let mut r = BigUint::with_capacity(eb.used());
            let mut scratch = vec![0xFFu8; div_scratch_len(ea.used(), eb.used())];
            div_rem(&mut q, &mut r, &ea, &eb, &mut scratch).unwrap();

            let (eq, er) = a.div_rem(&b);
            assert_eq!(reference(&q), eq, "seed {}", seed);
            assert_eq!(reference(&r), er, "seed {}", seed);
        }
    }
}

#[test]
fn test_mul_sweep_unbalanced() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let n1 = rng.gen_range(1..=150);
        let n2 = rng.gen_range(1..=150);
        let (x, y) = (random_value(&mut rng, n1), random_value(&mut rng, n2));
        let (ex, ey) = (to_engine(&x, n1), to_engine(&y, n2));
        let mut r = BigUint::with_capacity(ex.used() + ey.used());
        let mut scratch = vec![0x11u8; mul_scratch_len(ex.used(), ey.used())];
        mul(&mut r, &ex, &ey, &mut scratch).unwrap();
        assert_eq!(reference(&r), x * y);
    }
}
