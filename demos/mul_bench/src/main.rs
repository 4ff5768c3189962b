use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use bytepi_math::{
    div_rem, div_schoolbook, div_scratch_len, mul_karatsuba, mul_karatsuba_scratch_len,
    mul_schoolbook, BigUint,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Time schoolbook against Karatsuba multiply and recursive divide")]
struct Args {
    /// Operand sizes in digits
    #[arg(long, value_delimiter = ',', default_values_t = [16usize, 32, 64, 256, 1024])]
    sizes: Vec<usize>,

    /// Repetitions per size
    #[arg(long, default_value_t = 20)]
    iters: u32,

    /// RNG seed for operands
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn random_operand(rng: &mut StdRng, len: usize) -> Result<BigUint> {
    let mut be: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    be[0] |= 1;
    Ok(BigUint::from_be_digits(vec![0u8; len], &be)?)
}

fn time<F: FnMut() -> Result<()>>(iters: u32, mut f: F) -> Result<Duration> {
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed() / iters)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.iters == 0 {
        bail!("--iters must be positive");
    }
    let mut rng = StdRng::seed_from_u64(args.seed);
    println!("{:>6} {:>12} {:>12} {:>12} {:>12}", "digits", "mul school", "karatsuba", "div school", "div rec");

    for &n in &args.sizes {
        if n < 2 {
            bail!("sizes must be at least 2 digits, got {}", n);
        }
        let a = random_operand(&mut rng, n)?;
        let b = random_operand(&mut rng, n)?;

        let mut school = BigUint::with_capacity(2 * n);
        let mut kara = BigUint::with_capacity(2 * n);
        let mut mul_scratch = vec![0u8; mul_karatsuba_scratch_len(n, n)];
        let t_school = time(args.iters, || Ok(mul_schoolbook(&mut school, &a, &b)?))?;
        let t_kara = time(args.iters, || Ok(mul_karatsuba(&mut kara, &a, &b, &mut mul_scratch)?))?;
        if school != kara {
            bail!("multiplication paths disagree at {} digits", n);
        }

        // 2n-digit dividend over an n-digit divisor
        let divisor = random_operand(&mut rng, n)?;
        let mut div_scratch = vec![0u8; div_scratch_len(school.used(), n)];
        let (mut q1, mut r1) = (BigUint::with_capacity(n + 2), BigUint::with_capacity(n));
        let (mut q2, mut r2) = (BigUint::with_capacity(n + 2), BigUint::with_capacity(n));
        let t_div_school = time(args.iters, || {
            Ok(div_schoolbook(&mut q1, &mut r1, &school, &divisor, &mut div_scratch)?)
        })?;
        let t_div_rec = time(args.iters, || {
            Ok(div_rem(&mut q2, &mut r2, &school, &divisor, &mut div_scratch)?)
        })?;
        if q1 != q2 || r1 != r2 {
            bail!("division paths disagree at {} digits", n);
        }

        info!(digits = n, "paths agree");
        println!(
            "{:>6} {:>12?} {:>12?} {:>12?} {:>12?}",
            n, t_school, t_kara, t_div_school, t_div_rec
        );
    }
    Ok(())
}
