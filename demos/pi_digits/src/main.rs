use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use bytepi_chudnovsky::{fixed_point_pi, DigitStream, PiConfig, Workspace, DEFAULT_GUARD_DIGITS};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print decimal digits of pi (Chudnovsky series, radix-256 fixed point)")]
struct Args {
    /// Number of decimal digits to print, counting the leading 3
    #[arg(long, default_value_t = 100)]
    digits: usize,

    /// Extra digits of working precision
    #[arg(long, default_value_t = DEFAULT_GUARD_DIGITS)]
    guard_digits: usize,

    /// Split output into groups of this many digits (0 prints one line)
    #[arg(long, default_value_t = 0)]
    group: usize,

    /// JSON config file ({"digits": N, "guard_digits": P}); overrides the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match args.config.as_ref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            PiConfig::from_json(&text).context("parse config")?
        }
        None => PiConfig::new(args.digits).with_guard_digits(args.guard_digits),
    };
    config.validate().context("invalid configuration")?;

    let mut ws = Workspace::new(&config).context("allocate workspace")?;
    info!(
        digits = config.digits,
        guard_digits = config.guard_digits,
        words = ws.words(),
        footprint_bytes = ws.footprint(),
        "computing pi"
    );

    let start = Instant::now();
    fixed_point_pi(&mut ws).context("compute pi")?;
    let words = ws.words();
    let digits: String = DigitStream::new(ws.into_pi(), words)?
        .take(config.digits)
        .map(|d| char::from(b'0' + d))
        .collect();
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "done");

    if args.group == 0 {
        println!("{}", digits);
    } else {
        for chunk in digits.as_bytes().chunks(args.group) {
            println!("{}", String::from_utf8_lossy(chunk));
        }
    }
    Ok(())
}
