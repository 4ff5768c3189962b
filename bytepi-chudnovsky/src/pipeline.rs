use std::time::Instant;

use bytepi_math::{div, shift_left_words};
use tracing::{debug, info_span};

use crate::config::PiConfig;
use crate::constants::sqrt_constant;
use crate::error::PiError;
use crate::series::{accumulate, denominator};
use crate::stream::DigitStream;
use crate::workspace::Workspace;

/// Runs every phase into `ws`, leaving `pi * 256^W` in the `pi` slot.
pub fn fixed_point_pi(ws: &mut Workspace) -> Result<(), PiError> {
    let _span = info_span!("pi", words = ws.words).entered();

    let start = Instant::now();
    let terms = accumulate(ws)?;
    denominator(ws)?;
    debug!(terms, elapsed_ms = start.elapsed().as_millis() as u64, "series done");

    let start = Instant::now();
    sqrt_constant(ws)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "sqrt constant done");

    let start = Instant::now();
    shift_left_words(&mut ws.shifted, &ws.sqrt_constant, ws.words)?;
    div(&mut ws.pi, &ws.shifted, &ws.denominator, &mut ws.scratch)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "final division done");
    Ok(())
}

/// The first `config.digits` decimal digits of pi, starting with the 3.
pub fn compute_pi(config: &PiConfig) -> Result<String, PiError> {
    let mut ws = Workspace::new(config)?;
    fixed_point_pi(&mut ws)?;
    let words = ws.words();
    let digits = DigitStream::new(ws.into_pi(), words)?
        .take(config.digits)
        .map(|d| char::from(b'0' + d))
        .collect();
    Ok(digits)
}
