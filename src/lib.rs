//! # mini-bytepi
//!
//! Facade over the workspace crates: the radix-256 arithmetic engine
//! ([`math`]) and the Chudnovsky pi driver built on it ([`chudnovsky`]).

pub use bytepi_chudnovsky as chudnovsky;
pub use bytepi_math as math;

pub use bytepi_chudnovsky::{compute_pi, PiConfig, PiError};
pub use bytepi_math::{BigUint, BnError};
