//! # bytepi-chudnovsky
//!
//! Decimal digits of pi by the Chudnovsky series, computed in fixed point
//! over the radix-256 engine in `bytepi-math`.
//!
//! The pipeline:
//! - [`series::accumulate`]: alternating sums `a` and `b` until a term truncates to zero
//! - [`series::denominator`]: `13591409 a - 545140134 b`
//! - [`constants::sqrt_constant`]: `426880 sqrt(10005)` scaled by `256^W`
//! - [`fixed_point_pi`]: the final quotient, `pi * 256^W`
//! - [`DigitStream`]: decimal digits by repeated multiplication by ten
//!
//! All values live in one [`Workspace`] allocated up front from a [`PiConfig`].

pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod series;
pub mod stream;
pub mod workspace;

pub use config::{PiConfig, DEFAULT_GUARD_DIGITS};
pub use error::PiError;
pub use pipeline::{compute_pi, fixed_point_pi};
pub use stream::DigitStream;
pub use workspace::Workspace;
