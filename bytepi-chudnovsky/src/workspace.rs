use bytepi_math::{div_scratch_len, sqrt_scratch_len, BigUint};

use crate::config::PiConfig;
use crate::constants::coefficient;
use crate::error::PiError;

/// Every value slot and the shared scratch region of one pi computation,
/// allocated once from the configuration and reused across phases.
///
/// Capacities are bounds for `W` fraction words: the series terms stay below
/// `256^W`, small factors take at most four digits each, and the final
/// quotient is close to `pi * 256^W`.
pub struct Workspace {
    pub(crate) words: usize,
    pub(crate) coefficient: BigUint,
    pub(crate) small: BigUint,
    pub(crate) a: BigUint,
    pub(crate) b: BigUint,
    pub(crate) term: BigUint,
    pub(crate) weighted: BigUint,
    pub(crate) numerator: BigUint,
    pub(crate) numerator_tmp: BigUint,
    pub(crate) divisor: BigUint,
    pub(crate) weighted_a: BigUint,
    pub(crate) weighted_b: BigUint,
    pub(crate) denominator: BigUint,
    pub(crate) radix_power: BigUint,
    pub(crate) radicand: BigUint,
    pub(crate) root: BigUint,
    pub(crate) sqrt_constant: BigUint,
    pub(crate) shifted: BigUint,
    pub(crate) pi: BigUint,
    pub(crate) scratch: Vec<u8>,
}

impl Workspace {
    pub fn new(config: &PiConfig) -> Result<Self, PiError> {
        config.validate()?;
        let w = config.fraction_words()?;

        // The radicand 10005 * 256^(2W) has exactly 2W + 2 digits.
        let scratch_len = div_scratch_len(w + 14, 7)
            .max(sqrt_scratch_len(2 * w + 2))
            .max(div_scratch_len(2 * w + 5, w + 1));

        Ok(Self {
            words: w,
            coefficient: coefficient()?,
            small: BigUint::with_capacity(8),
            a: BigUint::with_capacity(w + 2),
            b: BigUint::with_capacity(w + 8),
            term: BigUint::with_capacity(w + 2),
            weighted: BigUint::with_capacity(w + 6),
            numerator: BigUint::with_capacity(w + 14),
            numerator_tmp: BigUint::with_capacity(w + 14),
            divisor: BigUint::with_capacity(16),
            weighted_a: BigUint::with_capacity(w + 6),
            weighted_b: BigUint::with_capacity(w + 12),
            denominator: BigUint::with_capacity(w + 12),
            radix_power: BigUint::with_capacity(2 * w + 1),
            radicand: BigUint::with_capacity(2 * w + 3),
            root: BigUint::with_capacity(w + 2),
            sqrt_constant: BigUint::with_capacity(w + 5),
            shifted: BigUint::with_capacity(2 * w + 5),
            pi: BigUint::with_capacity(w + 8),
            scratch: vec![0; scratch_len],
        })
    }

    /// Base-256 fraction digits of working precision.
    pub fn words(&self) -> usize {
        self.words
    }

    /// `pi * 256^W` once [`crate::fixed_point_pi`] has run.
    pub fn pi(&self) -> &BigUint {
        &self.pi
    }

    pub fn into_pi(self) -> BigUint {
        self.pi
    }

    /// Total bytes held by all slots and the scratch region.
    pub fn footprint(&self) -> usize {
        let slots = [
            &self.coefficient,
            &self.small,
            &self.a,
            &self.b,
            &self.term,
            &self.weighted,
            &self.numerator,
            &self.numerator_tmp,
            &self.divisor,
            &self.weighted_a,
            &self.weighted_b,
            &self.denominator,
            &self.radix_power,
            &self.radicand,
            &self.root,
            &self.sqrt_constant,
            &self.shifted,
            &self.pi,
        ];
        slots.iter().map(|slot| slot.capacity()).sum::<usize>() + self.scratch.len()
    }
}
