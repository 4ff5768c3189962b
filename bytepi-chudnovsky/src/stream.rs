use bytepi_math::{mul_by_ten, BigUint, DigitStorage};

use crate::error::PiError;

/// Decimal digits of a fixed-point value `x / 256^W`.
///
/// Yields the integer part first, then one fractional digit per step by
/// multiplying the remaining fraction by ten. The integer part must be below
/// ten.
pub struct DigitStream<S = Vec<u8>> {
    value: BigUint<S>,
    words: usize,
}

impl<S: DigitStorage> DigitStream<S> {
    pub fn new(value: BigUint<S>, words: usize) -> Result<Self, PiError> {
        if value.capacity() <= words {
            return Err(PiError::InvalidConfig(format!(
                "digit stream needs {} digits of room, value has {}",
                words + 1,
                value.capacity()
            )));
        }
        if value.used() > words + 1 || value.digits().get(words).is_some_and(|&d| d >= 10) {
            return Err(PiError::InvalidConfig("integer part must be a single decimal digit".into()));
        }
        Ok(Self { value, words })
    }
}

impl<S: DigitStorage> Iterator for DigitStream<S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let digit = self.value.digits().get(self.words).copied().unwrap_or(0);
        self.value.truncate(self.words);
        // The fraction has at most `words` digits, so the room checked in
        // `new` always holds the product.
        mul_by_ten(&mut self.value).ok()?;
        Some(digit)
    }
}
