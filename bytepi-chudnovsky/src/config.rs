use serde::{Deserialize, Serialize};

use crate::error::PiError;

/// Extra decimal digits computed beyond the requested count.
pub const DEFAULT_GUARD_DIGITS: usize = 10;

fn default_guard_digits() -> usize {
    DEFAULT_GUARD_DIGITS
}

/// What to compute: how many decimal digits of pi, and how much slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiConfig {
    /// Decimal digits to emit, counting the leading 3
    pub digits: usize,
    /// Additional digits of working precision absorbing truncation error
    #[serde(default = "default_guard_digits")]
    pub guard_digits: usize,
}

impl PiConfig {
    pub fn new(digits: usize) -> Self {
        Self {
            digits,
            guard_digits: DEFAULT_GUARD_DIGITS,
        }
    }

    pub fn with_guard_digits(mut self, guard_digits: usize) -> Self {
        self.guard_digits = guard_digits;
        self
    }

    /// Parses and validates a JSON config such as `{"digits": 1000}`.
    pub fn from_json(text: &str) -> Result<Self, PiError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PiError> {
        if self.digits == 0 {
            return Err(PiError::InvalidConfig("digits must be positive".into()));
        }
        self.fraction_words().map(|_| ())
    }

    /// Base-256 fraction digits of working precision.
    ///
    /// One decimal digit needs log2(10) < 10/3 bits, so
    /// `(10 * (digits + guard) / 3) / 8 + 1` words cover the request.
    pub fn fraction_words(&self) -> Result<usize, PiError> {
        self.digits
            .checked_add(self.guard_digits)
            .and_then(|total| total.checked_mul(10))
            .map(|bits| bits / 3 / 8 + 1)
            .ok_or_else(|| PiError::InvalidConfig("digit count too large".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_words() {
        assert_eq!(PiConfig::new(10).fraction_words().unwrap(), 9);
        assert_eq!(PiConfig::new(50).fraction_words().unwrap(), 26);
        assert_eq!(
            PiConfig::new(1000).with_guard_digits(0).fraction_words().unwrap(),
            417
        );
    }

    #[test]
    fn test_zero_digits_rejected() {
        assert!(matches!(
            PiConfig::new(0).validate(),
            Err(PiError::InvalidConfig(_))
        ));
        assert!(PiConfig::new(usize::MAX).validate().is_err());
    }

    #[test]
    fn test_json_defaults_guard_digits() {
        let config = PiConfig::from_json(r#"{"digits": 42}"#).unwrap();
        assert_eq!(config, PiConfig::new(42));

        let config = PiConfig::from_json(r#"{"digits": 7, "guard_digits": 3}"#).unwrap();
        assert_eq!(config.guard_digits, 3);

        assert!(matches!(
            PiConfig::from_json(r#"{"digits": "many"}"#),
            Err(PiError::ParseError(_))
        ));
        assert!(matches!(
            PiConfig::from_json(r#"{"digits": 0}"#),
            Err(PiError::InvalidConfig(_))
        ));
    }
}
