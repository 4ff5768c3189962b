use std::cmp::Ordering;
use std::fmt;

use crate::error::{ensure_capacity, BnError};

/// Byte buffer a [`BigUint`] can live in: `Vec<u8>`, arrays, or borrowed slices.
pub trait DigitStorage: AsRef<[u8]> + AsMut<[u8]> {}

impl<T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> DigitStorage for T {}

/// Arbitrary-precision unsigned integer in radix 256.
///
/// Digits are stored least significant first. The storage length is the
/// capacity and never changes; `used` counts the significant digits and is
/// kept canonical (at least 1, top digit nonzero unless the value is zero).
/// Digits at or above `used` are unspecified.
#[derive(Clone)]
pub struct BigUint<S = Vec<u8>> {
    storage: S,
    used: usize,
}

/// Number of significant digits in `digits`, at least 1.
pub(crate) fn significant_len(digits: &[u8]) -> usize {
    digits.iter().rposition(|&d| d != 0).map_or(1, |top| top + 1)
}

/// Orders two trimmed digit slices by value.
pub(crate) fn cmp_digits(a: &[u8], b: &[u8]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

impl BigUint<Vec<u8>> {
    /// Zero value with `capacity` digits of owned storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity.max(1)],
            used: 1,
        }
    }
}

impl<S: AsRef<[u8]>> BigUint<S> {
    /// The significant digits, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.storage.as_ref()[..self.used]
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    pub fn is_zero(&self) -> bool {
        self.used == 1 && self.storage.as_ref()[0] == 0
    }

    /// Digit-for-digit equality with another value.
    pub fn is_equal<T: AsRef<[u8]>>(&self, other: &BigUint<T>) -> bool {
        self.digits() == other.digits()
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.used > 8 {
            return None;
        }
        Some(
            self.digits()
                .iter()
                .rev()
                .fold(0u64, |acc, &d| (acc << 8) | u64::from(d)),
        )
    }

    /// Digits most significant first, as accepted by [`BigUint::from_be_digits`].
    pub fn to_be_digits(&self) -> Vec<u8> {
        self.digits().iter().rev().copied().collect()
    }
}

impl<S: DigitStorage> BigUint<S> {
    pub fn zero(storage: S) -> Result<Self, BnError> {
        let mut value = Self { storage, used: 1 };
        ensure_capacity(1, value.capacity())?;
        value.set_zero();
        Ok(value)
    }

    pub fn from_u32(storage: S, value: u32) -> Result<Self, BnError> {
        Self::from_u64(storage, u64::from(value))
    }

    pub fn from_u64(storage: S, value: u64) -> Result<Self, BnError> {
        let mut result = Self::zero(storage)?;
        result.set_u64(value)?;
        Ok(result)
    }

    /// Builds a value from digits given most significant first.
    pub fn from_be_digits(storage: S, digits: &[u8]) -> Result<Self, BnError> {
        if digits.is_empty() {
            return Err(BnError::InvalidOperand("empty digit sequence"));
        }
        let skip = digits.iter().take_while(|&&d| d == 0).count();
        let digits = if skip == digits.len() {
            &digits[digits.len() - 1..]
        } else {
            &digits[skip..]
        };

        let mut result = Self { storage, used: 1 };
        ensure_capacity(digits.len(), result.capacity())?;
        let dst = &mut result.storage.as_mut()[..digits.len()];
        for (d, &s) in dst.iter_mut().zip(digits.iter().rev()) {
            *d = s;
        }
        result.used = digits.len();
        Ok(result)
    }

    /// The value `256^power`.
    pub fn power_of_radix(storage: S, power: usize) -> Result<Self, BnError> {
        let mut result = Self::zero(storage)?;
        result.set_power_of_radix(power)?;
        Ok(result)
    }

    pub fn set_zero(&mut self) {
        self.storage.as_mut()[0] = 0;
        self.used = 1;
    }

    pub fn set_u64(&mut self, value: u64) -> Result<(), BnError> {
        let bytes = value.to_le_bytes();
        let len = significant_len(&bytes);
        ensure_capacity(len, self.capacity())?;
        self.storage.as_mut()[..len].copy_from_slice(&bytes[..len]);
        self.used = len;
        Ok(())
    }

    pub fn set_power_of_radix(&mut self, power: usize) -> Result<(), BnError> {
        ensure_capacity(power + 1, self.capacity())?;
        let digits = &mut self.storage.as_mut()[..=power];
        digits.fill(0);
        digits[power] = 1;
        self.used = power + 1;
        Ok(())
    }

    /// Copies `other` into this value's storage.
    pub fn assign<T: AsRef<[u8]>>(&mut self, other: &BigUint<T>) -> Result<(), BnError> {
        let src = other.digits();
        ensure_capacity(src.len(), self.capacity())?;
        self.storage.as_mut()[..src.len()].copy_from_slice(src);
        self.used = src.len();
        Ok(())
    }

    /// Recomputes `used` by dropping zero digits from the top.
    pub fn trim(&mut self) {
        self.used = significant_len(&self.storage.as_ref()[..self.used]);
    }

    /// Keeps only the low `len` digits, i.e. reduces the value modulo `256^len`.
    pub fn truncate(&mut self, len: usize) {
        if len == 0 {
            self.set_zero();
        } else if len < self.used {
            self.used = len;
            self.trim();
        }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut()
    }

    /// Marks the first `len` storage digits as the value and trims.
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len >= 1 && len <= self.capacity());
        self.used = len;
        self.trim();
    }
}

impl<A: AsRef<[u8]>, B: AsRef<[u8]>> PartialEq<BigUint<B>> for BigUint<A> {
    fn eq(&self, other: &BigUint<B>) -> bool {
        self.is_equal(other)
    }
}

impl<S: AsRef<[u8]>> Eq for BigUint<S> {}

impl<A: AsRef<[u8]>, B: AsRef<[u8]>> PartialOrd<BigUint<B>> for BigUint<A> {
    fn partial_cmp(&self, other: &BigUint<B>) -> Option<Ordering> {
        Some(cmp_digits(self.digits(), other.digits()))
    }
}

impl<S: AsRef<[u8]>> Ord for BigUint<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_digits(self.digits(), other.digits())
    }
}

impl<S: AsRef<[u8]>> fmt::UpperHex for BigUint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = self.digits().iter().rev();
        if let Some(top) = digits.next() {
            write!(f, "{:X}", top)?;
        }
        for d in digits {
            write!(f, "{:02X}", d)?;
        }
        Ok(())
    }
}

impl<S: AsRef<[u8]>> fmt::Debug for BigUint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigUint(0x{:X})", self)
    }
}
