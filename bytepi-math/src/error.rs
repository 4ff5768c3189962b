use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BnError {
    /// A destination or scratch region holds fewer digits than the operation can write.
    #[error("Capacity violation: need {0} digits, have {1}")]
    CapacityViolation(usize, usize),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operand: {0}")]
    InvalidOperand(&'static str),
}

/// Fail with [`BnError::CapacityViolation`] unless `available >= needed`.
pub(crate) fn ensure_capacity(needed: usize, available: usize) -> Result<(), BnError> {
    if available < needed {
        return Err(BnError::CapacityViolation(needed, available));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_capacity() {
        assert!(ensure_capacity(4, 4).is_ok());
        assert_eq!(
            ensure_capacity(5, 4),
            Err(BnError::CapacityViolation(5, 4))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BnError::CapacityViolation(9, 3).to_string(),
            "Capacity violation: need 9 digits, have 3"
        );
        assert_eq!(BnError::DivisionByZero.to_string(), "Division by zero");
    }
}
