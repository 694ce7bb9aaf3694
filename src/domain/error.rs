//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Expected, caller-fixable outcomes of a transfer request.
///
/// These are returned as typed results, never logged as failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid amount (zero, negative, or exceeds limit)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transfer to the same account
    #[error("Sender and recipient cannot be the same")]
    SameAccountTransfer,

    #[error("Sender not found: {0}")]
    SenderNotFound(String),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    /// Crediting the recipient would push their balance past the maximum
    #[error("Recipient balance limit reached: {0}")]
    RecipientBalanceLimit(String),

    /// Insufficient balance for debit operation
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Decimal, available: Decimal },
}

impl DomainError {
    /// Create an insufficient balance error
    pub fn insufficient_balance(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientBalance { required, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_error() {
        let err = DomainError::insufficient_balance(dec!(10000), dec!(1000));

        assert!(err.to_string().contains("10000"));
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_balance_limit_names_recipient() {
        let err = DomainError::RecipientBalanceLimit("bob".into());
        assert!(err.to_string().contains("bob"));
        assert!(!err.to_string().contains("Invalid amount"));
    }
}
