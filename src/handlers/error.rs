//! Handler Errors
//!
//! Failures of the multi-step operations. Expected outcomes wrap
//! [`DomainError`]; everything else is a storage or signing failure that
//! carries the identities involved.

use uuid::Uuid;

use crate::auth::AuthError;
use crate::domain::DomainError;
use crate::store::StoreError;

/// Errors from a transfer
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Rejected before anything was written
    #[error(transparent)]
    Rejected(#[from] DomainError),

    /// Reading the accounts failed before anything was written
    #[error("Failed to look up transfer accounts: {0}")]
    Lookup(#[source] StoreError),

    /// Step A failed; nothing to undo
    #[error("Failed to update sender's balance ({sender}): {source}")]
    SenderUpdateFailed {
        sender: String,
        #[source]
        source: StoreError,
    },

    /// Step B failed; the sender's debit was reverted
    #[error("Failed to update recipient's balance ({recipient}): {source}")]
    RecipientUpdateFailed {
        recipient: String,
        #[source]
        source: StoreError,
    },

    /// Step C failed; both balances were reverted
    #[error("Failed to record transaction {transaction_id}: {source}")]
    TransferRecordingFailed {
        transaction_id: Uuid,
        #[source]
        source: StoreError,
    },

    /// A step failed and so did undoing it. Balances need operator attention.
    #[error("Compensation failed after [{original}]: {secondary}")]
    CompensationFailed {
        original: Box<TransferError>,
        secondary: StoreError,
    },

    /// The transfer task itself died
    #[error("Transfer task failed: {0}")]
    Aborted(String),
}

impl TransferError {
    /// Whether the caller caused this (4xx) rather than the server (5xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, TransferError::Rejected(_))
    }
}

/// Errors from login and logout
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Unknown login name. Reported to callers exactly like `InvalidPassword`.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid password for {0}")]
    InvalidPassword(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to look up account {username}: {source}")]
    AccountLookup {
        username: String,
        #[source]
        source: StoreError,
    },

    /// Token already revoked; only the balance read failed
    #[error("Logged out {username} but failed to read balance: {source}")]
    BalanceLookup {
        username: String,
        #[source]
        source: StoreError,
    },
}

impl SessionError {
    /// Bad username or password, whichever it was
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(
            self,
            SessionError::UserNotFound(_) | SessionError::InvalidPassword(_)
        )
    }
}

/// Errors from opening an account
#[derive(Debug, thiserror::Error)]
pub enum CreateAccountError {
    #[error("Invalid account: {0}")]
    Invalid(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
