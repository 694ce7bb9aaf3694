//! Command definitions
//!
//! Commands represent intentions to change the system state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountKind, Balance};

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to open a new account
#[derive(Clone)]
pub struct CreateAccountCommand {
    pub name: String,
    pub username: String,
    /// Plaintext; hashed before it is stored
    pub password: String,
    pub account_type: AccountKind,
    pub initial_balance: Balance,
}

impl CreateAccountCommand {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        account_type: AccountKind,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            account_type,
            initial_balance: Balance::zero(),
        }
    }

    pub fn with_initial_balance(mut self, balance: Balance) -> Self {
        self.initial_balance = balance;
        self
    }
}

impl std::fmt::Debug for CreateAccountCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountCommand")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("account_type", &self.account_type)
            .field("initial_balance", &self.initial_balance)
            .finish()
    }
}

/// Result of a successful account creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountResult {
    pub account_id: Uuid,
    pub username: String,
}

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move money from the authenticated sender to a recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Sender login name, taken from the validated bearer token
    pub sender: String,
    /// Recipient login name
    pub recipient: String,
    /// Unvalidated amount; must be > 0
    pub amount: Decimal,
}

impl TransferCommand {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: Decimal) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

// =========================================================================
// LoginCommand
// =========================================================================

/// Credentials presented at login
#[derive(Clone, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
