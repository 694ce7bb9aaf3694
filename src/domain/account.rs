//! Account record
//!
//! An account holder: identity, login credentials, kind and balance.
//! The balance only changes through the transfer handler's update path.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Balance;

/// Account kind. Informational only; transfer rules do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Payer-only account
    Customer,
    /// Receivable account
    Merchant,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Customer => "customer",
            AccountKind::Merchant => "merchant",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted account.
///
/// Field names follow the stored `users.json` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable unique account ID
    id: Uuid,

    /// Display name
    name: String,

    /// Login name (unique)
    username: String,

    /// Password digest (PHC string)
    #[serde(rename = "password")]
    password_hash: String,

    account_type: AccountKind,

    #[serde(rename = "account_balance")]
    balance: Balance,
}

impl Account {
    /// Open a new account with a freshly generated ID
    pub fn open(
        name: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        account_type: AccountKind,
        balance: Balance,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            account_type,
            balance,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn account_type(&self) -> AccountKind {
        self.account_type
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub(crate) fn set_balance(&mut self, balance: Balance) {
        self.balance = balance;
    }
}
