//! Store module
//!
//! Durable state behind two seams: the account store and the activity log.
//! Both are backed by whole-file JSON collections; swapping in an indexed
//! store only means another implementation of these traits.

mod accounts;
mod activity;
mod collection;
mod error;

use async_trait::async_trait;

use crate::domain::{Account, Balance, SessionEvent, TransferRecord};

pub use accounts::JsonAccountStore;
pub use activity::JsonActivityLog;
pub use collection::JsonCollection;
pub use error::StoreError;

/// Accounts collection file name
pub const USERS_FILE: &str = "users.json";
/// Session events collection file name
pub const SESSIONS_FILE: &str = "sessions.json";
/// Transfer records collection file name
pub const TRANSACTIONS_FILE: &str = "transactions.json";

/// Account lookup and balance updates.
///
/// Every call is one serialized read-modify-write over the whole store, so
/// two updates never interleave, even for different accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by login name
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Replace one account's balance
    async fn update_balance(&self, username: &str, new_balance: Balance) -> Result<(), StoreError>;

    /// Current balance of an account
    async fn get_balance(&self, username: &str) -> Result<Balance, StoreError> {
        self.find(username)
            .await?
            .map(|account| account.balance())
            .ok_or_else(|| StoreError::AccountNotFound(username.to_string()))
    }
}

/// Append-only activity trail
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append_session_event(&self, event: SessionEvent) -> Result<(), StoreError>;

    async fn append_transfer(&self, record: TransferRecord) -> Result<(), StoreError>;
}
