//! Account store backed by `users.json`

use async_trait::async_trait;
use std::path::Path;

use crate::domain::{Account, Balance};

use super::{AccountRepository, JsonCollection, StoreError, USERS_FILE};

#[derive(Debug)]
pub struct JsonAccountStore {
    accounts: JsonCollection<Account>,
}

impl JsonAccountStore {
    /// Open the store inside a data directory
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        Self {
            accounts: JsonCollection::new(data_dir.as_ref().join(USERS_FILE)),
        }
    }

    pub async fn ensure_exists(&self) -> Result<bool, StoreError> {
        self.accounts.ensure_exists().await
    }

    /// Load every account
    pub async fn load_all(&self) -> Result<Vec<Account>, StoreError> {
        self.accounts.load().await
    }

    /// Add a new account. Login names must be unique.
    pub async fn create(&self, account: Account) -> Result<(), StoreError> {
        self.accounts
            .modify(move |accounts| {
                if accounts.iter().any(|a| a.username() == account.username()) {
                    return Err(StoreError::DuplicateUsername(account.username().to_string()));
                }
                accounts.push(account);
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl AccountRepository for JsonAccountStore {
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.load().await?;
        Ok(accounts.into_iter().find(|a| a.username() == username))
    }

    async fn update_balance(&self, username: &str, new_balance: Balance) -> Result<(), StoreError> {
        self.accounts
            .modify(|accounts| {
                let account = accounts
                    .iter_mut()
                    .find(|a| a.username() == username)
                    .ok_or_else(|| StoreError::AccountNotFound(username.to_string()))?;
                account.set_balance(new_balance);
                Ok(())
            })
            .await?;

        tracing::debug!(username = %username, balance = %new_balance, "Balance updated");
        Ok(())
    }
}
