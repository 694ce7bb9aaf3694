//! Account Creation Handler
//!
//! Opens accounts with hashed credentials.

use std::sync::Arc;

use crate::auth::CredentialService;
use crate::domain::Account;
use crate::store::JsonAccountStore;

use super::{CreateAccountCommand, CreateAccountError, CreateAccountResult};

/// Handler for account creation
pub struct CreateAccountHandler {
    accounts: Arc<JsonAccountStore>,
    credentials: Arc<CredentialService>,
}

impl CreateAccountHandler {
    pub fn new(accounts: Arc<JsonAccountStore>, credentials: Arc<CredentialService>) -> Self {
        Self {
            accounts,
            credentials,
        }
    }

    /// Execute the create account command
    pub async fn execute(
        &self,
        command: CreateAccountCommand,
    ) -> Result<CreateAccountResult, CreateAccountError> {
        if command.username.trim().is_empty() {
            return Err(CreateAccountError::Invalid("username is required".to_string()));
        }
        if command.password.is_empty() {
            return Err(CreateAccountError::Invalid("password is required".to_string()));
        }

        let password_hash = self.credentials.hash(command.password).await?;
        let account = Account::open(
            command.name,
            command.username,
            password_hash,
            command.account_type,
            command.initial_balance,
        );
        let result = CreateAccountResult {
            account_id: account.id(),
            username: account.username().to_string(),
        };

        self.accounts.create(account).await?;

        tracing::info!(
            account_id = %result.account_id,
            username = %result.username,
            "Account created"
        );

        Ok(result)
    }
}
