//! Startup preparation
//!
//! Makes sure the data files exist and optionally seeds demo accounts.

use rust_decimal::Decimal;

use crate::domain::{AccountKind, Balance};
use crate::handlers::{CreateAccountCommand, CreateAccountError};
use crate::state::AppState;
use crate::store::StoreError;

/// Demo accounts: (name, username, password, kind, balance)
const DEMO_ACCOUNTS: &[(&str, &str, &str, AccountKind, i64)] = &[
    ("John Doe", "johndoe", "password123", AccountKind::Customer, 1000),
    ("Jane Smith", "janesmith", "password456", AccountKind::Merchant, 100),
    ("Peter Jones", "peterjones", "password789", AccountKind::Customer, 0),
];

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to seed account: {0}")]
    Seed(#[from] CreateAccountError),
}

/// Create the data directory and the three collection files if missing
pub async fn ensure_data_files(state: &AppState) -> Result<(), BootstrapError> {
    state.accounts.ensure_exists().await?;
    state.activity.ensure_exists().await?;
    Ok(())
}

/// Seed demo accounts into an empty users file.
/// Returns the number of accounts created.
pub async fn seed_demo_accounts(state: &AppState) -> Result<usize, BootstrapError> {
    if !state.accounts.load_all().await?.is_empty() {
        tracing::debug!("Accounts present, skipping demo seed");
        return Ok(0);
    }

    let handler = state.create_account_handler();
    for (name, username, password, kind, balance) in DEMO_ACCOUNTS {
        let balance = Balance::new(Decimal::from(*balance))
            .map_err(|e| CreateAccountError::Invalid(e.to_string()))?;
        let command =
            CreateAccountCommand::new(*name, *username, *password, *kind).with_initial_balance(balance);
        handler.execute(command).await?;
    }

    tracing::info!(count = DEMO_ACCOUNTS.len(), "Seeded demo accounts");
    Ok(DEMO_ACCOUNTS.len())
}
