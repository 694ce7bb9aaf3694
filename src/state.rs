//! Shared application state
//!
//! Wires the stores, credential service and handlers together once at
//! startup; cloned into every request.

use std::path::Path;
use std::sync::Arc;

use crate::auth::{AuthError, CredentialService, RevocationList};
use crate::config::Config;
use crate::handlers::{CreateAccountHandler, SessionHandler, TransferHandler};
use crate::store::{JsonAccountStore, JsonActivityLog};

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub transfers: Arc<TransferHandler>,
    pub sessions: Arc<SessionHandler>,
    pub accounts: Arc<JsonAccountStore>,
    pub activity: Arc<JsonActivityLog>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AuthError> {
        let credentials = CredentialService::new(
            &config.jwt_secret,
            config.token_ttl,
            Arc::new(RevocationList::new()),
        )?;
        Ok(Self::with_credentials(&config.data_dir, Arc::new(credentials)))
    }

    pub fn with_credentials(data_dir: &Path, credentials: Arc<CredentialService>) -> Self {
        let accounts = Arc::new(JsonAccountStore::open(data_dir));
        let activity = Arc::new(JsonActivityLog::open(data_dir));

        let transfers = Arc::new(TransferHandler::new(accounts.clone(), activity.clone()));
        let sessions = Arc::new(SessionHandler::new(
            accounts.clone(),
            activity.clone(),
            credentials.clone(),
        ));

        Self {
            credentials,
            transfers,
            sessions,
            accounts,
            activity,
        }
    }

    /// Handler for opening accounts (bootstrap and tests)
    pub fn create_account_handler(&self) -> CreateAccountHandler {
        CreateAccountHandler::new(self.accounts.clone(), self.credentials.clone())
    }
}
