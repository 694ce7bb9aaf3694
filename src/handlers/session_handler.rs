//! Session Handler
//!
//! Login and logout. Recording the session event is best-effort: a failed
//! append is logged and never fails the login or logout itself.

use std::sync::Arc;

use crate::auth::{AuthError, CredentialService};
use crate::domain::{Balance, SessionEvent};
use crate::store::{AccountRepository, ActivityRepository};

use super::{LoginCommand, SessionError};

/// Handler for login/logout
pub struct SessionHandler {
    accounts: Arc<dyn AccountRepository>,
    activity: Arc<dyn ActivityRepository>,
    credentials: Arc<CredentialService>,
}

impl SessionHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        activity: Arc<dyn ActivityRepository>,
        credentials: Arc<CredentialService>,
    ) -> Self {
        Self {
            accounts,
            activity,
            credentials,
        }
    }

    /// Authenticate and issue a bearer token
    pub async fn login(&self, command: LoginCommand) -> Result<String, SessionError> {
        let account = self
            .accounts
            .find(&command.username)
            .await
            .map_err(|source| SessionError::AccountLookup {
                username: command.username.clone(),
                source,
            })?
            .ok_or_else(|| SessionError::UserNotFound(command.username.clone()))?;

        let matches = self
            .credentials
            .verify(command.password, account.password_hash().to_string())
            .await?;
        if !matches {
            return Err(SessionError::InvalidPassword(command.username));
        }

        let token = self
            .credentials
            .issue_token(account.username(), account.account_type())?;

        self.record(SessionEvent::logged_in(account.username())).await;
        tracing::info!(username = %account.username(), "Logged in");

        Ok(token)
    }

    /// Revoke a bearer token and report the account's current balance.
    ///
    /// The token stays revoked even if the balance lookup fails.
    pub async fn logout(&self, token: &str) -> Result<Balance, SessionError> {
        let claims = self.credentials.validate(token)?;

        // Two logouts racing on one token: only the first revocation counts
        if !self.credentials.revoke(token) {
            return Err(AuthError::InvalidToken.into());
        }
        self.record(SessionEvent::signed_out(&claims.username)).await;
        tracing::info!(username = %claims.username, "Logged out");

        self.accounts
            .get_balance(&claims.username)
            .await
            .map_err(|source| SessionError::BalanceLookup {
                username: claims.username,
                source,
            })
    }

    async fn record(&self, event: SessionEvent) {
        let activity = event.activity;
        let username = event.username.clone();
        if let Err(e) = self.activity.append_session_event(event).await {
            tracing::warn!(
                username = %username,
                activity = ?activity,
                error = %e,
                "Failed to record session activity"
            );
        }
    }
}
