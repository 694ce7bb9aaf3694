//! Credential Service
//!
//! Issues, validates and revokes HS256 bearer tokens, and wraps password
//! hashing for async callers.

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::AccountKind;

use super::{password, AuthError, RevocationList};

/// Default bearer token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Longest lifetime a token may be configured with
const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub account_type: AccountKind,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued at (seconds since epoch)
    pub iat: i64,
}

/// Token and password operations sharing one process-wide secret
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: ChronoDuration,
    revocations: Arc<RevocationList>,
}

impl CredentialService {
    /// Build the service. Fails on an empty secret or a lifetime outside
    /// (0, 24h].
    pub fn new(
        secret: &str,
        ttl: Duration,
        revocations: Arc<RevocationList>,
    ) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        if ttl.is_zero() || ttl > MAX_TOKEN_TTL {
            return Err(AuthError::InvalidTtl(ttl.as_secs()));
        }
        let ttl = ChronoDuration::from_std(ttl).map_err(|_| AuthError::InvalidTtl(ttl.as_secs()))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            revocations,
        })
    }

    pub fn revocations(&self) -> &Arc<RevocationList> {
        &self.revocations
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Issue a signed token for an authenticated account
    pub fn issue_token(&self, username: &str, account_type: AccountKind) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            account_type,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Validate a token.
    ///
    /// Revoked, badly signed and malformed tokens are `InvalidToken`; a
    /// correctly signed token past its expiry is `TokenExpired`.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        if self.revocations.is_revoked(token) {
            return Err(AuthError::InvalidToken);
        }

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            // The decoder only rejects once `exp` is strictly in the past
            Ok(data) if data.claims.exp <= Utc::now().timestamp() => Err(AuthError::TokenExpired),
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
                kind => {
                    tracing::debug!(reason = ?kind, "Token rejected");
                    Err(AuthError::InvalidToken)
                }
            },
        }
    }

    /// Revoke a token. Returns false if it was already revoked.
    pub fn revoke(&self, token: &str) -> bool {
        // Any token this service signed expires within one ttl from now.
        self.revocations.revoke(token, Utc::now() + self.ttl)
    }

    // =========================================================================
    // Passwords
    // =========================================================================

    /// Hash a password off the async runtime
    pub async fn hash(&self, plaintext: String) -> Result<String, AuthError> {
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    /// Verify a password off the async runtime
    pub async fn verify(&self, plaintext: String, digest: String) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &digest))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}
