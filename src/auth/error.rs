//! Auth Errors

/// Errors from credential handling
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Revoked, badly signed, or malformed token
    #[error("Invalid token")]
    InvalidToken,

    /// Correctly signed but past its expiry
    #[error("Token has expired")]
    TokenExpired,

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime out of range: {0}s")]
    InvalidTtl(u64),
}
