//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::handlers::{SessionError, TransferError};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Invalid authorization header")]
    InvalidAuthorizationHeader,

    /// Unknown username or wrong password; deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    // Server errors (5xx)
    #[error(transparent)]
    Transfer(TransferError),

    #[error(transparent)]
    Session(SessionError),
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Rejected(domain) => AppError::Domain(domain),
            other => AppError::Transfer(other),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        if err.is_invalid_credentials() {
            tracing::info!(reason = %err, "Login rejected");
            return AppError::InvalidCredentials;
        }
        match err {
            SessionError::Auth(auth) => AppError::from(auth),
            other => AppError::Session(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 401 Unauthorized
            AppError::MissingAuthorization => {
                (StatusCode::UNAUTHORIZED, "missing_authorization", None)
            }
            AppError::InvalidAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "invalid_authorization_header", None)
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }

            // Domain errors - all caller-fixable
            AppError::Domain(domain_err) => {
                use crate::domain::DomainError;
                match domain_err {
                    DomainError::InvalidAmount(msg) => {
                        (StatusCode::BAD_REQUEST, "invalid_amount", Some(msg.clone()))
                    }
                    DomainError::SameAccountTransfer => {
                        (StatusCode::BAD_REQUEST, "same_account_transfer", None)
                    }
                    DomainError::SenderNotFound(name) => {
                        (StatusCode::BAD_REQUEST, "sender_not_found", Some(name.clone()))
                    }
                    DomainError::RecipientNotFound(name) => {
                        (StatusCode::BAD_REQUEST, "recipient_not_found", Some(name.clone()))
                    }
                    DomainError::RecipientBalanceLimit(name) => {
                        (StatusCode::BAD_REQUEST, "recipient_balance_limit", Some(name.clone()))
                    }
                    DomainError::InsufficientBalance { .. } => {
                        (StatusCode::BAD_REQUEST, "insufficient_balance", Some(domain_err.to_string()))
                    }
                }
            }

            AppError::Auth(auth_err) => match auth_err {
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired", None),
                e => {
                    tracing::error!("Credential error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "credential_error", None)
                }
            },

            // 500 Internal Server Error
            AppError::Transfer(e) => {
                match e {
                    TransferError::CompensationFailed { .. } => {
                        tracing::error!(error = %e, "Transfer left balances inconsistent");
                    }
                    _ => tracing::error!(error = %e, "Transfer failed"),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "transfer_failed", None)
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "session_error", None)
            }
        };

        // Server-side detail stays in the log
        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
