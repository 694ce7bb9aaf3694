//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    middleware,
    routing::{delete, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TransferRecord;
use crate::error::AppError;
use crate::handlers::{LoginCommand, TransferCommand};
use crate::state::AppState;

use super::middleware::{bearer_auth_middleware, AuthenticatedUser};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub recipient: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub message: String,
    pub transaction: TransferRecord,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub remaining_balance: Decimal,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/payment", post(payment))
        .route("/logout", delete(logout))
        .layer(middleware::from_fn_with_state(state, bearer_auth_middleware));

    Router::new().route("/login", post(login)).merge(protected)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

// =========================================================================
// Handlers
// =========================================================================

/// POST /login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginCommand>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let command = json_body(payload)?;
    if command.username.is_empty() || command.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "username and password are required".to_string(),
        ));
    }

    let token = state.sessions.login(command).await?;

    Ok(Json(LoginResponse { token }))
}

/// POST /payment
async fn payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, AppError> {
    let request = json_body(payload)?;
    if request.recipient.is_empty() {
        return Err(AppError::InvalidRequest("recipient is required".to_string()));
    }

    let command = TransferCommand::new(user.username, request.recipient, request.amount);
    let transaction = state.transfers.spawn(command).await?;

    Ok(Json(PaymentResponse {
        message: "Transfer success!".to_string(),
        transaction,
    }))
}

/// DELETE /logout
async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<LogoutResponse>, AppError> {
    let remaining = state.sessions.logout(&user.token).await?;

    Ok(Json(LogoutResponse {
        message: "Logout success!".to_string(),
        remaining_balance: remaining.value(),
    }))
}
