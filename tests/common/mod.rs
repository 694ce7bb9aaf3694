//! Common test utilities

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

use merchant_bank::auth::{CredentialService, RevocationList, DEFAULT_TOKEN_TTL};
use merchant_bank::domain::{AccountKind, Balance};
use merchant_bank::handlers::CreateAccountCommand;
use merchant_bank::{api, bootstrap, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A fresh data directory with two accounts: alice (1000) and bob (100),
/// both with password "correct". Keep the TempDir alive for the test.
pub async fn setup_test_app() -> (TempDir, AppState, Router) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let credentials = CredentialService::new(
        TEST_SECRET,
        DEFAULT_TOKEN_TTL,
        Arc::new(RevocationList::new()),
    )
    .expect("Failed to build credential service");
    let state = AppState::with_credentials(dir.path(), Arc::new(credentials));

    bootstrap::ensure_data_files(&state)
        .await
        .expect("Failed to create data files");

    let handler = state.create_account_handler();
    for (username, kind, balance) in [
        ("alice", AccountKind::Customer, 1000),
        ("bob", AccountKind::Merchant, 100),
    ] {
        let command = CreateAccountCommand::new(username, username, "correct", kind)
            .with_initial_balance(Balance::new(Decimal::from(balance)).unwrap());
        handler.execute(command).await.expect("Failed to seed account");
    }

    let app = api::build_router(state.clone());
    (dir, state, app)
}

/// Send a request and return status plus parsed JSON body (Null if empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}
