//! API Integration Tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::util::ServiceExt;

use merchant_bank::store::AccountRepository;

mod common;

use common::{login, send, setup_test_app};

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let (_dir, _state, app) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_login_payment_logout_e2e() {
    let (_dir, state, app) = setup_test_app().await;

    // 1. Login
    let token = login(&app, "alice", "correct").await;

    // 2. Pay bob
    let (status, body) = send(
        &app,
        "POST",
        "/payment",
        Some(&token),
        Some(json!({ "recipient": "bob", "amount": 300 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "payment failed: {}", body);
    assert_eq!(body["message"], "Transfer success!");
    assert_eq!(body["transaction"]["activity"], "transfer_money");
    assert_eq!(body["transaction"]["sender"], "alice");
    assert_eq!(body["transaction"]["recipient"], "bob");
    assert_eq!(decimal(&body["transaction"]["amount"]), dec!(300));

    assert_eq!(state.accounts.get_balance("alice").await.unwrap().value(), dec!(700));
    assert_eq!(state.accounts.get_balance("bob").await.unwrap().value(), dec!(400));
    assert_eq!(state.activity.transfers().await.unwrap().len(), 1);

    // 3. Logout
    let (status, body) = send(&app, "DELETE", "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout success!");
    assert_eq!(decimal(&body["remaining_balance"]), dec!(700));

    // 4. Token is dead
    let (status, body) = send(
        &app,
        "POST",
        "/payment",
        Some(&token),
        Some(json!({ "recipient": "bob", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "invalid_token");

    let sessions = state.activity.session_events().await.unwrap();
    assert_eq!(sessions.len(), 2);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let (_dir, _state, app) = setup_test_app().await;

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "alice", "password": "nope" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "carol", "password": "correct" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error_code"], "invalid_credentials");
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let (_dir, _state, app) = setup_test_app().await;

    let (status, body) = send(&app, "POST", "/login", None, Some(json!({ "username": "alice" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_request");

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_requires_bearer_token() {
    let (_dir, _state, app) = setup_test_app().await;
    let payload = json!({ "recipient": "bob", "amount": 1 });

    let (status, body) = send(&app, "POST", "/payment", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "missing_authorization");

    let (status, body) = send(&app, "POST", "/payment", Some("not-a-jwt"), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "invalid_token");

    let request = Request::builder()
        .method("POST")
        .uri("/payment")
        .header("authorization", "Token abc")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_payment_rejections() {
    let (_dir, state, app) = setup_test_app().await;
    let token = login(&app, "alice", "correct").await;

    let cases = [
        (json!({ "recipient": "bob", "amount": 10000 }), "insufficient_balance"),
        (json!({ "recipient": "alice", "amount": 50 }), "same_account_transfer"),
        (json!({ "recipient": "bob", "amount": 0 }), "invalid_amount"),
        (json!({ "recipient": "bob", "amount": -5 }), "invalid_amount"),
        (json!({ "recipient": "carol", "amount": 5 }), "recipient_not_found"),
        (json!({ "recipient": "bob" }), "invalid_request"),
    ];

    for (payload, code) in cases {
        let (status, body) = send(&app, "POST", "/payment", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["error_code"], code);
    }

    assert_eq!(state.accounts.get_balance("alice").await.unwrap().value(), dec!(1000));
    assert_eq!(state.accounts.get_balance("bob").await.unwrap().value(), dec!(100));
    assert!(state.activity.transfers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fractional_amounts_from_strings() {
    let (_dir, state, app) = setup_test_app().await;
    let token = login(&app, "bob", "correct").await;

    let (status, _) = send(
        &app,
        "POST",
        "/payment",
        Some(&token),
        Some(json!({ "recipient": "alice", "amount": "0.25" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state.accounts.get_balance("bob").await.unwrap().value(), dec!(99.75));
    assert_eq!(state.accounts.get_balance("alice").await.unwrap().value(), dec!(1000.25));
}

#[tokio::test]
async fn test_persisted_layout() {
    let (dir, _state, app) = setup_test_app().await;
    let token = login(&app, "alice", "correct").await;
    send(
        &app,
        "POST",
        "/payment",
        Some(&token),
        Some(json!({ "recipient": "bob", "amount": 1 })),
    )
    .await;

    let users: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("users.json")).unwrap())
            .unwrap();
    let alice = users.iter().find(|u| u["username"] == "alice").unwrap();
    assert_eq!(alice["account_type"], "customer");
    assert_eq!(decimal(&alice["account_balance"]), dec!(999));
    assert!(alice["password"].as_str().unwrap().starts_with("$argon2"));

    let sessions: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("sessions.json")).unwrap())
            .unwrap();
    assert_eq!(sessions[0]["activity"], "logged_in");
    assert_eq!(sessions[0]["username"], "alice");
}

#[tokio::test]
async fn test_concurrent_payments_conserve_total() {
    let (_dir, state, app) = setup_test_app().await;
    let alice = login(&app, "alice", "correct").await;
    let bob = login(&app, "bob", "correct").await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        let (token, recipient) = if i % 2 == 0 {
            (alice.clone(), "bob")
        } else {
            (bob.clone(), "alice")
        };
        handles.push(tokio::spawn(async move {
            send(
                &app,
                "POST",
                "/payment",
                Some(&token),
                Some(json!({ "recipient": recipient, "amount": 15 })),
            )
            .await
            .0
        }));
    }

    let mut committed = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::OK {
            committed += 1;
        }
    }

    let total = state.accounts.get_balance("alice").await.unwrap().value()
        + state.accounts.get_balance("bob").await.unwrap().value();
    assert_eq!(total, dec!(1100));
    assert_eq!(state.activity.transfers().await.unwrap().len(), committed);
}
