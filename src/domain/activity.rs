//! Activity records
//!
//! Immutable facts appended to the activity log: session events
//! (login/logout) and committed transfers. Never mutated after creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

/// Session activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionActivity {
    LoggedIn,
    SignedOut,
}

/// A login or logout, as recorded in `sessions.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub activity: SessionActivity,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}

impl SessionEvent {
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self::now(SessionActivity::LoggedIn, username)
    }

    pub fn signed_out(username: impl Into<String>) -> Self {
        Self::now(SessionActivity::SignedOut, username)
    }

    fn now(activity: SessionActivity, username: impl Into<String>) -> Self {
        Self {
            activity,
            username: username.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Transfer activity kind. There is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferActivity {
    TransferMoney,
}

/// A committed transfer, as recorded in `transactions.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub activity: TransferActivity,
    pub transaction_id: Uuid,
    /// Sender login name
    pub sender: String,
    /// Recipient login name
    pub recipient: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    /// Build a record with a fresh transaction ID and server timestamp
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: &Amount) -> Self {
        Self {
            activity: TransferActivity::TransferMoney,
            transaction_id: Uuid::new_v4(),
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.value(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_event_serialization() {
        let event = SessionEvent::logged_in("alice");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["activity"], "logged_in");
        assert_eq!(json["username"], "alice");

        let event = SessionEvent::signed_out("alice");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["activity"], "signed_out");
    }

    #[test]
    fn test_transfer_record_has_unique_ids() {
        let amount = Amount::from_integer(300).unwrap();
        let first = TransferRecord::new("alice", "bob", &amount);
        let second = TransferRecord::new("alice", "bob", &amount);

        assert_ne!(first.transaction_id, second.transaction_id);

        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json["activity"], "transfer_money");
        assert_eq!(json["amount"], "300");
    }
}
