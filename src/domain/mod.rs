//! Domain module
//!
//! Core domain types: money, accounts and activity records.

pub mod account;
pub mod activity;
pub mod amount;
pub mod error;

pub use account::{Account, AccountKind};
pub use activity::{SessionActivity, SessionEvent, TransferActivity, TransferRecord};
pub use amount::{Amount, AmountError, Balance};
pub use error::DomainError;
