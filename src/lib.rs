//! merchant_bank Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod domain;
pub mod handlers;
pub mod jobs;
pub mod state;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use domain::{Amount, AmountError, Balance, DomainError};
pub use error::AppError;
pub use state::AppState;
