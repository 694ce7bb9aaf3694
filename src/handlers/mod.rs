//! Command Handlers module
//!
//! Handlers that orchestrate the multi-step operations over the stores and
//! the credential service.

mod account_handler;
mod commands;
mod error;
mod session_handler;
mod transfer_handler;


pub use account_handler::CreateAccountHandler;
pub use commands::*;
pub use error::{CreateAccountError, SessionError, TransferError};
pub use session_handler::SessionHandler;
pub use transfer_handler::TransferHandler;
