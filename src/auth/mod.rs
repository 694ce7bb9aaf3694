//! Auth module
//!
//! Password hashing, bearer token issue/validation, and token revocation.

mod error;
pub mod password;
mod revocation;
mod service;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use revocation::RevocationList;
pub use service::{Claims, CredentialService, DEFAULT_TOKEN_TTL};
