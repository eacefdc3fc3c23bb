//! Shared types for the accounts crate.

pub mod errors;
pub mod requests;

pub use errors::AccountError;
pub use requests::{RegisterRequest, UpdateAccountRequest};

/// Result alias for account operations
pub type AccountResult<T> = Result<T, AccountError>;
