//! Error types for account operations.

use roster_database::UserError;
use thiserror::Error;

/// Account-related errors. Display strings double as API error messages.
#[derive(Debug, Error, Clone)]
pub enum AccountError {
    #[error("User not found.")]
    UserNotFound,

    #[error("Email already in use.")]
    EmailAlreadyExists,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token creation failed: {0}")]
    TokenCreationFailed(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<UserError> for AccountError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => AccountError::UserNotFound,
            UserError::EmailAlreadyExists => AccountError::EmailAlreadyExists,
            UserError::DatabaseError(message) => AccountError::Database(message),
        }
    }
}
