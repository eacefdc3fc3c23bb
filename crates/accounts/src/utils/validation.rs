//! Input validation utilities.

use regex::Regex;

use crate::types::AccountError;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), AccountError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| AccountError::ValidationFailed("Invalid email regex".to_string()))?;

    if !email_regex.is_match(email) {
        return Err(AccountError::ValidationFailed(
            "Invalid email format.".to_string(),
        ));
    }

    if email.len() > 255 {
        return Err(AccountError::ValidationFailed(
            "Email too long (max 255 characters).".to_string(),
        ));
    }

    Ok(())
}

/// Validate password requirements
pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.is_empty() {
        return Err(AccountError::ValidationFailed(
            "Password cannot be empty.".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AccountError::ValidationFailed(
            "Password too long (max 128 characters).".to_string(),
        ));
    }

    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), AccountError> {
    if name.trim().is_empty() {
        return Err(AccountError::ValidationFailed(
            "Name cannot be empty.".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(AccountError::ValidationFailed(
            "Name too long (max 100 characters).".to_string(),
        ));
    }

    Ok(())
}
