//! Internal utilities: password hashing, token signing, validation.

pub mod password;
pub mod token;
pub mod validation;
