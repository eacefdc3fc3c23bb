//! Database entities.

pub mod user;

pub use user::{CreateUserRecord, User, UserChanges};
