//! # Roster Accounts Crate
//!
//! Domain logic for the Roster account service: registration, credential
//! checks, token signing, and account CRUD. Persistence lives in
//! `roster-database`; this crate layers validation, password hashing, and
//! token handling on top of it.
//!
//! - **Services**: business logic (`AccountService` over a `UserStore`)
//! - **Types**: request types and `AccountError`
//! - **Utils**: password hashing, token signing, input validation

pub mod services;
pub mod types;
pub mod utils;

// Re-export database types the API layer works with.
pub use roster_database::{CreateUserRecord, User, UserChanges, UserRepository};

pub use services::{AccountService, UserStore};
pub use types::{
    errors::AccountError,
    requests::{RegisterRequest, UpdateAccountRequest},
    AccountResult,
};
pub use utils::token::{Claims, TokenSigner};
