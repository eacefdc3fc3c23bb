//! Business logic services.

pub mod account_service;
pub mod mock_store;

pub use account_service::{AccountService, UserStore};
pub use mock_store::MockUserStore;
