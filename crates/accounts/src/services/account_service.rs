//! Account service: registration, credential checks, and account CRUD.

use roster_database::{CreateUserRecord, User, UserChanges, UserRepository, UserResult};
use sqlx::SqlitePool;

use super::mock_store::MockUserStore;
use crate::types::{AccountError, AccountResult, RegisterRequest, UpdateAccountRequest};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{validate_email, validate_name, validate_password};

/// Hard cap on list results.
const LIST_LIMIT: u32 = 100;

/// Service for managing accounts over a user store
pub struct AccountService<R> {
    store: R,
}

impl AccountService<UserRepository> {
    /// Create a service backed by the database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: UserRepository::new(pool),
        }
    }
}

impl AccountService<MockUserStore> {
    /// Create a service backed by the in-memory store, for tests
    pub fn new_for_testing() -> Self {
        Self {
            store: MockUserStore::new(),
        }
    }
}

impl<R> AccountService<R>
where
    R: UserStore,
{
    /// Register a new account.
    ///
    /// The email is lowercased before storage and lookup; registration
    /// conflicts on an email that is already taken.
    pub async fn register(&self, request: RegisterRequest) -> AccountResult<User> {
        let (Some(name), Some(email), Some(password)) =
            (request.name, request.email, request.password)
        else {
            return Err(AccountError::ValidationFailed(
                "Name, email and password are required.".to_string(),
            ));
        };

        let name = name.trim().to_string();
        let email = email.trim().to_lowercase();

        validate_name(&name)?;
        validate_email(&email)?;
        validate_password(&password)?;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&password)?;

        let record = CreateUserRecord {
            name,
            email,
            password_hash,
        };
        let user = self.store.create(&record).await?;

        tracing::info!(user = %user.public_id, email = %user.email, "registered new account");

        Ok(user)
    }

    /// Check credentials and return the matching user.
    ///
    /// Unknown emails and wrong passwords produce the same error so callers
    /// cannot probe which addresses are registered.
    pub async fn authenticate(&self, email: &str, password: &str) -> AccountResult<User> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.store.find_by_email(&email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get an account by public id
    pub async fn get_user(&self, public_id: &str) -> AccountResult<User> {
        self.store
            .find_by_public_id(public_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    /// List accounts, newest first, capped
    pub async fn list_users(&self) -> AccountResult<Vec<User>> {
        Ok(self.store.list_recent(LIST_LIMIT).await?)
    }

    /// Update an account's name, email, or password.
    ///
    /// Absent fields stay unchanged; a present password is re-hashed before
    /// it reaches the store.
    pub async fn update_user(
        &self,
        public_id: &str,
        request: UpdateAccountRequest,
    ) -> AccountResult<User> {
        let user = self.get_user(public_id).await?;

        if request.is_empty() {
            return Ok(user);
        }

        let mut changes = UserChanges::default();

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            validate_name(&name)?;
            changes.name = Some(name);
        }

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            validate_email(&email)?;
            if email != user.email && self.store.email_exists(&email).await? {
                return Err(AccountError::EmailAlreadyExists);
            }
            changes.email = Some(email);
        }

        if let Some(password) = request.password {
            validate_password(&password)?;
            changes.password_hash = Some(hash_password(&password)?);
        }

        let updated = self.store.update(user.id, &changes).await?;

        tracing::info!(user = %updated.public_id, "updated account");

        Ok(updated)
    }

    /// Delete an account permanently
    pub async fn delete_user(&self, public_id: &str) -> AccountResult<()> {
        let user = self.get_user(public_id).await?;

        self.store.delete(user.id).await?;

        tracing::warn!(user = %user.public_id, email = %user.email, "deleted account");

        Ok(())
    }
}

/// Trait for user stores to allow swapping the database repository for the
/// in-memory mock in tests
pub trait UserStore {
    async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
    async fn create(&self, record: &CreateUserRecord) -> UserResult<User>;
    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User>;
    async fn delete(&self, user_id: i64) -> UserResult<()>;
    async fn list_recent(&self, limit: u32) -> UserResult<Vec<User>>;
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}

impl UserStore for UserRepository {
    async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn create(&self, record: &CreateUserRecord) -> UserResult<User> {
        self.create(record).await
    }

    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        self.update(user_id, changes).await
    }

    async fn delete(&self, user_id: i64) -> UserResult<()> {
        self.delete(user_id).await
    }

    async fn list_recent(&self, limit: u32) -> UserResult<Vec<User>> {
        self.list_recent(limit).await
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        self.email_exists(email).await
    }
}

impl UserStore for MockUserStore {
    async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn create(&self, record: &CreateUserRecord) -> UserResult<User> {
        self.create(record).await
    }

    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        self.update(user_id, changes).await
    }

    async fn delete(&self, user_id: i64) -> UserResult<()> {
        self.delete(user_id).await
    }

    async fn list_recent(&self, limit: u32) -> UserResult<Vec<User>> {
        self.list_recent(limit).await
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        self.email_exists(email).await
    }
}
