use std::sync::Arc;

use roster_accounts::{AccountService, TokenSigner, User, UserRepository};
use roster_config::AuthConfig;
use sqlx::SqlitePool;

use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    accounts: Arc<AccountService<UserRepository>>,
    signer: TokenSigner,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: &AuthConfig) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(pool)),
            signer: TokenSigner::from_config(auth),
        }
    }

    pub fn accounts(&self) -> &AccountService<UserRepository> {
        &self.accounts
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Resolve a bearer token to the user it names.
    ///
    /// A valid signature whose subject no longer exists (deleted account)
    /// is treated the same as a bad token.
    pub async fn authenticate(&self, token: &str) -> Result<User, ApiError> {
        let claims = self.signer.verify(token).map_err(ApiError::from)?;

        self.accounts
            .get_user(&claims.sub)
            .await
            .map_err(|_| ApiError::unauthorized("Invalid or expired token."))
    }
}
