//! In-memory store implementation for testing service logic without a
//! database.

use roster_database::{CreateUserRecord, User, UserChanges, UserError, UserResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock user store backed by hash maps
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<RwLock<i64>>,
    email_index: Arc<RwLock<HashMap<String, i64>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn find_by_id(&self, user_id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.public_id == public_id).cloned())
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        // Lock order is always users before email_index.
        let users = self.users.read().await;
        let email_index = self.email_index.read().await;
        Ok(email_index
            .get(email)
            .and_then(|user_id| users.get(user_id))
            .cloned())
    }

    pub async fn create(&self, record: &CreateUserRecord) -> UserResult<User> {
        {
            let email_index = self.email_index.read().await;
            if email_index.contains_key(&record.email) {
                return Err(UserError::EmailAlreadyExists);
            }
        }

        let mut next_id = self.next_id.write().await;
        let user_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let user = User {
            id: user_id,
            public_id: format!("user_{user_id}"),
            name: record.name.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut users = self.users.write().await;
        users.insert(user_id, user.clone());

        let mut email_index = self.email_index.write().await;
        email_index.insert(record.email.clone(), user_id);

        Ok(user)
    }

    pub async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        if let Some(ref email) = changes.email {
            let email_index = self.email_index.read().await;
            if let Some(owner) = email_index.get(email) {
                if *owner != user_id {
                    return Err(UserError::EmailAlreadyExists);
                }
            }
        }

        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Err(UserError::UserNotFound);
        };

        if let Some(ref email) = changes.email {
            if *email != user.email {
                let mut email_index = self.email_index.write().await;
                email_index.remove(&user.email);
                email_index.insert(email.clone(), user_id);
                user.email = email.clone();
            }
        }

        if let Some(ref name) = changes.name {
            user.name = name.clone();
        }
        if let Some(ref password_hash) = changes.password_hash {
            user.password_hash = password_hash.clone();
        }

        user.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(user.clone())
    }

    pub async fn delete(&self, user_id: i64) -> UserResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.remove(&user_id) {
            let mut email_index = self.email_index.write().await;
            email_index.remove(&user.email);
            Ok(())
        } else {
            Err(UserError::UserNotFound)
        }
    }

    pub async fn list_recent(&self, limit: u32) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut results: Vec<User> = users.values().cloned().collect();
        // Created-at ties are broken by id, matching the repository's ordering.
        results.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        results.truncate(limit as usize);
        Ok(results)
    }

    pub async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let email_index = self.email_index.read().await;
        Ok(email_index.contains_key(email))
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}
