//! User repository for database operations.

use crate::entities::{CreateUserRecord, User, UserChanges};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str =
    "id, public_id, name, email, password_hash, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(row_to_user))
    }

    /// Find user by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(row_to_user))
    }

    /// Find user by email. Callers lowercase the email before lookup.
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(row_to_user))
    }

    /// Create new user
    pub async fn create(&self, record: &CreateUserRecord) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::cuid();

        let result = sqlx::query(
            "INSERT INTO users (public_id, name, email, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&public_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id).await?.ok_or_else(|| {
            UserError::DatabaseError("Failed to retrieve created user".to_string())
        })
    }

    /// Update user fields; untouched fields stay as they are.
    pub async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        if changes.is_empty() {
            return self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound);
        }

        let now = Utc::now().to_rfc3339();

        let mut query_parts = Vec::new();
        let mut values = Vec::new();

        if let Some(ref name) = changes.name {
            query_parts.push("name = ?");
            values.push(name.clone());
        }

        if let Some(ref email) = changes.email {
            query_parts.push("email = ?");
            values.push(email.clone());
        }

        if let Some(ref password_hash) = changes.password_hash {
            query_parts.push("password_hash = ?");
            values.push(password_hash.clone());
        }

        query_parts.push("updated_at = ?");
        values.push(now);

        let set_clause = query_parts.join(", ");
        let query_str = format!("UPDATE users SET {set_clause} WHERE id = ?");

        let mut query = sqlx::query(&query_str);
        for value in values {
            query = query.bind(value);
        }
        query = query.bind(user_id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound)
    }

    /// Delete user. Removal is permanent.
    pub async fn delete(&self, id: i64) -> UserResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        Ok(())
    }

    /// List the most recently created users, newest first.
    pub async fn list_recent(&self, limit: u32) -> UserResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    /// Check if email exists
    pub async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0) > 0)
    }

    /// Get user count
    pub async fn count(&self) -> UserResult<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }
}

fn row_to_user(row: sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        public_id: row.get("public_id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_unique_violation(e: sqlx::Error) -> UserError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed") && message.contains("email") {
        UserError::EmailAlreadyExists
    } else {
        UserError::DatabaseError(message)
    }
}
