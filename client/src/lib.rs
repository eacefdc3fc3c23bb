//! Client-side authentication context for the Roster API.
//!
//! [`AuthContext`] wraps a `reqwest` client and a file-backed
//! [`SessionStore`]. A successful login persists the `{ token, user }`
//! session to disk; later invocations restore it from there, so the CLI
//! behaves like a browser tab that kept its stored session.

use std::path::{Path, PathBuf};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SESSION_FILE: &str = "roster_session.json";
pub const SESSION_FILE_ENV: &str = "ROSTER_SESSION_FILE";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),
    #[error("not logged in")]
    NotLoggedIn,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// A user profile as the API serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A persisted login: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Account,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Stores the current session as a small JSON file.
///
/// A missing or unreadable file simply means there is no session, the
/// same way an empty `localStorage` slot does.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the store path from `ROSTER_SESSION_FILE`, falling back to
    /// `roster_session.json` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. Missing or corrupt files yield `None`.
    pub fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                debug!(?error, path = %self.path.display(), "discarding unreadable session file");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        let raw = serde_json::to_string_pretty(session)
            .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Remove the session file. Already-absent files are not an error.
    pub fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Authentication context: issues API calls and keeps the session store
/// in sync with login/logout.
pub struct AuthContext {
    client: Client,
    base_url: String,
    store: SessionStore,
}

impl AuthContext {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            store,
        }
    }

    /// The user from the stored session, if any.
    pub fn current_user(&self) -> Option<Account> {
        self.store.load().map(|session| session.user)
    }

    pub fn session(&self) -> Option<Session> {
        self.store.load()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<Account> {
        let response = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let envelope: UserEnvelope = parse(response).await?;
        Ok(envelope.user)
    }

    /// Log in and persist the returned session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Account> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let session: Session = parse(response).await?;
        self.store.save(&session)?;
        Ok(session.user)
    }

    /// Log out: acknowledge with the server, then drop the local session.
    ///
    /// A failed request leaves the stored session in place, matching a
    /// context that only clears its state after the logout call resolves.
    pub async fn logout(&self) -> ClientResult<String> {
        let response = self
            .client
            .post(format!("{}/api/auth/logout", self.base_url))
            .send()
            .await?;

        let envelope: MessageEnvelope = parse(response).await?;
        self.store.clear()?;
        Ok(envelope.message)
    }

    pub async fn whoami(&self) -> ClientResult<Account> {
        let request = self.authorized(Method::GET, "/api/users/me")?;
        let envelope: UserEnvelope = parse(request.send().await?).await?;
        Ok(envelope.user)
    }

    pub async fn list_users(&self) -> ClientResult<Vec<Account>> {
        let response = self
            .client
            .get(format!("{}/api/users", self.base_url))
            .send()
            .await?;

        let envelope: UsersEnvelope = parse(response).await?;
        Ok(envelope.users)
    }

    pub async fn get_user(&self, id: &str) -> ClientResult<Account> {
        let response = self
            .client
            .get(format!("{}/api/users/{id}", self.base_url))
            .send()
            .await?;

        let envelope: UserEnvelope = parse(response).await?;
        Ok(envelope.user)
    }

    pub async fn update_user(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> ClientResult<Account> {
        let request = self
            .authorized(Method::PUT, &format!("/api/users/{id}"))?
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }));

        let envelope: UserEnvelope = parse(request.send().await?).await?;
        Ok(envelope.user)
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<String> {
        let request = self.authorized(Method::DELETE, &format!("/api/users/{id}"))?;
        let envelope: MessageEnvelope = parse(request.send().await?).await?;
        Ok(envelope.message)
    }

    fn authorized(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let session = self.store.load().ok_or(ClientError::NotLoggedIn)?;
        Ok(self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(session.token))
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.error,
        Err(_) => format!("request failed with status {status}"),
    };
    Err(ClientError::Api { status, message })
}
