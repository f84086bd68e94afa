//! Client session.
//!
//! The session is an ordinary value handed to whatever needs it. Its token and
//! user id are mirrored into a key-value [`SessionStorage`] so that a restart
//! picks them up again; a missing token means logged out.

mod sqlite;

pub use sqlite::*;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::ClientError;
use crate::models::UserId;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "id";

/// Key-value persistence for session values.
#[allow(async_fn_in_trait)]
pub trait SessionStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, ClientError>;
    async fn store(&self, key: &str, value: &str) -> Result<(), ClientError>;
    async fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// In-process storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn store(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Proof of login: sent as `X-Authorization` on authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: UserId,
    pub token: String,
}

/// The logged-in user, if any, backed by persistent storage.
#[derive(Debug)]
pub struct Session<S> {
    storage: S,
    credentials: Option<Credentials>,
}

impl<S: SessionStorage> Session<S> {
    /// Read the stored token and user id. Both must be present and the id must
    /// parse, otherwise the session starts logged out.
    pub async fn restore(storage: S) -> Result<Self, ClientError> {
        let token = load_value(&storage, TOKEN_KEY).await?;
        let user_id = load_value(&storage, USER_ID_KEY).await?;

        let credentials = match (token, user_id) {
            (Some(token), Some(id)) if !token.is_empty() => match id.parse() {
                Ok(user_id) => Some(Credentials { user_id, token }),
                Err(_) => {
                    tracing::warn!("Ignoring stored session with malformed user id {:?}", id);
                    None
                }
            },
            _ => None,
        };

        if let Some(creds) = &credentials {
            tracing::debug!("Restored session for user {}", creds.user_id);
        }

        Ok(Self {
            storage,
            credentials,
        })
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Credentials for an operation that needs a login.
    pub fn require(&self) -> Result<&Credentials, ClientError> {
        self.credentials.as_ref().ok_or(ClientError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn is_user(&self, user_id: UserId) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|c| c.user_id == user_id)
    }

    /// Persist new credentials and switch to them.
    pub async fn login(&mut self, credentials: Credentials) -> Result<(), ClientError> {
        store_value(&self.storage, USER_ID_KEY, &credentials.user_id.to_string()).await?;
        store_value(&self.storage, TOKEN_KEY, &credentials.token).await?;
        tracing::info!("Logged in as user {}", credentials.user_id);
        self.credentials = Some(credentials);
        Ok(())
    }

    /// Forget the credentials and clear both stored keys.
    pub async fn clear(&mut self) -> Result<(), ClientError> {
        self.credentials = None;
        self.storage.remove(USER_ID_KEY).await?;
        self.storage.remove(TOKEN_KEY).await?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

// Values are stored JSON-encoded, the format the browser client used.
async fn load_value<S: SessionStorage>(storage: &S, key: &str) -> Result<Option<String>, ClientError> {
    let Some(raw) = storage.load(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str::<Option<String>>(&raw) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Some(raw)),
    }
}

async fn store_value<S: SessionStorage>(storage: &S, key: &str, value: &str) -> Result<(), ClientError> {
    let encoded = serde_json::to_string(value)?;
    storage.store(key, &encoded).await
}
