use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::UserRecord;

/// Keys are namespaced so the session never collides with unrelated
/// application state sharing the same origin.
pub const ACCESS_TOKEN_KEY: &str = "gatehouse.access_token";
pub const CURRENT_USER_KEY: &str = "gatehouse.current_user";

/// The durable (token, user) pair denoting an authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("failed to read '{0}' from storage")]
    Read(String),
    #[error("failed to write '{0}' to storage")]
    Write(String),
    #[error("failed to remove '{0}' from storage")]
    Remove(String),
    #[error("failed to serialize user record: {0}")]
    Serialize(String),
}

/// Raw key/value storage. The browser build goes through localStorage;
/// tests substitute an in-memory map.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

/// Durable mirror of the current session. All storage reads and writes for
/// session state go through here, so the layout lives in one place.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    /// Store backed by the browser origin's localStorage.
    pub fn local() -> Self {
        Self::with_backend(Rc::new(LocalStorage))
    }

    pub fn with_backend(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Writes the session as two independent entries. If the second write
    /// fails the first is restored to its prior value, so a failed save
    /// leaves the previously stored session untouched and never a mixed
    /// pair.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;
        let prior_token = self.backend.get(ACCESS_TOKEN_KEY).ok().flatten();
        self.backend.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        if let Err(err) = self.backend.set(CURRENT_USER_KEY, &user_json) {
            let restored = match prior_token.as_deref() {
                Some(value) => self.backend.set(ACCESS_TOKEN_KEY, value).is_ok(),
                None => self.backend.remove(ACCESS_TOKEN_KEY).is_ok(),
            };
            if !restored {
                // The new token cannot be paired with the old user record;
                // an empty store is the only remaining consistent state.
                let _ = self.backend.remove(ACCESS_TOKEN_KEY);
                let _ = self.backend.remove(CURRENT_USER_KEY);
            }
            return Err(err);
        }
        Ok(())
    }

    /// A missing field or malformed user JSON degrades to `None`, never to
    /// a partially authenticated session.
    pub fn load(&self) -> Option<Session> {
        let access_token = self.backend.get(ACCESS_TOKEN_KEY).ok().flatten()?;
        let raw_user = self.backend.get(CURRENT_USER_KEY).ok().flatten()?;
        let user: UserRecord = serde_json::from_str(&raw_user).ok()?;
        Some(Session { access_token, user })
    }

    /// Removes both entries. Clearing an already-empty store is a no-op.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(ACCESS_TOKEN_KEY)?;
        self.backend.remove(CURRENT_USER_KEY)
    }
}
