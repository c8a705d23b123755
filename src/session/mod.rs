//! Persisted session values: the bearer token and the signed-in user.

mod credentials;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

pub use credentials::SecureString;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

use serde::Serialize;

use crate::models::CurrentUser;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the signed-in user as JSON.
pub const USER_KEY: &str = "user";

/// Typed view over the persisted storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn file(path: PathBuf) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    /// The stored bearer token, if any.
    ///
    /// Unreadable storage is treated as "no token"; the request then goes out
    /// unauthenticated and the server decides.
    pub fn token(&self) -> Option<SecureString> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(SecureString::new(token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    pub fn store_token(&self, token: &SecureString) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token.expose())
    }

    pub fn store_user(&self, user: &CurrentUser) -> Result<(), StorageError> {
        let json = encode(USER_KEY, user)?;
        self.storage.set(USER_KEY, &json)
    }

    /// The stored user, if present and decodable.
    pub fn user(&self) -> Option<CurrentUser> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable stored user");
                None
            }
        }
    }

    /// Remove the token and the user.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use std::collections::HashMap;

    #[test]
    fn unencodable_value_is_an_error_not_an_empty_write() {
        // JSON object keys must be strings.
        let value: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let err = encode(USER_KEY, &value).unwrap_err();
        assert!(matches!(err, StorageError::Encode { ref key, .. } if key == USER_KEY));
    }

    #[test]
    fn stored_user_is_json() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        let user = CurrentUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            role: None,
            extra: Default::default(),
        };
        session.store_user(&user).unwrap();

        let raw = storage.get(USER_KEY).unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            serde_json::json!({"_id": "u1", "name": "Ada"})
        );
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "").unwrap();
        let session = Session::new(storage);
        assert!(session.token().is_none());
    }

    #[test]
    fn user_roundtrips_through_storage() {
        let session = Session::in_memory();
        let user = CurrentUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            role: Some(Role::Teacher),
            extra: Default::default(),
        };
        session.store_user(&user).unwrap();
        assert_eq!(session.user(), Some(user));

        session.clear().unwrap();
        assert_eq!(session.user(), None);
    }
}
