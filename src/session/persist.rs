//! Durable copy of the auth slice.
//!
//! Only `auth.session` is written; `loading` and `error` are transient and
//! come back as defaults on rehydration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::Session;
use crate::storage::{KeyValueStorage, StorageError};

/// Single storage key holding the persisted state tree.
pub const ROOT_KEY: &str = "root";

/// `{ "auth": { "session": ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRoot {
    #[serde(default)]
    pub auth: PersistedAuth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    #[serde(default)]
    pub session: Option<Session>,
}

#[derive(Clone)]
pub struct SessionPersistence {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionPersistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Read the persisted session.
    ///
    /// A malformed entry is logged and removed so the next start is clean.
    /// Storage I/O failures propagate.
    pub fn load(&self) -> Result<Option<Session>, StorageError> {
        let Some(raw) = self.storage.get(ROOT_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<PersistedRoot>(&raw) {
            Ok(root) => Ok(root.auth.session),
            Err(e) => {
                tracing::warn!(error = %e, key = ROOT_KEY, "Discarding malformed persisted state");
                self.storage.remove(ROOT_KEY)?;
                Ok(None)
            }
        }
    }

    /// Write the session; `None` removes the key entirely.
    pub fn save(&self, session: Option<&Session>) -> Result<(), StorageError> {
        let Some(session) = session else {
            return self.clear();
        };
        let root = PersistedRoot {
            auth: PersistedAuth {
                session: Some(session.clone()),
            },
        };
        let json = serde_json::to_string(&root)?;
        self.storage.set(ROOT_KEY, &json)?;
        tracing::debug!(user_id = %session.user_id(), "Persisted session");
        Ok(())
    }

    /// Remove the persisted session.
    ///
    /// When the key cannot be removed it is overwritten with an empty tree,
    /// which rehydrates as signed out. The removal error is returned only if
    /// that write fails as well.
    pub fn clear(&self) -> Result<(), StorageError> {
        if let Err(e) = self.storage.remove(ROOT_KEY) {
            tracing::warn!(error = %e, key = ROOT_KEY, "Could not remove persisted session, overwriting it");
            let json = serde_json::to_string(&PersistedRoot::default())?;
            self.storage.set(ROOT_KEY, &json).map_err(|_| e)?;
        }
        tracing::debug!("Cleared persisted session");
        Ok(())
    }
}
