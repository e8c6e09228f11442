//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agrisync::api::ApiClient;
use agrisync::config::ApiConfig;
use agrisync::session::{Session, SubscriptionTier, User};
use agrisync::storage::{KeyValueStorage, MemoryStorage, StorageError};
use agrisync::store::Store;
use serde_json::{json, Value};

use mock_backend::MockBackend;

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

pub fn store_with(base_url: &str, storage: Arc<dyn KeyValueStorage>) -> Store {
    let client = ApiClient::new(&api_config(base_url)).expect("client");
    Store::new(client, storage)
}

/// Store against the mock, backed by a fresh in-memory storage.
pub fn store_for(mock: &MockBackend) -> (Store, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = store_with(&mock.base_url(), Arc::new(storage.clone()));
    (store, storage)
}

/// In-memory storage whose writes and deletes can be switched to fail.
#[derive(Clone)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    fail_set: Arc<AtomicBool>,
    fail_remove: Arc<AtomicBool>,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            fail_set: Arc::new(AtomicBool::new(false)),
            fail_remove: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    fn denied(key: &str) -> StorageError {
        StorageError::Io {
            path: key.into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "storage is read-only"),
        }
    }
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(Self::denied(key));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Self::denied(key));
        }
        self.inner.remove(key)
    }
}

/// Store against the mock, backed by a [`FailingStorage`].
pub fn store_with_failing(mock: &MockBackend) -> (Store, FailingStorage) {
    let storage = FailingStorage::new();
    let store = store_with(&mock.base_url(), Arc::new(storage.clone()));
    (store, storage)
}

pub fn user() -> User {
    User {
        id: "u1".to_string(),
        name: "Amina Wanjiru".to_string(),
        email: "amina@example.com".to_string(),
        farm_name: "Green Hill".to_string(),
        subscription: SubscriptionTier::Basic,
    }
}

pub fn session() -> Session {
    Session::new(user(), "tok-abc").expect("session")
}

pub fn user_json() -> Value {
    json!({
        "_id": "u1",
        "name": "Amina Wanjiru",
        "email": "amina@example.com",
        "farmName": "Green Hill",
        "subscription": "basic"
    })
}

pub fn auth_json(token: &str) -> Value {
    json!({ "token": token, "user": user_json() })
}

pub fn animal_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "tagNumber": format!("TAG-{}", id),
        "name": name,
        "species": "cattle",
        "gender": "female",
        "status": "healthy"
    })
}

pub fn schedule_json(id: &str, title: &str, date: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "category": "feeding",
        "status": status,
        "priority": "high",
        "date": date
    })
}
