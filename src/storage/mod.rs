//! Durable key-value storage for the persisted slice.
//!
//! The store only ever persists one key (see [`crate::session::ROOT_KEY`]);
//! the trait stays key-generic so the file backend and the in-memory test
//! backend are interchangeable.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Minimal synchronous key-value contract.
///
/// Values are opaque strings; serialization is the caller's concern.
pub trait KeyValueStorage: Send + Sync {
    /// Read a key. Missing keys are `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys map to file names, so they are restricted to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
