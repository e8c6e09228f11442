//! File-backed storage: one JSON document per key.
//!
//! Writes go to a temporary sibling and are renamed into place while holding
//! an exclusive `fs2` lock, so a crash mid-write leaves the previous value
//! intact.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{validate_key, KeyValueStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn lock(&self, key: &str) -> Result<File, StorageError> {
        let lock_path = self.dir.join(format!("{}.lock", key));
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Self::io_error(&lock_path, e))?;
        file.lock_exclusive().map_err(|e| StorageError::Lock {
            path: lock_path,
            source: e,
        })?;
        Ok(file)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let lock = self.lock(key)?;

        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        let mut tmp = File::create(&tmp_path).map_err(|e| Self::io_error(&tmp_path, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.sync_all())
            .map_err(|e| Self::io_error(&tmp_path, e))?;
        drop(tmp);

        fs::rename(&tmp_path, &path).map_err(|e| Self::io_error(&path, e))?;

        if let Err(e) = FileExt::unlock(&lock) {
            tracing::debug!(key = %key, error = %e, "Explicit unlock failed, lock released on drop");
        }
        tracing::debug!(key = %key, path = %path.display(), "Persisted key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key = %key, "Removed persisted key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
