//! Atomic JSON document files.
//!
//! Each document is read whole and overwritten whole: the new content goes
//! to a temp file in the same directory, is fsynced, then renamed over the
//! target. Locked writes hold an exclusive `fs2` lock on a sibling `.lock`
//! file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

use rigforge_core::RigForgeError;

/// Errors that can occur during atomic JSON operations.
#[derive(Error, Debug)]
pub enum AtomicJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicJsonError> for RigForgeError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Json(e) => e.into(),
            other => RigForgeError::io(other.to_string()),
        }
    }
}

impl AtomicJsonError {
    /// True when the document exists but cannot be parsed.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// A handle to a JSON document written atomically.
#[derive(Debug)]
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for AtomicJsonFile<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> AtomicJsonFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Overwrites the document atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Overwrites the document while holding an exclusive lock, so two
    /// processes never interleave their renames.
    pub fn save_locked(&self, data: &T) -> Result<(), AtomicJsonError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.save(data)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            )
        })?;
        let file_name = self.path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
        })?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock guard; the lock file is removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicJsonError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("counter.json"));

        file.save(&Counter {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.count, 42);
    }

    #[test]
    fn test_load_missing_or_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        let file = AtomicJsonFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AtomicJsonFile::<Counter>::new(path).load().unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_save_locked_releases_lock() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("nested/counter.json"));

        for count in [1, 2] {
            file.save_locked(&Counter {
                name: "locked".to_string(),
                count,
            })
            .unwrap();
        }

        assert_eq!(file.load().unwrap().unwrap().count, 2);
        assert!(!temp_dir.path().join("nested/counter.lock").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicJsonFile::<Vec<u32>>::new(path.clone());

        file.save(&vec![1, 2, 3]).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join(".doc.json.tmp").exists());
    }
}
