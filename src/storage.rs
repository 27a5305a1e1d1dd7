//! Key-value storage the bearer token is read from.
//!
//! The token is written by whatever handles sign-in; folio only reads it.
//! Reads never fail: a missing or unreadable entry is simply absent, which
//! for the fetch client means "send the request without `Authorization`".

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{Error, Result};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// A string-to-string store shared across the process.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage. Gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    /// Storage pre-seeded with a token, mostly for tests and demos.
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        storage.write().insert(TOKEN_KEY.to_owned(), token.to_owned());
        storage
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write().remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object in one file.
///
/// The file is re-read on every [`get`](Storage::get), so a token written by
/// another process is picked up on the next request. Writes go to a sibling
/// temp file that is renamed over the original, so a reader sees either the
/// old contents or the new ones, never a truncated file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    lock: RwLock<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: RwLock::new(()) }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn load(&self) -> Result<HashMap<String, String>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => return Err(Error::Storage { path: self.path.clone(), source }),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    fn store(&self, entries: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_vec_pretty(entries)?;
        let storage_err = |source| Error::Storage { path: self.path.clone(), source };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(storage_err)?;
        tmp.write_all(&raw).map_err(storage_err)?;
        tmp.as_file().sync_all().map_err(storage_err)?;
        tmp.persist(&self.path).map_err(|e| storage_err(e.error))?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load()?;
        f(&mut entries);
        self.store(&entries)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storage unreadable, treating as empty");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
