//! Key-value persistence.
//!
//! Entries are kept the way a browser keeps local storage: string values under
//! string keys. [`FileStorage`] maps each key to a JSON file on disk and
//! [`MemoryStorage`] keeps everything in a map for tests and throwaway sessions.

use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
    sync::Arc,
};

use derive_more::Deref;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::trace;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("{path} does not hold text")]
    NotText { path: PathBuf },
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A string-keyed store of string values.
pub trait KeyValueStorage: Debug + Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Moves the value under `from` to `to` byte for byte, replacing whatever `to` held.
    /// Moving a key that isn't present is not an error.
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;
}

/// Shared handle to a storage backend.
#[derive(Debug, Clone, Deref)]
pub struct Storage {
    #[deref]
    backend: Arc<RwLock<Box<dyn KeyValueStorage>>>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStorage + 'static) -> Self {
        Self {
            backend: Arc::new(RwLock::new(Box::new(backend))),
        }
    }

    /// Storage backed by one file per key inside `dir`.
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(dir))
    }

    /// Storage that lives only as long as the handle.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }
}

/// Keeps every key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::Io { path, source }),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::NotText { path })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write next to the target and rename so a crash never leaves a half written value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| Error::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        trace!("Wrote {} bytes to {}", value.len(), path.display());

        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from = self.path(from)?;
        let to = self.path(to)?;

        match fs::rename(&from, &to) {
            Ok(()) => {
                trace!("Moved {} to {}", from.display(), to.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io { path: from, source }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.values.insert(key.into(), value.into());
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        validate_key(from)?;
        validate_key(to)?;

        if let Some(value) = self.values.remove(from) {
            self.values.insert(to.into(), value);
        }

        Ok(())
    }
}

/// Keys double as file names, so they are limited to a conservative character set.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.into()))
    }
}
