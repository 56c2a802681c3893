use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{Getters, Setters};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::fs::{config_dir, data_dir};

const FILE_NAME: &str = "core.toml";

/// Storage key used when the configuration doesn't name one.
pub const DEFAULT_STORAGE_KEY: &str = "code-journal-data";

/// Handle to backend's core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The backend's core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(default)]
pub struct CoreConfig {
    /// Key the entry collection is stored under
    #[getset(get = "pub", set = "pub")]
    storage_key: String,
    /// Overrides the XDG data directory
    #[getset(set = "pub")]
    data_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Load the configuration from the XDG config directory, writing out the defaults if the
    /// file doesn't exist yet.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(FILE_NAME)),
            Err(e) => {
                warn!("No configuration directory, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Load the configuration at `path`. A missing file is created with the defaults and an
    /// unreadable one falls back to them.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                    warn!("Ignoring invalid configuration {}: {e}", path.display());
                    Self::default()
                }),
                Err(e) => {
                    warn!("Failed to read {}: {e}", path.display());
                    Self::default()
                }
            }
        } else {
            let cfg = Self::default();
            if let Err(e) = cfg.save_to(path) {
                warn!("Failed to write default configuration: {e}");
            }
            cfg
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, contents).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Directory the file backed storage keeps its values in.
    pub fn data_dir(&self) -> io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_creates_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path);

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let mut cfg = CoreConfig::default();
        cfg.set_storage_key("my-journal".into())
            .set_data_dir(Some(dir.path().join("data")));
        cfg.save_to(&path).unwrap();

        let loaded = CoreConfig::load_from(&path);

        assert_eq!(loaded.storage_key(), "my-journal");
        assert_eq!(loaded.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "storage_key = [not toml").unwrap();

        assert_eq!(CoreConfig::load_from(&path), CoreConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "data_dir = \"/tmp/journal\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path);

        assert_eq!(cfg.storage_key(), DEFAULT_STORAGE_KEY);
    }
}
