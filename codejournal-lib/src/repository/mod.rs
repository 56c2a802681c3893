use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::{
    repository::{
        config::{Cfg, CoreConfig},
        entries::EntryStore,
    },
    storage::{self, Storage},
};

pub mod config;
mod entries;

pub use entries::{Entry, EntryId, UnsavedEntry};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::Error),
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Entry identifiers have run out")]
    IdsExhausted,
    #[error("No data directory available: {0}")]
    DataDir(#[source] std::io::Error),
}

/// Central access point for all persistent data.
///
/// The [`Repository`] owns the storage backend and the core configuration, and is the only way
/// entries get read or written.
#[derive(Clone, Debug)]
pub struct Repository {
    entries: EntryStore,
    cfg: Cfg,
}

impl Repository {
    /// Open the repository described by the on-disk configuration.
    pub fn new() -> Result<Self> {
        let cfg = CoreConfig::load();
        let dir = cfg.data_dir().map_err(Error::DataDir)?;

        debug!("Opening journal in {}", dir.display());

        Ok(Self::with_storage(Storage::file(dir), cfg))
    }

    pub fn with_storage(storage: Storage, cfg: CoreConfig) -> Self {
        let cfg = Arc::new(RwLock::new(cfg));

        Self {
            entries: EntryStore::new(storage, cfg.clone()),
            cfg,
        }
    }

    /// A repository that keeps everything in memory and touches no files.
    pub fn in_memory() -> Self {
        Self::with_storage(Storage::in_memory(), CoreConfig::default())
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    /// All entries in the order they were stored.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.read_entries()
    }

    pub fn entry(&self, id: EntryId) -> Option<Entry> {
        self.entries.entry(id)
    }

    pub fn add_entry(&self, unsaved: UnsavedEntry) -> Result<Entry> {
        self.entries.add_entry(unsaved)
    }

    /// Returns whether an entry with a matching identifier existed.
    pub fn update_entry(&self, entry: &Entry) -> Result<bool> {
        self.entries.update_entry(entry)
    }

    /// Returns whether an entry with `id` existed.
    pub fn remove_entry(&self, id: EntryId) -> Result<bool> {
        self.entries.remove_entry(id)
    }
}
