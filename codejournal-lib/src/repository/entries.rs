//! The persisted entry collection.
//!
//! Every operation reads the whole collection from storage, changes it and
//! writes the whole collection back.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    repository::{Cfg, Error, Result},
    storage::{self, Storage},
};

pub type EntryId = u64;

/// A single journal post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: EntryId,
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

impl Entry {
    /// The entry without its identifier.
    pub fn unsaved(&self) -> UnsavedEntry {
        UnsavedEntry {
            title: self.title.clone(),
            photo_url: self.photo_url.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.entry_id, self.title)
    }
}

/// An entry that hasn't been assigned an identifier yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedEntry {
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

impl UnsavedEntry {
    pub fn new(title: &str, photo_url: &str, notes: &str) -> Self {
        Self {
            title: title.into(),
            photo_url: photo_url.into(),
            notes: notes.into(),
        }
    }

    fn with_id(self, entry_id: EntryId) -> Entry {
        Entry {
            entry_id,
            title: self.title,
            photo_url: self.photo_url,
            notes: self.notes,
        }
    }
}

/// The stored collection together with its identifier counter.
#[derive(Debug)]
struct Document {
    entries: Vec<Entry>,
    /// Lowest identifier that has never been handed out. `EntryId::MAX` once they have run out.
    next_entry_id: EntryId,
}

impl Document {
    /// Raises `counter` past every stored identifier.
    fn new(entries: Vec<Entry>, counter: EntryId) -> Self {
        let next_entry_id = entries
            .iter()
            .try_fold(counter.max(1), |next, e| {
                Some(next.max(e.entry_id.checked_add(1)?))
            })
            .unwrap_or(EntryId::MAX);

        Self {
            entries,
            next_entry_id,
        }
    }

    fn allocate_id(&mut self) -> Result<EntryId> {
        let id = self.next_entry_id;
        self.next_entry_id = id.checked_add(1).ok_or(Error::IdsExhausted)?;

        Ok(id)
    }
}

/// What the storage key currently holds.
enum Stored {
    Missing,
    Entries(Vec<Entry>),
    /// Present but unusable. Must be moved aside before the key is written.
    Malformed,
}

/// Reads and writes the entry collection stored under the configured key.
///
/// The key holds a JSON array of entries. The identifier counter lives next to it under
/// `<key>.next-id`.
#[derive(Debug, Clone)]
pub(crate) struct EntryStore {
    storage: Storage,
    cfg: Cfg,
}

impl EntryStore {
    pub fn new(storage: Storage, cfg: Cfg) -> Self {
        Self { storage, cfg }
    }

    /// Every stored entry in insertion order. Missing, malformed or unreadable data reads as
    /// empty.
    pub fn read_entries(&self) -> Vec<Entry> {
        match self.load_entries() {
            Ok(Stored::Entries(entries)) => entries,
            Ok(Stored::Missing | Stored::Malformed) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored entries, treating them as empty: {e}");
                Vec::new()
            }
        }
    }

    pub fn entry(&self, id: EntryId) -> Option<Entry> {
        self.read_entries().into_iter().find(|e| e.entry_id == id)
    }

    /// Store a new entry under the next free identifier and return it.
    pub fn add_entry(&self, unsaved: UnsavedEntry) -> Result<Entry> {
        let (mut doc, malformed) = self.load_for_write()?;

        let entry = unsaved.with_id(doc.allocate_id()?);
        doc.entries.push(entry.clone());

        self.write_document(&doc, malformed)?;

        debug!("Added entry {entry}");

        Ok(entry)
    }

    /// Replace the stored entry with the same identifier. Returns `false` without writing
    /// anything if no such entry exists.
    pub fn update_entry(&self, entry: &Entry) -> Result<bool> {
        let (mut doc, malformed) = self.load_for_write()?;

        let Some(existing) = doc
            .entries
            .iter_mut()
            .find(|e| e.entry_id == entry.entry_id)
        else {
            debug!("Ignoring update of missing entry {}", entry.entry_id);
            return Ok(false);
        };

        existing.clone_from(entry);
        self.write_document(&doc, malformed)?;

        debug!("Updated entry {entry}");

        Ok(true)
    }

    /// Delete the entry with `id`. Returns `false` without writing anything if no such entry
    /// exists.
    pub fn remove_entry(&self, id: EntryId) -> Result<bool> {
        let (mut doc, malformed) = self.load_for_write()?;

        let before = doc.entries.len();
        doc.entries.retain(|e| e.entry_id != id);

        if doc.entries.len() == before {
            debug!("Ignoring removal of missing entry {id}");
            return Ok(false);
        }

        self.write_document(&doc, malformed)?;

        debug!("Removed entry {id}");

        Ok(true)
    }

    fn key(&self) -> String {
        self.cfg.read().storage_key().clone()
    }

    fn counter_key(&self) -> String {
        format!("{}.next-id", self.key())
    }

    fn load_entries(&self) -> storage::Result<Stored> {
        let key = self.key();
        let raw = match self.storage.read().get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Stored::Missing),
            Err(e @ storage::Error::NotText { .. }) => {
                warn!("Stored entries are malformed: {e}");
                return Ok(Stored::Malformed);
            }
            Err(e) => return Err(e),
        };

        Ok(match serde_json::from_str(&raw) {
            Ok(entries) => Stored::Entries(entries),
            Err(e) => {
                warn!("Stored entries are malformed: {e}");
                Stored::Malformed
            }
        })
    }

    /// The stored counter, or 0 when there is none worth trusting.
    fn load_counter(&self) -> storage::Result<EntryId> {
        let key = self.counter_key();
        let raw = match self.storage.read().get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(0),
            Err(e @ storage::Error::NotText { .. }) => {
                warn!("Ignoring identifier counter: {e}");
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed identifier counter in {key}: {e}");
            0
        }))
    }

    /// Read the collection for modification. Unreadable storage is an error here since the
    /// following write would replace data nobody has seen. The flag tells whether the stored
    /// value is malformed and has to be backed up before it is replaced.
    fn load_for_write(&self) -> Result<(Document, bool)> {
        let (entries, malformed) = match self.load_entries()? {
            Stored::Missing => (Vec::new(), false),
            Stored::Entries(entries) => (entries, false),
            Stored::Malformed => (Vec::new(), true),
        };

        Ok((Document::new(entries, self.load_counter()?), malformed))
    }

    fn write_document(&self, doc: &Document, malformed: bool) -> Result<()> {
        let key = self.key();
        let counter_key = self.counter_key();
        let entries = serde_json::to_string(&doc.entries)?;
        let counter = serde_json::to_string(&doc.next_entry_id)?;

        let mut storage = self.storage.write();

        if malformed {
            let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let backup_key = format!("{key}.{timestamp}.bak");

            warn!("Backing up malformed entries to {backup_key}");
            storage.rename(&key, &backup_key)?;
        }

        // Counter first, so a failed write leaves a gap rather than a reusable id
        storage.set(&counter_key, &counter)?;
        storage.set(&key, &entries)?;

        Ok(())
    }
}
