//! # Storage Layer
//!
//! Two pieces, layered like the rest of the crate:
//!
//! - [`KeyValueStore`]: the raw persistence interface — string keys, string
//!   values, synchronous get/set, values surviving across runs. This is the
//!   "how" of storage and the only thing a backend has to provide.
//! - [`EntryStore`]: the adapter the controllers talk to. It owns the single
//!   key the entry list lives under and the JSON (de)serialization of that
//!   list. This is the "what".
//!
//! ## Design Rationale
//!
//! Persistence is abstracted behind a trait to:
//! - Enable **testing** with [`memory::InMemoryStore`] (no filesystem needed)
//! - Allow **future backends** without changing the controllers
//! - Keep validation and list logic **decoupled** from storage details
//!
//! ## Consistency model
//!
//! Every mutation reads the full list, computes a new full list, and writes
//! the full list back. That is the sole consistency mechanism; it assumes a
//! single active writer. Two processes mutating the same store would race
//! and silently clobber each other — an accepted limitation.
//!
//! ## Storage Format
//!
//! For [`fs::FileStore`], each key is one file under the store root:
//!
//! ```text
//! <data dir>/
//! ├── formEntries.json    # JSON array of entries
//! └── config.json         # CLI configuration
//! ```

use log::warn;

use crate::error::Result;
use crate::model::Entry;

pub mod fs;
pub mod memory;

/// The store key the entry list is persisted under.
pub const ENTRIES_KEY: &str = "formEntries";

/// Abstract interface for raw key-value persistence.
///
/// Implementations must return `Ok(None)` for keys that were never written,
/// and must make `write` durable before returning.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, fully replacing any prior value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Adapter owning the persisted entry list.
///
/// Generic over the backend so production code runs on [`fs::FileStore`]
/// and tests on [`memory::InMemoryStore`].
pub struct EntryStore<S: KeyValueStore> {
    inner: S,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Load the full entry list.
    ///
    /// An absent key is an empty list. A value that fails to deserialize is
    /// also treated as an empty list: the anomaly is logged and the next
    /// [`EntryStore::save_all`] overwrites it. Corruption never surfaces to
    /// the user as a fatal error.
    ///
    /// Records written before ids existed come back with a freshly minted
    /// id, and the upgraded list is persisted right away: edits match on
    /// ids, so a minted id has to survive the next load.
    pub fn load_all(&mut self) -> Result<Vec<Entry>> {
        match self.inner.read(ENTRIES_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => match parse_entries(&raw) {
                Ok((entries, minted)) => {
                    if minted {
                        self.save_all(&entries)?;
                    }
                    Ok(entries)
                }
                Err(err) => {
                    warn!("discarding unreadable entry list under {ENTRIES_KEY:?}: {err}");
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Serialize and write the full list, replacing the previous value.
    pub fn save_all(&mut self, entries: &[Entry]) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        self.inner.write(ENTRIES_KEY, &raw)
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &S {
        &self.inner
    }
}

/// Decode the persisted array leniently; records that predate stable ids
/// deserialize with a freshly minted one. The flag reports whether any id
/// was minted, so the caller can make the upgrade durable.
fn parse_entries(raw: &str) -> serde_json::Result<(Vec<Entry>, bool)> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let minted = records.iter().any(|r| r.get("id").is_none());
    let entries = records
        .into_iter()
        .map(serde_json::from_value)
        .collect::<serde_json::Result<Vec<Entry>>>()?;
    Ok((entries, minted))
}
