use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{FormbookError, Result};

/// In-memory store for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for error-path tests.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(FormbookError::Store("simulated write failure".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Entry;
    use crate::store::EntryStore;

    /// A pre-filled entry store for list and pagination tests.
    pub struct StoreFixture {
        pub store: EntryStore<InMemoryStore>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: EntryStore::new(InMemoryStore::new()),
            }
        }

        /// Seed `count` valid entries named "Entry 1".."Entry N".
        pub fn with_entries(mut self, count: usize) -> Self {
            let entries: Vec<Entry> = (1..=count)
                .map(|i| {
                    Entry::new(
                        format!("Entry {i}"),
                        format!("entry{i}@example.com"),
                        format!("98{i:08}"),
                    )
                })
                .collect();
            self.store.save_all(&entries).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_what_was_written() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn writes_replace_fully() {
        let mut store = InMemoryStore::new();
        store.write("k", "first").unwrap();
        store.write("k", "second").unwrap();
        assert_eq!(store.read("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn simulated_failure_rejects_writes() {
        let mut store = InMemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.write("k", "v").is_err());
    }
}
