//! # Entry List Controller
//!
//! A paged, read-mostly view over the stored entries. The controller keeps
//! its own copy of the list and a 1-indexed current page; callers address
//! entries by absolute position in the full stored order, never by row
//! within the visible page.
//!
//! Deleting re-indexes everything after the removed entry but leaves the
//! current page alone, so removing the last entry of the last page shows an
//! empty page with the previous-page control still live.

use crate::error::{FormbookError, Result};
use crate::model::Entry;
use crate::store::{EntryStore, KeyValueStore};

/// Entries shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug)]
pub struct EntryList {
    entries: Vec<Entry>,
    page: usize,
    page_size: usize,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A list paging by `page_size` entries. Sizes below one are raised
    /// to one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Reload the entries from the store. The current page is kept as-is.
    pub fn refresh<S: KeyValueStore>(&mut self, store: &mut EntryStore<S>) -> Result<()> {
        self.entries = store.load_all()?;
        Ok(())
    }

    /// All entries in stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current page, 1-indexed.
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.entries.len().div_ceil(self.page_size)
    }

    /// The slice of entries visible on the current page. Empty when the
    /// page lies beyond the end of the list.
    pub fn page_entries(&self) -> &[Entry] {
        let start = self.page_start().min(self.entries.len());
        let end = (start + self.page_size).min(self.entries.len());
        &self.entries[start..end]
    }

    /// Absolute position of the first entry on the current page.
    pub fn page_start(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page * self.page_size < self.entries.len()
    }

    /// Whether paging controls are worth showing at all: only once the
    /// list outgrows a single page.
    pub fn controls_visible(&self) -> bool {
        self.entries.len() > self.page_size
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump straight to a page, clamped into the valid range. An empty
    /// list has exactly one (empty) page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Entry at an absolute position in the stored order, 0-indexed.
    pub fn entry_at(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Remove the entry at an absolute position and persist the shortened
    /// list. Everything after it shifts up by one; the current page does
    /// not move.
    pub fn remove<S: KeyValueStore>(
        &mut self,
        position: usize,
        store: &mut EntryStore<S>,
    ) -> Result<Entry> {
        if position >= self.entries.len() {
            return Err(FormbookError::Api(format!(
                "No entry at position {}",
                position + 1
            )));
        }
        let removed = self.entries.remove(position);
        store.save_all(&self.entries)?;
        Ok(removed)
    }
}
