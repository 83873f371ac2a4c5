//! # API Facade
//!
//! The API layer is a **thin facade** over the form and list controllers.
//! It serves as the single entry point for all formbook operations,
//! regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the form or list controller
//! - **Normalizes inputs** (e.g., turning a picture path into a handle and
//!   driving its preview read to completion)
//! - **Keeps the two controllers coherent** (a saved submit refreshes the
//!   list; an edit request copies the selected entry into the form)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: validation and pagination live in `form.rs` and
//!   `list.rs`
//! - **Presentation concerns**: no stdout, stderr, or string formatting
//!
//! ## Generic Over KeyValueStore
//!
//! `FormbookApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `FormbookApi<FileStore>`
//! - Testing: `FormbookApi<InMemoryStore>`
//!
//! This enables testing every flow without touching the filesystem.

use chrono::{DateTime, Utc};
use log::warn;

use crate::error::{FormbookError, Result};
use crate::form::{AddressField, EntryForm, SubmitOutcome};
use crate::list::EntryList;
use crate::model::Entry;
use crate::picture::{self, PictureFile};
use crate::store::{EntryStore, KeyValueStore};
use crate::validate::Field;

/// The main API facade for formbook operations.
///
/// Generic over `KeyValueStore` to allow different storage backends.
/// All UI clients should interact through this API.
pub struct FormbookApi<S: KeyValueStore> {
    store: EntryStore<S>,
    form: EntryForm,
    list: EntryList,
}

impl<S: KeyValueStore> FormbookApi<S> {
    /// Open the store and load the current entries.
    pub fn new(backend: S) -> Result<Self> {
        Self::with_page_size(backend, crate::list::DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(backend: S, page_size: usize) -> Result<Self> {
        let mut store = EntryStore::new(backend);
        let mut list = EntryList::with_page_size(page_size);
        list.refresh(&mut store)?;
        Ok(Self {
            store,
            form: EntryForm::new(),
            list,
        })
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn list(&self) -> &EntryList {
        &self.list
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.form.set_field(field, value);
    }

    pub fn set_address_field(&mut self, field: AddressField, value: &str) {
        self.form.set_address_field(field, value);
    }

    /// Attach a picture by path and drive its preview read.
    ///
    /// Gating happens in the form: a non-`.png` name records the picture
    /// error and no read starts. When the read itself fails the old preview
    /// stays up and the draft keeps going; the chosen name still submits.
    pub fn attach_picture(&mut self, path: impl Into<std::path::PathBuf>) -> Result<()> {
        let file = PictureFile::from_path(path)?;
        if let Some(ticket) = self.form.set_profile_picture(file) {
            match picture::read_preview(ticket.path()) {
                Ok(url) => self.form.complete_preview(ticket.token(), url),
                Err(e) => {
                    warn!("Could not read picture preview: {e}");
                    self.form.fail_preview(ticket.token());
                }
            }
        }
        Ok(())
    }

    /// Validate and persist the draft. A saved entry refreshes the list so
    /// positions stay in step with the store.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let outcome = self.form.submit(&mut self.store)?;
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.list.refresh(&mut self.store)?;
        }
        Ok(outcome)
    }

    /// Copy the entry at an absolute position into the form for editing.
    pub fn edit(&mut self, position: usize) -> Result<()> {
        let entry = self
            .list
            .entry_at(position)
            .cloned()
            .ok_or_else(|| FormbookError::Api(format!("No entry at position {}", position + 1)))?;
        self.form.load_for_edit(&entry);
        Ok(())
    }

    /// Delete the entry at an absolute position.
    pub fn delete(&mut self, position: usize) -> Result<Entry> {
        self.list.remove(position, &mut self.store)
    }

    /// Reload the list from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.list.refresh(&mut self.store)
    }

    pub fn next_page(&mut self) -> bool {
        self.list.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.list.prev_page()
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    pub fn success_notice(&self, now: DateTime<Utc>) -> Option<&str> {
        self.form.success_notice(now)
    }
}
