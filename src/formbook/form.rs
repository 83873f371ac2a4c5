//! # Entry Form Controller
//!
//! Owns the transient state of one entry being composed or edited: the
//! record-shaped draft buffer, the per-field error map, the chosen picture
//! file with its preview, and the post-submit success notice.
//!
//! Mutation goes through the operations here only. Field setters
//! re-validate the touched field immediately so feedback appears while the
//! user is still typing; [`EntryForm::submit`] runs the whole-form rules
//! and refuses to touch the store until every one of them passes.
//!
//! ## Preview reads
//!
//! Reading picture bytes is the one asynchronous edge the controller has.
//! [`EntryForm::set_profile_picture`] hands back a [`PreviewTicket`] with a
//! monotonically increasing token; the caller performs the read at its own
//! pace and reports back through [`EntryForm::complete_preview`]. Only the
//! ticket matching the currently pending token is applied — a newer
//! selection, a submit, or loading another entry for editing supersedes
//! everything before it, so a slow read can never repaint state it no
//! longer belongs to.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Address, Entry};
use crate::picture::{PictureFile, Preview};
use crate::store::{EntryStore, KeyValueStore};
use crate::validate::{self, Field, ValidationError};

/// Message shown after a successful submit.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// How long the success notice stays visible, in seconds.
pub const NOTICE_SECONDS: i64 = 3;

/// Current validation failure per field. Valid fields carry no key.
pub type ErrorMap = BTreeMap<Field, ValidationError>;

/// Nested address fields settable through the form. The country is fixed
/// to its default and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    City,
    District,
    Province,
}

/// The edit buffer: a record-shaped draft of the entry being composed.
///
/// `Default` yields the blank form — empty fields with the address country
/// pre-filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: String,
    pub address: Address,
    /// Picture *name* carried over from the entry being edited. A freshly
    /// chosen file supersedes it on submit.
    pub profile_picture: Option<String>,
}

/// A pending preview read, handed out by [`EntryForm::set_profile_picture`].
/// The caller reads the file and resolves the ticket through
/// [`EntryForm::complete_preview`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    token: u64,
    path: PathBuf,
}

impl PreviewTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft was persisted. Carries the stored entry; the list should
    /// refresh now.
    Saved(Entry),
    /// Validation failed; the error map holds every message at once.
    Rejected,
}

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct EntryForm {
    draft: EntryDraft,
    editing: Option<Uuid>,
    errors: ErrorMap,
    picture: Option<PictureFile>,
    preview: Preview,
    pending_preview: Option<u64>,
    next_token: u64,
    notice: Option<Notice>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Id of the entry being edited, if any. `None` means a submit appends.
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn picture(&self) -> Option<&PictureFile> {
        self.picture.as_ref()
    }

    /// Whether a preview read is still outstanding.
    pub fn preview_pending(&self) -> bool {
        self.pending_preview.is_some()
    }

    /// Copy an entry's fields verbatim into the draft and remember its id
    /// so the next submit replaces it in place.
    ///
    /// The preview falls back to the placeholder: a persisted picture is a
    /// name only, so there is nothing to reconstruct a real preview from.
    pub fn load_for_edit(&mut self, entry: &Entry) {
        self.draft = EntryDraft {
            name: entry.name.clone(),
            email: entry.email.clone(),
            phone_number: entry.phone_number.clone(),
            dob: entry.dob.clone(),
            address: entry.address.clone(),
            profile_picture: entry.profile_picture.clone(),
        };
        self.editing = Some(entry.id);
        self.picture = None;
        self.preview = Preview::Placeholder;
        self.pending_preview = None;
    }

    /// Update one top-level field and re-validate just that field.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Email => self.draft.email = value.to_string(),
            Field::PhoneNumber => self.draft.phone_number = value.to_string(),
            Field::Dob => self.draft.dob = value.to_string(),
            // The picture goes through set_profile_picture.
            Field::ProfilePicture => return,
        }
        let failure = match field {
            Field::Name => validate::validate_name(value),
            Field::Email => validate::validate_email(value),
            Field::PhoneNumber => validate::validate_phone_field(value),
            // dob has no constraints.
            _ => None,
        };
        self.apply(field, failure);
    }

    /// Update one nested address field. Address fields are optional and
    /// carry no validation.
    pub fn set_address_field(&mut self, field: AddressField, value: &str) {
        match field {
            AddressField::City => self.draft.address.city = value.to_string(),
            AddressField::District => self.draft.address.district = value.to_string(),
            AddressField::Province => self.draft.address.province = value.to_string(),
        }
    }

    /// Record a chosen picture file.
    ///
    /// A name that is not `.png` keeps the handle, sets the picture error
    /// and starts no read — a read already in flight stays pending. A valid
    /// choice clears the error and returns a fresh ticket superseding all
    /// earlier ones.
    pub fn set_profile_picture(&mut self, file: PictureFile) -> Option<PreviewTicket> {
        if let Some(failure) = validate::validate_picture_name(file.name()) {
            self.picture = Some(file);
            self.errors.insert(Field::ProfilePicture, failure);
            return None;
        }
        self.errors.remove(&Field::ProfilePicture);
        let path = file.path().to_path_buf();
        self.picture = Some(file);
        self.next_token += 1;
        self.pending_preview = Some(self.next_token);
        Some(PreviewTicket {
            token: self.next_token,
            path,
        })
    }

    /// Resolve a preview read. Stale tickets are ignored; until the current
    /// one resolves, the previously displayed preview stays up.
    pub fn complete_preview(&mut self, token: u64, data_url: String) {
        if self.pending_preview == Some(token) {
            self.preview = Preview::Image(data_url);
            self.pending_preview = None;
        }
    }

    /// Resolve a preview read that produced nothing: the ticket is consumed
    /// and whatever preview was showing stays up. Stale tickets are ignored.
    pub fn fail_preview(&mut self, token: u64) {
        if self.pending_preview == Some(token) {
            self.pending_preview = None;
        }
    }

    /// Validate the whole draft and upsert it into the store.
    ///
    /// On any failure the error map is replaced with all failures at once
    /// and nothing is written. On success the entry is replaced in place
    /// when its id is still present (edits keep their position and creation
    /// time) and appended otherwise; the form then resets to its defaults
    /// and the success notice starts its countdown.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut EntryStore<S>,
    ) -> Result<SubmitOutcome> {
        let failures = self.validate_all();
        if !failures.is_empty() {
            self.errors = failures;
            return Ok(SubmitOutcome::Rejected);
        }

        let now = Utc::now();
        let picture_name = self
            .picture
            .as_ref()
            .map(|f| f.name().to_string())
            .or_else(|| self.draft.profile_picture.clone());

        let mut entries = store.load_all()?;
        let position = self
            .editing
            .and_then(|id| entries.iter().position(|e| e.id == id));
        let (id, created_at) = match position {
            Some(pos) => (entries[pos].id, entries[pos].created_at),
            // The edited entry may have been deleted out from under us;
            // fall through to appending under the same identity.
            None => (self.editing.unwrap_or_else(Uuid::new_v4), now),
        };
        let entry = Entry {
            id,
            name: self.draft.name.clone(),
            email: self.draft.email.clone(),
            phone_number: self.draft.phone_number.clone(),
            dob: self.draft.dob.clone(),
            address: self.draft.address.clone(),
            profile_picture: picture_name,
            created_at,
            updated_at: now,
        };
        match position {
            Some(pos) => entries[pos] = entry.clone(),
            None => entries.push(entry.clone()),
        }
        store.save_all(&entries)?;

        self.reset();
        self.notice = Some(Notice {
            message: SUCCESS_MESSAGE.to_string(),
            expires_at: now + Duration::seconds(NOTICE_SECONDS),
        });
        Ok(SubmitOutcome::Saved(entry))
    }

    /// The transient success notice, visible until its expiry passes.
    pub fn success_notice(&self, now: DateTime<Utc>) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.message.as_str())
    }

    fn validate_all(&self) -> ErrorMap {
        let mut failures = ErrorMap::new();
        if let Some(f) = validate::validate_name(&self.draft.name) {
            failures.insert(Field::Name, f);
        }
        if let Some(f) = validate::validate_email(&self.draft.email) {
            failures.insert(Field::Email, f);
        }
        if let Some(f) = validate::validate_phone(&self.draft.phone_number) {
            failures.insert(Field::PhoneNumber, f);
        }
        let picture_name = self
            .picture
            .as_ref()
            .map(PictureFile::name)
            .or(self.draft.profile_picture.as_deref());
        if let Some(name) = picture_name {
            if let Some(f) = validate::validate_picture_name(name) {
                failures.insert(Field::ProfilePicture, f);
            }
        }
        failures
    }

    fn apply(&mut self, field: Field, failure: Option<ValidationError>) {
        match failure {
            Some(f) => {
                self.errors.insert(field, f);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn reset(&mut self) {
        self.draft = EntryDraft::default();
        self.editing = None;
        self.errors.clear();
        self.picture = None;
        self.preview = Preview::Placeholder;
        self.pending_preview = None;
    }
}
