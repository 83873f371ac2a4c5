use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The country field is fixed; the form renders it as a disabled input.
pub const DEFAULT_COUNTRY: &str = "Nepal";

/// Provinces selectable for the address, stored as their number strings.
pub const PROVINCES: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

/// Postal address attached to an [`Entry`]. All fields are free-form and
/// optional; `province` is one of [`PROVINCES`] or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub province: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for Address {
    fn default() -> Self {
        Self {
            city: String::new(),
            district: String::new(),
            province: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// One persisted contact entry.
///
/// Entries are stored as a JSON array under a single store key, with
/// camelCase field names on the wire (`phoneNumber`, `profilePicture`, ...).
/// The `id` is assigned once at creation and is what edits match on, so
/// renaming an entry while editing it still replaces the original record.
///
/// `profile_picture` holds the chosen file's *name* only; picture bytes are
/// read transiently for previews and never persisted.
///
/// Loading is tolerant of records written before ids and timestamps
/// existed: a missing id is minted during deserialization, missing
/// timestamps fall back to the epoch. Keeping a minted id stable is the
/// store's business, not handled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

impl Entry {
    pub fn new(name: String, email: String, phone_number: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone_number,
            dob: String::new(),
            address: Address::default(),
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }
}
