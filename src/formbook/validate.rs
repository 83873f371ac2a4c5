//! Field and whole-form validation rules for entry drafts.
//!
//! Two granularities share the same underlying rules:
//!
//! - **Whole-form** checks run on submit and gate persistence. A draft that
//!   fails any of them is never written to the store.
//! - **Field-level** checks run on every input change for immediate
//!   feedback. For the phone number they are deliberately finer-grained
//!   than the submit check, distinguishing "contains non-digits" from
//!   "too few digits" — both message strings are part of the observable
//!   contract and must stay distinct.
//!
//! Validation failures are values, not errors: every function returns
//! `Option<ValidationError>` and the caller keeps them in a per-field map
//! that clears as soon as the input becomes valid.

use std::fmt;

use thiserror::Error;

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// The top-level draft fields an error message can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    PhoneNumber,
    Dob,
    ProfilePicture,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone number",
            Field::Dob => "Date of birth",
            Field::ProfilePicture => "Profile picture",
        };
        write!(f, "{}", label)
    }
}

/// A single validation failure. `Display` renders the user-facing message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(Field),

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Phone number must contain only digits.")]
    PhoneNotDigits,

    #[error("Phone number must be at least 7 digits.")]
    PhoneTooShort,

    #[error("Please upload a PNG file only.")]
    NotPng,
}

/// Name: non-empty after trimming.
pub fn validate_name(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::Required(Field::Name))
    } else {
        None
    }
}

/// Email: non-empty and `local@domain.tld`-shaped.
pub fn validate_email(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::Required(Field::Email))
    } else if !email_shaped(value) {
        Some(ValidationError::InvalidEmail)
    } else {
        None
    }
}

/// Phone number, submit granularity: non-empty and seven-or-more digits
/// with nothing else. Anything that misses the digit rule gets the
/// too-short message, matching the coarser submit-time wording.
pub fn validate_phone(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::Required(Field::PhoneNumber))
    } else if !(is_digits(value) && value.len() >= MIN_PHONE_DIGITS) {
        Some(ValidationError::PhoneTooShort)
    } else {
        None
    }
}

/// Phone number, keystroke granularity: three distinct messages so the user
/// learns *why* the value is rejected while still typing.
pub fn validate_phone_field(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::Required(Field::PhoneNumber))
    } else if !is_digits(value) {
        Some(ValidationError::PhoneNotDigits)
    } else if value.len() < MIN_PHONE_DIGITS {
        Some(ValidationError::PhoneTooShort)
    } else {
        None
    }
}

/// Profile picture file names must end in `.png` (case-sensitive, like the
/// form's original gate).
pub fn validate_picture_name(name: &str) -> Option<ValidationError> {
    if name.ends_with(".png") {
        None
    } else {
        Some(ValidationError::NotPng)
    }
}

/// `\S+@\S+.\S+` shape: no whitespace anywhere, at least one character
/// before an `@`, and somewhere after it a `.` with characters on both
/// sides.
fn email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    // Any `@` with at least one character before it can anchor the split.
    let Some(at) = value.match_indices('@').map(|(i, _)| i).find(|&i| i >= 1) else {
        return false;
    };
    let domain = &value[at + 1..];
    domain
        .match_indices('.')
        .any(|(i, _)| i >= 1 && i + 1 < domain.len())
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
