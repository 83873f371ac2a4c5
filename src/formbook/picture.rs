//! Profile picture handling.
//!
//! Pictures are never persisted as bytes: the store only ever sees the
//! chosen file's *name*. Bytes are read once per selection to build a
//! `data:image/png;base64,...` URL for the in-session preview, and the
//! default placeholder is served the same way so a UI can treat both
//! uniformly.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use once_cell::sync::Lazy;

use crate::error::{FormbookError, Result};

/// A 1x1 transparent png, shown until a real picture is chosen.
pub const PLACEHOLDER_PNG: &[u8] = include_bytes!("../../assets/placeholder.png");

static PLACEHOLDER_DATA_URL: Lazy<String> = Lazy::new(|| data_url(PLACEHOLDER_PNG));

/// Encode image bytes as a `data:` URL for inline display.
pub fn data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// Read a picture file into its preview data URL.
pub fn read_preview(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(FormbookError::Io)?;
    Ok(data_url(&bytes))
}

/// A file the user chose for the profile picture.
///
/// Only the name outlives the session; the path is kept so the preview read
/// can find the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFile {
    name: String,
    path: PathBuf,
}

impl PictureFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                FormbookError::Api(format!("Not a usable file name: {}", path.display()))
            })?
            .to_string();
        Ok(Self { name, path })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What the preview pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    Image(String),
}

impl Default for Preview {
    fn default() -> Self {
        Self::Placeholder
    }
}

impl Preview {
    pub fn data_url(&self) -> &str {
        match self {
            Preview::Placeholder => &PLACEHOLDER_DATA_URL,
            Preview::Image(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Preview::Placeholder)
    }
}
