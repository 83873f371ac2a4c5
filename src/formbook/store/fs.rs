use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{FormbookError, Result};

/// File-backed store: each key is one `<key>.json` file under the root
/// directory. The root is created lazily on first write.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a key is stored in, whether or not it exists yet.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FormbookError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(FormbookError::Io)?;
        Ok(Some(value))
    }

    // Writes go through a temp file and a rename so an interrupted write
    // can never leave a half-written value under the key.
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        let path = self.key_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(FormbookError::Io)?;
        fs::rename(&tmp, &path).map_err(FormbookError::Io)?;
        Ok(())
    }
}
