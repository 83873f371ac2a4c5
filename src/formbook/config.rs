use crate::error::{FormbookError, Result};
use crate::list::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for formbook, stored next to the data as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormbookConfig {
    /// Entries shown per list page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for FormbookConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FormbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FormbookError::Io)?;
        let config: FormbookConfig =
            serde_json::from_str(&content).map_err(FormbookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FormbookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FormbookError::Serialization)?;
        fs::write(config_path, content).map_err(FormbookError::Io)?;
        Ok(())
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Set the page size (sizes below one are raised to one)
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = FormbookConfig::default();
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_set_page_size_floor() {
        let mut config = FormbookConfig::default();
        config.set_page_size(0);
        assert_eq!(config.page_size, 1);
        config.set_page_size(10);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = env::temp_dir().join("formbook_test_config_missing");
        let _ = fs::remove_dir_all(&temp_dir);

        let config = FormbookConfig::load(&temp_dir).unwrap();
        assert_eq!(config, FormbookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = env::temp_dir().join("formbook_test_config_save");
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).unwrap();

        let mut config = FormbookConfig::default();
        config.set_page_size(3);
        config.save(&temp_dir).unwrap();

        let loaded = FormbookConfig::load(&temp_dir).unwrap();
        assert_eq!(loaded.page_size, 3);

        // Cleanup
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = FormbookConfig { page_size: 7 };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormbookConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_zero_page_size_in_file_is_raised_on_use() {
        let config: FormbookConfig = serde_json::from_str(r#"{"page_size":0}"#).unwrap();
        assert_eq!(config.get_page_size(), 1);
    }
}
