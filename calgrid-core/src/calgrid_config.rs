//! calgrid configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalGridError, CalGridResult};
use crate::storage::FileStore;
use crate::view::DEFAULT_PREVIEW_LIMIT;

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("calgrid"))
        .unwrap_or_else(|| PathBuf::from("~/.calgrid"))
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

/// Configuration at ~/.config/calgrid/config.toml
///
/// Every key can be overridden from the environment with a `CALGRID_`
/// prefix, e.g. `CALGRID_DATA_DIR`.
#[derive(Debug, Deserialize, Clone)]
pub struct CalgridConfig {
    /// Where events, theme and view mode are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Events shown per grid cell before "+N more"
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for CalgridConfig {
    fn default() -> Self {
        CalgridConfig {
            data_dir: default_data_dir(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl CalgridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, writing a commented-out default first if
    /// there is none yet.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGRID").try_parsing(true))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn open_store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where events and preferences are stored:
# data_dir = \"{}\"

# Events shown in each month grid cell:
# preview_limit = {}
",
            default_data_dir().display(),
            DEFAULT_PREVIEW_LIMIT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid").join("config.toml");

        CalgridConfig::create_default_config(&path).unwrap();
        let config = CalgridConfig::load_from(&path).unwrap();

        assert_eq!(config.preview_limit, DEFAULT_PREVIEW_LIMIT);
        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn test_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"~/cal\"\npreview_limit = 4\n").unwrap();

        let config = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(config.preview_limit, 4);
        assert_eq!(config.data_dir, PathBuf::from("~/cal"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalgridConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.preview_limit, DEFAULT_PREVIEW_LIMIT);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "preview_limit = \"lots\"\n").unwrap();

        let err = CalgridConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CalGridError::Config(_)));
    }
}
