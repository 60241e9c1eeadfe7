//! Configuration management.
//!
//! Settings load from a `liftdex.toml` file with serde-level defaults for
//! every field, so an empty or absent file is a valid configuration. The
//! `--target` and `--config` global CLI flags override discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::llm::ExtractorConfig;

/// Snapshot file name inside the data directory.
pub const STATE_FILE: &str = "catalog.json";

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the catalog snapshot and stored documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Extraction service configuration.
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("liftdex")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `--config` path must exist; otherwise `liftdex.toml`
    /// is looked up in the user config directory and silently skipped
    /// when absent. An explicit `--target` overrides the data directory.
    pub fn load(config: Option<&Path>, target: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                toml::from_str(&text)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    let text = std::fs::read_to_string(&path)?;
                    toml::from_str(&text)?
                }
                _ => Self::default(),
            },
        };

        if let Some(target) = target {
            settings.data_dir = target.to_path_buf();
        }
        Ok(settings)
    }

    /// Default config file location: `{config_dir}/liftdex/liftdex.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("liftdex").join("liftdex.toml"))
    }

    /// Directory for stored document files.
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    /// Path of the catalog snapshot file.
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    /// Create the data and document directories.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.documents_dir())
    }
}
