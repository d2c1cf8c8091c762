//! `<data-dir>/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use labnet_core::{LabnetError, Result};
use labnet_store::{MessagingConfig, StoreConfig};

use crate::cli::OutputFormat;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Posts shown by `labnet feed` when `-n` is not given.
    #[serde(default = "default_feed_limit")]
    pub feed_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            feed_limit: default_feed_limit(),
        }
    }
}

fn default_feed_limit() -> usize {
    20
}

impl CliConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Read the config from `data_dir`, or defaults if there is no file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| LabnetError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| LabnetError::Config(e.to_string()))?;
        fs::write(Self::path(data_dir), content)?;
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            messaging: self.messaging.clone(),
        }
    }
}
