//! Application preferences persisted next to the ledger data.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::errors::Result;
use crate::utils::paths::{self, ensure_dir, write_atomic};

/// Display preferences for the surrounding application. Balances themselves
/// are currency-agnostic magnitudes; the currency here only drives how the
/// presentation layer formats them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            theme: None,
        }
    }
}

/// Loads and saves the configuration file under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base(paths::app_data_dir())
    }

    pub fn with_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Reads the stored configuration, falling back to defaults when no file
    /// has been written yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
