//! # Configuration
//!
//! Application settings read from a single YAML file.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "/home/ann/.local/share/still-here"
//! greeting:
//!   api_key: "..."
//!   model: "gemini-3-flash-preview"
//!   base_url: "https://generativelanguage.googleapis.com"
//!   timeout_secs: 5
//! ```
//!
//! Every field is optional. A missing default config file means defaults;
//! `GEMINI_API_KEY` or `API_KEY` supplies the greeting key when the file
//! does not.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "still-here";

/// Environment variables checked, in order, for the greeting API key
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the state document lives (platform data dir when unset)
    pub data_directory: Option<PathBuf>,
    pub greeting: GreetingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 5,
        }
    }
}

impl GreetingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    /// `<config dir>/still-here/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.yaml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path may be absent.
    /// Environment variables are applied afterwards.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Fill the greeting key from the environment when the file has none
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.greeting.api_key.as_deref().map_or(false, |key| !key.trim().is_empty()) {
            return;
        }

        self.greeting.api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .find(|value| !value.trim().is_empty());
    }

    /// Data directory from config, falling back to `<data dir>/still-here`
    pub fn resolve_data_directory(&self) -> Result<PathBuf> {
        match &self.data_directory {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory; set data_directory in the config")),
        }
    }
}
