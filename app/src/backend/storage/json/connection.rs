use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// JsonConnection owns the data directory and hands out document paths
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the base data directory
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the JSON document stored under `key`
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }

    /// Make sure the base directory still exists (it may have been removed
    /// by hand while the app was running)
    pub fn ensure_base_directory(&self) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory).with_context(|| {
                format!("Failed to recreate data directory {}", self.base_directory.display())
            })?;
            info!("Recreated data directory: {}", self.base_directory.display());
        }
        Ok(())
    }
}
