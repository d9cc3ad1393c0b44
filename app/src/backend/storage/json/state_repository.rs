use anyhow::{Context, Result};
use log::{debug, info, warn};
use shared::AppState;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::backend::storage::traits::StateStorage;

/// Storage key of the single persisted document
pub const STORAGE_KEY: &str = "alive_app_state";

/// JSON file repository for the application state
#[derive(Debug, Clone)]
pub struct StateRepository {
    connection: Arc<JsonConnection>,
}

impl StateRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Path of the state document
    pub fn state_path(&self) -> PathBuf {
        self.connection.document_path(STORAGE_KEY)
    }

    /// Read the state strictly: `Ok(None)` when there is no document,
    /// an error when it cannot be read or parsed
    pub fn read_state(&self) -> Result<Option<AppState>> {
        let path = self.state_path();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read state file {}", path.display()))
            }
        };

        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file {}", path.display()))?;
        debug!("Loaded state from {:?}", path);
        Ok(Some(state))
    }
}

impl StateStorage for StateRepository {
    fn load_state(&self) -> AppState {
        match self.read_state() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No saved state at {:?}, starting fresh", self.state_path());
                AppState::default()
            }
            Err(e) => {
                warn!("Discarding unreadable state, using defaults: {:#}", e);
                AppState::default()
            }
        }
    }

    fn save_state(&self, state: &AppState) -> Result<()> {
        self.connection.ensure_base_directory()?;

        let path = self.state_path();
        let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;

        // Write to a sibling temp file, then rename over the target
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved state to {:?}", path);
        Ok(())
    }

    fn clear_state(&self) -> Result<()> {
        let path = self.state_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Erased saved state at {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Nothing to erase at {:?}", path);
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to erase {}", path.display())),
        }
    }
}
