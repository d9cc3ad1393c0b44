/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// The temporary directory lives as long as the environment, so test data is
/// removed even if a test panics.
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::state_repository::StateRepository;

/// Temporary data directory plus a connection to it
pub struct TestEnvironment {
    pub connection: Arc<JsonConnection>,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().join("data");
        let connection = Arc::new(JsonConnection::new(&base_path)?);
        Ok(Self {
            connection,
            base_path,
            _temp_dir: temp_dir,
        })
    }

    pub fn state_repository(&self) -> StateRepository {
        StateRepository::new(self.connection.clone())
    }
}
