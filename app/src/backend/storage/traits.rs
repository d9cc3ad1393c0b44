//! # Storage Traits
//!
//! Storage abstraction used by the domain services.

use anyhow::Result;
use shared::AppState;

/// Interface for whole-state persistence
///
/// There is exactly one aggregate, so there are no keys or queries: the
/// state is replaced as a whole on every save.
pub trait StateStorage: Send + Sync {
    /// Load the persisted state.
    ///
    /// A missing or unparsable document yields `AppState::default()`.
    fn load_state(&self) -> AppState;

    /// Replace the persisted state
    fn save_state(&self, state: &AppState) -> Result<()>;

    /// Erase everything. The next load returns the default state.
    fn clear_state(&self) -> Result<()>;
}
