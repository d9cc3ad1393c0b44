//! # JSON Storage Module
//!
//! File-based storage for the application state using one pretty-printed
//! JSON document per data directory.
//!
//! ## Features
//!
//! - Single document named after the storage key (`alive_app_state.json`)
//! - Atomic writes through a temp file and rename
//! - Lenient reads: missing fields take defaults, broken files fall back
//!   to the default state

pub mod connection;
pub mod state_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use state_repository::{StateRepository, STORAGE_KEY};
