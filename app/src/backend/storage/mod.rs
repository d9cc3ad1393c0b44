//! # Storage Module
//!
//! Handles persistence of the check-in state.
//!
//! The whole application state is one aggregate written as a single JSON
//! document on every change and read back once at startup. Domain code only
//! sees the [`StateStorage`] trait, so the file store can be swapped without
//! touching the transitions or services.
//!
//! ## File Structure
//!
//! ```text
//! <data dir>/
//! └── alive_app_state.json
//! ```

pub mod json;
pub mod traits;

pub use json::{JsonConnection, StateRepository};
pub use traits::StateStorage;
