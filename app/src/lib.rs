//! Daily "I'm still here" check-ins with mood logs and emergency contacts.

pub mod backend;
pub mod config;

pub use backend::Backend;
pub use config::AppConfig;
