//! # Backend Module
//!
//! All non-UI logic: domain services over a JSON file store.
//! The CLI in `main.rs` only parses arguments and prints.

use anyhow::Result;
use log::info;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

use crate::config::AppConfig;
use domain::{CheckInService, Clock, ContactService, GreetingService, ProfileService, SystemClock};

/// Main backend struct that wires all services to one data directory
pub struct Backend {
    pub check_in_service: CheckInService,
    pub contact_service: ContactService,
    pub profile_service: ProfileService,
    pub greeting_service: GreetingService,
    pub clock: Arc<dyn Clock>,
}

impl Backend {
    /// Create a backend from configuration using the system clock
    pub fn new(config: &AppConfig) -> Result<Self> {
        let data_directory = config.resolve_data_directory()?;
        info!("Using data directory {}", data_directory.display());

        let json_conn = Arc::new(JsonConnection::new(data_directory)?);
        let greeting_service = GreetingService::from_config(&config.greeting);

        Ok(Self::with_parts(json_conn, Arc::new(SystemClock), greeting_service))
    }

    /// Assemble a backend from explicit parts
    pub fn with_parts(
        json_conn: Arc<JsonConnection>,
        clock: Arc<dyn Clock>,
        greeting_service: GreetingService,
    ) -> Self {
        Self {
            check_in_service: CheckInService::new(json_conn.clone(), clock.clone()),
            contact_service: ContactService::new(json_conn.clone()),
            profile_service: ProfileService::new(json_conn),
            greeting_service,
            clock,
        }
    }
}
