use anyhow::Result;
use log::{info, warn};
use shared::{EmergencyContact, MAX_EMERGENCY_CONTACTS};
use std::sync::Arc;

use crate::backend::domain::commands::contacts::{AddContactCommand, RemoveContactCommand};
use crate::backend::domain::commands::TransitionResult;
use crate::backend::domain::contacts::{add_contact, remove_contact};
use crate::backend::storage::json::{JsonConnection, StateRepository};
use crate::backend::storage::traits::StateStorage;

/// Service for managing the emergency contact list
#[derive(Clone)]
pub struct ContactService {
    state_repository: StateRepository,
}

impl ContactService {
    pub fn new(json_conn: Arc<JsonConnection>) -> Self {
        let state_repository = StateRepository::new(json_conn);
        Self { state_repository }
    }

    /// List contacts in insertion order
    pub fn list_contacts(&self) -> Result<Vec<EmergencyContact>> {
        let contacts = self.state_repository.load_state().emergency_contacts;
        info!("Found {} of {} emergency contacts", contacts.len(), MAX_EMERGENCY_CONTACTS);
        Ok(contacts)
    }

    /// Append a contact; refused when the list is full or the contact is
    /// missing its name or every way to reach them
    pub fn add_contact(&self, command: AddContactCommand) -> Result<TransitionResult> {
        let contact = EmergencyContact::new(
            command.name.trim(),
            command.phone.trim(),
            command.email.trim(),
        );
        let state = self.state_repository.load_state();

        match add_contact(&state, contact) {
            Ok(next) => {
                self.state_repository.save_state(&next)?;
                info!("Added emergency contact ({} total)", next.emergency_contacts.len());
                Ok(TransitionResult::applied(next))
            }
            Err(rejection) => {
                warn!("Emergency contact not added: {}", rejection);
                Ok(TransitionResult::rejected(state, rejection))
            }
        }
    }

    /// Remove the contact at a 0-based position
    pub fn remove_contact(&self, command: RemoveContactCommand) -> Result<TransitionResult> {
        let state = self.state_repository.load_state();

        match remove_contact(&state, command.index) {
            Ok(next) => {
                self.state_repository.save_state(&next)?;
                info!(
                    "Removed emergency contact at position {} ({} left)",
                    command.index,
                    next.emergency_contacts.len()
                );
                Ok(TransitionResult::applied(next))
            }
            Err(rejection) => {
                warn!("Emergency contact not removed: {}", rejection);
                Ok(TransitionResult::rejected(state, rejection))
            }
        }
    }
}
