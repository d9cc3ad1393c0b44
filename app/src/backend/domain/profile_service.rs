use anyhow::{Context, Result};
use log::{info, warn};
use shared::{AppState, EmergencyContact};
use std::sync::Arc;

use crate::backend::domain::commands::profile::{CompleteOnboardingCommand, UpdateProfileCommand};
use crate::backend::domain::contacts::validate_contact;
use crate::backend::domain::profile::{complete_onboarding, set_nickname, set_real_name, toggle_frequency};
use crate::backend::storage::json::{JsonConnection, StateRepository};
use crate::backend::storage::traits::StateStorage;

/// Service for the user's profile, onboarding, frequency and data reset
#[derive(Clone)]
pub struct ProfileService {
    state_repository: StateRepository,
}

impl ProfileService {
    pub fn new(json_conn: Arc<JsonConnection>) -> Self {
        let state_repository = StateRepository::new(json_conn);
        Self { state_repository }
    }

    /// Current persisted state
    pub fn get_state(&self) -> Result<AppState> {
        Ok(self.state_repository.load_state())
    }

    /// Finish the first-run flow with a nickname and the first contact
    pub fn complete_onboarding(&self, command: CompleteOnboardingCommand) -> Result<AppState> {
        let state = self.state_repository.load_state();
        if !state.is_first_time {
            return Err(anyhow::anyhow!("Onboarding has already been completed"));
        }

        let nickname = command.nickname.trim();
        validate_nickname(nickname)?;

        let contact = EmergencyContact::new(
            command.contact_name.trim(),
            command.contact_phone.trim(),
            command.contact_email.trim(),
        );
        validate_contact(&contact).context("Invalid emergency contact")?;

        let next = complete_onboarding(&state, nickname, contact);
        self.state_repository.save_state(&next)?;

        info!("Completed onboarding for {}", next.nickname);
        Ok(next)
    }

    /// Update nickname and/or real name
    pub fn update_profile(&self, command: UpdateProfileCommand) -> Result<AppState> {
        let mut next = self.state_repository.load_state();

        if let Some(nickname) = command.nickname.as_deref() {
            let nickname = nickname.trim();
            validate_nickname(nickname)?;
            next = set_nickname(&next, nickname);
        }
        if let Some(real_name) = command.real_name.as_deref() {
            next = set_real_name(&next, real_name.trim());
        }

        self.state_repository.save_state(&next)?;
        info!("Updated profile");
        Ok(next)
    }

    /// Switch between daily and every-two-days check-ins
    pub fn toggle_frequency(&self) -> Result<AppState> {
        let next = toggle_frequency(&self.state_repository.load_state());
        self.state_repository.save_state(&next)?;
        info!("Check-in frequency is now every {} day(s)", next.frequency.days());
        Ok(next)
    }

    /// Erase everything and start over from the first-run state
    pub fn reset_all_data(&self) -> Result<AppState> {
        warn!("Erasing all saved data");
        self.state_repository.clear_state()?;
        Ok(self.state_repository.load_state())
    }
}

fn validate_nickname(nickname: &str) -> Result<()> {
    if nickname.is_empty() {
        return Err(anyhow::anyhow!("Nickname cannot be empty"));
    }
    Ok(())
}
