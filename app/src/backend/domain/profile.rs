//! Profile, frequency and onboarding transitions.

use shared::{AppState, EmergencyContact};

/// Flip between checking in daily and every two days.
///
/// Only the wording shown to the user changes; check-in eligibility stays
/// per calendar date.
pub fn toggle_frequency(state: &AppState) -> AppState {
    let mut next = state.clone();
    next.frequency = state.frequency.toggled();
    next
}

/// Finish the first-run flow.
///
/// The contact list is replaced, not appended to.
pub fn complete_onboarding(state: &AppState, nickname: &str, contact: EmergencyContact) -> AppState {
    let mut next = state.clone();
    next.is_first_time = false;
    next.nickname = nickname.to_string();
    next.emergency_contacts = vec![contact];
    next
}

pub fn set_nickname(state: &AppState, nickname: &str) -> AppState {
    let mut next = state.clone();
    next.nickname = nickname.to_string();
    next
}

pub fn set_real_name(state: &AppState, real_name: &str) -> AppState {
    let mut next = state.clone();
    next.real_name = real_name.to_string();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CheckInFrequency;

    #[test]
    fn test_toggle_frequency_flips() {
        let state = AppState::default();
        let once = toggle_frequency(&state);
        assert_eq!(once.frequency, CheckInFrequency::TwoDays);
        assert_eq!(toggle_frequency(&once).frequency, CheckInFrequency::Daily);
        assert_eq!(state.frequency, CheckInFrequency::Daily);
    }

    #[test]
    fn test_complete_onboarding_from_default() {
        let state = AppState::default();
        let contact = EmergencyContact::new("Bob", "555", "");

        let next = complete_onboarding(&state, "Ann", contact.clone());
        assert!(!next.is_first_time);
        assert_eq!(next.nickname, "Ann");
        assert_eq!(next.emergency_contacts, vec![contact]);
        assert_eq!(next.check_in_streak, 0);
        assert!(next.logs.is_empty());
    }

    #[test]
    fn test_complete_onboarding_replaces_contacts() {
        let mut state = AppState::default();
        state.emergency_contacts = vec![
            EmergencyContact::new("Old", "1", ""),
            EmergencyContact::new("Older", "2", ""),
        ];

        let contact = EmergencyContact::new("Bob", "", "bob@example.com");
        let next = complete_onboarding(&state, "Ann", contact.clone());
        assert_eq!(next.emergency_contacts, vec![contact]);
    }

    #[test]
    fn test_name_updates_leave_everything_else() {
        let state = AppState::default();
        let named = set_real_name(&set_nickname(&state, "Ann"), "Ann Lee");
        assert_eq!(named.nickname, "Ann");
        assert_eq!(named.real_name, "Ann Lee");
        assert_eq!(
            AppState {
                nickname: String::new(),
                real_name: String::new(),
                ..named
            },
            state
        );
    }
}
