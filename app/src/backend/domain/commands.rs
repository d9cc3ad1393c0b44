//! Domain-level command and query types used by the services.
//! The CLI builds these from its arguments; they never reach storage.

use shared::AppState;

use super::rejection::Rejection;

/// Outcome of any state-changing service call.
///
/// `state` is the state after the call. When the transition was refused it
/// is the unchanged persisted state and nothing was written.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub state: AppState,
    pub rejection: Option<Rejection>,
}

impl TransitionResult {
    pub fn applied(state: AppState) -> Self {
        Self {
            state,
            rejection: None,
        }
    }

    pub fn rejected(state: AppState, rejection: Rejection) -> Self {
        Self {
            state,
            rejection: Some(rejection),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }
}

pub mod check_in {
    use chrono::{DateTime, Local};
    use shared::{CheckInDraft, CheckInFrequency, LogEntry};

    /// Input for recording today's check-in.
    #[derive(Debug, Clone, Default)]
    pub struct CheckInCommand {
        pub draft: CheckInDraft,
    }

    /// Query parameters for listing the log.
    #[derive(Debug, Clone, Default)]
    pub struct LogListQuery {
        pub limit: Option<usize>,
    }

    /// Result of listing the log, newest first.
    #[derive(Debug, Clone)]
    pub struct LogListResult {
        pub entries: Vec<LogEntry>,
        pub total: usize,
    }

    /// Snapshot of where the user stands today.
    #[derive(Debug, Clone)]
    pub struct CheckInStatus {
        pub now: DateTime<Local>,
        pub checked_in_today: bool,
        pub streak: u32,
        pub last_check_in: Option<DateTime<Local>>,
        pub frequency: CheckInFrequency,
    }
}

pub mod contacts {
    /// Input for adding an emergency contact.
    #[derive(Debug, Clone)]
    pub struct AddContactCommand {
        pub name: String,
        pub phone: String,
        pub email: String,
    }

    /// Input for removing a contact by 0-based position.
    #[derive(Debug, Clone)]
    pub struct RemoveContactCommand {
        pub index: usize,
    }
}

pub mod profile {
    /// Input for finishing the first-run flow.
    #[derive(Debug, Clone)]
    pub struct CompleteOnboardingCommand {
        pub nickname: String,
        pub contact_name: String,
        pub contact_phone: String,
        pub contact_email: String,
    }

    /// Partial profile update; `None` leaves a field alone.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub nickname: Option<String>,
        pub real_name: Option<String>,
    }
}
