use shared::MAX_EMERGENCY_CONTACTS;
use thiserror::Error;

/// Why a state transition refused to change anything.
///
/// Rejections are not failures: the state is left exactly as it was and the
/// caller decides whether to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("already checked in today")]
    AlreadyCheckedInToday,

    #[error("emergency contact list is full ({} max)", MAX_EMERGENCY_CONTACTS)]
    ContactListFull,

    #[error("emergency contact needs a name")]
    MissingContactName,

    #[error("emergency contact needs a phone number or an email address")]
    MissingContactChannel,

    #[error("no emergency contact at position {index}")]
    ContactIndexOutOfRange { index: usize },
}
