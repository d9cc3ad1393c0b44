use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of emergency contacts a user may register
pub const MAX_EMERGENCY_CONTACTS: usize = 2;

/// Mood preselected by the check-in form
pub const DEFAULT_MOOD: u8 = 3;

/// Inclusive bounds of the happiness scale
pub const MIN_MOOD: u8 = 1;
pub const MAX_MOOD: u8 = 5;

/// Tags offered as one-tap chips next to the check-in button
pub const PRESET_TAGS: [&str; 3] = ["All good", "A bit tired", "Need help"];

/// A person to be told when check-ins lapse.
///
/// Contacts have no identity beyond their position in the list, so two
/// contacts with identical fields are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    /// Phone number used for SMS alerts (may be empty if email is set)
    pub phone: String,
    /// Email address used for mail alerts (may be empty if phone is set)
    pub email: String,
}

impl EmergencyContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// A contact needs a name and at least one way to reach them
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_channel(&self) -> bool {
        !self.phone.trim().is_empty() || !self.email.trim().is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.has_name() && self.has_channel()
    }
}

/// How often the user promises to check in.
///
/// Stored as the strings "1" and "2". Only display text depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckInFrequency {
    #[default]
    #[serde(rename = "1")]
    Daily,
    #[serde(rename = "2")]
    TwoDays,
}

impl CheckInFrequency {
    /// The other frequency
    pub fn toggled(self) -> Self {
        match self {
            CheckInFrequency::Daily => CheckInFrequency::TwoDays,
            CheckInFrequency::TwoDays => CheckInFrequency::Daily,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            CheckInFrequency::Daily => 1,
            CheckInFrequency::TwoDays => 2,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CheckInFrequency::Daily => "Check in every day",
            CheckInFrequency::TwoDays => "Check in every 2 days",
        }
    }
}

impl fmt::Display for CheckInFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// One successful check-in. Written once, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Epoch milliseconds of the check-in
    pub timestamp: i64,
    pub tags: Vec<String>,
    pub note: String,
    /// 1-5 happiness scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness: Option<u8>,
}

impl LogEntry {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// The whole persisted aggregate, serialized verbatim as one JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// True until onboarding completes
    pub is_first_time: bool,
    pub nickname: String,
    pub real_name: String,
    /// At most `MAX_EMERGENCY_CONTACTS`, insertion order
    pub emergency_contacts: Vec<EmergencyContact>,
    pub frequency: CheckInFrequency,
    /// Epoch milliseconds of the most recent check-in
    pub last_check_in: Option<i64>,
    /// Incremented on every check-in, never reset on a lapse
    pub check_in_streak: u32,
    /// Newest first
    pub logs: Vec<LogEntry>,
    /// Reserved; nothing reads or writes it yet
    pub paused_until: Option<i64>,
    /// Reserved; nothing reads or writes it yet
    pub is_notifications_enabled: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            is_first_time: true,
            nickname: String::new(),
            real_name: String::new(),
            emergency_contacts: Vec::new(),
            frequency: CheckInFrequency::Daily,
            last_check_in: None,
            check_in_streak: 0,
            logs: Vec::new(),
            paused_until: None,
            is_notifications_enabled: true,
        }
    }
}

impl AppState {
    pub fn contacts_full(&self) -> bool {
        self.emergency_contacts.len() >= MAX_EMERGENCY_CONTACTS
    }

    /// Nickname to address the user by, falling back to "friend"
    pub fn display_name(&self) -> &str {
        let nickname = self.nickname.trim();
        if nickname.is_empty() {
            "friend"
        } else {
            nickname
        }
    }
}

/// What the user filled in on the check-in form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckInDraft {
    pub tags: Vec<String>,
    pub note: String,
    pub mood: Option<u8>,
}

impl CheckInDraft {
    /// Build a draft, trimming input and keeping tags set-like.
    ///
    /// Blank tags are dropped and repeated tags keep their first position.
    pub fn new<I, S>(tags: I, note: impl Into<String>, mood: Option<u8>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into().trim().to_string();
            if !tag.is_empty() && !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            tags: unique,
            note: note.into().trim().to_string(),
            mood,
        }
    }

    pub fn has_valid_mood(&self) -> bool {
        self.mood.map_or(true, |m| (MIN_MOOD..=MAX_MOOD).contains(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> AppState {
        AppState {
            is_first_time: false,
            nickname: "Ann".to_string(),
            real_name: "Ann Lee".to_string(),
            emergency_contacts: vec![
                EmergencyContact::new("Bob", "555", ""),
                EmergencyContact::new("Cat", "", "cat@example.com"),
            ],
            frequency: CheckInFrequency::TwoDays,
            last_check_in: Some(1_700_000_000_000),
            check_in_streak: 7,
            logs: vec![
                LogEntry {
                    timestamp: 1_700_000_000_000,
                    tags: vec!["All good".to_string()],
                    note: "sunny".to_string(),
                    happiness: Some(5),
                },
                LogEntry {
                    timestamp: 1_699_900_000_000,
                    tags: vec![],
                    note: String::new(),
                    happiness: None,
                },
            ],
            paused_until: Some(1_800_000_000_000),
            is_notifications_enabled: false,
        }
    }

    #[test]
    fn test_state_round_trip() {
        let state = sample_state();
        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let empty = AppState::default();
        let json = serde_json::to_string(&empty).unwrap();
        assert_eq!(serde_json::from_str::<AppState>(&json).unwrap(), empty);
    }

    #[test]
    fn test_persisted_field_names() {
        let value = serde_json::to_value(AppState::default()).unwrap();
        assert_eq!(value["isFirstTime"], true);
        assert_eq!(value["frequency"], "1");
        assert!(value["lastCheckIn"].is_null());
        assert_eq!(value["checkInStreak"], 0);
        assert!(value["pausedUntil"].is_null());
        assert_eq!(value["isNotificationsEnabled"], true);
        assert!(value["emergencyContacts"].as_array().unwrap().is_empty());
        assert!(value["realName"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_frequency_wire_format_and_toggle() {
        assert_eq!(serde_json::to_string(&CheckInFrequency::TwoDays).unwrap(), "\"2\"");
        let parsed: CheckInFrequency = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(parsed, CheckInFrequency::Daily);
        assert_eq!(CheckInFrequency::Daily.toggled(), CheckInFrequency::TwoDays);
        assert_eq!(CheckInFrequency::TwoDays.toggled().toggled(), CheckInFrequency::TwoDays);
        assert!(serde_json::from_str::<CheckInFrequency>("\"3\"").is_err());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let state: AppState = serde_json::from_str(r#"{"nickname":"Ann","checkInStreak":2}"#).unwrap();
        assert_eq!(state.nickname, "Ann");
        assert_eq!(state.check_in_streak, 2);
        assert!(state.is_first_time);
        assert!(state.is_notifications_enabled);
        assert_eq!(state.frequency, CheckInFrequency::Daily);
    }

    #[test]
    fn test_missing_happiness_is_omitted() {
        let entry = LogEntry {
            timestamp: 1,
            tags: vec![],
            note: String::new(),
            happiness: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("happiness").is_none());
        let back: LogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_contact_validity() {
        assert!(EmergencyContact::new("Bob", "555", "").is_valid());
        assert!(EmergencyContact::new("Bob", "", "bob@example.com").is_valid());
        assert!(!EmergencyContact::new("", "555", "").is_valid());
        assert!(!EmergencyContact::new("  ", "555", "").is_valid());
        assert!(!EmergencyContact::new("Bob", "", " ").is_valid());
    }

    #[test]
    fn test_draft_keeps_tags_set_like() {
        let draft = CheckInDraft::new(["Need help", " ", "All good", "Need help "], "  hi ", Some(4));
        assert_eq!(draft.tags, vec!["Need help".to_string(), "All good".to_string()]);
        assert_eq!(draft.note, "hi");
        assert!(draft.has_valid_mood());
        assert!(!CheckInDraft::new(Vec::<String>::new(), "", Some(6)).has_valid_mood());
        assert!(!CheckInDraft::new(Vec::<String>::new(), "", Some(0)).has_valid_mood());
        assert!(CheckInDraft::default().has_valid_mood());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut state = AppState::default();
        assert_eq!(state.display_name(), "friend");
        state.nickname = " Ann ".to_string();
        assert_eq!(state.display_name(), "Ann");
    }
}
