//! Text shown to the user: salutations, mood labels and log lines.

use chrono::{DateTime, Local, TimeZone, Timelike};
use shared::LogEntry;

/// Shown in place of tags when a check-in had none
pub const NO_TAGS_TEXT: &str = "Safe and well";

/// Salutation for the hour of the day (0-23)
pub fn salutation(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning, have a lovely day"
    } else if hour < 18 {
        "Good afternoon, remember to take a break"
    } else {
        "Good evening, the world is still warm"
    }
}

pub fn salutation_at<Tz: TimeZone>(now: &DateTime<Tz>) -> &'static str {
    salutation(now.hour())
}

pub fn mood_label(mood: u8) -> Option<&'static str> {
    match mood {
        1 => Some("Sad"),
        2 => Some("So-so"),
        3 => Some("Okay"),
        4 => Some("Happy"),
        5 => Some("Great"),
        _ => None,
    }
}

/// Formatted pieces of one log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLogEntry {
    pub date: String,
    pub time: String,
    pub mood: Option<&'static str>,
    pub tags: String,
    pub note: Option<String>,
}

/// Format a log entry in the given time zone
pub fn format_log_entry<Tz: TimeZone>(entry: &LogEntry, tz: &Tz) -> FormattedLogEntry
where
    Tz::Offset: std::fmt::Display,
{
    let when = entry
        .recorded_at()
        .unwrap_or_default()
        .with_timezone(tz);

    let tags = if entry.tags.is_empty() {
        NO_TAGS_TEXT.to_string()
    } else {
        entry.tags.join(", ")
    };

    FormattedLogEntry {
        date: when.format("%Y-%m-%d").to_string(),
        time: when.format("%H:%M").to_string(),
        mood: entry.happiness.and_then(mood_label),
        tags,
        note: (!entry.note.is_empty()).then(|| entry.note.clone()),
    }
}

pub fn format_local_log_entry(entry: &LogEntry) -> FormattedLogEntry {
    format_log_entry(entry, &Local)
}
