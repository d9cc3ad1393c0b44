//! Check-in eligibility and the check-in transition.
//!
//! A check-in is allowed once per *local calendar date*. This is deliberately
//! not a rolling 24-hour window, and the configured frequency plays no part:
//! a user on "every 2 days" can still check in on each new date.

use chrono::{DateTime, TimeZone, Utc};
use shared::{AppState, CheckInDraft, LogEntry};

use super::rejection::Rejection;

/// Whether two instants fall on the same calendar date in `a`'s time zone
pub fn same_calendar_date<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.with_timezone(&a.timezone()).date_naive()
}

/// True iff the last check-in happened on the same local calendar date as `now`.
///
/// The stored timestamp is projected into `now`'s time zone before the year,
/// month and day are compared.
pub fn is_checked_in_today<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> bool {
    state
        .last_check_in
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|last| same_calendar_date(now, &last.with_timezone(&now.timezone())))
        .unwrap_or(false)
}

/// Record a check-in at `now`.
///
/// The new log entry goes to the front of `logs` and the streak grows by one
/// no matter how long the gap since the previous check-in was.
pub fn check_in<Tz: TimeZone>(
    state: &AppState,
    now: &DateTime<Tz>,
    draft: &CheckInDraft,
) -> Result<AppState, Rejection> {
    if is_checked_in_today(state, now) {
        return Err(Rejection::AlreadyCheckedInToday);
    }

    let timestamp = now.timestamp_millis();
    let entry = LogEntry {
        timestamp,
        tags: draft.tags.clone(),
        note: draft.note.clone(),
        happiness: draft.mood,
    };

    let mut next = state.clone();
    next.last_check_in = Some(timestamp);
    next.check_in_streak = state.check_in_streak.saturating_add(1);
    next.logs.insert(0, entry);

    Ok(next)
}
