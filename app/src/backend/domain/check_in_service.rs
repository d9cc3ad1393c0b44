use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use log::{info, warn};
use shared::{MAX_MOOD, MIN_MOOD};
use std::sync::Arc;

use crate::backend::domain::check_in::{check_in, is_checked_in_today};
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::check_in::{
    CheckInCommand, CheckInStatus, LogListQuery, LogListResult,
};
use crate::backend::domain::commands::TransitionResult;
use crate::backend::storage::json::{JsonConnection, StateRepository};
use crate::backend::storage::traits::StateStorage;

/// Service for daily check-ins and the check-in log
#[derive(Clone)]
pub struct CheckInService {
    state_repository: StateRepository,
    clock: Arc<dyn Clock>,
}

impl CheckInService {
    pub fn new(json_conn: Arc<JsonConnection>, clock: Arc<dyn Clock>) -> Self {
        let state_repository = StateRepository::new(json_conn);
        Self {
            state_repository,
            clock,
        }
    }

    /// Record today's check-in and persist it.
    ///
    /// A second check-in on the same calendar date is refused without
    /// touching storage.
    pub fn check_in(&self, command: CheckInCommand) -> Result<TransitionResult> {
        if !command.draft.has_valid_mood() {
            return Err(anyhow::anyhow!(
                "Mood must be between {} and {}",
                MIN_MOOD,
                MAX_MOOD
            ));
        }

        let state = self.state_repository.load_state();
        let now = self.clock.now();

        match check_in(&state, &now, &command.draft) {
            Ok(next) => {
                self.state_repository.save_state(&next)?;
                info!(
                    "Checked in at {} (streak {}, {} log entries)",
                    now.to_rfc3339(),
                    next.check_in_streak,
                    next.logs.len()
                );
                Ok(TransitionResult::applied(next))
            }
            Err(rejection) => {
                warn!("Check-in refused: {}", rejection);
                Ok(TransitionResult::rejected(state, rejection))
            }
        }
    }

    /// Where the user stands right now
    pub fn status(&self) -> Result<CheckInStatus> {
        let state = self.state_repository.load_state();
        let now = self.clock.now();

        let last_check_in = state
            .last_check_in
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|last| last.with_timezone(&Local));

        Ok(CheckInStatus {
            checked_in_today: is_checked_in_today(&state, &now),
            streak: state.check_in_streak,
            last_check_in,
            frequency: state.frequency,
            now,
        })
    }

    /// List log entries, newest first
    pub fn list_logs(&self, query: LogListQuery) -> Result<LogListResult> {
        let state = self.state_repository.load_state();
        let total = state.logs.len();

        let entries = match query.limit {
            Some(limit) => state.logs.into_iter().take(limit).collect(),
            None => state.logs,
        };

        Ok(LogListResult { entries, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::clock::FixedClock;
    use crate::backend::domain::rejection::Rejection;
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use chrono::{Duration, TimeZone};
    use shared::CheckInDraft;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn setup_test() -> (CheckInService, Arc<FixedClock>, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let clock = Arc::new(FixedClock::new(noon()));
        let service = CheckInService::new(env.connection.clone(), clock.clone());
        (service, clock, env)
    }

    fn command(note: &str, mood: Option<u8>) -> CheckInCommand {
        CheckInCommand {
            draft: CheckInDraft::new(["All good"], note, mood),
        }
    }

    #[test]
    fn test_check_in_persists() {
        let (service, _clock, env) = setup_test();

        let result = service.check_in(command("fine", Some(4))).unwrap();
        assert!(result.is_applied());
        assert_eq!(result.state.check_in_streak, 1);

        let saved = env.state_repository().load_state();
        assert_eq!(saved, result.state);
        assert_eq!(saved.logs[0].note, "fine");
        assert_eq!(saved.logs[0].happiness, Some(4));
        assert_eq!(saved.last_check_in, Some(noon().timestamp_millis()));
    }

    #[test]
    fn test_second_check_in_same_day_is_not_saved() {
        let (service, clock, env) = setup_test();

        service.check_in(command("morning", Some(3))).unwrap();
        clock.advance(Duration::hours(3));

        let result = service.check_in(command("afternoon", Some(5))).unwrap();
        assert_eq!(result.rejection, Some(Rejection::AlreadyCheckedInToday));
        assert_eq!(result.state.check_in_streak, 1);

        let saved = env.state_repository().load_state();
        assert_eq!(saved.logs.len(), 1);
        assert_eq!(saved.logs[0].note, "morning");
    }

    #[test]
    fn test_next_day_check_in_grows_streak() {
        let (service, clock, _env) = setup_test();

        service.check_in(command("day one", Some(3))).unwrap();
        clock.advance(Duration::days(1));
        let result = service.check_in(command("day two", Some(2))).unwrap();

        assert!(result.is_applied());
        assert_eq!(result.state.check_in_streak, 2);
        assert_eq!(result.state.logs[0].note, "day two");
        assert_eq!(result.state.logs[1].note, "day one");
    }

    #[test]
    fn test_invalid_mood_is_an_error() {
        let (service, _clock, env) = setup_test();

        assert!(service.check_in(command("", Some(0))).is_err());
        assert!(service.check_in(command("", Some(6))).is_err());
        assert!(!env.state_repository().state_path().exists());
    }

    #[test]
    fn test_status_reflects_check_in() {
        let (service, clock, _env) = setup_test();

        let before = service.status().unwrap();
        assert!(!before.checked_in_today);
        assert_eq!(before.streak, 0);
        assert!(before.last_check_in.is_none());

        service.check_in(command("", None)).unwrap();
        let after = service.status().unwrap();
        assert!(after.checked_in_today);
        assert_eq!(after.streak, 1);
        assert_eq!(after.last_check_in, Some(noon()));

        clock.advance(Duration::days(1));
        assert!(!service.status().unwrap().checked_in_today);
    }

    #[test]
    fn test_list_logs_with_limit() {
        let (service, clock, _env) = setup_test();

        for note in ["a", "b", "c"] {
            service.check_in(command(note, Some(3))).unwrap();
            clock.advance(Duration::days(1));
        }

        let all = service.list_logs(LogListQuery::default()).unwrap();
        assert_eq!(all.total, 3);
        assert_eq!(all.entries.len(), 3);
        assert_eq!(all.entries[0].note, "c");

        let limited = service.list_logs(LogListQuery { limit: Some(2) }).unwrap();
        assert_eq!(limited.total, 3);
        let notes: Vec<&str> = limited.entries.iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, vec!["c", "b"]);
    }
}
