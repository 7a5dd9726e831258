//! Input download and answer submission
//!
//! Every operation reports its outcome as a value; nothing here aborts the
//! process. The session token is handed in by the caller.

use crate::layout;
use crate::storage::Storage;
use crate::unit::{EventCalendar, Stage, Unit};
use aoc_http_client::{AocClient, AocError, SubmissionResult};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use zeroize::Zeroizing;

/// Pause between consecutive downloads in [`Fetcher::fetch_all`]
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Outcome of fetching one day's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Input downloaded and written
    Saved { path: PathBuf, bytes: usize },
    /// Input file already present; nothing was requested
    AlreadyPresent(PathBuf),
    /// Puzzle not unlocked yet; nothing was requested
    NotReleased { unlocks_at: DateTime<Utc> },
    /// Request or write failed
    Failed(String),
}

impl FetchOutcome {
    /// Whether the remote site was contacted
    fn contacted_remote(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. } | FetchOutcome::Failed(_))
    }
}

/// Outcome of submitting one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The site replied; see the classified verdict
    Verdict(SubmissionResult),
    /// The request failed or the site answered with an error status
    Failed(String),
}

/// Downloads puzzle inputs into a [`Storage`] and submits answers
pub struct Fetcher<S> {
    client: AocClient,
    session: Zeroizing<String>,
    calendar: EventCalendar,
    storage: S,
    delay: Duration,
}

impl<S: Storage> Fetcher<S> {
    pub fn new(
        client: AocClient,
        session: Zeroizing<String>,
        calendar: EventCalendar,
        storage: S,
    ) -> Self {
        Self {
            client,
            session,
            calendar,
            storage,
            delay: DEFAULT_FETCH_DELAY,
        }
    }

    /// Override the pause between downloads in `fetch_all`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calendar(&self) -> &EventCalendar {
        &self.calendar
    }

    /// Download the input of `unit` unless it is already on disk
    pub fn fetch(&self, unit: Unit, now: DateTime<Utc>) -> FetchOutcome {
        self.fetch_inner(unit, now, false)
    }

    /// Download the input of `unit`, replacing any existing file
    pub fn refetch(&self, unit: Unit, now: DateTime<Utc>) -> FetchOutcome {
        self.fetch_inner(unit, now, true)
    }

    fn fetch_inner(&self, unit: Unit, now: DateTime<Utc>, overwrite: bool) -> FetchOutcome {
        if !self.calendar.is_unlocked(unit, now) {
            return FetchOutcome::NotReleased {
                unlocks_at: self.calendar.unlock_instant(unit),
            };
        }

        let path = layout::input_path(unit);
        if !overwrite && self.storage.exists(&path) {
            return FetchOutcome::AlreadyPresent(path);
        }

        tracing::debug!(year = self.calendar.year(), day = unit.get(), "requesting input");
        let body = match self
            .client
            .get_input(self.calendar.year(), unit.get(), &self.session)
        {
            Ok(body) => body,
            Err(e) => return FetchOutcome::Failed(describe_error(&e)),
        };

        match self.storage.write(&path, &body) {
            Ok(()) => FetchOutcome::Saved {
                path,
                bytes: body.len(),
            },
            Err(e) => FetchOutcome::Failed(format!("Failed to write {}: {}", path.display(), e)),
        }
    }

    /// Fetch every released day that is not on disk yet
    ///
    /// `report` sees each outcome as soon as it is known. Consecutive
    /// downloads are separated by the configured delay.
    pub fn fetch_all<F>(&self, now: DateTime<Utc>, mut report: F) -> Vec<(Unit, FetchOutcome)>
    where
        F: FnMut(Unit, &FetchOutcome),
    {
        let mut outcomes = Vec::new();
        let mut contacted = false;

        for unit in Unit::up_to(self.calendar.released_max(now)) {
            let path = layout::input_path(unit);
            let outcome = if self.storage.exists(&path) {
                FetchOutcome::AlreadyPresent(path)
            } else {
                if contacted && !self.delay.is_zero() {
                    std::thread::sleep(self.delay);
                }
                self.fetch(unit, now)
            };

            contacted |= outcome.contacted_remote();
            report(unit, &outcome);
            outcomes.push((unit, outcome));
        }

        outcomes
    }

    /// Submit `answer` for one part of `unit`
    pub fn submit(&self, unit: Unit, stage: Stage, answer: &str) -> SubmitOutcome {
        tracing::debug!(day = unit.get(), part = stage.number(), "submitting answer");
        match self.client.submit_answer(
            self.calendar.year(),
            unit.get(),
            stage.number(),
            answer.trim(),
            &self.session,
        ) {
            Ok(result) => SubmitOutcome::Verdict(result),
            Err(e) => SubmitOutcome::Failed(describe_error(&e)),
        }
    }
}

fn describe_error(error: &AocError) -> String {
    match error {
        AocError::InvalidStatus { status, body } if !body.trim().is_empty() => {
            format!("{}\n{}", status, body.trim_end())
        }
        AocError::InvalidStatus { status, .. } => status.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use aoc_http_client::AnswerHint;
    use chrono::TimeZone;
    use std::path::Path;
    use std::time::Instant;

    fn day(n: u8) -> Unit {
        Unit::new(n).unwrap()
    }

    fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
    }

    fn fetcher<'a>(
        server: &mockito::Server,
        storage: &'a MemoryStorage,
    ) -> Fetcher<&'a MemoryStorage> {
        paced_fetcher(server, storage, Duration::ZERO)
    }

    fn paced_fetcher<'a>(
        server: &mockito::Server,
        storage: &'a MemoryStorage,
        delay: Duration,
    ) -> Fetcher<&'a MemoryStorage> {
        let client = AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();
        Fetcher::new(
            client,
            Zeroizing::new("abc123".to_string()),
            EventCalendar::new(2024).unwrap(),
            storage,
        )
        .with_delay(delay)
    }

    #[test]
    fn test_fetch_saves_body_verbatim() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2024/day/2/input")
            .match_header("cookie", "session=abc123")
            .with_status(200)
            .with_body("7 6 4 2 1\n1 2 7 8 9\n")
            .expect(1)
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).fetch(day(2), at(12, 20, 0));

        assert_eq!(
            outcome,
            FetchOutcome::Saved {
                path: PathBuf::from("inputs/day02.txt"),
                bytes: 20,
            }
        );
        assert_eq!(
            storage.get(Path::new("inputs/day02.txt")).as_deref(),
            Some("7 6 4 2 1\n1 2 7 8 9\n")
        );
        mock.assert();
    }

    #[test]
    fn test_fetch_before_unlock_does_nothing() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).refetch(day(10), at(12, 10, 4));

        assert_eq!(
            outcome,
            FetchOutcome::NotReleased {
                unlocks_at: at(12, 10, 5)
            }
        );
        assert_eq!(storage.write_count(), 0);
        assert!(!storage.exists(Path::new("inputs/day10.txt")));
        mock.assert();
    }

    #[test]
    fn test_fetch_existing_is_noop_unless_forced() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2024/day/1/input")
            .with_status(200)
            .with_body("fresh")
            .expect(1)
            .create();

        let storage = MemoryStorage::new().with_file("inputs/day01.txt", "cached");
        let fetcher = fetcher(&server, &storage);

        let outcome = fetcher.fetch(day(1), at(12, 20, 0));
        assert_eq!(outcome, FetchOutcome::AlreadyPresent(PathBuf::from("inputs/day01.txt")));
        assert_eq!(storage.get(Path::new("inputs/day01.txt")).as_deref(), Some("cached"));

        let outcome = fetcher.refetch(day(1), at(12, 20, 0));
        assert!(matches!(outcome, FetchOutcome::Saved { bytes: 5, .. }));
        assert_eq!(storage.get(Path::new("inputs/day01.txt")).as_deref(), Some("fresh"));
        mock.assert();
    }

    #[test]
    fn test_fetch_failure_is_reported_not_written() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2024/day/3/input")
            .with_status(400)
            .with_body("Puzzle inputs differ by user.  Please log in to get your puzzle input.")
            .expect(1)
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).fetch(day(3), at(12, 20, 0));

        match &outcome {
            FetchOutcome::Failed(reason) => {
                assert!(reason.contains("400"));
                assert!(reason.contains("Please log in"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert_eq!(storage.write_count(), 0);
        mock.assert();
    }

    #[test]
    fn test_fetch_all_skips_existing_and_stops_at_release() {
        let mut server = mockito::Server::new();
        let day1 = server.mock("GET", "/2024/day/1/input").expect(0).create();
        let day2 = server
            .mock("GET", "/2024/day/2/input")
            .with_status(200)
            .with_body("two")
            .expect(1)
            .create();
        let day3 = server
            .mock("GET", "/2024/day/3/input")
            .with_status(200)
            .with_body("three")
            .expect(1)
            .create();
        let day4 = server.mock("GET", "/2024/day/4/input").expect(0).create();

        let storage = MemoryStorage::new().with_file("inputs/day01.txt", "one");
        let mut reported = Vec::new();
        let outcomes = fetcher(&server, &storage)
            .fetch_all(at(12, 3, 12), |unit, outcome| reported.push((unit, outcome.clone())));

        assert_eq!(outcomes.len(), 3);
        assert_eq!(reported, outcomes);
        assert!(matches!(outcomes[0].1, FetchOutcome::AlreadyPresent(_)));
        assert!(matches!(outcomes[1].1, FetchOutcome::Saved { .. }));
        assert!(matches!(outcomes[2].1, FetchOutcome::Saved { .. }));
        assert_eq!(storage.get(Path::new("inputs/day03.txt")).as_deref(), Some("three"));

        day1.assert();
        day2.assert();
        day3.assert();
        day4.assert();
    }

    #[test]
    fn test_fetch_all_pauses_between_downloads() {
        let delay = Duration::from_millis(150);
        let mut server = mockito::Server::new();
        let mocks: Vec<_> = (2..=3)
            .map(|n| {
                server
                    .mock("GET", format!("/2024/day/{}/input", n).as_str())
                    .with_status(200)
                    .with_body("data")
                    .expect(1)
                    .create()
            })
            .collect();

        let storage = MemoryStorage::new().with_file("inputs/day01.txt", "one");
        let started = Instant::now();
        let mut reported_at = Vec::new();
        paced_fetcher(&server, &storage, delay)
            .fetch_all(at(12, 3, 12), |unit, _| reported_at.push((unit, started.elapsed())));

        assert_eq!(reported_at.len(), 3);
        let (_, day2) = reported_at[1];
        let (_, day3) = reported_at[2];
        // No pause before the first download
        assert!(day2 < delay, "first download waited {:?}", day2);
        assert!(day3 - day2 >= delay, "downloads {:?} apart", day3 - day2);
        for mock in mocks {
            mock.assert();
        }
    }

    #[test]
    fn test_cached_days_and_single_fetch_do_not_pause() {
        let delay = Duration::from_millis(150);
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2024/day/4/input")
            .with_status(200)
            .with_body("four")
            .expect(1)
            .create();

        let storage = MemoryStorage::new()
            .with_file("inputs/day01.txt", "one")
            .with_file("inputs/day02.txt", "two")
            .with_file("inputs/day03.txt", "three");
        let fetcher = paced_fetcher(&server, &storage, delay);

        let started = Instant::now();
        let outcomes = fetcher.fetch_all(at(12, 3, 12), |_, _| {});
        assert_eq!(outcomes.len(), 3);
        assert!(started.elapsed() < delay);

        let started = Instant::now();
        let outcome = fetcher.fetch(day(4), at(12, 20, 0));
        assert!(matches!(outcome, FetchOutcome::Saved { .. }));
        assert!(started.elapsed() < delay);
        mock.assert();
    }

    #[test]
    fn test_fetch_all_before_event_is_empty() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create();

        let storage = MemoryStorage::new();
        let outcomes = fetcher(&server, &storage).fetch_all(at(11, 30, 12), |_, _| {});

        assert!(outcomes.is_empty());
        mock.assert();
    }

    #[test]
    fn test_submit_classifies_reply() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2024/day/5/answer")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("level".into(), "2".into()),
                mockito::Matcher::UrlEncoded("answer".into(), "4321".into()),
            ]))
            .with_status(200)
            .with_body(
                "<html><body><main><article><p>That's not the right answer; \
                 your answer is too low.</p></article></main></body></html>",
            )
            .expect(1)
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).submit(day(5), Stage::Two, " 4321\n");

        assert_eq!(
            outcome,
            SubmitOutcome::Verdict(SubmissionResult::Incorrect {
                hint: Some(AnswerHint::TooLow)
            })
        );
        mock.assert();
    }

    #[test]
    fn test_submit_already_complete() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2024/day/6/answer")
            .with_status(200)
            .with_body(
                "<main><p>You don't seem to be solving the right level.  \
                 Did you already complete it?</p></main>",
            )
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).submit(day(6), Stage::One, "1");

        assert_eq!(outcome, SubmitOutcome::Verdict(SubmissionResult::AlreadyCompleted));
        mock.assert();
    }

    #[test]
    fn test_submit_http_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2024/day/7/answer")
            .with_status(500)
            .create();

        let storage = MemoryStorage::new();
        let outcome = fetcher(&server, &storage).submit(day(7), Stage::One, "1");

        assert!(matches!(outcome, SubmitOutcome::Failed(ref reason) if reason.contains("500")));
        mock.assert();
    }
}
