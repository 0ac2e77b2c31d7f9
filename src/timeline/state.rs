// src/timeline/state.rs
// =============================================================================
// The state behind the timeline screen.
//
// ViewState is a snapshot: every event (submit, fetch done, copy, tick)
// consumes the old snapshot and returns a new one, which is then handed to
// the renderer. Nothing re-renders implicitly.
//
// Fields:
// - repo:      the repository currently shown (or being fetched)
// - commits:   the last successful fetch, newest first
// - loading:   a fetch is in flight
// - message:   an error, or an informational note such as "No commits found."
// - copied:    the hash last copied to the clipboard, cleared after 2 seconds
// =============================================================================

use std::time::{Duration, Instant};

use crate::error::{CommitLogError, FetchError};
use crate::github::{CommitRecord, FetchOutcome, RepoRef};

/// How long the "copied" mark stays next to a hash
pub const COPIED_INDICATOR_TTL: Duration = Duration::from_secs(2);

pub const NO_COMMITS_MESSAGE: &str = "No commits found.";

/// Source of "now" for the copied-indicator timer
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Error(String),
    Info(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Error(text) | StatusMessage::Info(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CopiedHash {
    sha: String,
    at: Instant,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    repo: Option<RepoRef>,
    commits: Vec<CommitRecord>,
    loading: bool,
    message: Option<StatusMessage>,
    copied: Option<CopiedHash>,
}

impl ViewState {
    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn has_error(&self) -> bool {
        matches!(self.message, Some(StatusMessage::Error(_)))
    }

    pub fn copied_sha(&self) -> Option<&str> {
        self.copied.as_ref().map(|c| c.sha.as_str())
    }

    /// Nothing submitted yet
    pub fn is_idle(&self) -> bool {
        self.commits.is_empty() && !self.loading && self.message.is_none()
    }

    // A fetch for `repo` started: previous commits and messages are dropped
    pub fn begin_fetch(self, repo: RepoRef) -> Self {
        Self {
            repo: Some(repo),
            commits: Vec::new(),
            loading: true,
            message: None,
            ..self
        }
    }

    // A fetch completed
    //
    // Whichever completion arrives last overwrites what is shown, even if it
    // belongs to an older submission. `loading` is cleared on any
    // completion. A failed completion only sets the error; commits loaded
    // by an earlier completion stay, labelled with their own repository.
    pub fn fetch_finished(self, repo: RepoRef, result: Result<FetchOutcome, FetchError>) -> Self {
        let (repo, commits, message) = match result {
            Ok(FetchOutcome::Commits(commits)) => (Some(repo), commits, None),
            Ok(FetchOutcome::Empty) => (
                Some(repo),
                Vec::new(),
                Some(StatusMessage::Info(NO_COMMITS_MESSAGE.to_string())),
            ),
            Err(err) => (
                self.repo,
                self.commits,
                Some(StatusMessage::Error(err.to_string())),
            ),
        };

        Self {
            repo,
            commits,
            loading: false,
            message,
            ..self
        }
    }

    // A submission failed before or during the fetch; what is on screen
    // stays, only the message changes
    pub fn submission_failed(self, err: &CommitLogError) -> Self {
        Self {
            loading: false,
            message: Some(StatusMessage::Error(err.to_string())),
            ..self
        }
    }

    /// Marks `sha` as copied at `at`
    pub fn copied(self, sha: impl Into<String>, at: Instant) -> Self {
        Self {
            copied: Some(CopiedHash {
                sha: sha.into(),
                at,
            }),
            ..self
        }
    }

    /// Clears the copied mark once it is at least COPIED_INDICATOR_TTL old
    pub fn expire_copied(self, now: Instant) -> Self {
        let expired = self
            .copied
            .as_ref()
            .is_some_and(|c| now.saturating_duration_since(c.at) >= COPIED_INDICATOR_TTL);

        if expired {
            Self {
                copied: None,
                ..self
            }
        } else {
            self
        }
    }

    /// First loaded commit whose hash starts with `prefix`
    pub fn find_commit(&self, prefix: &str) -> Option<&CommitRecord> {
        if prefix.is_empty() {
            return None;
        }
        self.commits.iter().find(|c| c.sha.starts_with(prefix))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::github::{CommitAuthor, CommitDetails, GitHubUser};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that only moves when told to; clones share the same time
    #[derive(Clone)]
    pub(crate) struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    pub(crate) fn record(sha: &str, message: &str, avatar: bool) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            commit: CommitDetails {
                message: message.to_string(),
                author: CommitAuthor {
                    name: "Ada Lovelace".to_string(),
                    date: "2024-03-15T10:30:00Z".to_string(),
                },
            },
            author: avatar.then(|| GitHubUser {
                avatar_url: Some("https://avatars.githubusercontent.com/u/1".to_string()),
            }),
            html_url: format!("https://github.com/octo/demo/commit/{sha}"),
        }
    }

    pub(crate) fn repo(name: &str) -> RepoRef {
        RepoRef {
            owner: "octo".to_string(),
            repo: name.to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = ViewState::default();
        assert!(state.is_idle());
        assert!(state.repo().is_none());
    }

    #[test]
    fn test_begin_fetch_clears_previous_results() {
        let state = ViewState::default()
            .fetch_finished(repo("a"), Ok(FetchOutcome::Commits(vec![record("aaa", "x", true)])))
            .begin_fetch(repo("b"));

        assert!(state.is_loading());
        assert!(state.commits().is_empty());
        assert!(state.message().is_none());
        assert_eq!(state.repo(), Some(&repo("b")));
    }

    #[test]
    fn test_empty_result_is_informational() {
        let state = ViewState::default()
            .begin_fetch(repo("a"))
            .fetch_finished(repo("a"), Ok(FetchOutcome::Empty));

        assert!(!state.is_loading());
        assert!(!state.has_error());
        assert_eq!(
            state.message(),
            Some(&StatusMessage::Info("No commits found.".to_string()))
        );
    }

    #[test]
    fn test_fetch_error_surfaces_message() {
        let state = ViewState::default()
            .begin_fetch(repo("a"))
            .fetch_finished(repo("a"), Err(FetchError::NotFound));

        assert!(state.has_error());
        assert_eq!(state.message().unwrap().text(), "Repository not found.");
    }

    #[test]
    fn test_late_error_keeps_loaded_commits() {
        // Submit a, then b; b loads, a fails last
        let state = ViewState::default()
            .begin_fetch(repo("a"))
            .begin_fetch(repo("b"))
            .fetch_finished(repo("b"), Ok(FetchOutcome::Commits(vec![record("bbb", "b", true)])))
            .fetch_finished(repo("a"), Err(FetchError::RateLimited));

        assert!(!state.is_loading());
        assert_eq!(state.message().unwrap().text(), "API Limit exceeded.");
        assert_eq!(state.repo(), Some(&repo("b")));
        assert_eq!(state.commits()[0].sha, "bbb");
    }

    #[test]
    fn test_last_completed_fetch_wins() {
        // Submit a, then b; b answers first, a answers last
        let state = ViewState::default()
            .begin_fetch(repo("a"))
            .begin_fetch(repo("b"))
            .fetch_finished(repo("b"), Ok(FetchOutcome::Commits(vec![record("bbb", "b", true)])))
            .fetch_finished(repo("a"), Ok(FetchOutcome::Commits(vec![record("aaa", "a", true)])));

        assert_eq!(state.repo(), Some(&repo("a")));
        assert_eq!(state.commits()[0].sha, "aaa");
    }

    #[test]
    fn test_parse_failure_keeps_commits() {
        let err = CommitLogError::from(ParseError {
            input: "nope".to_string(),
        });
        let state = ViewState::default()
            .fetch_finished(repo("a"), Ok(FetchOutcome::Commits(vec![record("aaa", "x", true)])))
            .submission_failed(&err);

        assert_eq!(state.commits().len(), 1);
        assert_eq!(state.message().unwrap().text(), "Invalid repository URL.");
    }

    #[test]
    fn test_copied_indicator_clears_after_two_seconds() {
        let clock = ManualClock::new();
        let mut state = ViewState::default().copied("abc123", clock.now());
        assert_eq!(state.copied_sha(), Some("abc123"));

        clock.advance(Duration::from_millis(1999));
        state = state.expire_copied(clock.now());
        assert_eq!(state.copied_sha(), Some("abc123"));

        clock.advance(Duration::from_millis(1));
        state = state.expire_copied(clock.now());
        assert_eq!(state.copied_sha(), None);
    }

    #[test]
    fn test_new_copy_restarts_the_timer() {
        let clock = ManualClock::new();
        let mut state = ViewState::default().copied("first", clock.now());

        clock.advance(Duration::from_millis(1500));
        state = state.copied("second", clock.now());

        clock.advance(Duration::from_millis(1500));
        state = state.expire_copied(clock.now());
        assert_eq!(state.copied_sha(), Some("second"));
    }

    #[test]
    fn test_find_commit_by_prefix() {
        let state = ViewState::default().fetch_finished(
            repo("a"),
            Ok(FetchOutcome::Commits(vec![
                record("abc1111", "one", true),
                record("def2222", "two", true),
            ])),
        );

        assert_eq!(state.find_commit("def").unwrap().sha, "def2222");
        assert!(state.find_commit("zzz").is_none());
        assert!(state.find_commit("").is_none());
    }
}
