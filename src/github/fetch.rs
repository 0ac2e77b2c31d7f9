// src/github/fetch.rs
// =============================================================================
// This module fetches the commit history of a GitHub repository.
//
// Strategy:
// - One GET to /repos/{owner}/{repo}/commits?per_page=100
// - No authentication, no pagination, no retries, no caching
// - HTTP status codes are mapped to the messages the user sees
//
// Every call is an independent round-trip. Two calls in flight at the same
// time do not know about each other; whoever finishes last wins on screen.
// =============================================================================

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::models::CommitRecord;
use super::repo_ref::{parse_repo_url, RepoRef};
use crate::error::{CommitLogError, FetchError};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fixed page size; later pages are never requested
pub const PAGE_SIZE: u32 = 100;

/// A successful response from the commits endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Commits in the order GitHub returned them (newest first)
    Commits(Vec<CommitRecord>),
    /// The repository exists but has no commits
    Empty,
}

impl FetchOutcome {
    pub fn commit_count(&self) -> usize {
        match self {
            FetchOutcome::Commits(commits) => commits.len(),
            FetchOutcome::Empty => 0,
        }
    }
}

// Fetches commit listings from the GitHub API
//
// Cloning is cheap: reqwest::Client is a handle around a shared
// connection pool, so each fetch task gets its own clone.
#[derive(Debug, Clone)]
pub struct CommitFetcher {
    client: Client,
    api_base: Url,
}

impl CommitFetcher {
    // Creates a fetcher
    //
    // Parameters:
    //   api_base: root of the REST API (https://api.github.com unless configured)
    //   timeout: optional per-request timeout; None keeps reqwest's default
    pub fn new(api_base: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        // GitHub rejects API requests that carry no User-Agent
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, api_base })
    }

    /// The endpoint requested for `repo`
    ///
    /// Owner and repo go in as single path segments, so '?', '#' or '/'
    /// inside them are percent-encoded instead of changing the endpoint.
    pub fn commits_url(&self, repo: &RepoRef) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBase(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "commits"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("per_page", &PAGE_SIZE.to_string());
        Ok(url)
    }

    // Parses the input and fetches its commits in one go
    //
    // Returns the parsed RepoRef alongside the outcome so callers can label
    // the timeline.
    pub async fn fetch_repository(
        &self,
        input: &str,
    ) -> Result<(RepoRef, FetchOutcome), CommitLogError> {
        let repo = parse_repo_url(input)?;
        let outcome = self.fetch_commits(&repo).await?;
        Ok((repo, outcome))
    }

    // Fetches up to PAGE_SIZE commits for a repository
    //
    // Outcome mapping:
    //   transport failure -> FetchError::Network
    //   404               -> FetchError::NotFound
    //   403               -> FetchError::RateLimited
    //   other non-2xx     -> FetchError::Status
    //   2xx with []       -> FetchOutcome::Empty
    //   2xx with commits  -> FetchOutcome::Commits, upstream order untouched
    pub async fn fetch_commits(&self, repo: &RepoRef) -> Result<FetchOutcome, FetchError> {
        let url = self.commits_url(repo)?;
        debug!(%url, "requesting commits");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), %repo, "commits response");

        if !status.is_success() {
            return Err(map_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let commits: Vec<CommitRecord> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        info!(%repo, count = commits.len(), "fetched commits");

        if commits.is_empty() {
            Ok(FetchOutcome::Empty)
        } else {
            Ok(FetchOutcome::Commits(commits))
        }
    }
}

// Maps a non-success status to the error the user sees
fn map_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::FORBIDDEN => FetchError::RateLimited,
        other => FetchError::Status(
            other
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| other.as_u16().to_string()),
        ),
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why read the body as text and then call serde_json?
//    - response.json() folds "body could not be read" and "body is not the
//      JSON we expected" into one reqwest::Error
//    - Splitting them lets us report Network vs Decode separately
//
// 2. Why is an empty list not an error?
//    - A brand new repository legitimately has zero commits
//    - The caller shows "No commits found." as information, not a failure
//
// 3. What does concat!(env!(...)) do?
//    - Both macros run at compile time
//    - The result is a &'static str like "commit-log/0.1.0"
// -----------------------------------------------------------------------------
