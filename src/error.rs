// src/error.rs
// =============================================================================
// Errors a single repository submission can end in.
//
// - ParseError: the input could not be split into owner/repo
// - FetchError: the GitHub request failed (network or HTTP status)
//
// An empty commit list is NOT an error; see github::FetchOutcome::Empty.
// Every message here is shown to the user verbatim, so the Display strings
// are the user-facing text.
// =============================================================================

use thiserror::Error;

/// The input had fewer than two '/'-separated segments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid repository URL.")]
pub struct ParseError {
    /// What the user typed
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure (DNS, TLS, connection reset, ...)
    #[error("{0}")]
    Network(String),

    /// HTTP 404
    #[error("Repository not found.")]
    NotFound,

    /// HTTP 403, which is how GitHub reports an exhausted anonymous quota
    #[error("API Limit exceeded.")]
    RateLimited,

    /// Any other non-success status
    #[error("Error: {0}")]
    Status(String),

    /// 2xx but the body was not a list of commits
    #[error("Unexpected response from GitHub: {0}")]
    Decode(String),

    /// The configured API base cannot carry a path (e.g. "mailto:...")
    #[error("API base URL cannot be used for requests: {0}")]
    InvalidBase(String),

    /// The HTTP client itself could not be built
    #[error("Could not create HTTP client: {0}")]
    Client(String),
}

/// Anything that stops a submission from producing a timeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitLogError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
