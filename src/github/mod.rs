// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Parsing a repository URL (or "owner/repo") into a RepoRef
// - The commit record types returned by the commits endpoint
// - Fetching up to 100 commits for a repository in a single request
//
// Deliberately missing:
// - Pagination, authentication and rate-limit backoff
// - Hosts other than GitHub
// =============================================================================

mod fetch;
mod models;
mod repo_ref;

pub use fetch::{CommitFetcher, FetchOutcome, DEFAULT_API_BASE};
pub use models::CommitRecord;
pub use repo_ref::{parse_repo_url, RepoRef};

#[cfg(test)]
pub use models::{CommitAuthor, CommitDetails, GitHubUser};
