// src/github/repo_ref.rs
// =============================================================================
// Turns whatever the user typed into an {owner, repo} pair.
//
// The parse is intentionally lax: we take the last two '/'-separated
// segments and nothing else. A nonsense owner or repo name is not rejected
// here; GitHub answers it with a 404 and the fetcher reports that instead.
//
// Accepted, for example:
//   https://github.com/rust-lang/rust   -> rust-lang / rust
//   https://github.com/rust-lang/rust/  -> rust-lang / rust
//   rust-lang/rust                      -> rust-lang / rust
// =============================================================================

use std::fmt;

use serde::Serialize;

use crate::error::ParseError;

/// Identifies one repository on GitHub
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// Parses a repository URL into a RepoRef
//
// Steps:
//   1. Strip exactly one trailing '/'
//   2. Split on '/'
//   3. Fewer than 2 segments -> ParseError, otherwise the last two segments
pub fn parse_repo_url(input: &str) -> Result<RepoRef, ParseError> {
    let trimmed = input.strip_suffix('/').unwrap_or(input);

    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() < 2 {
        return Err(ParseError {
            input: input.to_string(),
        });
    }

    let owner = parts[parts.len() - 2].to_string();
    let repo = parts[parts.len() - 1].to_string();

    Ok(RepoRef { owner, repo })
}
