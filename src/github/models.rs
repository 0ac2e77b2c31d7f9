// src/github/models.rs
// =============================================================================
// Types for the JSON returned by GET /repos/{owner}/{repo}/commits.
//
// Only the fields the timeline shows are declared; serde ignores the rest.
// The top-level `author` is the linked GitHub account and is null when the
// commit email does not belong to any account, so it is an Option.
// =============================================================================

use serde::{Deserialize, Serialize};

/// One entry of the commit listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub sha: String,
    pub commit: CommitDetails,
    /// Linked GitHub account, if any
    #[serde(default)]
    pub author: Option<GitHubUser>,
    /// Link to the commit page on github.com
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: CommitAuthor,
}

/// Git-level author, as recorded in the commit itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    /// ISO-8601 timestamp, e.g. "2024-03-15T10:30:00Z"
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl CommitRecord {
    /// First 7 characters of the hash, the way GitHub abbreviates it
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(7) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        &self.commit.author.name
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.avatar_url.as_deref())
    }

    // Placeholder shown instead of an avatar
    pub fn author_initial(&self) -> String {
        self.commit
            .author
            .name
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_default()
    }
}
