// src/timeline/render.rs
// =============================================================================
// Turns a ViewState snapshot into terminal output.
//
// Two formats:
// - text: a vertical timeline, newest commit on top
// - json: the repository and its commits, for scripts
//
// The renderer owns no state. It is called after every state transition
// with the new snapshot.
// =============================================================================

use serde::Serialize;

use super::date::format_date_details;
use super::state::{StatusMessage, ViewState};
use crate::github::{CommitRecord, RepoRef};
use crate::visitors::VisitorCount;

const RULE_WIDTH: usize = 72;

// Renders the whole screen as text
//
// Layout:
//   octo / demo                                   3 commits fetched
//   ========================================================================
//   ● Mar 15, 2024  4:00 PM
//   │   Fix the parser
//   │   Ada Lovelace · abc1234 · https://github.com/...
//   │
//   ○ ...
pub fn render_timeline(state: &ViewState) -> String {
    let mut out = String::new();

    if state.is_loading() {
        out.push_str("⏳ Fetching...\n");
    }

    if let Some(message) = state.message() {
        out.push_str(&format_message(message));
        out.push('\n');
    }

    if state.is_idle() {
        out.push_str("Waiting for repository input...\n");
        return out;
    }

    if state.commits().is_empty() {
        return out;
    }

    if let Some(repo) = state.repo() {
        let title = format!("{} / {}", repo.owner, repo.repo);
        let badge = format!("{} commits fetched", state.commits().len());
        let pad = RULE_WIDTH.saturating_sub(title.chars().count() + badge.chars().count());
        out.push_str(&format!("{}{}{}\n", title, " ".repeat(pad.max(1)), badge));
    }
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    for (index, commit) in state.commits().iter().enumerate() {
        let copied = state.copied_sha() == Some(commit.sha.as_str());
        out.push_str(&render_entry(commit, index == 0, copied));
    }

    out
}

fn format_message(message: &StatusMessage) -> String {
    match message {
        StatusMessage::Error(text) => format!("❌ {}", text),
        StatusMessage::Info(text) => format!("ℹ️  {}", text),
    }
}

// One timeline entry; the newest commit gets a filled marker
fn render_entry(commit: &CommitRecord, newest: bool, copied: bool) -> String {
    let marker = if newest { '●' } else { '○' };

    // An unparsable date is shown as-is rather than dropping the entry
    let when = match format_date_details(&commit.commit.author.date) {
        Ok(formatted) => format!("{}  {}", formatted.date_str, formatted.time_str),
        Err(_) => commit.commit.author.date.clone(),
    };

    let mut entry = format!("{} {}\n", marker, when);

    for line in commit.commit.message.lines() {
        entry.push_str(&format!("│   {}\n", line));
    }

    let author = match commit.avatar_url() {
        Some(_) => commit.author_name().to_string(),
        None => format!("[{}] {}", commit.author_initial(), commit.author_name()),
    };
    let copy_mark = if copied { " ✓ copied" } else { "" };

    entry.push_str(&format!(
        "│   {} · {}{} · {}\n",
        author,
        commit.short_sha(),
        copy_mark,
        commit.html_url
    ));
    entry.push_str("│\n");
    entry
}

#[derive(Serialize)]
struct JsonTimeline<'a> {
    repository: Option<&'a RepoRef>,
    commits: &'a [CommitRecord],
}

/// The loaded commits as pretty JSON
pub fn render_json(state: &ViewState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonTimeline {
        repository: state.repo(),
        commits: state.commits(),
    })
}

pub fn visitor_badge(count: &VisitorCount) -> String {
    format!("👥 {} visitors", count.formatted())
}
