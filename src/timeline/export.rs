// src/timeline/export.rs
// =============================================================================
// Printable export of the timeline.
//
// We don't lay out pages ourselves. We write a standalone HTML document with
// an @media print stylesheet and hand it to the system viewer, where the
// user prints it or saves it as PDF.
//
// The print stylesheet hides everything marked .no-print (links, copy
// hints) and switches to black on white.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::date::format_date_details;
use super::state::ViewState;
use crate::github::CommitRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: no commits are loaded")]
    NothingToExport,

    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open {path} in the system viewer: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const STYLESHEET: &str = r#"
body { background: #0a0a0a; color: #e5e5e5; font-family: system-ui, sans-serif; max-width: 64rem; margin: 0 auto; padding: 3rem 1.5rem; }
h1 span { color: #14b8a6; }
.repo { font-family: monospace; text-transform: uppercase; color: #737373; }
.count { float: right; color: #a3a3a3; }
.timeline { border-left: 1px solid #262626; margin-left: 1rem; }
.commit { position: relative; padding-left: 2rem; margin-bottom: 2.5rem; }
.commit::before { content: ""; position: absolute; left: -5px; top: .5rem; width: 8px; height: 8px; border-radius: 50%; border: 2px solid #404040; background: #0a0a0a; }
.commit.latest::before { background: #14b8a6; border-color: #14b8a6; }
.when { font-weight: bold; }
.time { font-family: monospace; color: #737373; font-size: .8rem; }
.message { white-space: pre-wrap; }
.meta { font-size: .8rem; color: #a3a3a3; }
.avatar { width: 1.5rem; height: 1.5rem; border-radius: 50%; vertical-align: middle; }
.initial { display: inline-block; width: 1.5rem; text-align: center; border-radius: 50%; background: #262626; }
.sha { font-family: monospace; }
@media print {
  body { background-color: white !important; color: black !important; }
  .no-print { display: none !important; }
  .timeline { border: none !important; margin-left: 0 !important; }
  .commit { padding-left: 0 !important; border-bottom: 1px solid #ddd; padding-bottom: 10px; margin-bottom: 10px; }
  .commit::before { display: none; }
  .when, .message, .meta { color: black !important; }
}
"#;

// Builds the printable HTML document for the loaded commits
pub fn export_html(state: &ViewState) -> Result<String, ExportError> {
    if state.commits().is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let (title, repo_line) = match state.repo() {
        Some(repo) => (
            format!("{} commit log", repo),
            format!(
                "{} / <strong>{}</strong>",
                escape_html(&repo.owner),
                escape_html(&repo.repo)
            ),
        ),
        None => ("Commit log".to_string(), String::new()),
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLESHEET));
    html.push_str("<h1>Commit<span>Log</span></h1>\n");
    html.push_str(&format!(
        "<p><span class=\"repo\">{}</span><span class=\"count\">{} commits fetched</span></p>\n",
        repo_line,
        state.commits().len()
    ));
    html.push_str("<div class=\"timeline\">\n");

    for (index, commit) in state.commits().iter().enumerate() {
        html.push_str(&export_entry(commit, index == 0));
    }

    html.push_str("</div>\n</body>\n</html>\n");
    Ok(html)
}

fn export_entry(commit: &CommitRecord, latest: bool) -> String {
    let (date, time) = match format_date_details(&commit.commit.author.date) {
        Ok(formatted) => (formatted.date_str, formatted.time_str),
        Err(_) => (commit.commit.author.date.clone(), String::new()),
    };

    let avatar = match commit.avatar_url() {
        Some(url) => format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            escape_html(url),
            escape_html(commit.author_name())
        ),
        None => format!(
            "<span class=\"initial\">{}</span>",
            escape_html(&commit.author_initial())
        ),
    };

    format!(
        "<div class=\"commit{latest}\">\n\
         <div class=\"when\">{date} <span class=\"time\">{time}</span></div>\n\
         <p class=\"message\">{message}</p>\n\
         <div class=\"meta\">{avatar} <span class=\"author\">{author}</span> \
         <span class=\"sha\" title=\"{sha}\">{short}</span> \
         <a class=\"no-print\" href=\"{url}\">view on GitHub</a></div>\n\
         </div>\n",
        latest = if latest { " latest" } else { "" },
        date = escape_html(&date),
        time = escape_html(&time),
        message = escape_html(&commit.commit.message),
        avatar = avatar,
        author = escape_html(commit.author_name()),
        sha = escape_html(&commit.sha),
        short = escape_html(commit.short_sha()),
        url = escape_html(&commit.html_url),
    )
}

// Minimal escaping for text and attribute values
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// Writes the export to `path` and returns the path written
pub fn write_export(state: &ViewState, path: &Path) -> Result<PathBuf, ExportError> {
    let html = export_html(state)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, html).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), commits = state.commits().len(), "wrote export");
    Ok(path.to_path_buf())
}

// Asks the OS to open the export; printing happens from there
pub fn open_in_viewer(path: &Path) -> Result<(), ExportError> {
    debug!(path = %path.display(), "opening export");
    open::that(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Default file name for a repository's export
pub fn default_export_name(state: &ViewState) -> PathBuf {
    match state.repo() {
        Some(repo) => PathBuf::from(format!("{}-{}-commits.html", repo.owner, repo.repo)),
        None => PathBuf::from("commits.html"),
    }
}
