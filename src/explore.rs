// src/explore.rs
// =============================================================================
// Interactive explorer: the long-running session behind `commit-log explore`.
//
// What happens here:
// 1. Lines are read from stdin; each one is a repository or a command
// 2. A repository submission spawns its own fetch task
// 3. Finished fetches come back over a channel and update the ViewState
// 4. A ticker clears the "copied" mark two seconds after a copy
// 5. After every state change the whole screen is rendered again
//
// Fetches are never cancelled. If two are in flight, both finish and the
// one that finishes last is what stays on screen.
// =============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::error::{CommitLogError, FetchError};
use crate::github::{parse_repo_url, CommitFetcher, FetchOutcome, RepoRef};
use crate::timeline::{
    default_export_name, open_in_viewer, render_json, render_timeline, visitor_badge,
    write_export, Clock, ViewState,
};
use crate::visitors::VisitorCount;

const TICK: Duration = Duration::from_millis(250);

const HELP: &str = "\
Commands:
  <url> | <owner>/<repo>   fetch and show the latest 100 commits
  copy <sha-prefix>        copy the full hash of a loaded commit
  print [path]             export a printable HTML timeline and open it
  json                     print the loaded commits as JSON
  help                     show this help
  quit                     leave
";

/// A fetch task's result, tagged with the repository it was for
#[derive(Debug)]
pub struct FetchCompletion {
    pub repo: RepoRef,
    pub result: Result<FetchOutcome, FetchError>,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Copy(String),
    Print(Option<PathBuf>),
    Json,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// Anything that is not a known command word is a repository submission
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        "json" => Command::Json,
        "copy" => Command::Copy(rest.to_string()),
        "print" | "export" if rest.is_empty() => Command::Print(None),
        "print" | "export" => Command::Print(Some(PathBuf::from(rest))),
        _ => Command::Submit(line.to_string()),
    }
}

pub struct Explorer<C, K, W> {
    fetcher: CommitFetcher,
    clipboard: C,
    clock: K,
    out: W,
    state: ViewState,
    visitors: Option<VisitorCount>,
    open_exports: bool,
    in_flight: usize,
}

impl<C: Clipboard, K: Clock, W: Write> Explorer<C, K, W> {
    pub fn new(
        fetcher: CommitFetcher,
        clipboard: C,
        clock: K,
        out: W,
        visitors: Option<VisitorCount>,
    ) -> Self {
        Self {
            fetcher,
            clipboard,
            clock,
            out,
            state: ViewState::default(),
            visitors,
            open_exports: true,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    // Runs on stdin until "quit" or end of input
    pub async fn run(mut self, initial: Option<String>) -> Result<()> {
        self.drive(BufReader::new(tokio::io::stdin()), initial).await
    }

    // Runs on any line source
    //
    // "quit" leaves at once. End of input stops reading but waits for the
    // fetches still in flight, so piped input still shows its results.
    pub async fn drive<R>(&mut self, input: R, initial: Option<String>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut lines = input.lines();
        let mut input_open = true;
        let mut ticker = tokio::time::interval(TICK);

        self.render()?;
        self.write_line(HELP)?;
        if let Some(initial) = initial {
            self.submit(&initial, &tx)?;
        }

        while input_open || self.in_flight > 0 {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read input")? {
                        Some(line) => {
                            if self.handle_line(&line, &tx)? == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            debug!(in_flight = self.in_flight, "end of input");
                            input_open = false;
                        }
                    }
                }
                Some(done) = rx.recv() => self.apply(done)?,
                _ = ticker.tick() => self.tick()?,
            }
        }

        debug!(commits = self.state().commits().len(), "explorer finished");
        Ok(())
    }

    pub fn handle_line(
        &mut self,
        line: &str,
        tx: &UnboundedSender<FetchCompletion>,
    ) -> Result<Flow> {
        match parse_command(line) {
            Command::Submit(input) => self.submit(&input, tx)?,
            Command::Copy(prefix) => self.copy(&prefix)?,
            Command::Print(path) => self.print(path)?,
            Command::Json => {
                let json = render_json(&self.state)?;
                self.write_line(&json)?;
            }
            Command::Help => self.write_line(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Nothing => {}
        }
        Ok(Flow::Continue)
    }

    // Parses the input and, if it looks like a repository, starts a fetch
    pub fn submit(&mut self, input: &str, tx: &UnboundedSender<FetchCompletion>) -> Result<()> {
        let repo = match parse_repo_url(input) {
            Ok(repo) => repo,
            Err(err) => {
                debug!(input = %err.input, "rejected repository input");
                let err = CommitLogError::from(err);
                return self.transition(|state| state.submission_failed(&err));
            }
        };

        info!(%repo, "submitting");
        self.transition(|state| state.begin_fetch(repo.clone()))?;

        let fetcher = self.fetcher.clone();
        let tx = tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = fetcher.fetch_commits(&repo).await;
            // The receiver is gone only when the explorer has exited
            let _ = tx.send(FetchCompletion { repo, result });
        });

        Ok(())
    }

    pub fn apply(&mut self, done: FetchCompletion) -> Result<()> {
        debug!(repo = %done.repo, ok = done.result.is_ok(), "fetch completed");
        self.in_flight = self.in_flight.saturating_sub(1);
        self.transition(|state| state.fetch_finished(done.repo, done.result))
    }

    pub fn copy(&mut self, prefix: &str) -> Result<()> {
        let Some(commit) = self.state.find_commit(prefix) else {
            return self.write_line(&format!("❌ No loaded commit matches '{}'", prefix));
        };
        debug!(sha = %commit.sha, summary = commit.summary(), "copying hash");
        let sha = commit.sha.clone();

        match self.clipboard.copy(&sha) {
            Ok(()) => {
                let now = self.clock.now();
                self.transition(|state| state.copied(sha, now))
            }
            Err(err) => self.write_line(&format!("❌ {}", err)),
        }
    }

    pub fn print(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(|| default_export_name(&self.state));

        let written = match write_export(&self.state, &path) {
            Ok(written) => written,
            Err(err) => return self.write_line(&format!("❌ {}", err)),
        };
        self.write_line(&format!("📄 Exported to {}", written.display()))?;

        if self.open_exports {
            if let Err(err) = open_in_viewer(&written) {
                self.write_line(&format!("❌ {}", err))?;
            }
        }
        Ok(())
    }

    // Clears an expired copy mark, re-rendering only if something changed
    pub fn tick(&mut self) -> Result<()> {
        if self.state.copied_sha().is_none() {
            return Ok(());
        }

        let now = self.clock.now();
        let state = std::mem::take(&mut self.state).expire_copied(now);
        let cleared = state.copied_sha().is_none();
        self.state = state;

        if cleared {
            self.render()?;
        }
        Ok(())
    }

    fn transition(&mut self, update: impl FnOnce(ViewState) -> ViewState) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        self.state = update(state);
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        writeln!(self.out)?;
        if let Some(count) = &self.visitors {
            writeln!(self.out, "{}", visitor_badge(count))?;
        }
        write!(self.out, "{}", render_timeline(&self.state))?;
        self.out.flush()?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}
