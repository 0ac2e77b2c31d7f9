// src/main.rs
// =============================================================================
// This is the entry point of the commit-log CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load the configuration
// 3. Count this run as a visit (unless --no-count)
// 4. Dispatch to the subcommand handler
// 5. Exit with proper code (0 = success, 1 = fetch/parse failed, 2 = error)
// =============================================================================

mod cli;
mod clipboard;
mod config;
mod error;
mod explore;
mod github;
mod timeline;
mod visitors;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use clipboard::SystemClipboard;
use config::Config;
use explore::Explorer;
use github::CommitFetcher;
use timeline::{SystemClock, ViewState};
use visitors::{FileStore, MemoryStore, VisitorCount};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = timeline shown (including "No commits found.")
//   Ok(1) = the repository could not be parsed or fetched
//   Err   = unexpected error (config, I/O, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_api_base(cli.api_base.as_deref())?;
    debug!(?config, "configuration");

    let fetcher = CommitFetcher::new(config.api_base.clone(), config.request_timeout)?;

    match cli.command {
        Commands::Visitors => {
            let count = if cli.no_count {
                visitors::peek(&FileStore::new(config.visitor_store_path()))
            } else {
                count_visit(&config)
            };
            println!("{}", timeline::visitor_badge(&count));
            Ok(0)
        }
        Commands::Log {
            repo_url,
            json,
            export,
            open,
        } => {
            let count = (!cli.no_count).then(|| count_visit(&config));
            handle_log(&fetcher, &repo_url, json, export.as_deref(), open, count).await
        }
        Commands::Explore { repo_url } => {
            let count = (!cli.no_count).then(|| count_visit(&config));
            let initial = repo_url.unwrap_or_else(|| config.default_repo.clone());
            let explorer = Explorer::new(
                fetcher,
                SystemClipboard::new(),
                SystemClock,
                std::io::stdout(),
                count,
            );
            explorer.run(Some(initial)).await?;
            Ok(0)
        }
    }
}

// Logs go to stderr so stdout stays clean for the timeline and --json
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "commit_log=debug"
    } else {
        "commit_log=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// One process is one session: a fresh in-memory session store every run
fn count_visit(config: &Config) -> VisitorCount {
    let mut durable = FileStore::new(config.visitor_store_path());
    let mut session = MemoryStore::new();
    debug!(path = %durable.path().display(), "counting visit");

    let count = visitors::record_visit(&mut durable, &mut session);
    debug!(count = count.value(), "visitor count");
    count
}

// Handles the 'log' subcommand
//
// Parameters:
//   repo_url: repository URL or owner/repo
//   json: print JSON instead of the timeline
//   export: optional path for the printable HTML export
//   open: open the export in the system viewer
async fn handle_log(
    fetcher: &CommitFetcher,
    repo_url: &str,
    json: bool,
    export: Option<&Path>,
    open: bool,
    visitors: Option<VisitorCount>,
) -> Result<i32> {
    if !json {
        if let Some(count) = &visitors {
            println!("{}", timeline::visitor_badge(count));
        }
        println!("🔍 Fetching commits for {}", repo_url);
    }

    let state = match fetcher.fetch_repository(repo_url).await {
        Ok((repo, outcome)) => {
            if !json {
                println!("📄 Found {} commit(s)", outcome.commit_count());
            }
            ViewState::default()
                .begin_fetch(repo.clone())
                .fetch_finished(repo, Ok(outcome))
        }
        Err(err) => ViewState::default().submission_failed(&err),
    };

    if state.has_error() {
        // Errors go to stderr in both modes; stdout stays valid JSON or empty
        if let Some(message) = state.message() {
            eprintln!("❌ {}", message.text());
        }
        return Ok(1);
    }

    if json {
        println!("{}", timeline::render_json(&state)?);
    } else {
        println!();
        print!("{}", timeline::render_timeline(&state));
    }

    if let Some(path) = export {
        match timeline::write_export(&state, path) {
            Ok(written) => {
                eprintln!("📄 Exported to {}", written.display());
                if open {
                    timeline::open_in_viewer(&written)?;
                }
            }
            Err(timeline::ExportError::NothingToExport) => {
                eprintln!("⚠️  No commits to export");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(0)
}
