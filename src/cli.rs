// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   commit-log log <repo>        fetch once and print the timeline
//   commit-log explore [repo]    interactive session (copy, print, resubmit)
//   commit-log visitors          show the visitor count
//
// Global flags apply to every subcommand and override the config file.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "commit-log",
    version,
    about = "Browse the commit history of a GitHub repository as a timeline",
    long_about = "commit-log fetches the latest 100 commits of a GitHub repository and shows them \
                  as a timeline. Hashes can be copied to the clipboard and the timeline can be \
                  exported as a printable HTML page."
)]
pub struct Cli {
    /// Root of the GitHub REST API
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not count this run as a visit
    #[arg(long, global = true)]
    pub no_count: bool,

    /// Verbose logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a repository's commits once and print them
    ///
    /// Example: commit-log log https://github.com/rust-lang/rust
    Log {
        /// Repository URL or owner/repo (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Print JSON instead of the timeline
        #[arg(long)]
        json: bool,

        /// Also write a printable HTML timeline to this file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Open the exported file in the system viewer to print it
        #[arg(long, requires = "export")]
        open: bool,
    },

    /// Interactive session: submit repositories, copy hashes, print
    ///
    /// Starts with the given repository, or the configured default.
    Explore {
        /// Repository to load first
        repo_url: Option<String>,
    },

    /// Show the visitor count
    Visitors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_log() {
        let cli = Cli::parse_from([
            "commit-log",
            "log",
            "octo/demo",
            "--json",
            "--export",
            "out.html",
            "--open",
        ]);
        match cli.command {
            Commands::Log {
                repo_url,
                json,
                export,
                open,
            } => {
                assert_eq!(repo_url, "octo/demo");
                assert!(json);
                assert_eq!(export, Some(PathBuf::from("out.html")));
                assert!(open);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_open_requires_export() {
        let result = Cli::try_parse_from(["commit-log", "log", "octo/demo", "--open"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "commit-log",
            "explore",
            "--api-base",
            "http://localhost:1234",
            "--no-count",
        ]);
        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:1234"));
        assert!(cli.no_count);
        assert!(matches!(cli.command, Commands::Explore { repo_url: None }));
    }
}
