//! CLI - Command Line Interface for ReelTUI
//!
//! Every catalog screen is also scriptable. Output is JSON when `--json`
//! is given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Launch the TUI on a movie page
//! reeltui --route "/movie-details?id=2"
//!
//! # Query the catalog
//! reeltui search dark --json
//! reeltui info 1
//! reeltui downloads --status downloading
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{DownloadStatus, FeaturedMovie, MovieSummary, WatchProgress};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Requested movie does not exist
    NotFound = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// ReelTUI - movie catalog in the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "reeltui",
    version,
    about = "Movie catalog browser for the terminal",
    long_about = "Browse featured, top and upcoming movies, search titles, \
                  and review downloads from the terminal.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  reeltui                                  Launch interactive TUI\n\
                  reeltui --route /downloads               Start on a screen\n\
                  reeltui search \"dark\"                    Search titles\n\
                  reeltui info 1 --json                    Movie details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Screen to open at startup, e.g. /search or /movie-details?id=2
    #[arg(long, short = 'r')]
    pub route: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search movie titles
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Show the home page collections
    #[command(visible_alias = "h")]
    Home(HomeCmd),

    /// Get details for a movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// List downloads
    #[command(visible_alias = "dl")]
    Downloads(DownloadsCmd),
}

/// Search movie titles (case-insensitive substring match)
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Featured, top, continue-watching and upcoming movies
#[derive(Args, Debug)]
pub struct HomeCmd {}

/// Movie details by catalog id
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Catalog movie id
    #[arg(required = true)]
    pub id: String,
}

/// Tracked downloads
#[derive(Args, Debug)]
pub struct DownloadsCmd {
    /// Only show downloads in this state
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusFilter>,
}

/// Download state filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Downloading,
    Downloaded,
    Paused,
}

impl StatusFilter {
    pub fn matches(self, status: DownloadStatus) -> bool {
        matches!(
            (self, status),
            (StatusFilter::Downloading, DownloadStatus::Downloading)
                | (StatusFilter::Downloaded, DownloadStatus::Downloaded)
                | (StatusFilter::Paused, DownloadStatus::Paused)
        )
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Home page collections
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub featured: FeaturedMovie,
    pub top_movies: Vec<MovieSummary>,
    pub continue_watching: Vec<WatchProgress>,
    pub upcoming: Vec<MovieSummary>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print_json<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a line of human-readable output
    pub fn line(&self, msg: impl std::fmt::Display) {
        println!("{}", msg);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
