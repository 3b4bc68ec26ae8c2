//! Command-line interface for page-find.
//!
//! This module handles CLI argument parsing. The headless search run that
//! backs the binary lives in the [`run`] submodule.

pub mod run;

use clap::Parser;
use std::path::PathBuf;

/// page-find - Search a markup file the way the in-page search panel does
#[derive(Parser, Debug)]
#[command(name = "page-find")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Markup file to search
    #[arg(value_name = "FILE", required_unless_present = "history")]
    pub file: Option<PathBuf>,

    /// Query text (a regular expression with --regex)
    #[arg(value_name = "QUERY", required_unless_present = "history")]
    pub query: Option<String>,

    /// Match case (also disables hiragana/katakana folding)
    #[arg(long)]
    pub match_case: bool,

    /// Treat the query as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Step forward this many times after searching
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub next: usize,

    /// Step backward this many times after the forward steps
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub prev: usize,

    /// Height of one rendered line in pixels
    #[arg(long, value_name = "PX", default_value_t = 20.0)]
    pub line_height: f32,

    /// Height of the visible viewport in pixels
    #[arg(long, value_name = "PX", default_value_t = 600.0)]
    pub viewport_height: f32,

    /// Height of the landmark track in pixels
    #[arg(long, value_name = "PX", default_value_t = 600.0)]
    pub track_height: f32,

    /// Print the persisted search history and exit
    #[arg(long)]
    pub history: bool,

    /// Storage file for the search history (default: platform data dir)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Set log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// What the binary should do, extracted from the CLI flags
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Run one search over a file
    Search(SearchOptions),
    /// Print the persisted history
    ShowHistory,
}

/// Options for a headless search run
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    /// Markup file to search
    pub file: PathBuf,
    /// Query text
    pub query: String,
    /// Case-sensitive matching
    pub match_case: bool,
    /// Regex matching
    pub use_regex: bool,
    /// Forward steps after searching
    pub next: usize,
    /// Backward steps after the forward steps
    pub prev: usize,
    /// Line height of the headless layout
    pub line_height: f32,
    /// Visible height of the headless layout
    pub viewport_height: f32,
    /// Landmark track height of the headless layout
    pub track_height: f32,
}

/// Runtime options passed from CLI to the binary
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeOptions {
    /// Requested action
    pub action: Action,
    /// History storage override
    pub store: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl Cli {
    /// Convert parsed flags into runtime options.
    pub fn into_options(self) -> RuntimeOptions {
        let action = match (self.history, self.file, self.query) {
            (false, Some(file), Some(query)) => Action::Search(SearchOptions {
                file,
                query,
                match_case: self.match_case,
                use_regex: self.regex,
                next: self.next,
                prev: self.prev,
                line_height: self.line_height,
                viewport_height: self.viewport_height,
                track_height: self.track_height,
            }),
            // clap enforces FILE and QUERY unless --history is given
            _ => Action::ShowHistory,
        };
        RuntimeOptions {
            action,
            store: self.store,
            log_level: self.log_level.map(|l| l.to_level_filter()),
        }
    }
}

/// Parse the process arguments.
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into_options()
}
