//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for readwiser
#[derive(Parser, Debug)]
#[command(name = "readwiser")]
#[command(author, version, about = "Save quotes and get them back when you are about to forget them")]
#[command(long_about = r#"
ReadWiser keeps a personal collection of quotes and resurfaces them with
spaced repetition: quotes you have never seen come first, then the ones
you have not seen for the longest time. Favorites come back twice as often.

Configuration files are loaded from (in priority order):
1. READWISER_* environment variables (e.g. READWISER_DIGEST__COUNT=5)
2. --config <path>     Explicit config file
3. ./readwiser.toml    Project-level config
4. ~/.config/readwiser/config.toml   Global config

Example:
  readwiser add '"Be the change you wish to see" https://example.com #wisdom'
  readwiser daily
  readwiser digest --count 5
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Whose collection to use (e.g. a chat id)
    #[arg(long, env = "READWISER_OWNER", default_value = "default", global = true)]
    pub owner: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save a quote: text, optional http(s) URL and #tags in one message
    Add {
        /// The message, e.g. '"Less is more" https://example.com #design'
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Source title
        #[arg(long)]
        title: Option<String>,
    },

    /// Show one quote, weighted towards what you have not seen lately
    Random,

    /// Quote of the Day
    Daily,

    /// Compose a digest of distinct quotes
    Digest {
        /// Number of quotes (defaults to [digest] count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Toggle a quote's favorite flag
    Fav { id: i64 },

    /// Delete a quote
    Delete { id: i64 },

    /// Show the most recently saved quotes
    Last {
        /// How many (at most 10)
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Find quotes containing a keyword
    Search { keyword: String },

    /// List quotes with a tag
    Tag { tag: String },

    /// List quotes from a source domain
    Source { domain: String },

    /// List favorite quotes
    Favorites,

    /// Collection statistics
    Stats,

    /// Dump the whole collection as JSON
    Export,
}
