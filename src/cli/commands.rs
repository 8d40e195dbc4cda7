//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Command-line client for OpenStack-style cloud APIs
#[derive(Parser, Debug)]
#[command(name = "otcloud")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service endpoint, overrides the config file and `OS_ENDPOINT`
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Auth token, overrides the config file and `OS_TOKEN`
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single resource
    Get {
        /// Path relative to the endpoint, or an absolute URL
        path: String,

        /// Only print the value under this root key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// List a paginated collection
    List {
        /// Path relative to the endpoint, or an absolute URL
        path: String,

        /// Root key holding the items (detected when omitted)
        #[arg(short, long)]
        key: Option<String>,

        /// Stop after this many pages (at least one)
        #[arg(long)]
        max_pages: Option<NonZeroUsize>,
    },

    /// Show the resolved configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
