//! CLI module
//!
//! Command-line interface over the service client and pager.
//!
//! # Commands
//!
//! - `get` - Fetch one resource and print it
//! - `list` - Walk a paginated collection and print every item
//! - `config` - Show the resolved configuration with secrets masked

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
