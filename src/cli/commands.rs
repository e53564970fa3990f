//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scrape posts, profiles and trends from the legacy timeline frontend
#[derive(Parser, Debug)]
#[command(name = "timeline-scraper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Proxy URL used for both http and https
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Base URL of the frontend (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

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
    /// Stream posts for a hashtag (`#tag`) or a profile handle
    Tweets {
        /// Hashtag starting with '#', or a username
        query: String,

        /// Maximum number of pages to walk
        #[arg(short, long, default_value = "1")]
        pages: u32,

        /// Stop after this many posts
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the profile header of a user
    Profile {
        /// Username without the leading '@'
        username: String,
    },

    /// List current trending topics
    Trends,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
