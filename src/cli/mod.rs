//! CLI module
//!
//! Command-line interface for the scraper.
//!
//! # Commands
//!
//! - `tweets` - Stream posts for a hashtag or profile
//! - `profile` - Show a profile header
//! - `trends` - List trending topics

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{format_post, format_profile, Runner};
