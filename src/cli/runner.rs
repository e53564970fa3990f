//! CLI runner - executes commands

use crate::api::Scraper;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::profile::Profile;
use crate::timeline::{PostRecord, TimelineQuery};
use serde::Serialize;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let scraper = Scraper::new(self.load_config()?)?;

        match &self.cli.command {
            Commands::Tweets {
                query,
                pages,
                limit,
            } => self.tweets(&scraper, query, *pages, *limit).await,
            Commands::Profile { username } => self.profile(&scraper, username).await,
            Commands::Trends => self.trends(&scraper).await,
        }
    }

    /// Build the effective config: file, then environment, then flags
    fn load_config(&self) -> Result<ScraperConfig> {
        let config = match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ScraperConfig::from_file(path)?
            }
            None => ScraperConfig::default(),
        };

        Ok(config
            .with_env_overrides()
            .with_overrides(self.cli.base_url.clone(), self.cli.proxy.clone()))
    }

    /// Stream posts to stdout as they are extracted
    async fn tweets(
        &self,
        scraper: &Scraper,
        query: &str,
        pages: u32,
        limit: Option<usize>,
    ) -> Result<()> {
        let query = TimelineQuery::new(query).pages(pages);
        let mut timeline = scraper.tweets(&query)?;
        let mut emitted = 0usize;

        while limit.map_or(true, |max| emitted < max) {
            let Some(record) = timeline.next().await else {
                break;
            };
            self.output_post(&record?);
            emitted += 1;
        }

        info!(
            "Emitted {} posts from {} page(s)",
            emitted,
            timeline.pages_fetched()
        );
        Ok(())
    }

    async fn profile(&self, scraper: &Scraper, username: &str) -> Result<()> {
        let profile = scraper.profile(username).await?;
        self.output_profile(&profile);
        Ok(())
    }

    async fn trends(&self, scraper: &Scraper) -> Result<()> {
        let trends = scraper.trends().await?;
        match self.cli.format {
            OutputFormat::Json => self.output_message(&trends),
            OutputFormat::Pretty => {
                for (rank, trend) in trends.iter().enumerate() {
                    println!("{:>2}. {trend}", rank + 1);
                }
            }
        }
        Ok(())
    }

    fn output_post(&self, post: &PostRecord) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(post),
            OutputFormat::Pretty => println!("{}", format_post(post)),
        }
    }

    fn output_profile(&self, profile: &Profile) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(profile),
            OutputFormat::Pretty => println!("{}", format_profile(profile)),
        }
    }

    /// Output a message
    fn output_message<T: Serialize>(&self, msg: &T) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}

/// Human-readable rendering of a post
pub fn format_post(post: &PostRecord) -> String {
    let mut flags = Vec::new();
    if post.is_retweet {
        flags.push("retweet");
    }
    if post.is_pinned {
        flags.push("pinned");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    format!(
        "@{} {}{}\n{}\n  replies: {}  retweets: {}  likes: {}  {}\n",
        post.username,
        post.time.format("%Y-%m-%d %H:%M:%S UTC"),
        flags,
        post.text,
        post.replies,
        post.retweets,
        post.likes,
        post.tweet_url,
    )
}

/// Human-readable rendering of a profile
pub fn format_profile(profile: &Profile) -> String {
    fn count(value: Option<u64>) -> String {
        value.map_or_else(|| "-".to_string(), |v| v.to_string())
    }

    let mut lines = vec![format!(
        "{} (@{}){}",
        profile.name.as_deref().unwrap_or(&profile.username),
        profile.username,
        if profile.is_verified { " ✓" } else { "" }
    )];
    if let Some(bio) = &profile.biography {
        lines.push(bio.clone());
    }
    if let Some(location) = &profile.location {
        lines.push(format!("Location: {location}"));
    }
    if let Some(website) = &profile.website {
        lines.push(format!("Website: {website}"));
    }
    lines.push(format!(
        "Tweets: {}  Following: {}  Followers: {}  Likes: {}",
        count(profile.tweets_count),
        count(profile.following_count),
        count(profile.followers_count),
        count(profile.likes_count),
    ));
    lines.join("\n")
}
