use ai_news_digest::compose::{compose_batches, compose_daily};
use ai_news_digest::fetcher::{FetchConfig, Fetcher};
use ai_news_digest::filter::KeywordFilter;
use ai_news_digest::pipeline::aggregate;
use ai_news_digest::publisher::publish_run;
use ai_news_digest::sources::default_sources;
use ai_news_digest::types::{PublishOutcome, PublishState, RunConfig};
use ai_news_digest::wordpress::WordPressClient;
use anyhow::Context;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One roundup post with the day's top stories
    Daily,
    /// Several fixed-size brief posts
    Batch,
}

/// Aggregate recent AI/Agent news from RSS feeds and publish it to
/// WordPress.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Publishing mode
    #[arg(long, value_enum, default_value = "daily")]
    mode: Mode,

    /// Only include news from the last N hours
    #[arg(long, default_value_t = 24)]
    hours: i64,

    /// Maximum stories in the daily roundup
    #[arg(long, default_value_t = 15)]
    max_items: usize,

    /// Number of posts to produce in batch mode
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Stories per post in batch mode
    #[arg(long, default_value_t = 5)]
    items_per_batch: usize,

    /// Create posts as drafts instead of publishing them
    #[arg(long)]
    draft: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = RunConfig {
        window_hours: cli.hours,
        max_items_per_document: cli.max_items,
        batch_count: cli.count,
        items_per_batch: cli.items_per_batch,
        publish_state: if cli.draft {
            PublishState::Draft
        } else {
            PublishState::Published
        },
    };

    let sink = WordPressClient::from_env().context("WordPress configuration")?;
    let fetcher = Arc::new(Fetcher::new(FetchConfig::default()));
    let sources = default_sources(fetcher);
    let keywords = KeywordFilter::default();

    let run_time = Utc::now();
    info!(
        "Fetching news from the last {} hours across {} sources",
        config.window_hours,
        sources.len()
    );
    let corpus = aggregate(&sources, &keywords, config.window_hours, run_time).await;

    if corpus.is_empty() {
        warn!("No relevant news found, nothing to publish");
        return Ok(());
    }

    let posts = match cli.mode {
        Mode::Daily => vec![compose_daily(
            &corpus,
            config.max_items_per_document,
            run_time,
        )],
        Mode::Batch => compose_batches(
            &corpus,
            config.batch_count,
            config.items_per_batch,
            run_time,
        ),
    };

    if posts.is_empty() {
        warn!("Corpus too small to fill a single batch, nothing to publish");
        return Ok(());
    }

    let report = publish_run(&sink, &posts, config.publish_state).await?;
    for outcome in &report.outcomes {
        match outcome {
            PublishOutcome::Published { title, post } => {
                info!("Published '{}' at {}", title, post.url)
            }
            PublishOutcome::Failed { title, error } => warn!("Failed '{}': {}", title, error),
        }
    }
    info!(
        "Done: {} published, {} failed",
        report.published(),
        report.failed()
    );

    Ok(())
}
