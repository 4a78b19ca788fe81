use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::traits::NewsSource;
use crate::types::RawEntry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cap on raw entries taken from one feed per read.
const MAX_ENTRIES_PER_READ: usize = 20;

/// The feeds this digest watches by default: English and Chinese AI/Agent
/// coverage, name first, endpoint second.
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    (
        "Hacker News (AI)",
        "https://hnrss.org/newest?q=AI+agent+OR+LLM+OR+GPT+OR+Claude",
    ),
    (
        "MIT Tech Review AI",
        "https://www.technologyreview.com/topic/artificial-intelligence/feed",
    ),
    ("OpenAI Blog", "https://openai.com/blog/rss.xml"),
    ("Google AI Blog", "https://blog.google/technology/ai/rss/"),
    ("Hugging Face Blog", "https://huggingface.co/blog/feed.xml"),
    (
        "The Verge AI",
        "https://www.theverge.com/rss/ai-artificial-intelligence/index.xml",
    ),
    ("机器之心", "https://rsshub.app/jiqizhixin"),
    ("量子位", "https://rsshub.app/qbitai"),
    ("AI科技评论", "https://rsshub.app/leiphone/category/ai"),
];

/// An RSS/Atom feed read over HTTP.
pub struct FeedSource {
    name: String,
    url: String,
    fetcher: Arc<Fetcher>,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, fetcher: Arc<Fetcher>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            fetcher,
        }
    }
}

#[async_trait]
impl NewsSource for FeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Vec<RawEntry> {
        let body = match self.fetcher.fetch_body(&self.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch {}: {}", self.name, e);
                return Vec::new();
            }
        };

        match FeedParser::parse(&body) {
            Ok(mut entries) => {
                entries.truncate(MAX_ENTRIES_PER_READ);
                debug!("{} returned {} entries", self.name, entries.len());
                entries
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", self.name, e);
                Vec::new()
            }
        }
    }
}

/// Build the default source set sharing one fetcher.
pub fn default_sources(fetcher: Arc<Fetcher>) -> Vec<Box<dyn NewsSource>> {
    DEFAULT_FEEDS
        .iter()
        .map(|(name, url)| Box::new(FeedSource::new(*name, *url, fetcher.clone())) as Box<dyn NewsSource>)
        .collect()
}
