use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry as a feed source reported it, before normalization.
/// Every field is optional; the normalizer decides what is usable.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Full-text body (e.g. `content:encoded`), preferred over `description`.
    pub summary: Option<String>,
    /// Short description, used when no full-text summary exists.
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// Canonical news item. Constructed once by the normalizer and never
/// mutated afterwards; later stages only select and reorder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Plain text, markup stripped, at most 500 characters.
    pub summary: String,
    pub source: String,
    /// Falls back to the ingestion time when the feed carries no date.
    pub published: DateTime<Utc>,
    /// Short digest of `link`. Equal fingerprints mean duplicate items,
    /// whatever their titles or summaries say.
    pub fingerprint: String,
}

/// One publishable document rendered from a batch of items.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormattedPost {
    pub title: String,
    /// HTML, items grouped by source.
    pub body: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Published,
    Draft,
}

impl PublishState {
    /// The status string the WordPress REST API expects.
    pub fn as_status(&self) -> &'static str {
        match self {
            Self::Published => "publish",
            Self::Draft => "draft",
        }
    }
}

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub window_hours: i64,
    pub max_items_per_document: usize,
    pub batch_count: usize,
    pub items_per_batch: usize,
    pub publish_state: PublishState,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            max_items_per_document: 15,
            batch_count: 10,
            items_per_batch: 5,
            publish_state: PublishState::Published,
        }
    }
}

/// Category and tag ids resolved by the sink at the start of a run.
/// Passed along explicitly; nothing here outlives the run.
#[derive(Debug, Clone)]
pub struct TaxonomyContext {
    pub category_id: u64,
    pub tag_ids: Vec<u64>,
}

/// Identity the sink assigned to a created post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub id: u64,
    pub url: String,
}

/// Per-document result of a publish run, in submission order.
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    Published { title: String, post: PostRef },
    Failed { title: String, error: String },
}

/// What one publish run produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<PublishOutcome>,
}

impl RunReport {
    pub fn published(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PublishOutcome::Published { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.published()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("publishing sink is unreachable, run aborted")]
    SinkUnreachable,

    #[error("submission rejected (HTTP {status}): {message}")]
    Submission { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
