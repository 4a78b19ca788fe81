use crate::types::{AggregatorError, RawEntry, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// Maps RSS/Atom documents onto [`RawEntry`] values. All the quirks of the
/// two formats stop here; downstream code only sees optional fields.
pub struct FeedParser;

impl FeedParser {
    pub fn parse(content: &str) -> Result<Vec<RawEntry>> {
        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("failed to parse feed: {}", e)))?;

        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();
        debug!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let title = entry.title.map(|t| t.content);
        let link = entry.links.first().map(|l| l.href.clone());

        // Full content (content:encoded) lands in `summary`, the short
        // feed summary in `description`; the normalizer prefers the former.
        let summary = entry.content.and_then(|c| c.body);
        let description = entry.summary.map(|s| s.content);

        let published = entry.published.map(|dt| dt.with_timezone(&Utc));
        let updated = entry.updated.map(|dt| dt.with_timezone(&Utc));

        RawEntry {
            title,
            link,
            summary,
            description,
            published,
            updated,
        }
    }
}
