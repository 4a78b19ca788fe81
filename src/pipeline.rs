use crate::dedup::{dedup_by_fingerprint, rank_newest_first};
use crate::filter::{within_window, KeywordFilter};
use crate::normalize::normalize_entry;
use crate::traits::NewsSource;
use crate::types::NewsItem;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// Read every source in turn and merge the normalized results by plain
/// concatenation. Sources cap their own raw reads; nothing is capped
/// per source after the merge.
async fn read_and_normalize(
    sources: &[Box<dyn NewsSource>],
    run_time: DateTime<Utc>,
) -> Vec<NewsItem> {
    let mut merged = Vec::new();

    for source in sources {
        info!("Reading source: {}", source.name());
        let entries = source.read().await;
        let before = merged.len();
        merged.extend(
            entries
                .into_iter()
                .filter_map(|entry| normalize_entry(entry, source.name(), run_time)),
        );
        info!("{} contributed {} items", source.name(), merged.len() - before);
    }

    merged
}

/// Assemble the run corpus: read and normalize all sources, keep items that
/// pass both the relevance and the time-window filter, deduplicate by
/// fingerprint, rank newest first.
pub async fn aggregate(
    sources: &[Box<dyn NewsSource>],
    keywords: &KeywordFilter,
    window_hours: i64,
    run_time: DateTime<Utc>,
) -> Vec<NewsItem> {
    let cutoff = run_time - Duration::hours(window_hours);

    let merged = read_and_normalize(sources, run_time).await;
    let total = merged.len();

    let filtered: Vec<NewsItem> = merged
        .into_iter()
        .filter(|item| keywords.is_relevant(item) && within_window(item, cutoff))
        .collect();

    let mut corpus = dedup_by_fingerprint(filtered);
    rank_newest_first(&mut corpus);

    info!(
        "Corpus ready: {} items kept out of {} fetched",
        corpus.len(),
        total
    );
    corpus
}
