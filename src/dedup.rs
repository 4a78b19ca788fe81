use crate::types::NewsItem;
use std::collections::HashSet;
use tracing::debug;

/// Drop items whose fingerprint was already seen, keeping the first
/// occurrence. Input arrives in fetch order, so when two feeds carry the
/// same link the source read first wins.
pub fn dedup_by_fingerprint(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        if seen.insert(item.fingerprint.clone()) {
            unique.push(item);
        } else {
            debug!("Removing duplicate entry: {} ({})", item.title, item.link);
        }
    }

    unique
}

/// Newest first. `sort_by` is stable, so equal timestamps keep the
/// deduplicated first-seen order.
pub fn rank_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.published.cmp(&a.published));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::fingerprint;
    use chrono::{DateTime, TimeZone, Utc};

    fn item(link: &str, source: &str, published: DateTime<Utc>) -> NewsItem {
        NewsItem {
            title: format!("story at {}", link),
            link: link.to_string(),
            summary: String::new(),
            source: source.to_string(),
            published,
            fingerprint: fingerprint(link),
        }
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, hour, 0, 0).unwrap()
    }

    #[test]
    fn first_occurrence_wins_and_order_is_preserved() {
        let items = vec![
            item("https://a.example/1", "Feed A", ts(1)),
            item("https://b.example/2", "Feed B", ts(2)),
            item("https://a.example/1", "Feed C", ts(3)),
            item("https://c.example/3", "Feed C", ts(4)),
        ];

        let unique = dedup_by_fingerprint(items);
        assert_eq!(unique.len(), 3);
        assert_eq!(unique[0].source, "Feed A");
        assert_eq!(unique[1].link, "https://b.example/2");
        assert_eq!(unique[2].link, "https://c.example/3");

        let fingerprints: Vec<&str> = unique.iter().map(|i| i.fingerprint.as_str()).collect();
        let distinct: std::collections::HashSet<&str> = fingerprints.iter().copied().collect();
        assert_eq!(distinct.len(), fingerprints.len());
    }

    #[test]
    fn dedup_is_idempotent() {
        let items = vec![
            item("https://a.example/1", "Feed A", ts(1)),
            item("https://a.example/1", "Feed B", ts(2)),
            item("https://b.example/2", "Feed B", ts(3)),
        ];

        let once = dedup_by_fingerprint(items);
        let twice = dedup_by_fingerprint(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn ranking_is_newest_first_and_stable_on_ties() {
        let mut items = vec![
            item("https://a.example/old", "Feed A", ts(1)),
            item("https://a.example/tie1", "Feed A", ts(5)),
            item("https://b.example/tie2", "Feed B", ts(5)),
            item("https://c.example/new", "Feed C", ts(9)),
        ];

        rank_newest_first(&mut items);

        assert_eq!(items[0].link, "https://c.example/new");
        assert_eq!(items[1].link, "https://a.example/tie1");
        assert_eq!(items[2].link, "https://b.example/tie2");
        assert_eq!(items[3].link, "https://a.example/old");
    }
}
