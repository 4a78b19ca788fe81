use crate::types::{NewsItem, RawEntry};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Upper bound on a normalized summary, in characters. Summaries carry CJK
/// text, so this is a character count, not bytes.
pub const SUMMARY_MAX_CHARS: usize = 500;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup down to plain text: decode entities, drop tags, collapse
/// whitespace runs to single spaces.
pub fn clean_html(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    RE_WS.replace_all(&stripped, " ").trim().to_string()
}

/// First 6 bytes of the SHA-256 of the link, hex encoded. Stable across
/// runs; used only to detect duplicate links.
pub fn fingerprint(link: &str) -> String {
    let digest = Sha256::digest(link.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

/// Convert one raw feed entry into a canonical item.
///
/// Entries without a usable link are dropped here: their fingerprints would
/// all collapse to the digest of the empty string and deduplicate against
/// each other. Missing titles fall back to "Untitled"; missing timestamps
/// fall back to the ingestion time `now`, which deliberately makes undated
/// items count as fresh.
pub fn normalize_entry(entry: RawEntry, source: &str, now: DateTime<Utc>) -> Option<NewsItem> {
    let link = match entry.link {
        Some(l) if !l.trim().is_empty() => l,
        _ => {
            debug!("Skipping entry without link from {}", source);
            return None;
        }
    };

    let title = entry
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let raw_summary = entry.summary.or(entry.description).unwrap_or_default();
    let summary = truncate_chars(&clean_html(&raw_summary), SUMMARY_MAX_CHARS);

    let published = entry.published.or(entry.updated).unwrap_or(now);
    let fingerprint = fingerprint(&link);

    Some(NewsItem {
        title,
        link,
        summary,
        source: source.to_string(),
        published,
        fingerprint,
    })
}
