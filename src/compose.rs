use crate::normalize::truncate_chars;
use crate::types::{FormattedPost, NewsItem};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Summary length inside a rendered post body.
const BODY_SUMMARY_MAX_CHARS: usize = 200;

/// Group items by source, preserving the order in which sources first
/// appear in the slice.
fn group_by_source(items: &[NewsItem]) -> Vec<(&str, Vec<&NewsItem>)> {
    let mut groups: Vec<(&str, Vec<&NewsItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(source, _)| *source == item.source) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((item.source.as_str(), vec![item])),
        }
    }
    groups
}

/// Render a batch of items as the post body: intro line, one section per
/// source, generated-at footer. Deterministic for a given slice and run
/// timestamp.
fn render_body(items: &[NewsItem], run_time: DateTime<Utc>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "<p>Top <strong>{}</strong> AI agent stories in this roundup.</p>",
        items.len()
    ));
    parts.push("<hr />".to_string());

    for (source, group) in group_by_source(items) {
        parts.push(format!("<h2>{}</h2>", source));
        parts.push("<ul>".to_string());

        for item in group {
            let time_label = item.published.format("%H:%M");
            parts.push(format!(
                "<li><strong><a href=\"{}\" target=\"_blank\">{}</a></strong><br /><small>{}</small>",
                item.link, item.title, time_label
            ));
            if !item.summary.is_empty() {
                parts.push(format!(
                    "<p>{}...</p>",
                    truncate_chars(&item.summary, BODY_SUMMARY_MAX_CHARS)
                ));
            }
            parts.push("</li>".to_string());
        }

        parts.push("</ul>".to_string());
    }

    parts.push("<hr />".to_string());
    parts.push(format!(
        "<p><em>Generated by the AI agent news aggregator at {}</em></p>",
        run_time.format("%Y-%m-%d %H:%M")
    ));

    parts.join("\n")
}

/// Single-document mode: the first `max_items` ranked items as one daily
/// roundup post.
pub fn compose_daily(
    corpus: &[NewsItem],
    max_items: usize,
    run_time: DateTime<Utc>,
) -> FormattedPost {
    let date = run_time.format("%Y-%m-%d").to_string();
    let slice = &corpus[..corpus.len().min(max_items)];

    FormattedPost {
        title: format!("AI Agent Daily Digest - {}", date),
        body: render_body(slice, run_time),
        excerpt: format!(
            "Daily AI agent news roundup for {}: {} selected stories.",
            date,
            slice.len()
        ),
    }
}

/// Batch mode: consecutive, non-overlapping slices of `items_per_batch`
/// items, one post per slice.
///
/// When the corpus cannot fill `batch_count` batches the produced count
/// drops to floor(len / items_per_batch); the remainder is not published.
/// That reduction is a reported degrade, not an error.
pub fn compose_batches(
    corpus: &[NewsItem],
    batch_count: usize,
    items_per_batch: usize,
    run_time: DateTime<Utc>,
) -> Vec<FormattedPost> {
    if items_per_batch == 0 {
        return Vec::new();
    }

    let fillable = corpus.len() / items_per_batch;
    let produced = batch_count.min(fillable);
    if produced < batch_count {
        warn!(
            "Corpus holds {} items, producing {} of {} requested batches",
            corpus.len(),
            produced,
            batch_count
        );
    }

    let date = run_time.format("%Y-%m-%d").to_string();

    (0..produced)
        .map(|i| {
            let slice = &corpus[i * items_per_batch..(i + 1) * items_per_batch];
            FormattedPost {
                title: format!("AI Agent News Brief #{} - {}", i + 1, date),
                body: render_body(slice, run_time),
                excerpt: format!(
                    "AI agent news brief #{} for {}: {} stories.",
                    i + 1,
                    date,
                    slice.len()
                ),
            }
        })
        .collect()
}
