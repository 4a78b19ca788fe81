use crate::traits::PublishSink;
use crate::types::{
    AggregatorError, FormattedPost, PublishOutcome, PublishState, Result, RunReport,
    TaxonomyContext,
};
use tracing::{error, info};

pub const CATEGORY_NAME: &str = "AI Agent";
pub const CATEGORY_SLUG: &str = "ai-agent";
pub const CATEGORY_DESCRIPTION: &str = "News about AI agents";
pub const DEFAULT_TAGS: &[&str] = &["AI", "Agent", "LLM", "Daily News"];

/// Resolve the category and tag ids every post in this run is filed under.
/// The ids live only in the returned context.
pub async fn setup_taxonomy(sink: &dyn PublishSink) -> Result<TaxonomyContext> {
    let category_id = sink
        .ensure_category(CATEGORY_NAME, CATEGORY_SLUG, CATEGORY_DESCRIPTION)
        .await?;

    let mut tag_ids = Vec::with_capacity(DEFAULT_TAGS.len());
    for tag in DEFAULT_TAGS {
        tag_ids.push(sink.ensure_tag(tag).await?);
    }

    info!(
        "Resolved taxonomy: category {} with {} tags",
        category_id,
        tag_ids.len()
    );
    Ok(TaxonomyContext {
        category_id,
        tag_ids,
    })
}

/// Submit every post in order and report per-document outcomes.
///
/// An unreachable sink aborts the run before any taxonomy or submission
/// call. After that point one rejected post is recorded as a failure and
/// the remaining posts still go out.
pub async fn publish_run(
    sink: &dyn PublishSink,
    posts: &[FormattedPost],
    state: PublishState,
) -> Result<RunReport> {
    if !sink.check_reachable().await {
        return Err(AggregatorError::SinkUnreachable);
    }

    let taxonomy = setup_taxonomy(sink).await?;
    let mut report = RunReport::default();

    for (i, post) in posts.iter().enumerate() {
        info!("Publishing {}/{}: {}", i + 1, posts.len(), post.title);
        match sink
            .create_post(post, &[taxonomy.category_id], &taxonomy.tag_ids, state)
            .await
        {
            Ok(post_ref) => {
                report.outcomes.push(PublishOutcome::Published {
                    title: post.title.clone(),
                    post: post_ref,
                });
            }
            Err(e) => {
                error!("Failed to publish '{}': {}", post.title, e);
                report.outcomes.push(PublishOutcome::Failed {
                    title: post.title.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Publish run finished: {}/{} succeeded",
        report.published(),
        report.outcomes.len()
    );
    Ok(report)
}
