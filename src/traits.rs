use crate::types::{FormattedPost, PostRef, PublishState, RawEntry, Result};
use async_trait::async_trait;

/// A feed of news entries the pipeline can read.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Human-readable name, carried onto every item from this source.
    fn name(&self) -> &str;

    /// Fetch the source's current entries.
    ///
    /// Must not fail: transport and parse problems are logged by the
    /// implementation and yield an empty batch, so one broken source never
    /// aborts the run.
    async fn read(&self) -> Vec<RawEntry>;
}

/// The publishing side of a run. Kept behind a trait so the orchestrator
/// can be exercised against an in-memory sink in tests.
#[async_trait]
pub trait PublishSink: Send + Sync {
    /// Liveness probe. When this returns false the run aborts before any
    /// taxonomy or submission call.
    async fn check_reachable(&self) -> bool;

    /// Create the category if needed and return its id either way.
    async fn ensure_category(&self, name: &str, slug: &str, description: &str) -> Result<u64>;

    /// Create the tag if needed and return its id either way.
    async fn ensure_tag(&self, name: &str) -> Result<u64>;

    /// Submit one document under the given taxonomy ids.
    async fn create_post(
        &self,
        post: &FormattedPost,
        category_ids: &[u64],
        tag_ids: &[u64],
        state: PublishState,
    ) -> Result<PostRef>;
}
