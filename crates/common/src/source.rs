use async_trait::async_trait;

use crate::error::PipelineResult;
use crate::story::{Digest, SourceKind, Story};

/// A platform that can list its current top stories, already enriched with
/// article text and ranked comments.
#[async_trait]
pub trait StorySource: Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> SourceKind;

    /// Individual stories that fail to load are dropped; only a failure to
    /// list the stories at all is an error.
    async fn fetch_top_stories(&self) -> PipelineResult<Vec<Story>>;
}

#[async_trait]
pub trait DigestStore: Send + Sync {
    /// Publishes the digest and returns the new post id.
    async fn save_post(&self, digest: &Digest) -> PipelineResult<i64>;
}
