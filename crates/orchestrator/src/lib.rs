use std::sync::Arc;

use common::{Config, DigestStore, PipelineError, PipelineResult, StorySource};
use dev_to::DevToSource;
use digest::DigestAssembler;
use hacker_news::HackerNewsSource;
use storage::PostStore;
use summarizer::{GeminiClient, Summarizer};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Published { post_id: i64, pid: String },
    /// Nothing could be summarized, so nothing was stored.
    Empty,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTally {
    pub published: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Source → digest → store, one source at a time.
pub struct Pipeline {
    assembler: DigestAssembler,
    store: Arc<dyn DigestStore>,
}

impl Pipeline {
    pub fn new(assembler: DigestAssembler, store: Arc<dyn DigestStore>) -> Self {
        Self { assembler, store }
    }

    /// Wires the Gemini summarizer and the database store from `config`.
    pub async fn from_config(config: &Config) -> PipelineResult<Self> {
        let generator = GeminiClient::new(config)?;
        let summarizer = Summarizer::new(Arc::new(generator));
        let assembler = DigestAssembler::new(summarizer, &config.digest);
        let store = PostStore::connect(&config.database.url).await?;
        Ok(Self::new(assembler, Arc::new(store)))
    }

    pub async fn run_source(&self, source: &dyn StorySource) -> PipelineResult<RunOutcome> {
        info!("{} pipeline starting", source.name());

        let stories = source.fetch_top_stories().await?;
        let Some(digest) = self.assembler.build_digest(stories, source.kind()).await else {
            return Ok(RunOutcome::Empty);
        };

        let post_id = self.store.save_post(&digest).await?;
        Ok(RunOutcome::Published {
            post_id,
            pid: digest.pid,
        })
    }

    /// Runs every source in order. A failing source never stops the next one.
    pub async fn run_all(&self, sources: &[Box<dyn StorySource>]) -> RunTally {
        let mut tally = RunTally::default();

        for source in sources {
            match self.run_source(source.as_ref()).await {
                Ok(RunOutcome::Published { post_id, pid }) => {
                    info!("{} published as post {} ({})", source.name(), post_id, pid);
                    tally.published += 1;
                }
                Ok(RunOutcome::Empty) => {
                    tally.skipped += 1;
                }
                Err(PipelineError::DuplicatePost(pid)) => {
                    warn!("{} digest {} was already published today", source.name(), pid);
                    tally.skipped += 1;
                }
                Err(e) => {
                    error!("{} failed: {}", source.name(), e);
                    tally.failed += 1;
                }
            }
        }

        info!(
            "All sources finished. Published: {}, Skipped: {}, Failed: {}",
            tally.published, tally.skipped, tally.failed
        );
        tally
    }
}

/// Hacker News first, then Dev.to.
pub fn build_sources(config: &Config) -> PipelineResult<Vec<Box<dyn StorySource>>> {
    Ok(vec![
        Box::new(HackerNewsSource::new(config)?),
        Box::new(DevToSource::new(config)?),
    ])
}
