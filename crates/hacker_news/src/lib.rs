pub mod api;
pub mod models;

use api::HackerNewsAPI;
use async_trait::async_trait;
use common::content::{aggregate_content, format_comments, rank_comments};
use common::http::{build_client, METADATA_TIMEOUT};
use common::story::hacker_news_discussion_url;
use common::{
    Comment, Config, ContentFetcher, PipelineError, PipelineResult, SourceKind, Story, StorySource,
};
use reqwest::Client;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Self posts have no outbound link; their discussion page stands in.
pub fn get_story_url(url: &str, story_id: u64) -> String {
    if url.is_empty() {
        hacker_news_discussion_url(story_id)
    } else {
        url.to_string()
    }
}

pub struct HackerNewsSource {
    api: HackerNewsAPI,
    content: ContentFetcher,
    max_stories: usize,
}

impl HackerNewsSource {
    pub fn new(config: &Config) -> PipelineResult<Self> {
        let client = build_client(METADATA_TIMEOUT)?;
        Ok(Self::with_client(
            client,
            &config.sources.hn_api_base_url,
            &config.sources.readability_base_url,
            config.sources.top_stories_limit,
        ))
    }

    pub fn with_client(
        client: Client,
        api_base_url: &str,
        readability_base_url: &str,
        max_stories: usize,
    ) -> Self {
        Self {
            api: HackerNewsAPI::new(client.clone(), api_base_url),
            content: ContentFetcher::new(client, readability_base_url),
            max_stories,
        }
    }

    pub async fn fetch_story(&self, story_id: u64) -> PipelineResult<Story> {
        let item = self.api.get_item(story_id).await?;
        let url = get_story_url(&item.url, item.id);

        let article = self.content.fetch_article_text(&url).await?;
        let comments = self.collect_comments(&item.kids).await;

        let published_at = OffsetDateTime::from_unix_timestamp(item.time)
            .map_err(|e| PipelineError::Decode(format!("story {} time: {}", item.id, e)))?;

        Ok(Story {
            id: item.id,
            title: item.title,
            url,
            score: item.score,
            published_at,
            author: item.by,
            comment_count: item.descendants,
            content: aggregate_content(&article, &comments),
            summary: String::new(),
        })
    }

    /// Top comments of a story, ranked and formatted for the prompt.
    pub async fn fetch_comments(&self, story_id: u64) -> PipelineResult<String> {
        let item = self.api.get_item(story_id).await?;
        Ok(self.collect_comments(&item.kids).await)
    }

    async fn collect_comments(&self, comment_ids: &[u64]) -> String {
        let mut comments = Vec::with_capacity(comment_ids.len());

        for &comment_id in comment_ids {
            match self.api.get_item(comment_id).await {
                Ok(item) if item.is_visible() => {
                    let text = self.api.clean_html(item.text.as_deref().unwrap_or_default());
                    comments.push(Comment::new(item.by, item.score, text));
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping comment {}: {}", comment_id, e),
            }
        }

        format_comments(&rank_comments(comments))
    }
}

#[async_trait]
impl StorySource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "Hacker News"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HackerNews
    }

    async fn fetch_top_stories(&self) -> PipelineResult<Vec<Story>> {
        let story_ids = self.api.get_top_stories(self.max_stories).await?;
        info!("Fetched {} top story IDs", story_ids.len());

        let mut stories = Vec::with_capacity(story_ids.len());
        for story_id in story_ids {
            match self.fetch_story(story_id).await {
                Ok(story) => stories.push(story),
                Err(e) => warn!("Error fetching story {}: {}", story_id, e),
            }
        }

        info!("Loaded {} Hacker News stories", stories.len());
        Ok(stories)
    }
}
