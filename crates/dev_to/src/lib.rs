pub mod api;
pub mod models;

use api::DevToAPI;
use async_trait::async_trait;
use common::content::{aggregate_content, format_comments, MAX_COMMENTS};
use common::http::{build_client, METADATA_TIMEOUT};
use common::{Comment, Config, PipelineResult, SourceKind, Story, StorySource};
use models::DevComment;
use reqwest::Client;
use tracing::{info, warn};

pub struct DevToSource {
    api: DevToAPI,
    max_stories: usize,
}

/// Keeps the server's popularity order, takes the first [`MAX_COMMENTS`]
/// and drops those without a body.
pub fn select_comments(comments: Vec<DevComment>) -> Vec<Comment> {
    comments
        .into_iter()
        .take(MAX_COMMENTS)
        .filter_map(|c| {
            let text = c.text();
            if text.is_empty() {
                None
            } else {
                Some(Comment::new(c.user.username, c.positive_reactions_count, text))
            }
        })
        .collect()
}

impl DevToSource {
    pub fn new(config: &Config) -> PipelineResult<Self> {
        let client = build_client(METADATA_TIMEOUT)?;
        Ok(Self::with_client(
            client,
            &config.sources.dev_api_base_url,
            config.sources.top_stories_limit,
        ))
    }

    pub fn with_client(client: Client, api_base_url: &str, max_stories: usize) -> Self {
        Self {
            api: DevToAPI::new(client, api_base_url),
            max_stories,
        }
    }

    pub async fn fetch_story(&self, article_id: u64) -> PipelineResult<Story> {
        let article = self.api.get_article(article_id).await?;

        let comments = match self.fetch_comments(article.id).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("Failed to fetch comments for article {}: {}", article.id, e);
                String::new()
            }
        };

        Ok(Story {
            id: article.id,
            title: article.title,
            url: article.url,
            score: article.positive_reactions_count,
            published_at: article.published_at,
            author: article.user.username,
            comment_count: article.comments_count,
            content: aggregate_content(&article.body_markdown, &comments),
            summary: String::new(),
        })
    }

    pub async fn fetch_comments(&self, article_id: u64) -> PipelineResult<String> {
        let comments = self.api.get_comments(article_id).await?;
        Ok(format_comments(&select_comments(comments)))
    }
}

#[async_trait]
impl StorySource for DevToSource {
    fn name(&self) -> &'static str {
        "Dev.to"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::DevTo
    }

    async fn fetch_top_stories(&self) -> PipelineResult<Vec<Story>> {
        let articles = self.api.list_top_articles(self.max_stories).await?;
        info!("Fetched {} top Dev.to articles", articles.len());

        let mut stories = Vec::with_capacity(articles.len());
        for summary in articles {
            match self.fetch_story(summary.id).await {
                Ok(story) => stories.push(story),
                Err(e) => warn!("Error fetching article {} ({}): {}", summary.id, summary.title, e),
            }
        }

        info!("Loaded {} Dev.to stories", stories.len());
        Ok(stories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::DevUser;

    fn comment(user: &str, reactions: i64, markdown: &str) -> DevComment {
        DevComment {
            body_markdown: markdown.to_string(),
            body_html: String::new(),
            user: DevUser { username: user.to_string() },
            positive_reactions_count: reactions,
        }
    }

    #[test]
    fn server_order_is_trusted() {
        let selected = select_comments(vec![comment("a", 1, "one"), comment("b", 7, "two")]);
        let authors: Vec<_> = selected.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(authors, vec!["a", "b"]);
    }

    #[test]
    fn blank_bodies_are_dropped_after_the_cap() {
        let mut comments: Vec<_> = (0..12).map(|i| comment(&format!("u{}", i), i, "text")).collect();
        comments[3].body_markdown = "   ".to_string();

        let selected = select_comments(comments);
        assert_eq!(selected.len(), MAX_COMMENTS - 1);
        assert!(selected.iter().all(|c| c.author != "u3" && c.author != "u10"));
    }

    #[test]
    fn html_body_is_used_when_markdown_is_missing() {
        let mut c = comment("a", 0, "");
        c.body_html = "<p>Great <strong>post</strong></p>".to_string();
        assert_eq!(c.text(), "Great post");
    }
}
