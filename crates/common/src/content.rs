use reqwest::Client;
use tracing::info;

use crate::error::{PipelineError, PipelineResult};
use crate::story::Comment;

/// Upper bound, in bytes, of the content handed to the summarizer.
pub const MAX_CONTENT_BYTES: usize = 8000;
pub const MAX_COMMENTS: usize = 10;

/// Pulls rendered article text through a readability proxy.
#[derive(Clone)]
pub struct ContentFetcher {
    client: Client,
    base_url: String,
}

impl ContentFetcher {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_article_text(&self, url: &str) -> PipelineResult<String> {
        let proxy_url = format!("{}/{}", self.base_url, url);
        info!("Fetching article text for {}", url);

        let response = self
            .client
            .get(&proxy_url)
            .header("X-Retain-Images", "none")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::Fetch(format!(
                "readability proxy returned {} for {}",
                response.status(),
                url
            )));
        }

        Ok(response.text().await?)
    }
}

/// Stable sort by score, highest first, keeping at most [`MAX_COMMENTS`].
pub fn rank_comments(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| b.score.cmp(&a.score));
    comments.truncate(MAX_COMMENTS);
    comments
}

pub fn format_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| format!("@{} (score:{}): {}", c.author, c.score, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn aggregate_content(article: &str, comments: &str) -> String {
    let parts = [
        format!("\n<article>\n{}\n</article>\n", article),
        format!("\n<comments>\n{}\n</comments>\n", comments),
    ];
    let mut content = parts.join("\n---\n");
    truncate_at_char_boundary(&mut content, MAX_CONTENT_BYTES);
    content
}

fn truncate_at_char_boundary(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
