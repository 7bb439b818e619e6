use crate::models::{DevArticle, DevArticleSummary, DevComment};
use common::{PipelineError, PipelineResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct DevToAPI {
    client: Client,
    base_url: String,
}

impl DevToAPI {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> PipelineResult<T> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(PipelineError::Fetch(format!("{} returned {}", url, resp.status())));
        }
        Ok(resp.json().await?)
    }

    /// Top articles of the last day.
    pub async fn list_top_articles(&self, per_page: usize) -> PipelineResult<Vec<DevArticleSummary>> {
        let url = format!("{}/articles?top=1d&per_page={}", self.base_url, per_page);
        self.get_json(&url).await
    }

    pub async fn get_article(&self, article_id: u64) -> PipelineResult<DevArticle> {
        let url = format!("{}/articles/{}", self.base_url, article_id);
        self.get_json(&url).await
    }

    /// Comments ordered by popularity on the server side.
    pub async fn get_comments(&self, article_id: u64) -> PipelineResult<Vec<DevComment>> {
        let url = format!("{}/comments?a_id={}&order=popular", self.base_url, article_id);
        self.get_json(&url).await
    }
}
