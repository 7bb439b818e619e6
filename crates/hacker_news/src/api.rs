use crate::models::HNItem;
use common::{PipelineError, PipelineResult};
use reqwest::Client;
use scraper::Html;

#[derive(Clone)]
pub struct HackerNewsAPI {
    client: Client,
    base_url: String,
}

impl HackerNewsAPI {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_top_stories(&self, limit: usize) -> PipelineResult<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base_url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(PipelineError::Fetch(format!("{} returned {}", url, resp.status())));
        }
        let ids: Vec<u64> = resp.json().await?;
        Ok(ids.into_iter().take(limit).collect())
    }

    pub async fn get_item(&self, item_id: u64) -> PipelineResult<HNItem> {
        let url = format!("{}/item/{}.json", self.base_url, item_id);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(PipelineError::Fetch(format!("{} returned {}", url, resp.status())));
        }
        let item: HNItem = resp.json().await?;
        Ok(item)
    }

    /// Comment bodies come back as HTML fragments where `<p>` separates
    /// paragraphs.
    pub fn clean_html(&self, html: &str) -> String {
        Html::parse_fragment(&html.replace("<p>", "\n<p>"))
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join("")
            .trim()
            .to_string()
    }
}
