use scraper::Html;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct DevUser {
    pub username: String,
}

/// An entry of `/articles?top=1d`.
#[derive(Debug, Deserialize)]
pub struct DevArticleSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// `/articles/{id}`.
#[derive(Debug, Deserialize)]
pub struct DevArticle {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    pub user: DevUser,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub positive_reactions_count: i64,
    #[serde(default)]
    pub comments_count: i64,
}

/// An entry of `/comments?a_id={id}`.
#[derive(Debug, Deserialize)]
pub struct DevComment {
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub body_html: String,
    pub user: DevUser,
    #[serde(default)]
    pub positive_reactions_count: i64,
}

impl DevComment {
    /// Markdown when the API sends it, otherwise the flattened HTML body.
    pub fn text(&self) -> String {
        if !self.body_markdown.trim().is_empty() {
            return self.body_markdown.trim().to_string();
        }
        Html::parse_fragment(&self.body_html)
            .root_element()
            .text()
            .collect::<String>()
            .trim()
            .to_string()
    }
}
