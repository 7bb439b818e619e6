pub mod models;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use common::http::{build_client, GENERATION_TIMEOUT};
use common::{Config, PipelineError, PipelineResult};
use models::{GenerateContentRequest, GenerateContentResponse};
use reqwest::Client;
use tracing::info;

pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// A text-in, candidates-out generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateContentRequest) -> PipelineResult<GenerateContentResponse>;
}

/// Google Gemini over its REST `generateContent` endpoint.
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> PipelineResult<Self> {
        let api_key = config.require_gemini_api_key()?;
        let http_client = build_client(GENERATION_TIMEOUT)?;
        Ok(Self::with_client(
            http_client,
            &config.gemini.base_url,
            api_key,
            &config.gemini.model,
        ))
    }

    pub fn with_client(http_client: Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateContentRequest) -> PipelineResult<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        let res = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Summarization(format!(
                "Request failed: {} - {}",
                status, text
            )));
        }

        res.json::<GenerateContentResponse>()
            .await
            .map_err(|e| PipelineError::Summarization(format!("Malformed response: {}", e)))
    }
}

/// Turns one story into a Chinese Markdown write-up.
#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn summarize(&self, title: &str, content: &str) -> PipelineResult<String> {
        info!("Summarizing story: {}", title);

        let request = GenerateContentRequest::single_turn(
            prompt::build_prompt(title, content),
            SUMMARY_TEMPERATURE,
        );
        let response = self.generator.generate(&request).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::Summarization("no candidates returned".to_string()))?;

        candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                PipelineError::Summarization("first candidate has no text part".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Candidate;
    use std::sync::Mutex;

    struct Canned {
        response: GenerateContentResponse,
        seen: Mutex<Vec<GenerateContentRequest>>,
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, request: &GenerateContentRequest) -> PipelineResult<GenerateContentResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn canned(response: GenerateContentResponse) -> Arc<Canned> {
        Arc::new(Canned {
            response,
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn first_text_part_is_the_summary() {
        let generator = canned(GenerateContentResponse::from_text("## 标题\n\n正文"));
        let summarizer = Summarizer::new(generator.clone());

        let summary = summarizer.summarize("Title", "content").await.unwrap();
        assert_eq!(summary, "## 标题\n\n正文");

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].generation_config.temperature, SUMMARY_TEMPERATURE);
        let prompt = seen[0].contents[0].parts[0].text.as_deref().unwrap();
        assert!(prompt.contains("Title"));
        assert!(prompt.contains("content"));
    }

    #[tokio::test]
    async fn no_candidates_is_an_error() {
        let summarizer = Summarizer::new(canned(GenerateContentResponse::default()));
        let err = summarizer.summarize("t", "c").await.unwrap_err();
        assert!(matches!(err, PipelineError::Summarization(_)));
    }

    #[tokio::test]
    async fn candidate_without_parts_is_an_error() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        let summarizer = Summarizer::new(canned(response));
        assert!(summarizer.summarize("t", "c").await.is_err());
    }
}
