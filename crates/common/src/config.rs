use std::env;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use time::UtcOffset;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub hn_api_base_url: String,
    pub dev_api_base_url: String,
    pub readability_base_url: String,
    pub top_stories_limit: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            hn_api_base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            dev_api_base_url: "https://dev.to/api".to_string(),
            readability_base_url: "https://r.jina.ai".to_string(),
            top_stories_limit: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Pause between two summarized stories.
    pub story_delay: Duration,
    /// Offset used for the pid date and the publish times shown in blocks.
    pub utc_offset: UtcOffset,
    pub cron: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            story_delay: Duration::from_secs(3),
            utc_offset: UtcOffset::UTC,
            cron: "0 0 9 * * *".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub sources: SourcesConfig,
    pub digest: DigestConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let sources_default = SourcesConfig::default();
        let sources = SourcesConfig {
            hn_api_base_url: env_string_or("HN_API_BASE_URL", sources_default.hn_api_base_url),
            dev_api_base_url: env_string_or("DEV_API_BASE_URL", sources_default.dev_api_base_url),
            readability_base_url: env_string_or(
                "READABILITY_BASE_URL",
                sources_default.readability_base_url,
            ),
            top_stories_limit: env_or("TOP_STORIES_LIMIT", sources_default.top_stories_limit),
        };

        let gemini_default = GeminiConfig::default();
        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: env_string_or("GEMINI_API_BASE_URL", gemini_default.base_url),
            model: env_string_or("GEMINI_MODEL", gemini_default.model),
        };

        let digest_default = DigestConfig::default();
        let offset_hours: i8 = env_or("DIGEST_UTC_OFFSET_HOURS", 0);
        let digest = DigestConfig {
            story_delay: Duration::from_secs(env_or(
                "STORY_DELAY_SECS",
                digest_default.story_delay.as_secs(),
            )),
            utc_offset: UtcOffset::from_hms(offset_hours, 0, 0).unwrap_or(UtcOffset::UTC),
            cron: env_string_or("DIGEST_CRON", digest_default.cron),
        };

        let database = DatabaseConfig {
            url: database_url_from_env()?,
        };

        Ok(Config {
            database,
            gemini,
            sources,
            digest,
        })
    }

    pub fn require_gemini_api_key(&self) -> Result<&String> {
        self.gemini
            .api_key
            .as_ref()
            .context("GEMINI_API_KEY must be set")
    }
}

fn database_url_from_env() -> Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    postgres_url(
        &env_string_or("DB_HOST", "localhost".to_string()),
        env_or("DB_PORT", 5432),
        &env_string_or("DB_USER", "postgres".to_string()),
        &env::var("DB_PASSWORD").unwrap_or_default(),
        &env_string_or("DB_NAME", "postgres".to_string()),
    )
}

/// Credentials are percent-encoded so reserved characters survive.
fn postgres_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> Result<String> {
    let mut url = Url::parse(&format!("postgres://{}:{}", host, port))
        .with_context(|| format!("invalid DB_HOST {:?}", host))?;
    url.set_path(name);
    url.set_username(user)
        .map_err(|_| anyhow!("cannot set DB_USER on {}", url))?;
    if !password.is_empty() {
        url.set_password(Some(password))
            .map_err(|_| anyhow!("cannot set DB_PASSWORD on {}", url))?;
    }
    Ok(url.to_string())
}
