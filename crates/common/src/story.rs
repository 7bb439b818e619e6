use time::OffsetDateTime;

/// The platform a story was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    HackerNews,
    DevTo,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::HackerNews => "Hacker News",
            SourceKind::DevTo => "Dev.to",
        }
    }

    pub fn pid_prefix(&self) -> &'static str {
        match self {
            SourceKind::HackerNews => "HN",
            SourceKind::DevTo => "DEV",
        }
    }

    /// Tag row the published post is filed under.
    pub fn tag_id(&self) -> i64 {
        match self {
            SourceKind::HackerNews => 6,
            SourceKind::DevTo => 15,
        }
    }
}

pub fn hacker_news_discussion_url(story_id: u64) -> String {
    format!("https://news.ycombinator.com/item?id={}", story_id)
}

#[derive(Debug, Clone)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub score: i64,
    pub published_at: OffsetDateTime,
    pub author: String,
    pub comment_count: i64,
    pub content: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub score: i64,
}

impl Comment {
    pub fn new(author: impl Into<String>, score: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            score,
        }
    }
}

/// A finished daily digest, ready to be published as a single post.
#[derive(Debug, Clone)]
pub struct Digest {
    pub source: SourceKind,
    pub title: String,
    pub content: String,
    pub pid: String,
    pub story_count: usize,
}
