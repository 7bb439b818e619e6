pub mod template;

use std::time::Duration;

use common::config::DigestConfig;
use common::story::hacker_news_discussion_url;
use common::{Digest, SourceKind, Story};
use summarizer::Summarizer;
use time::error::Format;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{error, info, warn};

/// `YYYYMMDD`, the date stamp used in pids, titles and headers.
pub fn date_stamp(date: Date) -> Result<String, Format> {
    date.format(format_description!("[year][month][day]"))
}

/// One post per source per day: `HN20240615`, `DEV20240615`.
pub fn make_pid(source: SourceKind, date: Date) -> Result<String, Format> {
    Ok(format!("{}{}", source.pid_prefix(), date_stamp(date)?))
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

fn format_timestamp(at: OffsetDateTime, offset: UtcOffset) -> String {
    let at = at.to_offset(offset);
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_else(|_| at.to_string())
}

/// Markdown block for one summarized story, terminated by a rule.
pub fn format_block(story: &Story, source: SourceKind, offset: UtcOffset) -> String {
    let mut block = format!("{}\n\n- 原文: [{}]({})\n", story.summary, story.title, story.url);
    if source == SourceKind::HackerNews {
        block.push_str(&format!(
            "- 讨论: [Hacker News]({})\n",
            hacker_news_discussion_url(story.id)
        ));
    }
    block.push_str(&format!(
        "- 作者: {}\n- 评分: {}\n- 评论数: {}\n- 发布时间: {}\n\n---\n\n",
        story.author,
        story.score,
        story.comment_count,
        format_timestamp(story.published_at, offset)
    ));
    block
}

pub struct DigestAssembler {
    summarizer: Summarizer,
    story_delay: Duration,
    utc_offset: UtcOffset,
}

impl DigestAssembler {
    pub fn new(summarizer: Summarizer, config: &DigestConfig) -> Self {
        Self::with_settings(summarizer, config.story_delay, config.utc_offset)
    }

    pub fn with_settings(summarizer: Summarizer, story_delay: Duration, utc_offset: UtcOffset) -> Self {
        Self {
            summarizer,
            story_delay,
            utc_offset,
        }
    }

    /// Builds today's digest, or `None` when no story could be summarized.
    pub async fn build_digest(&self, stories: Vec<Story>, source: SourceKind) -> Option<Digest> {
        self.build_digest_on(stories, source, today(self.utc_offset)).await
    }

    pub async fn build_digest_on(
        &self,
        stories: Vec<Story>,
        source: SourceKind,
        date: Date,
    ) -> Option<Digest> {
        let total = stories.len();
        let mut body = String::new();
        let mut story_count = 0;

        for (index, mut story) in stories.into_iter().enumerate() {
            info!("{}/{} {}", index + 1, total, story.title);

            match self.summarizer.summarize(&story.title, &story.content).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    story.summary = summary;
                    body.push_str(&format_block(&story, source, self.utc_offset));
                    story_count += 1;
                }
                Ok(_) => warn!("Empty summary for story [{}]", story.title),
                Err(e) => warn!("Error summarizing story [{}]: {}", story.title, e),
            }

            if index + 1 < total && !self.story_delay.is_zero() {
                tokio::time::sleep(self.story_delay).await;
            }
        }

        if story_count == 0 {
            error!("No {} story could be summarized; no digest today", source.label());
            return None;
        }

        let stamp = match date_stamp(date) {
            Ok(stamp) => stamp,
            Err(e) => {
                error!("Cannot stamp {} digest for {}: {}", source.label(), date, e);
                return None;
            }
        };

        info!("Assembled {} digest from {} of {} stories", source.label(), story_count, total);
        Some(Digest {
            source,
            title: template::title(source, &stamp),
            content: template::wrap(source, &stamp, &body),
            pid: format!("{}{}", source.pid_prefix(), stamp),
            story_count,
        })
    }
}
