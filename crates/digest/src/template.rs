//! Per-source framing of the daily post: title, header paragraph and cover.

use common::SourceKind;

const HN_COVER_URL: &str = "https://cdn.wangtwothree.com/imgur/f6uVgbS.jpeg";
const DEV_COVER_URL: &str =
    "https://media2.dev.to/dynamic/image/quality=100/https://dev-to-uploads.s3.amazonaws.com/uploads/logos/resized_logo_UQww2soKuUsjaOGNB38o.png";

struct Template {
    heading: &'static str,
    description: &'static str,
    cover_url: &'static str,
    title_prefix: &'static str,
    title_suffix: &'static str,
}

fn template(source: SourceKind) -> Template {
    match source {
        SourceKind::HackerNews => Template {
            heading: "Hacker News 中文精选",
            description: "一个基于 Hacker News 的中文日报项目，每天自动抓取 Hacker News 热门文章及评论，通过 AI 生成中文解读与总结，传递科技前沿信息。",
            cover_url: HN_COVER_URL,
            title_prefix: "每日科技新知",
            title_suffix: "Hacker News 中文解读，科技前沿热点速递",
        },
        SourceKind::DevTo => Template {
            heading: "Dev.to 中文精选",
            description: "一个基于 Dev.to 的中文日报项目，每天自动抓取 Dev.to 热门文章及评论，通过 AI 生成中文解读与总结，分享开发者社区的一线实践。",
            cover_url: DEV_COVER_URL,
            title_prefix: "开发者日报",
            title_suffix: "Dev.to 中文解读，开发者社区热文速递",
        },
    }
}

/// `stamp` is the `YYYYMMDD` run date.
pub fn title(source: SourceKind, stamp: &str) -> String {
    let t = template(source);
    format!("{} NO.{}：{}", t.title_prefix, stamp, t.title_suffix)
}

pub fn wrap(source: SourceKind, stamp: &str, body: &str) -> String {
    let t = template(source);
    format!(
        "## {heading} NO.{stamp}\n\n{description}\n\n![{heading}]({cover})\n---\n\n{body}",
        heading = t.heading,
        stamp = stamp,
        description = t.description,
        cover = t.cover_url,
        body = body,
    )
}
