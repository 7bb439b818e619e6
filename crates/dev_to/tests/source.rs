use common::StorySource;
use dev_to::DevToSource;
use mockito::{Matcher, Server};
use reqwest::Client;

fn path(pattern: &str) -> Matcher {
    Matcher::Regex(pattern.to_string())
}

fn query(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect(),
    )
}

#[tokio::test]
async fn article_body_and_comments_are_aggregated() {
    let mut dev = Server::new_async().await;

    let _list = dev
        .mock("GET", path(r"^/articles(\?.*)?$"))
        .match_query(query(&[("top", "1d"), ("per_page", "2")]))
        .with_status(200)
        .with_body(r#"[{"id": 11, "title": "Rust tips"}, {"id": 12, "title": "Gone"}]"#)
        .create_async()
        .await;
    let _article = dev
        .mock("GET", "/articles/11")
        .with_status(200)
        .with_body(
            r#"{"id": 11, "title": "Rust tips", "url": "https://dev.to/amy/rust-tips",
                "published_at": "2024-06-15T08:30:00Z", "user": {"username": "amy"},
                "body_markdown": "Use clippy.", "positive_reactions_count": 42,
                "comments_count": 2}"#,
        )
        .create_async()
        .await;
    let _missing = dev
        .mock("GET", "/articles/12")
        .with_status(404)
        .create_async()
        .await;
    let _comments = dev
        .mock("GET", path(r"^/comments(\?.*)?$"))
        .match_query(query(&[("a_id", "11"), ("order", "popular")]))
        .with_status(200)
        .with_body(
            r#"[{"body_markdown": "Agreed!", "user": {"username": "ben"}, "positive_reactions_count": 1},
                {"body_html": "<p>Also rustfmt</p>", "user": {"username": "cy"}}]"#,
        )
        .create_async()
        .await;

    let source = DevToSource::with_client(Client::new(), &dev.url(), 2);
    let stories = source.fetch_top_stories().await.unwrap();

    _list.assert_async().await;
    _comments.assert_async().await;

    assert_eq!(stories.len(), 1);
    let story = &stories[0];
    assert_eq!(story.id, 11);
    assert_eq!(story.url, "https://dev.to/amy/rust-tips");
    assert_eq!(story.author, "amy");
    assert_eq!(story.score, 42);
    assert_eq!(story.comment_count, 2);
    assert_eq!(story.published_at.unix_timestamp(), 1718440200);
    assert!(story.content.contains("<article>\nUse clippy.\n</article>"));
    assert!(story
        .content
        .contains("<comments>\n@ben (score:1): Agreed!\n@cy (score:0): Also rustfmt\n</comments>"));
}

#[tokio::test]
async fn comment_failure_leaves_an_empty_block() {
    let mut dev = Server::new_async().await;

    let _article = dev
        .mock("GET", "/articles/5")
        .with_status(200)
        .with_body(
            r#"{"id": 5, "title": "t", "url": "https://dev.to/x/t",
                "published_at": "2024-06-15T00:00:00Z", "user": {"username": "x"},
                "body_markdown": "body"}"#,
        )
        .create_async()
        .await;
    let _comments = dev
        .mock("GET", path(r"^/comments"))
        .with_status(500)
        .create_async()
        .await;

    let source = DevToSource::with_client(Client::new(), &dev.url(), 30);
    let story = source.fetch_story(5).await.unwrap();

    assert!(story.content.contains("<comments>\n\n</comments>"));
}

#[tokio::test]
async fn listing_is_limited_to_the_configured_page_size() {
    let mut dev = Server::new_async().await;

    let _list = dev
        .mock("GET", path(r"^/articles(\?.*)?$"))
        .match_query(query(&[("top", "1d"), ("per_page", "7")]))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let source = DevToSource::with_client(Client::new(), &dev.url(), 7);
    let stories = source.fetch_top_stories().await.unwrap();

    assert!(stories.is_empty());
    _list.assert_async().await;
}
