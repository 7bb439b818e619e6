use common::StorySource;
use hacker_news::HackerNewsSource;
use mockito::{Matcher, Mock, Server};
use reqwest::Client;

async fn mock_item(server: &mut Server, id: u64, body: &str) -> Mock {
    server
        .mock("GET", format!("/item/{}.json", id).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn self_post_is_rendered_from_its_discussion_page() {
    let mut hn = Server::new_async().await;
    let mut reader = Server::new_async().await;

    let _story = mock_item(
        &mut hn,
        7,
        r#"{"id":7,"title":"Ask HN: Tabs or spaces?","score":120,"time":1718409600,
            "by":"alice","descendants":3,"kids":[71,72,73,74]}"#,
    )
    .await;
    let _low = mock_item(&mut hn, 71, r#"{"id":71,"by":"bob","score":3,"text":"Tabs."}"#).await;
    let _high =
        mock_item(&mut hn, 72, r#"{"id":72,"by":"carol","score":9,"text":"Spaces<p>Always."}"#)
            .await;
    let _deleted = mock_item(&mut hn, 73, r#"{"id":73,"deleted":true}"#).await;
    let _broken = hn
        .mock("GET", "/item/74.json")
        .with_status(500)
        .create_async()
        .await;

    let article = reader
        .mock(
            "GET",
            Matcher::Regex(r"^/https://news\.ycombinator\.com/item(\?id=7)?$".to_string()),
        )
        .match_header("X-Retain-Images", "none")
        .with_status(200)
        .with_body("Thread text")
        .expect(1)
        .create_async()
        .await;

    let source = HackerNewsSource::with_client(Client::new(), &hn.url(), &reader.url(), 30);
    let story = source.fetch_story(7).await.unwrap();

    assert_eq!(story.url, "https://news.ycombinator.com/item?id=7");
    assert_eq!(story.title, "Ask HN: Tabs or spaces?");
    assert_eq!(story.author, "alice");
    assert_eq!(story.comment_count, 3);
    assert_eq!(story.published_at.unix_timestamp(), 1718409600);
    assert!(story.summary.is_empty());
    assert!(story.content.contains("<article>\nThread text\n</article>"));

    let carol = story.content.find("@carol (score:9): Spaces\nAlways.").unwrap();
    let bob = story.content.find("@bob (score:3): Tabs.").unwrap();
    assert!(carol < bob);

    article.assert_async().await;
}

#[tokio::test]
async fn comments_can_be_fetched_on_their_own() {
    let mut hn = Server::new_async().await;

    let _story = mock_item(&mut hn, 9, r#"{"id":9,"title":"t","kids":[91,92]}"#).await;
    let _first = mock_item(&mut hn, 91, r#"{"id":91,"by":"x","score":1,"text":"low"}"#).await;
    let _second = mock_item(&mut hn, 92, r#"{"id":92,"by":"y","score":5,"text":"high"}"#).await;

    let source = HackerNewsSource::with_client(Client::new(), &hn.url(), &hn.url(), 30);
    let comments = source.fetch_comments(9).await.unwrap();

    assert_eq!(comments, "@y (score:5): high\n@x (score:1): low");
}

#[tokio::test]
async fn failing_stories_are_skipped() {
    let mut hn = Server::new_async().await;
    let mut reader = Server::new_async().await;

    let _top = hn
        .mock("GET", "/topstories.json")
        .with_status(200)
        .with_body("[1, 2, 3, 4]")
        .create_async()
        .await;
    let _ok = mock_item(
        &mut hn,
        1,
        r#"{"id":1,"title":"Works","url":"https://example.com/ok","score":10,"time":1718409600,"by":"a"}"#,
    )
    .await;
    let _paywalled = mock_item(
        &mut hn,
        2,
        r#"{"id":2,"title":"Paywalled","url":"https://example.com/paywall","score":5,"time":1718409600,"by":"b"}"#,
    )
    .await;
    let _garbled = mock_item(&mut hn, 3, "not json").await;

    let _ok_article = reader
        .mock("GET", "/https://example.com/ok")
        .with_status(200)
        .with_body("ok body")
        .create_async()
        .await;
    let _paywall_article = reader
        .mock("GET", "/https://example.com/paywall")
        .with_status(403)
        .create_async()
        .await;

    let source = HackerNewsSource::with_client(Client::new(), &hn.url(), &reader.url(), 3);
    let stories = source.fetch_top_stories().await.unwrap();

    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].id, 1);
    assert_eq!(stories[0].url, "https://example.com/ok");
}

#[tokio::test]
async fn listing_failure_is_an_error() {
    let mut hn = Server::new_async().await;
    let _down = hn
        .mock("GET", Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let source = HackerNewsSource::with_client(Client::new(), &hn.url(), &hn.url(), 30);
    assert!(source.fetch_top_stories().await.is_err());
}
