//! Integration tests for the news clients using wiremock HTTP mocks.

use postbot_news::{BingNewsClient, HackerNewsClient, NewsError, NewsSource};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn bing_search_maps_articles_and_truncates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7.0/news/search"))
        .and(header("Ocp-Apim-Subscription-Key", "bing-key"))
        .and(query_param("q", "Artificial Intelligence"))
        .and(query_param("mkt", "en-US"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_type": "News",
            "value": [
                { "name": "Nvidia unveils new chip", "description": "Faster inference", "url": "https://n.example/1" },
                { "name": "OpenAI ships update", "url": "https://n.example/2" },
                { "name": "Third story", "description": "x", "url": "https://n.example/3" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        BingNewsClient::with_base_url("bing-key", "Artificial Intelligence", 5, &server.uri())
            .unwrap();
    let items = client.fetch(2).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Nvidia unveils new chip");
    assert_eq!(items[0].description, "Faster inference");
    assert_eq!(items[1].description, "", "missing description defaults to empty");
    assert_eq!(items[1].url, "https://n.example/2");
}

#[tokio::test]
async fn bing_error_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7.0/news/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Access denied"))
        .mount(&server)
        .await;

    let client = BingNewsClient::with_base_url("bad", "AI", 5, &server.uri()).unwrap();
    let err = client.search("AI", 10).await.unwrap_err();
    assert!(matches!(err, NewsError::Api { status: 401, source_name: "bing", .. }));
}

#[tokio::test]
async fn hackernews_filters_and_skips_broken_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3, 4, 5, 6])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/item/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "type": "story", "score": 250,
            "title": "Show HN: A tiny Rust kernel in 1000 lines", "url": "https://k.example"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/item/2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "type": "story", "score": 50,
            "title": "Low score story with a long enough title", "url": "https://l.example"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/item/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "type": "story", "score": 900, "title": "Short title"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/item/4.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/item/5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "type": "story", "score": 120,
            "title": "Ask HN: How do you review large pull requests?"
        })))
        .mount(&server)
        .await;

    let client = HackerNewsClient::with_base_url(5, &server.uri()).unwrap();
    let items = client.top_stories(5).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].url, "https://k.example");
    assert_eq!(items[1].url, "https://news.ycombinator.com/item?id=5");
    assert!(items.iter().all(|i| i.description.is_empty()));
}

#[tokio::test]
async fn hackernews_top_list_failure_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HackerNewsClient::with_base_url(5, &server.uri()).unwrap();
    let err = client.top_stories(10).await.unwrap_err();
    assert!(matches!(err, NewsError::Deserialize { .. }));
}
