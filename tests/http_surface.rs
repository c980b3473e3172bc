//! Inbound HTTP contract: preflight, validation, configuration errors, CORS.

use reqwest::Method;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_preflight_without_pool() {
    let mut config = common::config_with_pool(&[]);
    config.upstreams.pool = None;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let res = common::client()
        .request(Method::OPTIONS, format!("http://{}/anything", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 204);
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-max-age"], "86400");
    assert!(res.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_pool_not_set_and_empty() {
    let mut config = common::config_with_pool(&[]);
    config.upstreams.pool = None;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let res = common::client()
        .get(format!("http://{}/?q=rust", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "SEARX_POOL not set"}));
    shutdown.trigger();

    let mut config = common::config_with_pool(&[]);
    config.upstreams.pool = Some(" , ,".into());
    let (proxy, shutdown) = common::start_proxy(config).await;

    let res = common::client()
        .get(format!("http://{}/?q=rust", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "SEARX_POOL empty"}));
    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_query_never_reaches_upstream() {
    let (upstream, rec) = common::start_mock_backend(200, r#"{"results": []}"#).await;
    let (proxy, shutdown) = common::start_proxy(common::config_with_pool(&[&upstream])).await;
    let client = common::client();

    let too_long = "a".repeat(201);
    for request in [
        client.get(format!("http://{}/", proxy)),
        client.get(format!("http://{}/?q=%20%20", proxy)),
        client
            .post(format!("http://{}/", proxy))
            .json(&json!({ "q": too_long })),
    ] {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), 400);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert!(res.headers().get("cache-control").is_none());
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "Invalid q (required, max 200 chars)"}));
    }

    assert_eq!(rec.hits(), 0);
    shutdown.trigger();
}

#[tokio::test]
async fn test_configured_origin() {
    let (upstream, _) = common::start_mock_backend(200, r#"{"results": []}"#).await;
    let mut config = common::config_with_pool(&[&upstream]);
    config.cors.allowed_origin = "https://app.example".into();
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/?q=rust", proxy))
        .header("origin", "https://app.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["access-control-allow-origin"], "https://app.example");

    let res = client
        .get(format!("http://{}/?q=rust", proxy))
        .header("origin", "https://elsewhere.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["access-control-allow-origin"], "https://app.example");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (upstream, _) = common::start_mock_backend(200, r#"{"results": []}"#).await;
    let (proxy, shutdown) = common::start_proxy(common::config_with_pool(&[&upstream])).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/?q=rust", proxy))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");

    let res = client
        .get(format!("http://{}/?q=rust", proxy))
        .send()
        .await
        .unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_query() {
    let (upstream, rec) = common::start_mock_backend(200, r#"{"results": []}"#).await;
    let (proxy, shutdown) = common::start_proxy(common::config_with_pool(&[&upstream])).await;

    let res = common::client()
        .post(format!("http://{}/?q=fallback", proxy))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(rec.targets(), vec!["/?q=fallback&format=json"]);

    shutdown.trigger();
}
