//! Integration tests for the analyzer API, driving the full router
//! in-process. The external analysis worker is stood in for by a wiremock
//! server on the dispatch side; ingestion is exercised directly.

use api_lib::adapters::{InMemoryResultStore, WebhookDispatcher};
use api_lib::config::Config;
use api_lib::web::{self, state::AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "test-callback-secret";

fn test_app(webhook_url: &str) -> Router {
    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        webhook_url: webhook_url.to_string(),
        callback_secret: SECRET.to_string(),
        result_ttl: Duration::from_secs(3600),
        log_level: tracing::Level::INFO,
    });
    let state = Arc::new(AppState {
        store: Arc::new(InMemoryResultStore::new()),
        dispatcher: Arc::new(WebhookDispatcher::new(
            reqwest::Client::new(),
            webhook_url.to_string(),
        )),
        config,
    });
    web::app(state)
}

fn analyze_body(prompt_count: usize) -> Value {
    json!({
        "domain": "stripe.com",
        "prompts": (0..prompt_count)
            .map(|i| format!("how do i accept payments {i}"))
            .collect::<Vec<_>>(),
    })
}

fn record(rank: u32, final_score: f64) -> Value {
    json!({
        "rank": rank,
        "prompt_text": format!("prompt {rank}"),
        "final_score": final_score,
        "ai_opportunity_score": 72.0,
        "seo_opportunity_score": 64.0,
        "score_reasoning": "strong citation signals",
        "perplexity_cited": true,
        "gemini_cited": false,
        "perplexity_citation_rank": 2,
        "gemini_citation_rank": null,
        "perplexity_first_paragraph": true,
        "gemini_first_paragraph": false,
        "engine_consensus": 0.5,
        "search_volume": 4400,
        "keyword_difficulty": 38.0,
        "cpc": 2.15,
        "trend_yoy": 12.5,
        "trend_mom": -1.2,
        "has_featured_snippet": true,
        "has_paa": false,
        "has_ai_overview": true,
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn ingest_request(session_id: &str, prompts: Value, token: Option<&str>) -> Request<Body> {
    let body = json!({ "sessionId": session_id, "top_prompts": prompts });
    let mut builder = Request::builder()
        .method("POST")
        .uri("/results/store")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Waits for the fire-and-forget dispatch task to reach the mock worker.
async fn wait_for_webhook(server: &MockServer) -> Value {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if let Some(request) = received.first() {
            return serde_json::from_slice(&request.body).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("webhook was never called");
}

#[tokio::test]
async fn submit_returns_a_fresh_session_and_triggers_the_worker() {
    let worker = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&worker)
        .await;
    let app = test_app(&format!("{}/webhook", worker.uri()));

    let (status, body) = send(&app, post_json("/analyze", &analyze_body(5))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let session_id = body["sessionId"].as_str().unwrap().to_string();
    assert!(!session_id.is_empty());

    // The worker receives the request merged with the minted session id.
    let payload = wait_for_webhook(&worker).await;
    assert_eq!(payload["sessionId"], session_id.as_str());
    assert_eq!(payload["domain"], "stripe.com");
    assert_eq!(payload["prompts"].as_array().unwrap().len(), 5);

    // A second submission mints a different session.
    let (_, second) = send(&app, post_json("/analyze", &analyze_body(5))).await;
    assert_ne!(second["sessionId"], session_id.as_str());
}

#[tokio::test]
async fn submit_succeeds_even_when_the_worker_is_down() {
    // Dispatch is fire-and-forget: the caller gets its session id before the
    // webhook call resolves, and a dispatch failure is logged, not surfaced.
    let app = test_app("http://127.0.0.1:9/webhook");

    let (status, body) = send(&app, post_json("/analyze", &analyze_body(5))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn submit_rejects_under_minimum_prompt_count() {
    let worker = MockServer::start().await;
    let app = test_app(&worker.uri());

    let (status, body) = send(&app, post_json("/analyze", &analyze_body(3))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Nothing was dispatched.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(worker.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn submit_rejects_invalid_domain() {
    let app = test_app("http://worker.invalid/webhook");
    let body = json!({ "domain": "not a domain", "prompts": analyze_body(5)["prompts"] });

    let (status, response) = send(&app, post_json("/analyze", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn submit_rejects_malformed_json() {
    let app = test_app("http://worker.invalid/webhook");
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_session_polls_as_processing() {
    let app = test_app("http://worker.invalid/webhook");

    let (status, body) = send(&app, get("/analyze/status/never-submitted")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");
}

#[tokio::test]
async fn status_responses_are_never_cached() {
    let app = test_app("http://worker.invalid/webhook");

    let response = app
        .clone()
        .oneshot(get("/analyze/status/abc"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn ingested_results_are_delivered_once() {
    let app = test_app("http://worker.invalid/webhook");
    let prompts = json!([
        record(1, 95.0),
        record(2, 90.0),
        record(3, 85.0),
        record(4, 80.0),
        record(5, 75.0),
    ]);

    let (status, body) = send(&app, ingest_request("abc", prompts, Some(SECRET))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, get("/analyze/status/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "complete");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    // Sorted by descending final_score with rank consistent with the order.
    for (i, item) in data.iter().enumerate() {
        assert_eq!(item["rank"], (i as u64) + 1);
        if i > 0 {
            assert!(item["final_score"].as_f64() <= data[i - 1]["final_score"].as_f64());
        }
    }

    // Delete-on-read: the next poll is back to processing.
    let (_, body) = send(&app, get("/analyze/status/abc")).await;
    assert_eq!(body["status"], "processing");
}

#[tokio::test]
async fn reingestion_overwrites_previous_results() {
    let app = test_app("http://worker.invalid/webhook");

    let first = json!([record(1, 10.0)]);
    let second = json!([record(1, 99.0), record(2, 98.0)]);
    send(&app, ingest_request("abc", first, Some(SECRET))).await;
    send(&app, ingest_request("abc", second, Some(SECRET))).await;

    let (_, body) = send(&app, get("/analyze/status/abc")).await;
    assert_eq!(body["status"], "complete");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["final_score"], 99.0);
}

#[tokio::test]
async fn ingestion_without_auth_is_rejected_with_no_side_effect() {
    let app = test_app("http://worker.invalid/webhook");
    let prompts = json!([record(1, 95.0)]);

    for token in [None, Some(""), Some("wrong-secret")] {
        let (status, body) = send(&app, ingest_request("abc", prompts.clone(), token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized");
    }

    // No write happened for any of the rejected requests.
    let (_, body) = send(&app, get("/analyze/status/abc")).await;
    assert_eq!(body["status"], "processing");
}

#[tokio::test]
async fn ingestion_auth_runs_before_body_validation() {
    // A garbage body with a bad token is a 401, not a 400.
    let app = test_app("http://worker.invalid/webhook");
    let request = Request::builder()
        .method("POST")
        .uri("/results/store")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer wrong-secret")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ingestion_with_missing_fields_is_a_bad_request() {
    let app = test_app("http://worker.invalid/webhook");

    for body in [
        json!({ "top_prompts": [record(1, 95.0)] }),
        json!({ "sessionId": "abc" }),
        json!({}),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/results/store")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {SECRET}"))
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, response) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
    }
}
