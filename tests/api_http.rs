// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /score?url=...
// - POST /score
// - result shape (exactly `score` + `explanation`)

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`
use url::Url;

use credibility_scorer::api::{self, AppState};
use credibility_scorer::fetch::{FetchOutcome, FetchedPage, PageContent, PageFetcher};
use credibility_scorer::weights::ScoringWeights;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct FixtureFetcher {
    outcome: FetchOutcome,
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch_page(&self, _url: &Url) -> FetchOutcome {
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

/// Build the same Router the binary uses, with a canned fetch outcome.
fn test_router(outcome: FetchOutcome) -> Router {
    let state = AppState::new(
        Arc::new(FixtureFetcher { outcome }),
        ScoringWeights::default(),
    );
    api::router(state)
}

fn html_outcome() -> FetchOutcome {
    FetchOutcome::Success(FetchedPage {
        status: 200,
        used_https: true,
        content: PageContent::Html {
            title: Some("About".into()),
            text: "short page".into(),
        },
    })
}

async fn read_json(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router(html_outcome());

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok");
}

#[tokio::test]
async fn api_score_query_returns_the_two_key_result() {
    let app = test_router(html_outcome());

    let req = Request::builder()
        .method("GET")
        .uri("/score?url=https://www.nih.gov")
        .body(Body::empty())
        .expect("build GET /score");

    let resp = app.oneshot(req).await.expect("oneshot /score");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    let obj = v.as_object().expect("json object");
    assert_eq!(obj.len(), 2, "exactly score + explanation");
    let score = v["score"].as_f64().expect("score number");
    assert!((0.0..=1.0).contains(&score));
    assert!(v["explanation"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn api_score_post_accepts_a_json_body() {
    let app = test_router(html_outcome());

    let payload = json!({ "url": "https://example.com" });
    let req = Request::builder()
        .method("POST")
        .uri("/score")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /score");

    let resp = app.oneshot(req).await.expect("oneshot POST /score");
    assert!(resp.status().is_success(), "got {}", resp.status());

    let v = read_json(resp).await;
    let score = v["score"].as_f64().expect("score number");
    assert!((0.0..=1.0).contains(&score));
}

#[tokio::test]
async fn api_score_with_invalid_url_still_returns_a_result() {
    let app = test_router(html_outcome());

    let payload = json!({ "url": "not a url" });
    let req = Request::builder()
        .method("POST")
        .uri("/score")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /score");

    let resp = app.oneshot(req).await.expect("oneshot POST /score");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert_eq!(v["score"].as_f64(), Some(0.0));
    assert!(v["explanation"]
        .as_str()
        .is_some_and(|s| s.contains("Invalid input URL")));
}

#[tokio::test]
async fn api_score_without_url_param_is_treated_as_invalid() {
    let app = test_router(html_outcome());

    let req = Request::builder()
        .method("GET")
        .uri("/score")
        .body(Body::empty())
        .expect("build GET /score");

    let resp = app.oneshot(req).await.expect("oneshot GET /score");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert_eq!(v["score"].as_f64(), Some(0.0));
}
