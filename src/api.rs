use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::fetch::{HttpFetcher, PageFetcher};
use crate::scorer::{self, ScoreResult};
use crate::weights::ScoringWeights;

#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<dyn PageFetcher>,
    weights: Arc<RwLock<ScoringWeights>>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>, weights: ScoringWeights) -> Self {
        Self {
            fetcher,
            weights: Arc::new(RwLock::new(weights)),
        }
    }

    /// Production state: HTTP fetcher plus the weight table from disk/env.
    pub fn from_env() -> Self {
        Self::new(
            Arc::new(HttpFetcher::from_env()),
            ScoringWeights::load_default(),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/score", get(score_query).post(score_body))
        .route("/admin/reload-weights", get(admin_reload_weights))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct ScoreReq {
    url: String,
}

async fn score_query(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<ScoreResult> {
    let url = q.get("url").cloned().unwrap_or_default();
    Json(score_one(&state, &url).await)
}

async fn score_body(
    State(state): State<AppState>,
    Json(body): Json<ScoreReq>,
) -> Json<ScoreResult> {
    Json(score_one(&state, &body.url).await)
}

async fn score_one(state: &AppState, url: &str) -> ScoreResult {
    let weights = state.weights.read().expect("rwlock poisoned").clone();
    scorer::score_with(state.fetcher.as_ref(), &weights, url).await
}

async fn admin_reload_weights(State(state): State<AppState>) -> String {
    let fresh = ScoringWeights::load_default();
    match state.weights.write() {
        Ok(mut w) => {
            *w = fresh;
            "reloaded".to_string()
        }
        Err(_) => "failed: lock poisoned".to_string(),
    }
}
