//! `VerityServer` — Axum router and request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::error;

use verity_collectors::TrendingFeed;
use verity_core::{Mood, Verdict};
use verity_pipeline::{AnalyzeService, FeedVerdict};

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The vault-aware analysis service.
    pub analyze: Arc<AnalyzeService>,
    /// Trending feed aggregator.
    pub feed: Arc<TrendingFeed>,
    /// Items auto-verified per `/feed` request.
    pub max_feed_items: usize,
    /// When the server started.
    pub start_time: Instant,
}

/// The main Verity server.
pub struct VerityServer {
    config: ServerConfig,
    state: AppState,
}

impl VerityServer {
    /// Create a new server.
    pub fn new(
        config: ServerConfig,
        analyze: Arc<AnalyzeService>,
        feed: Arc<TrendingFeed>,
    ) -> Self {
        let state = AppState {
            analyze,
            feed,
            max_feed_items: config.max_feed_items,
            start_time: Instant::now(),
        };
        Self { config, state }
    }

    /// Build the Axum router with all routes.
    ///
    /// CORS is wide open: the reference deployment serves a browser frontend
    /// from a different origin.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/analyze", post(analyze_handler))
            .route("/feed", get(feed_handler))
            .route("/health", get(health_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// `POST /analyze` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalyzeRequest {
    claim: String,
    image_url: Option<String>,
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self {
            claim: String::new(),
            image_url: None,
        }
    }
}

/// `POST /analyze` response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    verdict: Verdict,
    explanation: String,
    mood: Mood,
    cached: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// `POST /analyze`
async fn analyze_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let claim = req.claim.trim();
    if claim.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "claim must not be empty");
    }

    match state.analyze.analyze(claim, req.image_url.as_deref()).await {
        Ok(outcome) => Json(AnalyzeResponse {
            verdict: outcome.record.verdict,
            explanation: outcome.record.explanation,
            mood: outcome.record.mood,
            cached: outcome.cached,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "analysis failed");
            error_response(StatusCode::BAD_GATEWAY, "analysis failed")
        }
    }
}

/// `GET /feed` — scan trending sources and auto-verify the top items.
async fn feed_handler(State(state): State<AppState>) -> Json<Vec<FeedVerdict>> {
    let mut items = state.feed.collect().await;
    items.truncate(state.max_feed_items);
    Json(state.analyze.verify_trending(&items).await)
}

/// `GET /health`
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use parking_lot::Mutex;
    use tower::ServiceExt;

    use verity_collectors::errors::Result as CollectorResult;
    use verity_collectors::{FeedSource, SearchProvider, SearchResult};
    use verity_llm::provider::ProviderResult;
    use verity_llm::{ChatProvider, ProviderError};
    use verity_pipeline::FactCheckAgent;

    struct EmptySearch;

    #[async_trait]
    impl SearchProvider for EmptySearch {
        async fn search(&self, _query: &str) -> CollectorResult<Vec<SearchResult>> {
            Ok(vec![])
        }
    }

    struct ScriptedLlm {
        response: Option<String>,
        calls: Mutex<usize>,
    }

    impl ScriptedLlm {
        fn new(response: &str) -> Self {
            Self {
                response: Some(response.into()),
                calls: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedLlm {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> ProviderResult<String> {
            *self.calls.lock() += 1;
            self.response
                .clone()
                .ok_or_else(|| ProviderError::Other {
                    message: "llm down".into(),
                })
        }
    }

    struct StaticFeedSource {
        items: Vec<String>,
    }

    #[async_trait]
    impl FeedSource for StaticFeedSource {
        fn name(&self) -> &str {
            "static"
        }
        async fn collect(&self, _query: &str) -> CollectorResult<Vec<String>> {
            Ok(self.items.clone())
        }
    }

    const FALSE_VERDICT: &str =
        r#"{"verdict":"False","explanation":"Contradicted by sources.","mood":"spikey"}"#;

    fn make_server_with(llm: ScriptedLlm, feed_items: &[&str]) -> VerityServer {
        let agent = FactCheckAgent::new(Arc::new(EmptySearch), Arc::new(llm));
        let analyze = Arc::new(AnalyzeService::new(agent, None));
        let feed = Arc::new(TrendingFeed::new(
            vec![Box::new(StaticFeedSource {
                items: feed_items.iter().map(|s| (*s).to_string()).collect(),
            })],
            "trending".into(),
        ));
        VerityServer::new(ServerConfig::default(), analyze, feed)
    }

    fn make_server() -> VerityServer {
        make_server_with(ScriptedLlm::new(FALSE_VERDICT), &["headline"])
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn analyze_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn analyze_returns_verdict_fields() {
        let app = make_server().router();
        let resp = app
            .oneshot(analyze_request(
                serde_json::json!({"claim": "Is the earth flat?"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let parsed = body_json(resp).await;
        assert_eq!(parsed["verdict"], "False");
        assert_eq!(parsed["mood"], "spikey");
        assert_eq!(parsed["cached"], false);
        assert!(parsed["explanation"].as_str().unwrap().contains("sources"));
    }

    #[tokio::test]
    async fn analyze_accepts_image_url() {
        let app = make_server().router();
        let resp = app
            .oneshot(analyze_request(serde_json::json!({
                "claim": "this photo shows a ufo",
                "imageUrl": "https://img.example/ufo.jpg",
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_empty_claim_is_400() {
        let app = make_server().router();
        let resp = app
            .oneshot(analyze_request(serde_json::json!({"claim": "   "})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let parsed = body_json(resp).await;
        assert!(parsed["error"].as_str().unwrap().contains("claim"));
    }

    #[tokio::test]
    async fn analyze_missing_claim_is_400() {
        let app = make_server().router();
        let resp = app
            .oneshot(analyze_request(serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_llm_failure_is_502() {
        let app = make_server_with(ScriptedLlm::failing(), &[]).router();
        let resp = app
            .oneshot(analyze_request(serde_json::json!({"claim": "anything"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn feed_verifies_top_items() {
        let app = make_server_with(
            ScriptedLlm::new(FALSE_VERDICT),
            &["headline one", "headline two", "headline three"],
        )
        .router();

        let resp = app
            .oneshot(Request::builder().uri("/feed").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let parsed = body_json(resp).await;
        let items = parsed.as_array().unwrap();
        // Capped at max_feed_items (default 2).
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["claim"], "headline one");
        assert_eq!(items[0]["verdict"], "False");
        assert_eq!(items[0]["mood"], "spikey");
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = make_server().router();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let parsed = body_json(resp).await;
        assert_eq!(parsed["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = make_server().router();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_allowed() {
        let app = make_server().router();
        let resp = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/analyze")
                    .header("origin", "https://frontend.example")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(resp
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[test]
    fn server_exposes_config() {
        let server = make_server();
        assert_eq!(server.config().port, 5000);
    }
}
