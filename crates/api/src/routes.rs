//! API route definitions

use crate::handlers;
use crate::SharedState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};

/// Create the main application router
pub fn create_router(state: SharedState, static_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/unwrapped", get(handlers::get_unwrapped))
        .route("/summarize", post(handlers::summarize))
        .route("/cache", delete(handlers::clear_cache))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(CompressionLayer::new());

    // Serve the presentation layer if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chronos_cache::{Cache, CacheBackend, MemoryCache, DEFAULT_TTL};
    use chronos_collector::{github::GithubCollector, CollectorConfig};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        let collector = GithubCollector::new(CollectorConfig {
            github_token: None,
            user_agent: "Chronos/test".to_string(),
            graphql_url: "http://127.0.0.1:9/graphql".to_string(),
        })
        .unwrap();
        Arc::new(AppState::new(CacheBackend::Memory(MemoryCache::new()), collector))
    }

    async fn send(state: SharedState, request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(state, None).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn summarize_request(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/summarize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"], "memory");
    }

    #[tokio::test]
    async fn test_summarize() {
        let request = summarize_request(json!({
            "days": [
                {"date": "2024-01-02", "count": 5, "weekday": 2},
                {"date": "2024-01-01", "count": 3, "weekday": 1},
                {"date": "2024-01-03", "count": 0, "weekday": 3}
            ],
            "counters": {"commits": 6, "pullRequests": 1, "issues": 1, "reviews": 0},
            "repositories": [
                {"name": "a", "primaryLanguageName": "Rust"},
                {"name": "b", "primaryLanguageName": null}
            ]
        }));

        let (status, body) = send(test_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let stats = &body["data"];
        assert_eq!(stats["totalContributions"], 8);
        assert_eq!(stats["longestStreak"]["days"], 2);
        assert_eq!(stats["longestStreak"]["startDate"], "2024-01-01");
        assert_eq!(stats["busiestDay"], json!({"date": "2024-01-02", "count": 5}));
        assert_eq!(stats["topLanguage"]["name"], "Rust");
        assert_eq!(stats["topLanguage"]["percentage"], 100);
        assert_eq!(stats["mostActiveTime"], json!({"hour": 10, "count": 5}));
    }

    #[tokio::test]
    async fn test_summarize_empty_year_is_unprocessable() {
        let (status, body) = send(test_state(), summarize_request(json!({"days": []}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_unwrapped_requires_token() {
        let request = Request::builder().uri("/api/v1/unwrapped").body(Body::empty()).unwrap();
        let (status, body) = send(test_state(), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing GitHub access token");
    }

    #[tokio::test]
    async fn test_unwrapped_upstream_failure_is_bad_gateway() {
        let request = Request::builder()
            .uri("/api/v1/unwrapped?year=2024")
            .header(header::AUTHORIZATION, "Bearer gho_unreachable")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_state(), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let state = test_state();
        state.cache.set("github-unwrapped-aaaa-2024", "{}", DEFAULT_TTL).await.unwrap();
        state.cache.set("github-unwrapped-bbbb-2023", "{}", DEFAULT_TTL).await.unwrap();

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/v1/cache?pattern=2024")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(state.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["removed"], 1);
        assert!(state.cache.get("github-unwrapped-bbbb-2023").await.unwrap().is_some());
    }
}
