//! API request handlers

use crate::SharedState;
use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use chronos_analyzer::{AnalyzerError, ContributionYear, Summarizer};
use chronos_cache::Cache;
use chronos_collector::CollectorError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    pub fn err(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::err_with_status(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn err_with_status(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success: false,
                data: None,
                error: Some(message.into()),
            }),
        )
    }
}

/// Status code the API reports for a collector failure
fn collector_status(err: &CollectorError) -> StatusCode {
    match err {
        CollectorError::BadCredentials => StatusCode::UNAUTHORIZED,
        CollectorError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        CollectorError::NotFound(_) => StatusCode::NOT_FOUND,
        CollectorError::Analyzer(AnalyzerError::EmptyInput) => StatusCode::UNPROCESSABLE_ENTITY,
        CollectorError::Analyzer(AnalyzerError::MalformedRecord(_))
        | CollectorError::Http(_)
        | CollectorError::Api(_) => StatusCode::BAD_GATEWAY,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("token "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": state.cache.name(),
    }))
}

#[derive(Deserialize)]
pub struct UnwrappedQuery {
    year: Option<i32>,
}

/// Year-in-review report for the owner of the bearer token
pub async fn get_unwrapped(
    State(state): State<SharedState>,
    Query(query): Query<UnwrappedQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return ApiResponse::<()>::err_with_status(
            StatusCode::UNAUTHORIZED,
            "Missing GitHub access token",
        )
        .into_response();
    };

    let year = query.year.unwrap_or_else(|| Utc::now().year());

    match state
        .collector
        .generate_unwrapped(&state.cache, token, year)
        .await
    {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e) => {
            let status = collector_status(&e);
            if status.is_server_error() {
                error!(year = year, error = %e, "Failed to generate unwrapped report");
            } else {
                warn!(year = year, error = %e, "Unwrapped request rejected");
            }
            ApiResponse::<()>::err_with_status(status, e.to_string()).into_response()
        }
    }
}

/// Summarize a caller-supplied contribution year
pub async fn summarize(Json(year): Json<ContributionYear>) -> impl IntoResponse {
    match Summarizer::new().summarize(&year) {
        Ok(summary) => ApiResponse::ok(summary).into_response(),
        Err(e) => {
            ApiResponse::<()>::err_with_status(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct ClearCacheQuery {
    pattern: Option<String>,
}

/// Drop cached reports (admin endpoint)
pub async fn clear_cache(
    State(state): State<SharedState>,
    Query(query): Query<ClearCacheQuery>,
) -> impl IntoResponse {
    #[derive(Serialize)]
    struct ClearResult {
        removed: u64,
    }

    match state.cache.clear(query.pattern.as_deref()).await {
        Ok(removed) => {
            info!(removed = removed, pattern = ?query.pattern, "Cleared cache");
            ApiResponse::ok(ClearResult { removed }).into_response()
        }
        Err(e) => {
            error!("Cache clear failed: {}", e);
            ApiResponse::<()>::err(e.to_string()).into_response()
        }
    }
}
