//! Chronos Data Collector
//!
//! Fetches a user's contribution year from the GitHub GraphQL API, turns the
//! response into validated records and produces cached year-in-review
//! reports.

pub mod github;
pub mod ingest;
pub mod unwrapped;

pub use unwrapped::{cache_key, UnwrappedReport, UserProfile};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Invalid GitHub token. Please try signing in again.")]
    BadCredentials,

    #[error("Unable to access GitHub data: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(transparent)]
    Analyzer(#[from] chronos_analyzer::AnalyzerError),
}

pub type Result<T> = std::result::Result<T, CollectorError>;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Configuration for collectors
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub github_token: Option<String>,
    pub user_agent: String,
    pub graphql_url: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            user_agent: concat!("Chronos/", env!("CARGO_PKG_VERSION")).to_string(),
            graphql_url: std::env::var("CHRONOS_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string()),
        }
    }
}
