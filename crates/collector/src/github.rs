//! GitHub GraphQL collector

use crate::ingest::{self, Viewer};
use crate::unwrapped::UserProfile;
use crate::{CollectorConfig, CollectorError, Result};
use chrono::Utc;
use chronos_analyzer::ContributionYear;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONTRIBUTIONS_QUERY: &str = r#"
  query ChronosYear($from: DateTime!, $to: DateTime!) {
    viewer {
      login
      name
      avatarUrl
      createdAt
      contributionsCollection(from: $from, to: $to) {
        totalCommitContributions
        totalIssueContributions
        totalPullRequestContributions
        totalPullRequestReviewContributions
        contributionCalendar {
          totalContributions
          weeks {
            contributionDays {
              contributionCount
              date
              weekday
            }
          }
        }
      }
      repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: PUSHED_AT, direction: DESC}) {
        nodes {
          name
          primaryLanguage {
            name
            color
          }
        }
      }
    }
  }
"#;

/// GitHub API client
#[derive(Clone)]
pub struct GithubCollector {
    client: Client,
    config: CollectorConfig,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ViewerData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One user's contribution year, validated and zero-filled
#[derive(Debug, Clone)]
pub struct FetchedYear {
    pub user: UserProfile,
    pub contributions: ContributionYear,
}

impl GithubCollector {
    /// Create a new GitHub collector
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| CollectorError::Api(format!("Invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Fetch one calendar year of contributions for the token's owner
    pub async fn fetch_year(&self, token: &str, year: i32) -> Result<FetchedYear> {
        info!(year = year, "Fetching GitHub contributions");

        let body = json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": {
                "from": format!("{}-01-01T00:00:00Z", year),
                "to": format!("{}-12-31T23:59:59Z", year),
            }
        });

        let response = self
            .client
            .post(&self.config.graphql_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        self.check_rate_limit(&response)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(CollectorError::BadCredentials),
            StatusCode::NOT_FOUND => {
                return Err(CollectorError::NotFound("GraphQL endpoint".to_string()))
            }
            status if !status.is_success() => {
                return Err(CollectorError::Api(format!("GitHub API error: {}", status)))
            }
            _ => {}
        }

        let payload: GraphqlResponse = response.json().await?;
        if !payload.errors.is_empty() {
            return Err(classify_errors(&payload.errors));
        }

        let viewer = payload
            .data
            .ok_or_else(|| CollectorError::Api("GitHub returned no data".to_string()))?
            .viewer;

        let (user, contributions) = ingest::ingest_viewer(viewer, year)?;
        debug!(
            login = %user.login,
            days = contributions.days.len(),
            repositories = contributions.repositories.len(),
            "Ingested contribution year"
        );

        Ok(FetchedYear { user, contributions })
    }

    fn check_rate_limit(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
            return Ok(());
        }

        let exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|remaining| remaining == "0");

        if exhausted || status == StatusCode::TOO_MANY_REQUESTS {
            let reset = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let wait = match reset {
                Some(reset) => reset.saturating_sub(Utc::now().timestamp() as u64),
                None => 60,
            };

            warn!(wait_secs = wait, "GitHub rate limit reached");
            return Err(CollectorError::RateLimited(wait));
        }

        Ok(())
    }
}

/// Map GraphQL-level errors to the collector's error kinds
pub fn classify_errors(errors: &[GraphqlError]) -> CollectorError {
    for error in errors {
        match error.kind.as_deref() {
            Some("RATE_LIMITED") => return CollectorError::RateLimited(60),
            Some("NOT_FOUND") => return CollectorError::NotFound(error.message.clone()),
            _ => {}
        }

        let message = error.message.to_lowercase();
        if message.contains("bad credentials") {
            return CollectorError::BadCredentials;
        }
        if message.contains("rate limit") {
            return CollectorError::RateLimited(60);
        }
    }

    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    CollectorError::Api(messages.join("; "))
}
