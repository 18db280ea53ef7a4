//! Cached year-in-review reports

use crate::github::GithubCollector;
use crate::Result;
use chrono::{DateTime, Utc};
use chronos_analyzer::{StatsSummary, Summarizer};
use chronos_cache::{Cache, DEFAULT_TTL};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    /// Display name, falling back to the login
    pub name: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// What the presentation layer receives for one user and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwrappedReport {
    pub year: i32,
    pub user: UserProfile,
    pub stats: StatsSummary,
}

/// Cache key for a token's report. Only the token's last 8 characters are
/// used so the key does not carry the credential.
pub fn cache_key(token: &str, year: i32) -> String {
    let suffix = token
        .char_indices()
        .rev()
        .nth(7)
        .map(|(idx, _)| &token[idx..])
        .unwrap_or(token);
    format!("github-unwrapped-{}-{}", suffix, year)
}

impl GithubCollector {
    /// Produce the report for `token`'s owner, reusing a fresh cached copy.
    ///
    /// Cache failures are logged and never fail the request.
    pub async fn generate_unwrapped<C: Cache>(
        &self,
        cache: &C,
        token: &str,
        year: i32,
    ) -> Result<UnwrappedReport> {
        let key = cache_key(token, year);

        match cache.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<UnwrappedReport>(&cached) {
                Ok(report) => {
                    debug!(key = %key, "Serving cached report");
                    return Ok(report);
                }
                Err(e) => warn!(key = %key, error = %e, "Discarding undecodable cached report"),
            },
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Cache read error"),
        }

        let fetched = self.fetch_year(token, year).await?;
        let stats = Summarizer::new().summarize(&fetched.contributions)?;

        let report = UnwrappedReport {
            year,
            user: fetched.user,
            stats,
        };

        match serde_json::to_string(&report) {
            Ok(payload) => {
                if let Err(e) = cache.set(&key, &payload, DEFAULT_TTL).await {
                    warn!(key = %key, error = %e, "Cache write error");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to encode report for cache"),
        }

        info!(
            login = %report.user.login,
            year = year,
            total = report.stats.total_contributions,
            "Generated unwrapped report"
        );
        Ok(report)
    }
}
