//! Ingestion boundary
//!
//! Converts the GraphQL `viewer` payload into the aggregator's typed
//! records. Every day is validated, duplicates are dropped and missing dates
//! are zero-filled so the aggregator always sees a full calendar year.

use crate::unwrapped::UserProfile;
use crate::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chronos_analyzer::{
    AggregateCounters, AnalyzerError, ContributionYear, DailyRecord, RepositorySummary,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub contributions_collection: ContributionsCollection,
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: i64,
    pub total_issue_contributions: i64,
    pub total_pull_request_contributions: i64,
    pub total_pull_request_review_contributions: i64,
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: i64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub contribution_count: i64,
    pub date: String,
    pub weekday: i64,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryConnection {
    #[serde(default)]
    pub nodes: Vec<RawRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name: String,
    pub primary_language: Option<RawLanguage>,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguage {
    pub name: String,
}

/// Split a `viewer` payload into the user profile and the typed year
pub fn ingest_viewer(viewer: Viewer, year: i32) -> Result<(UserProfile, ContributionYear)> {
    let collection = viewer.contributions_collection;

    let counters = AggregateCounters {
        commits: counter("totalCommitContributions", collection.total_commit_contributions)?,
        pull_requests: counter(
            "totalPullRequestContributions",
            collection.total_pull_request_contributions,
        )?,
        issues: counter("totalIssueContributions", collection.total_issue_contributions)?,
        reviews: counter(
            "totalPullRequestReviewContributions",
            collection.total_pull_request_review_contributions,
        )?,
    };

    let days = collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| DailyRecord::from_raw(&day.date, day.contribution_count, day.weekday))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let repositories = viewer
        .repositories
        .nodes
        .into_iter()
        .map(|repo| RepositorySummary {
            name: repo.name,
            primary_language_name: repo.primary_language.map(|lang| lang.name),
        })
        .collect();

    let user = UserProfile {
        name: viewer.name.filter(|n| !n.is_empty()).unwrap_or_else(|| viewer.login.clone()),
        login: viewer.login,
        avatar_url: viewer.avatar_url,
        created_at: viewer.created_at,
    };

    let contributions = ContributionYear {
        days: zero_fill_year(days, year)?,
        counters,
        repositories,
    };

    Ok((user, contributions))
}

fn counter(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        AnalyzerError::MalformedRecord(format!("{} is negative: {}", field, value)).into()
    })
}

/// One record per day of `year`, ascending.
///
/// The first record seen for a date wins, records outside the year are
/// dropped, and missing dates get a zero count.
pub fn zero_fill_year(days: Vec<DailyRecord>, year: i32) -> Result<Vec<DailyRecord>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AnalyzerError::MalformedRecord(format!("year {} out of range", year)))?;

    let mut by_date: BTreeMap<NaiveDate, DailyRecord> = BTreeMap::new();
    for day in days {
        if day.date.year() != year {
            debug!(date = %day.date, year = year, "Skipping day outside requested year");
            continue;
        }
        if by_date.contains_key(&day.date) {
            warn!(date = %day.date, "Duplicate contribution day, keeping the first");
            continue;
        }
        by_date.insert(day.date, day);
    }

    let filled = first
        .iter_days()
        .take_while(|date| date.year() == year)
        .map(|date| {
            by_date.get(&date).copied().unwrap_or_else(|| {
                DailyRecord::new(date, 0, date.weekday().num_days_from_sunday() as u8)
            })
        })
        .collect();

    Ok(filled)
}
