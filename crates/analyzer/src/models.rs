//! Input and output records for the aggregator

use crate::{AnalyzerError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// One calendar day's activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub count: u32,
    /// 0 = Sunday .. 6 = Saturday, as reported upstream
    pub weekday: u8,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, count: u32, weekday: u8) -> Self {
        Self { date, count, weekday }
    }

    /// Build a record from untyped upstream values.
    ///
    /// Rejects unparsable dates, negative counts and weekdays outside 0-6.
    /// A weekday that disagrees with the date is kept as supplied; the
    /// weekday bucket estimate uses the upstream tag.
    pub fn from_raw(date: &str, count: i64, weekday: i64) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| AnalyzerError::MalformedRecord(format!("date {:?}: {}", date, e)))?;

        let count = u32::try_from(count).map_err(|_| {
            AnalyzerError::MalformedRecord(format!("count {} on {} is out of range", count, date))
        })?;

        let weekday = u8::try_from(weekday)
            .ok()
            .filter(|w| *w <= 6)
            .ok_or_else(|| {
                AnalyzerError::MalformedRecord(format!("weekday {} on {} is not 0-6", weekday, date))
            })?;

        let actual = parsed.weekday().num_days_from_sunday() as u8;
        if actual != weekday {
            warn!(date = date, supplied = weekday, actual = actual, "Weekday tag disagrees with date");
        }

        Ok(Self::new(parsed, count, weekday))
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Sort a copy of the records ascending by date.
pub fn sorted_by_date(days: &[DailyRecord]) -> Vec<DailyRecord> {
    let mut sorted = days.to_vec();
    sorted.sort_by_key(|d| d.date);
    sorted
}

/// Repository metadata relevant to language ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    #[serde(default)]
    pub name: String,
    pub primary_language_name: Option<String>,
}

impl RepositorySummary {
    pub fn new(name: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            name: name.into(),
            primary_language_name: language.map(str::to_string),
        }
    }
}

/// Pass-through yearly totals, also reported as the commit type breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounters {
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub reviews: u64,
}

impl AggregateCounters {
    pub fn total(&self) -> u64 {
        self.commits + self.pull_requests + self.issues + self.reviews
    }
}

/// Everything the aggregator needs for one user and one year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionYear {
    pub days: Vec<DailyRecord>,
    #[serde(default)]
    pub counters: AggregateCounters,
    #[serde(default)]
    pub repositories: Vec<RepositorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: u32,
    pub color: String,
}

impl LanguageShare {
    /// Stand-in used when no repository reports a language
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            percentage: 0,
            color: crate::language_color("Unknown").to_string(),
        }
    }
}

/// Longest run of active days.
///
/// When `days` is 0 the dates are a placeholder (the processing date) and
/// carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Estimated most active hour and the contribution total backing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTime {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestDay {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternLabel {
    #[serde(rename = "Marathon coder")]
    MarathonCoder,
    #[serde(rename = "Steady contributor")]
    SteadyContributor,
    #[serde(rename = "Focused sprints")]
    FocusedSprints,
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternLabel::MarathonCoder => "Marathon coder",
            PatternLabel::SteadyContributor => "Steady contributor",
            PatternLabel::FocusedSprints => "Focused sprints",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingPattern {
    /// Estimated session length, one decimal place
    pub average_hours: f64,
    pub label: PatternLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// Three-letter month abbreviation ("Jan", "Feb", ...)
    pub month: String,
    pub contributions: u64,
}

/// Year-in-review statistics handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_contributions: u64,
    pub top_language: LanguageShare,
    pub longest_streak: Streak,
    pub most_active_time: ActiveTime,
    pub commit_type_breakdown: AggregateCounters,
    pub busiest_day: BusiestDay,
    pub pattern: CodingPattern,
    pub language_stats: Vec<LanguageShare>,
    pub monthly_activity: Vec<MonthlyActivity>,
}
