//! Chronos Stats Aggregator
//!
//! Derives year-in-review statistics from a calendar year of daily
//! contribution records. Everything in this crate is pure: no I/O, no shared
//! state, and the same input always produces the same summary.

mod activity;
mod busiest;
mod language;
mod models;
mod monthly;
mod pattern;
mod streak;
mod summarizer;

pub use activity::{ActivityTimeEstimator, WeekdayBucketEstimator};
pub use busiest::BusiestDayFinder;
pub use language::{language_color, LanguageRanker};
pub use models::*;
pub use monthly::MonthlyActivityCollector;
pub use pattern::{IntensityPatternEstimator, PatternEstimator};
pub use streak::StreakFinder;
pub use summarizer::Summarizer;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("No contribution days to analyze")]
    EmptyInput,

    #[error("Malformed contribution record: {0}")]
    MalformedRecord(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
pub(crate) mod testing {
    use crate::DailyRecord;
    use chrono::{Datelike, NaiveDate};

    /// Consecutive days starting at `start`, one per count.
    pub fn days_from(start: &str, counts: &[u32]) -> Vec<DailyRecord> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(offset, &count)| {
                let date = start + chrono::Days::new(offset as u64);
                DailyRecord::new(date, count, date.weekday().num_days_from_sunday() as u8)
            })
            .collect()
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }
}
