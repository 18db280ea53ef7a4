//! Composes the individual statistics into one summary

use crate::{
    sorted_by_date, ActivityTimeEstimator, AnalyzerError, BusiestDayFinder, ContributionYear,
    IntensityPatternEstimator, LanguageRanker, LanguageShare, MonthlyActivityCollector,
    PatternEstimator, Result, StatsSummary, StreakFinder, WeekdayBucketEstimator,
};
use chrono::{NaiveDate, Utc};
use tracing::debug;

/// Stats aggregator
///
/// The time and pattern estimators are heuristics and can be replaced
/// without touching the rest of the summary.
#[derive(Debug, Clone)]
pub struct Summarizer<A = WeekdayBucketEstimator, P = IntensityPatternEstimator> {
    activity: A,
    pattern: P,
    reference_date: Option<NaiveDate>,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    pub fn new() -> Self {
        Self {
            activity: WeekdayBucketEstimator,
            pattern: IntensityPatternEstimator,
            reference_date: None,
        }
    }
}

impl<A, P> Summarizer<A, P>
where
    A: ActivityTimeEstimator,
    P: PatternEstimator,
{
    pub fn with_estimators(activity: A, pattern: P) -> Self {
        Self {
            activity,
            pattern,
            reference_date: None,
        }
    }

    /// Date reported for an empty streak. Defaults to today (UTC).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Summarize one year of contributions.
    ///
    /// Input is sorted by date here; it is otherwise trusted as well-formed.
    pub fn summarize(&self, year: &ContributionYear) -> Result<StatsSummary> {
        if year.days.is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }

        let days = sorted_by_date(&year.days);
        let reference_date = self
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let language_stats = LanguageRanker::rank(&year.repositories);
        let top_language = language_stats
            .first()
            .cloned()
            .unwrap_or_else(LanguageShare::unknown);

        let longest_streak = StreakFinder::find(&days, reference_date);
        let busiest_day = BusiestDayFinder::find(&days)?;
        let most_active_time = self.activity.estimate(&days);
        let pattern = self.pattern.estimate(&days);
        let monthly_activity = MonthlyActivityCollector::collect(&days);

        let summary = StatsSummary {
            total_contributions: year.counters.total(),
            top_language,
            longest_streak,
            most_active_time,
            commit_type_breakdown: year.counters,
            busiest_day,
            pattern,
            language_stats,
            monthly_activity,
        };

        debug!(
            days = days.len(),
            total = summary.total_contributions,
            streak = summary.longest_streak.days,
            busiest = summary.busiest_day.count,
            "Summarized contribution year"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, days_from};
    use crate::{
        ActiveTime, AggregateCounters, CodingPattern, DailyRecord, PatternLabel,
        RepositorySummary,
    };
    use pretty_assertions::assert_eq;

    fn counters() -> AggregateCounters {
        AggregateCounters {
            commits: 300,
            pull_requests: 40,
            issues: 12,
            reviews: 25,
        }
    }

    fn summarizer() -> Summarizer {
        Summarizer::new().with_reference_date(date("2030-01-01"))
    }

    #[test]
    fn test_all_zero_year() {
        let year = ContributionYear {
            days: days_from("2023-01-01", &[0; 365]),
            counters: AggregateCounters::default(),
            repositories: Vec::new(),
        };

        let summary = summarizer().summarize(&year).unwrap();
        assert_eq!(summary.total_contributions, 0);
        assert_eq!(summary.longest_streak.days, 0);
        assert_eq!(summary.longest_streak.start_date, date("2030-01-01"));
        assert_eq!(summary.busiest_day.date, date("2023-01-01"));
        assert_eq!(summary.busiest_day.count, 0);
        assert_eq!(summary.pattern.average_hours, 2.0);
        assert_eq!(summary.pattern.label, PatternLabel::FocusedSprints);
        assert_eq!(summary.top_language, LanguageShare::unknown());
        assert!(summary.language_stats.is_empty());
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_analysis() {
        let mut days = days_from("2024-01-01", &[1, 1, 1, 0, 1, 1, 1]);
        days.reverse();
        let year = ContributionYear {
            days,
            counters: counters(),
            repositories: vec![
                RepositorySummary::new("api", Some("Go")),
                RepositorySummary::new("cli", Some("Go")),
                RepositorySummary::new("core", Some("Rust")),
                RepositorySummary::new("notes", None),
            ],
        };

        let summary = summarizer().summarize(&year).unwrap();
        assert_eq!(summary.total_contributions, 377);
        assert_eq!(summary.commit_type_breakdown, counters());
        assert_eq!(summary.longest_streak.days, 3);
        assert_eq!(summary.longest_streak.start_date, date("2024-01-01"));
        assert_eq!(summary.longest_streak.end_date, date("2024-01-03"));
        assert_eq!(summary.busiest_day.date, date("2024-01-01"));
        assert_eq!(summary.top_language.name, "Go");
        assert_eq!(summary.top_language.percentage, 67);
        assert_eq!(summary.language_stats.len(), 2);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let counts: Vec<u32> = (0..366).map(|i| (i * 7 % 11) as u32).collect();
        let year = ContributionYear {
            days: days_from("2024-01-01", &counts),
            counters: counters(),
            repositories: vec![RepositorySummary::new("core", Some("Rust"))],
        };

        let first = serde_json::to_vec(&summarizer().summarize(&year).unwrap()).unwrap();
        let second = serde_json::to_vec(&summarizer().summarize(&year).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_days_is_an_error() {
        let year = ContributionYear::default();
        assert_eq!(summarizer().summarize(&year), Err(AnalyzerError::EmptyInput));
    }

    struct FixedTime;

    impl ActivityTimeEstimator for FixedTime {
        fn estimate(&self, _days: &[DailyRecord]) -> ActiveTime {
            ActiveTime { hour: 23, count: 1 }
        }
    }

    #[test]
    fn test_custom_estimators_replace_heuristics() {
        let year = ContributionYear {
            days: days_from("2024-01-01", &[5, 5]),
            ..Default::default()
        };

        let summary = Summarizer::with_estimators(FixedTime, IntensityPatternEstimator)
            .with_reference_date(date("2030-01-01"))
            .summarize(&year)
            .unwrap();
        assert_eq!(summary.most_active_time, ActiveTime { hour: 23, count: 1 });
        assert_eq!(
            summary.pattern,
            CodingPattern {
                average_hours: 2.5,
                label: PatternLabel::FocusedSprints
            }
        );
    }

    #[test]
    fn test_serializes_for_presentation() {
        let year = ContributionYear {
            days: days_from("2024-01-01", &[2, 0]),
            counters: counters(),
            repositories: Vec::new(),
        };
        let json = serde_json::to_value(summarizer().summarize(&year).unwrap()).unwrap();
        assert_eq!(json["totalContributions"], 377);
        assert_eq!(json["longestStreak"]["startDate"], "2024-01-01");
        assert_eq!(json["commitTypeBreakdown"]["pullRequests"], 40);
        assert_eq!(json["pattern"]["label"], "Focused sprints");
        assert_eq!(json["topLanguage"]["name"], "Unknown");
        assert_eq!(json["monthlyActivity"][0]["month"], "Jan");
    }
}
