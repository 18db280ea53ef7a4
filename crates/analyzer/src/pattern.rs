//! Coding pattern estimate from per-day intensity

use crate::{CodingPattern, DailyRecord, PatternLabel};

const HOURS_PER_CONTRIBUTION: f64 = 0.5;
const MIN_HOURS: f64 = 2.0;
const MAX_HOURS: f64 = 12.0;

pub trait PatternEstimator {
    fn estimate(&self, days: &[DailyRecord]) -> CodingPattern;
}

/// Maps the mean count of active days to an estimated session length.
///
/// A heuristic: half an hour per contribution, clamped to 2..=12 hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntensityPatternEstimator;

impl IntensityPatternEstimator {
    fn label_for(hours: f64) -> PatternLabel {
        if hours > 8.0 {
            PatternLabel::MarathonCoder
        } else if hours > 4.0 {
            PatternLabel::SteadyContributor
        } else {
            PatternLabel::FocusedSprints
        }
    }
}

impl PatternEstimator for IntensityPatternEstimator {
    fn estimate(&self, days: &[DailyRecord]) -> CodingPattern {
        let (active_days, total) = days
            .iter()
            .filter(|d| d.is_active())
            .fold((0u64, 0u64), |(n, sum), d| (n + 1, sum + d.count as u64));

        let mean = if active_days > 0 {
            total as f64 / active_days as f64
        } else {
            0.0
        };

        let hours = (mean * HOURS_PER_CONTRIBUTION).clamp(MIN_HOURS, MAX_HOURS);

        CodingPattern {
            average_hours: (hours * 10.0).round() / 10.0,
            label: Self::label_for(hours),
        }
    }
}
