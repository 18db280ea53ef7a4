//! Busiest single day

use crate::{AnalyzerError, BusiestDay, DailyRecord, Result};

pub struct BusiestDayFinder;

impl BusiestDayFinder {
    /// Day with the highest count; the first one wins on ties.
    ///
    /// Callers are expected to pass a zero-filled year, so an empty slice is
    /// an error rather than a default.
    pub fn find(days: &[DailyRecord]) -> Result<BusiestDay> {
        let (first, rest) = days.split_first().ok_or(AnalyzerError::EmptyInput)?;

        let busiest = rest
            .iter()
            .fold(first, |max, day| if day.count > max.count { day } else { max });

        Ok(BusiestDay {
            date: busiest.date,
            count: busiest.count,
        })
    }
}
