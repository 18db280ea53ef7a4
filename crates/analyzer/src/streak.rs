//! Longest run of consecutive active days

use crate::{DailyRecord, Streak};
use chrono::NaiveDate;

pub struct StreakFinder;

impl StreakFinder {
    /// Find the longest streak in `days`, which must be sorted by date.
    ///
    /// Any zero-count day ends the running streak. When several runs share
    /// the maximum length the earliest one is reported. If no day is active,
    /// both dates are `fallback_date`.
    pub fn find(days: &[DailyRecord], fallback_date: NaiveDate) -> Streak {
        let mut longest = Streak {
            days: 0,
            start_date: fallback_date,
            end_date: fallback_date,
        };
        let mut current: u32 = 0;
        let mut current_start = fallback_date;

        for day in days {
            if !day.is_active() {
                current = 0;
                continue;
            }

            if current == 0 {
                current_start = day.date;
            }
            current += 1;

            if current > longest.days {
                longest = Streak {
                    days: current,
                    start_date: current_start,
                    end_date: day.date,
                };
            }
        }

        longest
    }
}
