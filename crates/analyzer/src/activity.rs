//! Most active time of day estimate
//!
//! Only day-level counts are available, so the estimate is coarse: the
//! weekday with the most contributions is mapped to a fixed hour. Swap in a
//! different [`ActivityTimeEstimator`] once commit timestamps are available.

use crate::{ActiveTime, DailyRecord};

/// Hour reported when a weekend bucket wins
pub const WEEKEND_HOUR: u8 = 14;
/// Hour reported when a working-day bucket wins
pub const WEEKDAY_HOUR: u8 = 10;

pub trait ActivityTimeEstimator {
    fn estimate(&self, days: &[DailyRecord]) -> ActiveTime;
}

/// Weekday bucket heuristic (low fidelity).
///
/// Sums counts per weekday tag, picks the largest bucket (lowest weekday
/// number on ties) and maps Saturday/Sunday to 14:00, other days to 10:00.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayBucketEstimator;

impl WeekdayBucketEstimator {
    fn hour_for(weekday: usize) -> u8 {
        match weekday {
            0 | 6 => WEEKEND_HOUR,
            _ => WEEKDAY_HOUR,
        }
    }
}

impl ActivityTimeEstimator for WeekdayBucketEstimator {
    fn estimate(&self, days: &[DailyRecord]) -> ActiveTime {
        let mut buckets: [Option<u64>; 7] = [None; 7];
        for day in days {
            if let Some(bucket) = buckets.get_mut(day.weekday as usize) {
                *bucket = Some(bucket.unwrap_or(0) + day.count as u64);
            }
        }

        let mut winner: Option<(usize, u64)> = None;
        for (weekday, total) in buckets.iter().enumerate() {
            if let Some(total) = *total {
                if winner.map_or(true, |(_, best)| total > best) {
                    winner = Some((weekday, total));
                }
            }
        }

        match winner {
            Some((weekday, count)) => ActiveTime {
                hour: Self::hour_for(weekday),
                count,
            },
            None => ActiveTime {
                hour: WEEKDAY_HOUR,
                count: 0,
            },
        }
    }
}
