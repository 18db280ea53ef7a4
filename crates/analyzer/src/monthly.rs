//! Per-month contribution totals

use crate::{DailyRecord, MonthlyActivity};

pub struct MonthlyActivityCollector;

impl MonthlyActivityCollector {
    /// Total contributions per month, in order of first appearance.
    ///
    /// With date-sorted input this is calendar order. Months without any
    /// record are left out.
    pub fn collect(days: &[DailyRecord]) -> Vec<MonthlyActivity> {
        let mut months: Vec<MonthlyActivity> = Vec::new();

        for day in days {
            let month = day.date.format("%b").to_string();
            match months.iter_mut().find(|m| m.month == month) {
                Some(entry) => entry.contributions += day.count as u64,
                None => months.push(MonthlyActivity {
                    month,
                    contributions: day.count as u64,
                }),
            }
        }

        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::days_from;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_by_month_in_calendar_order() {
        // Jan 30, Jan 31, Feb 1, Feb 2
        let days = days_from("2024-01-30", &[2, 3, 0, 7]);
        let months = MonthlyActivityCollector::collect(&days);
        assert_eq!(
            months,
            vec![
                MonthlyActivity { month: "Jan".to_string(), contributions: 5 },
                MonthlyActivity { month: "Feb".to_string(), contributions: 7 },
            ]
        );
    }

    #[test]
    fn test_full_year_has_twelve_months() {
        let days = days_from("2024-01-01", &[1; 366]);
        let months = MonthlyActivityCollector::collect(&days);
        assert_eq!(months.len(), 12);
        assert_eq!(months[1].month, "Feb");
        assert_eq!(months[1].contributions, 29);
        assert_eq!(months[11].month, "Dec");
    }
}
