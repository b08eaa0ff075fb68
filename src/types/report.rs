//! Derived statistics produced by the aggregation engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summed hours for a single calendar day across all categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Summed hours for one category, with its share of the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub hours: f64,
    pub percentage: f64,
}

/// Summed hours for one weekday across all observed weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekdayTotal {
    pub weekday: String,
    pub hours: f64,
}

/// Complete set of derived statistics for a record set.
///
/// Produced by [`crate::services::Aggregator::summarize`]; contains no
/// references back to storage and is safe to serialize as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SummaryReport {
    pub total_hours: f64,
    pub entry_count: u64,
    pub distinct_days: u64,
    pub average_per_day: f64,
    pub threshold_hours: f64,
    /// Per-day totals, date ascending
    pub daily: Vec<DailyTotal>,
    /// Per-category totals, hours descending then name ascending
    pub categories: Vec<CategoryTotal>,
    /// Days whose total strictly exceeds the threshold, date ascending
    pub alert_days: Vec<DailyTotal>,
    pub highest_day: Option<DailyTotal>,
    pub lowest_day: Option<DailyTotal>,
    /// Monday..Sunday buckets; empty when there are no records
    pub weekday_pattern: Vec<WeekdayTotal>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_zeroed() {
        let report = SummaryReport::default();
        assert!((report.total_hours - 0.0).abs() < f64::EPSILON);
        assert_eq!(report.entry_count, 0);
        assert_eq!(report.distinct_days, 0);
        assert!(report.daily.is_empty());
        assert!(report.categories.is_empty());
        assert!(report.alert_days.is_empty());
        assert!(report.highest_day.is_none());
        assert!(report.lowest_day.is_none());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = SummaryReport {
            total_hours: 9.0,
            entry_count: 3,
            distinct_days: 2,
            average_per_day: 4.5,
            threshold_hours: 6.0,
            daily: vec![DailyTotal {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                hours: 7.0,
            }],
            ..Default::default()
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: SummaryReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
