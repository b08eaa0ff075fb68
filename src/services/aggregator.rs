//! Aggregator service for computing screen-time statistics

use crate::types::{CategoryTotal, DailyTotal, SummaryReport, UsageEntry, WeekdayTotal};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Display names, indexed by `num_days_from_monday`
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Aggregator for computing screen-time statistics.
///
/// Pure functions over an entry slice: no I/O, deterministic, and total for
/// any input. Negative hours (which the repository rejects, but may exist in
/// an externally modified database) are clamped to zero so a report can
/// always be produced.
pub struct Aggregator;

impl Aggregator {
    /// Aggregate entries by day (sorted by date ascending)
    pub fn daily(entries: &[UsageEntry]) -> Vec<DailyTotal> {
        let mut daily_map: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();

        for entry in entries {
            *daily_map.entry(entry.date).or_insert(0.0) += clamp_hours(entry.hours);
        }

        daily_map
            .into_iter()
            .map(|(date, hours)| DailyTotal { date, hours })
            .collect()
    }

    /// Aggregate entries by category (case-sensitive, no normalization),
    /// sorted by hours descending with ties broken by name ascending.
    /// Percentages are of the grand total, or 0 when the total is 0.
    pub fn by_category(entries: &[UsageEntry]) -> Vec<CategoryTotal> {
        let mut category_map: BTreeMap<String, f64> = BTreeMap::new();

        for entry in entries {
            *category_map.entry(entry.category.clone()).or_insert(0.0) +=
                clamp_hours(entry.hours);
        }

        let total_hours: f64 = category_map.values().sum();

        let mut result: Vec<CategoryTotal> = category_map
            .into_iter()
            .map(|(category, hours)| CategoryTotal {
                category,
                hours,
                percentage: if total_hours > 0.0 {
                    100.0 * hours / total_hours
                } else {
                    0.0
                },
            })
            .collect();

        result.sort_by(|a, b| {
            b.hours
                .partial_cmp(&a.hours)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        result
    }

    /// Compute the full summary report for a record set.
    pub fn summarize(entries: &[UsageEntry], threshold_hours: f64) -> SummaryReport {
        let daily = Self::daily(entries);
        let categories = Self::by_category(entries);

        let total_hours: f64 = daily.iter().map(|d| d.hours).sum();
        let entry_count = entries.len() as u64;
        let distinct_days = daily.len() as u64;
        let average_per_day = if distinct_days > 0 {
            total_hours / distinct_days as f64
        } else {
            0.0
        };

        // Strictly greater-than: a day exactly at the threshold is not an alert
        let alert_days: Vec<DailyTotal> = daily
            .iter()
            .filter(|d| d.hours > threshold_hours)
            .copied()
            .collect();

        // Walking in date order with strict comparisons keeps the first
        // extreme on ties
        let mut highest_day: Option<DailyTotal> = None;
        let mut lowest_day: Option<DailyTotal> = None;
        for day in &daily {
            match highest_day {
                None => highest_day = Some(*day),
                Some(max) if day.hours > max.hours => highest_day = Some(*day),
                _ => {}
            }
            match lowest_day {
                None => lowest_day = Some(*day),
                Some(min) if day.hours < min.hours => lowest_day = Some(*day),
                _ => {}
            }
        }

        let weekday_pattern = Self::weekday_pattern(&daily);

        let recommendations = Self::recommendations(
            &categories,
            average_per_day,
            threshold_hours,
            alert_days.len() as u64,
            distinct_days,
        );

        SummaryReport {
            total_hours,
            entry_count,
            distinct_days,
            average_per_day,
            threshold_hours,
            daily,
            categories,
            alert_days,
            highest_day,
            lowest_day,
            weekday_pattern,
            recommendations,
        }
    }

    /// Bucket daily totals by weekday, Monday..Sunday. Display-only; no
    /// alerting semantics. Empty input yields an empty vec.
    fn weekday_pattern(daily: &[DailyTotal]) -> Vec<WeekdayTotal> {
        if daily.is_empty() {
            return Vec::new();
        }

        let mut buckets = [0.0f64; 7];
        for day in daily {
            buckets[day.date.weekday().num_days_from_monday() as usize] += day.hours;
        }

        WEEKDAY_NAMES
            .iter()
            .zip(buckets)
            .map(|(weekday, hours)| WeekdayTotal {
                weekday: (*weekday).to_string(),
                hours,
            })
            .collect()
    }

    /// Fixed rule list; every rule is evaluated independently and the order
    /// of evaluation never changes which recommendations fire.
    fn recommendations(
        categories: &[CategoryTotal],
        average_per_day: f64,
        threshold_hours: f64,
        alert_count: u64,
        distinct_days: u64,
    ) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(top) = categories.iter().find(|c| c.percentage > 50.0) {
            out.push(format!(
                "{} accounts for {:.1}% of your screen time. Consider diversifying your activities.",
                top.category, top.percentage
            ));
        }

        if average_per_day > threshold_hours {
            out.push(format!(
                "Your average daily screen time ({:.1} hrs) exceeds the {:.1} hr threshold. Try to reduce daily usage.",
                average_per_day, threshold_hours
            ));
        }

        if distinct_days > 0 && alert_count as f64 > distinct_days as f64 / 2.0 {
            out.push(format!(
                "You exceeded the threshold on {} of {} tracked days. This is a concerning pattern.",
                alert_count, distinct_days
            ));
        }

        out
    }
}

fn clamp_hours(hours: f64) -> f64 {
    // f64::max also maps NaN to 0.0 here
    hours.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_entry(year: i32, month: u32, day: u32, category: &str, hours: f64) -> UsageEntry {
        UsageEntry {
            id: 0,
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            category: category.to_string(),
            hours,
            remarks: String::new(),
            created_at: String::new(),
        }
    }

    // ========== daily() tests ==========

    #[test]
    fn test_daily_empty_entries() {
        let result = Aggregator::daily(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_daily_sorted_ascending() {
        let entries = vec![
            make_entry(2024, 1, 20, "Study", 1.0),
            make_entry(2024, 1, 10, "Study", 2.0),
            make_entry(2024, 1, 15, "Study", 3.0),
        ];

        let result = Aggregator::daily(&entries);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].date.to_string(), "2024-01-10");
        assert_eq!(result[1].date.to_string(), "2024-01-15");
        assert_eq!(result[2].date.to_string(), "2024-01-20");
    }

    #[test]
    fn test_daily_sums_across_categories() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.0),
            make_entry(2024, 1, 1, "Gaming", 4.0),
        ];

        let result = Aggregator::daily(&entries);

        assert_eq!(result.len(), 1);
        assert!((result[0].hours - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_partition_preserves_hours() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.5),
            make_entry(2024, 1, 1, "Gaming", 2.0),
            make_entry(2024, 1, 2, "Work", 4.25),
            make_entry(2024, 1, 3, "Study", 1.75),
        ];

        let record_sum: f64 = entries.iter().map(|e| e.hours).sum();
        let day_sum: f64 = Aggregator::daily(&entries).iter().map(|d| d.hours).sum();

        assert!((record_sum - day_sum).abs() < 1e-9);
    }

    #[test]
    fn test_daily_clamps_negative_hours() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", -5.0),
            make_entry(2024, 1, 1, "Gaming", 2.0),
        ];

        let result = Aggregator::daily(&entries);
        assert!((result[0].hours - 2.0).abs() < f64::EPSILON);
    }

    // ========== by_category() tests ==========

    #[test]
    fn test_by_category_empty() {
        let result = Aggregator::by_category(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_by_category_sorted_desc_with_name_tiebreak() {
        let entries = vec![
            make_entry(2024, 1, 1, "Gaming", 2.0),
            make_entry(2024, 1, 2, "Reading", 2.0),
            make_entry(2024, 1, 3, "Study", 5.0),
        ];

        let result = Aggregator::by_category(&entries);

        assert_eq!(result[0].category, "Study");
        // Gaming and Reading tie at 2.0; name ascending breaks the tie
        assert_eq!(result[1].category, "Gaming");
        assert_eq!(result[2].category, "Reading");
    }

    #[test]
    fn test_by_category_case_sensitive() {
        let entries = vec![
            make_entry(2024, 1, 1, "study", 1.0),
            make_entry(2024, 1, 1, "Study", 2.0),
        ];

        let result = Aggregator::by_category(&entries);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_by_category_percentages_sum_to_100() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.0),
            make_entry(2024, 1, 1, "Gaming", 4.0),
            make_entry(2024, 1, 2, "Work", 2.5),
        ];

        let result = Aggregator::by_category(&entries);
        let pct_sum: f64 = result.iter().map(|c| c.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_category_zero_total_zero_percentage() {
        let entries = vec![make_entry(2024, 1, 1, "Study", 0.0)];

        let result = Aggregator::by_category(&entries);
        assert!((result[0].percentage - 0.0).abs() < f64::EPSILON);
    }

    // ========== summarize() tests ==========

    #[test]
    fn test_summarize_empty_yields_zeroed_report() {
        let report = Aggregator::summarize(&[], 6.0);

        assert!((report.total_hours - 0.0).abs() < f64::EPSILON);
        assert_eq!(report.entry_count, 0);
        assert_eq!(report.distinct_days, 0);
        assert!((report.average_per_day - 0.0).abs() < f64::EPSILON);
        assert!(report.daily.is_empty());
        assert!(report.categories.is_empty());
        assert!(report.alert_days.is_empty());
        assert!(report.highest_day.is_none());
        assert!(report.lowest_day.is_none());
        assert!(report.weekday_pattern.is_empty());
    }

    #[test]
    fn test_summarize_worked_example() {
        // The canonical example: two days, two categories, threshold 6.0
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.0),
            make_entry(2024, 1, 1, "Gaming", 4.0),
            make_entry(2024, 1, 2, "Study", 2.0),
        ];

        let report = Aggregator::summarize(&entries, 6.0);

        assert!((report.total_hours - 9.0).abs() < f64::EPSILON);
        assert_eq!(report.entry_count, 3);
        assert_eq!(report.distinct_days, 2);
        assert!((report.average_per_day - 4.5).abs() < f64::EPSILON);

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date.to_string(), "2024-01-01");
        assert!((report.daily[0].hours - 7.0).abs() < f64::EPSILON);
        assert!((report.daily[1].hours - 2.0).abs() < f64::EPSILON);

        assert_eq!(report.alert_days.len(), 1);
        assert_eq!(report.alert_days[0].date.to_string(), "2024-01-01");

        assert_eq!(report.categories[0].category, "Study");
        assert!((report.categories[0].hours - 5.0).abs() < f64::EPSILON);
        assert!((report.categories[0].percentage - 55.555555555555557).abs() < 1e-9);
        assert_eq!(report.categories[1].category, "Gaming");
        assert!((report.categories[1].percentage - 44.444444444444443).abs() < 1e-9);
    }

    #[test]
    fn test_alert_requires_strictly_greater() {
        let entries = vec![make_entry(2024, 1, 1, "Study", 6.0)];

        let report = Aggregator::summarize(&entries, 6.0);
        assert!(report.alert_days.is_empty());

        let report = Aggregator::summarize(&entries, 5.99);
        assert_eq!(report.alert_days.len(), 1);
    }

    #[test]
    fn test_extremes_first_in_date_order_on_ties() {
        let entries = vec![
            make_entry(2024, 1, 10, "Study", 5.0),
            make_entry(2024, 1, 15, "Study", 5.0),
            make_entry(2024, 1, 20, "Study", 5.0),
        ];

        let report = Aggregator::summarize(&entries, 6.0);

        assert_eq!(report.highest_day.unwrap().date.to_string(), "2024-01-10");
        assert_eq!(report.lowest_day.unwrap().date.to_string(), "2024-01-10");
    }

    #[test]
    fn test_extremes_distinct_days() {
        let entries = vec![
            make_entry(2024, 1, 10, "Study", 2.0),
            make_entry(2024, 1, 15, "Study", 8.0),
            make_entry(2024, 1, 20, "Study", 4.0),
        ];

        let report = Aggregator::summarize(&entries, 6.0);

        let high = report.highest_day.unwrap();
        let low = report.lowest_day.unwrap();
        assert_eq!(high.date.to_string(), "2024-01-15");
        assert!((high.hours - 8.0).abs() < f64::EPSILON);
        assert_eq!(low.date.to_string(), "2024-01-10");
        assert!((low.hours - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weekday_pattern_monday_first() {
        // 2024-01-01 is a Monday, 2024-01-07 a Sunday
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.0),
            make_entry(2024, 1, 7, "Gaming", 2.0),
            make_entry(2024, 1, 8, "Study", 1.0), // following Monday
        ];

        let report = Aggregator::summarize(&entries, 6.0);
        let pattern = &report.weekday_pattern;

        assert_eq!(pattern.len(), 7);
        assert_eq!(pattern[0].weekday, "Monday");
        assert!((pattern[0].hours - 4.0).abs() < f64::EPSILON);
        assert_eq!(pattern[6].weekday, "Sunday");
        assert!((pattern[6].hours - 2.0).abs() < f64::EPSILON);
        // Weekdays with no data stay at zero
        assert!((pattern[2].hours - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weekday_names_are_full_words() {
        let entries = vec![make_entry(2024, 1, 1, "Study", 1.0)];

        let report = Aggregator::summarize(&entries, 6.0);
        let names: Vec<&str> = report
            .weekday_pattern
            .iter()
            .map(|w| w.weekday.as_str())
            .collect();
        assert_eq!(
            names,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn test_recommendation_dominant_category() {
        let entries = vec![
            make_entry(2024, 1, 1, "Gaming", 8.0),
            make_entry(2024, 1, 2, "Study", 1.0),
        ];

        let report = Aggregator::summarize(&entries, 20.0);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Gaming") && r.contains("diversifying")));
    }

    #[test]
    fn test_recommendation_average_over_threshold() {
        let entries = vec![make_entry(2024, 1, 1, "Study", 8.0)];

        let report = Aggregator::summarize(&entries, 6.0);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("average daily screen time")));
    }

    #[test]
    fn test_recommendation_frequent_alerts() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 7.0),
            make_entry(2024, 1, 2, "Study", 7.0),
            make_entry(2024, 1, 3, "Study", 1.0),
        ];

        let report = Aggregator::summarize(&entries, 6.0);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("concerning pattern")));
    }

    #[test]
    fn test_no_recommendations_within_limits() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 2.0),
            make_entry(2024, 1, 1, "Gaming", 2.0),
            make_entry(2024, 1, 2, "Reading", 3.0),
        ];

        let report = Aggregator::summarize(&entries, 6.0);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let entries = vec![
            make_entry(2024, 1, 1, "Study", 3.0),
            make_entry(2024, 1, 1, "Gaming", 4.0),
            make_entry(2024, 1, 2, "Study", 2.0),
        ];

        let a = Aggregator::summarize(&entries, 6.0);
        let b = Aggregator::summarize(&entries, 6.0);
        assert_eq!(a, b);
    }
}
