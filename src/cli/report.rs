//! Text rendering for the `list` and `report` commands

use crate::types::{SummaryReport, UsageEntry};

pub fn print_entries(entries: &[UsageEntry]) {
    println!("{:>5}  {:<12} {:<16} {:>7}  Remarks", "ID", "Date", "Category", "Hours");
    for entry in entries {
        println!(
            "{:>5}  {:<12} {:<16} {:>7.2}  {}",
            entry.id, entry.date, entry.category, entry.hours, entry.remarks
        );
    }
}

pub fn print_report(entries: &[UsageEntry], report: &SummaryReport) {
    if entries.is_empty() {
        println!("No records found.");
        return;
    }

    println!("Screen Time Records:\n");
    print_entries(entries);

    println!("\nSummary Report:");
    println!(
        "Total screen time: {:.2} hours across {} entries",
        report.total_hours, report.entry_count
    );
    println!(
        "Average per day ({} days tracked): {:.2} hours",
        report.distinct_days, report.average_per_day
    );

    println!("\nPer-day totals:");
    for day in &report.daily {
        let marker = if day.hours > report.threshold_hours {
            "  [!]"
        } else {
            ""
        };
        println!("  {}  {:>6.2} hours{}", day.date, day.hours, marker);
    }

    println!("\nPer-category totals:");
    for cat in &report.categories {
        println!(
            "  {:<16} {:>6.2} hours  ({:.1}%)",
            cat.category, cat.hours, cat.percentage
        );
    }

    if let (Some(high), Some(low)) = (&report.highest_day, &report.lowest_day) {
        println!("\nHighest day: {} ({:.2} hours)", high.date, high.hours);
        println!("Lowest day:  {} ({:.2} hours)", low.date, low.hours);
    }

    if !report.alert_days.is_empty() {
        println!(
            "\nDays over the {:.1} hour threshold:",
            report.threshold_hours
        );
        for day in &report.alert_days {
            println!("  {}  {:.2} hours", day.date, day.hours);
        }
    }

    if !report.weekday_pattern.is_empty() {
        println!("\nWeekday pattern:");
        for bucket in &report.weekday_pattern {
            println!("  {:<10} {:>6.2} hours", bucket.weekday, bucket.hours);
        }
    }

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &report.recommendations {
            println!("  - {rec}");
        }
    }
}
