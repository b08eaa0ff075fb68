//! Usage record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One persisted screen-time entry.
///
/// `id` and `created_at` are assigned by the database on insert and never
/// change afterwards; corrections are delete + re-insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub hours: f64,
    pub remarks: String,
    pub created_at: String,
}

/// A record waiting to be inserted (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub category: String,
    pub hours: f64,
    pub remarks: String,
}

impl NewEntry {
    pub fn new(date: NaiveDate, category: impl Into<String>, hours: f64) -> Self {
        Self {
            date,
            category: category.into(),
            hours,
            remarks: String::new(),
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

/// Inclusive date-range filter for listing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Suggested categories for entry forms. The data layer accepts any string;
/// these only seed the UI.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Study",
    "Work",
    "Social Media",
    "Entertainment",
    "Gaming",
    "Reading",
    "Exercise",
    "Other",
];
