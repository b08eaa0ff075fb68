//! SQLite-backed record repository

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::types::{EntryFilter, NewEntry, Result, ScreenlogError, UsageEntry};

/// Demo records for the `seed` command, mirroring a typical tracking week.
const SAMPLE_ENTRIES: &[(&str, &str, f64, &str)] = &[
    ("2025-11-01", "Study", 3.5, "Online classes"),
    ("2025-11-01", "Social Media", 2.0, "Instagram and Twitter"),
    ("2025-11-02", "Gaming", 4.0, "Weekend gaming session"),
    ("2025-11-02", "Study", 2.5, "Homework and assignments"),
    ("2025-11-03", "Entertainment", 1.5, "YouTube videos"),
    ("2025-11-03", "Social Media", 2.5, "WhatsApp and Instagram"),
    ("2025-11-04", "Study", 4.0, "Exam preparation"),
    ("2025-11-04", "Gaming", 1.5, "Mobile games"),
    ("2025-11-05", "Work", 5.0, "Project work"),
    ("2025-11-05", "Entertainment", 2.0, "Netflix"),
];

/// Stores usage entries in a SQLite database.
///
/// The schema is created by an explicit [`init_schema`](Self::init_schema)
/// call (the `init` command or the Settings tab), not on open; queries
/// against an uninitialized database surface as storage errors suggesting
/// initialization.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Open or create the database file. Parent directories are created as
    /// needed; the schema is not touched.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| ScreenlogError::Storage(format!("cannot open {}: {e}", db_path.display())))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Ok(Self { conn })
    }

    /// Create the table and indexes if they do not exist. Idempotent.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS usage_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_date TEXT NOT NULL,
                category TEXT NOT NULL,
                hours REAL NOT NULL,
                remarks TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_usage_log_date ON usage_log(entry_date);
            CREATE INDEX IF NOT EXISTS idx_usage_log_category ON usage_log(category);",
        )?;
        Ok(())
    }

    /// Persist a new entry, returning its assigned id.
    ///
    /// Fails with a validation error (no write) when hours are negative or
    /// the category is blank.
    pub fn insert(&self, entry: &NewEntry) -> Result<i64> {
        if entry.hours < 0.0 || entry.hours.is_nan() {
            return Err(ScreenlogError::Validation(
                "hours must be zero or greater".into(),
            ));
        }
        if entry.category.trim().is_empty() {
            return Err(ScreenlogError::Validation("category is required".into()));
        }

        self.conn.execute(
            "INSERT INTO usage_log (entry_date, category, hours, remarks)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                entry.date.to_string(),
                entry.category,
                entry.hours,
                entry.remarks,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// List entries, optionally restricted to an inclusive date range.
    /// Ordered by date ascending, then insertion order. An empty result is
    /// not an error.
    pub fn list(&self, filter: &EntryFilter) -> Result<Vec<UsageEntry>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(from) = filter.from {
            params.push(from.to_string());
            conditions.push(format!("entry_date >= ?{}", params.len()));
        }
        if let Some(to) = filter.to {
            params.push(to.to_string());
            conditions.push(format!("entry_date <= ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT id, entry_date, category, hours, remarks, created_at
             FROM usage_log
             {where_clause}
             ORDER BY entry_date ASC, id ASC"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, date_str, category, hours, remarks, created_at) = row?;
            let date = date_str.parse::<NaiveDate>().map_err(|e| {
                ScreenlogError::Storage(format!("bad date '{date_str}' in row {id}: {e}"))
            })?;
            entries.push(UsageEntry {
                id,
                date,
                category,
                hours,
                remarks,
                created_at,
            });
        }

        Ok(entries)
    }

    /// Remove one entry. Returns whether a row existed and was removed; a
    /// missing id is a no-op, not an error.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM usage_log WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Insert the fixed demo records, returning how many were added.
    pub fn seed(&self) -> Result<usize> {
        for (date, category, hours, remarks) in SAMPLE_ENTRIES {
            self.conn.execute(
                "INSERT INTO usage_log (entry_date, category, hours, remarks)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![date, category, hours, remarks],
            )?;
        }
        Ok(SAMPLE_ENTRIES.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_in_tempdir() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::open(&dir.path().join("test.sqlite")).unwrap();
        repo.init_schema().unwrap();
        (dir, repo)
    }

    fn entry(date: &str, category: &str, hours: f64) -> NewEntry {
        NewEntry::new(date.parse().unwrap(), category, hours)
    }

    #[test]
    fn test_insert_and_list() {
        let (_dir, repo) = repo_in_tempdir();

        let id = repo
            .insert(&entry("2025-11-01", "Study", 3.5).with_remarks("notes"))
            .unwrap();
        assert!(id > 0);

        let entries = repo.list(&EntryFilter::all()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].category, "Study");
        assert!((entries[0].hours - 3.5).abs() < f64::EPSILON);
        assert_eq!(entries[0].remarks, "notes");
        assert!(!entries[0].created_at.is_empty());
    }

    #[test]
    fn test_insert_rejects_negative_hours() {
        let (_dir, repo) = repo_in_tempdir();

        let err = repo.insert(&entry("2025-11-01", "Study", -1.0)).unwrap_err();
        assert!(matches!(err, ScreenlogError::Validation(_)));
        // No partial write
        assert!(repo.list(&EntryFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_blank_category() {
        let (_dir, repo) = repo_in_tempdir();

        let err = repo.insert(&entry("2025-11-01", "  ", 1.0)).unwrap_err();
        assert!(matches!(err, ScreenlogError::Validation(_)));
    }

    #[test]
    fn test_insert_accepts_zero_hours() {
        let (_dir, repo) = repo_in_tempdir();
        repo.insert(&entry("2025-11-01", "Study", 0.0)).unwrap();
        assert_eq!(repo.list(&EntryFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn test_ids_are_monotonic_and_not_reused() {
        let (_dir, repo) = repo_in_tempdir();

        let a = repo.insert(&entry("2025-11-01", "Study", 1.0)).unwrap();
        let b = repo.insert(&entry("2025-11-01", "Gaming", 1.0)).unwrap();
        assert!(b > a);

        assert!(repo.delete(b).unwrap());
        let c = repo.insert(&entry("2025-11-02", "Work", 1.0)).unwrap();
        assert!(c > b);
    }

    #[test]
    fn test_list_ordered_by_date_then_insertion() {
        let (_dir, repo) = repo_in_tempdir();

        repo.insert(&entry("2025-11-03", "Study", 1.0)).unwrap();
        repo.insert(&entry("2025-11-01", "Gaming", 2.0)).unwrap();
        repo.insert(&entry("2025-11-01", "Work", 3.0)).unwrap();

        let entries = repo.list(&EntryFilter::all()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].category, "Gaming");
        assert_eq!(entries[1].category, "Work");
        assert_eq!(entries[2].category, "Study");
    }

    #[test]
    fn test_list_date_range_inclusive() {
        let (_dir, repo) = repo_in_tempdir();

        repo.insert(&entry("2025-11-01", "A", 1.0)).unwrap();
        repo.insert(&entry("2025-11-02", "B", 1.0)).unwrap();
        repo.insert(&entry("2025-11-03", "C", 1.0)).unwrap();

        let filter = EntryFilter::between(
            "2025-11-01".parse().unwrap(),
            "2025-11-02".parse().unwrap(),
        );
        let entries = repo.list(&filter).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, "A");
        assert_eq!(entries[1].category, "B");
    }

    #[test]
    fn test_list_empty_range_is_ok() {
        let (_dir, repo) = repo_in_tempdir();
        repo.insert(&entry("2025-11-01", "A", 1.0)).unwrap();

        let filter = EntryFilter::between(
            "2026-01-01".parse().unwrap(),
            "2026-01-31".parse().unwrap(),
        );
        assert!(repo.list(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_delete_existing_removes_exactly_one() {
        let (_dir, repo) = repo_in_tempdir();

        let keep = repo.insert(&entry("2025-11-01", "Study", 1.0)).unwrap();
        let gone = repo.insert(&entry("2025-11-01", "Gaming", 2.0)).unwrap();

        assert!(repo.delete(gone).unwrap());

        let entries = repo.list(&EntryFilter::all()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, keep);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_dir, repo) = repo_in_tempdir();
        assert!(!repo.delete(9999).unwrap());
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let (_dir, repo) = repo_in_tempdir();
        repo.init_schema().unwrap();
        repo.init_schema().unwrap();
    }

    #[test]
    fn test_query_without_schema_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::open(&dir.path().join("fresh.sqlite")).unwrap();

        let err = repo.list(&EntryFilter::all()).unwrap_err();
        assert!(matches!(err, ScreenlogError::Storage(_)));
    }

    #[test]
    fn test_seed_inserts_demo_records() {
        let (_dir, repo) = repo_in_tempdir();

        let n = repo.seed().unwrap();
        assert_eq!(n, 10);

        let entries = repo.list(&EntryFilter::all()).unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].date.to_string(), "2025-11-01");
    }
}
