//! Row mapping helpers shared by the `SQLite` repositories.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a `datetime('now')` timestamp. Unparseable values map to now.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    let trimmed = s.trim_end_matches(" UTC");
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Whether the error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
