//! Day model
//!
//! One journal entry per calendar date, with a cached footprint total.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A day's journal with its cached footprint total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    pub id: i64,
    pub date: String, // ISO date: "2026-08-26"
    pub journal: String,
    pub cached_total_liters: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCreate {
    pub date: String,
    pub journal: String,
}

impl Day {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            journal: row.get("journal")?,
            cached_total_liters: row.get("cached_total_liters")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a new day
    pub fn create(conn: &Connection, data: &DayCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO days (date, journal) VALUES (?1, ?2)",
            params![data.date, data.journal],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a day by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a day by date
    pub fn get_by_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE date = ?1")?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get or create a day by date
    pub fn get_or_create(conn: &Connection, date: &str) -> DbResult<Self> {
        if let Some(day) = Self::get_by_date(conn, date)? {
            return Ok(day);
        }

        Self::create(conn, &DayCreate {
            date: date.to_string(),
            journal: String::new(),
        })
    }

    /// List days with optional date range, most recent first
    pub fn list(
        conn: &Connection,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM days WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY date DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        params_vec.push(Box::new(offset));
        sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let days = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }

    /// Count days with optional date range
    pub fn count(conn: &Connection, start_date: Option<&str>, end_date: Option<&str>) -> DbResult<i64> {
        let mut sql = String::from("SELECT COUNT(*) FROM days WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let count: i64 = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Update a day's journal text
    pub fn update_journal(conn: &Connection, id: i64, journal: &str) -> DbResult<()> {
        conn.execute(
            "UPDATE days SET journal = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![journal, id],
        )?;
        Ok(())
    }

    /// Update the cached total for a day
    pub fn update_cached_total(conn: &Connection, id: i64, total_liters: f64) -> DbResult<()> {
        conn.execute(
            "UPDATE days SET cached_total_liters = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![total_liters, id],
        )?;
        Ok(())
    }

    /// Delete a day (calculations cascade)
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM days WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Delete every day (calculations cascade); used by journal import
    pub fn delete_all(conn: &Connection) -> DbResult<i64> {
        let rows = conn.execute("DELETE FROM days", [])?;
        Ok(rows as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        migrations::run_migrations(&conn).expect("migrations");
        conn
    }

    #[test]
    fn test_day_round_trip() {
        let conn = test_conn();
        let day = Day::get_or_create(&conn, "2026-08-26").unwrap();
        assert_eq!(day.date, "2026-08-26");
        assert_eq!(day.cached_total_liters, 0.0);

        // Same date returns the same row
        let again = Day::get_or_create(&conn, "2026-08-26").unwrap();
        assert_eq!(again.id, day.id);
        assert_eq!(Day::count(&conn, None, None).unwrap(), 1);
    }

    #[test]
    fn test_update_journal_and_cached_total() {
        let conn = test_conn();
        let day = Day::get_or_create(&conn, "2026-08-26").unwrap();

        Day::update_journal(&conn, day.id, "샤워 10분").unwrap();
        Day::update_cached_total(&conn, day.id, 120.0).unwrap();

        let day = Day::get_by_id(&conn, day.id).unwrap().unwrap();
        assert_eq!(day.journal, "샤워 10분");
        assert_eq!(day.cached_total_liters, 120.0);
    }

    #[test]
    fn test_list_days_date_range() {
        let conn = test_conn();
        for date in ["2026-08-24", "2026-08-25", "2026-08-26"] {
            Day::get_or_create(&conn, date).unwrap();
        }

        let days = Day::list(&conn, Some("2026-08-25"), None, 10, 0).unwrap();
        assert_eq!(days.len(), 2);
        // Most recent first
        assert_eq!(days[0].date, "2026-08-26");

        let days = Day::list(&conn, Some("2026-08-25"), Some("2026-08-25"), 10, 0).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_delete_all() {
        let conn = test_conn();
        for date in ["2026-08-24", "2026-08-25"] {
            Day::get_or_create(&conn, date).unwrap();
        }
        assert_eq!(Day::delete_all(&conn).unwrap(), 2);
        assert_eq!(Day::count(&conn, None, None).unwrap(), 0);
    }
}
