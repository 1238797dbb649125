//! Calculation model
//!
//! One extracted footprint result belonging to a day.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A single item's footprint result for a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub id: i64,
    pub day_id: i64,
    pub item_key: String,
    pub label: String,
    pub category: String,
    pub quantity: f64,
    pub liters: f64,
    pub created_at: String,
}

/// Data for creating a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationCreate {
    pub day_id: i64,
    pub item_key: String,
    pub label: String,
    pub category: String,
    pub quantity: f64,
    pub liters: f64,
}

impl Calculation {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            day_id: row.get("day_id")?,
            item_key: row.get("item_key")?,
            label: row.get("label")?,
            category: row.get("category")?,
            quantity: row.get("quantity")?,
            liters: row.get("liters")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new calculation
    pub fn create(conn: &Connection, data: &CalculationCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO calculations (day_id, item_key, label, category, quantity, liters)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                data.day_id,
                data.item_key,
                data.label,
                data.category,
                data.quantity,
                data.liters,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a calculation by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calculations WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(calc) => Ok(Some(calc)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all calculations for a day, in insertion order
    pub fn get_for_day(conn: &Connection, day_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM calculations WHERE day_id = ?1 ORDER BY id ASC",
        )?;

        let calcs = stmt
            .query_map([day_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(calcs)
    }

    /// Number of calculations for a day
    pub fn count_for_day(conn: &Connection, day_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM calculations WHERE day_id = ?1",
            [day_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Total calculations across all days
    pub fn count_all(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM calculations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Sum of liters for a day
    pub fn sum_for_day(conn: &Connection, day_id: i64) -> DbResult<f64> {
        let sum: f64 = conn.query_row(
            "SELECT COALESCE(SUM(liters), 0) FROM calculations WHERE day_id = ?1",
            [day_id],
            |row| row.get(0),
        )?;
        Ok(sum)
    }

    /// Remove all calculations for a day (re-logging replaces them)
    pub fn delete_for_day(conn: &Connection, day_id: i64) -> DbResult<i64> {
        let rows = conn.execute("DELETE FROM calculations WHERE day_id = ?1", [day_id])?;
        Ok(rows as i64)
    }
}
