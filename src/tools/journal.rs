//! Journal MCP tools
//!
//! Per-date logging of footprint estimates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::db::Database;
use crate::extract::enrichment::EnrichmentRule;
use crate::extract::Match;
use crate::models::{Calculation, CalculationCreate, Day};
use crate::tools::estimate::estimate_from_text;

/// One stored calculation in a day detail
#[derive(Debug, Serialize)]
pub struct CalculationDetail {
    pub item: String,
    pub label: String,
    pub category: String,
    pub quantity: f64,
    pub liters: f64,
}

/// A day's journal with its stored calculations
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub id: i64,
    pub date: String,
    pub journal: String,
    pub calculations: Vec<CalculationDetail>,
    pub total_liters: f64,
}

/// Day summary for listing
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub id: i64,
    pub date: String,
    pub total_liters: f64,
    pub item_count: i64,
}

/// Response for list_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub days: Vec<DaySummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Validate an ISO journal date
pub(crate) fn validate_date(date: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("Invalid date (expected YYYY-MM-DD): {}", date))
}

fn detail_from_calculation(calc: &Calculation) -> CalculationDetail {
    CalculationDetail {
        item: calc.item_key.clone(),
        label: calc.label.clone(),
        category: calc.category.clone(),
        quantity: calc.quantity,
        liters: calc.liters,
    }
}

/// Extract a journal text and persist the results for a date.
///
/// Re-logging a date replaces its previous calculations; the cached day
/// total always equals the sum of the stored calculations.
pub fn log_day(
    catalog: &Catalog,
    rules: &[EnrichmentRule],
    db: &Database,
    date: &str,
    journal: &str,
) -> Result<DayDetail, String> {
    validate_date(date)?;

    let estimate = estimate_from_text(catalog, rules, journal);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_or_create(&conn, date)
        .map_err(|e| format!("Failed to get/create day: {}", e))?;

    Day::update_journal(&conn, day.id, journal)
        .map_err(|e| format!("Failed to update journal: {}", e))?;

    Calculation::delete_for_day(&conn, day.id)
        .map_err(|e| format!("Failed to clear previous calculations: {}", e))?;

    for m in &estimate.matches {
        let data = calculation_from_match(day.id, m);
        Calculation::create(&conn, &data)
            .map_err(|e| format!("Failed to store calculation: {}", e))?;
    }

    let total = Calculation::sum_for_day(&conn, day.id)
        .map_err(|e| format!("Failed to total calculations: {}", e))?;
    Day::update_cached_total(&conn, day.id, total)
        .map_err(|e| format!("Failed to cache total: {}", e))?;

    tracing::info!(date, items = estimate.matches.len(), total_liters = total, "logged day");

    let calcs = Calculation::get_for_day(&conn, day.id)
        .map_err(|e| format!("Failed to read calculations: {}", e))?;

    Ok(DayDetail {
        id: day.id,
        date: day.date,
        journal: journal.to_string(),
        calculations: calcs.iter().map(detail_from_calculation).collect(),
        total_liters: total,
    })
}

fn calculation_from_match(day_id: i64, m: &Match) -> CalculationCreate {
    CalculationCreate {
        day_id,
        item_key: m.key.clone(),
        label: m.label.clone(),
        category: m.category.as_str().to_string(),
        quantity: m.quantity,
        liters: m.liters,
    }
}

/// Get a day with its stored calculations
pub fn get_day(db: &Database, date: &str) -> Result<Option<DayDetail>, String> {
    validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?;

    match day {
        Some(day) => {
            let calcs = Calculation::get_for_day(&conn, day.id)
                .map_err(|e| format!("Failed to read calculations: {}", e))?;

            Ok(Some(DayDetail {
                id: day.id,
                date: day.date,
                journal: day.journal,
                calculations: calcs.iter().map(detail_from_calculation).collect(),
                total_liters: day.cached_total_liters,
            }))
        }
        None => Ok(None),
    }
}

/// List days with optional date range
pub fn list_days(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListDaysResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days = Day::list(&conn, start_date, end_date, limit, offset)
        .map_err(|e| format!("Failed to list days: {}", e))?;

    let total = Day::count(&conn, start_date, end_date)
        .map_err(|e| format!("Failed to count days: {}", e))?;

    let mut summaries = Vec::new();
    for day in days {
        let item_count = Calculation::count_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to count calculations: {}", e))?;

        summaries.push(DaySummary {
            id: day.id,
            date: day.date,
            total_liters: day.cached_total_liters,
            item_count,
        });
    }

    Ok(ListDaysResponse {
        days: summaries,
        total,
        limit,
        offset,
    })
}

/// Delete a day and its calculations
pub fn delete_day(db: &Database, date: &str) -> Result<bool, String> {
    validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?;

    match day {
        Some(day) => Day::delete(&conn, day.id)
            .map_err(|e| format!("Failed to delete day: {}", e)),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::enrichment::default_rules;
    use crate::tools::test_support::test_db;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog")
    }

    #[test]
    fn test_log_day_persists_extraction() {
        let c = catalog();
        let db = test_db();

        let detail = log_day(&c, &default_rules(), &db, "2026-08-26", "샤워 10분 하고 커피 마심").unwrap();
        assert_eq!(detail.calculations.len(), 2);
        assert_eq!(detail.total_liters, 120.0 + 140.0);

        let stored = get_day(&db, "2026-08-26").unwrap().expect("day exists");
        assert_eq!(stored.total_liters, detail.total_liters);
        assert_eq!(stored.journal, "샤워 10분 하고 커피 마심");
    }

    #[test]
    fn test_relog_replaces_calculations() {
        let c = catalog();
        let db = test_db();

        log_day(&c, &default_rules(), &db, "2026-08-26", "커피").unwrap();
        let detail = log_day(&c, &default_rules(), &db, "2026-08-26", "사과").unwrap();

        assert_eq!(detail.calculations.len(), 1);
        assert_eq!(detail.calculations[0].item, "apple");
        assert_eq!(detail.total_liters, 125.0);

        let resp = list_days(&db, None, None, 10, 0).unwrap();
        assert_eq!(resp.total, 1);
    }

    #[test]
    fn test_log_day_rejects_bad_date() {
        let c = catalog();
        let db = test_db();
        assert!(log_day(&c, &default_rules(), &db, "26/08/2026", "커피").is_err());
    }

    #[test]
    fn test_delete_day() {
        let c = catalog();
        let db = test_db();

        log_day(&c, &default_rules(), &db, "2026-08-26", "커피").unwrap();
        assert!(delete_day(&db, "2026-08-26").unwrap());
        assert!(!delete_day(&db, "2026-08-26").unwrap());
        assert!(get_day(&db, "2026-08-26").unwrap().is_none());
    }
}
