//! Journal export/import MCP tools
//!
//! Serializes the journal to a plain JSON document of the shape
//! `{ "<date>": { "journal": ..., "calculations": [...] } }` and reads the
//! same shape back. The `item` field carries the stable catalog key;
//! unknown keys survive a round trip verbatim.

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::db::Database;
use crate::models::{Calculation, CalculationCreate, Day};
use crate::tools::journal::validate_date;

/// One exported calculation row
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExportedCalculation {
    pub category: String,
    pub item: String,
    pub quantity: f64,
    pub amount: f64,
}

/// One exported day
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExportedDay {
    pub journal: String,
    pub calculations: Vec<ExportedCalculation>,
}

/// The full journal document, keyed by date
pub type JournalDocument = BTreeMap<String, ExportedDay>;

/// Response for import_journal
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub days_imported: i64,
    pub calculations_imported: i64,
    pub replaced: bool,
}

/// Export every journal day
pub fn export_journal(db: &Database) -> Result<JournalDocument, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let total = Day::count(&conn, None, None)
        .map_err(|e| format!("Failed to count days: {}", e))?;
    let days = Day::list(&conn, None, None, total.max(1), 0)
        .map_err(|e| format!("Failed to list days: {}", e))?;

    let mut document = JournalDocument::new();
    for day in days {
        let calcs = Calculation::get_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to read calculations: {}", e))?;

        document.insert(
            day.date,
            ExportedDay {
                journal: day.journal,
                calculations: calcs
                    .into_iter()
                    .map(|c| ExportedCalculation {
                        category: c.category,
                        item: c.item_key,
                        quantity: c.quantity,
                        amount: c.liters,
                    })
                    .collect(),
            },
        );
    }

    Ok(document)
}

/// Import a journal document.
///
/// With `replace` the store is cleared first; otherwise dates merge and an
/// imported date overwrites any existing entry for the same date.
pub fn import_journal(
    catalog: &Catalog,
    db: &Database,
    document: JournalDocument,
    replace: bool,
) -> Result<ImportSummary, String> {
    for date in document.keys() {
        validate_date(date)?;
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if replace {
        Day::delete_all(&conn).map_err(|e| format!("Failed to clear journal: {}", e))?;
    }

    let mut days_imported = 0;
    let mut calculations_imported = 0;

    for (date, entry) in document {
        let day = Day::get_or_create(&conn, &date)
            .map_err(|e| format!("Failed to get/create day: {}", e))?;

        Day::update_journal(&conn, day.id, &entry.journal)
            .map_err(|e| format!("Failed to update journal: {}", e))?;
        Calculation::delete_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to clear previous calculations: {}", e))?;

        for calc in &entry.calculations {
            // Label and category come from the current catalog when the
            // key is known; otherwise the imported values stand as-is.
            let (label, category) = match catalog.get(&calc.item) {
                Some(e) => (e.label.clone(), e.category.as_str().to_string()),
                None => (calc.item.clone(), calc.category.clone()),
            };

            Calculation::create(
                &conn,
                &CalculationCreate {
                    day_id: day.id,
                    item_key: calc.item.clone(),
                    label,
                    category,
                    quantity: calc.quantity,
                    liters: calc.amount,
                },
            )
            .map_err(|e| format!("Failed to store calculation: {}", e))?;
            calculations_imported += 1;
        }

        let total = Calculation::sum_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to total calculations: {}", e))?;
        Day::update_cached_total(&conn, day.id, total)
            .map_err(|e| format!("Failed to cache total: {}", e))?;

        days_imported += 1;
    }

    tracing::info!(days_imported, calculations_imported, replace, "imported journal");

    Ok(ImportSummary {
        days_imported,
        calculations_imported,
        replaced: replace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::enrichment::default_rules;
    use crate::tools::journal::{get_day, log_day};
    use crate::tools::test_support::test_db;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog")
    }

    #[test]
    fn test_export_import_round_trip() {
        let c = catalog();
        let source = test_db();

        log_day(&c, &default_rules(), &source, "2026-08-25", "샤워 10분").unwrap();
        log_day(&c, &default_rules(), &source, "2026-08-26", "햄버거 세트").unwrap();

        let document = export_journal(&source).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document["2026-08-25"].journal, "샤워 10분");

        let target = test_db();
        let summary = import_journal(&c, &target, document, false).unwrap();
        assert_eq!(summary.days_imported, 2);

        let day = get_day(&target, "2026-08-25").unwrap().expect("imported day");
        assert_eq!(day.total_liters, 120.0);
        let day = get_day(&target, "2026-08-26").unwrap().expect("imported day");
        assert_eq!(day.total_liters, 2500.0 + 185.0 + 75.0);
    }

    #[test]
    fn test_import_replace_clears_existing() {
        let c = catalog();
        let db = test_db();

        log_day(&c, &default_rules(), &db, "2026-08-20", "커피").unwrap();

        let mut document = JournalDocument::new();
        document.insert(
            "2026-08-26".to_string(),
            ExportedDay {
                journal: "사과".to_string(),
                calculations: vec![ExportedCalculation {
                    category: "produce".to_string(),
                    item: "apple".to_string(),
                    quantity: 1.0,
                    amount: 125.0,
                }],
            },
        );

        let summary = import_journal(&c, &db, document, true).unwrap();
        assert!(summary.replaced);
        assert!(get_day(&db, "2026-08-20").unwrap().is_none());
        assert!(get_day(&db, "2026-08-26").unwrap().is_some());
    }

    #[test]
    fn test_import_preserves_unknown_items() {
        let c = catalog();
        let db = test_db();

        let mut document = JournalDocument::new();
        document.insert(
            "2026-08-26".to_string(),
            ExportedDay {
                journal: String::new(),
                calculations: vec![ExportedCalculation {
                    category: "misc".to_string(),
                    item: "kimbap".to_string(),
                    quantity: 2.0,
                    amount: 300.0,
                }],
            },
        );

        import_journal(&c, &db, document, false).unwrap();

        let exported = export_journal(&db).unwrap();
        let calc = &exported["2026-08-26"].calculations[0];
        assert_eq!(calc.item, "kimbap");
        assert_eq!(calc.category, "misc");
        assert_eq!(calc.amount, 300.0);
    }

    #[test]
    fn test_import_rejects_bad_date() {
        let c = catalog();
        let db = test_db();

        let mut document = JournalDocument::new();
        document.insert("yesterday".to_string(), ExportedDay {
            journal: String::new(),
            calculations: Vec::new(),
        });

        assert!(import_journal(&c, &db, document, false).is_err());
    }
}
