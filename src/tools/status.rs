//! Status MCP tool
//!
//! Reports build info plus catalog and journal counts.

use std::path::Path;

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::catalog::Catalog;
use crate::db::Database;
use crate::models::{Calculation, Day};

/// Response for waterlog_status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub build: BuildInfo,
    pub database_path: String,
    pub catalog_items: usize,
    pub days_logged: i64,
    pub calculations_logged: i64,
}

/// Gather service status
pub fn get_status(catalog: &Catalog, db: &Database, db_path: &Path) -> Result<StatusResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days_logged = Day::count(&conn, None, None)
        .map_err(|e| format!("Failed to count days: {}", e))?;
    let calculations_logged = Calculation::count_all(&conn)
        .map_err(|e| format!("Failed to count calculations: {}", e))?;

    Ok(StatusResponse {
        build: BuildInfo::current(),
        database_path: db_path.display().to_string(),
        catalog_items: catalog.len(),
        days_logged,
        calculations_logged,
    })
}
