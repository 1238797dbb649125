//! WaterLog MCP Server Implementation
//!
//! Implements the MCP server with all WaterLog tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::db::Database;
use crate::extract::enrichment::EnrichmentRule;
use crate::tools::transfer::JournalDocument;
use crate::tools::{estimate, journal, status, transfer};

/// WaterLog MCP Service
#[derive(Clone)]
pub struct WaterlogService {
    catalog: Arc<Catalog>,
    rules: Arc<Vec<EnrichmentRule>>,
    database: Database,
    database_path: PathBuf,
    tool_router: ToolRouter<WaterlogService>,
}

impl WaterlogService {
    pub fn new(
        catalog: Arc<Catalog>,
        rules: Vec<EnrichmentRule>,
        database_path: PathBuf,
        database: Database,
    ) -> Self {
        Self {
            catalog,
            rules: Arc::new(rules),
            database,
            database_path,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateParams {
    /// Free-form text describing activities (e.g. "점심에 파스타 먹고 양치함")
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupItemParams {
    /// Catalog item key (e.g. "apple", "shower")
    pub item: String,
    /// Quantity in the item's unit
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCatalogParams {
    /// Restrict to one category (protein, grain, produce, snack, beverage, goods, habit)
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Free-form journal text for the day
    pub journal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDaysParams {
    /// Start date, inclusive (optional)
    pub start_date: Option<String>,
    /// End date, inclusive (optional)
    pub end_date: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 30 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteDayParams {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImportJournalParams {
    /// Journal document: { "<date>": { "journal": ..., "calculations": [...] } }
    pub data: JournalDocument,
    /// Clear the existing journal before importing
    #[serde(default)]
    pub replace: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl WaterlogService {
    // --- Status ---

    #[tool(description = "Get the current status of the WaterLog service including build info, catalog size, and journal counts")]
    fn waterlog_status(&self) -> Result<CallToolResult, McpError> {
        let result = status::get_status(&self.catalog, &self.database, &self.database_path)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Estimation ---

    #[tool(description = "Estimate the water footprint of free-form text. Recognizes catalog keywords (longest first, no double counting) and nearby quantities like '샤워 10분'. Returns matches with totals; on no match, returns example keywords to suggest to the user.")]
    fn estimate_water_footprint(&self, Parameters(p): Parameters<EstimateParams>) -> Result<CallToolResult, McpError> {
        let result = estimate::estimate_from_text(&self.catalog, &self.rules, &p.text);
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Look up one catalog item by key and scale its per-unit water footprint by a quantity")]
    fn lookup_item(&self, Parameters(p): Parameters<LookupItemParams>) -> Result<CallToolResult, McpError> {
        let result = estimate::lookup_item(&self.catalog, &p.item, p.quantity)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List catalog items with per-unit water amounts and recognized keywords, grouped by category")]
    fn list_catalog(&self, Parameters(p): Parameters<ListCatalogParams>) -> Result<CallToolResult, McpError> {
        let result = estimate::list_catalog(&self.catalog, p.category.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Journal ---

    #[tool(description = "Extract a day's journal text and persist the footprint results for that date. Re-logging a date replaces its previous results.")]
    fn log_day(&self, Parameters(p): Parameters<LogDayParams>) -> Result<CallToolResult, McpError> {
        let result = journal::log_day(&self.catalog, &self.rules, &self.database, &p.date, &p.journal)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a logged day with its journal text, stored calculations, and total")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let result = journal::get_day(&self.database, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(day) => serde_json::to_string_pretty(&day),
            None => Ok(format!(r#"{{"error": "Day not found", "date": "{}"}}"#, p.date)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List logged days with totals, optionally within a date range")]
    fn list_days(&self, Parameters(p): Parameters<ListDaysParams>) -> Result<CallToolResult, McpError> {
        let result = journal::list_days(&self.database, p.start_date.as_deref(), p.end_date.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a logged day and its calculations")]
    fn delete_day(&self, Parameters(p): Parameters<DeleteDayParams>) -> Result<CallToolResult, McpError> {
        let deleted = journal::delete_day(&self.database, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&serde_json::json!({ "deleted": deleted, "date": p.date }))
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Export / Import ---

    #[tool(description = "Export the whole journal as a JSON document keyed by date")]
    fn export_journal(&self) -> Result<CallToolResult, McpError> {
        let result = transfer::export_journal(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Import a journal document previously produced by export_journal. Pass replace=true to clear the existing journal first; otherwise dates merge with imported dates winning.")]
    fn import_journal(&self, Parameters(p): Parameters<ImportJournalParams>) -> Result<CallToolResult, McpError> {
        let result = transfer::import_journal(&self.catalog, &self.database, p.data, p.replace)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for WaterlogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waterlog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("WaterLog".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "WaterLog - water footprint estimation and daily journal. \
                 Estimation: estimate_water_footprint (free text, Korean keywords), \
                 lookup_item (catalog key + quantity), list_catalog. \
                 Journal: log_day/get_day/list_days/delete_day. \
                 Transfer: export_journal/import_journal (JSON keyed by date). \
                 Amounts are liters of embedded water; quantities near keywords \
                 (e.g. '샤워 10분') scale the per-unit amount."
                    .into(),
            ),
        }
    }
}
