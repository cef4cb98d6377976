//! AQHR MCP Server Implementation
//!
//! Implements the MCP server with all AQHR tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db::Database;
use crate::export::ExportGuard;
use crate::store::ReportStore;
use crate::tools::advisories::{self, AdvisoryInput};
use crate::tools::reports;
use crate::tools::session;
use crate::tools::status::StatusTracker;

/// AQHR MCP Service
#[derive(Clone)]
pub struct AqhrService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    store: Arc<dyn ReportStore>,
    export_guard: Arc<ExportGuard>,
    config: Arc<Config>,
    tool_router: ToolRouter<AqhrService>,
}

impl AqhrService {
    pub fn new(config: Config, database: Database, store: Arc<dyn ReportStore>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(&config))),
            database,
            store,
            export_guard: ExportGuard::new(),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "success": false, "error": message }).to_string()
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetSessionTokenParams {
    /// Bearer token issued by the report store at login
    pub token: String,
    /// Optional expiry as RFC 3339 (e.g., "2026-01-13T18:00:00Z")
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReportIdParams {
    /// Report identifier in the report store
    pub report_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeriveAdvisoriesParams {
    /// AQI value (omit when unknown)
    pub aqi: Option<f64>,
    /// Age in years (omit when unknown)
    pub age: Option<f64>,
    /// Symptom labels, e.g. "Asthma", "Shortness of breath"
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Server-provided outdoor activity guideline, if any
    pub server_outdoor: Option<String>,
    /// Server-provided protective measure, if any
    pub server_mask: Option<String>,
    /// Server-provided medicine recommendation, if any
    pub server_medicine: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl AqhrService {
    // --- Status ---

    #[tool(description = "Get the current status of the AQHR service including build info, database status, report store URL, and process information")]
    async fn aqhr_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let json = to_json(&tracker.get_status())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for viewing and exporting air quality health reports. Call this when starting a session or when unsure how to use the report tools.")]
    fn report_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::REPORT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(REPORT_INSTRUCTIONS)]))
    }

    // --- Session ---

    #[tool(description = "Store the report store bearer token (log in). Optionally give an RFC 3339 expiry.")]
    fn set_session_token(&self, Parameters(p): Parameters<SetSessionTokenParams>) -> Result<CallToolResult, McpError> {
        let json = match session::set_session_token(&self.database, &p.token, p.expires_at.as_deref()) {
            Ok(response) => to_json(&response)?,
            Err(e) => error_json(&e),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove the stored report store token (log out)")]
    fn clear_session_token(&self) -> Result<CallToolResult, McpError> {
        let json = match session::clear_session_token(&self.database) {
            Ok(response) => to_json(&response)?,
            Err(e) => error_json(&e),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Reports ---

    #[tool(description = "Fetch a health report and return the resolved view: AQI, profile, server recommendations, and activity/mask/medicine advice (derived locally when the store supplied none)")]
    async fn get_health_report(&self, Parameters(p): Parameters<ReportIdParams>) -> Result<CallToolResult, McpError> {
        let response = reports::get_health_report(self.store.as_ref(), &self.database, &p.report_id).await;
        let json = to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Derive activity, mask, and medicine advice from an AQI value, age, and symptoms without a stored report")]
    fn derive_advisories(&self, Parameters(p): Parameters<DeriveAdvisoriesParams>) -> Result<CallToolResult, McpError> {
        let response = advisories::derive_advisories(AdvisoryInput {
            aqi: p.aqi,
            age: p.age,
            symptoms: p.symptoms,
            server_outdoor: p.server_outdoor,
            server_mask: p.server_mask,
            server_medicine: p.server_medicine,
        });
        let json = to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Export a health report to health-report.pdf in the export directory. Only one export runs at a time.")]
    async fn export_health_report_pdf(&self, Parameters(p): Parameters<ReportIdParams>) -> Result<CallToolResult, McpError> {
        let response = reports::export_health_report(
            self.store.as_ref(),
            &self.database,
            &self.export_guard,
            &p.report_id,
            &self.config.export_dir,
        )
        .await;
        let json = to_json(&response)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for AqhrService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "aqhr".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Air Quality Health Report".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Air Quality Health Report (AQHR) - Air quality health reports with activity, mask, and medicine advice. \
                 IMPORTANT: Call report_instructions first. \
                 Session: set_session_token/clear_session_token (reports require a token). \
                 Reports: get_health_report, export_health_report_pdf. \
                 Rules: derive_advisories for what-if questions. \
                 Status: aqhr_status."
                    .into(),
            ),
        }
    }
}
