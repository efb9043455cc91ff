//! Health tool implementation
//!
//! Liveness plus a summary of the loaded catalog

use crate::mcp::{McpResponse, ToolResult};
use crate::search::SearchEngine;
use serde::Serialize;
use serde_json::Value;

/// Health status payload, shared with `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub doctors: usize,
    pub mapping_entries: usize,
    pub specialties: usize,
}

pub fn health_status(engine: &SearchEngine) -> HealthStatus {
    let catalog = engine.catalog();
    HealthStatus {
        status: "ok",
        doctors: catalog.len(),
        mapping_entries: catalog.mapping().len(),
        specialties: catalog.specialty_labels().len(),
    }
}

/// Handle health tool call (MCP)
pub async fn handle_health(id: Option<Value>, engine: &SearchEngine) -> McpResponse {
    let status = health_status(engine);
    let text = format!(
        "status: {} · {} doctors · {} mapping entries · {} specialties",
        status.status, status.doctors, status.mapping_entries, status.specialties
    );
    match serde_json::to_value(ToolResult::text(text)) {
        Ok(result) => McpResponse::success(id, result),
        Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
    }
}
