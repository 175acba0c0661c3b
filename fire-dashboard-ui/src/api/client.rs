//! HTTP API Client
//!
//! Functions for communicating with the finance backend.

use gloo_net::http::Request;

use fire_dashboard::api::{decode_details, decode_graphs, decode_summary};
use fire_dashboard::pages::{self, Section};
use fire_dashboard::{DashboardError, DashboardResult, Figure, GraphSet, Summary};

/// Local storage key holding an API base override
pub const API_BASE_KEY: &str = "fire_dashboard_api_url";

/// Default API base: same origin as the page
pub const DEFAULT_API_BASE: &str = "";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// GET a backend path and return the body of a successful response
async fn get_text(path: &str) -> DashboardResult<String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| DashboardError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(DashboardError::Status {
            status: response.status(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| DashboardError::Network(e.to_string()))
}

// ============ API Functions ============

/// Fetch a section's KPI summary
pub async fn fetch_summary(section: Section) -> DashboardResult<Summary> {
    let path = section
        .summary_path()
        .ok_or_else(|| DashboardError::MissingEndpoint("summary".to_string()))?;
    decode_summary(&get_text(&path).await?)
}

/// Fetch a section's graph set
pub async fn fetch_graphs(section: Section) -> DashboardResult<GraphSet> {
    decode_graphs(&get_text(&section.graphs_path()).await?)
}

/// Fetch a drill-down figure
pub async fn fetch_details(graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure> {
    decode_details(&get_text(&pages::details_path(graph_id, sub_type)).await?)
}
