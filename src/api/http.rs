//! HTTP Backend Client
//!
//! `reqwest` implementation of [`DashboardApi`].

use reqwest::Client;

use super::{dto, DashboardApi};
use crate::error::{DashboardError, DashboardResult};
use crate::figure::{Figure, GraphSet};
use crate::pages::{self, Section};
use crate::summary::Summary;

/// Backend client over HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for a backend base URL (e.g. `http://localhost:5000`)
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and return the body text of a successful response
    async fn get_text(&self, path: &str) -> DashboardResult<String> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend returned an error status");
            return Err(DashboardError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpApi {
    async fn fetch_summary(&self, section: Section) -> DashboardResult<Summary> {
        let path = section
            .summary_path()
            .ok_or_else(|| DashboardError::MissingEndpoint("summary".to_string()))?;
        let body = self.get_text(&path).await?;
        dto::decode_summary(&body)
    }

    async fn fetch_graphs(&self, section: Section) -> DashboardResult<GraphSet> {
        let body = self.get_text(&section.graphs_path()).await?;
        dto::decode_graphs(&body)
    }

    async fn fetch_details(&self, graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure> {
        let body = self.get_text(&pages::details_path(graph_id, sub_type)).await?;
        dto::decode_details(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let api = HttpApi::new("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(
            api.url(&Section::CashflowAnalytics.graphs_path()),
            "http://localhost:5000/api/Cashflow_Analytics/graphs"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let api = HttpApi::new("http://127.0.0.1:9");
        let state: crate::state::LoadState<_> = Section::PortfolioCommandCenter
            .page_view(api.fetch_graphs(Section::PortfolioCommandCenter).await);

        let message = state.error().unwrap_or_default();
        assert!(message.starts_with("Network error: "), "got {:?}", message);
    }

    #[tokio::test]
    async fn test_missing_summary_endpoint() {
        let api = HttpApi::new("http://127.0.0.1:9");
        let err = api.fetch_summary(Section::CashflowAnalytics).await.unwrap_err();
        assert_eq!(err, DashboardError::MissingEndpoint("summary".to_string()));
    }
}
