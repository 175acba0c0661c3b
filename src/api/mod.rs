//! Dashboard API Client
//!
//! Read-only access to the backend's precomputed summaries and figures.
//!
//! # Endpoints
//!
//! - `GET /api/Portfolio_Command_Center/summary` - KPI summary
//! - `GET /api/Portfolio_Command_Center/graphs` - Graph set
//! - `GET /api/Allocation_Matrix/summary` - KPI summary
//! - `GET /api/Allocation_Matrix/graphs` - Graph set
//! - `GET /api/Allocation_Matrix/details?graph_id=&sub_type=` - Detail figure
//! - `GET /api/Cashflow_Analytics/graphs` - Graph set
//!
//! No caching, retries or timeouts: every call hits the backend once and
//! its failure is final for the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use fire_dashboard::api::{connect, DashboardApi};
//! use fire_dashboard::{Config, Section};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = connect(&Config::default());
//!     let graphs = api.fetch_graphs(Section::PortfolioCommandCenter).await?;
//!     println!("{} graphs", graphs.len());
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod mock;

#[cfg(feature = "native")]
mod http;

pub use dto::{decode_details, decode_graphs, decode_summary, GraphsEnvelope, SummaryEnvelope};
pub use mock::MockApi;

#[cfg(feature = "native")]
pub use http::HttpApi;

#[cfg(feature = "native")]
use crate::config::Config;
#[cfg(feature = "native")]
use crate::error::DashboardResult;
#[cfg(feature = "native")]
use crate::figure::{Figure, GraphSet};
#[cfg(feature = "native")]
use crate::pages::Section;
#[cfg(feature = "native")]
use crate::summary::Summary;

/// Source of dashboard data
#[cfg(feature = "native")]
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the KPI summary of a section
    async fn fetch_summary(&self, section: Section) -> DashboardResult<Summary>;

    /// Fetch the graph set of a section
    async fn fetch_graphs(&self, section: Section) -> DashboardResult<GraphSet>;

    /// Fetch a drill-down figure
    async fn fetch_details(&self, graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure>;
}

/// Build the data source for a configuration: fixtures when development
/// mocking is on, the HTTP backend otherwise
#[cfg(feature = "native")]
pub fn connect(config: &Config) -> Box<dyn DashboardApi> {
    if config.dev.mocking_enabled() {
        tracing::info!("Development mocking enabled, serving fixtures");
        Box::new(MockApi::new())
    } else {
        tracing::info!("Using backend at {}", config.api.base_url);
        Box::new(HttpApi::new(&config.api.base_url))
    }
}
