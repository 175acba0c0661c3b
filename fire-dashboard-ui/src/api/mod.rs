//! API Module
//!
//! Backend access for the pages: HTTP via `gloo-net`, or the core crate's
//! fixtures when development mocking is enabled.

pub mod client;

pub use client::*;

use fire_dashboard::pages::Section;
use fire_dashboard::{DashboardResult, DevConfig, Figure, GraphSet, MockApi, Summary};

/// Data source chosen at startup
#[derive(Debug, Clone)]
pub enum Source {
    Http,
    Mock(MockApi),
}

impl Source {
    pub fn for_dev(dev: DevConfig) -> Self {
        if dev.mocking_enabled() {
            Source::Mock(MockApi::new())
        } else {
            Source::Http
        }
    }

    pub async fn summary(&self, section: Section) -> DashboardResult<Summary> {
        match self {
            Source::Http => client::fetch_summary(section).await,
            Source::Mock(mock) => mock.summary(section),
        }
    }

    pub async fn graphs(&self, section: Section) -> DashboardResult<GraphSet> {
        match self {
            Source::Http => client::fetch_graphs(section).await,
            Source::Mock(mock) => mock.graphs(section),
        }
    }

    pub async fn details(&self, graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure> {
        match self {
            Source::Http => client::fetch_details(graph_id, sub_type).await,
            Source::Mock(mock) => mock.details(graph_id, sub_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_follows_dev_flags() {
        assert!(matches!(Source::for_dev(DevConfig::new(true, true)), Source::Mock(_)));
        assert!(matches!(Source::for_dev(DevConfig::new(false, true)), Source::Http));
        assert!(matches!(Source::for_dev(DevConfig::default()), Source::Http));
    }
}
