//! Dashboard error types
//!
//! Every failure a page, panel or CLI command can surface. The `Display`
//! output is what the user sees, verbatim.

use thiserror::Error;

/// Errors that can occur while fetching or decoding dashboard data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Transport failure (connection refused, DNS, aborted request)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// Response body or encoded figure was not valid JSON of the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// The section has no endpoint of the requested kind
    #[error("No {0} endpoint for this section")]
    MissingEndpoint(String),

    /// A section name that is not part of the catalog
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            DashboardError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            DashboardError::Parse(err.to_string())
        } else {
            DashboardError::Network(err.to_string())
        }
    }
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
