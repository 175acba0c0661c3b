//! # FIRE Dashboard
//!
//! Personal-finance visualization client - fetches precomputed summaries and
//! Plotly chart definitions from a backend and turns them into dashboard pages.
//!
//! ## Features
//!
//! - **Graph containers**: responsive font scaling and a fullscreen mode that
//!   keeps user zoom and pan across toggles
//! - **KPI panels**: fixed key/value grids with trend glyphs
//! - **Page catalog**: three dashboard sections with fixed display order
//! - **Mock API**: in-process fixtures for development without a backend
//!
//! ## Modules
//!
//! - [`figure`]: Plotly figure model and graph sets
//! - [`layout`]: Font paths and the layout deep-merge
//! - [`graph`]: Graph container state machine
//! - [`summary`]: KPI summaries and panel formatting
//! - [`pages`]: Section catalog, titles and drill-down links
//! - [`nav`]: Sidebar links and route lookup
//! - [`api`]: Backend client and mock fixtures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fire_dashboard::api::{connect, DashboardApi};
//! use fire_dashboard::{Config, ContainerSize, GraphContainer, Section};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = connect(&Config::load_default());
//!
//!     let graphs = api.fetch_graphs(Section::PortfolioCommandCenter).await?;
//!     for placed in Section::PortfolioCommandCenter.place_graphs(&graphs)? {
//!         let mut graph = GraphContainer::new(placed.figure);
//!         graph.resize(ContainerSize::new(800.0, 435.0));
//!         println!("{}: {:?}", placed.key, graph.current_layout());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod figure;
pub mod graph;
pub mod layout;
pub mod nav;
pub mod pages;
pub mod state;
pub mod summary;

// Re-export top-level types for convenience
pub use error::{DashboardError, DashboardResult};

pub use figure::{Figure, FigurePayload, GraphSet};

pub use layout::{FontPath, FontSizes, LayoutPatch};

pub use graph::{ContainerSize, DisplayMode, GraphContainer, Padding, PlotSize};

pub use summary::{KpiRow, PanelView, Summary, SummaryPanel, Trend};

pub use pages::{PlacedGraph, Section};

pub use state::LoadState;

pub use config::{ApiConfig, Config, DevConfig, LoggingConfig};

#[cfg(feature = "native")]
pub use config::{ConfigError, ConfigLoad};

pub use api::MockApi;

#[cfg(feature = "native")]
pub use api::{DashboardApi, HttpApi};
