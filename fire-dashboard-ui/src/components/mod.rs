//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod graph_container;
pub mod loading;
pub mod plotly;
pub mod sidebar;
pub mod summary_panel;

pub use graph_container::GraphContainer;
pub use loading::{Loading, PageError};
pub use sidebar::Sidebar;
pub use summary_panel::SummaryPanel;
