//! Pages
//!
//! Route-level components.

pub mod details;
pub mod graph_page;

pub use details::Details;
pub use graph_page::GraphPage;
