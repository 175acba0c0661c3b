//! State Management
//!
//! Startup configuration shared with every component.

pub mod global;

pub use global::{bootstrap, provide_global_state, GlobalState};
