//! FIRE Dashboard
//!
//! Personal-finance dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Portfolio Command Center, Allocation Matrix and Cashflow Analytics pages
//! - KPI summary panels in the sidebar
//! - Plotly charts with a fullscreen mode and responsive fonts
//! - Drill-down detail pages
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page catalog, layout computation and formatting live in the
//! `fire-dashboard` core crate; this crate owns the DOM, Plotly and fetching.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Development flags are fixed before the first render
    let dev = state::bootstrap();

    mount_to_body(move || view! { <app::App dev=dev /> });
}
