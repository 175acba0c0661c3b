//! Loading Component
//!
//! Status lines shown while a page fetches or after it failed.

use leptos::*;

/// Placeholder while a fetch is in flight
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    text: &'static str,
) -> impl IntoView {
    view! {
        <div class="main">
            <div class="page-status">{text}</div>
        </div>
    }
}

/// Page-level error message
#[component]
pub fn PageError(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="main">
            <div class="page-status error">{message}</div>
        </div>
    }
}
