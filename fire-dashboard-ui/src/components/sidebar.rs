//! Sidebar Component
//!
//! App title, section links and the KPI panel for the current page.

use fire_dashboard::nav::{self, APP_TITLE};
use leptos::*;
use leptos_router::*;

use super::SummaryPanel;

/// Navigation sidebar
#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let current = create_memo(move |_| nav::section_for_path(&location.pathname.get()));

    view! {
        <div class="sidebar">
            <h1>{APP_TITLE}</h1>

            <nav>
                {nav::links()
                    .into_iter()
                    .map(|link| view! {
                        <A href=link.href active_class="active" exact=true>
                            {link.label}
                        </A>
                    })
                    .collect_view()}
            </nav>

            // Remount per section so each panel fetches its own summary
            {move || {
                current.get().and_then(|section| {
                    section
                        .summary_panel()
                        .map(|panel| view! { <SummaryPanel section=section panel=panel /> })
                })
            }}
        </div>
    }
}
