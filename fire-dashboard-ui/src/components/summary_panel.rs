//! Summary Panel Component
//!
//! KPI grid for the sidebar, fetched once on mount.

use fire_dashboard::pages::Section;
use fire_dashboard::summary::{PanelView, SummaryPanel as Panel};
use fire_dashboard::LoadState;
use leptos::*;

use crate::state::GlobalState;

/// KPI panel of a section
#[component]
pub fn SummaryPanel(section: Section, panel: Panel) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let summary = create_rw_signal(LoadState::Loading);

    // Fetch on mount; a late response after unmount is dropped
    let source = state.source.clone();
    spawn_local(async move {
        let result = source.summary(section).await;
        if let Err(e) = &result {
            web_sys::console::error_1(&format!("Failed to load dashboard summary: {}", e).into());
        }
        summary.try_set(LoadState::from(result));
    });

    view! {
        <div id="dashboard-summary">
            <div class="summary-header">
                <h3>{panel.heading()}</h3>
            </div>

            {move || match summary.with(|s| panel.view(s)) {
                PanelView::Loading(text) => view! { <div>{text}</div> }.into_view(),
                PanelView::Error(message) => view! { <div>{message}</div> }.into_view(),
                PanelView::Grid(rows) => view! {
                    <div class="summary-grid">
                        {rows
                            .into_iter()
                            .map(|row| {
                                let value = row.display_value();
                                view! {
                                    <div>{row.label}</div>
                                    <div>{value}</div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}
