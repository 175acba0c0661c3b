//! Details Page
//!
//! Drill-down view of one graph for one asset sub-type, shown fullscreen.

use fire_dashboard::pages::{self, ERROR_PREFIX};
use fire_dashboard::LoadState;
use leptos::*;
use leptos_router::*;

use crate::components::{GraphContainer, Loading, PageError};
use crate::state::GlobalState;

/// `/allocation_matrix/:graph_id/details?sub_type=`
#[component]
pub fn Details() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let query = use_query_map();

    let graph_id = move || params.with(|p| p.get("graph_id").cloned().unwrap_or_default());
    let sub_type = move || query.with(|q| q.get("sub_type").cloned());

    let details = create_rw_signal(LoadState::Loading);

    // Refetch when the route parameters change
    create_effect(move |_| {
        let graph_id = graph_id();
        let sub_type = sub_type();
        let source = state.source.clone();
        details.try_set(LoadState::Loading);

        spawn_local(async move {
            let result = source.details(&graph_id, sub_type.as_deref()).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to load details: {}", e).into());
            }
            details.try_set(LoadState::from(result));
        });
    });

    move || match details.get() {
        LoadState::Loading => view! { <Loading /> }.into_view(),
        LoadState::Failed(message) => {
            view! { <PageError message=format!("{}{}", ERROR_PREFIX, message) /> }.into_view()
        }
        LoadState::Ready(figure) => {
            let title = pages::escape_html(&pages::details_title(&graph_id(), sub_type().as_deref()));
            view! { <GraphContainer figure=figure title_html=title fullscreen=true /> }.into_view()
        }
    }
}
