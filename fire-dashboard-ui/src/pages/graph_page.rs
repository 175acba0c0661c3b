//! Graph Page
//!
//! One dashboard section: fetch its graph set on mount and lay out a graph
//! container per known key in the section's display order.

use fire_dashboard::pages::{self, Section, ERROR_PREFIX, GRAPHS_LOADING_TEXT};
use fire_dashboard::LoadState;
use leptos::*;

use crate::components::{GraphContainer, Loading, PageError};
use crate::state::GlobalState;

/// Page for a dashboard section
#[component]
pub fn GraphPage(section: Section) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let page = create_rw_signal(LoadState::Loading);

    // Fetch on mount; a late response after unmount is dropped
    let source = state.source.clone();
    spawn_local(async move {
        let result = source.graphs(section).await;
        if let Err(e) = &result {
            web_sys::console::error_1(&format!("Failed to load graphs: {}", e).into());
        }
        page.try_set(section.page_view(result));
    });

    move || match page.get() {
        LoadState::Loading => view! { <Loading text=GRAPHS_LOADING_TEXT /> }.into_view(),
        LoadState::Failed(message) => {
            view! { <PageError message=format!("{}{}", ERROR_PREFIX, message) /> }.into_view()
        }
        LoadState::Ready(placed) => view! {
            <div id="graphs-area" class="main">
                {placed
                    .into_iter()
                    .map(|graph| {
                        let key = graph.key.clone();
                        let on_plot_click = pages::is_drilldown(&key).then(|| {
                            Callback::new(move |sub_type: String| open_drilldown(&key, &sub_type))
                        });
                        view! {
                            <GraphContainer
                                figure=graph.figure
                                title_html=graph.title_html
                                on_plot_click=on_plot_click
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),
    }
}

/// Open a graph's detail page for a clicked trace in a new tab
fn open_drilldown(key: &str, sub_type: &str) {
    let Some(route) = pages::drilldown_route(key, sub_type) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(&route, "_blank") {
            web_sys::console::error_1(&format!("Failed to open {}: {:?}", route, e).into());
        }
    }
}
