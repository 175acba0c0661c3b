//! App Root Component
//!
//! Main application component with routing and global providers.

use fire_dashboard::pages::Section;
use fire_dashboard::DevConfig;
use leptos::*;
use leptos_router::*;

use crate::components::Sidebar;
use crate::pages::{Details, GraphPage};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App(dev: DevConfig) -> impl IntoView {
    // Provide global state to all components
    provide_global_state(dev);

    view! {
        <Router>
            <div class="app-container">
                <Sidebar />

                <Routes>
                    <Route path="/" view=|| view! { <GraphPage section=Section::PortfolioCommandCenter /> } />
                    <Route path="/allocation" view=|| view! { <GraphPage section=Section::AllocationMatrix /> } />
                    <Route path="/cashflow" view=|| view! { <GraphPage section=Section::CashflowAnalytics /> } />
                    <Route path="/allocation_matrix/:graph_id/details" view=Details />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="main">
            <div class="page-status">
                <h1>"Page Not Found"</h1>
                <p>"The page you're looking for doesn't exist."</p>
                <A href="/">"Go to Portfolio Command Center"</A>
            </div>
        </div>
    }
}
