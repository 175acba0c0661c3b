//! Graph Container Component
//!
//! One chart box: clickable title, Plotly plot sized to the measured box,
//! fullscreen mode with a back button.

use fire_dashboard::graph::{
    font_scale, ContainerSize, GraphContainer as GraphState, Padding, INITIAL_MEASURE_DELAY_MS,
};
use fire_dashboard::Figure;
use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ResizeObserver};

use super::plotly::{self, PlotListener};

/// Chart box for a single figure
#[component]
pub fn GraphContainer(
    /// Figure to draw; a different figure resets user zoom and pan
    #[prop(into)]
    figure: MaybeSignal<Figure>,
    /// Title markup (icon + text)
    #[prop(into)]
    title_html: String,
    /// Called with the clicked trace's name
    #[prop(default = None)]
    on_plot_click: Option<Callback<String>>,
    /// Start in fullscreen mode
    #[prop(optional)]
    fullscreen: bool,
) -> impl IntoView {
    let mut initial = GraphState::new(figure.get_untracked());
    if fullscreen {
        initial.activate_title();
    }
    let graph = create_rw_signal(initial);
    let mode = create_memo(move |_| graph.with(|g| g.mode()));

    let container_ref = create_node_ref::<html::Div>();
    let plot_ref = create_node_ref::<html::Div>();

    let timer = store_value(None::<Timeout>);
    let observer = store_value(None::<(ResizeObserver, Closure<dyn FnMut()>)>);
    let listeners = store_value(Vec::<PlotListener>::new());

    // New figure from the parent
    create_effect(move |_| {
        let next = figure.get();
        graph.try_update(|g| {
            g.set_figure(next);
        });
    });

    // Measure after first render and whenever the mode flips, then follow
    // the box with a ResizeObserver
    create_effect(move |_| {
        let _ = mode.get();
        let Some(container) = container_ref.get() else {
            return;
        };
        let element: HtmlElement = (*container).clone().into();

        let delayed = element.clone();
        timer.set_value(Some(Timeout::new(INITIAL_MEASURE_DELAY_MS, move || {
            update_size(graph, &delayed);
        })));

        let observed = element.clone();
        let callback = Closure::wrap(Box::new(move || {
            update_size(graph, &observed);
        }) as Box<dyn FnMut()>);

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(resize_observer) => {
                resize_observer.observe(&element);
                observer.update_value(|slot| {
                    if let Some((previous, _)) = slot.replace((resize_observer, callback)) {
                        previous.disconnect();
                    }
                });
            }
            Err(e) => {
                web_sys::console::error_1(&format!("ResizeObserver unavailable: {:?}", e).into());
            }
        }
    });

    // Draw whenever the computed layout changes
    create_effect(move |_| {
        let Some(layout) = graph.with(|g| g.current_layout()) else {
            return;
        };
        let Some(plot) = plot_ref.get() else {
            return;
        };
        let element: HtmlElement = (*plot).clone().into();

        let drawn = graph.with_untracked(|g| plotly::react(&element, g.data(), &layout));
        if let Err(e) = drawn {
            web_sys::console::error_1(&format!("Failed to draw plot: {}", e).into());
            return;
        }

        // Plotly's event emitter exists once the div has been drawn into
        if listeners.with_value(|l| l.is_empty()) {
            let mut registered = vec![plotly::on_relayout(&element, move |update| {
                graph.try_update(|g| g.apply_user_relayout(&update));
            })];
            if let Some(callback) = on_plot_click {
                registered.push(plotly::on_click(&element, move |name| callback.call(name)));
            }
            listeners.set_value(registered);
        }
    });

    on_cleanup(move || {
        timer.try_update_value(|t| t.take());
        observer.try_update_value(|slot| {
            if let Some((resize_observer, _)) = slot.take() {
                resize_observer.disconnect();
            }
        });
        if let Some(plot) = plot_ref.get_untracked() {
            let element: HtmlElement = (*plot).clone().into();
            plotly::purge(&element);
        }
        listeners.try_update_value(|l| l.clear());
    });

    let on_title_click = move |_| {
        graph.update(|g| {
            g.activate_title();
        });
    };

    let on_back_click = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        graph.update(|g| {
            g.activate_back();
        });
    };

    view! {
        <div
            node_ref=container_ref
            class=move || {
                if graph.with(|g| g.is_fullscreen()) {
                    "graph-container graph-fullscreen"
                } else {
                    "graph-container"
                }
            }
        >
            <button
                class="back-button"
                on:click=on_back_click
                style=move || if graph.with(|g| g.is_fullscreen()) { "display: block;" } else { "display: none;" }
            >
                "Back"
            </button>

            <div class="graph-title" inner_html=title_html on:click=on_title_click />

            <div
                node_ref=plot_ref
                style=move || {
                    graph
                        .with(|g| g.plot_size())
                        .map(|p| format!("width: {}px; height: {}px;", p.width, p.height))
                        .unwrap_or_else(|| "display: none;".to_string())
                }
            />
        </div>
    }
}

/// Measure the content box and the viewport into the container state
fn update_size(graph: RwSignal<GraphState>, element: &HtmlElement) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let rect = element.get_bounding_client_rect();
    let padding = match window.get_computed_style(element) {
        Ok(Some(style)) => {
            let px = |name: &str| {
                style
                    .get_property_value(name)
                    .ok()
                    .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
                    .unwrap_or(0.0)
            };
            Padding {
                top: px("padding-top"),
                right: px("padding-right"),
                bottom: px("padding-bottom"),
                left: px("padding-left"),
            }
        }
        _ => Padding::default(),
    };
    let size = ContainerSize::from_box(rect.width(), rect.height(), padding);
    let viewport = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);

    let changed = graph
        .try_with_untracked(|g| g.size() != size || g.font_scale() != font_scale(g.mode(), viewport))
        .unwrap_or(false);
    if changed {
        graph.try_update(|g| {
            g.resize(size);
            g.set_viewport_width(viewport);
        });
    }
}
