//! Plotly Bindings
//!
//! Thin wrappers over the global `Plotly` object loaded by `index.html`.

use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = react)]
    fn plotly_react(root: &HtmlElement, data: &JsValue, layout: &JsValue, config: &JsValue);

    #[wasm_bindgen(js_namespace = Plotly, js_name = purge)]
    fn plotly_purge(root: &HtmlElement);

    /// A div Plotly has drawn into; Plotly attaches an event emitter to it
    #[wasm_bindgen(extends = HtmlElement)]
    type PlotDiv;

    #[wasm_bindgen(method)]
    fn on(this: &PlotDiv, event: &str, handler: &js_sys::Function);
}

/// Handler kept alive for as long as its listener is registered
pub type PlotListener = Closure<dyn FnMut(JsValue)>;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| format!("Serialize error: {}", e))?;
    js_sys::JSON::parse(&json).map_err(|e| format!("JSON error: {:?}", e))
}

/// Draw or update a plot in place
pub fn react(root: &HtmlElement, data: &[Value], layout: &Map<String, Value>) -> Result<(), String> {
    let config = serde_json::json!({"responsive": false, "displayModeBar": false});
    plotly_react(root, &to_js(data)?, &to_js(layout)?, &to_js(&config)?);
    Ok(())
}

/// Release Plotly's resources on a div
pub fn purge(root: &HtmlElement) {
    plotly_purge(root);
}

/// Listen for interactive zoom/pan/legend changes. The handler receives the
/// update as relayout paths (`xaxis.range[0]`, ...).
pub fn on_relayout(root: &HtmlElement, mut handler: impl FnMut(Map<String, Value>) + 'static) -> PlotListener {
    let listener = Closure::wrap(Box::new(move |event: JsValue| {
        let parsed = js_sys::JSON::stringify(&event)
            .ok()
            .and_then(|text| text.as_string())
            .and_then(|text| serde_json::from_str::<Map<String, Value>>(&text).ok());
        if let Some(update) = parsed {
            handler(update);
        }
    }) as Box<dyn FnMut(JsValue)>);

    root.unchecked_ref::<PlotDiv>()
        .on("plotly_relayout", listener.as_ref().unchecked_ref());
    listener
}

/// Listen for clicks on data points. The handler receives the clicked
/// trace's name.
pub fn on_click(root: &HtmlElement, mut handler: impl FnMut(String) + 'static) -> PlotListener {
    let listener = Closure::wrap(Box::new(move |event: JsValue| {
        // Event points reference Plotly internals and cannot be serialized
        if let Some(name) = clicked_trace_name(&event) {
            handler(name);
        }
    }) as Box<dyn FnMut(JsValue)>);

    root.unchecked_ref::<PlotDiv>()
        .on("plotly_click", listener.as_ref().unchecked_ref());
    listener
}

fn clicked_trace_name(event: &JsValue) -> Option<String> {
    let points = js_sys::Reflect::get(event, &"points".into()).ok()?;
    let first = points.dyn_into::<js_sys::Array>().ok()?.get(0);
    let trace = js_sys::Reflect::get(&first, &"data".into()).ok()?;
    js_sys::Reflect::get(&trace, &"name".into()).ok()?.as_string()
}
