//! Graph Container
//!
//! State of a single chart box: display mode, measured size, and the layout
//! handed to Plotly. The UI feeds it DOM events (resize, title click, back
//! click, user zoom/pan); the container answers with the layout to draw.
//!
//! ## Layout retention
//!
//! The base layout starts as the figure's own layout. User relayouts
//! (zoom, pan) are written into it, so they survive resizes and fullscreen
//! toggles. A different figure replaces the base and discards them.

use serde_json::{Map, Value};

use crate::figure::Figure;
use crate::layout::{self, FontSizes, LayoutPatch};

/// Height reserved for the title strip above the plot
pub const TITLE_HEIGHT: f64 = 35.0;

/// Viewport width at which fullscreen fonts are drawn at their base size
pub const FULLSCREEN_BASE_WIDTH: f64 = 1000.0;

/// Upper bound on the fullscreen font scale
pub const MAX_FULLSCREEN_SCALE: f64 = 2.5;

/// Delay before the first measurement after mount, in milliseconds
pub const INITIAL_MEASURE_DELAY_MS: u32 = 10;

/// Presentation mode of a graph container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    Fullscreen,
}

/// Content box of the container (bounding box minus padding)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Content box from a bounding box and its paddings
    pub fn from_box(width: f64, height: f64, padding: Padding) -> Self {
        Self {
            width: width - padding.left - padding.right,
            height: height - padding.top - padding.bottom,
        }
    }

    /// Whether there is anything to draw into
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// CSS paddings of the container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel size of the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

/// Font scale for a display mode and viewport width
pub fn font_scale(mode: DisplayMode, viewport_width: f64) -> f64 {
    match mode {
        DisplayMode::Normal => 1.0,
        DisplayMode::Fullscreen => (viewport_width / FULLSCREEN_BASE_WIDTH).min(MAX_FULLSCREEN_SCALE),
    }
}

/// State of one chart box
#[derive(Debug, Clone, PartialEq)]
pub struct GraphContainer {
    figure: Figure,
    base_layout: Map<String, Value>,
    mode: DisplayMode,
    size: ContainerSize,
    viewport_width: f64,
}

impl GraphContainer {
    /// Container for a figure, in normal mode and not yet measured
    pub fn new(figure: Figure) -> Self {
        let base_layout = figure.layout.clone();
        Self {
            figure,
            base_layout,
            mode: DisplayMode::Normal,
            size: ContainerSize::default(),
            viewport_width: 0.0,
        }
    }

    /// The figure being shown
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Traces to draw
    pub fn data(&self) -> &[Value] {
        &self.figure.data
    }

    /// Current display mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode == DisplayMode::Fullscreen
    }

    /// Last measured content box
    pub fn size(&self) -> ContainerSize {
        self.size
    }

    /// Base layout including retained user modifications
    pub fn base_layout(&self) -> &Map<String, Value> {
        &self.base_layout
    }

    /// Swap in a figure. A different figure resets the base layout and
    /// drops user modifications; returns whether that happened.
    pub fn set_figure(&mut self, figure: Figure) -> bool {
        if figure == self.figure {
            return false;
        }
        tracing::debug!(traces = figure.trace_count(), "Figure changed, resetting layout");
        self.base_layout = figure.layout.clone();
        self.figure = figure;
        true
    }

    /// Title clicked: enter fullscreen. Returns whether the mode changed.
    pub fn activate_title(&mut self) -> bool {
        if self.mode == DisplayMode::Fullscreen {
            return false;
        }
        self.mode = DisplayMode::Fullscreen;
        true
    }

    /// Back control clicked: leave fullscreen. Returns whether the mode changed.
    pub fn activate_back(&mut self) -> bool {
        if self.mode == DisplayMode::Normal {
            return false;
        }
        self.mode = DisplayMode::Normal;
        true
    }

    /// Record a new content box measurement
    pub fn resize(&mut self, size: ContainerSize) {
        self.size = size;
    }

    /// Record the window's inner width
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Retain an interactive relayout (Plotly `plotly_relayout` event data)
    ///
    /// Keys are relayout paths such as `xaxis.range[0]`. Paths the container
    /// computes itself are skipped. Returns the number of fields retained.
    pub fn apply_user_relayout(&mut self, update: &Map<String, Value>) -> usize {
        let mut retained = 0;
        for (path, value) in update {
            if LayoutPatch::owns_path(path) {
                continue;
            }
            if layout::set_path(&mut self.base_layout, path, value.clone()) {
                self.sync_autorange(path, value);
                retained += 1;
            } else {
                tracing::debug!(path = %path, "Ignoring malformed relayout path");
            }
        }
        retained
    }

    /// Keep `<axis>.range` and `<axis>.autorange` exclusive, as Plotly does
    ///
    /// An explicit range turns autorange off; autorange on drops the range.
    fn sync_autorange(&mut self, path: &str, value: &Value) {
        let Some((axis, attr)) = path.split_once('.') else {
            return;
        };
        if !(axis.starts_with("xaxis") || axis.starts_with("yaxis")) {
            return;
        }

        if attr == "range" || attr.starts_with("range[") {
            let autorange = format!("{}.autorange", axis);
            layout::set_path(&mut self.base_layout, &autorange, Value::Bool(false));
        } else if attr == "autorange" && value.as_bool() == Some(true) {
            if let Some(Value::Object(settings)) = self.base_layout.get_mut(axis) {
                settings.remove("range");
            }
        }
    }

    /// Font scale for the current mode and viewport
    pub fn font_scale(&self) -> f64 {
        font_scale(self.mode, self.viewport_width)
    }

    /// Plot area: content width by content height minus the title strip
    pub fn plot_size(&self) -> Option<PlotSize> {
        if self.size.width <= 0.0 {
            return None;
        }
        Some(PlotSize {
            width: self.size.width,
            height: (self.size.height - TITLE_HEIGHT).max(0.0),
        })
    }

    /// Patch computed from the figure's fonts and the current geometry
    pub fn layout_patch(&self) -> LayoutPatch {
        let plot = self.plot_size();
        LayoutPatch {
            fonts: Some(FontSizes::from_layout(&self.figure.layout).scaled(self.font_scale())),
            width: plot.map(|p| p.width),
            height: plot.map(|p| p.height),
            autosize: Some(false),
        }
    }

    /// Layout to draw, or `None` until the container has been measured
    pub fn current_layout(&self) -> Option<Map<String, Value>> {
        if !self.size.is_measured() {
            return None;
        }
        Some(layout::merge_patch(&self.base_layout, &self.layout_patch()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::get_path;
    use serde_json::json;

    fn figure(value: Value) -> Figure {
        Figure::from_value(value).unwrap()
    }

    fn measured(figure: Figure) -> GraphContainer {
        let mut graph = GraphContainer::new(figure);
        graph.resize(ContainerSize::new(800.0, 435.0));
        graph.set_viewport_width(1600.0);
        graph
    }

    fn size_at(layout: &Map<String, Value>, path: &str) -> f64 {
        get_path(layout, path).and_then(Value::as_f64).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let graph = GraphContainer::new(Figure::default());
        assert_eq!(graph.mode(), DisplayMode::Normal);
        assert_eq!(graph.size(), ContainerSize::default());
        assert!(graph.current_layout().is_none());
        assert!(graph.plot_size().is_none());
    }

    #[test]
    fn test_font_scale_modes() {
        assert_eq!(font_scale(DisplayMode::Normal, 5000.0), 1.0);
        assert_eq!(font_scale(DisplayMode::Fullscreen, 1500.0), 1.5);
        assert_eq!(font_scale(DisplayMode::Fullscreen, 800.0), 0.8);
        assert_eq!(font_scale(DisplayMode::Fullscreen, 3840.0), 2.5);
    }

    #[test]
    fn test_normal_layout_uses_defaults_and_geometry() {
        let graph = measured(figure(json!({"data": [], "layout": {"font": {"size": 16}}})));
        let layout = graph.current_layout().unwrap();

        assert_eq!(size_at(&layout, "font.size"), 16.0);
        assert_eq!(size_at(&layout, "title.font.size"), 14.0);
        assert_eq!(size_at(&layout, "xaxis.title.font.size"), 12.0);
        assert_eq!(size_at(&layout, "xaxis.tickfont.size"), 10.0);
        assert_eq!(size_at(&layout, "yaxis.title.font.size"), 12.0);
        assert_eq!(size_at(&layout, "yaxis.tickfont.size"), 10.0);
        assert_eq!(size_at(&layout, "legend.font.size"), 14.0);
        assert_eq!(layout["width"], 800.0);
        assert_eq!(layout["height"], 400.0);
        assert_eq!(layout["autosize"], false);
    }

    #[test]
    fn test_fullscreen_scales_fonts() {
        let mut graph = measured(figure(json!({"layout": {}})));
        assert!(graph.activate_title());
        assert!(graph.is_fullscreen());
        assert_eq!(graph.font_scale(), 1.6);

        let layout = graph.current_layout().unwrap();
        assert_eq!(size_at(&layout, "legend.font.size"), 14.0 * 1.6);
        assert_eq!(size_at(&layout, "xaxis.tickfont.size"), 10.0 * 1.6);
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut graph = GraphContainer::new(Figure::default());
        assert!(!graph.activate_back());
        assert!(graph.activate_title());
        assert!(!graph.activate_title());
        assert!(graph.activate_back());
        assert_eq!(graph.mode(), DisplayMode::Normal);
        assert!(graph.activate_title());
    }

    #[test]
    fn test_user_zoom_survives_toggles() {
        let fig = figure(json!({"layout": {"xaxis": {"title": "Date"}}}));
        let mut graph = measured(fig.clone());

        let zoom = json!({"xaxis.range[0]": "2024-01-01", "xaxis.range[1]": "2024-06-30", "width": 1});
        let retained = graph.apply_user_relayout(zoom.as_object().unwrap());
        assert_eq!(retained, 2);

        let before = graph.current_layout().unwrap();
        for _ in 0..3 {
            graph.activate_title();
            graph.resize(ContainerSize::new(1600.0, 900.0));
            graph.activate_back();
            graph.resize(ContainerSize::new(800.0, 435.0));
            assert!(!graph.set_figure(fig.clone()));
        }
        let after = graph.current_layout().unwrap();

        assert_eq!(before, after);
        assert_eq!(after["xaxis"]["range"], json!(["2024-01-01", "2024-06-30"]));
        assert_eq!(after["xaxis"]["title"]["text"], "Date");
        assert_eq!(after["width"], 800.0);
    }

    #[test]
    fn test_zoom_after_axis_reset_survives_toggle() {
        let mut graph = measured(figure(json!({"layout": {"xaxis": {"title": "Date"}}})));

        graph.apply_user_relayout(json!({"xaxis.range[0]": 1, "xaxis.range[1]": 2}).as_object().unwrap());
        graph.apply_user_relayout(json!({"xaxis.autorange": true}).as_object().unwrap());
        let reset = graph.current_layout().unwrap();
        assert_eq!(reset["xaxis"]["autorange"], true);
        assert!(get_path(&reset, "xaxis.range").is_none());

        graph.apply_user_relayout(json!({"xaxis.range[0]": 3, "xaxis.range[1]": 4}).as_object().unwrap());
        graph.activate_title();
        graph.resize(ContainerSize::new(1600.0, 900.0));
        graph.activate_back();
        graph.resize(ContainerSize::new(800.0, 435.0));

        let layout = graph.current_layout().unwrap();
        assert_eq!(layout["xaxis"]["range"], json!([3, 4]));
        assert_eq!(layout["xaxis"]["autorange"], false);
        assert_eq!(layout["xaxis"]["title"]["text"], "Date");
    }

    #[test]
    fn test_new_figure_discards_user_layout() {
        let mut graph = measured(figure(json!({"layout": {"title": {"text": "Old"}}})));
        graph.apply_user_relayout(json!({"yaxis.range": [0, 5]}).as_object().unwrap());
        graph.activate_title();

        let replacement = figure(json!({"data": [{"y": [1]}], "layout": {"title": {"text": "New"}}}));
        assert!(graph.set_figure(replacement.clone()));

        assert!(graph.is_fullscreen());
        assert_eq!(graph.base_layout(), &replacement.layout);
        let layout = graph.current_layout().unwrap();
        assert!(get_path(&layout, "yaxis.range").is_none());
        assert_eq!(layout["title"]["text"], "New");
    }

    #[test]
    fn test_encoded_and_object_figures_render_identically() {
        let value = json!({
            "data": [{"type": "scatter", "y": [1, 2, 3]}],
            "layout": {"legend": {"font": {"size": 9}}, "title": "Savings"}
        });
        let from_object = measured(figure(value.clone()));
        let from_string = measured(figure(Value::String(value.to_string())));

        assert_eq!(from_object.current_layout(), from_string.current_layout());
        assert_eq!(from_object.data(), from_string.data());
    }

    #[test]
    fn test_short_container_floors_plot_height() {
        let mut graph = GraphContainer::new(Figure::default());
        graph.resize(ContainerSize::new(300.0, 20.0));
        assert_eq!(graph.plot_size(), Some(PlotSize { width: 300.0, height: 0.0 }));
    }

    #[test]
    fn test_content_box_subtracts_padding() {
        let padding = Padding { top: 8.0, right: 10.0, bottom: 8.0, left: 10.0 };
        let size = ContainerSize::from_box(620.0, 416.0, padding);
        assert_eq!(size, ContainerSize::new(600.0, 400.0));
    }
}
