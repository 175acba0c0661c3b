//! Page Catalog
//!
//! The dashboard sections, their endpoints, graph display order and titles.
//! Display order is fixed per page and never derived from the fetched
//! graph set; keys the page does not list are ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult};
use crate::figure::{Figure, GraphSet};
use crate::state::LoadState;
use crate::summary::SummaryPanel;

/// Text shown while a page's graphs are loading
pub const GRAPHS_LOADING_TEXT: &str = "Loading graphs...";

/// Prefix for page-level error messages
pub const ERROR_PREFIX: &str = "Error: ";

/// Graph keys whose plot clicks open a detail page
pub const DRILLDOWN_KEYS: &[&str] = &["liquidity_horizon"];

/// A dashboard section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PortfolioCommandCenter,
    AllocationMatrix,
    CashflowAnalytics,
}

impl Section {
    /// All sections, in navigation order
    pub const ALL: [Section; 3] = [
        Section::PortfolioCommandCenter,
        Section::AllocationMatrix,
        Section::CashflowAnalytics,
    ];

    /// Backend path segment
    pub fn api_name(self) -> &'static str {
        match self {
            Section::PortfolioCommandCenter => "Portfolio_Command_Center",
            Section::AllocationMatrix => "Allocation_Matrix",
            Section::CashflowAnalytics => "Cashflow_Analytics",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Section::PortfolioCommandCenter => "Portfolio Command Center",
            Section::AllocationMatrix => "Allocation Matrix",
            Section::CashflowAnalytics => "Cashflow Analytics",
        }
    }

    /// Client-side route
    pub fn route(self) -> &'static str {
        match self {
            Section::PortfolioCommandCenter => "/",
            Section::AllocationMatrix => "/allocation",
            Section::CashflowAnalytics => "/cashflow",
        }
    }

    /// Graphs endpoint path
    pub fn graphs_path(self) -> String {
        format!("/api/{}/graphs", self.api_name())
    }

    /// Summary endpoint path; Cashflow Analytics has none
    pub fn summary_path(self) -> Option<String> {
        match self {
            Section::CashflowAnalytics => None,
            _ => Some(format!("/api/{}/summary", self.api_name())),
        }
    }

    /// KPI panel shown alongside the section
    pub fn summary_panel(self) -> Option<SummaryPanel> {
        match self {
            Section::PortfolioCommandCenter => Some(SummaryPanel::CommandCenter),
            Section::AllocationMatrix => Some(SummaryPanel::AllocationMatrix),
            Section::CashflowAnalytics => None,
        }
    }

    /// Graph keys in display order
    pub fn graph_order(self) -> &'static [&'static str] {
        match self {
            Section::PortfolioCommandCenter => &[
                "progress_rate",
                "saving_rate",
                "assets",
                "general_balance",
                "special_balance",
                "returns",
            ],
            Section::AllocationMatrix => &[
                "asset_tree_map",
                "target_deviation",
                "portfolio_efficiency_map",
                "liquidity_pyramid",
                "true_risk_exposure_flow",
                "rebalancing_workbench",
            ],
            Section::CashflowAnalytics => &["target_trajectory", "goal_imbalance_map"],
        }
    }

    /// Title entry for a key, if the section knows it
    pub fn title_entry(self, key: &str) -> Option<GraphTitle> {
        use Icon::*;

        let (icon, text) = match (self, key) {
            (Section::PortfolioCommandCenter, "progress_rate") => (Star, "FIRE Readiness"),
            (Section::PortfolioCommandCenter, "saving_rate") => (Sail, "Savings Efficiency"),
            (Section::PortfolioCommandCenter, "assets") => (Compass, "Net Worth Trajectory"),
            (Section::PortfolioCommandCenter, "returns") => (LineChart, "Portfolio Performance"),
            (Section::PortfolioCommandCenter, "general_balance") => (Waves, "Cash Flow – Routine"),
            (Section::PortfolioCommandCenter, "special_balance") => {
                (Lighthouse, "Cash Flow – Exceptional")
            }
            (Section::AllocationMatrix, "asset_tree_map") => (Star, "Interactive Treemap"),
            (Section::AllocationMatrix, "target_deviation") => (Sail, "Target Deviation"),
            (Section::AllocationMatrix, "portfolio_efficiency_map") => {
                (Compass, "Portfolio Efficiency Map")
            }
            (Section::AllocationMatrix, "liquidity_pyramid") => (LineChart, "Liquidity Pyramid"),
            (Section::AllocationMatrix, "true_risk_exposure_flow") => {
                (Waves, "True Risk Exposure Flow")
            }
            (Section::AllocationMatrix, "rebalancing_workbench") => {
                (Lighthouse, "Rebalancing Workbench")
            }
            (Section::CashflowAnalytics, "target_trajectory") => (Star, "Target Trajectory"),
            (Section::CashflowAnalytics, "goal_imbalance_map") => (Sail, "Goal Imbalance Map"),
            _ => return None,
        };
        Some(GraphTitle { icon, text })
    }

    /// Title markup for a key, falling back to the raw key
    pub fn title_html(self, key: &str) -> String {
        self.title_entry(key)
            .map(|title| title.to_html())
            .unwrap_or_else(|| key.to_string())
    }

    /// Plain title text for a key, falling back to the raw key
    pub fn title_text(self, key: &str) -> String {
        self.title_entry(key)
            .map(|title| title.text.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Lay out a fetched graph set: known keys in display order, absent
    /// keys skipped. A figure that fails to decode fails the page.
    pub fn place_graphs(self, graphs: &GraphSet) -> DashboardResult<Vec<PlacedGraph>> {
        self.graph_order()
            .iter()
            .filter_map(|key| graphs.figure(key).map(|figure| (*key, figure)))
            .map(|(key, figure)| {
                Ok(PlacedGraph {
                    key: key.to_string(),
                    title_html: self.title_html(key),
                    figure: figure?,
                })
            })
            .collect()
    }

    /// Page rendering for a graphs fetch result
    pub fn page_view(self, result: DashboardResult<GraphSet>) -> LoadState<Vec<PlacedGraph>> {
        result.and_then(|graphs| self.place_graphs(&graphs)).into()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_matches('/').to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "" | "portfolio" | "portfolio_command_center" | "command_center" => {
                Ok(Section::PortfolioCommandCenter)
            }
            "allocation" | "allocation_matrix" => Ok(Section::AllocationMatrix),
            "cashflow" | "cashflow_analytics" => Ok(Section::CashflowAnalytics),
            _ => Err(DashboardError::UnknownSection(s.to_string())),
        }
    }
}

/// Icons used in graph titles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Star,
    Sail,
    Compass,
    LineChart,
    Waves,
    Lighthouse,
}

impl Icon {
    fn file(self) -> &'static str {
        match self {
            Icon::Star => "star.svg",
            Icon::Sail => "sail.svg",
            Icon::Compass => "compass.svg",
            Icon::LineChart => "line-chart.svg",
            Icon::Waves => "waves.svg",
            Icon::Lighthouse => "lighthouse.svg",
        }
    }

    fn height_px(self) -> u32 {
        match self {
            Icon::Compass | Icon::LineChart => 20,
            _ => 18,
        }
    }

    /// Static asset path
    pub fn src(self) -> String {
        format!("/static/icon/{}", self.file())
    }
}

/// A graph's icon and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphTitle {
    pub icon: Icon,
    pub text: &'static str,
}

impl GraphTitle {
    /// Title markup with the inline icon
    pub fn to_html(&self) -> String {
        format!(
            "<span><img src='{}' style='height:{}px; margin-right:6px; opacity:0.85;'/> {}</span>",
            self.icon.src(),
            self.icon.height_px(),
            self.text
        )
    }
}

/// A graph ready to be placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGraph {
    pub key: String,
    pub title_html: String,
    pub figure: Figure,
}

// ============ Drill-down ============

/// Whether plot clicks on a graph open its detail page
pub fn is_drilldown(key: &str) -> bool {
    DRILLDOWN_KEYS.contains(&key)
}

/// Detail page link for a clicked trace, when the graph supports drill-down
pub fn drilldown_route(key: &str, sub_type: &str) -> Option<String> {
    if !is_drilldown(key) || sub_type.is_empty() {
        return None;
    }
    Some(format!(
        "/allocation_matrix/{}/details?sub_type={}",
        key,
        urlencoding::encode(sub_type)
    ))
}

/// Details endpoint path with encoded query
pub fn details_path(graph_id: &str, sub_type: Option<&str>) -> String {
    let mut path = format!(
        "/api/Allocation_Matrix/details?graph_id={}",
        urlencoding::encode(graph_id)
    );
    if let Some(sub_type) = sub_type {
        path.push_str("&sub_type=");
        path.push_str(&urlencoding::encode(sub_type));
    }
    path
}

/// Title of a detail page: `<graph name> - <sub type>`
pub fn details_title(graph_id: &str, sub_type: Option<&str>) -> String {
    let name = match graph_id {
        "liquidity_horizon" => "Liquidity Horizon",
        other => other,
    };
    format!("{} - {}", name, sub_type.unwrap_or_default())
}

/// Escape text for use inside title markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigurePayload;
    use serde_json::json;

    fn payload(title: &str) -> FigurePayload {
        FigurePayload::new(json!({"data": [], "layout": {"title": {"text": title}}}))
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            Section::PortfolioCommandCenter.graphs_path(),
            "/api/Portfolio_Command_Center/graphs"
        );
        assert_eq!(
            Section::AllocationMatrix.summary_path().as_deref(),
            Some("/api/Allocation_Matrix/summary")
        );
        assert_eq!(Section::CashflowAnalytics.summary_path(), None);
    }

    #[test]
    fn test_subset_renders_in_fixed_order() {
        let graphs = GraphSet::new()
            .with("returns", payload("r"))
            .with("unknown_extra", payload("x"))
            .with("progress_rate", payload("p"))
            .with("assets", payload("a"));

        let placed = Section::PortfolioCommandCenter.place_graphs(&graphs).unwrap();
        let keys: Vec<&str> = placed.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["progress_rate", "assets", "returns"]);
        assert!(placed[0].title_html.contains("FIRE Readiness"));
        assert!(placed[0].title_html.contains("/static/icon/star.svg"));
        assert!(placed[1].title_html.contains("height:20px"));
    }

    #[test]
    fn test_untitled_key_falls_back_to_raw_key() {
        assert_eq!(Section::CashflowAnalytics.title_html("liquidity_horizon"), "liquidity_horizon");
        assert_eq!(Section::AllocationMatrix.title_text("progress_rate"), "progress_rate");
        assert_eq!(Section::AllocationMatrix.title_text("asset_tree_map"), "Interactive Treemap");
    }

    #[test]
    fn test_bad_encoded_figure_fails_page() {
        let graphs = GraphSet::new().with("assets", FigurePayload::new(json!("{oops")));
        match Section::PortfolioCommandCenter.page_view(Ok(graphs)) {
            LoadState::Failed(message) => assert!(message.starts_with("Parse error")),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_is_surfaced_verbatim() {
        let state = Section::AllocationMatrix
            .page_view(Err(DashboardError::Network("connection refused".to_string())));
        assert_eq!(state.error(), Some("Network error: connection refused"));
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("allocation".parse::<Section>().unwrap(), Section::AllocationMatrix);
        assert_eq!(
            "Portfolio_Command_Center".parse::<Section>().unwrap(),
            Section::PortfolioCommandCenter
        );
        assert_eq!("/cashflow".parse::<Section>().unwrap(), Section::CashflowAnalytics);
        assert_eq!("cashflow-analytics".parse::<Section>().unwrap(), Section::CashflowAnalytics);
        assert!("performance".parse::<Section>().is_err());
    }

    #[test]
    fn test_drilldown_links() {
        assert_eq!(
            drilldown_route("liquidity_horizon", "Time Deposits").as_deref(),
            Some("/allocation_matrix/liquidity_horizon/details?sub_type=Time%20Deposits")
        );
        assert_eq!(drilldown_route("target_trajectory", "Bonds"), None);
        assert_eq!(drilldown_route("liquidity_horizon", ""), None);
    }

    #[test]
    fn test_details_path_and_title() {
        assert_eq!(
            details_path("liquidity_horizon", Some("Time Deposits")),
            "/api/Allocation_Matrix/details?graph_id=liquidity_horizon&sub_type=Time%20Deposits"
        );
        assert_eq!(
            details_path("liquidity_horizon", None),
            "/api/Allocation_Matrix/details?graph_id=liquidity_horizon"
        );
        assert_eq!(
            details_title("liquidity_horizon", Some("Bonds")),
            "Liquidity Horizon - Bonds"
        );
        assert_eq!(details_title("other_graph", None), "other_graph - ");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<img src=x onerror='alert(1)'> & co"),
            "&lt;img src=x onerror=&#39;alert(1)&#39;&gt; &amp; co"
        );
        assert_eq!(escape_html("Liquidity Horizon - 債券"), "Liquidity Horizon - 債券");
    }
}
