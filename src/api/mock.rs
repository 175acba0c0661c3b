//! Mock API
//!
//! In-process fixtures standing in for the backend while developing.
//! Selected at startup when both development flags are set (see
//! [`crate::config::DevConfig`]); nothing else refers to this module.

use chrono::{Datelike, Months, NaiveDate};
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::error::{DashboardError, DashboardResult};
use crate::figure::{Figure, FigurePayload, GraphSet};
use crate::pages::Section;
use crate::summary::{format_number, Summary};

/// Number of monthly points in the time-series fixtures
const FIXTURE_MONTHS: u32 = 12;

/// Fixture-backed API
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    failing: HashSet<Section>,
}

impl MockApi {
    /// Mock API serving every section
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every request for a section fail like a dropped connection
    pub fn with_failure(mut self, section: Section) -> Self {
        self.failing.insert(section);
        self
    }

    fn check(&self, section: Section) -> DashboardResult<()> {
        if self.failing.contains(&section) {
            return Err(DashboardError::Network(format!(
                "simulated failure for {}",
                section.api_name()
            )));
        }
        Ok(())
    }

    /// Summary fixture for a section
    pub fn summary(&self, section: Section) -> DashboardResult<Summary> {
        self.check(section)?;
        let path = section
            .summary_path()
            .ok_or_else(|| DashboardError::MissingEndpoint("summary".to_string()))?;
        tracing::debug!(path = %path, "Serving mock summary");
        Ok(sample_summary(section))
    }

    /// Graph set fixture for a section
    pub fn graphs(&self, section: Section) -> DashboardResult<GraphSet> {
        self.check(section)?;
        tracing::debug!(path = %section.graphs_path(), "Serving mock graphs");
        sample_graphs(section)
    }

    /// Detail figure fixture
    pub fn details(&self, graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure> {
        self.check(Section::AllocationMatrix)?;
        match graph_id {
            "liquidity_horizon" => Ok(liquidity_horizon_details(sub_type)),
            _ => Err(DashboardError::Status { status: 404 }),
        }
    }
}

#[cfg(feature = "native")]
#[async_trait::async_trait]
impl super::DashboardApi for MockApi {
    async fn fetch_summary(&self, section: Section) -> DashboardResult<Summary> {
        self.summary(section)
    }

    async fn fetch_graphs(&self, section: Section) -> DashboardResult<GraphSet> {
        self.graphs(section)
    }

    async fn fetch_details(&self, graph_id: &str, sub_type: Option<&str>) -> DashboardResult<Figure> {
        self.details(graph_id, sub_type)
    }
}

// ============================================
// SUMMARIES
// ============================================

fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or(NaiveDate::MIN)
}

/// Summary fixture matching the backend's field names
pub fn sample_summary(section: Section) -> Summary {
    let date = latest_date().format("%y/%m/%d").to_string();
    match section {
        Section::PortfolioCommandCenter => Summary::new()
            .with("latest_date", date)
            .with("fire_progress", 42.7)
            .with("fire_progress_vector", 1)
            .with("total_assets", 18_452_300)
            .with("total_assets_vector", 1)
            .with("total_target_assets", 19_800_000)
            .with("total_target_assets_vector", 0)
            .with("difference", -1_347_700)
            .with("difference_vector", -1),
        Section::AllocationMatrix => Summary::new()
            .with("latest_date", date)
            .with("active_growth_capital", 61.3)
            .with("active_growth_capital_vector", 1)
            .with("aggressive_return_exposure", 38.9)
            .with("aggressive_return_exposure_vector", 0)
            .with("emergency_buffer", 2_150_000)
            .with("emergency_buffer_vector", -1)
            .with("debt_exposure_ratio", 4.2)
            .with("debt_exposure_ratio_vector", 0),
        Section::CashflowAnalytics => Summary::new().with("latest_date", date),
    }
}

// ============================================
// GRAPHS
// ============================================

fn month_axis() -> Vec<String> {
    let latest = latest_date();
    (0..FIXTURE_MONTHS)
        .rev()
        .filter_map(|back| latest.checked_sub_months(Months::new(back)))
        .map(|date| format!("{}-{:02}", date.year(), date.month()))
        .collect()
}

fn series(start: f64, step: f64, wobble: f64) -> Vec<f64> {
    (0..FIXTURE_MONTHS)
        .map(|i| {
            let i = i as f64;
            (start + step * i + wobble * (i * 1.3).sin()).round()
        })
        .collect()
}

fn line(name: &str, x: &[String], y: Vec<f64>) -> Value {
    json!({"type": "scatter", "mode": "lines+markers", "name": name, "x": x, "y": y})
}

fn bar(name: &str, x: &[String], y: Vec<f64>) -> Value {
    json!({"type": "bar", "name": name, "x": x, "y": y})
}

fn layout(y_title: &str, tickprefix: &str) -> Value {
    json!({
        "template": "plotly_dark",
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "margin": {"l": 40, "r": 20, "t": 20, "b": 40},
        "xaxis": {"title": {"text": "Month"}, "tickformat": "%y/%m"},
        "yaxis": {"title": {"text": y_title}, "tickprefix": tickprefix},
        "legend": {"orientation": "h"}
    })
}

fn figure(data: Vec<Value>, layout: Value) -> Value {
    json!({ "data": data, "layout": layout })
}

/// Graph set fixture; every other figure is JSON-encoded like the backend does
pub fn sample_graphs(section: Section) -> DashboardResult<GraphSet> {
    let months = month_axis();
    let figures: Vec<(&str, Value)> = match section {
        Section::PortfolioCommandCenter => vec![
            (
                "progress_rate",
                figure(
                    vec![line("FIRE progress", &months, series(31.0, 1.0, 0.8))],
                    layout("Progress (%)", ""),
                ),
            ),
            (
                "saving_rate",
                figure(
                    vec![bar("Saving rate", &months, series(28.0, 0.4, 6.0))],
                    layout("Saving rate (%)", ""),
                ),
            ),
            (
                "assets",
                figure(
                    vec![
                        line("Net worth", &months, series(14_800_000.0, 330_000.0, 250_000.0)),
                        line("Target", &months, series(15_000_000.0, 430_000.0, 0.0)),
                    ],
                    layout("Amount", "¥"),
                ),
            ),
            (
                "general_balance",
                figure(
                    vec![
                        bar("Income", &months, series(420_000.0, 0.0, 15_000.0)),
                        bar("Expenditure", &months, series(-290_000.0, 0.0, 40_000.0)),
                    ],
                    layout("Amount", "¥"),
                ),
            ),
            (
                "special_balance",
                figure(
                    vec![bar("Exceptional", &months, series(0.0, 0.0, 180_000.0))],
                    layout("Amount", "¥"),
                ),
            ),
            (
                "returns",
                figure(
                    vec![line("Total return", &months, series(1_200_000.0, 90_000.0, 300_000.0))],
                    layout("Return", "¥"),
                ),
            ),
        ],
        Section::AllocationMatrix => vec![
            (
                "asset_tree_map",
                figure(
                    vec![json!({
                        "type": "treemap",
                        "labels": ["Risk Assets", "Safe Assets", "Domestic Stocks", "Mutual Funds", "Deposits"],
                        "parents": ["", "", "Risk Assets", "Risk Assets", "Safe Assets"],
                        "values": [0, 0, 4_200_000, 7_100_000, 5_300_000]
                    })],
                    json!({"margin": {"l": 0, "r": 0, "t": 0, "b": 0}}),
                ),
            ),
            (
                "target_deviation",
                figure(
                    vec![bar("Deviation", &months, series(-300_000.0, 40_000.0, 90_000.0))],
                    layout("Deviation", "¥"),
                ),
            ),
            (
                "portfolio_efficiency_map",
                figure(
                    vec![json!({
                        "type": "scatter",
                        "mode": "markers+text",
                        "x": [12.1, 18.4, 3.2, 0.4],
                        "y": [0.62, 0.81, 0.35, 0.05],
                        "text": ["Domestic Stocks", "Mutual Funds", "Bonds", "Deposits"]
                    })],
                    json!({
                        "xaxis": {"title": {"text": "Volatility (%)"}},
                        "yaxis": {"title": {"text": "Sharpe ratio"}}
                    }),
                ),
            ),
            (
                "liquidity_pyramid",
                figure(
                    vec![json!({
                        "type": "funnel",
                        "y": ["Immediate", "Within 1 month", "Within 1 year", "Long term"],
                        "x": [2_150_000, 3_800_000, 4_100_000, 8_400_000]
                    })],
                    json!({}),
                ),
            ),
            (
                "true_risk_exposure_flow",
                figure(
                    vec![json!({
                        "type": "sankey",
                        "node": {"label": ["Total", "Equity", "Credit", "Cash"]},
                        "link": {"source": [0, 0, 0], "target": [1, 2, 3], "value": [11.3, 3.1, 4.0]}
                    })],
                    json!({}),
                ),
            ),
            (
                "rebalancing_workbench",
                figure(
                    vec![
                        json!({
                            "type": "bar",
                            "name": "Current",
                            "x": ["Domestic Stocks", "Mutual Funds", "Bonds", "Deposits"],
                            "y": [34.0, 27.3, 22.5, 16.2]
                        }),
                        json!({
                            "type": "bar",
                            "name": "Target",
                            "x": ["Domestic Stocks", "Mutual Funds", "Bonds", "Deposits"],
                            "y": [30.0, 30.0, 25.0, 15.0]
                        }),
                    ],
                    json!({"barmode": "group", "yaxis": {"title": {"text": "Weight (%)"}}}),
                ),
            ),
            (
                "liquidity_horizon",
                figure(
                    vec![
                        bar("Time Deposits", &months, series(500_000.0, 0.0, 0.0)),
                        bar("Bonds", &months, series(800_000.0, 0.0, 0.0)),
                    ],
                    json!({"barmode": "stack"}),
                ),
            ),
        ],
        Section::CashflowAnalytics => vec![
            (
                "target_trajectory",
                figure(
                    vec![
                        line("Actual", &months, series(14_800_000.0, 330_000.0, 250_000.0)),
                        line("Target", &months, series(15_000_000.0, 430_000.0, 0.0)),
                    ],
                    layout("Amount", "¥"),
                ),
            ),
            (
                "goal_imbalance_map",
                figure(
                    vec![json!({
                        "type": "heatmap",
                        "x": months,
                        "y": ["Living", "Housing", "Leisure"],
                        "z": [series(0.0, 0.0, 20.0), series(5.0, 0.0, 5.0), series(-10.0, 1.0, 10.0)]
                    })],
                    json!({}),
                ),
            ),
        ],
    };

    let mut graphs = GraphSet::new();
    for (i, (key, value)) in figures.into_iter().enumerate() {
        let payload = if i % 2 == 0 {
            FigurePayload::new(value)
        } else {
            FigurePayload::new(Value::String(serde_json::to_string(&value)?))
        };
        graphs.insert(key, payload);
    }
    Ok(graphs)
}

// ============================================
// DETAILS
// ============================================

/// Table figure of maturing assets, filtered by English sub-type
fn liquidity_horizon_details(sub_type: Option<&str>) -> Figure {
    let rows = [
        ("Term Deposit A", "Time Deposits", "2025-06-30", 300_000),
        ("Term Deposit B", "Time Deposits", "2025-11-15", 200_000),
        ("JGB 10Y", "Bonds", "2025-09-20", 500_000),
        ("Corporate Bond X", "Bonds", "2026-01-31", 300_000),
    ];
    let selected: Vec<_> = rows
        .iter()
        .filter(|row| sub_type.map_or(true, |s| row.1 == s))
        .collect();

    let names: Vec<&str> = selected.iter().map(|row| row.0).collect();
    let sub_types: Vec<&str> = selected.iter().map(|row| row.1).collect();
    let maturities: Vec<&str> = selected.iter().map(|row| row.2).collect();
    let amounts: Vec<String> = selected
        .iter()
        .map(|row| format!("¥{}", format_number(row.3 as f64)))
        .collect();

    let value = json!({
        "data": [{
            "type": "table",
            "header": {"values": ["資産名", "資産サブタイプ", "償還日", "資産額"]},
            "cells": {"values": [names, sub_types, maturities, amounts]}
        }],
        "layout": {"meta": {"id": "liquidity_horizon"}}
    });

    Figure::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryPanel;

    #[test]
    fn test_fixtures_cover_every_ordered_key() {
        let api = MockApi::new();
        for section in Section::ALL {
            let graphs = api.graphs(section).unwrap();
            let placed = section.place_graphs(&graphs).unwrap();
            assert_eq!(placed.len(), section.graph_order().len(), "{} is missing graphs", section);
        }
    }

    #[test]
    fn test_fixture_summaries_fill_panels() {
        let api = MockApi::new();
        for section in Section::ALL {
            let Some(panel) = section.summary_panel() else {
                assert_eq!(
                    api.summary(section).unwrap_err(),
                    DashboardError::MissingEndpoint("summary".to_string())
                );
                continue;
            };
            let rows: Vec<_> = panel.rows(&api.summary(section).unwrap());
            assert!(rows.iter().all(|row| row.value != "-"));
        }
        let rows = SummaryPanel::CommandCenter.rows(&sample_summary(Section::PortfolioCommandCenter));
        assert_eq!(rows[0].value, "25/03/31");
    }

    #[test]
    fn test_simulated_failure() {
        let api = MockApi::new().with_failure(Section::CashflowAnalytics);
        let err = api.graphs(Section::CashflowAnalytics).unwrap_err();
        assert!(matches!(err, DashboardError::Network(_)));
        assert!(api.graphs(Section::AllocationMatrix).is_ok());
    }

    #[test]
    fn test_details_filter_by_sub_type() {
        let api = MockApi::new();
        let figure = api.details("liquidity_horizon", Some("Bonds")).unwrap();
        let names = &figure.data[0]["cells"]["values"][0];
        assert_eq!(names, &json!(["JGB 10Y", "Corporate Bond X"]));
        assert_eq!(
            api.details("unknown", None).unwrap_err(),
            DashboardError::Status { status: 404 }
        );
    }

    #[test]
    fn test_month_axis() {
        let months = month_axis();
        assert_eq!(months.len(), 12);
        assert_eq!(months.first().map(String::as_str), Some("2024-04"));
        assert_eq!(months.last().map(String::as_str), Some("2025-03"));
    }
}
