//! KPI Summary
//!
//! Flat KPI snapshots from the backend and the fixed-shape panels that
//! display them. Formatting only; no figures are computed here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::LoadState;

/// Flat KPI snapshot for one dashboard section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(Map<String, Value>);

impl Summary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Numeric field value
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Field value as display text (strings verbatim, numbers formatted)
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => n.as_f64().map(format_number),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Trend paired with a field through its `<key>_vector` companion
    pub fn trend(&self, key: &str) -> Trend {
        Trend::from_value(self.0.get(&format!("{}_vector", key)))
    }

    /// Field names, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Direction of a KPI compared to the previous period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Flat,
    Down,
    Unknown,
}

impl Trend {
    /// Read a `_vector` value; anything outside {-1, 0, 1} is `Unknown`
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_f64) {
            Some(v) if v == 1.0 => Trend::Up,
            Some(v) if v == 0.0 => Trend::Flat,
            Some(v) if v == -1.0 => Trend::Down,
            _ => Trend::Unknown,
        }
    }

    /// Glyph prefix shown before the value
    pub fn glyph(self) -> &'static str {
        match self {
            Trend::Up => "👆 ",
            Trend::Flat => "👉 ",
            Trend::Down => "👇 ",
            Trend::Unknown => "\u{3000} ",
        }
    }
}

// ============ Formatting ============

/// Placeholder for a field the summary does not carry
pub const MISSING_VALUE: &str = "-";

/// Format a number with thousands separators and at most three decimals
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part.trim_matches('0') != "" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Format a yen amount: `¥ 1,234,567`
pub fn format_yen(value: f64) -> String {
    format!("¥ {}", format_number(value))
}

/// Format a ratio already expressed in percent: `12.5%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// How a KPI value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Shown as delivered (dates)
    Text,
    /// `¥` prefix with thousands separators
    Yen,
    /// Thousands separators with `%` suffix
    Percent,
}

impl ValueFormat {
    fn render(self, summary: &Summary, key: &str) -> Option<String> {
        match self {
            ValueFormat::Text => summary.text(key),
            ValueFormat::Yen => summary.number(key).map(format_yen),
            ValueFormat::Percent => summary.number(key).map(format_percent),
        }
    }
}

/// One line of a KPI panel definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiField {
    pub label: &'static str,
    pub key: &'static str,
    pub format: ValueFormat,
    /// Whether the field has a `_vector` companion to show as a glyph
    pub with_trend: bool,
}

impl KpiField {
    const fn new(label: &'static str, key: &'static str, format: ValueFormat, with_trend: bool) -> Self {
        Self { label, key, format, with_trend }
    }
}

/// A rendered KPI line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiRow {
    pub label: &'static str,
    pub value: String,
    pub trend: Option<Trend>,
}

impl KpiRow {
    /// Value text with its trend glyph, as shown in the grid
    pub fn display_value(&self) -> String {
        match self.trend {
            Some(trend) => format!("{}{}", trend.glyph(), self.value),
            None => self.value.clone(),
        }
    }
}

const COMMAND_CENTER_FIELDS: [KpiField; 5] = [
    KpiField::new("Date:", "latest_date", ValueFormat::Text, false),
    KpiField::new("Fire Progress:", "fire_progress", ValueFormat::Percent, true),
    KpiField::new("Net Worth :", "total_assets", ValueFormat::Yen, true),
    KpiField::new("Net Worth Target:", "total_target_assets", ValueFormat::Yen, true),
    KpiField::new("Capital Goal Track:", "difference", ValueFormat::Yen, true),
];

const ALLOCATION_MATRIX_FIELDS: [KpiField; 5] = [
    KpiField::new("Date:", "latest_date", ValueFormat::Text, false),
    KpiField::new("Dynamic Assets:", "active_growth_capital", ValueFormat::Percent, true),
    KpiField::new("Aggressive Assets:", "aggressive_return_exposure", ValueFormat::Percent, true),
    KpiField::new("Emergency Buffer:", "emergency_buffer", ValueFormat::Yen, true),
    KpiField::new("Debt Exposure:", "debt_exposure_ratio", ValueFormat::Percent, true),
];

/// The KPI panels the sidebar can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryPanel {
    CommandCenter,
    AllocationMatrix,
}

/// What a panel shows for a given load state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Loading(&'static str),
    Error(String),
    Grid(Vec<KpiRow>),
}

impl SummaryPanel {
    /// Panel heading
    pub fn heading(self) -> &'static str {
        match self {
            SummaryPanel::CommandCenter => "📊 KPI Command Center",
            SummaryPanel::AllocationMatrix => "📊 KPI Allocation Matrix",
        }
    }

    /// Field layout, in display order
    pub fn fields(self) -> &'static [KpiField] {
        match self {
            SummaryPanel::CommandCenter => &COMMAND_CENTER_FIELDS,
            SummaryPanel::AllocationMatrix => &ALLOCATION_MATRIX_FIELDS,
        }
    }

    /// Placeholder while the summary is loading
    pub fn loading_text(self) -> &'static str {
        match self {
            SummaryPanel::CommandCenter => "Loading...",
            SummaryPanel::AllocationMatrix => "読み込み中...",
        }
    }

    /// Prefix for error messages
    pub fn error_prefix(self) -> &'static str {
        match self {
            SummaryPanel::CommandCenter => "Error: ",
            SummaryPanel::AllocationMatrix => "エラー: ",
        }
    }

    /// Format every field of the panel; missing fields render as `-`
    pub fn rows(self, summary: &Summary) -> Vec<KpiRow> {
        self.fields()
            .iter()
            .map(|field| KpiRow {
                label: field.label,
                value: field
                    .format
                    .render(summary, field.key)
                    .unwrap_or_else(|| MISSING_VALUE.to_string()),
                trend: field.with_trend.then(|| summary.trend(field.key)),
            })
            .collect()
    }

    /// Choose between the loading, error and grid renderings
    pub fn view(self, state: &LoadState<Summary>) -> PanelView {
        match state {
            LoadState::Loading => PanelView::Loading(self.loading_text()),
            LoadState::Failed(message) => {
                PanelView::Error(format!("{}{}", self.error_prefix(), message))
            }
            LoadState::Ready(summary) => PanelView::Grid(self.rows(summary)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_center_summary() -> Summary {
        serde_json::from_value(json!({
            "latest_date": "25/03/31",
            "fire_progress": 42.7,
            "fire_progress_vector": 1,
            "total_assets": 12345678,
            "total_assets_vector": 0,
            "total_target_assets": 15000000,
            "total_target_assets_vector": -1,
            "difference": -2654322,
            "some_future_kpi": "ignored"
        }))
        .unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(12345678.0), "12,345,678");
        assert_eq!(format_number(-2654322.0), "-2,654,322");
        assert_eq!(format_number(42.7), "42.7");
        assert_eq!(format_number(1234.56789), "1,234.568");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_currency_and_percent() {
        assert_eq!(format_yen(1500000.0), "¥ 1,500,000");
        assert_eq!(format_percent(12.5), "12.5%");
    }

    #[test]
    fn test_trend_values() {
        assert_eq!(Trend::from_value(Some(&json!(1))), Trend::Up);
        assert_eq!(Trend::from_value(Some(&json!(0))), Trend::Flat);
        assert_eq!(Trend::from_value(Some(&json!(-1.0))), Trend::Down);
        assert_eq!(Trend::from_value(Some(&json!(2))), Trend::Unknown);
        assert_eq!(Trend::from_value(Some(&json!("1"))), Trend::Unknown);
        assert_eq!(Trend::from_value(Some(&Value::Null)), Trend::Unknown);
        assert_eq!(Trend::from_value(None), Trend::Unknown);
        assert_eq!(Trend::Unknown.glyph(), "\u{3000} ");
    }

    #[test]
    fn test_command_center_rows() {
        let rows = SummaryPanel::CommandCenter.rows(&command_center_summary());
        let shown: Vec<String> = rows.iter().map(KpiRow::display_value).collect();
        assert_eq!(
            shown,
            vec![
                "25/03/31".to_string(),
                "👆 42.7%".to_string(),
                "👉 ¥ 12,345,678".to_string(),
                "👇 ¥ 15,000,000".to_string(),
                "\u{3000} ¥ -2,654,322".to_string(),
            ]
        );
        assert_eq!(rows[4].label, "Capital Goal Track:");
    }

    #[test]
    fn test_missing_fields_never_fail() {
        let rows = SummaryPanel::AllocationMatrix.rows(&Summary::new());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.value == MISSING_VALUE));
        assert!(rows[1..].iter().all(|row| row.trend == Some(Trend::Unknown)));
    }

    #[test]
    fn test_panel_states() {
        let panel = SummaryPanel::AllocationMatrix;
        assert_eq!(
            panel.view(&LoadState::Loading),
            PanelView::Loading("読み込み中...")
        );
        assert_eq!(
            panel.view(&LoadState::Failed("Network error: refused".to_string())),
            PanelView::Error("エラー: Network error: refused".to_string())
        );
        let summary = Summary::new().with("emergency_buffer", 800000);
        match panel.view(&LoadState::Ready(summary)) {
            PanelView::Grid(rows) => assert_eq!(rows[3].value, "¥ 800,000"),
            other => panic!("unexpected view: {:?}", other),
        }
    }
}
