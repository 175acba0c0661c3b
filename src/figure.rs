//! Figure Data Model
//!
//! Plotly figure definitions as delivered by the backend. Trace data is
//! opaque to this crate; only the layout tree is inspected (for fonts and
//! sizing). Figures travel either as JSON objects or as JSON-encoded strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{DashboardError, DashboardResult};

/// A chart definition: ordered traces plus a layout tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Trace descriptors, passed through untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Value>,
    /// Layout/style tree
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Figure {
    /// Create a figure from traces and a layout
    pub fn new(data: Vec<Value>, layout: Map<String, Value>) -> Self {
        Self { data, layout }
    }

    /// Decode a figure from a JSON string
    pub fn from_json_str(encoded: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(encoded)?)
    }

    /// Decode a figure from either transport form
    pub fn from_value(value: Value) -> DashboardResult<Self> {
        match value {
            Value::String(encoded) => Self::from_json_str(&encoded),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(DashboardError::Parse(format!(
                "expected a figure object or JSON string, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Layout as a JSON value
    pub fn layout_value(&self) -> Value {
        Value::Object(self.layout.clone())
    }

    /// Number of traces
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Names of traces that carry one, in order
    pub fn trace_names(&self) -> Vec<&str> {
        self.data
            .iter()
            .filter_map(|trace| trace.get("name").and_then(Value::as_str))
            .collect()
    }

    /// Trace types (`scatter`, `bar`, `table`, ...), defaulting to `scatter`
    pub fn trace_types(&self) -> Vec<&str> {
        self.data
            .iter()
            .map(|trace| trace.get("type").and_then(Value::as_str).unwrap_or("scatter"))
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A figure in transport form, decoded on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigurePayload(Value);

impl FigurePayload {
    /// Wrap a raw JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Encode a figure as a JSON string payload
    pub fn encoded(figure: &Figure) -> DashboardResult<Self> {
        Ok(Self(Value::String(serde_json::to_string(figure)?)))
    }

    /// Carry a figure as a JSON object payload
    pub fn object(figure: &Figure) -> DashboardResult<Self> {
        Ok(Self(serde_json::to_value(figure)?))
    }

    /// Whether the payload carries anything to draw (null and "" do not)
    pub fn is_present(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether the payload is the JSON-encoded string form
    pub fn is_encoded(&self) -> bool {
        self.0.is_string()
    }

    /// Decode into a figure
    pub fn decode(&self) -> DashboardResult<Figure> {
        Figure::from_value(self.0.clone())
    }

    /// Raw JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for FigurePayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Named collection of figures for one dashboard section
///
/// Keys are an open vocabulary; keys no page knows about are kept and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphSet(BTreeMap<String, FigurePayload>);

impl GraphSet {
    /// Create an empty graph set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a graph
    pub fn insert(&mut self, key: impl Into<String>, payload: FigurePayload) {
        self.0.insert(key.into(), payload);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, payload: FigurePayload) -> Self {
        self.insert(key, payload);
        self
    }

    /// Payload for a key, if present and non-empty
    pub fn get(&self, key: &str) -> Option<&FigurePayload> {
        self.0.get(key).filter(|payload| payload.is_present())
    }

    /// Decoded figure for a key; `None` when the key is absent
    pub fn figure(&self, key: &str) -> Option<DashboardResult<Figure>> {
        self.get(key).map(FigurePayload::decode)
    }

    /// Whether a drawable graph exists for a key
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FigurePayload)> for GraphSet {
    fn from_iter<I: IntoIterator<Item = (String, FigurePayload)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
