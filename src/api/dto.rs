//! Data Transfer Objects
//!
//! Response envelopes of the backend endpoints and the body decoders shared
//! by the native client and the WASM frontend.

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;
use crate::figure::{Figure, GraphSet};
use crate::summary::Summary;

// ============================================
// ENVELOPES
// ============================================

/// `GET /api/<section>/summary` response
///
/// The backend also sends `ok` and an empty `graphs`; extra keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub summary: Summary,
}

/// `GET /api/<section>/graphs` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphsEnvelope {
    #[serde(default)]
    pub graphs: GraphSet,
}

// ============================================
// DECODERS
// ============================================

/// Decode a summary response body
pub fn decode_summary(body: &str) -> DashboardResult<Summary> {
    let envelope: SummaryEnvelope = serde_json::from_str(body)?;
    Ok(envelope.summary)
}

/// Decode a graphs response body
pub fn decode_graphs(body: &str) -> DashboardResult<GraphSet> {
    let envelope: GraphsEnvelope = serde_json::from_str(body)?;
    Ok(envelope.graphs)
}

/// Decode a details response body (a figure, raw or JSON-encoded)
pub fn decode_details(body: &str) -> DashboardResult<Figure> {
    Figure::from_value(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_summary_ignores_extra_keys() {
        let body = json!({
            "ok": true,
            "graphs": {},
            "summary": {"latest_date": "25/03/31", "fire_progress": 40.1}
        })
        .to_string();
        let summary = decode_summary(&body).unwrap();
        assert_eq!(summary.number("fire_progress"), Some(40.1));
    }

    #[test]
    fn test_decode_graphs_with_encoded_figures() {
        let figure = json!({"data": [{"type": "bar"}], "layout": {}}).to_string();
        let body = json!({"ok": true, "graphs": {"assets": figure}}).to_string();
        let graphs = decode_graphs(&body).unwrap();
        let decoded = graphs.figure("assets").unwrap().unwrap();
        assert_eq!(decoded.trace_types(), vec!["bar"]);
    }

    #[test]
    fn test_decode_details_string_body() {
        let figure = json!({"data": [{"type": "table"}], "layout": {"meta": {"id": "liquidity_horizon"}}});
        let as_string = serde_json::to_string(&figure.to_string()).unwrap();

        let from_string = decode_details(&as_string).unwrap();
        let from_object = decode_details(&figure.to_string()).unwrap();
        assert_eq!(from_string, from_object);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_graphs("<html>502 Bad Gateway</html>").is_err());
    }
}
