//! Node-link graph documents.
//!
//! Accepts the `networkx` node-link layout:
//!
//! ```json
//! {
//!   "directed": true,
//!   "nodes": [{"id": "a", "size": 5}, {"id": "b"}],
//!   "links": [{"source": "a", "target": "b", "weight": 2}],
//!   "layout": {"a": [0, 0], "b": [1, 1]}
//! }
//! ```
//!
//! Input goes through `json5`, so comments and trailing commas are fine.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChartError, Result};
use crate::graph::{Attributes, Graph, Positions};

/// A decoded graph file, with positions when the file carries them.
#[derive(Debug, Clone)]
pub struct GraphDocument {
    pub graph: Graph,
    pub positions: Option<Positions>,
}

#[derive(Deserialize)]
struct NodeLinkData {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    links: Vec<RawLink>,
    #[serde(default, alias = "pos")]
    layout: Option<Positions>,
}

#[derive(Deserialize)]
struct RawNode {
    id: Value,
    #[serde(flatten)]
    attrs: Attributes,
}

#[derive(Deserialize)]
struct RawLink {
    source: Value,
    target: Value,
    #[serde(flatten)]
    attrs: Attributes,
}

/// Parse a node-link document.
///
/// # Errors
///
/// Returns [`ChartError::Parse`] if the text is not a node-link document or
/// an identifier is not a string or number.
pub fn parse_node_link(source: &str) -> Result<GraphDocument> {
    let data: NodeLinkData = json5::from_str(source).map_err(|e| ChartError::Parse {
        what: "graph",
        message: e.to_string(),
    })?;

    let mut graph = if data.directed {
        Graph::directed()
    } else {
        Graph::undirected()
    };
    for node in data.nodes {
        graph.add_node(node_id(&node.id)?, node.attrs);
    }
    for link in data.links {
        graph.add_edge(node_id(&link.source)?, node_id(&link.target)?, link.attrs);
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "parsed node-link graph"
    );

    Ok(GraphDocument {
        graph,
        positions: data.layout,
    })
}

/// Parse a standalone positions document (`{"id": [x, y], ...}`).
///
/// # Errors
///
/// Returns [`ChartError::Parse`] on malformed input.
pub fn parse_positions(source: &str) -> Result<Positions> {
    json5::from_str(source).map_err(|e| ChartError::Parse {
        what: "layout",
        message: e.to_string(),
    })
}

fn node_id(value: &Value) -> Result<String> {
    id_text(value).ok_or_else(|| ChartError::Parse {
        what: "graph",
        message: format!("node id must be a string or number, got {value}"),
    })
}

/// Text form of a string or numeric node id.
///
/// Integral floats (json5 may hand numbers over as f64) print without `.0`.
pub(crate) fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = f as i64;
                Some(whole.to_string())
            }
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_link_with_layout() {
        let doc = parse_node_link(
            r#"{
                // comments are allowed
                "directed": true,
                "nodes": [{"id": "a", "size": 5}, {"id": "b"}],
                "links": [{"source": "a", "target": "b", "weight": 2},],
                "layout": {"a": [0, 0], "b": [1, 1]},
            }"#,
        )
        .unwrap();
        assert!(doc.graph.is_directed());
        assert_eq!(doc.graph.node_count(), 2);
        assert_eq!(doc.graph.edge_count(), 1);
        let size = doc.graph.node_attrs("a").unwrap().get("size").unwrap();
        assert_eq!(size.as_f64(), Some(5.0));
        assert!(doc.graph.edges()[0].attrs.contains_key("weight"));
        assert_eq!(doc.positions.unwrap().get("b"), Some((1.0, 1.0)));
    }

    #[test]
    fn test_parse_accepts_edges_alias_and_numeric_ids() {
        let doc = parse_node_link(r#"{"nodes": [{"id": 1}], "edges": [{"source": 1, "target": 2}]}"#)
            .unwrap();
        assert!(!doc.graph.is_directed());
        assert!(doc.graph.contains_node("1"));
        assert!(doc.graph.contains_node("2"));
        assert!(doc.positions.is_none());
    }

    #[test]
    fn test_parse_rejects_object_ids() {
        let err = parse_node_link(r#"{"nodes": [{"id": {"x": 1}}]}"#).unwrap_err();
        assert!(matches!(err, ChartError::Parse { what: "graph", .. }));
    }

    #[test]
    fn test_parse_positions() {
        let pos = parse_positions("{a: [0.5, 2]}").unwrap();
        assert_eq!(pos.get("a"), Some((0.5, 2.0)));
    }
}
