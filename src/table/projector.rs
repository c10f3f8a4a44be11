//! Projection of graph nodes and edges into tables.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Value, json};

use crate::error::{ChartError, Result};
use crate::graph::{Attributes, Graph, Positions};
use crate::table::{Row, RowKey, Table};

/// Structural columns of a node table.
pub const NODE_COLUMNS: &[&str] = &["id", "x", "y"];

/// Structural columns of an edge table.
pub const EDGE_COLUMNS: &[&str] = &["source", "target", "x", "y", "edge", "pair"];

/// Project nodes into a table with one row per node.
///
/// # Errors
///
/// Returns [`ChartError::ReservedAttribute`] if a node attribute is named
/// `id`, `x` or `y`, [`ChartError::MissingLayoutCoordinate`] if a node has no
/// position and [`ChartError::NonFiniteCoordinate`] if its position is NaN or
/// infinite.
pub fn project_nodes(graph: &Graph, positions: &Positions) -> Result<Table> {
    let columns = column_set(
        NODE_COLUMNS,
        graph.nodes().iter().map(|n| &n.attrs),
        "node",
    )?;

    let mut rows = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let (x, y) = positions.coordinate(&node.id)?;
        let mut values = empty_values(&columns);
        values.insert("id".to_string(), json!(node.id));
        values.insert("x".to_string(), json!(x));
        values.insert("y".to_string(), json!(y));
        merge_attrs(&mut values, &node.attrs);
        rows.push(Row {
            key: RowKey::Node {
                id: node.id.clone(),
            },
            values,
        });
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "projected nodes");
    Ok(Table::from_parts(columns, rows))
}

/// Project edges into a table with two rows per edge, source then target.
///
/// # Errors
///
/// Returns [`ChartError::ReservedAttribute`] if an edge attribute reuses a
/// structural column, [`ChartError::MissingLayoutCoordinate`] if an
/// endpoint has no position and [`ChartError::NonFiniteCoordinate`] if an
/// endpoint position is NaN or infinite.
pub fn project_edges(graph: &Graph, positions: &Positions) -> Result<Table> {
    project_edge_segments(graph, positions, |source, target| [source, target])
}

/// Project arrowhead segments: two rows per edge, starting at the target and
/// ending `arrow_length` of the edge vector back toward the source.
///
/// # Errors
///
/// Returns [`ChartError::InvalidArrowLength`] unless `arrow_length` is in
/// `(0, 1]`, plus the errors of [`project_edges`].
pub fn project_edges_with_arrows(
    graph: &Graph,
    positions: &Positions,
    arrow_length: f64,
) -> Result<Table> {
    if !(arrow_length > 0.0 && arrow_length <= 1.0) {
        return Err(ChartError::InvalidArrowLength(arrow_length));
    }
    project_edge_segments(graph, positions, |(x1, y1), (x2, y2)| {
        let tail = (
            arrow_length.mul_add(-(x2 - x1), x2),
            arrow_length.mul_add(-(y2 - y1), y2),
        );
        [(x2, y2), tail]
    })
}

fn project_edge_segments(
    graph: &Graph,
    positions: &Positions,
    segment: impl Fn((f64, f64), (f64, f64)) -> [(f64, f64); 2],
) -> Result<Table> {
    let columns = column_set(
        EDGE_COLUMNS,
        graph.edges().iter().map(|e| &e.attrs),
        "edge",
    )?;

    let mut rows = Vec::with_capacity(graph.edge_count() * 2);
    for (index, edge) in graph.edges().iter().enumerate() {
        let source = positions.coordinate(&edge.source)?;
        let target = positions.coordinate(&edge.target)?;
        for (x, y) in segment(source, target) {
            let mut values = empty_values(&columns);
            values.insert("source".to_string(), json!(edge.source));
            values.insert("target".to_string(), json!(edge.target));
            values.insert("x".to_string(), json!(x));
            values.insert("y".to_string(), json!(y));
            values.insert("edge".to_string(), json!(index));
            values.insert("pair".to_string(), json!([edge.source, edge.target]));
            merge_attrs(&mut values, &edge.attrs);
            rows.push(Row {
                key: RowKey::Edge {
                    index,
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                },
                values,
            });
        }
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "projected edges");
    Ok(Table::from_parts(columns, rows))
}

// Structural columns in fixed order, then the sorted union of attribute keys.
fn column_set<'a>(
    structural: &[&str],
    attrs: impl Iterator<Item = &'a Attributes>,
    element: &'static str,
) -> Result<Vec<String>> {
    let mut extra = BTreeSet::new();
    for map in attrs {
        for key in map.keys() {
            if structural.contains(&key.as_str()) {
                return Err(ChartError::ReservedAttribute {
                    element,
                    name: key.clone(),
                });
            }
            extra.insert(key.clone());
        }
    }
    Ok(structural
        .iter()
        .map(|c| (*c).to_string())
        .chain(extra)
        .collect())
}

fn empty_values(columns: &[String]) -> BTreeMap<String, Value> {
    columns.iter().map(|c| (c.clone(), Value::Null)).collect()
}

fn merge_attrs(values: &mut BTreeMap<String, Value>, attrs: &Attributes) {
    for (key, value) in attrs {
        values.insert(key.clone(), value.clone());
    }
}
